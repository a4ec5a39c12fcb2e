//! Greedy non-maximum suppression over detection bounding boxes.
use crate::types::{BoundingBox, Detection};
use log::debug;
use serde::Deserialize;
use std::cmp::Ordering;

/// How the overlap between the kept box and a remaining box is measured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapMetric {
    /// Intersection over union.
    #[default]
    Iou,
    /// Intersection over the remaining box's own area. Asymmetric: a small
    /// box inside a large kept one is always suppressed.
    Containment,
}

impl OverlapMetric {
    pub fn overlap(self, kept: &BoundingBox, other: &BoundingBox) -> f32 {
        let inter = kept.intersection_area(other);
        if inter == 0 {
            return 0.0;
        }
        let denom = match self {
            OverlapMetric::Iou => kept.area() + other.area() - inter,
            OverlapMetric::Containment => other.area(),
        };
        if denom <= 0 {
            0.0
        } else {
            inter as f32 / denom as f32
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SuppressionOptions {
    /// Remaining boxes overlapping a kept one by more than this are dropped.
    pub overlap_threshold: f32,
    pub metric: OverlapMetric,
}

impl Default for SuppressionOptions {
    fn default() -> Self {
        Self {
            overlap_threshold: 0.5,
            metric: OverlapMetric::Iou,
        }
    }
}

/// Keep the highest-confidence detection, drop everything overlapping it,
/// repeat. Output is in selection order; equal confidences keep input order.
pub fn suppress(detections: &[Detection], opts: &SuppressionOptions) -> Vec<Detection> {
    if detections.is_empty() {
        return Vec::new();
    }
    let mut order: Vec<usize> = (0..detections.len()).collect();
    // Stable sort: ties stay in input order.
    order.sort_by(|&a, &b| {
        detections[b]
            .confidence
            .partial_cmp(&detections[a].confidence)
            .unwrap_or(Ordering::Equal)
    });
    let boxes: Vec<BoundingBox> = detections.iter().map(Detection::bounding_box).collect();

    let mut suppressed = vec![false; detections.len()];
    let mut keep = Vec::new();
    for (pos, &i) in order.iter().enumerate() {
        if suppressed[i] {
            continue;
        }
        keep.push(detections[i]);
        for &j in &order[pos + 1..] {
            if !suppressed[j] && opts.metric.overlap(&boxes[i], &boxes[j]) > opts.overlap_threshold
            {
                suppressed[j] = true;
            }
        }
    }
    debug!(
        "suppress: in={} kept={} metric={:?}",
        detections.len(),
        keep.len(),
        opts.metric
    );
    keep
}

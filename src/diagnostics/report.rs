use super::timing::TimingBreakdown;
use crate::types::{Detection, DetectionParams};
use serde::Serialize;

/// Outcome of one detection call with the bookkeeping around it.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub input: InputDescriptor,
    pub params: DetectionParams,
    /// Circles proposed by the Hough detector before suppression.
    pub hough_candidates: usize,
    /// Circles proposed by the threshold/contour detector before suppression.
    pub contour_candidates: usize,
    pub detections: Vec<Detection>,
    pub timings: TimingBreakdown,
    pub model_version: u32,
}

impl DetectionReport {
    pub fn count(&self) -> usize {
        self.detections.len()
    }

    /// One-line human readable summary used by the CLI.
    pub fn summary(&self) -> String {
        format!(
            "{}x{} ch={} plaques={} (hough={}, contour={}) model=v{} total={:.2}ms",
            self.input.width,
            self.input.height,
            self.input.channels,
            self.count(),
            self.hough_candidates,
            self.contour_candidates,
            self.model_version,
            self.timings.total_ms
        )
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
}

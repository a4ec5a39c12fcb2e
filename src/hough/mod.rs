//! Circular-feature detector: gradient Hough transform.
//!
//! Overview
//! - Canny edge map with fixed internal thresholds (high 50, low 25).
//! - Every edge pixel votes for centres along its gradient line, both
//!   directions, for radii in `[min_radius, max_radius]`; the accumulator is
//!   `DP` pixels per cell.
//! - Accumulator peaks above `sensitivity` are visited strongest first. A peak
//!   closer than `min_distance` to an accepted centre is dropped, so only the
//!   locally strongest centre survives.
//! - The radius comes from the densest shell of edge-pixel distances; the
//!   circle is accepted when that shell holds more than `sensitivity` pixels.
//!
//! Only the four `DetectionParams` knobs are tunable.

pub mod accumulator;
pub mod radius;

use crate::edges::canny;
use crate::image::GrayImageU8;
use crate::types::{Detection, DetectionParams, HOUGH_CONFIDENCE};
use accumulator::Accumulator;
use log::debug;
use radius::estimate_radius;

/// Inverse accumulator resolution.
const DP: f32 = 1.2;
/// Canny upper threshold; the lower one is half of it.
const CANNY_HIGH: f32 = 50.0;
const CANNY_LOW: f32 = CANNY_HIGH * 0.5;
/// Width of the distance shell used to estimate a radius (pixels).
const RADIUS_SHELL: f32 = 2.0 * DP;

/// Find circles in a preprocessed intensity image.
///
/// Returns an empty list when nothing clears the accumulator threshold.
pub fn detect_circles(gray: &GrayImageU8, params: &DetectionParams) -> Vec<Detection> {
    let edge_map = canny(gray, CANNY_LOW, CANNY_HIGH);
    let points = edge_map.points();
    if points.is_empty() {
        debug!("hough: no edge pixels");
        return Vec::new();
    }

    let mut acc = Accumulator::new(gray.w, gray.h, DP);
    acc.vote(&edge_map, params.min_radius, params.max_radius);
    let peaks = acc.peaks(params.sensitivity);
    debug!(
        "hough: edges={} centre_candidates={} acc={}x{}",
        points.len(),
        peaks.len(),
        acc.cols,
        acc.rows
    );

    let min_dist = (params.min_distance as f32).max(DP);
    let min_dist_sq = min_dist * min_dist;
    let (min_r, max_r) = (params.min_radius as f32, params.max_radius as f32);

    let mut accepted: Vec<(f32, f32, f32)> = Vec::new();
    for peak in &peaks {
        let (cx, cy) = acc.cell_center(peak);
        let crowded = accepted.iter().any(|&(ax, ay, _)| {
            let dx = ax - cx;
            let dy = ay - cy;
            dx * dx + dy * dy < min_dist_sq
        });
        if crowded {
            continue;
        }
        let Some(est) = estimate_radius(cx, cy, &points, min_r, max_r, RADIUS_SHELL) else {
            continue;
        };
        if est.support as u32 > params.sensitivity {
            accepted.push((cx, cy, est.radius));
        }
    }

    accepted
        .into_iter()
        .map(|(cx, cy, r)| {
            Detection::new(
                cx.round() as i32,
                cy.round() as i32,
                params.clamp_radius(r),
                HOUGH_CONFIDENCE,
            )
        })
        .collect()
}

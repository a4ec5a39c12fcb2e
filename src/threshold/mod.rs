//! Threshold/contour detector.
//!
//! Local adaptive binarisation, morphological opening, outer contours, then a
//! minimum enclosing circle per surviving contour. Recovers faint or
//! irregular plaques whose rims are too weak for the Hough vote.

pub mod adaptive;
pub mod contours;
pub mod enclosing;
pub mod morphology;

use crate::error::DetectionError;
use crate::image::GrayImageU8;
use crate::types::{Detection, DetectionParams, CONTOUR_CONFIDENCE};
use adaptive::adaptive_threshold_inv;
use contours::find_external_contours;
use enclosing::min_enclosing_circle;
use log::debug;
use morphology::open;
use serde::Deserialize;
use std::f64::consts::PI;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ThresholdOptions {
    /// Odd side of the neighbourhood used for the local mean.
    pub block_size: usize,
    /// How much darker than its neighbourhood a pixel must be.
    pub offset: f32,
    /// Erosion/dilation rounds of the opening.
    pub open_iterations: usize,
}

impl Default for ThresholdOptions {
    fn default() -> Self {
        Self {
            block_size: 15,
            offset: 2.0,
            open_iterations: 2,
        }
    }
}

impl ThresholdOptions {
    pub fn validate(&self) -> Result<(), DetectionError> {
        if self.block_size < 3 || self.block_size % 2 == 0 {
            return Err(DetectionError::InvalidParameters(format!(
                "block_size must be odd and at least 3, got {}",
                self.block_size
            )));
        }
        if !self.offset.is_finite() {
            return Err(DetectionError::InvalidParameters(
                "threshold offset must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Opened foreground mask (255 = darker than surroundings).
pub fn binary_mask(
    gray: &GrayImageU8,
    opts: &ThresholdOptions,
) -> Result<GrayImageU8, DetectionError> {
    opts.validate()?;
    let mask = adaptive_threshold_inv(gray, opts.block_size, opts.offset)?;
    Ok(open(&mask, opts.open_iterations))
}

/// Contour candidates with the default thresholding options.
pub fn detect_by_threshold(gray: &GrayImageU8, params: &DetectionParams) -> Vec<Detection> {
    // Default options always validate.
    detect_by_threshold_with(gray, params, &ThresholdOptions::default()).unwrap_or_default()
}

pub fn detect_by_threshold_with(
    gray: &GrayImageU8,
    params: &DetectionParams,
    opts: &ThresholdOptions,
) -> Result<Vec<Detection>, DetectionError> {
    if gray.w == 0 || gray.h == 0 {
        return Ok(Vec::new());
    }
    let mask = binary_mask(gray, opts)?;
    let contours = find_external_contours(&mask);

    let min_area = PI * (params.min_radius as f64).powi(2);
    let max_area = PI * (params.max_radius as f64).powi(2);

    let out: Vec<Detection> = contours
        .iter()
        .filter(|c| {
            let area = c.area();
            area > min_area && area < max_area
        })
        .filter_map(|c| min_enclosing_circle(&c.points))
        .filter(|circle| params.accepts_radius(circle.radius))
        .map(|circle| {
            Detection::new(
                circle.center.x as i32,
                circle.center.y as i32,
                circle.radius as i32,
                CONTOUR_CONFIDENCE,
            )
        })
        .collect();
    debug!(
        "threshold: foreground={} contours={} accepted={}",
        mask.count_nonzero(),
        contours.len(),
        out.len()
    );
    Ok(out)
}

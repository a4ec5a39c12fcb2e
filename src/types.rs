use crate::error::DetectionError;
use serde::{Deserialize, Serialize};

/// Confidence assigned to every circle accepted by the Hough detector.
pub const HOUGH_CONFIDENCE: f32 = 0.8;
/// Confidence assigned to every circle fitted by the threshold/contour detector.
pub const CONTOUR_CONFIDENCE: f32 = 0.7;

/// Largest radius (pixels) accepted by [`DetectionParams::validate`]. Keeps
/// centre ± radius box arithmetic inside `i32`.
pub const MAX_RADIUS_LIMIT: u32 = 1 << 20;

/// Per-call search parameters.
///
/// `sensitivity` is the Hough accumulator threshold: larger values accept
/// fewer circles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionParams {
    pub min_radius: u32,
    pub max_radius: u32,
    pub sensitivity: u32,
    pub min_distance: u32,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            min_radius: 5,
            max_radius: 50,
            sensitivity: 30,
            min_distance: 20,
        }
    }
}

impl DetectionParams {
    /// Reject combinations that make the radius/area filters degenerate.
    pub fn validate(&self) -> Result<(), DetectionError> {
        if self.min_radius == 0 {
            return Err(DetectionError::InvalidParameters(
                "min_radius must be positive".to_string(),
            ));
        }
        if self.min_radius >= self.max_radius {
            return Err(DetectionError::InvalidParameters(format!(
                "min_radius ({}) must be smaller than max_radius ({})",
                self.min_radius, self.max_radius
            )));
        }
        if self.max_radius > MAX_RADIUS_LIMIT {
            return Err(DetectionError::InvalidParameters(format!(
                "max_radius ({}) exceeds the supported limit {MAX_RADIUS_LIMIT}",
                self.max_radius
            )));
        }
        if self.sensitivity == 0 {
            return Err(DetectionError::InvalidParameters(
                "sensitivity must be positive".to_string(),
            ));
        }
        if self.min_distance == 0 {
            return Err(DetectionError::InvalidParameters(
                "min_distance must be positive".to_string(),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn accepts_radius(&self, radius: f64) -> bool {
        radius >= self.min_radius as f64 && radius <= self.max_radius as f64
    }

    /// Clamp a fitted radius into `[min_radius, max_radius]` before the
    /// integer cast.
    #[inline]
    pub fn clamp_radius(&self, radius: f32) -> i32 {
        radius
            .round()
            .max(self.min_radius as f32)
            .min(self.max_radius as f32) as i32
    }
}

/// A located plaque: centre and radius in pixels plus the detector confidence.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub x: i32,
    pub y: i32,
    pub radius: i32,
    pub confidence: f32,
}

impl Detection {
    pub fn new(x: i32, y: i32, radius: i32, confidence: f32) -> Self {
        Self {
            x,
            y,
            radius,
            confidence,
        }
    }

    /// Inclusive axis-aligned box `centre ± radius`.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox {
            x0: self.x - self.radius,
            y0: self.y - self.radius,
            x1: self.x + self.radius,
            y1: self.y + self.radius,
        }
    }
}

/// Inclusive integer pixel box; a box with `x0 == x1` is one pixel wide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl BoundingBox {
    #[inline]
    pub fn area(&self) -> i64 {
        let w = (self.x1 - self.x0 + 1).max(0) as i64;
        let h = (self.y1 - self.y0 + 1).max(0) as i64;
        w * h
    }

    #[inline]
    pub fn intersection_area(&self, other: &BoundingBox) -> i64 {
        let w = (self.x1.min(other.x1) - self.x0.max(other.x0) + 1).max(0) as i64;
        let h = (self.y1.min(other.y1) - self.y0.max(other.y0) + 1).max(0) as i64;
        w * h
    }
}

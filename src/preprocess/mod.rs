//! Grayscale preprocessing shared by both candidate detectors.
//!
//! Steps, in order:
//! 1. luminance conversion (BT.601 weights, fixed point);
//! 2. Gaussian blur (9×9, σ = 2, reflect-101 borders) against pixel noise;
//! 3. CLAHE (clip 2.0, 8×8 tiles) against uneven dish illumination.
//!
//! Both detectors consume the same output so their candidates are comparable
//! during suppression.

pub mod clahe;
pub mod filters;
pub mod grayscale;

use crate::error::DetectionError;
use crate::image::{GrayImageU8, PixelBuffer};
use clahe::{clahe, ClaheParams};
use filters::{gaussian_blur, BorderMode, GaussianKernel};
use grayscale::to_grayscale;
use log::debug;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PreprocessOptions {
    /// Odd Gaussian kernel size.
    pub blur_kernel_size: usize,
    /// Gaussian standard deviation; `<= 0` derives it from the kernel size.
    pub blur_sigma: f32,
    /// CLAHE clip limit; `<= 0` disables clipping.
    pub clahe_clip_limit: f32,
    /// CLAHE tiles along each axis.
    pub clahe_tiles: usize,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            blur_kernel_size: 9,
            blur_sigma: 2.0,
            clahe_clip_limit: 2.0,
            clahe_tiles: 8,
        }
    }
}

impl PreprocessOptions {
    pub fn validate(&self) -> Result<(), DetectionError> {
        if self.blur_kernel_size == 0 || self.blur_kernel_size % 2 == 0 {
            return Err(DetectionError::InvalidParameters(format!(
                "blur_kernel_size must be odd, got {}",
                self.blur_kernel_size
            )));
        }
        if self.clahe_tiles == 0 {
            return Err(DetectionError::InvalidParameters(
                "clahe_tiles must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Convert, denoise and equalise `image` into a single-channel buffer of the
/// same size. Fails without side effects on empty or truncated input.
pub fn preprocess(
    image: &PixelBuffer<'_>,
    options: &PreprocessOptions,
) -> Result<GrayImageU8, DetectionError> {
    image.ensure_loaded()?;
    options.validate()?;

    let gray = to_grayscale(image);
    let kernel = GaussianKernel::new(options.blur_kernel_size, options.blur_sigma)?;
    let blurred = gaussian_blur(&gray, &kernel, BorderMode::Reflect101);
    let enhanced = clahe(
        &blurred,
        ClaheParams {
            clip_limit: options.clahe_clip_limit,
            tiles_x: options.clahe_tiles,
            tiles_y: options.clahe_tiles,
        },
    );
    debug!(
        "preprocess w={} h={} channels={}",
        enhanced.w,
        enhanced.h,
        image.channels()
    );
    Ok(enhanced)
}

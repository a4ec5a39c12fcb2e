use crate::error::DetectionError;
use crate::image::{GrayImageU8, ImageView, ImageViewMut};
use crate::preprocess::filters::{convolve_separable, to_u8_saturating, BorderMode, GaussianKernel};

pub const FOREGROUND: u8 = 255;

/// Inverted local threshold against a Gaussian-weighted block mean.
///
/// A pixel becomes foreground when it is at least `floor(offset)` darker than
/// its `block_size × block_size` neighbourhood mean. `block_size` must be odd.
pub fn adaptive_threshold_inv(
    src: &GrayImageU8,
    block_size: usize,
    offset: f32,
) -> Result<GrayImageU8, DetectionError> {
    let kernel = GaussianKernel::new(block_size, 0.0)?;
    let mean = to_u8_saturating(&convolve_separable(src, &kernel, BorderMode::Replicate));
    let delta = offset.floor() as i32;

    let mut out = GrayImageU8::new(src.w, src.h);
    for y in 0..src.h {
        let s = src.row(y);
        let m = mean.row(y);
        let dst = out.row_mut(y);
        for x in 0..src.w {
            if s[x] as i32 - m[x] as i32 <= -delta {
                dst[x] = FOREGROUND;
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_image_has_no_foreground() {
        let img = GrayImageU8::filled(40, 30, 117);
        let mask = adaptive_threshold_inv(&img, 15, 2.0).unwrap();
        assert_eq!(mask.count_nonzero(), 0);
        assert!(adaptive_threshold_inv(&img, 14, 2.0).is_err());
    }

    #[test]
    fn dark_spot_becomes_foreground() {
        let mut img = GrayImageU8::filled(40, 40, 200);
        for y in 18..22 {
            for x in 18..22 {
                img.set(x, y, 40);
            }
        }
        let mask = adaptive_threshold_inv(&img, 15, 2.0).unwrap();
        assert_eq!(mask.get(20, 20), FOREGROUND);
        assert_eq!(mask.get(2, 2), 0);
        // Bright pixels next to the spot sit above their local mean.
        assert_eq!(mask.get(16, 20), 0);
    }
}

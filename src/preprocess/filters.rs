//! Separable convolution with explicit border handling.
use crate::error::DetectionError;
use crate::image::{GrayImageU8, ImageF32, ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters. Taps are applied identically
/// along rows and columns.
pub trait SeparableFilter {
    fn taps(&self) -> &[f32];

    fn radius(&self) -> usize {
        self.taps().len() / 2
    }
}

/// How out-of-image samples are synthesised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderMode {
    /// `gfedcb|abcdefgh|gfedcba`
    Reflect101,
    /// `aaaaaa|abcdefgh|hhhhhhh`
    Replicate,
}

impl BorderMode {
    #[inline]
    pub fn resolve(self, i: isize, n: usize) -> usize {
        let n = n as isize;
        match self {
            BorderMode::Replicate => i.clamp(0, n - 1) as usize,
            BorderMode::Reflect101 => {
                if n == 1 {
                    return 0;
                }
                let mut i = i;
                loop {
                    if i < 0 {
                        i = -i;
                    } else if i >= n {
                        i = 2 * (n - 1) - i;
                    } else {
                        return i as usize;
                    }
                }
            }
        }
    }
}

/// Normalised sampled Gaussian.
#[derive(Clone, Debug)]
pub struct GaussianKernel {
    taps: Vec<f32>,
}

impl GaussianKernel {
    /// `size` must be odd. A non-positive `sigma` is derived from the size the
    /// way the common vision libraries do it.
    pub fn new(size: usize, sigma: f32) -> Result<Self, DetectionError> {
        if size % 2 == 0 {
            return Err(DetectionError::InvalidParameters(format!(
                "gaussian kernel size must be odd, got {size}"
            )));
        }
        let sigma = if sigma > 0.0 {
            sigma as f64
        } else {
            Self::sigma_for_size(size) as f64
        };
        let center = (size / 2) as f64;
        let scale = -0.5 / (sigma * sigma);
        let raw: Vec<f64> = (0..size)
            .map(|i| {
                let d = i as f64 - center;
                (scale * d * d).exp()
            })
            .collect();
        let sum: f64 = raw.iter().sum();
        Ok(Self {
            taps: raw.into_iter().map(|v| (v / sum) as f32).collect(),
        })
    }

    pub fn sigma_for_size(size: usize) -> f32 {
        0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
    }
}

impl SeparableFilter for GaussianKernel {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// Convolve an 8-bit image with `filter` along both axes, keeping f32 output.
pub fn convolve_separable<I, F>(src: &I, filter: &F, border: BorderMode) -> ImageF32
where
    I: ImageView<Pixel = u8>,
    F: SeparableFilter + ?Sized,
{
    let (w, h) = (src.width(), src.height());
    let taps = filter.taps();
    let radius = filter.radius() as isize;
    let mut horiz = ImageF32::new(w, h);
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    for y in 0..h {
        let src_row = src.row(y);
        let dst = horiz.row_mut(y);
        for (x, px) in dst.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, &tap) in taps.iter().enumerate() {
                let sx = border.resolve(x as isize + k as isize - radius, w);
                acc += tap * src_row[sx] as f32;
            }
            *px = acc;
        }
    }

    for y in 0..h {
        let rows: Vec<&[f32]> = (0..taps.len())
            .map(|k| horiz.row(border.resolve(y as isize + k as isize - radius, h)))
            .collect();
        let dst = out.row_mut(y);
        for (x, px) in dst.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (row, &tap) in rows.iter().zip(taps) {
                acc += tap * row[x];
            }
            *px = acc;
        }
    }
    out
}

/// Round and saturate an f32 image back to 8 bits.
pub fn to_u8_saturating(src: &ImageF32) -> GrayImageU8 {
    let mut out = GrayImageU8::new(src.w, src.h);
    for (d, &s) in out.data.iter_mut().zip(&src.data) {
        *d = s.round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Gaussian blur of an 8-bit image.
pub fn gaussian_blur<I>(src: &I, kernel: &GaussianKernel, border: BorderMode) -> GrayImageU8
where
    I: ImageView<Pixel = u8>,
{
    to_u8_saturating(&convolve_separable(src, kernel, border))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflect101_mirrors_without_repeating_edge() {
        let b = BorderMode::Reflect101;
        assert_eq!(b.resolve(-1, 5), 1);
        assert_eq!(b.resolve(-2, 5), 2);
        assert_eq!(b.resolve(5, 5), 3);
        assert_eq!(b.resolve(6, 5), 2);
        assert_eq!(b.resolve(-7, 3), 1);
        assert_eq!(b.resolve(4, 1), 0);
    }

    #[test]
    fn replicate_clamps() {
        let b = BorderMode::Replicate;
        assert_eq!(b.resolve(-3, 5), 0);
        assert_eq!(b.resolve(9, 5), 4);
    }

    #[test]
    fn gaussian_taps_are_normalised_and_symmetric() {
        let k = GaussianKernel::new(9, 2.0).unwrap();
        let taps = k.taps();
        assert_eq!(taps.len(), 9);
        let sum: f32 = taps.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        for i in 0..4 {
            assert!((taps[i] - taps[8 - i]).abs() < 1e-7);
        }
        assert!(taps[4] > taps[3]);
    }

    #[test]
    fn even_kernel_size_is_an_error() {
        assert!(matches!(
            GaussianKernel::new(4, 1.0),
            Err(DetectionError::InvalidParameters(_))
        ));
        assert!(GaussianKernel::new(0, 0.0).is_err());
    }

    #[test]
    fn derived_sigma_matches_block_size_rule() {
        assert!((GaussianKernel::sigma_for_size(15) - 2.6).abs() < 1e-5);
    }

    #[test]
    fn blur_keeps_uniform_image_uniform() {
        let img = GrayImageU8::filled(20, 13, 128);
        let blurred = gaussian_blur(&img, &GaussianKernel::new(9, 2.0).unwrap(), BorderMode::Reflect101);
        assert!(blurred.data.iter().all(|&v| v == 128));
    }

    #[test]
    fn blur_softens_a_step() {
        let mut img = GrayImageU8::new(16, 4);
        for y in 0..4 {
            for x in 8..16 {
                img.set(x, y, 200);
            }
        }
        let blurred = gaussian_blur(&img, &GaussianKernel::new(5, 1.0).unwrap(), BorderMode::Reflect101);
        let left = blurred.get(7, 1);
        let right = blurred.get(8, 1);
        assert!(left > 0 && left < 200, "left of step = {left}");
        assert!(right > left && right < 200, "right of step = {right}");
    }
}

use super::traits::{ImageView, ImageViewMut};

/// Borrowed 8-bit single-channel view.
#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Tightly packed view over `data`.
    pub fn new(w: usize, h: usize, data: &'a [u8]) -> Self {
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }

    /// Whether `data` covers every addressed row.
    pub fn is_well_formed(&self) -> bool {
        if self.w == 0 || self.h == 0 || self.stride < self.w {
            return false;
        }
        self.data.len() >= self.stride * (self.h - 1) + self.w
    }

    /// Copy into an owned, tightly packed buffer.
    pub fn to_owned_gray(&self) -> GrayImageU8 {
        let mut out = GrayImageU8::new(self.w, self.h);
        for y in 0..self.h {
            out.row_mut(y).copy_from_slice(self.row(y));
        }
        out
    }
}

impl<'a> ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

/// Owned 8-bit single-channel image, row-major with `stride == width`.
///
/// Produced by the preprocessor and by the binary mask stages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImageU8 {
    pub w: usize,
    pub h: usize,
    pub data: Vec<u8>,
}

impl GrayImageU8 {
    /// Zero-filled `w × h` image.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, 0)
    }

    pub fn filled(w: usize, h: usize, value: u8) -> Self {
        Self {
            w,
            h,
            data: vec![value; w * h],
        }
    }

    /// Number of non-zero pixels.
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}

impl ImageView for GrayImageU8 {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}

impl ImageViewMut for GrayImageU8 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.w;
        &mut self.data[start..start + self.w]
    }
}

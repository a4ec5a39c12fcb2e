/// Borrowed interleaved RGB8 view (`R, G, B` byte order).
#[derive(Clone, Copy, Debug)]
pub struct ImageRgb8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows, >= 3 * w
    pub data: &'a [u8],
}

impl<'a> ImageRgb8<'a> {
    /// Tightly packed view over `data`.
    pub fn new(w: usize, h: usize, data: &'a [u8]) -> Self {
        Self {
            w,
            h,
            stride: w * 3,
            data,
        }
    }

    #[inline]
    pub fn row_bytes(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w * 3]
    }

    pub fn is_well_formed(&self) -> bool {
        if self.w == 0 || self.h == 0 || self.stride < self.w * 3 {
            return false;
        }
        self.data.len() >= self.stride * (self.h - 1) + self.w * 3
    }
}

use super::rgb::ImageRgb8;
use super::u8::ImageU8;
use crate::error::DetectionError;

/// Decoded input image as handed to the detection service.
#[derive(Clone, Copy, Debug)]
pub enum PixelBuffer<'a> {
    Gray(ImageU8<'a>),
    Rgb(ImageRgb8<'a>),
}

impl<'a> PixelBuffer<'a> {
    pub fn width(&self) -> usize {
        match self {
            PixelBuffer::Gray(img) => img.w,
            PixelBuffer::Rgb(img) => img.w,
        }
    }

    pub fn height(&self) -> usize {
        match self {
            PixelBuffer::Gray(img) => img.h,
            PixelBuffer::Rgb(img) => img.h,
        }
    }

    pub fn channels(&self) -> usize {
        match self {
            PixelBuffer::Gray(_) => 1,
            PixelBuffer::Rgb(_) => 3,
        }
    }

    /// Reject empty, zero-sized or truncated buffers.
    pub fn ensure_loaded(&self) -> Result<(), DetectionError> {
        let (w, h) = (self.width(), self.height());
        if w == 0 || h == 0 {
            return Err(DetectionError::ImageLoad(format!(
                "image has zero extent ({w}x{h})"
            )));
        }
        let ok = match self {
            PixelBuffer::Gray(img) => img.is_well_formed(),
            PixelBuffer::Rgb(img) => img.is_well_formed(),
        };
        if !ok {
            return Err(DetectionError::ImageLoad(format!(
                "pixel data too short for {w}x{h}x{}",
                self.channels()
            )));
        }
        Ok(())
    }
}

impl<'a> From<ImageU8<'a>> for PixelBuffer<'a> {
    fn from(img: ImageU8<'a>) -> Self {
        PixelBuffer::Gray(img)
    }
}

impl<'a> From<ImageRgb8<'a>> for PixelBuffer<'a> {
    fn from(img: ImageRgb8<'a>) -> Self {
        PixelBuffer::Rgb(img)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_extent_is_a_load_error() {
        let data: Vec<u8> = Vec::new();
        let buf = PixelBuffer::from(ImageU8::new(0, 10, &data));
        assert!(matches!(
            buf.ensure_loaded(),
            Err(DetectionError::ImageLoad(_))
        ));
    }

    #[test]
    fn truncated_rgb_is_a_load_error() {
        let data = vec![0u8; 10 * 10 * 3 - 1];
        let buf = PixelBuffer::from(ImageRgb8::new(10, 10, &data));
        assert!(buf.ensure_loaded().is_err());
    }

    #[test]
    fn strided_gray_view_is_accepted() {
        let data = vec![0u8; 16 * 3 + 10];
        let view = ImageU8 {
            w: 10,
            h: 4,
            stride: 16,
            data: &data,
        };
        assert!(PixelBuffer::from(view).ensure_loaded().is_ok());
    }
}

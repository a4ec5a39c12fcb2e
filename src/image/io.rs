//! Decoding and dump helpers used by the binaries and by integrators.
//!
//! - `load_image`: read a PNG/JPEG/etc. into an owned RGB8 buffer.
//! - `save_gray_png`: write an owned 8-bit gray buffer to a PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::buffer::PixelBuffer;
use super::rgb::ImageRgb8;
use super::u8::GrayImageU8;
use crate::error::DetectionError;
use image::{GrayImage, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned RGB8 image decoded from disk.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl DecodedImage {
    pub fn from_rgb(img: RgbImage) -> Self {
        let width = img.width() as usize;
        let height = img.height() as usize;
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as the buffer type accepted by the detector.
    pub fn as_buffer(&self) -> PixelBuffer<'_> {
        PixelBuffer::Rgb(ImageRgb8::new(self.width, self.height, &self.data))
    }
}

/// Decode an image file into RGB8, reporting malformed input as `ImageLoad`.
pub fn load_image(path: &Path) -> Result<DecodedImage, DetectionError> {
    let img = image::open(path)
        .map_err(|e| DetectionError::ImageLoad(format!("{}: {e}", path.display())))?
        .into_rgb8();
    if img.width() == 0 || img.height() == 0 {
        return Err(DetectionError::ImageLoad(format!(
            "{}: decoded image is empty",
            path.display()
        )));
    }
    Ok(DecodedImage::from_rgb(img))
}

/// Save an 8-bit grayscale buffer to a PNG.
pub fn save_gray_png(buffer: &GrayImageU8, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let image = GrayImage::from_raw(buffer.w as u32, buffer.h as u32, buffer.data.clone())
        .ok_or_else(|| "Failed to create image buffer".to_string())?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

use crate::image::{GrayImageU8, ImageView, ImageViewMut, PixelBuffer};

// BT.601 luma weights in Q14 fixed point: 0.299, 0.587, 0.114.
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const Q14_SHIFT: u32 = 14;
const Q14_HALF: u32 = 1 << (Q14_SHIFT - 1);

#[inline]
pub fn luma(rgb: [u8; 3]) -> u8 {
    let acc = rgb[0] as u32 * R_WEIGHT + rgb[1] as u32 * G_WEIGHT + rgb[2] as u32 * B_WEIGHT;
    ((acc + Q14_HALF) >> Q14_SHIFT).min(255) as u8
}

/// Collapse the input to one intensity channel. Gray input is copied through.
///
/// The caller has already checked that the buffer is well formed.
pub fn to_grayscale(image: &PixelBuffer<'_>) -> GrayImageU8 {
    match image {
        PixelBuffer::Gray(view) => view.to_owned_gray(),
        PixelBuffer::Rgb(view) => {
            let mut out = GrayImageU8::new(view.w, view.h);
            for y in 0..view.h {
                let src = view.row_bytes(y);
                let dst = out.row_mut(y);
                for (d, px) in dst.iter_mut().zip(src.chunks_exact(3)) {
                    *d = luma([px[0], px[1], px[2]]);
                }
            }
            debug_assert_eq!(out.width(), view.w);
            out
        }
    }
}

//! Binary erosion/dilation with a 3×3 square element. Samples outside the
//! image never change the result.
use crate::image::{GrayImageU8, ImageView};

fn filter3x3(src: &GrayImageU8, take_max: bool) -> GrayImageU8 {
    let (w, h) = (src.w, src.h);
    let mut out = GrayImageU8::new(w, h);
    for y in 0..h {
        let y0 = y.saturating_sub(1);
        let y1 = (y + 1).min(h - 1);
        for x in 0..w {
            let x0 = x.saturating_sub(1);
            let x1 = (x + 1).min(w - 1);
            let mut acc = if take_max { 0u8 } else { 255u8 };
            for yy in y0..=y1 {
                let row = src.row(yy);
                for &v in &row[x0..=x1] {
                    acc = if take_max { acc.max(v) } else { acc.min(v) };
                }
            }
            out.data[y * w + x] = acc;
        }
    }
    out
}

pub fn erode(src: &GrayImageU8) -> GrayImageU8 {
    filter3x3(src, false)
}

pub fn dilate(src: &GrayImageU8) -> GrayImageU8 {
    filter3x3(src, true)
}

/// Opening: `iterations` erosions followed by as many dilations.
pub fn open(src: &GrayImageU8, iterations: usize) -> GrayImageU8 {
    if src.w == 0 || src.h == 0 {
        return src.clone();
    }
    let mut cur = src.clone();
    for _ in 0..iterations {
        cur = erode(&cur);
    }
    for _ in 0..iterations {
        cur = dilate(&cur);
    }
    cur
}

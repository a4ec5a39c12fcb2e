//! Contrast-limited adaptive histogram equalisation.
//!
//! The image is split into a `tiles_x × tiles_y` grid. Each tile gets a
//! clipped, redistributed histogram and a cumulative lookup table; every
//! output pixel blends the LUTs of its four nearest tile centres bilinearly.
//! Sizes that are not a multiple of the grid are handled by sampling tiles
//! over a reflect-101 extension of the image.
use super::filters::BorderMode;
use crate::image::{GrayImageU8, ImageView, ImageViewMut};

const BINS: usize = 256;

type Lut = [u8; BINS];

#[derive(Clone, Copy, Debug)]
pub struct ClaheParams {
    pub clip_limit: f32,
    pub tiles_x: usize,
    pub tiles_y: usize,
}

impl Default for ClaheParams {
    fn default() -> Self {
        Self {
            clip_limit: 2.0,
            tiles_x: 8,
            tiles_y: 8,
        }
    }
}

fn clip_histogram(hist: &mut [u32; BINS], limit: u32) {
    let mut clipped = 0u32;
    for bin in hist.iter_mut() {
        if *bin > limit {
            clipped += *bin - limit;
            *bin = limit;
        }
    }

    let batch = clipped / BINS as u32;
    let mut residual = clipped - batch * BINS as u32;
    for bin in hist.iter_mut() {
        *bin += batch;
    }
    if residual > 0 {
        let step = (BINS / residual as usize).max(1);
        let mut i = 0;
        while i < BINS && residual > 0 {
            hist[i] += 1;
            residual -= 1;
            i += step;
        }
    }
}

fn tile_lut(src: &GrayImageU8, x0: usize, y0: usize, tw: usize, th: usize, limit: Option<u32>) -> Lut {
    let border = BorderMode::Reflect101;
    let mut hist = [0u32; BINS];
    for ty in y0..y0 + th {
        let row = src.row(border.resolve(ty as isize, src.h));
        for tx in x0..x0 + tw {
            hist[row[border.resolve(tx as isize, src.w)] as usize] += 1;
        }
    }
    if let Some(limit) = limit {
        clip_histogram(&mut hist, limit);
    }

    let scale = 255.0 / (tw * th) as f32;
    let mut lut = [0u8; BINS];
    let mut sum = 0u32;
    for (entry, &count) in lut.iter_mut().zip(hist.iter()) {
        sum += count;
        *entry = (sum as f32 * scale).round().clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Equalise `src` tile by tile. A non-positive clip limit disables clipping.
pub fn clahe(src: &GrayImageU8, params: ClaheParams) -> GrayImageU8 {
    let (w, h) = (src.w, src.h);
    let tiles_x = params.tiles_x.max(1);
    let tiles_y = params.tiles_y.max(1);
    let mut out = GrayImageU8::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    let tw = w.div_ceil(tiles_x);
    let th = h.div_ceil(tiles_y);
    let tile_area = (tw * th) as f32;
    let limit = (params.clip_limit > 0.0)
        .then(|| ((params.clip_limit * tile_area / BINS as f32) as u32).max(1));

    let mut luts = Vec::with_capacity(tiles_x * tiles_y);
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            luts.push(tile_lut(src, tx * tw, ty * th, tw, th, limit));
        }
    }

    let inv_tw = 1.0 / tw as f32;
    let inv_th = 1.0 / th as f32;
    for y in 0..h {
        let tyf = y as f32 * inv_th - 0.5;
        let ty1 = tyf.floor();
        let ya = tyf - ty1;
        let ty2 = ((ty1 as isize + 1).min(tiles_y as isize - 1)) as usize;
        let ty1 = (ty1 as isize).max(0) as usize;

        let src_row = src.row(y);
        let dst_row = out.row_mut(y);
        for x in 0..w {
            let txf = x as f32 * inv_tw - 0.5;
            let tx1 = txf.floor();
            let xa = txf - tx1;
            let tx2 = ((tx1 as isize + 1).min(tiles_x as isize - 1)) as usize;
            let tx1 = (tx1 as isize).max(0) as usize;

            let v = src_row[x] as usize;
            let top = luts[ty1 * tiles_x + tx1][v] as f32 * (1.0 - xa)
                + luts[ty1 * tiles_x + tx2][v] as f32 * xa;
            let bottom = luts[ty2 * tiles_x + tx1][v] as f32 * (1.0 - xa)
                + luts[ty2 * tiles_x + tx2][v] as f32 * xa;
            let res = top * (1.0 - ya) + bottom * ya;
            dst_row[x] = res.round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

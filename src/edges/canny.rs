//! Canny edge map: Sobel gradients, direction-aligned non-maximum
//! suppression and hysteresis over 8-connected neighbours.
//!
//! Border handling uses clamping in gradient computation and ignores the
//! outermost 1-pixel frame in NMS so neighbour lookups stay in bounds.
use super::grad::{sobel_gradients, Grad};
use crate::image::{GrayImageU8, ImageView};

const TAN_22_5_DEG: f32 = 0.41421356237;

/// Binary edge map (0/255) together with the gradients it was derived from.
pub struct EdgeMap {
    pub edges: GrayImageU8,
    pub grad: Grad,
}

impl EdgeMap {
    /// Coordinates of every edge pixel in raster order.
    pub fn points(&self) -> Vec<(u32, u32)> {
        let w = self.edges.w;
        self.edges
            .data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0)
            .map(|(i, _)| ((i % w) as u32, (i / w) as u32))
            .collect()
    }
}

/// Local maxima of the gradient magnitude along the gradient direction.
///
/// Returns per-pixel magnitude where kept, zero elsewhere. A pixel must be
/// strictly greater than its "previous" neighbour and not smaller than the
/// "next" one, so plateaus keep exactly one side.
fn suppress_non_maxima(grad: &Grad, low: f32) -> Vec<f32> {
    let w = grad.gx.w;
    let h = grad.gx.h;
    let mut kept = vec![0.0f32; w * h];
    if w < 3 || h < 3 {
        return kept;
    }

    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag <= low {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0 && gy >= 0.0) || (gx <= 0.0 && gy <= 0.0);

            let (before, after) = if abs_gy <= abs_gx * TAN_22_5_DEG {
                (mag_row[x - 1], mag_row[x + 1])
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (mag_prev[x], mag_next[x])
            } else if same_sign {
                (mag_prev[x - 1], mag_next[x + 1])
            } else {
                (mag_prev[x + 1], mag_next[x - 1])
            };

            if mag > before && mag >= after {
                kept[y * w + x] = mag;
            }
        }
    }
    kept
}

/// Canny edge detection with L1 gradient magnitude.
///
/// Pixels above `high` seed edges; pixels above `low` join an edge when they
/// are 8-connected to a seed.
pub fn canny<I: ImageView<Pixel = u8>>(src: &I, low: f32, high: f32) -> EdgeMap {
    let grad = sobel_gradients(src);
    let w = grad.gx.w;
    let h = grad.gx.h;
    let kept = suppress_non_maxima(&grad, low);

    let mut edges = GrayImageU8::new(w, h);
    let mut stack: Vec<usize> = kept
        .iter()
        .enumerate()
        .filter(|(_, &m)| m > high)
        .map(|(i, _)| i)
        .collect();
    for &i in &stack {
        edges.data[i] = 255;
    }

    while let Some(i) = stack.pop() {
        let x = (i % w) as isize;
        let y = (i / w) as isize;
        for dy in -1isize..=1 {
            for dx in -1isize..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x + dx;
                let ny = y + dy;
                if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                    continue;
                }
                let j = ny as usize * w + nx as usize;
                if edges.data[j] == 0 && kept[j] > 0.0 {
                    edges.data[j] = 255;
                    stack.push(j);
                }
            }
        }
    }

    EdgeMap { edges, grad }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageViewMut;

    fn square_image(size: usize, lo: u8, hi: u8) -> GrayImageU8 {
        let mut img = GrayImageU8::filled(size, size, lo);
        for y in size / 4..3 * size / 4 {
            for x in size / 4..3 * size / 4 {
                img.set(x, y, hi);
            }
        }
        img
    }

    #[test]
    fn flat_image_has_no_edges() {
        let img = GrayImageU8::filled(32, 32, 90);
        let map = canny(&img, 25.0, 50.0);
        assert!(map.points().is_empty());
    }

    #[test]
    fn square_outline_is_thin() {
        let img = square_image(40, 20, 220);
        let map = canny(&img, 25.0, 50.0);
        let points = map.points();
        assert!(!points.is_empty());
        // Every edge row crossing the square should hold a thin edge, not a band.
        let row: Vec<_> = points.iter().filter(|p| p.1 == 20).collect();
        assert!(
            row.len() <= 4,
            "expected thin edges on row 20, got {}",
            row.len()
        );
    }

    #[test]
    fn weak_contrast_below_low_threshold_is_dropped() {
        let img = square_image(40, 100, 104);
        let map = canny(&img, 25.0, 50.0);
        assert!(map.points().is_empty());
    }
}

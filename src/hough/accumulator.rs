//! Centre accumulator for the gradient Hough transform.
//!
//! Every edge pixel votes along its gradient line, in both directions, once
//! per integer radius in `[min_r, max_r]`. Cells are `dp` pixels wide.
use crate::edges::EdgeMap;
use crate::image::ImageView;

/// Accumulator cell that beat its neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Peak {
    pub ax: usize,
    pub ay: usize,
    pub votes: u32,
}

#[derive(Clone, Debug)]
pub struct Accumulator {
    pub cols: usize,
    pub rows: usize,
    dp: f32,
    votes: Vec<u32>,
}

impl Accumulator {
    /// Accumulator covering a `w × h` image at inverse resolution `dp`.
    pub fn new(w: usize, h: usize, dp: f32) -> Self {
        let cols = ((w as f32 / dp).ceil() as usize).max(1);
        let rows = ((h as f32 / dp).ceil() as usize).max(1);
        Self {
            cols,
            rows,
            dp,
            votes: vec![0; cols * rows],
        }
    }

    #[inline]
    pub fn get(&self, ax: usize, ay: usize) -> u32 {
        self.votes[ay * self.cols + ax]
    }

    /// Cast votes from every edge pixel with a non-zero gradient.
    pub fn vote(&mut self, map: &EdgeMap, min_r: u32, max_r: u32) {
        let inv_dp = 1.0 / self.dp;
        let (cols, rows) = (self.cols as f32, self.rows as f32);
        let w = map.edges.w;
        for (i, _) in map.edges.data.iter().enumerate().filter(|(_, &v)| v != 0) {
            let (x, y) = (i % w, i / w);
            let gx = map.grad.gx.get(x, y);
            let gy = map.grad.gy.get(x, y);
            let norm = (gx * gx + gy * gy).sqrt();
            if norm <= f32::EPSILON {
                continue;
            }
            let base_x = (x as f32 + 0.5) * inv_dp;
            let base_y = (y as f32 + 0.5) * inv_dp;
            for sign in [1.0f32, -1.0] {
                let sx = sign * gx / norm * inv_dp;
                let sy = sign * gy / norm * inv_dp;
                for r in min_r..=max_r {
                    let ax = base_x + sx * r as f32;
                    let ay = base_y + sy * r as f32;
                    if ax < 0.0 || ay < 0.0 || ax >= cols || ay >= rows {
                        break;
                    }
                    self.votes[ay as usize * self.cols + ax as usize] += 1;
                }
            }
        }
    }

    /// Cells above `threshold` that are strictly greater than their left and
    /// upper neighbours and not smaller than the right and lower ones.
    /// Sorted by votes, descending; equal votes keep raster order.
    pub fn peaks(&self, threshold: u32) -> Vec<Peak> {
        let at = |ax: isize, ay: isize| -> u32 {
            if ax < 0 || ay < 0 || ax >= self.cols as isize || ay >= self.rows as isize {
                0
            } else {
                self.votes[ay as usize * self.cols + ax as usize]
            }
        };

        let mut peaks = Vec::new();
        for ay in 0..self.rows {
            for ax in 0..self.cols {
                let v = self.votes[ay * self.cols + ax];
                if v <= threshold {
                    continue;
                }
                let (x, y) = (ax as isize, ay as isize);
                if v > at(x - 1, y) && v >= at(x + 1, y) && v > at(x, y - 1) && v >= at(x, y + 1) {
                    peaks.push(Peak { ax, ay, votes: v });
                }
            }
        }
        peaks.sort_by(|a, b| b.votes.cmp(&a.votes));
        peaks
    }

    /// Pixel coordinates of a cell centre.
    #[inline]
    pub fn cell_center(&self, peak: &Peak) -> (f32, f32) {
        (
            (peak.ax as f32 + 0.5) * self.dp - 0.5,
            (peak.ay as f32 + 0.5) * self.dp - 0.5,
        )
    }
}

//! Outer boundaries of 8-connected foreground regions.
//!
//! Holes are filled before tracing, so a region nested inside another
//! region's hole is never reported. Each boundary is traced with
//! Moore-neighbour tracing, clockwise on screen, starting from the region's
//! first pixel in raster order.
use crate::image::GrayImageU8;

/// Clockwise neighbour offsets (y grows downward), starting west.
const DIRS: [(i32, i32); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

/// Closed boundary polygon through pixel centres.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<(i32, i32)>,
}

impl Contour {
    /// Enclosed polygon area (shoelace), zero for points and lines.
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice = 0i64;
        for i in 0..n {
            let (x0, y0) = self.points[i];
            let (x1, y1) = self.points[(i + 1) % n];
            twice += x0 as i64 * y1 as i64 - x1 as i64 * y0 as i64;
        }
        twice.abs() as f64 * 0.5
    }
}

struct Mask<'a> {
    w: i32,
    h: i32,
    data: &'a [bool],
}

impl Mask<'_> {
    #[inline]
    fn at(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.w && y < self.h && self.data[(y * self.w + x) as usize]
    }
}

/// Foreground plus every background pixel not 4-connected to the border.
fn fill_holes(mask: &GrayImageU8) -> Vec<bool> {
    let (w, h) = (mask.w, mask.h);
    let mut solid: Vec<bool> = mask.data.iter().map(|&v| v != 0).collect();
    let mut outside = vec![false; w * h];
    let mut stack = Vec::new();
    for y in 0..h {
        for x in 0..w {
            let on_border = x == 0 || y == 0 || x + 1 == w || y + 1 == h;
            let i = y * w + x;
            if on_border && !solid[i] && !outside[i] {
                outside[i] = true;
                stack.push(i);
            }
        }
    }
    while let Some(i) = stack.pop() {
        let (x, y) = (i % w, i / w);
        let mut visit = |j: usize| {
            if !solid[j] && !outside[j] {
                outside[j] = true;
                stack.push(j);
            }
        };
        if x > 0 {
            visit(i - 1);
        }
        if x + 1 < w {
            visit(i + 1);
        }
        if y > 0 {
            visit(i - w);
        }
        if y + 1 < h {
            visit(i + w);
        }
    }
    for (s, &o) in solid.iter_mut().zip(&outside) {
        if !o {
            *s = true;
        }
    }
    solid
}

fn dir_index(dx: i32, dy: i32) -> usize {
    DIRS.iter()
        .position(|&d| d == (dx, dy))
        .unwrap_or(0)
}

fn trace_boundary(mask: &Mask<'_>, start: (i32, i32)) -> Contour {
    let mut points = vec![start];
    let mut cur = start;
    // West of the raster-first pixel is always background.
    let mut back = 0usize;
    let mut second: Option<(i32, i32)> = None;

    loop {
        let next = (1..=8).map(|k| (back + k) % 8).find_map(|d| {
            let n = (cur.0 + DIRS[d].0, cur.1 + DIRS[d].1);
            mask.at(n.0, n.1).then_some((n, d))
        });
        let Some((n, d)) = next else {
            break;
        };
        if cur == start {
            match second {
                None => second = Some(n),
                Some(s) if s == n => break,
                Some(_) => {}
            }
        }
        let b = (cur.0 + DIRS[(d + 7) % 8].0, cur.1 + DIRS[(d + 7) % 8].1);
        back = dir_index(b.0 - n.0, b.1 - n.1);
        cur = n;
        points.push(cur);
    }

    if points.len() > 1 && points.last() == Some(&start) {
        points.pop();
    }
    Contour { points }
}

fn mark_region(solid: &[bool], visited: &mut [bool], w: usize, h: usize, seed: usize) {
    let mut stack = vec![seed];
    visited[seed] = true;
    while let Some(i) = stack.pop() {
        let (x, y) = ((i % w) as isize, (i / w) as isize);
        for (dx, dy) in DIRS {
            let nx = x + dx as isize;
            let ny = y + dy as isize;
            if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                continue;
            }
            let j = ny as usize * w + nx as usize;
            if solid[j] && !visited[j] {
                visited[j] = true;
                stack.push(j);
            }
        }
    }
}

/// Trace the outer contour of every foreground region in raster order.
pub fn find_external_contours(mask: &GrayImageU8) -> Vec<Contour> {
    let (w, h) = (mask.w, mask.h);
    if w == 0 || h == 0 {
        return Vec::new();
    }
    let solid = fill_holes(mask);
    let view = Mask {
        w: w as i32,
        h: h as i32,
        data: &solid,
    };
    let mut visited = vec![false; w * h];
    let mut contours = Vec::new();
    for i in 0..w * h {
        if solid[i] && !visited[i] {
            contours.push(trace_boundary(&view, ((i % w) as i32, (i / w) as i32)));
            mark_region(&solid, &mut visited, w, h, i);
        }
    }
    contours
}

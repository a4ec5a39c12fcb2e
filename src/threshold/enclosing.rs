//! Minimum enclosing circle of a point set.
use nalgebra::{Matrix2, Vector2};

const EPS: f64 = 1e-7;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vector2<f64>,
    pub radius: f64,
}

impl Circle {
    fn from_two(a: Vector2<f64>, b: Vector2<f64>) -> Self {
        let center = (a + b) * 0.5;
        Self {
            center,
            radius: (a - center).norm(),
        }
    }

    /// Circumcircle; collinear triples fall back to the widest pair.
    fn from_three(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> Self {
        let ab = b - a;
        let ac = c - a;
        let m = Matrix2::new(ab.x, ab.y, ac.x, ac.y) * 2.0;
        let rhs = Vector2::new(ab.norm_squared(), ac.norm_squared());
        match m.try_inverse() {
            Some(inv) if m.determinant().abs() > EPS => {
                let rel = inv * rhs;
                Self {
                    center: a + rel,
                    radius: rel.norm(),
                }
            }
            _ => [
                Self::from_two(a, b),
                Self::from_two(a, c),
                Self::from_two(b, c),
            ]
            .into_iter()
            .fold(Self::from_two(a, a), |best, cand| {
                if cand.radius > best.radius {
                    cand
                } else {
                    best
                }
            }),
        }
    }

    #[inline]
    fn contains(&self, p: Vector2<f64>) -> bool {
        (p - self.center).norm() <= self.radius + EPS * self.radius.max(1.0)
    }
}

fn cross(o: (i32, i32), a: (i32, i32), b: (i32, i32)) -> i64 {
    (a.0 - o.0) as i64 * (b.1 - o.1) as i64 - (a.1 - o.1) as i64 * (b.0 - o.0) as i64
}

/// Andrew's monotone chain; collinear points are dropped.
pub fn convex_hull(points: &[(i32, i32)]) -> Vec<(i32, i32)> {
    let mut pts = points.to_vec();
    pts.sort_unstable();
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }
    let mut hull: Vec<(i32, i32)> = Vec::with_capacity(2 * pts.len());
    for &p in &pts {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }
    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0
        {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

/// Smallest circle containing every point, `None` for an empty set.
///
/// Runs incremental Welzl over the convex hull, which keeps the result
/// identical while visiting far fewer points.
pub fn min_enclosing_circle(points: &[(i32, i32)]) -> Option<Circle> {
    let hull: Vec<Vector2<f64>> = convex_hull(points)
        .into_iter()
        .map(|(x, y)| Vector2::new(x as f64, y as f64))
        .collect();
    let first = *hull.first()?;

    let mut circle = Circle {
        center: first,
        radius: 0.0,
    };
    for i in 1..hull.len() {
        if circle.contains(hull[i]) {
            continue;
        }
        circle = Circle {
            center: hull[i],
            radius: 0.0,
        };
        for j in 0..i {
            if circle.contains(hull[j]) {
                continue;
            }
            circle = Circle::from_two(hull[i], hull[j]);
            for k in 0..j {
                if !circle.contains(hull[k]) {
                    circle = Circle::from_three(hull[i], hull[j], hull[k]);
                }
            }
        }
    }
    Some(circle)
}

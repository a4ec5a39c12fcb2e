/// Best-supported radius around a fixed centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusEstimate {
    pub radius: f32,
    /// Edge pixels whose distance falls in the winning window.
    pub support: usize,
}

/// Estimate the radius of a circle centred at `(cx, cy)` from edge pixels.
///
/// Distances outside `[min_r, max_r]` are ignored. The remaining sorted
/// distances are scanned with a window of `bin_width` pixels; each window is
/// scored by `count / median_distance` so that a full small circle is not
/// outvoted by a sparse arc of a larger one. Returns `None` when no edge
/// pixel lies in range.
pub fn estimate_radius(
    cx: f32,
    cy: f32,
    points: &[(u32, u32)],
    min_r: f32,
    max_r: f32,
    bin_width: f32,
) -> Option<RadiusEstimate> {
    let mut dists: Vec<f32> = points
        .iter()
        .filter_map(|&(x, y)| {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let d = (dx * dx + dy * dy).sqrt();
            (d >= min_r && d <= max_r).then_some(d)
        })
        .collect();
    if dists.is_empty() {
        return None;
    }
    dists.sort_by(|a, b| a.total_cmp(b));

    let mut best: Option<(f32, RadiusEstimate)> = None;
    let mut end = 0;
    for start in 0..dists.len() {
        end = end.max(start + 1);
        while end < dists.len() && dists[end] - dists[start] <= bin_width {
            end += 1;
        }
        let count = end - start;
        let radius = dists[(start + end - 1) / 2];
        let score = count as f32 / radius;
        if best.map_or(true, |(s, _)| score > s) {
            best = Some((
                score,
                RadiusEstimate {
                    radius,
                    support: count,
                },
            ));
        }
    }
    best.map(|(_, est)| est)
}

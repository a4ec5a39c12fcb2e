/// Dark filled disk description: centre, radius, intensity.
#[derive(Clone, Copy, Debug)]
pub struct Disk {
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
    pub value: u8,
}

impl Disk {
    pub fn dark(cx: f32, cy: f32, r: f32) -> Self {
        Self {
            cx,
            cy,
            r,
            value: 40,
        }
    }
}

/// Generates a uniform background with the given disks painted in order.
pub fn disks_u8(width: usize, height: usize, background: u8, disks: &[Disk]) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut img = vec![background; width * height];
    for y in 0..height {
        for x in 0..width {
            for d in disks {
                let dx = x as f32 - d.cx;
                let dy = y as f32 - d.cy;
                if dx * dx + dy * dy <= d.r * d.r {
                    img[y * width + x] = d.value;
                }
            }
        }
    }
    img
}

/// Replicates a gray buffer into interleaved RGB8.
pub fn gray_to_rgb(gray: &[u8]) -> Vec<u8> {
    gray.iter().flat_map(|&v| [v, v, v]).collect()
}

pub fn uniform_u8(width: usize, height: usize, value: u8) -> Vec<u8> {
    vec![value; width * height]
}

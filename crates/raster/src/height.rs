//! Scalar height grid produced by compositing and consumed by meshing.

/// `width x height` grid of height values in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl HeightField {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; (width * height) as usize],
        }
    }

    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Option<Self> {
        if data.len() != (width * height) as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Height at `(x, y)`, `0.0` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> f32 {
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.data[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = value.clamp(0.0, 1.0);
        }
    }

    /// Bilinear sample at normalized `(u, v)`, clamped at the borders.
    pub fn sample_normalized(&self, u: f32, v: f32) -> f32 {
        if self.width == 0 || self.height == 0 {
            return 0.0;
        }
        let sx = (u.clamp(0.0, 1.0) * self.width as f32 - 0.5).clamp(0.0, self.width as f32 - 1.0);
        let sy =
            (v.clamp(0.0, 1.0) * self.height as f32 - 0.5).clamp(0.0, self.height as f32 - 1.0);
        let x0 = sx.floor() as u32;
        let y0 = sy.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let fx = sx - x0 as f32;
        let fy = sy - y0 as f32;
        let top = self.get(x0, y0) * (1.0 - fx) + self.get(x1, y0) * fx;
        let bottom = self.get(x0, y1) * (1.0 - fx) + self.get(x1, y1) * fx;
        top * (1.0 - fy) + bottom * fy
    }
}

//! The core single-channel raster type and its shape constructors.
//!
//! A [`RasterMask`] is a `width x height` grid of alpha values in `[0, 1]`.
//! Masks are immutable from a consumer's point of view: every operation
//! reads its inputs and returns a freshly allocated mask.

use glam::Vec2;
use image::DynamicImage;

use crate::error::{RasterError, Result};
use crate::height::HeightField;
use crate::resample::{BilinearResampler, Resampler};

/// Per-pixel binary blend operation for [`RasterMask::combine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendOp {
    Add,
    Subtract,
    Multiply,
    Min,
    /// The default policy: unspecified callers get a union-like blend.
    #[default]
    Max,
    Average,
    Difference,
}

impl BlendOp {
    fn apply(self, a: f32, b: f32) -> f32 {
        match self {
            BlendOp::Add => a + b,
            BlendOp::Subtract => a - b,
            BlendOp::Multiply => a * b,
            BlendOp::Min => a.min(b),
            BlendOp::Max => a.max(b),
            BlendOp::Average => (a + b) * 0.5,
            BlendOp::Difference => (a - b).abs(),
        }
    }
}

/// Single-channel raster of alpha weights in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterMask {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl RasterMask {
    /// An all-zero mask. Zero-area dimensions yield the empty mask.
    pub fn new(width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self::empty();
        }
        Self {
            width,
            height,
            data: vec![0.0; (width * height) as usize],
        }
    }

    /// The zero-dimension mask used as the degradation default.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }

    /// Builds a mask from raw alpha values; values are clamped to `[0, 1]`.
    /// A length mismatch degrades to the empty mask.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Self {
        if width == 0 || height == 0 || data.len() != (width * height) as usize {
            tracing::warn!(width, height, len = data.len(), "mask data mismatch");
            return Self::empty();
        }
        Self {
            width,
            height,
            data: data.into_iter().map(|a| a.clamp(0.0, 1.0)).collect(),
        }
    }

    /// Fully opaque mask.
    pub fn solid(width: u32, height: u32) -> Self {
        let mut mask = Self::new(width, height);
        mask.data.fill(1.0);
        mask
    }

    /// Circular mask inscribed in the image, radius `min(w, h) / 2`.
    /// `feather > 0` gives a linear alpha ramp of that pixel width inside
    /// the rim; `feather == 0` is a hard step.
    pub fn circular(width: u32, height: u32, feather: f32) -> Self {
        let mut mask = Self::new(width, height);
        if mask.is_empty() {
            return mask;
        }
        let cx = width as f32 * 0.5;
        let cy = height as f32 * 0.5;
        let radius = (width.min(height) as f32) * 0.5;
        for y in 0..height {
            for x in 0..width {
                let dx = (x as f32 + 0.5) - cx;
                let dy = (y as f32 + 0.5) - cy;
                let d = (dx * dx + dy * dy).sqrt();
                let alpha = if feather > 0.0 {
                    ((radius - d) / feather).clamp(0.0, 1.0)
                } else if d < radius {
                    1.0
                } else {
                    0.0
                };
                mask.put(x, y, alpha);
            }
        }
        mask
    }

    /// Axis-aligned rounded rectangle filling the image.
    pub fn rounded_rect(width: u32, height: u32, corner_radius: f32, feather: f32) -> Self {
        let mut mask = Self::new(width, height);
        if mask.is_empty() {
            return mask;
        }
        let half = Vec2::new(width as f32, height as f32) * 0.5;
        let radius = corner_radius.clamp(0.0, half.x.min(half.y));
        for y in 0..height {
            for x in 0..width {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - half;
                // Signed distance to the rounded-box boundary, negative inside.
                let q = p.abs() - (half - Vec2::splat(radius));
                let d = q.max(Vec2::ZERO).length() + q.x.max(q.y).min(0.0) - radius;
                let alpha = if feather > 0.0 {
                    (-d / feather).clamp(0.0, 1.0)
                } else if d < 0.0 {
                    1.0
                } else {
                    0.0
                };
                mask.put(x, y, alpha);
            }
        }
        mask
    }

    /// Filled polygon mask. Fewer than 3 points is a contract violation.
    pub fn polygon(points: &[Vec2], width: u32, height: u32, feather: f32) -> Result<Self> {
        if points.len() < 3 {
            return Err(RasterError::PolygonTooFewPoints(points.len()));
        }
        let mut mask = Self::new(width, height);
        if mask.is_empty() {
            return Ok(mask);
        }
        for y in 0..height {
            for x in 0..width {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if !point_in_polygon(p, points) {
                    continue;
                }
                let alpha = if feather > 0.0 {
                    (distance_to_edges(p, points) / feather).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                mask.put(x, y, alpha);
            }
        }
        Ok(mask)
    }

    /// Binary mask of every cell at or above `threshold` in a height field.
    pub fn from_height_threshold(heights: &HeightField, threshold: f32) -> Self {
        let mut mask = Self::new(heights.width(), heights.height());
        if mask.is_empty() {
            return mask;
        }
        for y in 0..mask.height {
            for x in 0..mask.width {
                if heights.get(x, y) >= threshold {
                    mask.put(x, y, 1.0);
                }
            }
        }
        mask
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Alpha at `(x, y)`, `0.0` outside the image.
    pub fn get(&self, x: u32, y: u32) -> f32 {
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.data[(y * self.width + x) as usize]
    }

    pub(crate) fn put(&mut self, x: u32, y: u32, alpha: f32) {
        debug_assert!(x < self.width && y < self.height);
        self.data[(y * self.width + x) as usize] = alpha.clamp(0.0, 1.0);
    }

    /// Bilinear sample at normalized `(u, v)` in `[0, 1]^2`, clamped at
    /// the borders. Empty masks sample as `0.0`.
    pub fn sample_normalized(&self, u: f32, v: f32) -> f32 {
        if self.is_empty() {
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

    /// Per-pixel blend of two masks. When dimensions differ the second
    /// operand is resampled to the first's size before the blend; an empty
    /// operand blends as all-zero alpha. The result is always clamped to
    /// `[0, 1]`.
    pub fn combine(&self, other: &RasterMask, op: BlendOp) -> RasterMask {
        if self.is_empty() {
            return RasterMask::empty();
        }
        let resampled;
        let other = if other.is_empty() {
            resampled = RasterMask::new(self.width, self.height);
            &resampled
        } else if other.width != self.width || other.height != self.height {
            resampled = BilinearResampler.resample(other, self.width, self.height);
            &resampled
        } else {
            other
        };
        let mut out = RasterMask::new(self.width, self.height);
        for (i, slot) in out.data.iter_mut().enumerate() {
            *slot = op.apply(self.data[i], other.data[i]).clamp(0.0, 1.0);
        }
        out
    }

    /// Alpha complement: `1 - a` per pixel.
    pub fn invert(&self) -> RasterMask {
        let mut out = self.clone();
        for a in &mut out.data {
            *a = 1.0 - *a;
        }
        out
    }

    /// Bilinear resample to new dimensions using the default CPU resampler.
    pub fn resize(&self, width: u32, height: u32) -> RasterMask {
        self.resize_with(&BilinearResampler, width, height)
    }

    pub fn resize_with(&self, resampler: &dyn Resampler, width: u32, height: u32) -> RasterMask {
        resampler.resample(self, width, height)
    }

    /// Builds a mask from one channel of a color image
    /// (0 = R, 1 = G, 2 = B, 3 = A). An out-of-range index is a contract
    /// violation.
    pub fn extract_channel(image: &DynamicImage, channel: usize) -> Result<Self> {
        if channel > 3 {
            return Err(RasterError::ChannelOutOfRange(channel));
        }
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut mask = Self::new(width, height);
        if mask.is_empty() {
            return Ok(mask);
        }
        for (x, y, pixel) in rgba.enumerate_pixels() {
            mask.put(x, y, pixel.0[channel] as f32 / 255.0);
        }
        Ok(mask)
    }
}

/// Even-odd ray cast against the polygon edges.
fn point_in_polygon(p: Vec2, points: &[Vec2]) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[j];
        if (a.y > p.y) != (b.y > p.y) {
            let t = (p.y - a.y) / (b.y - a.y);
            if p.x < a.x + t * (b.x - a.x) {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn distance_to_edges(p: Vec2, points: &[Vec2]) -> f32 {
    let mut best = f32::INFINITY;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        best = best.min(distance_to_segment(p, points[j], points[i]));
        j = i;
    }
    best
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

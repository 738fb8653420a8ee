//! # Terrain Kit Common - Shared Types and Utilities
//!
//! Foundational types shared across the terrain kit crates: pixel- and
//! world-space rectangles and the optional instrumentation sink that
//! pipeline stages report timings to.
//!
//! ## Example
//!
//! ```rust
//! use terrain_kit_common::{PixelRect, WorldBounds};
//! use glam::Vec3;
//!
//! let rect = PixelRect::new(10, 20, 64, 32);
//! assert!(rect.contains(12, 21));
//!
//! let bounds = WorldBounds::new(Vec3::ZERO, Vec3::new(100.0, 10.0, 100.0));
//! assert_eq!(bounds.size.x, 100.0);
//! ```

pub mod instrument;

use serde::{Deserialize, Serialize};

pub use glam::{Vec2, Vec3};
pub use instrument::{InstrumentationSink, NoopSink, OpCategory, TracingSink};


/// Axis-aligned rectangle in target-raster pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Full rect of a `width x height` image at the origin.
    pub fn of_image(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && y >= self.y
            && x < self.x + self.width as i32
            && y < self.y + self.height as i32
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Intersection with another rect, or `None` when they do not overlap.
    pub fn intersect(&self, other: &PixelRect) -> Option<PixelRect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x + self.width as i32).min(other.x + other.width as i32);
        let y1 = (self.y + self.height as i32).min(other.y + other.height as i32);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(PixelRect::new(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32))
    }
}

/// Axis-aligned box in world space. The ground plane is XZ and +Y is up;
/// mask-derived geometry is interpolated across the XZ footprint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub origin: Vec3,
    pub size: Vec3,
}

impl WorldBounds {
    pub fn new(origin: Vec3, size: Vec3) -> Self {
        Self { origin, size }
    }

    /// Map a normalized (u, v) in [0,1]^2 onto the XZ footprint at the
    /// given elevation above the box origin.
    pub fn lerp_ground(&self, u: f32, v: f32, elevation: f32) -> Vec3 {
        Vec3::new(
            self.origin.x + u * self.size.x,
            self.origin.y + elevation,
            self.origin.z + v * self.size.z,
        )
    }

    pub fn center(&self) -> Vec3 {
        self.origin + self.size * 0.5
    }
}

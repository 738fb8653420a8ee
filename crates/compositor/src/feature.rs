//! Upstream-provided feature and segment records.
//!
//! Created by detection/segmentation producers, consumed once per
//! compositing pass, never mutated here.

use raster::RasterMask;
use serde::{Deserialize, Serialize};
use terrain_kit_common::PixelRect;

use crate::color::Rgba;

/// A terrain feature to paint into the heightmap.
#[derive(Debug, Clone)]
pub struct Feature {
    pub mask: RasterMask,
    /// Placement in target-raster pixel space.
    pub bounds: PixelRect,
    /// Semantic label driving the blend policy.
    pub label: String,
    /// Normalized height in `[0, 1]`.
    pub elevation: f32,
    pub color: Option<Rgba>,
}

impl Feature {
    pub fn new(mask: RasterMask, bounds: PixelRect, label: impl Into<String>, elevation: f32) -> Self {
        Self {
            mask,
            bounds,
            label: label.into(),
            elevation: elevation.clamp(0.0, 1.0),
            color: None,
        }
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }
}

/// Whether a segment belongs to the terrain background or is a discrete
/// foreground object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    Terrain,
    Object,
}

/// A labeled region to paint into the segmentation map.
#[derive(Debug, Clone)]
pub struct Segment {
    pub mask: RasterMask,
    pub bounds: PixelRect,
    pub label: String,
    /// Coverage in source pixels; drives back-to-front ordering.
    pub area: f32,
    pub kind: SegmentKind,
    pub color: Option<Rgba>,
}

impl Segment {
    pub fn new(
        mask: RasterMask,
        bounds: PixelRect,
        label: impl Into<String>,
        area: f32,
        kind: SegmentKind,
    ) -> Self {
        Self {
            mask,
            bounds,
            label: label.into(),
            area,
            kind,
            color: None,
        }
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }
}

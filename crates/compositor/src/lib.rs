//! # Compositor - Feature Compositing into Raster Maps
//!
//! Blends many overlapping features into single target buffers:
//!
//! - [`HeightmapCompositor`]: features sorted ascending by elevation,
//!   painted through a label-driven blend policy (water carves, mountains
//!   raise, everything else interpolates), then smoothed with one 3x3
//!   box-blur pass.
//! - [`SegmentationCompositor`]: terrain segments back to front, objects
//!   on top, alpha-weighted "over" blending, deterministic label colors
//!   for colorless segments.
//!
//! Each compositor owns its output buffer exclusively for the duration
//! of one pass; input features are read-only and consumed once.
//!
//! ## Quick Start
//!
//! ```rust
//! use compositor::{Feature, HeightmapCompositor};
//! use raster::RasterMask;
//! use terrain_kit_common::PixelRect;
//!
//! let lake = Feature::new(
//!     RasterMask::circular(32, 32, 2.0),
//!     PixelRect::new(0, 0, 32, 32),
//!     "Lake",
//!     0.1,
//! );
//! let heights = HeightmapCompositor::new(64, 64).composite(&[lake]);
//! assert_eq!(heights.width(), 64);
//! ```

pub mod classify;
pub mod color;
pub mod feature;
pub mod heightmap;
pub mod segmentation;

pub use classify::BlendClass;
pub use color::{ColorTable, Rgba};
pub use feature::{Feature, Segment, SegmentKind};
pub use heightmap::HeightmapCompositor;
pub use segmentation::{SegmentationCompositor, SegmentationMap};

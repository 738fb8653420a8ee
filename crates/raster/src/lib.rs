//! # Raster - Mask Morphology and Analysis
//!
//! Single-channel raster masks for the terrain pipeline: shape
//! constructors, per-pixel blend ops, binary morphology, Gaussian blur,
//! bilinear resampling behind a swappable [`Resampler`], and geometric
//! analysis (similarity, centroid, bounding box, orientation, area,
//! perimeter).
//!
//! Masks are value types: no operation mutates its input, every transform
//! allocates a fresh output, and alpha stays clamped to `[0, 1]`.
//!
//! ## Quick Start
//!
//! ```rust
//! use raster::{analysis, BlendOp, RasterMask};
//!
//! let disc = RasterMask::circular(64, 64, 2.0);
//! let ring = disc.combine(&disc.erode(3), BlendOp::Subtract);
//!
//! let coverage = analysis::area(&ring, 0.5);
//! assert!(coverage > 0);
//! ```
//!
//! ## Error policy
//!
//! Best-effort operations degrade (empty masks, zero metrics, identity
//! results). Only two constructors fail loudly, both genuine contract
//! violations: [`RasterMask::polygon`] with fewer than 3 points and
//! [`RasterMask::extract_channel`] with a channel index above 3.

pub mod analysis;
pub mod error;
pub mod height;
pub mod mask;
pub mod morphology;
pub mod resample;

pub use analysis::SimilarityReport;
pub use error::{RasterError, Result};
pub use height::HeightField;
pub use mask::{BlendOp, RasterMask};
pub use resample::{BilinearResampler, Resampler};

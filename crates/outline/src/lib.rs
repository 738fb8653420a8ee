//! # Outline - Boundary Extraction and Triangulation
//!
//! Turns thresholded raster masks into polygon geometry:
//!
//! - **Tracing**: Moore-neighborhood boundary following
//!   ([`ContourTracer`]) with a degenerate corner-contour fallback.
//! - **Simplification**: one shared Ramer-Douglas-Peucker routine
//!   ([`simplify_polyline`]) for contours and general polylines.
//! - **Triangulation**: ear clipping over the simplified ring
//!   ([`triangulate`]), hardened with iteration caps that return partial
//!   results instead of looping on bad input.
//!
//! ## Quick Start
//!
//! ```rust
//! use outline::{extract_contour, triangulate};
//! use raster::RasterMask;
//!
//! let mask = RasterMask::circular(64, 64, 0.0);
//! let contour = extract_contour(&mask, 0.5, 1.5);
//! let triangles = triangulate(&contour.points);
//! assert!(!triangles.is_empty());
//! ```

pub mod simplify;
pub mod trace;
pub mod triangulate;
pub mod types;

pub use simplify::{simplify_contour, simplify_polyline, MIN_POINTS_FOR_SIMPLIFY};
pub use trace::ContourTracer;
pub use triangulate::{signed_area, triangulate};
pub use types::Contour;

use raster::RasterMask;

/// Trace a mask's boundary at `threshold` and simplify it with the given
/// tolerance. Simplification only applies to contours with more than
/// [`MIN_POINTS_FOR_SIMPLIFY`] points and a positive tolerance.
pub fn extract_contour(mask: &RasterMask, threshold: f32, tolerance: f32) -> Contour {
    let traced = ContourTracer::new(threshold).trace(mask);
    simplify_contour(&traced, tolerance)
}

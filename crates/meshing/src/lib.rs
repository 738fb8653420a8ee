//! # Meshing - Masks and Height Fields to Triangle Meshes
//!
//! The mesh path of the terrain pipeline:
//!
//! - [`MaskMesher`]: mask -> contour -> simplified ring -> ear-clipped
//!   ground mesh with UVs and normals, with a quad fallback for
//!   degenerate input.
//! - [`mesh_from_heightfield`] / [`mesh_from_heightmap`]: regular grid
//!   terrain meshes.
//! - Cleanup: [`weld_vertices`], [`remove_interior_triangles`],
//!   [`decimate`], [`Mesh::combine`].
//! - [`save_obj`] / [`write_obj`] export.
//!
//! ## Quick Start
//!
//! ```rust
//! use meshing::{weld_vertices, MaskMesher};
//! use raster::RasterMask;
//! use terrain_kit_common::WorldBounds;
//! use glam::Vec3;
//!
//! let mask = RasterMask::circular(64, 64, 0.0);
//! let bounds = WorldBounds::new(Vec3::ZERO, Vec3::new(50.0, 0.0, 50.0));
//! let mesh = MaskMesher::new().mesh_from_mask(&mask, bounds);
//! let compact = weld_vertices(&mesh);
//! assert!(compact.indices_valid());
//! ```

pub mod cleanup;
pub mod error;
pub mod from_mask;
pub mod heightfield;
pub mod mesh;
pub mod obj;

pub use cleanup::{decimate, remove_interior_triangles, weld_vertices};
pub use error::{MeshError, Result};
pub use from_mask::{fallback_quad, MaskMesher};
pub use heightfield::{mesh_from_heightfield, mesh_from_heightmap};
pub use mesh::Mesh;
pub use obj::{save_obj, write_obj};

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};
    use raster::RasterMask;
    use terrain_kit_common::WorldBounds;

    #[test]
    fn test_mask_to_welded_mesh_pipeline() {
        let mask = RasterMask::circular(48, 48, 0.0);
        let bounds = WorldBounds::new(Vec3::ZERO, Vec3::new(20.0, 0.0, 20.0));
        let mesh = MaskMesher::new()
            .with_simplify_tolerance(1.5)
            .mesh_from_mask(&mask, bounds);
        let welded = weld_vertices(&mesh);
        assert!(welded.indices_valid());
        assert_eq!(welded.triangle_count(), mesh.triangle_count());
    }

    #[test]
    fn test_heightfield_decimation_pipeline() {
        let heights = raster::HeightField::new(8, 8);
        let mesh = mesh_from_heightfield(&heights, Vec2::splat(10.0), 1.0);
        let reduced = decimate(&mesh, 0.5);
        assert!(reduced.triangle_count() < mesh.triangle_count());
        assert!(reduced.indices_valid());
    }
}

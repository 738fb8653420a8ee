//! Mask-to-mesh pipeline: contour extraction, simplification, world
//! transform, triangulation, UV assignment.

use std::sync::Arc;

use glam::{Vec2, Vec3};
use outline::{extract_contour, triangulate};
use raster::RasterMask;
use terrain_kit_common::{InstrumentationSink, OpCategory, WorldBounds};

use crate::mesh::Mesh;

/// Builds ground meshes from raster masks. Options accumulate through a
/// fluent builder; the mesher itself is reusable across masks.
pub struct MaskMesher {
    threshold: f32,
    simplify_tolerance: f32,
    height_offset: f32,
    sink: Option<Arc<dyn InstrumentationSink>>,
}

impl Default for MaskMesher {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            simplify_tolerance: 1.0,
            height_offset: 0.0,
            sink: None,
        }
    }
}

impl MaskMesher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_simplify_tolerance(mut self, tolerance: f32) -> Self {
        self.simplify_tolerance = tolerance;
        self
    }

    pub fn with_height_offset(mut self, offset: f32) -> Self {
        self.height_offset = offset;
        self
    }

    pub fn with_instrumentation(mut self, sink: Arc<dyn InstrumentationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Extract the mask's contour and triangulate it into a flat ground
    /// mesh spanning `bounds`. Degenerate contours and failed
    /// triangulations fall back to a two-triangle quad over the bounds.
    pub fn mesh_from_mask(&self, mask: &RasterMask, bounds: WorldBounds) -> Mesh {
        if let Some(sink) = &self.sink {
            sink.begin_op("mesh_from_mask", OpCategory::Geometry);
        }
        let mesh = self.build(mask, bounds);
        if let Some(sink) = &self.sink {
            sink.end_op("mesh_from_mask", OpCategory::Geometry);
        }
        mesh
    }

    fn build(&self, mask: &RasterMask, bounds: WorldBounds) -> Mesh {
        let contour = extract_contour(mask, self.threshold, self.simplify_tolerance);
        if contour.len() < 3 {
            tracing::debug!(points = contour.len(), "degenerate contour, quad fallback");
            return fallback_quad(bounds, self.height_offset);
        }

        let triangles = triangulate(&contour.points);
        if triangles.is_empty() {
            tracing::debug!("triangulation produced no triangles, quad fallback");
            return fallback_quad(bounds, self.height_offset);
        }

        let inv_w = 1.0 / (mask.width().saturating_sub(1).max(1)) as f32;
        let inv_h = 1.0 / (mask.height().saturating_sub(1).max(1)) as f32;

        let mut mesh = Mesh::new();
        for p in &contour.points {
            let world = bounds.lerp_ground(p.x * inv_w, p.y * inv_h, self.height_offset);
            mesh.positions.push(world);
            // UV from world position normalized by the bounding box.
            mesh.uvs.push(Vec2::new(
                if bounds.size.x != 0.0 {
                    (world.x - bounds.origin.x) / bounds.size.x
                } else {
                    0.0
                },
                if bounds.size.z != 0.0 {
                    (world.z - bounds.origin.z) / bounds.size.z
                } else {
                    0.0
                },
            ));
        }
        for [a, b, c] in triangles {
            mesh.indices.extend([a, b, c]);
        }
        mesh.compute_normals();
        mesh
    }
}

/// Two-triangle quad spanning the bounds at the given elevation, wound
/// so its surface normal points toward +Y.
pub fn fallback_quad(bounds: WorldBounds, height_offset: f32) -> Mesh {
    let y = bounds.origin.y + height_offset;
    let x0 = bounds.origin.x;
    let z0 = bounds.origin.z;
    let x1 = bounds.origin.x + bounds.size.x;
    let z1 = bounds.origin.z + bounds.size.z;

    Mesh {
        positions: vec![
            Vec3::new(x0, y, z0),
            Vec3::new(x0, y, z1),
            Vec3::new(x1, y, z1),
            Vec3::new(x1, y, z0),
        ],
        indices: vec![0, 1, 2, 0, 2, 3],
        normals: vec![Vec3::Y; 4],
        uvs: vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_bounds() -> WorldBounds {
        WorldBounds::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 10.0))
    }

    #[test]
    fn test_empty_mask_returns_quad() {
        let mesh = MaskMesher::new().mesh_from_mask(&RasterMask::new(2, 2), unit_bounds());
        assert_eq!(mesh.positions.len(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min, Vec3::ZERO);
        assert_eq!(max, Vec3::new(10.0, 0.0, 10.0));
    }

    #[test]
    fn test_disc_mask_meshes() {
        let mask = RasterMask::circular(48, 48, 0.0);
        let mesh = MaskMesher::new()
            .with_simplify_tolerance(1.5)
            .mesh_from_mask(&mask, unit_bounds());

        assert!(mesh.triangle_count() > 2);
        assert!(mesh.indices_valid());
        assert_eq!(mesh.uvs.len(), mesh.positions.len());
        assert_eq!(mesh.normals.len(), mesh.positions.len());

        // All vertices inside the world bounds at ground height.
        for p in &mesh.positions {
            assert!(p.x >= 0.0 && p.x <= 10.0);
            assert!(p.z >= 0.0 && p.z <= 10.0);
            assert_eq!(p.y, 0.0);
        }
        // UVs normalized by the bounding box.
        for uv in &mesh.uvs {
            assert!(uv.x >= 0.0 && uv.x <= 1.0);
            assert!(uv.y >= 0.0 && uv.y <= 1.0);
        }
    }

    #[test]
    fn test_height_offset_lifts_mesh() {
        let mask = RasterMask::circular(32, 32, 0.0);
        let mesh = MaskMesher::new()
            .with_height_offset(3.5)
            .mesh_from_mask(&mask, unit_bounds());
        assert!(mesh.positions.iter().all(|p| p.y == 3.5));
    }

    #[test]
    fn test_quad_normal_points_up() {
        let mut quad = fallback_quad(unit_bounds(), 0.0);
        quad.compute_normals();
        assert!(quad.normals.iter().all(|n| (*n - Vec3::Y).length() < 1e-5));
    }

    #[test]
    fn test_instrumented_mesher_reports() {
        use terrain_kit_common::TracingSink;
        let sink = Arc::new(TracingSink::new());
        let mask = RasterMask::circular(32, 32, 0.0);
        let mesh = MaskMesher::new()
            .with_instrumentation(sink)
            .mesh_from_mask(&mask, unit_bounds());
        assert!(!mesh.is_empty());
    }
}

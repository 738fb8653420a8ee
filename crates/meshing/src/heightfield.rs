//! Regular-grid terrain meshes from height data.

use glam::{Vec2, Vec3};
use raster::{HeightField, RasterMask};

use crate::mesh::Mesh;

/// Build a grid mesh from a height field. Vertex `(x, y, z)` is
/// `(nx * size.x, height * height_scale, nz * size.y)` where `(nx, nz)`
/// is the normalized grid position, which also becomes the UV.
pub fn mesh_from_heightfield(heights: &HeightField, terrain_size: Vec2, height_scale: f32) -> Mesh {
    let w = heights.width();
    let h = heights.height();
    if w < 2 || h < 2 {
        tracing::warn!(width = w, height = h, "height field too small to mesh");
        return Mesh::new();
    }

    let mut mesh = Mesh::new();
    for z in 0..h {
        let nz = z as f32 / (h - 1) as f32;
        for x in 0..w {
            let nx = x as f32 / (w - 1) as f32;
            mesh.positions.push(Vec3::new(
                nx * terrain_size.x,
                heights.get(x, z) * height_scale,
                nz * terrain_size.y,
            ));
            mesh.uvs.push(Vec2::new(nx, nz));
        }
    }

    // Two triangles per cell: (tl, bl, br) and (tl, br, tr).
    for z in 0..h - 1 {
        for x in 0..w - 1 {
            let tl = z * w + x;
            let tr = tl + 1;
            let bl = tl + w;
            let br = bl + 1;
            mesh.indices.extend([tl, bl, br]);
            mesh.indices.extend([tl, br, tr]);
        }
    }
    mesh.compute_normals();
    mesh
}

/// Grid mesh from a heightmap stored as a raster mask, treating alpha as
/// normalized height.
pub fn mesh_from_heightmap(heightmap: &RasterMask, terrain_size: Vec2, height_scale: f32) -> Mesh {
    let Some(field) = HeightField::from_data(
        heightmap.width(),
        heightmap.height(),
        heightmap.data().to_vec(),
    ) else {
        return Mesh::new();
    };
    mesh_from_heightfield(&field, terrain_size, height_scale)
}

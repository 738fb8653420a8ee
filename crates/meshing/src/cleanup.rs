//! Mesh cleanup: welding, interior-triangle removal, decimation.

use std::collections::HashMap;

use glam::{Vec2, Vec3};

use crate::mesh::Mesh;

/// Exact bit-pattern key over (position, normal, uv).
type WeldKey = [u32; 8];

fn weld_key(position: Vec3, normal: Vec3, uv: Vec2) -> WeldKey {
    [
        position.x.to_bits(),
        position.y.to_bits(),
        position.z.to_bits(),
        normal.x.to_bits(),
        normal.y.to_bits(),
        normal.z.to_bits(),
        uv.x.to_bits(),
        uv.y.to_bits(),
    ]
}

/// Deduplicate vertices by exact (position, normal, uv) identity and
/// remap triangle indices. Vertices no triangle references are dropped.
/// A mesh without normals gets them recomputed after welding.
pub fn weld_vertices(mesh: &Mesh) -> Mesh {
    let had_normals = mesh.normals.len() == mesh.positions.len();
    let has_uvs = mesh.uvs.len() == mesh.positions.len();

    let mut out = Mesh::new();
    let mut remap: HashMap<WeldKey, u32> = HashMap::new();

    for &index in &mesh.indices {
        let i = index as usize;
        let position = mesh.positions[i];
        let normal = if had_normals { mesh.normals[i] } else { Vec3::ZERO };
        let uv = if has_uvs { mesh.uvs[i] } else { Vec2::ZERO };

        let new_index = *remap.entry(weld_key(position, normal, uv)).or_insert_with(|| {
            out.positions.push(position);
            if had_normals {
                out.normals.push(normal);
            }
            if has_uvs {
                out.uvs.push(uv);
            }
            (out.positions.len() - 1) as u32
        });
        out.indices.push(new_index);
    }

    if !had_normals {
        out.compute_normals();
    }
    tracing::debug!(
        before = mesh.positions.len(),
        after = out.positions.len(),
        "welded vertices"
    );
    out
}

/// Keep only triangles owning at least one boundary edge (an undirected
/// edge used by exactly one triangle), then weld to compact the vertex
/// array. Interior fans produced by triangulating overlapping geometry
/// disappear; a closed surface would keep nothing, which is the
/// documented trade-off of the edge-count heuristic.
pub fn remove_interior_triangles(mesh: &Mesh) -> Mesh {
    let mut edge_counts: HashMap<(u32, u32), u32> = HashMap::new();
    let edge = |a: u32, b: u32| (a.min(b), a.max(b));

    for tri in mesh.indices.chunks_exact(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            *edge_counts.entry(edge(a, b)).or_insert(0) += 1;
        }
    }

    let mut kept = Mesh {
        positions: mesh.positions.clone(),
        normals: mesh.normals.clone(),
        uvs: mesh.uvs.clone(),
        indices: Vec::new(),
    };
    for tri in mesh.indices.chunks_exact(3) {
        let boundary = [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])]
            .iter()
            .any(|&(a, b)| edge_counts[&edge(a, b)] == 1);
        if boundary {
            kept.indices.extend_from_slice(tri);
        }
    }
    weld_vertices(&kept)
}

/// Index-stride decimation toward `quality * original` triangles.
/// Targets within 90% of the original return an unmodified copy. This is
/// not error-metric simplification; it drops every stride-th triangle.
pub fn decimate(mesh: &Mesh, quality: f32) -> Mesh {
    let original = mesh.triangle_count();
    if original == 0 {
        return mesh.clone();
    }
    let quality = quality.clamp(0.0, 1.0);
    let target = (original as f32 * quality).round() as usize;
    if target as f32 >= original as f32 * 0.9 {
        return mesh.clone();
    }

    let stride = (original / (original - target)).max(1);
    let mut thinned = Mesh {
        positions: mesh.positions.clone(),
        normals: mesh.normals.clone(),
        uvs: mesh.uvs.clone(),
        indices: Vec::new(),
    };
    for (i, tri) in mesh.indices.chunks_exact(3).enumerate() {
        if (i + 1) % stride == 0 {
            continue;
        }
        thinned.indices.extend_from_slice(tri);
    }
    weld_vertices(&thinned)
}

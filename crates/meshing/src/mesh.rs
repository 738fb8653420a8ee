//! The triangle mesh container.

use glam::{Mat4, Vec2, Vec3};

/// Indexed triangle mesh. `indices` holds triples into `positions`;
/// `normals` and `uvs` are either empty or aligned to `positions`.
/// Triangle winding is consistent: front faces have their surface normal
/// toward +Y for ground geometry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Every index must address a vertex.
    pub fn indices_valid(&self) -> bool {
        let n = self.positions.len() as u32;
        self.indices.len() % 3 == 0 && self.indices.iter().all(|&i| i < n)
    }

    /// Recompute per-vertex normals by accumulating area-weighted face
    /// normals. Degenerate vertices fall back to +Y.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let a = self.positions[tri[0] as usize];
            let b = self.positions[tri[1] as usize];
            let c = self.positions[tri[2] as usize];
            let face = (b - a).cross(c - a);
            for &i in tri {
                normals[i as usize] += face;
            }
        }
        self.normals = normals
            .into_iter()
            .map(|n| {
                if n.length_squared() > 0.0 {
                    n.normalize()
                } else {
                    Vec3::Y
                }
            })
            .collect();
    }

    /// Axis-aligned bounds, `None` for a mesh with no vertices.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        let mut min = first;
        let mut max = first;
        for &p in &self.positions[1..] {
            min = min.min(p);
            max = max.max(p);
        }
        Some((min, max))
    }

    /// Concatenate meshes under their respective world transforms.
    /// A missing transform falls back to identity.
    pub fn combine(meshes: &[Mesh], transforms: &[Mat4]) -> Mesh {
        let mut out = Mesh::new();
        let any_uvs = meshes.iter().any(|m| !m.uvs.is_empty());
        for (i, mesh) in meshes.iter().enumerate() {
            let transform = transforms.get(i).copied().unwrap_or(Mat4::IDENTITY);
            let normal_matrix = transform.inverse().transpose();
            let base = out.positions.len() as u32;

            out.positions
                .extend(mesh.positions.iter().map(|&p| transform.transform_point3(p)));
            out.indices.extend(mesh.indices.iter().map(|&i| base + i));
            out.normals.extend(mesh.normals.iter().map(|&n| {
                normal_matrix.transform_vector3(n).normalize_or_zero()
            }));
            if any_uvs {
                if mesh.uvs.is_empty() {
                    out.uvs
                        .extend(std::iter::repeat(Vec2::ZERO).take(mesh.positions.len()));
                } else {
                    out.uvs.extend_from_slice(&mesh.uvs);
                }
            }
        }
        if out.normals.len() != out.positions.len() {
            out.compute_normals();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> Mesh {
        Mesh {
            positions: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 0.0),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
            normals: Vec::new(),
            uvs: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(1.0, 0.0),
            ],
        }
    }

    #[test]
    fn test_normals_point_up_for_ground_quad() {
        let mut quad = unit_quad();
        quad.compute_normals();
        for n in &quad.normals {
            assert!((*n - Vec3::Y).length() < 1e-5);
        }
    }

    #[test]
    fn test_bounds() {
        let quad = unit_quad();
        let (min, max) = quad.bounds().unwrap();
        assert_eq!(min, Vec3::ZERO);
        assert_eq!(max, Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_combine_offsets_indices() {
        let quad = unit_quad();
        let shift = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0));
        let combined = Mesh::combine(&[quad.clone(), quad.clone()], &[Mat4::IDENTITY, shift]);

        assert_eq!(combined.positions.len(), 8);
        assert_eq!(combined.triangle_count(), 4);
        assert!(combined.indices_valid());
        assert_eq!(combined.positions[4], Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_combine_missing_transform_is_identity() {
        let quad = unit_quad();
        let combined = Mesh::combine(&[quad.clone(), quad], &[]);
        assert_eq!(combined.positions[0], combined.positions[4]);
    }
}

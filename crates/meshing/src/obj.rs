//! Wavefront OBJ export.

use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::mesh::Mesh;

/// Write a mesh as OBJ text. Normals and UVs are emitted only when the
/// mesh carries them.
pub fn write_obj<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<()> {
    let has_normals = mesh.normals.len() == mesh.positions.len();
    let has_uvs = mesh.uvs.len() == mesh.positions.len();

    for p in &mesh.positions {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }
    if has_uvs {
        for uv in &mesh.uvs {
            writeln!(writer, "vt {} {}", uv.x, uv.y)?;
        }
    }
    if has_normals {
        for n in &mesh.normals {
            writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
        }
    }
    for tri in mesh.indices.chunks_exact(3) {
        // OBJ indices are 1-based.
        let f = |i: u32| i + 1;
        match (has_uvs, has_normals) {
            (true, true) => writeln!(
                writer,
                "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}",
                a = f(tri[0]),
                b = f(tri[1]),
                c = f(tri[2])
            )?,
            (true, false) => writeln!(
                writer,
                "f {a}/{a} {b}/{b} {c}/{c}",
                a = f(tri[0]),
                b = f(tri[1]),
                c = f(tri[2])
            )?,
            (false, true) => writeln!(
                writer,
                "f {a}//{a} {b}//{b} {c}//{c}",
                a = f(tri[0]),
                b = f(tri[1]),
                c = f(tri[2])
            )?,
            (false, false) => {
                writeln!(writer, "f {} {} {}", f(tri[0]), f(tri[1]), f(tri[2]))?
            }
        }
    }
    Ok(())
}

/// Write a mesh to an OBJ file at `path`.
pub fn save_obj<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    write_obj(mesh, &mut writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_mask::fallback_quad;
    use glam::Vec3;
    use terrain_kit_common::WorldBounds;

    #[test]
    fn test_obj_output_shape() {
        let quad = fallback_quad(
            WorldBounds::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0)),
            0.0,
        );
        let mut buffer = Vec::new();
        write_obj(&quad, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 4);
        assert_eq!(text.lines().filter(|l| l.starts_with("vt ")).count(), 4);
        assert_eq!(text.lines().filter(|l| l.starts_with("vn ")).count(), 4);
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 2);
        assert!(text.contains("f 1/1/1 2/2/2 3/3/3"));
    }
}

//! Ear-clipping triangulation of simple polygons.
//!
//! An ear (u, v, w) of three cyclically consecutive ring indices is
//! clipped when its signed area is positive (counter-clockwise) and no
//! other remaining vertex lies inside it. A non-progress counter of
//! twice the vertex count guards against degenerate or self-intersecting
//! input, for which partial output is returned; behavior on
//! self-intersecting polygons is otherwise undefined.

use glam::Vec2;

/// Triangulate a simple polygon. Returned triples index into `points`.
/// Fewer than 3 input points yields no triangles.
pub fn triangulate(points: &[Vec2]) -> Vec<[u32; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    // Work on an index ring ordered counter-clockwise.
    let mut ring: Vec<u32> = if signed_area(points) > 0.0 {
        (0..n as u32).collect()
    } else {
        (0..n as u32).rev().collect()
    };

    let mut flat: Vec<u32> = Vec::with_capacity((n - 2) * 3);
    let mut nv = n;
    let mut guard = 2 * nv;
    let mut v = nv - 1;

    while nv > 2 {
        if guard == 0 {
            tracing::warn!(
                remaining = nv,
                emitted = flat.len() / 3,
                "ear clipping stalled, returning partial triangulation"
            );
            break;
        }
        guard -= 1;

        let u = if v >= nv { 0 } else { v };
        v = if u + 1 >= nv { 0 } else { u + 1 };
        let w = if v + 1 >= nv { 0 } else { v + 1 };

        if snip(points, &ring, u, v, w, nv) {
            flat.push(ring[u]);
            flat.push(ring[v]);
            flat.push(ring[w]);
            ring.remove(v);
            nv -= 1;
            guard = 2 * nv;
        }
    }

    // Flip winding to match the front-face convention of the quad
    // fallback (surface normal toward +Y).
    flat.reverse();
    flat.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect()
}

/// Twice-signed-area cross product test plus containment scan.
fn snip(points: &[Vec2], ring: &[u32], u: usize, v: usize, w: usize, nv: usize) -> bool {
    let a = points[ring[u] as usize];
    let b = points[ring[v] as usize];
    let c = points[ring[w] as usize];

    if (b - a).perp_dot(c - a) < f32::EPSILON {
        return false;
    }
    for p in 0..nv {
        if p == u || p == v || p == w {
            continue;
        }
        if inside_triangle(points[ring[p] as usize], a, b, c) {
            return false;
        }
    }
    true
}

/// Strict interior test via sign-consistent cross products.
fn inside_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let ab = (b - a).perp_dot(p - a);
    let bc = (c - b).perp_dot(p - b);
    let ca = (a - c).perp_dot(p - c);
    ab > 0.0 && bc > 0.0 && ca > 0.0
}

/// Signed polygon area; positive for counter-clockwise rings.
pub fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        sum += a.perp_dot(b);
    }
    sum * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_area(points: &[Vec2], tri: [u32; 3]) -> f32 {
        let a = points[tri[0] as usize];
        let b = points[tri[1] as usize];
        let c = points[tri[2] as usize];
        ((b - a).perp_dot(c - a) * 0.5).abs()
    }

    fn regular_polygon(n: usize, radius: f32) -> Vec<Vec2> {
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32 * std::f32::consts::TAU;
                Vec2::new(radius * t.cos(), radius * t.sin())
            })
            .collect()
    }

    #[test]
    fn test_too_few_points() {
        assert!(triangulate(&[Vec2::ZERO, Vec2::ONE]).is_empty());
        assert!(triangulate(&[]).is_empty());
    }

    #[test]
    fn test_square_two_triangles() {
        let square = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(0.0, 4.0),
        ];
        let tris = triangulate(&square);
        assert_eq!(tris.len(), 2);
        let total: f32 = tris.iter().map(|&t| triangle_area(&square, t)).sum();
        assert!((total - 16.0).abs() < 1e-4);
    }

    #[test]
    fn test_convex_polygon_n_minus_two() {
        for n in [3usize, 5, 8, 12] {
            let poly = regular_polygon(n, 10.0);
            let tris = triangulate(&poly);
            assert_eq!(tris.len(), n - 2, "n = {n}");

            use geo::Area;
            use geo_types::{Coord, LineString, Polygon};
            let geo_poly = Polygon::new(
                LineString::new(poly.iter().map(|p| Coord { x: p.x, y: p.y }).collect()),
                vec![],
            );
            let total: f32 = tris.iter().map(|&t| triangle_area(&poly, t)).sum();
            assert!((total - geo_poly.unsigned_area()).abs() < 1e-2);
        }
    }

    #[test]
    fn test_clockwise_input_handled() {
        let mut square = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(0.0, 4.0),
        ];
        square.reverse();
        assert_eq!(triangulate(&square).len(), 2);
    }

    #[test]
    fn test_concave_polygon_covers_area() {
        // L-shape.
        let poly = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 2.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(2.0, 4.0),
            Vec2::new(0.0, 4.0),
        ];
        let tris = triangulate(&poly);
        assert_eq!(tris.len(), 4);
        let total: f32 = tris.iter().map(|&t| triangle_area(&poly, t)).sum();
        assert!((total - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_collinear_input_degrades_without_panic() {
        let line: Vec<Vec2> = (0..6).map(|i| Vec2::new(i as f32, 0.0)).collect();
        // Zero-area ring: partial (possibly empty) output, never a hang.
        let tris = triangulate(&line);
        assert!(tris.len() <= 4);
    }

    #[test]
    fn test_indices_in_range() {
        let poly = regular_polygon(9, 5.0);
        for tri in triangulate(&poly) {
            for idx in tri {
                assert!((idx as usize) < poly.len());
            }
        }
    }
}

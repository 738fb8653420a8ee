//! Ramer-Douglas-Peucker polyline simplification.
//!
//! One routine serves both contour cleanup and general polylines: the
//! point of maximum perpendicular distance from the chord between a
//! section's endpoints is kept (and recursed into) when it exceeds the
//! tolerance, otherwise the whole interior is dropped. Endpoints are
//! always kept.

use glam::Vec2;

use crate::types::Contour;

/// Contours at or below this point count are left untouched.
pub const MIN_POINTS_FOR_SIMPLIFY: usize = 10;

/// Simplify a polyline. `tolerance <= 0` returns the input unchanged.
pub fn simplify_polyline(points: &[Vec2], tolerance: f32) -> Vec<Vec2> {
    if tolerance <= 0.0 || points.len() <= 2 {
        return points.to_vec();
    }
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;
    mark_kept(points, 0, points.len() - 1, tolerance, &mut keep);
    points
        .iter()
        .zip(&keep)
        .filter(|&(_, &k)| k)
        .map(|(&p, _)| p)
        .collect()
}

/// Simplify a traced contour, applied only when the contour carries more
/// than [`MIN_POINTS_FOR_SIMPLIFY`] points and the tolerance is positive.
pub fn simplify_contour(contour: &Contour, tolerance: f32) -> Contour {
    if contour.len() <= MIN_POINTS_FOR_SIMPLIFY || tolerance <= 0.0 {
        return contour.clone();
    }
    let simplified = simplify_polyline(&contour.points, tolerance);
    tracing::debug!(
        before = contour.len(),
        after = simplified.len(),
        tolerance,
        "contour simplified"
    );
    Contour::new(simplified)
}

fn mark_kept(points: &[Vec2], first: usize, last: usize, tolerance: f32, keep: &mut [bool]) {
    if last <= first + 1 {
        return;
    }
    let mut max_distance = 0.0f32;
    let mut max_index = first;
    for i in first + 1..last {
        let d = perpendicular_distance(points[i], points[first], points[last]);
        if d > max_distance {
            max_distance = d;
            max_index = i;
        }
    }
    if max_distance > tolerance {
        keep[max_index] = true;
        mark_kept(points, first, max_index, tolerance, keep);
        mark_kept(points, max_index, last, tolerance, keep);
    }
}

fn perpendicular_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let chord = b - a;
    let len = chord.length();
    if len == 0.0 {
        return p.distance(a);
    }
    (chord.perp_dot(p - a)).abs() / len
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag(n: usize) -> Vec<Vec2> {
        (0..n)
            .map(|i| Vec2::new(i as f32, if i % 2 == 0 { 0.0 } else { 1.0 }))
            .collect()
    }

    #[test]
    fn test_zero_tolerance_is_identity() {
        let points = zigzag(20);
        assert_eq!(simplify_polyline(&points, 0.0), points);
    }

    #[test]
    fn test_huge_tolerance_keeps_endpoints_only() {
        let points = zigzag(20);
        let simplified = simplify_polyline(&points, 1e9);
        assert_eq!(simplified, vec![points[0], points[19]]);
    }

    #[test]
    fn test_collinear_interior_dropped() {
        let points: Vec<Vec2> = (0..10).map(|i| Vec2::new(i as f32, 0.0)).collect();
        let simplified = simplify_polyline(&points, 0.1);
        assert_eq!(simplified, vec![points[0], points[9]]);
    }

    #[test]
    fn test_sharp_corner_kept() {
        let points = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(5.0, 0.1),
            Vec2::new(10.0, 10.0),
            Vec2::new(20.0, 10.2),
        ];
        let simplified = simplify_polyline(&points, 1.0);
        assert!(simplified.contains(&Vec2::new(10.0, 10.0)));
        assert!(!simplified.contains(&Vec2::new(5.0, 0.1)));
    }

    #[test]
    fn test_short_contour_not_simplified() {
        let contour = Contour::new(zigzag(10));
        let out = simplify_contour(&contour, 5.0);
        assert_eq!(out, contour);
    }

    #[test]
    fn test_long_contour_simplified() {
        let contour = Contour::new(zigzag(50));
        let out = simplify_contour(&contour, 2.0);
        assert!(out.len() < contour.len());
        assert_eq!(out.points[0], contour.points[0]);
        assert_eq!(out.points[out.len() - 1], contour.points[49]);
    }
}

use geo_types::{Coord, LineString, Polygon};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Ordered, closed sequence of points approximating a mask boundary.
/// Produced fresh per extraction call; the closing edge from the last
/// point back to the first is implicit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<Vec2>,
}

impl Contour {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Convert to a geo-types polygon for geometric operations.
    pub fn to_geo_polygon(&self) -> Polygon<f32> {
        let coords: Vec<Coord<f32>> = self
            .points
            .iter()
            .map(|p| Coord { x: p.x, y: p.y })
            .collect();
        Polygon::new(LineString::new(coords), vec![])
    }

    /// Enclosed area of the ring.
    pub fn area(&self) -> f32 {
        use geo::Area;
        self.to_geo_polygon().unsigned_area()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_area() {
        let contour = Contour::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(0.0, 4.0),
        ]);
        assert!((contour.area() - 16.0).abs() < 1e-5);
    }
}

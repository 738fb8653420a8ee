//! Moore-neighborhood boundary tracing over a thresholded mask.

use glam::Vec2;
use raster::RasterMask;

use crate::types::Contour;

/// Hard cap on trace length regardless of image size.
const MAX_TRACE_STEPS: usize = 2000;

/// The 8 Moore directions in clockwise order starting east.
const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// One-shot boundary tracer. A single call scans for a start pixel and
/// follows the boundary in 8-connectivity; traces are not restartable.
#[derive(Debug, Clone, Copy)]
pub struct ContourTracer {
    /// Alpha threshold separating shape from background.
    pub threshold: f32,
}

impl Default for ContourTracer {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl ContourTracer {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Trace the mask's boundary. When no boundary pixel exists the four
    /// image corners are returned as a degenerate contour.
    pub fn trace(&self, mask: &RasterMask) -> Contour {
        let Some(start) = self.find_start(mask) else {
            tracing::debug!("no boundary pixel found, returning corner contour");
            return corner_contour(mask);
        };

        let width = mask.width() as i32;
        let height = mask.height() as i32;
        let cap = (2 * width as usize * height as usize).min(MAX_TRACE_STEPS);

        let mut visited = vec![false; (width * height) as usize];
        let mut points = Vec::new();

        let (mut cx, mut cy) = start;
        visited[(cy * width + cx) as usize] = true;
        points.push(Vec2::new(cx as f32, cy as f32));

        // Rolling scan direction: each scan starts one step before the
        // last successful direction to keep the trace hugging the edge.
        let mut last_dir = 0usize;
        'trace: while points.len() < cap {
            let scan_from = (last_dir + 7) % 8;
            let mut step = None;
            for i in 0..8 {
                let dir = (scan_from + i) % 8;
                let (dx, dy) = DIRECTIONS[dir];
                let nx = cx + dx;
                let ny = cy + dy;
                if nx < 0 || ny < 0 || nx >= width || ny >= height {
                    continue;
                }
                if (nx, ny) == start && points.len() > 2 {
                    // Closed the loop.
                    break 'trace;
                }
                let idx = (ny * width + nx) as usize;
                if visited[idx] || mask.get(nx as u32, ny as u32) < self.threshold {
                    continue;
                }
                step = Some((nx, ny, dir));
                break;
            }
            let Some((nx, ny, dir)) = step else {
                // No unvisited above-threshold neighbor left.
                break;
            };
            visited[(ny * width + nx) as usize] = true;
            points.push(Vec2::new(nx as f32, ny as f32));
            cx = nx;
            cy = ny;
            last_dir = dir;
        }

        Contour::new(points)
    }

    /// Scan rows top to bottom, columns left to right, skipping the
    /// outermost 1-pixel border, for the first above-threshold pixel with
    /// a sub-threshold 4-neighbor.
    fn find_start(&self, mask: &RasterMask) -> Option<(i32, i32)> {
        let width = mask.width();
        let height = mask.height();
        if width < 3 || height < 3 {
            return None;
        }
        for y in 1..height - 1 {
            for x in 1..width - 1 {
                if mask.get(x, y) < self.threshold {
                    continue;
                }
                let edge = mask.get(x + 1, y) < self.threshold
                    || mask.get(x - 1, y) < self.threshold
                    || mask.get(x, y + 1) < self.threshold
                    || mask.get(x, y - 1) < self.threshold;
                if edge {
                    return Some((x as i32, y as i32));
                }
            }
        }
        None
    }
}

fn corner_contour(mask: &RasterMask) -> Contour {
    let w = mask.width().saturating_sub(1) as f32;
    let h = mask.height().saturating_sub(1) as f32;
    Contour::new(vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(w, 0.0),
        Vec2::new(w, h),
        Vec2::new(0.0, h),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_mask(size: u32, lo: u32, hi: u32) -> RasterMask {
        let mut data = vec![0.0; (size * size) as usize];
        for y in lo..hi {
            for x in lo..hi {
                data[(y * size + x) as usize] = 1.0;
            }
        }
        RasterMask::from_data(size, size, data)
    }

    #[test]
    fn test_trace_square_block() {
        let mask = block_mask(16, 4, 12);
        let contour = ContourTracer::default().trace(&mask);
        // An 8x8 block has a 28-pixel one-pixel-wide boundary ring.
        assert!(contour.len() >= 20, "len = {}", contour.len());
        assert!(contour.len() <= 32);
        // All traced points lie on the block.
        for p in &contour.points {
            assert!(mask.get(p.x as u32, p.y as u32) >= 0.5);
        }
    }

    #[test]
    fn test_blank_mask_yields_corners() {
        let mask = RasterMask::new(10, 8);
        let contour = ContourTracer::default().trace(&mask);
        assert_eq!(contour.len(), 4);
        assert_eq!(contour.points[0], Vec2::new(0.0, 0.0));
        assert_eq!(contour.points[2], Vec2::new(9.0, 7.0));
    }

    #[test]
    fn test_trace_respects_hard_cap() {
        let mask = RasterMask::circular(128, 128, 0.0);
        let contour = ContourTracer::default().trace(&mask);
        assert!(contour.len() <= 2000);
        assert!(contour.len() > 4);
    }

    #[test]
    fn test_solid_mask_has_no_boundary() {
        // Every pixel of a solid mask has only above-threshold neighbors
        // inside the border scan, so the degenerate contour comes back.
        let mask = RasterMask::solid(100, 100);
        let contour = ContourTracer::default().trace(&mask);
        assert_eq!(contour.len(), 4);
    }

    #[test]
    fn test_tiny_mask_degenerates() {
        let mask = RasterMask::solid(2, 2);
        let contour = ContourTracer::default().trace(&mask);
        assert_eq!(contour.len(), 4);
    }
}

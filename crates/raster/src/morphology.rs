//! Binary morphology and Gaussian blur over masks.
//!
//! Erosion and dilation are 4-neighborhood operations at threshold 0.5.
//! Every iteration reads the previous iteration's full snapshot, so a
//! pixel flip is never visible to sibling pixels within the same pass.
//! An out-of-bounds neighbor is treated as absent: a border pixel is
//! never eroded or dilated from that side alone.

use crate::mask::RasterMask;

const BINARY_THRESHOLD: f32 = 0.5;

const NEIGHBORS_4: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

impl RasterMask {
    /// `iterations` rounds of binary erosion. The result is binary (0/1).
    pub fn erode(&self, iterations: u32) -> RasterMask {
        self.morph(iterations, false)
    }

    /// `iterations` rounds of binary dilation. The result is binary (0/1).
    pub fn dilate(&self, iterations: u32) -> RasterMask {
        self.morph(iterations, true)
    }

    fn morph(&self, iterations: u32, grow: bool) -> RasterMask {
        if self.is_empty() {
            return RasterMask::empty();
        }
        let width = self.width() as i32;
        let height = self.height() as i32;
        let mut current = self.clone();
        for _ in 0..iterations {
            let snapshot = current.clone();
            for y in 0..height {
                for x in 0..width {
                    let on = snapshot.get(x as u32, y as u32) >= BINARY_THRESHOLD;
                    let mut result = on;
                    for (dx, dy) in NEIGHBORS_4 {
                        let nx = x + dx;
                        let ny = y + dy;
                        if nx < 0 || ny < 0 || nx >= width || ny >= height {
                            continue;
                        }
                        let neighbor_on =
                            snapshot.get(nx as u32, ny as u32) >= BINARY_THRESHOLD;
                        if grow && neighbor_on {
                            result = true;
                            break;
                        }
                        if !grow && !neighbor_on {
                            result = false;
                            break;
                        }
                    }
                    current.put(x as u32, y as u32, if result { 1.0 } else { 0.0 });
                }
            }
        }
        current
    }

    /// Separable Gaussian blur: horizontal pass then vertical pass.
    /// `kernel_size` is forced odd and at least 3. At the image borders
    /// the weight falling outside the image is dropped and the remaining
    /// weights renormalized.
    pub fn blur(&self, kernel_size: u32, sigma: f32) -> RasterMask {
        if self.is_empty() {
            return RasterMask::empty();
        }
        let mut size = kernel_size.max(3);
        if size % 2 == 0 {
            size += 1;
        }
        let sigma = if sigma > 0.0 { sigma } else { size as f32 / 6.0 };
        let half = (size / 2) as i32;
        let weights: Vec<f32> = (-half..=half)
            .map(|i| (-((i * i) as f32) / (2.0 * sigma * sigma)).exp())
            .collect();

        let horizontal = self.blur_pass(&weights, half, true);
        horizontal.blur_pass(&weights, half, false)
    }

    fn blur_pass(&self, weights: &[f32], half: i32, horizontal: bool) -> RasterMask {
        let width = self.width() as i32;
        let height = self.height() as i32;
        let mut out = RasterMask::new(self.width(), self.height());
        for y in 0..height {
            for x in 0..width {
                let mut sum = 0.0;
                let mut weight_sum = 0.0;
                for (k, &w) in weights.iter().enumerate() {
                    let offset = k as i32 - half;
                    let (sx, sy) = if horizontal {
                        (x + offset, y)
                    } else {
                        (x, y + offset)
                    };
                    if sx < 0 || sy < 0 || sx >= width || sy >= height {
                        continue;
                    }
                    sum += self.get(sx as u32, sy as u32) * w;
                    weight_sum += w;
                }
                let value = if weight_sum > 0.0 { sum / weight_sum } else { 0.0 };
                out.put(x as u32, y as u32, value);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::area;

    #[test]
    fn test_erode_shrinks_area() {
        let mask = RasterMask::circular(16, 16, 0.0);
        let eroded = mask.erode(1);
        assert!(area(&eroded, 0.5) < area(&mask, 0.5));
    }

    #[test]
    fn test_dilate_never_decreases_area() {
        let mask = RasterMask::circular(16, 16, 0.0);
        let dilated = mask.dilate(1);
        assert!(area(&dilated, 0.5) >= area(&mask, 0.5));
    }

    #[test]
    fn test_close_never_exceeds_dilated_bound() {
        let mask = RasterMask::circular(16, 16, 0.0);
        let closed = mask.dilate(1).erode(1);
        // Morphological closing can fill concavities but the round trip
        // must not keep growing past the dilation.
        assert!(area(&closed, 0.5) <= area(&mask.dilate(1), 0.5));
        assert!(area(&closed, 0.5) >= area(&mask, 0.5));
    }

    #[test]
    fn test_dilate_snapshot_semantics() {
        // One pass over a single pixel yields exactly the plus shape.
        // In-place updates would smear the pixel across the scan order.
        let mut data = vec![0.0; 25];
        data[2 * 5 + 2] = 1.0;
        let point = RasterMask::from_data(5, 5, data);
        let dilated = point.dilate(1);
        assert_eq!(area(&dilated, 0.5), 5);
        assert_eq!(dilated.get(2, 2), 1.0);
        assert_eq!(dilated.get(3, 2), 1.0);
        assert_eq!(dilated.get(4, 2), 0.0);
    }

    #[test]
    fn test_border_pixel_not_eroded_from_outside() {
        let solid = RasterMask::solid(4, 4);
        let eroded = solid.erode(1);
        // Out-of-bounds neighbors are absent, so the solid mask survives.
        assert_eq!(area(&eroded, 0.5), 16);
    }

    #[test]
    fn test_blur_preserves_solid_interior() {
        let solid = RasterMask::solid(9, 9);
        let blurred = solid.blur(3, 1.0);
        // Renormalized border weights keep a constant field constant.
        assert!(blurred.data().iter().all(|&a| (a - 1.0).abs() < 1e-5));
    }

    #[test]
    fn test_blur_spreads_point() {
        let mut data = vec![0.0; 49];
        data[3 * 7 + 3] = 1.0;
        let point = RasterMask::from_data(7, 7, data);
        let blurred = point.blur(5, 1.0);
        assert!(blurred.get(3, 3) < 1.0);
        assert!(blurred.get(2, 3) > 0.0);
        assert!(blurred.get(3, 2) > 0.0);
    }

    #[test]
    fn test_blur_forces_odd_kernel() {
        let mask = RasterMask::circular(8, 8, 0.0);
        // Even and zero kernel sizes are coerced; both must run without
        // changing dimensions.
        assert_eq!(mask.blur(4, 1.0).width(), 8);
        assert_eq!(mask.blur(0, 1.0).width(), 8);
    }
}

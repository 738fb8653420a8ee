//! Ordered feature compositing into a height field.

use std::sync::Arc;

use raster::HeightField;
use terrain_kit_common::{InstrumentationSink, OpCategory, PixelRect};

use crate::classify::BlendClass;
use crate::feature::Feature;

/// Sampled mask alpha below this writes nothing.
const ALPHA_CUTOFF: f32 = 0.01;

/// Composites features into a single heightmap. Features paint in
/// ascending elevation order so higher features overwrite lower ones,
/// each through its own label-driven blend policy, followed by one 3x3
/// box-blur smoothing pass.
pub struct HeightmapCompositor {
    width: u32,
    height: u32,
    sink: Option<Arc<dyn InstrumentationSink>>,
}

impl HeightmapCompositor {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            sink: None,
        }
    }

    pub fn with_instrumentation(mut self, sink: Arc<dyn InstrumentationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn composite(&self, features: &[Feature]) -> HeightField {
        if let Some(sink) = &self.sink {
            sink.begin_op("composite_heightmap", OpCategory::Compositing);
        }

        let mut field = HeightField::new(self.width, self.height);
        let target_rect = PixelRect::of_image(self.width, self.height);

        // Lower features first; higher ones paint over them.
        let mut order: Vec<&Feature> = features.iter().collect();
        order.sort_by(|a, b| {
            a.elevation
                .partial_cmp(&b.elevation)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for feature in order {
            let Some(rect) = feature.bounds.intersect(&target_rect) else {
                tracing::debug!(label = %feature.label, "feature outside target, skipped");
                continue;
            };
            let class = BlendClass::from_label(&feature.label);
            for y in rect.y..rect.y + rect.height as i32 {
                for x in rect.x..rect.x + rect.width as i32 {
                    // Feature-local UV across the feature's bounding box.
                    let u = (x - feature.bounds.x) as f32 / feature.bounds.width as f32;
                    let v = (y - feature.bounds.y) as f32 / feature.bounds.height as f32;
                    let alpha = feature.mask.sample_normalized(u, v);
                    if alpha < ALPHA_CUTOFF {
                        continue;
                    }
                    let current = field.get(x as u32, y as u32);
                    field.set(x as u32, y as u32, class.blend(current, feature.elevation, alpha));
                }
            }
        }

        let smoothed = box_blur_3x3(&field);
        if let Some(sink) = &self.sink {
            sink.end_op("composite_heightmap", OpCategory::Compositing);
        }
        smoothed
    }
}

/// Single 3x3 box-blur pass; border taps outside the image are dropped
/// and the average renormalized.
fn box_blur_3x3(field: &HeightField) -> HeightField {
    let width = field.width() as i32;
    let height = field.height() as i32;
    let mut out = HeightField::new(field.width(), field.height());
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0;
            let mut count = 0u32;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let nx = x + dx;
                    let ny = y + dy;
                    if nx < 0 || ny < 0 || nx >= width || ny >= height {
                        continue;
                    }
                    sum += field.get(nx as u32, ny as u32);
                    count += 1;
                }
            }
            out.set(x as u32, y as u32, sum / count as f32);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use raster::RasterMask;

    fn half_mask(left: bool) -> RasterMask {
        let mut data = vec![0.0; 32 * 32];
        for y in 0..32 {
            for x in 0..32 {
                let in_half = if left { x < 16 } else { x >= 16 };
                if in_half {
                    data[y * 32 + x] = 1.0;
                }
            }
        }
        RasterMask::from_data(32, 32, data)
    }

    fn lake_and_mountain() -> (Feature, Feature) {
        let bounds = PixelRect::of_image(32, 32);
        let lake = Feature::new(half_mask(true), bounds, "Lake", 0.1);
        let mountain = Feature::new(half_mask(false), bounds, "Mountain", 0.9);
        (lake, mountain)
    }

    #[test]
    fn test_lake_and_mountain_order_independent() {
        let (lake, mountain) = lake_and_mountain();
        let compositor = HeightmapCompositor::new(32, 32);

        for features in [
            vec![lake.clone(), mountain.clone()],
            vec![mountain, lake],
        ] {
            let field = compositor.composite(&features);
            // Sample well inside each footprint, away from the blurred seam.
            assert!(field.get(4, 16) <= 0.1 + 1e-4, "lake = {}", field.get(4, 16));
            assert!(field.get(28, 16) >= 0.9 - 1e-4, "mountain = {}", field.get(28, 16));
        }
    }

    #[test]
    fn test_plain_labels_lerp() {
        let bounds = PixelRect::of_image(16, 16);
        let meadow = Feature::new(RasterMask::solid(16, 16), bounds, "meadow", 0.6);
        let field = HeightmapCompositor::new(16, 16).composite(&[meadow]);
        assert!((field.get(8, 8) - 0.6).abs() < 1e-4);
    }

    #[test]
    fn test_higher_feature_paints_over_lower() {
        let bounds = PixelRect::of_image(16, 16);
        let low = Feature::new(RasterMask::solid(16, 16), bounds, "plain", 0.3);
        let high = Feature::new(RasterMask::solid(16, 16), bounds, "plateau", 0.7);
        // Input order reversed relative to elevation.
        let field = HeightmapCompositor::new(16, 16).composite(&[high, low]);
        assert!((field.get(8, 8) - 0.7).abs() < 1e-4);
    }

    #[test]
    fn test_transparent_pixels_skipped() {
        let bounds = PixelRect::of_image(16, 16);
        let ghost = Feature::new(RasterMask::new(16, 16), bounds, "plain", 0.8);
        let field = HeightmapCompositor::new(16, 16).composite(&[ghost]);
        assert_eq!(field.get(8, 8), 0.0);
    }

    #[test]
    fn test_feature_outside_target_ignored() {
        let off = Feature::new(
            RasterMask::solid(8, 8),
            PixelRect::new(100, 100, 8, 8),
            "plain",
            0.5,
        );
        let field = HeightmapCompositor::new(16, 16).composite(&[off]);
        assert!(field.data().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_smoothing_bounds_preserved() {
        let bounds = PixelRect::of_image(16, 16);
        let plateau = Feature::new(RasterMask::solid(16, 16), bounds, "mesa", 1.0);
        let field = HeightmapCompositor::new(16, 16).composite(&[plateau]);
        // A constant field stays constant through the renormalized blur.
        assert!(field.data().iter().all(|&h| (h - 1.0).abs() < 1e-4));
    }
}

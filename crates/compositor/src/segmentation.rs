//! Ordered segment compositing into a color segmentation map.

use std::sync::Arc;

use terrain_kit_common::{InstrumentationSink, OpCategory, PixelRect};

use crate::color::{ColorTable, Rgba};
use crate::feature::{Segment, SegmentKind};

const ALPHA_CUTOFF: f32 = 0.01;

/// RGBA raster accumulating segment colors.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationMap {
    width: u32,
    height: u32,
    data: Vec<Rgba>,
}

impl SegmentationMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![Rgba::TRANSPARENT; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[Rgba] {
        &self.data
    }

    pub fn get(&self, x: u32, y: u32) -> Rgba {
        if x >= self.width || y >= self.height {
            return Rgba::TRANSPARENT;
        }
        self.data[(y * self.width + x) as usize]
    }

    fn put(&mut self, x: u32, y: u32, color: Rgba) {
        self.data[(y * self.width + x) as usize] = color;
    }
}

/// Composites segments back to front: terrain segments first (ascending
/// area within the group), then objects (ascending area), so foreground
/// objects overwrite terrain backgrounds. Colorless segments get a
/// deterministic color from the label table.
pub struct SegmentationCompositor {
    width: u32,
    height: u32,
    sink: Option<Arc<dyn InstrumentationSink>>,
}

impl SegmentationCompositor {
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

    pub fn composite(&self, segments: &[Segment]) -> SegmentationMap {
        if let Some(sink) = &self.sink {
            sink.begin_op("composite_segmentation", OpCategory::Compositing);
        }

        let mut map = SegmentationMap::new(self.width, self.height);
        let target_rect = PixelRect::of_image(self.width, self.height);
        let mut colors = ColorTable::new();

        let mut order: Vec<&Segment> = segments.iter().collect();
        order.sort_by(|a, b| {
            let group = |s: &Segment| match s.kind {
                SegmentKind::Terrain => 0u8,
                SegmentKind::Object => 1u8,
            };
            group(a).cmp(&group(b)).then(
                a.area
                    .partial_cmp(&b.area)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
        });

        for segment in order {
            let Some(rect) = segment.bounds.intersect(&target_rect) else {
                continue;
            };
            let color = segment
                .color
                .unwrap_or_else(|| colors.color_for(&segment.label, segment.kind));
            for y in rect.y..rect.y + rect.height as i32 {
                for x in rect.x..rect.x + rect.width as i32 {
                    let u = (x - segment.bounds.x) as f32 / segment.bounds.width as f32;
                    let v = (y - segment.bounds.y) as f32 / segment.bounds.height as f32;
                    let mask_alpha = segment.mask.sample_normalized(u, v);
                    let src_alpha = color.a * mask_alpha;
                    if src_alpha < ALPHA_CUTOFF {
                        continue;
                    }
                    let current = map.get(x as u32, y as u32);
                    let result_alpha = src_alpha + current.a * (1.0 - src_alpha);
                    if result_alpha < ALPHA_CUTOFF {
                        continue;
                    }
                    // Alpha-weighted average of the premultiplied colors.
                    let weight_current = current.a * (1.0 - src_alpha);
                    let blended = Rgba::new(
                        (color.r * src_alpha + current.r * weight_current) / result_alpha,
                        (color.g * src_alpha + current.g * weight_current) / result_alpha,
                        (color.b * src_alpha + current.b * weight_current) / result_alpha,
                        result_alpha,
                    );
                    map.put(x as u32, y as u32, blended);
                }
            }
        }

        if let Some(sink) = &self.sink {
            sink.end_op("composite_segmentation", OpCategory::Compositing);
        }
        map
    }
}

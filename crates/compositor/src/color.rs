//! Colors and the deterministic label-class color table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::feature::SegmentKind;

/// Straight (non-premultiplied) RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }
}

/// Assigns a deterministic color per label, stable for the lifetime of
/// the table (one compositing run). Terrain and object labels draw hues
/// from disjoint ranges so the two families stay visually separable.
#[derive(Debug, Default)]
pub struct ColorTable {
    assigned: HashMap<String, Rgba>,
}

impl ColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color_for(&mut self, label: &str, kind: SegmentKind) -> Rgba {
        if let Some(&color) = self.assigned.get(label) {
            return color;
        }
        let hash = fnv1a(label.as_bytes());
        let unit = (hash % 1024) as f32 / 1024.0;
        let hue = match kind {
            // Greens through blues for terrain, magentas through oranges
            // for objects.
            SegmentKind::Terrain => 80.0 + unit * 140.0,
            SegmentKind::Object => (260.0 + unit * 160.0) % 360.0,
        };
        let color = hsv_to_rgb(hue, 0.65, 0.9);
        self.assigned.insert(label.to_string(), color);
        color
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = 0xcbf29ce484222325u64;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> Rgba {
    let c = value * saturation;
    let h = (hue % 360.0) / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = value - c;
    Rgba::opaque(r + m, g + m, b + m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_per_label() {
        let mut table = ColorTable::new();
        let first = table.color_for("forest", SegmentKind::Terrain);
        let second = table.color_for("forest", SegmentKind::Terrain);
        assert_eq!(first, second);
    }

    #[test]
    fn test_distinct_labels_distinct_colors() {
        let mut table = ColorTable::new();
        let forest = table.color_for("forest", SegmentKind::Terrain);
        let desert = table.color_for("desert", SegmentKind::Terrain);
        assert_ne!(forest, desert);
    }

    #[test]
    fn test_colors_are_opaque_and_clamped() {
        let mut table = ColorTable::new();
        for label in ["rock", "tree", "house", "river"] {
            let c = table.color_for(label, SegmentKind::Object);
            assert_eq!(c.a, 1.0);
            for ch in [c.r, c.g, c.b] {
                assert!((0.0..=1.0).contains(&ch));
            }
        }
    }
}

//! Mask analysis: similarity metrics and geometric summaries.
//!
//! Degenerate inputs never raise here; zero-dimension masks report
//! all-zero metrics and empty masks fall back to documented defaults
//! (image center, full-image rect), matching the best-effort policy of
//! the rest of the pipeline.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use terrain_kit_common::PixelRect;

use crate::mask::RasterMask;
use crate::resample::{BilinearResampler, Resampler};

const THRESHOLD: f32 = 0.5;

/// Overlap metrics between two masks, computed at threshold 0.5.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimilarityReport {
    pub iou: f32,
    pub dice: f32,
    pub precision: f32,
    pub recall: f32,
}

/// Intersection-over-union of two masks in `[0, 1]`.
pub fn similarity(a: &RasterMask, b: &RasterMask) -> f32 {
    detailed_similarity(a, b).iou
}

/// Full overlap report. The second mask is resampled to the first's
/// dimensions before counting. Zero-dimension inputs yield all zeros;
/// two valid masks with an empty union are reported as identical.
pub fn detailed_similarity(a: &RasterMask, b: &RasterMask) -> SimilarityReport {
    if a.is_empty() || b.is_empty() {
        return SimilarityReport::default();
    }
    let resampled;
    let b = if b.width() != a.width() || b.height() != a.height() {
        resampled = BilinearResampler.resample(b, a.width(), a.height());
        &resampled
    } else {
        b
    };

    let mut tp = 0u64;
    let mut fp = 0u64;
    let mut fn_ = 0u64;
    for (&va, &vb) in a.data().iter().zip(b.data()) {
        match (va >= THRESHOLD, vb >= THRESHOLD) {
            (true, true) => tp += 1,
            (false, true) => fp += 1,
            (true, false) => fn_ += 1,
            (false, false) => {}
        }
    }

    let union = tp + fp + fn_;
    if union == 0 {
        return SimilarityReport {
            iou: 1.0,
            dice: 1.0,
            precision: 1.0,
            recall: 1.0,
        };
    }
    let ratio = |num: u64, den: u64| if den == 0 { 0.0 } else { num as f32 / den as f32 };
    SimilarityReport {
        iou: ratio(tp, union),
        dice: ratio(2 * tp, 2 * tp + fp + fn_),
        precision: ratio(tp, tp + fp),
        recall: ratio(tp, tp + fn_),
    }
}

/// Alpha-weighted centroid, normalized to `[0, 1]^2`. A mask with zero
/// total weight reports the image center.
pub fn center_of_mass(mask: &RasterMask) -> Vec2 {
    if mask.is_empty() {
        return Vec2::splat(0.5);
    }
    let mut total = 0.0f64;
    let mut sum_x = 0.0f64;
    let mut sum_y = 0.0f64;
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            let a = mask.get(x, y) as f64;
            total += a;
            sum_x += a * (x as f64 + 0.5);
            sum_y += a * (y as f64 + 0.5);
        }
    }
    if total <= 0.0 {
        return Vec2::splat(0.5);
    }
    Vec2::new(
        (sum_x / total / mask.width() as f64) as f32,
        (sum_y / total / mask.height() as f64) as f32,
    )
}

/// Tight pixel-space box over pixels at or above `threshold`. An empty
/// mask returns the full image rect.
pub fn bounding_box(mask: &RasterMask, threshold: f32) -> PixelRect {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut found = false;
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if mask.get(x, y) >= threshold {
                found = true;
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }
    }
    if !found {
        return PixelRect::of_image(mask.width(), mask.height());
    }
    PixelRect::new(
        min_x as i32,
        min_y as i32,
        max_x - min_x + 1,
        max_y - min_y + 1,
    )
}

/// Principal-axis angle in degrees from the alpha-weighted covariance
/// about the centroid. Degenerate (symmetric) masks report 0.
pub fn orientation_degrees(mask: &RasterMask) -> f32 {
    if mask.is_empty() {
        return 0.0;
    }
    let centroid = center_of_mass(mask);
    let cx = centroid.x * mask.width() as f32;
    let cy = centroid.y * mask.height() as f32;

    let mut mxx = 0.0f64;
    let mut myy = 0.0f64;
    let mut mxy = 0.0f64;
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            let a = mask.get(x, y) as f64;
            if a <= 0.0 {
                continue;
            }
            let dx = (x as f32 + 0.5 - cx) as f64;
            let dy = (y as f32 + 0.5 - cy) as f64;
            mxx += a * dx * dx;
            myy += a * dy * dy;
            mxy += a * dx * dy;
        }
    }

    // Degeneracy is judged relative to the total spread so that large
    // symmetric masks with float residue still report "no axis".
    let scale = (mxx + myy).max(f64::MIN_POSITIVE);
    if (mxy / scale).abs() < 1e-4 && ((mxx - myy) / scale).abs() < 1e-4 {
        return 0.0;
    }
    (0.5 * (2.0 * mxy).atan2(mxx - myy)).to_degrees() as f32
}

/// Count of pixels at or above `threshold`.
pub fn area(mask: &RasterMask, threshold: f32) -> usize {
    mask.data().iter().filter(|&&a| a >= threshold).count()
}

/// Count of above-threshold pixels with at least one 4-neighbor below
/// threshold. Out-of-bounds neighbors count as below threshold, so the
/// image edge is always part of the perimeter.
pub fn perimeter(mask: &RasterMask, threshold: f32) -> usize {
    let width = mask.width() as i32;
    let height = mask.height() as i32;
    let mut count = 0;
    for y in 0..height {
        for x in 0..width {
            if mask.get(x as u32, y as u32) < threshold {
                continue;
            }
            let boundary = [(1, 0), (-1, 0), (0, 1), (0, -1)].iter().any(|(dx, dy)| {
                let nx = x + dx;
                let ny = y + dy;
                if nx < 0 || ny < 0 || nx >= width || ny >= height {
                    return true;
                }
                mask.get(nx as u32, ny as u32) < threshold
            });
            if boundary {
                count += 1;
            }
        }
    }
    count
}

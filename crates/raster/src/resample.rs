//! Bilinear resampling behind an interface.
//!
//! The host engine's GPU resampling is out of scope; everything in this
//! workspace goes through [`Resampler`] so a host can substitute its own
//! implementation.

use crate::mask::RasterMask;

/// Resamples a mask to new dimensions with bilinear filtering.
pub trait Resampler: Send + Sync {
    fn resample(&self, mask: &RasterMask, width: u32, height: u32) -> RasterMask;
}

/// CPU bilinear resampler used by default throughout the workspace.
#[derive(Debug, Clone, Copy, Default)]
pub struct BilinearResampler;

impl Resampler for BilinearResampler {
    fn resample(&self, mask: &RasterMask, width: u32, height: u32) -> RasterMask {
        if mask.is_empty() || width == 0 || height == 0 {
            return RasterMask::empty();
        }
        if width == mask.width() && height == mask.height() {
            return mask.clone();
        }
        let mut out = RasterMask::new(width, height);
        for y in 0..height {
            let v = (y as f32 + 0.5) / height as f32;
            for x in 0..width {
                let u = (x as f32 + 0.5) / width as f32;
                out.put(x, y, mask.sample_normalized(u, v));
            }
        }
        out
    }
}

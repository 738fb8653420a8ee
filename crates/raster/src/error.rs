use thiserror::Error;

/// Errors for true contract violations. Best-effort raster operations
/// degrade to safe defaults instead of constructing one of these.
#[derive(Error, Debug)]
pub enum RasterError {
    #[error("polygon mask requires at least 3 points, got {0}")]
    PolygonTooFewPoints(usize),

    #[error("channel index {0} out of range (expected 0..=3)")]
    ChannelOutOfRange(usize),
}

pub type Result<T> = std::result::Result<T, RasterError>;

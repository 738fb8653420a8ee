//! Label-driven blend policy.

use strum::{Display, EnumIter};

/// How a feature's height blends into the accumulated field, chosen by
/// case-insensitive substring match on the feature label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum BlendClass {
    /// Water bodies carve downward: `min(current, feature)` by alpha.
    Depression,
    /// Mountains and hills push upward: `max(current, feature)` by alpha.
    Elevation,
    /// Everything else interpolates toward the feature height.
    Blend,
}

const DEPRESSION_LABELS: [&str; 4] = ["water", "river", "lake", "ocean"];
const ELEVATION_LABELS: [&str; 2] = ["mountain", "hill"];

impl BlendClass {
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        if DEPRESSION_LABELS.iter().any(|k| lower.contains(k)) {
            return BlendClass::Depression;
        }
        if ELEVATION_LABELS.iter().any(|k| lower.contains(k)) {
            return BlendClass::Elevation;
        }
        BlendClass::Blend
    }

    /// Alpha-weighted blend of the feature height against the current
    /// field value.
    pub fn blend(self, current: f32, feature_height: f32, alpha: f32) -> f32 {
        let target = match self {
            BlendClass::Depression => current.min(feature_height),
            BlendClass::Elevation => current.max(feature_height),
            BlendClass::Blend => feature_height,
        };
        current + (target - current) * alpha
    }
}

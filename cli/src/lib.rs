//! Scene configuration for the terrain CLI: a JSON description of the
//! features to composite, with mask images referenced by path.

use std::fs;
use std::path::{Path, PathBuf};

use compositor::{Feature, Rgba, Segment, SegmentKind};
use raster::RasterMask;
use serde::{Deserialize, Serialize};
use terrain_kit_common::PixelRect;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to load mask image {path}: {source}")]
    MaskImage {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("scene has no features")]
    EmptyScene,
    #[error("invalid channel or polygon input: {0}")]
    Raster(#[from] raster::RasterError),
}

/// One feature entry in a scene file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Path to the mask image; its luminance becomes the mask alpha.
    pub mask: PathBuf,
    pub label: String,
    /// Normalized elevation in [0, 1].
    #[serde(default)]
    pub elevation: f32,
    /// Placement [x, y, width, height] in target pixels; defaults to the
    /// full target.
    #[serde(default)]
    pub bounds: Option<[i32; 4]>,
    /// Straight RGBA color components in [0, 1].
    #[serde(default)]
    pub color: Option<[f32; 4]>,
    /// Marks the feature as a foreground object in the segmentation map.
    #[serde(default)]
    pub object: bool,
}

/// Scene description consumed by `terrain-cli composite`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    pub width: u32,
    pub height: u32,
    pub features: Vec<FeatureConfig>,
}

impl SceneConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let text = fs::read_to_string(path)?;
        let scene: SceneConfig = serde_json::from_str(&text)?;
        if scene.features.is_empty() {
            return Err(SceneError::EmptyScene);
        }
        Ok(scene)
    }

    fn resolve_bounds(&self, config: &FeatureConfig) -> PixelRect {
        match config.bounds {
            Some([x, y, w, h]) => PixelRect::new(x, y, w.max(0) as u32, h.max(0) as u32),
            None => PixelRect::of_image(self.width, self.height),
        }
    }

    /// Load every mask and build heightmap features.
    pub fn load_features(&self) -> Result<Vec<Feature>, SceneError> {
        self.features
            .iter()
            .map(|config| {
                let mask = load_mask(&config.mask)?;
                let mut feature =
                    Feature::new(mask, self.resolve_bounds(config), &config.label, config.elevation);
                if let Some([r, g, b, a]) = config.color {
                    feature = feature.with_color(Rgba::new(r, g, b, a));
                }
                Ok(feature)
            })
            .collect()
    }

    /// Load every mask and build segmentation segments. Area comes from
    /// the mask's above-threshold coverage.
    pub fn load_segments(&self) -> Result<Vec<Segment>, SceneError> {
        self.features
            .iter()
            .map(|config| {
                let mask = load_mask(&config.mask)?;
                let area = raster::analysis::area(&mask, 0.5) as f32;
                let kind = if config.object {
                    SegmentKind::Object
                } else {
                    SegmentKind::Terrain
                };
                let mut segment = Segment::new(
                    mask,
                    self.resolve_bounds(config),
                    &config.label,
                    area,
                    kind,
                );
                if let Some([r, g, b, a]) = config.color {
                    segment = segment.with_color(Rgba::new(r, g, b, a));
                }
                Ok(segment)
            })
            .collect()
    }
}

/// Load an image as a mask from its red channel (grayscale images store
/// luminance there).
pub fn load_mask(path: &Path) -> Result<RasterMask, SceneError> {
    let img = image::open(path).map_err(|source| SceneError::MaskImage {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(RasterMask::extract_channel(&img, 0)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_parses() {
        let json = r#"{
            "width": 64,
            "height": 64,
            "features": [
                {"mask": "lake.png", "label": "Lake", "elevation": 0.1},
                {"mask": "rock.png", "label": "rock", "object": true,
                 "bounds": [4, 4, 8, 8], "color": [1.0, 0.0, 0.0, 1.0]}
            ]
        }"#;
        let scene: SceneConfig = serde_json::from_str(json).unwrap();
        assert_eq!(scene.features.len(), 2);
        assert_eq!(scene.features[0].label, "Lake");
        assert!(scene.features[1].object);
        assert_eq!(scene.resolve_bounds(&scene.features[1]), PixelRect::new(4, 4, 8, 8));
        assert_eq!(
            scene.resolve_bounds(&scene.features[0]),
            PixelRect::of_image(64, 64)
        );
    }

    #[test]
    fn test_empty_scene_rejected() {
        let path = std::env::temp_dir().join("terrain_cli_empty_scene.json");
        fs::write(&path, r#"{"width": 8, "height": 8, "features": []}"#).unwrap();
        let result = SceneConfig::from_file(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(SceneError::EmptyScene)));
    }
}

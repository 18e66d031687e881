//! Crop settings exposed to the host: guidelines, aspect ratio and radii.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CropError, Result};

/// When the rule-of-thirds guidelines are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidelineMode {
    Off,
    /// Only while a handle is pressed.
    #[default]
    OnTouch,
    On,
}

impl GuidelineMode {
    pub const ALL: [GuidelineMode; 3] = [GuidelineMode::Off, GuidelineMode::OnTouch, GuidelineMode::On];
}

impl TryFrom<i32> for GuidelineMode {
    type Error = CropError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(GuidelineMode::Off),
            1 => Ok(GuidelineMode::OnTouch),
            2 => Ok(GuidelineMode::On),
            other => Err(CropError::InvalidGuidelines(other)),
        }
    }
}

impl From<GuidelineMode> for i32 {
    fn from(mode: GuidelineMode) -> Self {
        match mode {
            GuidelineMode::Off => 0,
            GuidelineMode::OnTouch => 1,
            GuidelineMode::On => 2,
        }
    }
}

impl fmt::Display for GuidelineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GuidelineMode::Off => "Off",
            GuidelineMode::OnTouch => "On touch",
            GuidelineMode::On => "On",
        };
        write!(f, "{}", s)
    }
}

pub const DEFAULT_SNAP_RADIUS_PX: f32 = 6.0;
/// Half the 48px touch target recommended for handles.
pub const DEFAULT_HANDLE_RADIUS_PX: f32 = 24.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    pub guidelines: GuidelineMode,
    pub fixed_aspect_ratio: bool,
    pub aspect_ratio_x: i32,
    pub aspect_ratio_y: i32,
    /// Distance at which a dragged edge snaps onto the image border.
    pub snap_radius: f32,
    /// Half-width of the square touch zone around each handle.
    pub handle_radius: f32,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            guidelines: GuidelineMode::OnTouch,
            fixed_aspect_ratio: true,
            aspect_ratio_x: 1,
            aspect_ratio_y: 1,
            snap_radius: DEFAULT_SNAP_RADIUS_PX,
            handle_radius: DEFAULT_HANDLE_RADIUS_PX,
        }
    }
}

impl CropConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CropError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: CropConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_aspect_ratio('x', self.aspect_ratio_x)?;
        validate_aspect_ratio('y', self.aspect_ratio_y)?;
        validate_radius("snap_radius", self.snap_radius)?;
        validate_radius("handle_radius", self.handle_radius)?;
        Ok(())
    }

    pub fn target_aspect_ratio(&self) -> f32 {
        self.aspect_ratio_x as f32 / self.aspect_ratio_y as f32
    }
}

pub(crate) fn validate_aspect_ratio(axis: char, value: i32) -> Result<i32> {
    if value <= 0 {
        return Err(CropError::InvalidAspectRatio { axis, value });
    }
    Ok(value)
}

pub(crate) fn validate_radius(name: &'static str, value: f32) -> Result<f32> {
    if !value.is_finite() || value < 0.0 {
        return Err(CropError::InvalidRadius { name, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guideline_range_is_zero_to_two() {
        assert_eq!(GuidelineMode::try_from(0).ok(), Some(GuidelineMode::Off));
        assert_eq!(GuidelineMode::try_from(2).ok(), Some(GuidelineMode::On));
        assert!(matches!(
            GuidelineMode::try_from(3),
            Err(CropError::InvalidGuidelines(3))
        ));
        assert!(GuidelineMode::try_from(-1).is_err());
        for mode in GuidelineMode::ALL {
            assert_eq!(GuidelineMode::try_from(i32::from(mode)).ok(), Some(mode));
        }
    }

    #[test]
    fn defaults_are_a_fixed_square() {
        let config = CropConfig::default();
        assert!(config.fixed_aspect_ratio);
        assert_eq!(config.target_aspect_ratio(), 1.0);
        assert_eq!(config.guidelines, GuidelineMode::OnTouch);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = CropConfig::from_json(r#"{ "aspect_ratio_x": 16, "aspect_ratio_y": 9, "guidelines": "on" }"#)
            .expect("valid config");
        assert_eq!(config.guidelines, GuidelineMode::On);
        assert!((config.target_aspect_ratio() - 16.0 / 9.0).abs() < 1e-6);
        assert_eq!(config.snap_radius, DEFAULT_SNAP_RADIUS_PX);
    }

    #[test]
    fn invalid_json_values_are_rejected() {
        let err = CropConfig::from_json(r#"{ "aspect_ratio_y": 0 }"#).unwrap_err();
        assert!(matches!(err, CropError::InvalidAspectRatio { axis: 'y', value: 0 }));
        assert!(err.is_invalid_configuration());

        let err = CropConfig::from_json(r#"{ "snap_radius": -2.0 }"#).unwrap_err();
        assert!(matches!(err, CropError::InvalidRadius { name: "snap_radius", .. }));

        let err = CropConfig::from_json(r#"{ "guidelines": "sometimes" }"#).unwrap_err();
        assert!(matches!(err, CropError::ParseConfig(_)));
        assert!(!err.is_invalid_configuration());
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("crop.json");
        std::fs::write(&path, r#"{ "fixed_aspect_ratio": false }"#).expect("write config");

        let config = CropConfig::load(&path).expect("load config");
        assert!(!config.fixed_aspect_ratio);

        let missing = CropConfig::load(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(CropError::ReadConfig { .. })));
    }
}

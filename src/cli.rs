//! Command line interface for the circle cropper.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{CropConfig, GuidelineMode};
use crate::error::Result;

/// Circle cropper CLI arguments
///
/// Examples:
///   circle-cropper                          # Start with an empty canvas
///   circle-cropper photo.jpg                # Open an image right away
///   circle-cropper --config crop.json       # Load settings from a file
///   circle-cropper --free --guidelines 2    # Free window, guidelines always on
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "circle-cropper",
    version,
    about = "Crop images to a circle with a draggable crop window"
)]
pub struct CliArgs {
    /// Image to open on startup
    pub image: Option<PathBuf>,

    /// JSON file with crop settings
    ///
    /// Keys left out keep their defaults. Flags given on the command line
    /// override the file.
    #[clap(long = "config", short = 'c')]
    pub config: Option<PathBuf>,

    /// Horizontal part of the locked aspect ratio
    #[clap(long = "aspect-x", short = 'x')]
    pub aspect_ratio_x: Option<i32>,

    /// Vertical part of the locked aspect ratio
    #[clap(long = "aspect-y", short = 'y')]
    pub aspect_ratio_y: Option<i32>,

    /// Lock the aspect ratio
    #[clap(long, conflicts_with = "free")]
    pub fixed: bool,

    /// Let width and height change independently
    #[clap(long)]
    pub free: bool,

    /// Guidelines: 0 = off, 1 = while dragging, 2 = always
    #[clap(long = "guidelines", short = 'g')]
    pub guidelines: Option<i32>,
}

impl CliArgs {
    /// Settings from the config file (or defaults) with command line
    /// overrides applied, validated as a whole.
    pub fn crop_config(&self) -> Result<CropConfig> {
        let mut config = match &self.config {
            Some(path) => CropConfig::load(path)?,
            None => CropConfig::default(),
        };

        if let Some(x) = self.aspect_ratio_x {
            config.aspect_ratio_x = x;
        }
        if let Some(y) = self.aspect_ratio_y {
            config.aspect_ratio_y = y;
        }
        if self.fixed {
            config.fixed_aspect_ratio = true;
        }
        if self.free {
            config.fixed_aspect_ratio = false;
        }
        if let Some(guidelines) = self.guidelines {
            config.guidelines = GuidelineMode::try_from(guidelines)?;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CropError;

    #[test]
    fn flags_override_defaults() {
        let args = CliArgs::parse_from(["circle-cropper", "--free", "-x", "16", "-y", "9", "-g", "2"]);
        let config = args.crop_config().expect("valid flags");
        assert!(!config.fixed_aspect_ratio);
        assert_eq!((config.aspect_ratio_x, config.aspect_ratio_y), (16, 9));
        assert_eq!(config.guidelines, GuidelineMode::On);
    }

    #[test]
    fn flags_override_the_config_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("crop.json");
        std::fs::write(&path, r#"{ "fixed_aspect_ratio": false, "aspect_ratio_x": 3, "aspect_ratio_y": 2 }"#)
            .expect("write config");

        let args = CliArgs::parse_from([
            "circle-cropper".into(),
            "photo.png".into(),
            "--config".into(),
            path.into_os_string(),
            "--fixed".into(),
        ]);
        assert_eq!(args.image, Some(PathBuf::from("photo.png")));

        let config = args.crop_config().expect("valid config");
        assert!(config.fixed_aspect_ratio);
        assert_eq!((config.aspect_ratio_x, config.aspect_ratio_y), (3, 2));
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        let args = CliArgs::parse_from(["circle-cropper", "-g", "5"]);
        assert!(matches!(args.crop_config(), Err(CropError::InvalidGuidelines(5))));

        let args = CliArgs::parse_from(["circle-cropper", "--aspect-y", "0"]);
        assert!(matches!(
            args.crop_config(),
            Err(CropError::InvalidAspectRatio { axis: 'y', value: 0 })
        ));
    }

    #[test]
    fn fixed_and_free_conflict() {
        assert!(CliArgs::try_parse_from(["circle-cropper", "--fixed", "--free"]).is_err());
    }
}

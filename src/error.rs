use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CropError {
    #[error("Guideline value must be set between 0 and 2, got {0}")]
    InvalidGuidelines(i32),

    #[error("Aspect ratio {axis} must be greater than 0, got {value}")]
    InvalidAspectRatio { axis: char, value: i32 },

    #[error("{name} must be a finite, non-negative pixel distance, got {value}")]
    InvalidRadius { name: &'static str, value: f32 },

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),

    #[error("Failed to read {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed crop config: {0}")]
    ParseConfig(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl CropError {
    /// Rejected at a configuration setter; the previous value is kept.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(
            self,
            CropError::InvalidGuidelines(_)
                | CropError::InvalidAspectRatio { .. }
                | CropError::InvalidRadius { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CropError>;

//! Geometry engine behind the circle cropper: a crop window over a displayed
//! image, resized through nine handles with optional aspect-ratio lock,
//! snapping onto the image border and a minimum size.

pub mod aspect_ratio;
pub mod cli;
pub mod config;
pub mod edge;
pub mod edge_pair;
pub mod error;
pub mod export;
pub mod handle;
pub mod rect;
pub mod window;

pub use config::{CropConfig, GuidelineMode};
pub use edge::{CropEdges, Edge, EdgeKind, MIN_CROP_LENGTH_PX};
pub use edge_pair::EdgePair;
pub use error::{CropError, Result};
pub use handle::Handle;
pub use rect::Bounds;
pub use window::{CropSession, CropWindowState};

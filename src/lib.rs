pub mod arbiter;
pub mod canvas;
pub mod config;
pub mod encoder;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod prompt;
pub mod reflector;
pub mod studio;

pub use arbiter::{StudioEvent, StudioState};
pub use canvas::{DrawingSurface, PointerEvent, Raster, ScreenPoint, SurfaceEffect, Viewport};
pub use config::{GeminiConfig, StudioConfig};
pub use error::{Result, StudioError};
pub use gemini::{GeminiClient, ImageGenerator};
pub use models::*;
pub use reflector::{Affordances, ResultPanel, Snapshot};
pub use studio::{NullView, Studio, StudioView};

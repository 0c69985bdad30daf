pub mod outline;
pub mod raster;
pub mod surface;

pub use raster::{Raster, Rgba};
pub use surface::{
    CanvasPoint, DrawState, DrawingSurface, PointerEvent, ScreenPoint, Segment, SurfaceEffect,
    Viewport,
};

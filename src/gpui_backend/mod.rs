//! GPUI host for sketches.
//!
//! [`SketchView`] samples pointer and keyboard state, lets a [`Sketch`]
//! record one frame into a [`Surface`](crate::render::Surface) and paints
//! the recorded commands. [`run_sketch`] wraps it in a window.

mod config;
mod paint;
mod text;
mod view;

pub use config::SketchConfig;
pub use text::GpuiTextMeasurer;
pub use view::{Sketch, SketchView, run_sketch};

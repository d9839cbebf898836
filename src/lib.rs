//! gpui-sketchkit is an immediate-mode toolkit for GPUI sketches: widgets,
//! box layout and lightweight charts drawn once per frame.
//!
//! Everything draws through the [`Canvas`] trait. The headless [`Surface`]
//! records frames for tests and image output; with the `gpui` feature,
//! [`run_sketch`](gpui_backend::run_sketch) paints them in a window.

#![forbid(unsafe_code)]

pub mod axis;
pub mod error;
pub mod geom;
pub mod input;
pub mod layout;
pub mod legend;
pub mod logging;
pub mod plot;
pub mod range;
pub mod render;
pub mod series;
pub mod style;
pub mod text;
pub mod transform;
pub mod ui;
pub mod widget;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use axis::{
    AxisSpan, CategoricalTicks, NumberFormat, NumericTickOptions, Tick, categorical_ticks,
    numeric_ticks,
};
pub use error::{LayoutError, PlotError};
pub use geom::{ScreenPoint, ScreenRect};
pub use input::{FrameInput, Key, KeyEvent};
pub use layout::{Col, LayoutChild, OrganizerBuilder, OrganizerHandle, OrganizerState, Row};
pub use legend::{LegendOptions, legend, legend_size, legend_to_image};
pub use plot::{Plot, PlotBuilder, PlotLayout, ShowOptions, YAxisOptions};
pub use range::{Limits, Range};
pub use render::{
    Canvas, Color, FontId, HAlign, MatrixScope, RectMode, RenderCommand, RenderList, StyleScope,
    Surface, VAlign,
};
pub use series::{
    LineOptions, Marker, ScatterOptions, Series, SeriesColor, SeriesKind, YAxis, YValues,
};
pub use style::Theme;
pub use text::{MonospaceMetrics, TextMeasurer};
pub use transform::{AxisTransform, remap, remap_all};
pub use ui::{FocusScope, Ui};
pub use widget::{
    Button, Element, ElementStyle, Slider, TextInput, Toggle, ToggleLabels, Widget, WidgetHandle,
};

#[cfg(feature = "gpui")]
pub use gpui_backend::{GpuiTextMeasurer, Sketch, SketchConfig, SketchView, run_sketch};

//! Lag Render - Lagometer widget
//!
//! Paints the samples collected by `lag_metrics` as a two-series strip chart
//! (frame time and script time) with FPS, script time and dropped-frame
//! readouts, redrawn at a throttled rate.

pub mod canvas;
pub mod chart;
pub mod color;
pub mod config;
pub mod raster;
pub mod throttle;
pub mod widget;

pub use canvas::{Canvas, DisplayList, DrawCommand, PathCommand};
pub use chart::{series_path, ChartRenderer};
pub use color::{ColorParseError, Rgba};
pub use config::{ConfigError, LagometerConfig};
pub use raster::{PixelCanvas, TextLabel};
pub use throttle::DrawThrottle;
pub use widget::{FrameHooks, Lagometer};

pub use glam;
pub use lag_metrics;

//! chart-viewport: windowing and cursor core for multi-pane OHLC charts.
//!
//! The crate keeps a visible index window over an append-only bar series,
//! links any number of stacked panes on the x axis while auto-scaling each
//! pane's y axis to its visible data, and maps pointer and keyboard input to a
//! synchronized crosshair. Drawing is left to a `render::Renderer`.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEvent, ChartSession, ChartSessionConfig};
pub use error::{ChartError, ChartResult};

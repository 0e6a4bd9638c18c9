mod frame;
mod null_renderer;
mod overlay;

pub use frame::{PaneFrame, ViewportFrame};
pub use null_renderer::NullRenderer;
pub use overlay::{CrosshairLines, CursorOverlay, OverlayLabel};

use crate::error::ChartResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive a fully materialized `ViewportFrame` so drawing code
/// stays isolated from windowing and cursor logic. After drawing, a backend
/// that clamps or animates the x range reports the edge it actually drew via
/// `ChartSession::on_viewport_resized`.
pub trait Renderer {
    fn render(&mut self, frame: &ViewportFrame) -> ChartResult<()>;
}

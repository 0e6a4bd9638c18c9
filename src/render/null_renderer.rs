use crate::error::ChartResult;
use crate::render::{Renderer, ViewportFrame};

/// No-op renderer used by tests and headless sessions.
///
/// It still validates frame content and keeps the last frame so tests can
/// inspect exactly what a backend would have received.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_frame: Option<ViewportFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &ViewportFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}

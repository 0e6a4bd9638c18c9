use tracing::{debug, trace};

use crate::core::VisibleWindow;
use crate::error::ChartResult;
use crate::extensions::SessionEvent;
use crate::render::Renderer;

use super::ChartSession;

impl<R: Renderer> ChartSession<R> {
    /// Sets the zoom floor.
    pub fn configure(&mut self, min_bar_count: usize) -> ChartResult<()> {
        self.model.viewport.configure(min_bar_count)?;
        self.config.min_bar_count = min_bar_count;
        debug!(min_bar_count, "configure viewport");
        self.window_changed();
        Ok(())
    }

    #[must_use]
    pub fn window(&self) -> VisibleWindow {
        self.model.viewport.window()
    }

    /// `(left_ix, right_ix)` currently covered by data.
    #[must_use]
    pub fn visible_window(&self) -> (usize, usize) {
        self.model
            .viewport
            .effective_window(self.model.series.count())
    }

    /// Moves the window so the newest bar is at the right edge.
    pub fn reset_to_end(&mut self) {
        self.apply_render_feedback();
        let count = self.model.series.count();
        self.model.viewport.reset_to_end(count);
        trace!(right_ix = count, "reset window to end");
        self.window_changed();
    }

    /// Pans by `delta` bars; negative moves toward older data.
    pub fn pan(&mut self, delta: i64) -> bool {
        self.apply_render_feedback();
        let changed = self.model.viewport.pan(delta, self.model.series.count());
        trace!(delta, right_ix = self.model.viewport.window().right_ix, changed, "pan");
        if changed {
            self.window_changed();
        }
        changed
    }

    /// Scales the visible bar count by `factor`; `factor < 1` zooms in.
    pub fn zoom(&mut self, factor: f64) -> ChartResult<bool> {
        self.apply_render_feedback();
        let changed = self.model.viewport.zoom(factor, self.model.series.count())?;
        trace!(factor, bar_count = self.model.viewport.window().bar_count, changed, "zoom");
        if changed {
            self.window_changed();
        }
        Ok(changed)
    }

    /// One zoom step toward fewer, wider bars.
    pub fn zoom_in(&mut self) -> ChartResult<bool> {
        self.zoom(1.0 / self.config.zoom_step)
    }

    /// One zoom step toward more, narrower bars.
    pub fn zoom_out(&mut self) -> ChartResult<bool> {
        self.zoom(self.config.zoom_step)
    }

    /// Reports the right edge the renderer actually drew.
    ///
    /// Stored as a deferred correction; the observed edge replaces
    /// `right_ix` at the start of the next input event.
    pub fn on_viewport_resized(&mut self, visible_right_edge: f64) -> ChartResult<()> {
        self.model.viewport.on_viewport_resized(visible_right_edge)
    }

    pub(super) fn apply_render_feedback(&mut self) {
        if self
            .model
            .viewport
            .apply_pending_right_edge(self.model.series.count())
        {
            trace!(
                right_ix = self.model.viewport.window().right_ix,
                "apply observed right edge"
            );
            self.window_changed();
        }
    }

    fn window_changed(&mut self) {
        self.model.sync_panes();
        let (left_ix, right_ix) = self.visible_window();
        self.emit_session_event(SessionEvent::WindowChanged { left_ix, right_ix });
    }
}

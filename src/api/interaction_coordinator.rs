use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::{Bar, HistoryAnnotations, PaneId, ScreenPoint};
use crate::error::ChartResult;
use crate::extensions::SessionEvent;
use crate::interaction::{CursorPhase, CursorState, KeyDirection};
use crate::render::Renderer;

use super::ChartSession;

/// Input already decoded by the host toolkit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    PointerMove { x: f64, y: f64 },
    Key(KeyDirection),
    Wheel { delta_y: f64 },
    HistoryLoaded {
        bars: Vec<Bar>,
        #[serde(default)]
        annotations: HistoryAnnotations,
    },
    BarAppended(Bar),
    ViewportResized { visible_right_edge: f64 },
}

impl<R: Renderer> ChartSession<R> {
    /// Routes one decoded input event.
    pub fn handle_event(&mut self, event: ChartEvent) -> ChartResult<()> {
        match event {
            ChartEvent::PointerMove { x, y } => {
                self.pointer_move(x, y);
            }
            ChartEvent::Key(direction) => self.key(direction)?,
            ChartEvent::Wheel { delta_y } => self.wheel(delta_y)?,
            ChartEvent::HistoryLoaded { bars, annotations } => {
                self.load_history(bars, annotations);
            }
            ChartEvent::BarAppended(bar) => {
                if let Err(err) = self.append_bar(bar) {
                    warn!(error = %err, "rejecting bar update");
                    return Err(err);
                }
            }
            ChartEvent::ViewportResized { visible_right_edge } => {
                self.on_viewport_resized(visible_right_edge)?;
            }
        }
        Ok(())
    }

    /// Moves the crosshair to the bar under the pointer.
    ///
    /// Panes are hit-tested in stacking order and the first match wins. A
    /// pointer outside every pane, or an empty series, leaves the cursor as is.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.apply_render_feedback();
        let count = self.model.series.count();
        if count == 0 {
            return false;
        }

        let point = ScreenPoint::new(x, y);
        let Some(pane) = self.model.panes.hit_test(point) else {
            return false;
        };
        let Some(rect) = pane.geometry else {
            return false;
        };
        let Some(view) = self.model.sync.view(&pane.id) else {
            return false;
        };
        let transform = match view.transform(rect) {
            Ok(transform) => transform,
            Err(err) => {
                warn!(pane = %pane.id, error = %err, "skipping pointer move on degenerate pane");
                return false;
            }
        };

        let (fractional_index, value) = transform.screen_to_data(point);
        let pane_id = pane.id.clone();
        let moved = self
            .model
            .cursor
            .place(pane_id, fractional_index, value, count);
        if moved {
            self.cursor_moved();
        }
        moved
    }

    /// Arrow keys: left/right pan by one bar and step the cursor, up zooms
    /// in and down zooms out.
    pub fn key(&mut self, direction: KeyDirection) -> ChartResult<()> {
        match direction {
            KeyDirection::Left => {
                self.pan(-1);
                self.move_cursor_left();
            }
            KeyDirection::Right => {
                self.pan(1);
                self.move_cursor_right();
            }
            KeyDirection::Up => {
                self.zoom_in()?;
            }
            KeyDirection::Down => {
                self.zoom_out()?;
            }
        }
        Ok(())
    }

    /// Wheel up zooms in, wheel down zooms out, zero is ignored.
    pub fn wheel(&mut self, delta_y: f64) -> ChartResult<()> {
        if delta_y > 0.0 {
            self.zoom_in()?;
        } else if delta_y < 0.0 {
            self.zoom_out()?;
        }
        Ok(())
    }

    pub fn move_cursor_left(&mut self) -> bool {
        self.apply_render_feedback();
        let fallback = self.keyboard_fallback_pane();
        let moved = self
            .model
            .cursor
            .move_left(&self.model.series, fallback.as_ref());
        if moved {
            self.cursor_moved();
        }
        moved
    }

    pub fn move_cursor_right(&mut self) -> bool {
        self.apply_render_feedback();
        let fallback = self.keyboard_fallback_pane();
        let moved = self
            .model
            .cursor
            .move_right(&self.model.series, fallback.as_ref());
        if moved {
            self.cursor_moved();
        }
        moved
    }

    #[must_use]
    pub fn cursor_state(&self) -> &CursorState {
        self.model.cursor.state()
    }

    #[must_use]
    pub fn cursor_phase(&self) -> CursorPhase {
        self.model.cursor.phase()
    }

    fn keyboard_fallback_pane(&self) -> Option<PaneId> {
        self.model
            .panes
            .primary_pane_id()
            .or_else(|| self.model.panes.master_pane_id())
            .cloned()
    }

    fn cursor_moved(&mut self) {
        let index = self.model.cursor.state().index;
        trace!(index, value = self.model.cursor.state().value, "cursor moved");
        self.emit_session_event(SessionEvent::CursorMoved { index });
    }
}

use tracing::debug;

use crate::extensions::{SessionContext, SessionEvent, SessionObserver};
use crate::render::Renderer;

use super::ChartSession;

impl<R: Renderer> ChartSession<R> {
    pub fn register_observer(&mut self, observer: Box<dyn SessionObserver>) {
        debug!(observer = observer.id(), "register session observer");
        self.observers.push(observer);
    }

    /// Removes the observer with `id`. Returns `true` when one was removed.
    pub fn unregister_observer(&mut self, id: &str) -> bool {
        let before = self.observers.len();
        self.observers.retain(|observer| observer.id() != id);
        before != self.observers.len()
    }

    pub(super) fn session_context(&self) -> SessionContext {
        let count = self.model.series.count();
        SessionContext {
            window: self.model.viewport.window(),
            effective_window: self.model.viewport.effective_window(count),
            bar_count: count,
            pane_count: self.model.panes.len(),
            cursor_phase: self.model.cursor.phase(),
            cursor_index: self.model.cursor.state().index,
        }
    }

    pub(super) fn emit_session_event(&mut self, event: SessionEvent) {
        if self.observers.is_empty() {
            return;
        }
        let context = self.session_context();
        for observer in &mut self.observers {
            observer.on_event(event, context);
        }
    }
}

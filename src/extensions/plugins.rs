use serde::{Deserialize, Serialize};

use crate::core::VisibleWindow;
use crate::interaction::CursorPhase;

/// Read-only state snapshot passed to observer hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub window: VisibleWindow,
    pub effective_window: (usize, usize),
    pub bar_count: usize,
    pub pane_count: usize,
    pub cursor_phase: CursorPhase,
    pub cursor_index: usize,
}

/// Event stream exposed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    HistoryLoaded { bars: usize },
    BarAppended { index: usize, replaced: bool },
    WindowChanged { left_ix: usize, right_ix: usize },
    CursorMoved { index: usize },
    Cleared,
    Rendered,
}

/// Observer hook for host-side bookkeeping.
///
/// Observers see events and read session context; they cannot mutate the
/// session.
pub trait SessionObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: SessionEvent, context: SessionContext);
}

use crate::core::{BarSeries, ItemBinding, PaneRegistry, PaneSynchronizer, ViewportController};
use crate::interaction::CursorEngine;

/// Mutable chart state owned by one session.
///
/// Field order is drop order: item bindings go before the bar series.
pub(super) struct SessionModel {
    pub(super) bindings: Vec<ItemBinding>,
    pub(super) panes: PaneRegistry,
    pub(super) sync: PaneSynchronizer,
    pub(super) viewport: ViewportController,
    pub(super) cursor: CursorEngine,
    pub(super) series: BarSeries,
}

impl SessionModel {
    pub(super) fn new(viewport: ViewportController, sync: PaneSynchronizer) -> Self {
        Self {
            bindings: Vec::new(),
            panes: PaneRegistry::default(),
            sync,
            viewport,
            cursor: CursorEngine::default(),
            series: BarSeries::new(),
        }
    }

    /// Re-derives every pane view from the current window.
    pub(super) fn sync_panes(&mut self) {
        let count = self.series.count();
        debug_assert!(self.viewport.window().right_ix <= count);
        debug_assert!(count == 0 || self.cursor.state().index < count);
        self.sync.sync(
            &self.panes,
            &self.bindings,
            &self.series,
            self.viewport.window(),
        );
    }
}

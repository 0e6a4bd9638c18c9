use serde::{Deserialize, Serialize};

use crate::core::{PaneId, PaneOptions, PaneView, ScreenRect, VisibleWindow};
use crate::error::ChartResult;
use crate::interaction::{CursorPhase, CursorState};
use crate::render::Renderer;

use super::ChartSession;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneSnapshot {
    pub id: PaneId,
    pub options: PaneOptions,
    pub geometry: Option<ScreenRect>,
    pub view: PaneView,
    pub items: Vec<String>,
    pub info_text: String,
}

/// Serializable view of the whole session, used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub window: VisibleWindow,
    pub effective_window: (usize, usize),
    pub min_bar_count: usize,
    pub bar_count: usize,
    pub panes: Vec<PaneSnapshot>,
    pub cursor_phase: CursorPhase,
    pub cursor: CursorState,
}

impl<R: Renderer> ChartSession<R> {
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let count = self.model.series.count();
        SessionSnapshot {
            window: self.model.viewport.window(),
            effective_window: self.model.viewport.effective_window(count),
            min_bar_count: self.model.viewport.min_bar_count(),
            bar_count: count,
            panes: self
                .model
                .panes
                .iter()
                .map(|pane| PaneSnapshot {
                    id: pane.id.clone(),
                    options: pane.options,
                    geometry: pane.geometry,
                    view: self.model.sync.view(&pane.id).copied().unwrap_or_default(),
                    items: self
                        .pane_items(&pane.id)
                        .into_iter()
                        .map(str::to_owned)
                        .collect(),
                    info_text: self.pane_info_text(&pane.id),
                })
                .collect(),
            cursor_phase: self.model.cursor.phase(),
            cursor: self.model.cursor.state().clone(),
        }
    }

    pub fn snapshot_json(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }
}

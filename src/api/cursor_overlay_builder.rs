use smallvec::SmallVec;

use crate::core::PaneId;
use crate::render::{CrosshairLines, CursorOverlay, OverlayLabel, Renderer};

use super::ChartSession;

/// Joins item annotations in order, dropping absent and empty texts, with a
/// blank line between neighbours.
#[must_use]
pub fn join_info_texts<I>(texts: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    let parts: SmallVec<[String; 4]> = texts
        .into_iter()
        .flatten()
        .filter(|text| !text.is_empty())
        .collect();
    parts.join("\n\n")
}

impl<R: Renderer> ChartSession<R> {
    /// Aggregated annotation of every item bound to `pane` at the cursor
    /// index. Empty for an empty series or an unknown pane.
    #[must_use]
    pub fn pane_info_text(&self, pane: &PaneId) -> String {
        let series = &self.model.series;
        if series.is_empty() {
            return String::new();
        }
        let index = self.model.cursor.state().index;
        join_info_texts(
            self.model
                .bindings
                .iter()
                .filter(|binding| &binding.pane == pane)
                .map(|binding| binding.item.info_text(series, index)),
        )
    }

    /// Text for the persistent header label, taken from the primary pane.
    #[must_use]
    pub fn header_text(&self) -> Option<String> {
        let primary = self.model.panes.primary_pane_id()?;
        let text = self.pane_info_text(primary);
        (!text.is_empty()).then_some(text)
    }

    /// Crosshair lines, labels and info overlays for the current cursor.
    #[must_use]
    pub fn cursor_overlay(&self) -> CursorOverlay {
        let mut overlay = CursorOverlay::default();
        let series = &self.model.series;
        if series.is_empty() {
            return overlay;
        }

        let state = self.model.cursor.state();
        let active = self.model.cursor.is_active();
        let primary = self.model.panes.primary_pane_id();
        overlay.crosshair_visible = active;

        for pane in self.model.panes.iter() {
            let view = self.model.sync.view(&pane.id).copied().unwrap_or_default();
            if active {
                let is_active_pane = state.active_pane.as_ref() == Some(&pane.id);
                overlay.lines.push(CrosshairLines {
                    pane: pane.id.clone(),
                    vertical_x: state.index as f64,
                    horizontal_y: is_active_pane.then_some(state.value),
                });
            }

            if primary == Some(&pane.id) {
                continue;
            }
            let text = self.pane_info_text(&pane.id);
            if !text.is_empty() {
                overlay.info_overlays.push(OverlayLabel {
                    pane: pane.id.clone(),
                    text,
                    x: view.x_range.0,
                    y: view.y_range.max,
                });
            }
        }
        overlay.header_text = self.header_text();

        if !active {
            return overlay;
        }

        if let Some(active_pane) = &state.active_pane {
            if let Some(view) = self.model.sync.view(active_pane) {
                let text = match self.config.value_label_precision {
                    Some(precision) => format!("{:.precision$}", state.value),
                    None => state.value.to_string(),
                };
                overlay.value_label = Some(OverlayLabel {
                    pane: active_pane.clone(),
                    text,
                    x: view.x_range.1,
                    y: state.value,
                });
            }
        }

        if let (Some(bottom), Some(datetime)) = (
            self.model.panes.bottom_pane_id(),
            series.datetime(state.index),
        ) {
            let y = self
                .model
                .sync
                .view(bottom)
                .map_or(0.0, |view| view.y_range.min);
            overlay.time_label = Some(OverlayLabel {
                pane: bottom.clone(),
                text: datetime.format(&self.config.time_label_format).to_string(),
                x: state.index as f64,
                y,
            });
        }

        overlay
    }
}

use serde::{Deserialize, Serialize};

use crate::core::PaneId;
use crate::error::{ChartError, ChartResult};

fn ensure_finite_position(x: f64, y: f64, what: &str) -> ChartResult<()> {
    if !x.is_finite() || !y.is_finite() {
        return Err(ChartError::InvalidData(format!(
            "{what} position must be finite"
        )));
    }
    Ok(())
}

/// Crosshair guide lines for one pane, in data coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrosshairLines {
    pub pane: PaneId,
    /// Bar index of the vertical line; shown in every pane.
    pub vertical_x: f64,
    /// Value of the horizontal line; only set on the active pane.
    pub horizontal_y: Option<f64>,
}

impl CrosshairLines {
    pub fn validate(&self) -> ChartResult<()> {
        ensure_finite_position(self.vertical_x, self.horizontal_y.unwrap_or(0.0), "crosshair")
    }
}

/// Floating text anchored at a data-space position of a pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayLabel {
    pub pane: PaneId,
    pub text: String,
    pub x: f64,
    pub y: f64,
}

impl OverlayLabel {
    pub fn validate(&self) -> ChartResult<()> {
        ensure_finite_position(self.x, self.y, "overlay label")
    }
}

/// Everything the cursor contributes to one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CursorOverlay {
    /// `false` while the cursor is inert; lines and labels are then empty.
    pub crosshair_visible: bool,
    pub lines: Vec<CrosshairLines>,
    pub value_label: Option<OverlayLabel>,
    pub time_label: Option<OverlayLabel>,
    /// Aggregated item text for every non-primary pane, at its top-left.
    pub info_overlays: Vec<OverlayLabel>,
    /// Aggregated item text of the primary pane.
    pub header_text: Option<String>,
}

impl CursorOverlay {
    pub fn validate(&self) -> ChartResult<()> {
        for lines in &self.lines {
            lines.validate()?;
        }
        for label in self
            .value_label
            .iter()
            .chain(self.time_label.iter())
            .chain(self.info_overlays.iter())
        {
            label.validate()?;
        }
        Ok(())
    }
}

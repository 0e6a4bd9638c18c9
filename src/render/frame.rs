use serde::{Deserialize, Serialize};

use crate::core::{PaneId, PaneView, ScreenRect, VisibleWindow};
use crate::error::{ChartError, ChartResult};
use crate::render::CursorOverlay;

/// State of one pane for a draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneFrame {
    pub pane: PaneId,
    pub geometry: Option<ScreenRect>,
    pub view: PaneView,
}

/// Backend-agnostic state for one chart draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportFrame {
    pub window: VisibleWindow,
    pub effective_window: (usize, usize),
    pub panes: Vec<PaneFrame>,
    pub cursor: CursorOverlay,
}

impl ViewportFrame {
    pub fn validate(&self) -> ChartResult<()> {
        for pane in &self.panes {
            let (x_start, x_end) = pane.view.x_range;
            if !x_start.is_finite() || !x_end.is_finite() || x_start >= x_end {
                return Err(ChartError::InvalidData(format!(
                    "pane `{}` x range must be finite and increasing",
                    pane.pane
                )));
            }
            let y = pane.view.y_range;
            if !y.min.is_finite() || !y.max.is_finite() || y.min >= y.max {
                return Err(ChartError::InvalidData(format!(
                    "pane `{}` y range must be finite with non-zero height",
                    pane.pane
                )));
            }
            let limits = pane.view.limits;
            if limits.y_min >= limits.y_max {
                return Err(ChartError::InvalidData(format!(
                    "pane `{}` limits must have non-zero height",
                    pane.pane
                )));
            }
        }
        self.cursor.validate()
    }

    #[must_use]
    pub fn pane(&self, pane: &PaneId) -> Option<&PaneFrame> {
        self.panes.iter().find(|frame| &frame.pane == pane)
    }
}

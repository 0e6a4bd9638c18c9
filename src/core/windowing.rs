use serde::{Deserialize, Serialize};

use crate::core::primitives::ensure_finite;
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_MIN_BAR_COUNT: usize = 30;
pub const DEFAULT_ZOOM_STEP: f64 = 1.2;

/// Visible slice of the shared index space: `[right_ix - bar_count, right_ix]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleWindow {
    pub right_ix: usize,
    pub bar_count: usize,
}

impl VisibleWindow {
    #[must_use]
    pub fn left_ix(self) -> usize {
        self.right_ix.saturating_sub(self.bar_count)
    }
}

/// Owns the visible window and applies saturating pan/zoom to it.
///
/// The series length is passed into every mutation instead of being cached
/// so a freshly appended bar is always visible to the clamps.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportController {
    window: VisibleWindow,
    min_bar_count: usize,
    pending_right_edge: Option<f64>,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self {
            window: VisibleWindow {
                right_ix: 0,
                bar_count: DEFAULT_MIN_BAR_COUNT,
            },
            min_bar_count: DEFAULT_MIN_BAR_COUNT,
            pending_right_edge: None,
        }
    }
}

impl ViewportController {
    pub fn new(min_bar_count: usize) -> ChartResult<Self> {
        let mut controller = Self::default();
        controller.configure(min_bar_count)?;
        controller.window.bar_count = min_bar_count;
        Ok(controller)
    }

    /// Sets the zoom floor and raises the current bar count to it.
    pub fn configure(&mut self, min_bar_count: usize) -> ChartResult<()> {
        if min_bar_count == 0 {
            return Err(ChartError::InvalidConfig(
                "min bar count must be >= 1".to_owned(),
            ));
        }
        self.min_bar_count = min_bar_count;
        self.window.bar_count = self.window.bar_count.max(min_bar_count);
        Ok(())
    }

    #[must_use]
    pub fn min_bar_count(&self) -> usize {
        self.min_bar_count
    }

    #[must_use]
    pub fn window(&self) -> VisibleWindow {
        self.window
    }

    #[must_use]
    pub fn pending_right_edge(&self) -> Option<f64> {
        self.pending_right_edge
    }

    /// `(left_ix, right_ix)` actually covered by data; `(0, 0)` when empty.
    #[must_use]
    pub fn effective_window(&self, count: usize) -> (usize, usize) {
        if count == 0 {
            return (0, 0);
        }
        let right_ix = self.window.right_ix.min(count);
        (right_ix.saturating_sub(self.window.bar_count), right_ix)
    }

    /// Jumps to the newest bar. Returns `true` when the window changed.
    pub fn reset_to_end(&mut self, count: usize) -> bool {
        let before = self.window;
        self.window.right_ix = count;
        self.window.bar_count = self.window.bar_count.max(self.min_bar_count);
        before != self.window
    }

    /// Moves the right edge by `delta` bars, saturating at both ends.
    pub fn pan(&mut self, delta: i64, count: usize) -> bool {
        if count == 0 || delta == 0 {
            return false;
        }
        let before = self.window.right_ix;
        let lower = self.window.bar_count.min(count) as i64;
        let upper = count as i64;
        let target = (before as i64).saturating_add(delta).clamp(lower, upper);
        self.window.right_ix = target as usize;
        before != self.window.right_ix
    }

    /// Scales the bar count geometrically. `factor < 1` zooms in.
    pub fn zoom(&mut self, factor: f64, count: usize) -> ChartResult<bool> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }
        if count == 0 {
            return Ok(false);
        }

        let before = self.window;
        let upper = count.max(self.min_bar_count);
        let scaled = (self.window.bar_count as f64 * factor).round();
        let scaled = if scaled.is_finite() {
            scaled.clamp(0.0, upper as f64) as usize
        } else {
            upper
        };
        self.window.bar_count = scaled.clamp(self.min_bar_count, upper);
        // Keep the window filled when zooming out near the left edge.
        let lower = self.window.bar_count.min(count);
        self.window.right_ix = self.window.right_ix.clamp(lower, count);
        Ok(before != self.window)
    }

    /// Records the right edge the render layer actually drew.
    ///
    /// The value is applied by [`Self::apply_pending_right_edge`] before the
    /// next logical event, never synchronously.
    pub fn on_viewport_resized(&mut self, visible_right_edge: f64) -> ChartResult<()> {
        self.pending_right_edge = Some(ensure_finite(visible_right_edge, "visible right edge")?);
        Ok(())
    }

    /// Reconciles `right_ix` with the last observed edge. Observed wins.
    pub fn apply_pending_right_edge(&mut self, count: usize) -> bool {
        let Some(edge) = self.pending_right_edge.take() else {
            return false;
        };
        let before = self.window.right_ix;
        self.window.right_ix = edge.max(0.0).round().min(count as f64) as usize;
        before != self.window.right_ix
    }

    /// Returns the window to `[0, 0]` at the floor width after the series
    /// was cleared.
    pub fn clear(&mut self) {
        self.window.right_ix = 0;
        self.window.bar_count = self.min_bar_count;
        self.pending_right_edge = None;
    }
}

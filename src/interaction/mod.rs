use serde::{Deserialize, Serialize};

use crate::core::{BarSeries, PaneId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyDirection {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorPhase {
    /// No crosshair shown: pointer never entered a pane, series empty, or cleared.
    Inert,
    /// Crosshair shown at `CursorState::index`.
    Active,
}

/// Public cursor state exposed to host applications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorState {
    pub index: usize,
    pub value: f64,
    pub active_pane: Option<PaneId>,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            index: 0,
            value: 0.0,
            active_pane: None,
        }
    }
}

/// Snaps a fractional x coordinate to the nearest bar index in `[0, count)`.
#[must_use]
pub fn snap_to_bar_index(fractional_index: f64, count: usize) -> Option<usize> {
    if count == 0 || !fractional_index.is_finite() {
        return None;
    }
    let last = (count - 1) as f64;
    Some(fractional_index.round().clamp(0.0, last) as usize)
}

/// Crosshair state machine.
///
/// Pointer placement records the exact vertical value under the pointer;
/// keyboard steps pin the value to the close price of the new bar.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorEngine {
    phase: CursorPhase,
    state: CursorState,
}

impl Default for CursorEngine {
    fn default() -> Self {
        Self {
            phase: CursorPhase::Inert,
            state: CursorState::default(),
        }
    }
}

impl CursorEngine {
    #[must_use]
    pub fn phase(&self) -> CursorPhase {
        self.phase
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == CursorPhase::Active
    }

    #[must_use]
    pub fn state(&self) -> &CursorState {
        &self.state
    }

    /// Places the cursor from a pointer hit on `pane`.
    ///
    /// Returns `false` (and changes nothing) when the series is empty.
    pub fn place(&mut self, pane: PaneId, fractional_index: f64, value: f64, count: usize) -> bool {
        let Some(index) = snap_to_bar_index(fractional_index, count) else {
            return false;
        };
        if !value.is_finite() {
            return false;
        }
        self.state.index = index;
        self.state.value = value;
        self.state.active_pane = Some(pane);
        self.phase = CursorPhase::Active;
        true
    }

    pub fn move_left(&mut self, series: &BarSeries, fallback_pane: Option<&PaneId>) -> bool {
        if self.state.index == 0 {
            return false;
        }
        self.step_to(self.state.index - 1, series, fallback_pane)
    }

    pub fn move_right(&mut self, series: &BarSeries, fallback_pane: Option<&PaneId>) -> bool {
        if self.state.index + 1 >= series.count() {
            return false;
        }
        self.step_to(self.state.index + 1, series, fallback_pane)
    }

    fn step_to(&mut self, index: usize, series: &BarSeries, fallback_pane: Option<&PaneId>) -> bool {
        let Some(bar) = series.get(index) else {
            return false;
        };
        self.state.index = index;
        self.state.value = bar.close;
        if self.state.active_pane.is_none() {
            self.state.active_pane = fallback_pane.cloned();
        }
        self.phase = CursorPhase::Active;
        true
    }

    /// Re-establishes `index < count` after the series shrank or was replaced.
    pub fn clamp_to_count(&mut self, count: usize) {
        if count == 0 {
            self.clear();
        } else if self.state.index >= count {
            self.state.index = count - 1;
        }
    }

    pub fn clear(&mut self) {
        self.phase = CursorPhase::Inert;
        self.state = CursorState::default();
    }
}

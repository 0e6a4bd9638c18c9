use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Bar, BarSeries, PaneId, ValueRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
    Long,
    Short,
}

/// Executed order shown as a marker on the price pane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeMarker {
    pub datetime: DateTime<Utc>,
    pub direction: TradeDirection,
    pub price: f64,
    pub volume: f64,
}

/// Optional extras delivered together with a history load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryAnnotations {
    /// Indicator values keyed by line name, aligned with the loaded bars.
    #[serde(default)]
    pub lines: IndexMap<String, Vec<Option<f64>>>,
    #[serde(default)]
    pub trades: Vec<TradeMarker>,
}

impl HistoryAnnotations {
    #[must_use]
    pub fn with_line(mut self, name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        self.lines.insert(name.into(), values);
        self
    }

    #[must_use]
    pub fn with_trades(mut self, trades: Vec<TradeMarker>) -> Self {
        self.trades = trades;
        self
    }

    /// Reorders every line so that slot `i` holds the value given for input
    /// position `kept[i]`. Positions past the end of a line become gaps.
    pub fn realign_lines(&mut self, kept: &[usize]) {
        for values in self.lines.values_mut() {
            *values = kept
                .iter()
                .map(|&position| values.get(position).copied().flatten())
                .collect();
        }
    }
}

/// Capability set shared by every visual series bound to a pane.
///
/// Implementations are drawn by the host; the core only asks them for their
/// vertical extent and their annotation text, and feeds them data.
pub trait RenderableItem {
    /// Min/max over the half-open index range `[left_ix, right_ix)`.
    /// `None` means the item has nothing in that range.
    fn y_range(&self, series: &BarSeries, left_ix: usize, right_ix: usize) -> Option<ValueRange>;

    /// Annotation for the bar at `index`, if the item has one.
    fn info_text(&self, series: &BarSeries, index: usize) -> Option<String>;

    /// Called after the series stored `bar` at `index`. `index` equals the
    /// previous last index when the latest bar was replaced in place.
    fn on_bar_appended(&mut self, _bar: &Bar, _index: usize) {}

    /// Called after the series was replaced by a history load.
    fn on_history_loaded(&mut self, _bars: &[Bar], _annotations: &HistoryAnnotations) {}

    fn clear(&mut self) {}
}

/// An item attached to exactly one pane.
pub struct ItemBinding {
    pub name: String,
    pub pane: PaneId,
    pub item: Box<dyn RenderableItem>,
}

impl fmt::Debug for ItemBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemBinding")
            .field("name", &self.name)
            .field("pane", &self.pane)
            .finish_non_exhaustive()
    }
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{
    BarSeries, ItemBinding, PaneId, PaneLimits, PaneRegistry, PaneTransform, ScreenRect,
    ValueRange, VisibleWindow,
};
use crate::error::{ChartError, ChartResult};

/// Half height used when a range collapses to a single value.
const DEGENERATE_HALF_HEIGHT: f64 = 0.5;

/// Vertical headroom added around the visible data of every pane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddingPolicy {
    pub below: f64,
    pub above: f64,
}

impl Default for PaddingPolicy {
    fn default() -> Self {
        Self {
            below: 10.0,
            above: 20.0,
        }
    }
}

impl PaddingPolicy {
    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [(self.below, "padding_below"), (self.above, "padding_above")] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }

    /// Padded range that is guaranteed to have non-zero height.
    #[must_use]
    pub fn apply(self, raw: ValueRange) -> ValueRange {
        raw.padded(self.below, self.above)
            .non_degenerate(DEGENERATE_HALF_HEIGHT)
    }
}

/// What one pane currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaneView {
    /// Shared fractional index range, identical across panes.
    pub x_range: (f64, f64),
    /// Visible data range of this pane, never zero-height.
    pub y_range: ValueRange,
    pub limits: PaneLimits,
}

impl Default for PaneView {
    fn default() -> Self {
        Self {
            x_range: (0.0, 1.0),
            y_range: ValueRange::default(),
            limits: PaneLimits::default(),
        }
    }
}

impl PaneView {
    pub fn transform(&self, rect: ScreenRect) -> ChartResult<PaneTransform> {
        PaneTransform::new(rect, self.x_range, self.y_range)
    }
}

/// Keeps every pane on the master pane's x range and re-derives each pane's
/// y range from the items bound to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaneSynchronizer {
    padding: PaddingPolicy,
    views: IndexMap<PaneId, PaneView>,
}

impl PaneSynchronizer {
    pub fn new(padding: PaddingPolicy) -> ChartResult<Self> {
        Ok(Self {
            padding: padding.validate()?,
            views: IndexMap::new(),
        })
    }

    #[must_use]
    pub fn padding(&self) -> PaddingPolicy {
        self.padding
    }

    pub fn track_pane(&mut self, pane: PaneId) {
        self.views.entry(pane).or_default();
    }

    #[must_use]
    pub fn view(&self, pane: &PaneId) -> Option<&PaneView> {
        self.views.get(pane)
    }

    #[must_use]
    pub fn limits(&self, pane: &PaneId) -> Option<PaneLimits> {
        self.views.get(pane).map(|view| view.limits)
    }

    /// Union of the ranges reported by the items bound to `pane`.
    #[must_use]
    pub fn raw_pane_range(
        bindings: &[ItemBinding],
        series: &BarSeries,
        pane: &PaneId,
        left_ix: usize,
        right_ix: usize,
    ) -> Option<ValueRange> {
        bindings
            .iter()
            .filter(|binding| &binding.pane == pane)
            .fold(None, |acc, binding| {
                ValueRange::union_opt(acc, binding.item.y_range(series, left_ix, right_ix))
            })
    }

    /// Recomputes every pane for the given window.
    ///
    /// Panes without data in the window keep their previous y range.
    pub fn sync(
        &mut self,
        panes: &PaneRegistry,
        bindings: &[ItemBinding],
        series: &BarSeries,
        window: VisibleWindow,
    ) {
        let count = series.count();
        let right_ix = window.right_ix.min(count);
        let left_ix = right_ix.saturating_sub(window.bar_count);
        let master_x_range = (
            window.right_ix as f64 - window.bar_count as f64,
            window.right_ix as f64,
        );

        for pane in panes.ids() {
            let raw = Self::raw_pane_range(bindings, series, pane, left_ix, right_ix);
            let view = self.views.entry(pane.clone()).or_default();
            view.x_range = master_x_range;
            view.limits.x_min = -1;
            view.limits.x_max = count as i64;
            if let Some(raw) = raw {
                let padded = self.padding.apply(raw);
                view.y_range = raw.non_degenerate(DEGENERATE_HALF_HEIGHT);
                view.limits.y_min = padded.min;
                view.limits.y_max = padded.max;
            }
        }
    }

    pub fn reset(&mut self) {
        for view in self.views.values_mut() {
            *view = PaneView::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PaddingPolicy;
    use crate::core::ValueRange;

    #[test]
    fn padding_is_asymmetric() {
        let padded = PaddingPolicy::default().apply(ValueRange::new(6.0, 12.0));
        assert_eq!(padded, ValueRange::new(-4.0, 32.0));
    }

    #[test]
    fn zero_padding_still_yields_height() {
        let policy = PaddingPolicy {
            below: 0.0,
            above: 0.0,
        };
        let padded = policy.apply(ValueRange::point(3.0));
        assert!(padded.height() > 0.0);
    }

    #[test]
    fn negative_padding_is_rejected() {
        let policy = PaddingPolicy {
            below: -1.0,
            above: 0.0,
        };
        assert!(policy.validate().is_err());
    }
}

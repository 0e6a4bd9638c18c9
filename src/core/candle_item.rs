#[cfg(feature = "parallel-range-scan")]
use rayon::prelude::*;

use crate::core::{Bar, BarSeries, RenderableItem, ValueRange};

#[cfg(feature = "parallel-range-scan")]
const PARALLEL_SCAN_MIN_BARS: usize = 16_384;

/// Low/high extent of a bar slice.
#[must_use]
pub fn bar_price_range(bars: &[Bar]) -> Option<ValueRange> {
    // Wide windows are split across the rayon pool; the union is associative
    // so the result does not depend on the split.
    #[cfg(feature = "parallel-range-scan")]
    {
        if bars.len() >= PARALLEL_SCAN_MIN_BARS {
            return bars
                .par_iter()
                .map(|bar| Some(ValueRange::new(bar.low, bar.high)))
                .reduce(|| None, ValueRange::union_opt);
        }
    }

    bars.iter().fold(None, |acc, bar| {
        ValueRange::union_opt(acc, Some(ValueRange::new(bar.low, bar.high)))
    })
}

/// Candlestick series drawn on the price pane.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleItem {
    precision: usize,
}

impl Default for CandleItem {
    fn default() -> Self {
        Self { precision: 2 }
    }
}

impl CandleItem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}

impl RenderableItem for CandleItem {
    fn y_range(&self, series: &BarSeries, left_ix: usize, right_ix: usize) -> Option<ValueRange> {
        bar_price_range(series.window(left_ix, right_ix))
    }

    fn info_text(&self, series: &BarSeries, index: usize) -> Option<String> {
        let bar = series.get(index)?;
        let p = self.precision;
        Some(format!(
            "Date\n{date}\n\nTime\n{time}\n\nOpen\n{open:.p$}\nHigh\n{high:.p$}\nLow\n{low:.p$}\nClose\n{close:.p$}",
            date = bar.datetime.format("%Y-%m-%d"),
            time = bar.datetime.format("%H:%M"),
            open = bar.open,
            high = bar.high,
            low = bar.low,
            close = bar.close,
        ))
    }
}

/// Volume histogram, usually bound to its own pane below the price pane.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolumeItem;

impl VolumeItem {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RenderableItem for VolumeItem {
    fn y_range(&self, series: &BarSeries, left_ix: usize, right_ix: usize) -> Option<ValueRange> {
        // Bars grow up from zero, so the floor is always included.
        ValueRange::enclosing(series.window(left_ix, right_ix).iter().map(|bar| bar.volume))
            .map(|range| range.including(0.0))
    }

    fn info_text(&self, series: &BarSeries, index: usize) -> Option<String> {
        series
            .get(index)
            .map(|bar| format!("Volume\n{}", bar.volume))
    }
}

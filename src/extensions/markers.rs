use std::collections::BTreeMap;

use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::core::series::index_of_datetime;
use crate::core::{
    Bar, BarSeries, HistoryAnnotations, RenderableItem, TradeDirection, TradeMarker, ValueRange,
};

/// Trade order markers placed on the bars they executed in.
///
/// Trades whose datetime matches no loaded bar are dropped. Trades sharing a
/// bar are listed by descending price.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeMarkerItem {
    precision: usize,
    by_index: BTreeMap<usize, SmallVec<[TradeMarker; 2]>>,
}

impl TradeMarkerItem {
    #[must_use]
    pub fn new() -> Self {
        Self {
            precision: 2,
            by_index: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    #[must_use]
    pub fn trades_at(&self, index: usize) -> &[TradeMarker] {
        self.by_index
            .get(&index)
            .map(|trades| trades.as_slice())
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_index.values().map(SmallVec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }
}

impl RenderableItem for TradeMarkerItem {
    fn y_range(&self, _series: &BarSeries, left_ix: usize, right_ix: usize) -> Option<ValueRange> {
        if left_ix >= right_ix {
            return None;
        }
        ValueRange::enclosing(
            self.by_index
                .range(left_ix..right_ix)
                .flat_map(|(_, trades)| trades.iter().map(|trade| trade.price)),
        )
    }

    fn info_text(&self, _series: &BarSeries, index: usize) -> Option<String> {
        let trades = self.by_index.get(&index)?;
        let p = self.precision;
        let lines: Vec<String> = trades
            .iter()
            .map(|trade| {
                let side = match trade.direction {
                    TradeDirection::Long => "Long",
                    TradeDirection::Short => "Short",
                };
                format!("{side} {volume} @ {price:.p$}", volume = trade.volume, price = trade.price)
            })
            .collect();
        Some(lines.join("\n"))
    }

    fn on_history_loaded(&mut self, bars: &[Bar], annotations: &HistoryAnnotations) {
        self.by_index.clear();
        for trade in &annotations.trades {
            if let Some(index) = index_of_datetime(bars, trade.datetime) {
                self.by_index.entry(index).or_default().push(*trade);
            }
        }
        for trades in self.by_index.values_mut() {
            trades.sort_by_key(|trade| std::cmp::Reverse(OrderedFloat(trade.price)));
        }
    }

    fn clear(&mut self) {
        self.by_index.clear();
    }
}

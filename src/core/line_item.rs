use crate::core::{Bar, BarSeries, HistoryAnnotations, RenderableItem, ValueRange};

/// Indicator line whose values arrive as history annotations.
///
/// Values are index-aligned with the bar series; gaps are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    name: String,
    precision: usize,
    values: Vec<Option<f64>>,
}

impl LineItem {
    /// `name` selects the annotation line this item reads on history load.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            precision: 2,
            values: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    #[must_use]
    pub fn with_values(mut self, values: Vec<Option<f64>>) -> Self {
        self.values = values;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }
}

impl RenderableItem for LineItem {
    fn y_range(&self, _series: &BarSeries, left_ix: usize, right_ix: usize) -> Option<ValueRange> {
        let end = right_ix.min(self.values.len());
        let start = left_ix.min(end);
        ValueRange::enclosing(self.values[start..end].iter().flatten().copied())
    }

    fn info_text(&self, _series: &BarSeries, index: usize) -> Option<String> {
        let value = self.value(index)?;
        let p = self.precision;
        Some(format!("{}\n{value:.p$}", self.name))
    }

    fn on_bar_appended(&mut self, _bar: &Bar, index: usize) {
        // A new bar opens an empty slot; replacing the latest bar keeps it.
        if index >= self.values.len() {
            self.values.resize(index + 1, None);
        }
    }

    fn on_history_loaded(&mut self, bars: &[Bar], annotations: &HistoryAnnotations) {
        let mut values = annotations.lines.get(&self.name).cloned().unwrap_or_default();
        values.resize(bars.len(), None);
        self.values = values;
    }

    fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::LineItem;
    use crate::core::{Bar, BarSeries, HistoryAnnotations, RenderableItem, ValueRange};

    #[test]
    fn line_reads_named_annotation_and_pads_to_bar_count() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("dt");
        let bars = vec![Bar::new(dt, 1.0, 1.0, 1.0, 1.0, 0.0).expect("bar"); 1];
        let annotations = HistoryAnnotations::default()
            .with_line("ma5", vec![Some(3.0), Some(4.0)])
            .with_line("ma10", vec![Some(9.0)]);
        let mut line = LineItem::new("ma5");
        line.on_history_loaded(&bars, &annotations);
        assert_eq!(line.value(0), Some(3.0));
        assert_eq!(line.value(1), None);
    }

    #[test]
    fn line_range_skips_gaps() {
        let series = BarSeries::new();
        let line = LineItem::new("ma").with_values(vec![None, Some(5.0), None, Some(2.0)]);
        assert_eq!(line.y_range(&series, 0, 4), Some(ValueRange::new(2.0, 5.0)));
        assert_eq!(line.y_range(&series, 2, 3), None);
        assert_eq!(line.info_text(&series, 1).as_deref(), Some("ma\n5.00"));
        assert!(line.info_text(&series, 0).is_none());
    }
}

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::core::Bar;
use crate::error::{ChartError, ChartResult};

/// Outcome of a realtime bar update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarUpdate {
    Appended { index: usize },
    Replaced { index: usize },
}

impl BarUpdate {
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Appended { index } | Self::Replaced { index } => index,
        }
    }
}

/// Append-only bar store addressed by a dense index `0..count`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarSeries {
    bars: Vec<Bar>,
}

impl BarSeries {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the content with `bars`, sorted by datetime with later
    /// duplicates winning.
    ///
    /// Returns, for each stored index, the position of that bar in `bars`.
    pub fn load(&mut self, bars: Vec<Bar>) -> Vec<usize> {
        let (bars, kept) = canonicalize_bars(bars);
        self.bars = bars;
        kept
    }

    pub fn append(&mut self, bar: Bar) -> ChartResult<usize> {
        if let Some(last) = self.bars.last() {
            if bar.datetime <= last.datetime {
                return Err(ChartError::InvalidData(
                    "appended bar datetime must be newer than latest bar".to_owned(),
                ));
            }
        }
        self.bars.push(bar);
        Ok(self.bars.len() - 1)
    }

    /// Realtime-update semantics:
    /// - appends when `bar.datetime` is newer than the latest bar
    /// - replaces the latest bar when the datetime is equal
    /// - rejects out-of-order updates
    pub fn update(&mut self, bar: Bar) -> ChartResult<BarUpdate> {
        let ordering = self
            .bars
            .last()
            .map_or(Ordering::Greater, |last| bar.datetime.cmp(&last.datetime));
        match ordering {
            Ordering::Less => Err(ChartError::InvalidData(
                "bar update datetime must be >= latest bar datetime".to_owned(),
            )),
            Ordering::Equal => {
                let index = self.bars.len() - 1;
                self.bars[index] = bar;
                Ok(BarUpdate::Replaced { index })
            }
            Ordering::Greater => {
                self.bars.push(bar);
                Ok(BarUpdate::Appended {
                    index: self.bars.len() - 1,
                })
            }
        }
    }

    pub fn clear(&mut self) {
        self.bars.clear();
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.bars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    #[must_use]
    pub fn datetime(&self, index: usize) -> Option<DateTime<Utc>> {
        self.bars.get(index).map(|bar| bar.datetime)
    }

    /// Bars in the half-open index range `[left_ix, right_ix)`, clamped to the
    /// stored range.
    #[must_use]
    pub fn window(&self, left_ix: usize, right_ix: usize) -> &[Bar] {
        let end = right_ix.min(self.bars.len());
        let start = left_ix.min(end);
        &self.bars[start..end]
    }

    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Index of the bar stamped exactly at `datetime`.
    #[must_use]
    pub fn index_of(&self, datetime: DateTime<Utc>) -> Option<usize> {
        index_of_datetime(&self.bars, datetime)
    }
}

pub(crate) fn index_of_datetime(bars: &[Bar], datetime: DateTime<Utc>) -> Option<usize> {
    bars.binary_search_by(|bar| bar.datetime.cmp(&datetime)).ok()
}

fn canonicalize_bars(bars: Vec<Bar>) -> (Vec<Bar>, Vec<usize>) {
    let mut indexed: Vec<(usize, Bar)> = bars.into_iter().enumerate().collect();
    // Stable: among equal datetimes the later input stays last.
    indexed.sort_by(|(_, a), (_, b)| a.datetime.cmp(&b.datetime));
    let mut out: Vec<Bar> = Vec::with_capacity(indexed.len());
    let mut kept: Vec<usize> = Vec::with_capacity(indexed.len());
    for (position, bar) in indexed {
        match (out.last_mut(), kept.last_mut()) {
            (Some(last), Some(last_position)) if last.datetime == bar.datetime => {
                *last = bar;
                *last_position = position;
            }
            _ => {
                out.push(bar);
                kept.push(position);
            }
        }
    }
    (out, kept)
}

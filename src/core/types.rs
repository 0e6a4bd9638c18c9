use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::decimal_to_f64;
use crate::error::{ChartError, ChartResult};

/// One OHLC(V) record at a discrete index of the series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub datetime: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Builds a validated bar from raw floating values.
    ///
    /// Invariants:
    /// - all values are finite
    /// - `low <= high`
    /// - `open` and `close` are within `[low, high]`
    /// - `volume >= 0`
    pub fn new(
        datetime: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> ChartResult<Self> {
        if !open.is_finite()
            || !high.is_finite()
            || !low.is_finite()
            || !close.is_finite()
            || !volume.is_finite()
        {
            return Err(ChartError::InvalidData(
                "bar values must be finite".to_owned(),
            ));
        }

        if low > high {
            return Err(ChartError::InvalidData("bar low must be <= high".to_owned()));
        }

        if open < low || open > high || close < low || close > high {
            return Err(ChartError::InvalidData(
                "bar open/close must be within low/high range".to_owned(),
            ));
        }

        if volume < 0.0 {
            return Err(ChartError::InvalidData(
                "bar volume must be >= 0".to_owned(),
            ));
        }

        Ok(Self {
            datetime,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Converts decimal quotes into a validated bar.
    pub fn from_decimal(
        datetime: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> ChartResult<Self> {
        Self::new(
            datetime,
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
            decimal_to_f64(volume, "volume")?,
        )
    }
}

/// Closed value interval on a pane's vertical axis.
///
/// "No data" is modelled as `Option<ValueRange>::None` by callers; unions skip it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl ValueRange {
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    #[must_use]
    pub fn point(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Smallest range covering every finite value; `None` when there is none.
    pub fn enclosing(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|value| value.is_finite())
            .fold(None, |acc, value| {
                Some(match acc {
                    Some(range) => range.including(value),
                    None => Self::point(value),
                })
            })
    }

    /// Union of two optional ranges, ignoring absent sides.
    #[must_use]
    pub fn union_opt(left: Option<Self>, right: Option<Self>) -> Option<Self> {
        match (left, right) {
            (Some(a), Some(b)) => Some(a.union(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[must_use]
    pub fn including(self, value: f64) -> Self {
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.height() <= f64::EPSILON * self.min.abs().max(self.max.abs()).max(1.0)
    }

    /// Applies asymmetric padding below and above.
    #[must_use]
    pub fn padded(self, below: f64, above: f64) -> Self {
        Self {
            min: self.min - below,
            max: self.max + above,
        }
    }

    /// Widens a zero-height range symmetrically so it can be mapped to pixels.
    #[must_use]
    pub fn non_degenerate(self, half_height: f64) -> Self {
        if self.is_degenerate() {
            Self {
                min: self.min - half_height,
                max: self.max + half_height,
            }
        } else {
            self
        }
    }
}

/// Hard scroll/zoom clamp for one pane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaneLimits {
    pub y_min: f64,
    pub y_max: f64,
    pub x_min: i64,
    pub x_max: i64,
}

impl Default for PaneLimits {
    fn default() -> Self {
        Self {
            y_min: 0.0,
            y_max: 1.0,
            x_min: -1,
            x_max: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned screen rectangle reported by the render layer for a pane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> ChartResult<Self> {
        if !left.is_finite() || !top.is_finite() || !width.is_finite() || !height.is_finite() {
            return Err(ChartError::InvalidData(
                "pane geometry must be finite".to_owned(),
            ));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "pane geometry must have positive size: width={width}, height={height}"
            )));
        }
        Ok(Self {
            left,
            top,
            width,
            height,
        })
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Inclusive on the top/left edges, exclusive on the bottom/right edges so
    /// that stacked panes sharing an edge never both claim a pointer.
    #[must_use]
    pub fn contains(self, point: ScreenPoint) -> bool {
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }
}

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_MIN_BAR_COUNT, DEFAULT_ZOOM_STEP, PaddingPolicy};
use crate::error::{ChartError, ChartResult};

/// Per-session configuration.
///
/// Every knob lives here rather than in module state so that several chart
/// sessions in one process stay independent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSessionConfig {
    #[serde(default = "default_min_bar_count")]
    pub min_bar_count: usize,
    /// Multiplicative bar-count step per zoom key/wheel notch.
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,
    #[serde(default = "default_padding_below")]
    pub padding_below: f64,
    #[serde(default = "default_padding_above")]
    pub padding_above: f64,
    /// Follow the newest bar on append while the window is near the end.
    #[serde(default = "default_auto_follow_latest")]
    pub auto_follow_latest: bool,
    #[serde(default = "default_time_label_format")]
    pub time_label_format: String,
    /// Decimals on the cursor value label; `None` prints the value as is.
    #[serde(default)]
    pub value_label_precision: Option<usize>,
}

impl Default for ChartSessionConfig {
    fn default() -> Self {
        Self {
            min_bar_count: default_min_bar_count(),
            zoom_step: default_zoom_step(),
            padding_below: default_padding_below(),
            padding_above: default_padding_above(),
            auto_follow_latest: default_auto_follow_latest(),
            time_label_format: default_time_label_format(),
            value_label_precision: None,
        }
    }
}

impl ChartSessionConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_min_bar_count(mut self, min_bar_count: usize) -> Self {
        self.min_bar_count = min_bar_count;
        self
    }

    #[must_use]
    pub fn with_zoom_step(mut self, zoom_step: f64) -> Self {
        self.zoom_step = zoom_step;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, below: f64, above: f64) -> Self {
        self.padding_below = below;
        self.padding_above = above;
        self
    }

    #[must_use]
    pub fn with_auto_follow_latest(mut self, enabled: bool) -> Self {
        self.auto_follow_latest = enabled;
        self
    }

    #[must_use]
    pub fn with_time_label_format(mut self, format: impl Into<String>) -> Self {
        self.time_label_format = format.into();
        self
    }

    #[must_use]
    pub fn with_value_label_precision(mut self, precision: usize) -> Self {
        self.value_label_precision = Some(precision);
        self
    }

    #[must_use]
    pub fn padding(&self) -> PaddingPolicy {
        PaddingPolicy {
            below: self.padding_below,
            above: self.padding_above,
        }
    }

    /// Parses and validates a JSON document; absent fields take defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.min_bar_count == 0 {
            return Err(ChartError::InvalidConfig(
                "min bar count must be >= 1".to_owned(),
            ));
        }
        if !self.zoom_step.is_finite() || self.zoom_step <= 1.0 {
            return Err(ChartError::InvalidConfig(
                "zoom step must be finite and > 1".to_owned(),
            ));
        }
        self.padding().validate()?;
        if self.time_label_format.is_empty()
            || StrftimeItems::new(&self.time_label_format).any(|item| matches!(item, Item::Error))
        {
            return Err(ChartError::InvalidConfig(format!(
                "time label format `{}` is not a valid strftime pattern",
                self.time_label_format
            )));
        }
        Ok(())
    }
}

fn default_min_bar_count() -> usize {
    DEFAULT_MIN_BAR_COUNT
}

fn default_zoom_step() -> f64 {
    DEFAULT_ZOOM_STEP
}

fn default_padding_below() -> f64 {
    PaddingPolicy::default().below
}

fn default_padding_above() -> f64 {
    PaddingPolicy::default().above
}

fn default_auto_follow_latest() -> bool {
    true
}

fn default_time_label_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_owned()
}

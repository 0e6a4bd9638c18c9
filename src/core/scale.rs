use crate::core::types::{ScreenPoint, ScreenRect, ValueRange};
use crate::error::{ChartError, ChartResult};

/// Affine map between a data domain and a pixel span.
///
/// The pixel span may be reversed (`pixel_start > pixel_end`), which is how
/// the vertical axis puts larger values at the top of a pane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    pixel_start: f64,
    pixel_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        pixel_start: f64,
        pixel_end: f64,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !pixel_start.is_finite() || !pixel_end.is_finite() || pixel_start == pixel_end {
            return Err(ChartError::InvalidData(
                "scale pixel span must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            pixel_start,
            pixel_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn domain_to_pixel(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.pixel_start + normalized * (self.pixel_end - self.pixel_start)
    }

    #[must_use]
    pub fn pixel_to_domain(self, pixel: f64) -> f64 {
        let normalized = (pixel - self.pixel_start) / (self.pixel_end - self.pixel_start);
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }
}

/// Screen ↔ data transform of one pane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneTransform {
    x: LinearScale,
    y: LinearScale,
}

impl PaneTransform {
    /// Maps `x_range` onto the rect's width and `y_range` onto its height with
    /// `y_range.max` at the top edge.
    pub fn new(rect: ScreenRect, x_range: (f64, f64), y_range: ValueRange) -> ChartResult<Self> {
        Ok(Self {
            x: LinearScale::new(x_range.0, x_range.1, rect.left, rect.right())?,
            y: LinearScale::new(y_range.min, y_range.max, rect.bottom(), rect.top)?,
        })
    }

    /// Returns `(fractional_index, value)` under the screen point.
    #[must_use]
    pub fn screen_to_data(self, point: ScreenPoint) -> (f64, f64) {
        (self.x.pixel_to_domain(point.x), self.y.pixel_to_domain(point.y))
    }

    #[must_use]
    pub fn data_to_screen(self, index: f64, value: f64) -> ScreenPoint {
        ScreenPoint::new(self.x.domain_to_pixel(index), self.y.domain_to_pixel(value))
    }
}

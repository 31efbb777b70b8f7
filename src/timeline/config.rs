//! Geometry and formatting of the timeline chart.

use chrono::format::{Item, StrftimeItems};
use qtty::Quantity;

use crate::error::{Error, Result};
use crate::units::Minutes;

/// Format of hour tick labels.
pub const DEFAULT_TICK_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Pixel geometry, domain padding and label format of a chart.
///
/// All lengths are in pixels. Defaults reproduce the plant chart: 1200 px
/// wide, a 150 px machine-name column and 60 px rows with 40 px bars.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    pub width: f64,
    pub chart_padding: f64,
    pub left_axis_width: f64,
    pub bottom_axis_height: f64,
    /// Band above the rows reserved for a title.
    pub title_height: f64,
    pub row_height: f64,
    pub bar_height: f64,
    /// Bars narrower than this are widened so they stay visible and hittable.
    pub min_bar_width: f64,
    /// Fraction of the data span added before the first start and after the
    /// last end.
    pub domain_padding_ratio: f64,
    /// Padding used instead when the data span is zero.
    pub min_domain_padding_minutes: f64,
    /// Opacity of bars sharing the hovered bar's work order.
    pub hover_opacity: f64,
    pub tick_format: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            chart_padding: 40.0,
            left_axis_width: 150.0,
            bottom_axis_height: 60.0,
            title_height: 50.0,
            row_height: 60.0,
            bar_height: 40.0,
            min_bar_width: 2.0,
            domain_padding_ratio: 0.05,
            min_domain_padding_minutes: 30.0,
            hover_opacity: 0.8,
            tick_format: DEFAULT_TICK_FORMAT.to_string(),
        }
    }
}

impl LayoutConfig {
    /// Width of the plotting area between the machine-name column and the
    /// right padding.
    pub fn plot_width(&self) -> f64 {
        self.width - self.left_axis_width - self.chart_padding
    }

    pub fn min_domain_padding(&self) -> Minutes {
        Quantity::new(self.min_domain_padding_minutes)
    }

    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("width", self.width),
            ("chart_padding", self.chart_padding),
            ("left_axis_width", self.left_axis_width),
            ("bottom_axis_height", self.bottom_axis_height),
            ("title_height", self.title_height),
            ("min_bar_width", self.min_bar_width),
            ("domain_padding_ratio", self.domain_padding_ratio),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!("{name} must be a non-negative number, got {value}")));
            }
        }
        if !(self.plot_width() > 0.0) {
            return Err(invalid(format!(
                "width {} leaves no room to plot after axis {} and padding {}",
                self.width, self.left_axis_width, self.chart_padding
            )));
        }
        if !(self.bar_height > 0.0 && self.bar_height.is_finite()) {
            return Err(invalid(format!("bar_height must be positive, got {}", self.bar_height)));
        }
        // Rows must not touch, or one pointer could hit two of them.
        if !(self.row_height > self.bar_height) || !self.row_height.is_finite() {
            return Err(invalid(format!(
                "row_height {} must exceed bar_height {}",
                self.row_height, self.bar_height
            )));
        }
        if !(self.min_domain_padding_minutes > 0.0) || !self.min_domain_padding_minutes.is_finite() {
            return Err(invalid("min_domain_padding_minutes must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.hover_opacity) {
            return Err(invalid(format!("hover_opacity {} is outside [0, 1]", self.hover_opacity)));
        }
        if StrftimeItems::new(&self.tick_format).any(|item| matches!(item, Item::Error)) {
            return Err(invalid(format!("tick_format {:?} is not a valid strftime format", self.tick_format)));
        }
        Ok(())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfig(message)
}

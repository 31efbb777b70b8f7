//! Mapping between the minute axis and horizontal pixels.

use chrono::NaiveDateTime;
use qtty::{Minute, Quantity};

use super::config::LayoutConfig;
use crate::interval::Interval;
use crate::units::{from_axis, hour, to_axis, Minutes};

/// One label on the time axis, placed on a whole hour.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TickLabel {
    pub at: NaiveDateTime,
    pub x: f64,
    pub label: String,
}

/// Linear scale from the padded time domain onto `[left, left + plot_width]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimeAxis {
    domain: Interval<Minute>,
    left: f64,
    plot_width: f64,
}

impl TimeAxis {
    /// Pads `[min, max]` on both ends and maps it onto the plot area.
    ///
    /// The padding is `domain_padding_ratio` of the span, or
    /// `min_domain_padding` when the span is zero, so the domain always has
    /// positive width.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    pub fn new(min: Minutes, max: Minutes, config: &LayoutConfig) -> Self {
        let span = max.value() - min.value();
        let padding = if span > 0.0 {
            span * config.domain_padding_ratio
        } else {
            config.min_domain_padding().value()
        };
        Self {
            domain: Interval::from_f64(min.value() - padding, max.value() + padding),
            left: config.left_axis_width,
            plot_width: config.plot_width(),
        }
    }

    pub fn domain(&self) -> Interval<Minute> {
        self.domain
    }

    /// Domain bounds as wall-clock instants.
    pub fn domain_instants(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.domain.start_instant()?, self.domain.end_instant()?))
    }

    /// Horizontal pixel of an axis position.
    pub fn x(&self, position: Minutes) -> f64 {
        let start = self.domain.start().value();
        let width = self.domain.duration().value();
        self.left + (position.value() - start) / width * self.plot_width
    }

    /// Horizontal pixel of a wall-clock instant.
    pub fn x_at(&self, instant: NaiveDateTime) -> f64 {
        self.x(to_axis(instant))
    }

    /// Inverse of [`TimeAxis::x`].
    pub fn position(&self, x: f64) -> Minutes {
        let start = self.domain.start().value();
        let width = self.domain.duration().value();
        Quantity::new(start + (x - self.left) / self.plot_width * width)
    }

    /// Wall-clock instant under pixel `x`, to the millisecond.
    pub fn time_at(&self, x: f64) -> Option<NaiveDateTime> {
        from_axis(self.position(x))
    }

    /// One tick per whole hour from the hour at or before the domain start
    /// up to the domain end inclusive.
    pub fn ticks(&self, format: &str) -> Vec<TickLabel> {
        let step = hour().value();
        let end = self.domain.end().value();
        let mut current = (self.domain.start().value() / step).floor() * step;
        let mut ticks = Vec::new();

        while current <= end {
            let position = Quantity::new(current);
            if let Some(at) = from_axis(position) {
                ticks.push(TickLabel {
                    at,
                    x: self.x(position),
                    label: at.format(format).to_string(),
                });
            }
            current += step;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 12, 18)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn axis(from: NaiveDateTime, to: NaiveDateTime) -> TimeAxis {
        TimeAxis::new(to_axis(from), to_axis(to), &LayoutConfig::default())
    }

    #[test]
    fn pads_five_percent_of_span() {
        let axis = axis(at(9, 0, 0), at(10, 30, 0));
        assert_eq!(axis.domain().duration().value(), 99.0);
        assert_eq!(axis.domain_instants(), Some((at(8, 55, 30), at(10, 34, 30))));
    }

    #[test]
    fn zero_span_uses_minimum_padding() {
        let axis = axis(at(9, 0, 0), at(9, 0, 0));
        assert_eq!(axis.domain_instants(), Some((at(8, 30, 0), at(9, 30, 0))));
        assert!(axis.x_at(at(9, 0, 0)).is_finite());
    }

    #[test]
    fn domain_maps_onto_plot_area() {
        let axis = axis(at(9, 0, 0), at(10, 30, 0));
        let (lo, hi) = axis.domain_instants().unwrap();
        assert!((axis.x_at(lo) - 150.0).abs() < 1e-9);
        assert!((axis.x_at(hi) - 1160.0).abs() < 1e-9);
        assert!(axis.x_at(at(9, 0, 0)) < axis.x_at(at(9, 30, 0)));
    }

    #[test]
    fn time_at_inverts_x() {
        let axis = axis(at(9, 0, 0), at(10, 30, 0));
        let x = axis.x_at(at(9, 45, 0));
        assert_eq!(axis.time_at(x), Some(at(9, 45, 0)));
    }

    #[test]
    fn ticks_on_whole_hours() {
        let axis = axis(at(9, 0, 0), at(10, 30, 0));
        let ticks = axis.ticks("%Y-%m-%d %H:%M");
        let labels: Vec<_> = ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["2024-12-18 08:00", "2024-12-18 09:00", "2024-12-18 10:00"]);
        // The first tick sits left of the plot area, before the domain start.
        assert!(ticks[0].x < 150.0);
        assert!(ticks.windows(2).all(|w| w[0].x < w[1].x));
    }
}

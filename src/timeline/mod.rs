//! Gantt timeline layout and pointer interaction.
//!
//! [`Timeline::layout`] turns a snapshot of assignments into pixel geometry:
//! one row per machine that appears in the snapshot (sorted by name), a
//! padded time domain with hour ticks, and one bar per assignment. The
//! result is plain data. Renderers draw it; pointer handlers query it with
//! [`ChartLayout::hit_test`] and the helpers in [`highlight`].
//!
//! Layout is a pure function of its input: the same snapshot and config
//! always give the same [`Layout`].

mod axis;
mod config;
pub mod highlight;

#[cfg(test)]
mod tests;

pub use axis::{TickLabel, TimeAxis};
pub use config::{LayoutConfig, DEFAULT_TICK_FORMAT};
pub use highlight::{is_highlighted, BarStyle, Tooltip};

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::AssignmentView;
use crate::units::to_axis;

/// A pointer position in chart pixels, origin at the top left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in chart pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Edges included.
    pub fn contains(&self, point: Point) -> bool {
        self.x <= point.x && point.x <= self.right() && self.y <= point.y && point.y <= self.bottom()
    }
}

/// One assignment drawn as a bar.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BarLayout {
    pub view: AssignmentView,
    /// Index into [`ChartLayout::rows`].
    pub row: usize,
    pub rect: Rect,
}

impl BarLayout {
    pub fn order_number(&self) -> &str {
        &self.view.order_number
    }

    pub fn machine_name(&self) -> &str {
        &self.view.machine_name
    }
}

/// A machine's row: its label, vertical centre and bars in start order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RowLayout {
    pub machine_name: String,
    pub y: f64,
    pub bars: Vec<BarLayout>,
}

/// Geometry of a non-empty chart.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChartLayout {
    width: f64,
    height: f64,
    bar_height: f64,
    hover_opacity: f64,
    plot_area: Rect,
    axis: TimeAxis,
    ticks: Vec<TickLabel>,
    rows: Vec<RowLayout>,
}

impl ChartLayout {
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Area between the machine labels, the time labels and the padding,
    /// where grid lines are drawn.
    pub fn plot_area(&self) -> Rect {
        self.plot_area
    }

    pub fn axis(&self) -> &TimeAxis {
        &self.axis
    }

    /// Padded domain as wall-clock instants.
    pub fn domain(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.axis.domain_instants()
    }

    pub fn ticks(&self) -> &[TickLabel] {
        &self.ticks
    }

    pub fn rows(&self) -> &[RowLayout] {
        &self.rows
    }

    /// All bars, row by row.
    pub fn bars(&self) -> impl Iterator<Item = &BarLayout> {
        self.rows.iter().flat_map(|row| row.bars.iter())
    }

    /// Horizontal pixel of `instant`.
    pub fn x_at(&self, instant: NaiveDateTime) -> f64 {
        self.axis.x_at(instant)
    }

    /// Instant under horizontal pixel `x`.
    pub fn time_at(&self, x: f64) -> Option<NaiveDateTime> {
        self.axis.time_at(x)
    }
}

/// Outcome of a layout pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "chart", rename_all = "snake_case"))]
pub enum Layout {
    /// Nothing to draw.
    Empty,
    Chart(ChartLayout),
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        matches!(self, Layout::Empty)
    }

    /// The chart, or `EmptyDataSet`.
    pub fn chart(&self) -> Result<&ChartLayout> {
        match self {
            Layout::Chart(chart) => Ok(chart),
            Layout::Empty => Err(Error::EmptyDataSet),
        }
    }

    pub fn into_chart(self) -> Result<ChartLayout> {
        match self {
            Layout::Chart(chart) => Ok(chart),
            Layout::Empty => Err(Error::EmptyDataSet),
        }
    }
}

/// Lays out assignment snapshots with a validated [`LayoutConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    config: LayoutConfig,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            config: LayoutConfig::default(),
        }
    }
}

impl Timeline {
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Computes rows, domain, ticks and bars for `assignments`.
    ///
    /// Input order does not matter. An empty input gives [`Layout::Empty`].
    pub fn layout(&self, assignments: &[AssignmentView]) -> Layout {
        let config = &self.config;
        let (Some(min), Some(max)) = (
            assignments.iter().map(|v| to_axis(v.start())).min_by(|a, b| a.value().total_cmp(&b.value())),
            assignments.iter().map(|v| to_axis(v.end())).max_by(|a, b| a.value().total_cmp(&b.value())),
        ) else {
            return Layout::Empty;
        };
        let axis = TimeAxis::new(min, max, config);

        let mut by_machine: BTreeMap<&str, Vec<&AssignmentView>> = BTreeMap::new();
        for view in assignments {
            by_machine.entry(view.machine_name.as_str()).or_default().push(view);
        }

        let rows: Vec<RowLayout> = by_machine
            .into_iter()
            .enumerate()
            .map(|(index, (machine_name, mut views))| {
                views.sort_by(|a, b| {
                    a.start()
                        .cmp(&b.start())
                        .then_with(|| a.order_number.cmp(&b.order_number))
                });
                let y = config.chart_padding + index as f64 * config.row_height + config.row_height / 2.0;
                let bars = views
                    .into_iter()
                    .map(|view| {
                        let x = axis.x_at(view.start());
                        let width = (axis.x_at(view.end()) - x).max(config.min_bar_width);
                        BarLayout {
                            view: view.clone(),
                            row: index,
                            rect: Rect {
                                x,
                                y: y - config.bar_height / 2.0,
                                width,
                                height: config.bar_height,
                            },
                        }
                    })
                    .collect();
                RowLayout {
                    machine_name: machine_name.to_string(),
                    y,
                    bars,
                }
            })
            .collect();

        let height = rows.len() as f64 * config.row_height
            + config.title_height
            + config.bottom_axis_height
            + 2.0 * config.chart_padding;
        let plot_area = Rect {
            x: config.left_axis_width,
            y: config.chart_padding,
            width: config.plot_width(),
            height: height - config.bottom_axis_height - config.chart_padding,
        };
        let ticks = axis.ticks(&config.tick_format);

        debug!(
            rows = rows.len(),
            bars = assignments.len(),
            ticks = ticks.len(),
            "timeline laid out"
        );

        Layout::Chart(ChartLayout {
            width: config.width,
            height,
            bar_height: config.bar_height,
            hover_opacity: config.hover_opacity,
            plot_area,
            axis,
            ticks,
            rows,
        })
    }
}

//! Selection highlighting, hover linking and tooltips.
//!
//! Two independent emphases apply to bars:
//!
//! - *highlighted*: the bar's work order is the one the user searched for;
//! - *hover-linked*: the bar belongs to the same work order as the bar under
//!   the pointer, so every step of that order stands out together.

use chrono::NaiveDateTime;

use super::{BarLayout, ChartLayout};

/// Format of tooltip instants.
pub const TOOLTIP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// True only when `selected` is exactly `order_number`.
///
/// ```
/// use shopgantt::timeline::is_highlighted;
///
/// assert!(is_highlighted("MFG-2", Some("MFG-2")));
/// assert!(!is_highlighted("MFG-2", Some("MFG-20")));
/// assert!(!is_highlighted("MFG-2", None));
/// ```
pub fn is_highlighted(order_number: &str, selected: Option<&str>) -> bool {
    selected.is_some_and(|selected| selected == order_number)
}

/// True when `bar` shares its work order with the `hovered` bar (including
/// the hovered bar itself).
pub fn is_hover_linked(bar: &BarLayout, hovered: Option<&BarLayout>) -> bool {
    hovered.is_some_and(|hovered| hovered.order_number() == bar.order_number())
}

/// How a renderer should emphasise one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BarStyle {
    pub highlighted: bool,
    pub hover_linked: bool,
    pub opacity: f64,
}

impl ChartLayout {
    /// Style of `bar` given the searched order and the bar under the pointer.
    pub fn bar_style(&self, bar: &BarLayout, selected: Option<&str>, hovered: Option<&BarLayout>) -> BarStyle {
        let hover_linked = is_hover_linked(bar, hovered);
        BarStyle {
            highlighted: is_highlighted(bar.order_number(), selected),
            hover_linked,
            opacity: if hover_linked { self.hover_opacity } else { 1.0 },
        }
    }

    /// Bars of the work order `order_number`, row by row.
    pub fn bars_of_order<'a>(&'a self, order_number: &'a str) -> impl Iterator<Item = &'a BarLayout> + 'a {
        self.bars().filter(move |bar| bar.order_number() == order_number)
    }
}

/// Text shown next to the pointer for a hovered bar.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tooltip {
    pub machine_name: String,
    pub order_number: String,
    pub customer: String,
    pub start: String,
    pub end: String,
}

impl Tooltip {
    pub fn for_bar(bar: &BarLayout) -> Self {
        let format = |instant: NaiveDateTime| instant.format(TOOLTIP_FORMAT).to_string();
        Self {
            machine_name: bar.view.machine_name.clone(),
            order_number: bar.view.order_number.clone(),
            customer: bar.view.customer.clone(),
            start: format(bar.view.start()),
            end: format(bar.view.end()),
        }
    }
}

//! Time axis units and wall-clock conversions.
//!
//! Assignments carry timezone-naive wall-clock instants at minute granularity.
//! Scheduling and layout math runs on a single numeric axis: minutes elapsed
//! since the naive Unix epoch (`1970-01-01 00:00`), expressed as
//! `Quantity<Minute>`. Because every instant is a whole minute, axis values
//! are exact integers in `f64` and can be compared and used as map keys
//! without rounding surprises.

use chrono::{DateTime, NaiveDateTime, Timelike};
use qtty::{Hour, Minute, Quantity, Unit};

/// A position (or span) on the scheduling axis.
pub type Minutes = Quantity<Minute>;

/// Marker trait for units that share the same physical dimension.
///
/// Automatically implemented for any pair of units where
/// `From::Dim == To::Dim`, so tick steps and paddings expressed in hours or
/// seconds can be converted onto the minute axis at compile-time-checked
/// boundaries.
pub trait SameDim<To: Unit>: Unit<Dim = To::Dim> {}

impl<From, To> SameDim<To> for From
where
    From: Unit,
    To: Unit<Dim = From::Dim>,
{
}

/// Converts a quantity from one unit to another unit of the same dimension.
#[inline]
pub const fn convert<From, To>(q: Quantity<From>) -> Quantity<To>
where
    From: SameDim<To>,
    To: Unit,
{
    q.to_const::<To>()
}

/// One hour on the minute axis.
pub fn hour() -> Minutes {
    convert(Quantity::<Hour>::new(1.0))
}

/// Drops seconds and sub-second precision from `instant`.
pub fn truncate_to_minute(instant: NaiveDateTime) -> NaiveDateTime {
    instant
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(instant)
}

/// Maps a wall-clock instant onto the axis (whole minutes since the naive epoch).
pub fn to_axis(instant: NaiveDateTime) -> Minutes {
    let minutes = truncate_to_minute(instant).and_utc().timestamp() / 60;
    Quantity::new(minutes as f64)
}

/// Maps an axis position back to a wall-clock instant.
///
/// Fractional minutes are kept to the millisecond so that padded domain bounds
/// and inverted pointer positions can still be displayed. Returns `None` if
/// the position is outside chrono's representable range.
pub fn from_axis(position: Minutes) -> Option<NaiveDateTime> {
    let millis = (position.value() * 60_000.0).round();
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64).map(|dt| dt.naive_utc())
}

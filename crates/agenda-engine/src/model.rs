//! Input entities: the weekly class routine, ad-hoc scheduled items, and
//! holiday markers, plus the [`ScheduleSet`] bundle the engine's pure
//! functions consume.
//!
//! All entities arrive already materialized from whatever store the host
//! application uses (see [`crate::repository`]); the engine itself never
//! fetches or persists anything.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A weekly recurring event: fixed day-of-week, fixed time-of-day, no end
/// date. Date-independent until expanded onto a concrete calendar date.
///
/// `day_of_week` follows the source data's convention: `0 = Sunday` through
/// `6 = Saturday`. It is kept as a raw `u8` rather than `chrono::Weekday`
/// because the value comes from external storage and may be out of range;
/// expansion skips such records with a warning instead of refusing the whole
/// collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringEvent {
    pub id: String,
    pub title: String,
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

/// Priority of a scheduled item. Carried for list views; deliberately NOT
/// consulted by conflict resolution, which only distinguishes official from
/// non-official entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// An ad-hoc task or one-off event anchored to a single calendar date.
///
/// "Timed" when both `start_time` and `end_time` are present; "all-day"
/// otherwise. All-day items never enter the busy timeline but are kept for
/// list views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledItem {
    pub id: String,
    pub title: String,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub completed: bool,
    /// True for entries originating from the authoritative institutional
    /// calendar, as opposed to personally created ones.
    #[serde(default)]
    pub official: bool,
}

impl ScheduledItem {
    /// The item's raw busy window: `Some` only when both bounds are present.
    ///
    /// An item carrying just one bound cannot form an interval and is treated
    /// as all-day. The bounds are returned unvalidated; callers building a
    /// timeline validate `start < end` and drop violators with a warning.
    pub fn timed_window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// True when the item has no usable timed window.
    pub fn is_all_day(&self) -> bool {
        self.timed_window().is_none()
    }
}

/// A calendar holiday annotation. Informational by default: whether it also
/// suppresses free-slot computation is a policy choice
/// ([`crate::policy::HolidayPolicy`]), not a property of the marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayMarker {
    pub date: NaiveDate,
    pub name: String,
}

/// One immutable snapshot of everything the engine computes over: the weekly
/// routine, the scheduled items, and the holiday markers relevant to a query.
///
/// This is the "already-materialized collections" contract: the data access
/// layer fills one of these (or a [`crate::repository::ScheduleRepository`]
/// does), and every engine function reads it without further I/O.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSet {
    #[serde(default)]
    pub routine: Vec<RecurringEvent>,
    #[serde(default)]
    pub tasks: Vec<ScheduledItem>,
    #[serde(default)]
    pub holidays: Vec<HolidayMarker>,
}

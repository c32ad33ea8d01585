//! Day timeline construction -- merges routine occurrences, timed items, and
//! holiday markers for one date into a single ordered busy list.
//!
//! The merge order is a contract, not an implementation detail: ascending by
//! start, ties broken Routine-before-Task, remaining ties by input order.
//! Consumers (free-slot sweeps, conflict scans, UI timelines) rely on it
//! being deterministic.

use crate::expander::Occurrence;
use crate::interval::TimeInterval;
use crate::model::{HolidayMarker, ScheduledItem};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Where a busy interval came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// Expanded from the weekly class routine.
    Routine,
    /// A timed ad-hoc task or one-off event.
    Task,
}

/// A busy interval annotated with its provenance.
///
/// Routine occurrences are always official (they originate from the
/// institutional routine); tasks carry whatever flag their record holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedInterval {
    pub interval: TimeInterval,
    pub source: SourceKind,
    pub official: bool,
    /// Id of the originating routine event or scheduled item.
    pub ref_id: String,
    pub title: String,
}

/// One day's merged view: the ordered busy list, the all-day items kept for
/// list views, and the holiday flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTimeline {
    pub date: NaiveDate,
    /// Busy intervals sorted by the merge-order contract.
    pub busy: Vec<TaggedInterval>,
    /// Items due this date that carry no timed window. Excluded from `busy`.
    pub all_day: Vec<ScheduledItem>,
    /// True when the date is a Saturday or a holiday marker exists for it.
    pub holiday: bool,
}

/// Build one day's merged timeline.
///
/// Items are filtered to those due on `date`; of these, only items with a
/// valid timed window enter `busy` (the rest land in `all_day`). An item
/// whose window has `end <= start` is dropped with a warning and appears in
/// neither list -- the rest of the day still builds.
///
/// Sorting is stable on (start, Routine-before-Task), so entries that tie on
/// both keys keep their input order.
pub fn build_day(
    date: NaiveDate,
    occurrences: &[Occurrence],
    items: &[ScheduledItem],
    holidays: &[HolidayMarker],
) -> DayTimeline {
    let mut busy: Vec<TaggedInterval> = Vec::new();
    let mut all_day: Vec<ScheduledItem> = Vec::new();

    for occ in occurrences {
        busy.push(TaggedInterval {
            interval: occ.interval.clone(),
            source: SourceKind::Routine,
            official: true,
            ref_id: occ.event_id.clone(),
            title: occ.title.clone(),
        });
    }

    for item in items {
        if item.due_date != date {
            continue;
        }
        let Some((start, end)) = item.timed_window() else {
            all_day.push(item.clone());
            continue;
        };
        match TimeInterval::new(start, end) {
            Ok(interval) => busy.push(TaggedInterval {
                interval,
                source: SourceKind::Task,
                official: item.official,
                ref_id: item.id.clone(),
                title: item.title.clone(),
            }),
            Err(err) => {
                warn!(item_id = %item.id, %err, "dropping scheduled item with invalid window");
            }
        }
    }

    // Stable sort: equal (start, rank) keys keep input order, and routine
    // entries were pushed before tasks.
    busy.sort_by_key(|entry| (entry.interval.start, source_rank(entry.source)));

    DayTimeline {
        date,
        busy,
        all_day,
        holiday: is_holiday(date, holidays),
    }
}

/// Saturday, or any date carrying a holiday marker.
pub fn is_holiday(date: NaiveDate, holidays: &[HolidayMarker]) -> bool {
    date.weekday() == Weekday::Sat || holidays.iter().any(|h| h.date == date)
}

fn source_rank(source: SourceKind) -> u8 {
    match source {
        SourceKind::Routine => 0,
        SourceKind::Task => 1,
    }
}

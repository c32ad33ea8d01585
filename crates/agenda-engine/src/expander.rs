//! Recurrence expansion -- projects weekly routine definitions onto a
//! concrete calendar date.
//!
//! This is the only place where day-of-week and time-of-day values become
//! absolute instants. Everything downstream (timeline merging, free-slot
//! sweeps, conflict detection) operates purely on intervals.

use crate::interval::TimeInterval;
use crate::model::RecurringEvent;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A routine event anchored to one specific calendar date: the provenance of
/// the definition plus its concrete interval on that date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Id of the [`RecurringEvent`] this occurrence was derived from.
    pub event_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    pub interval: TimeInterval,
}

/// Expand a weekly routine onto one calendar date.
///
/// Each event whose `day_of_week` matches `date` produces exactly one
/// [`Occurrence`] with the event's time-of-day bounds projected onto `date`.
/// Non-matching events produce nothing.
///
/// Guarantees:
/// - output preserves input order;
/// - no dedup -- two routine events sharing a day both appear even when they
///   overlap (overlaps among routine entries are the conflict detector's
///   concern, never silently merged away here).
///
/// Records that cannot expand are skipped with a warning, never fatal:
/// - `day_of_week > 6` (malformed recurrence);
/// - `start_time >= end_time` (invalid definition; no midnight-crossing
///   events are supported).
pub fn expand_routine(events: &[RecurringEvent], date: NaiveDate) -> Vec<Occurrence> {
    // chrono counts from Sunday, matching the source data's 0..6 convention.
    let target = date.weekday().num_days_from_sunday() as u8;

    let mut occurrences = Vec::new();
    for event in events {
        if event.day_of_week > 6 {
            warn!(
                event_id = %event.id,
                day_of_week = event.day_of_week,
                "skipping routine event with out-of-range day-of-week"
            );
            continue;
        }
        if event.day_of_week != target {
            continue;
        }
        if event.start_time >= event.end_time {
            warn!(
                event_id = %event.id,
                start = %event.start_time,
                end = %event.end_time,
                "skipping routine event whose start is not before its end"
            );
            continue;
        }

        occurrences.push(Occurrence {
            event_id: event.id.clone(),
            title: event.title.clone(),
            room: event.room.clone(),
            interval: TimeInterval {
                start: date.and_time(event.start_time).and_utc(),
                end: date.and_time(event.end_time).and_utc(),
            },
        });
    }

    occurrences
}

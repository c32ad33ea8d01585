//! Free-slot computation -- sweeps a day's busy intervals against the
//! working-hours window.
//!
//! A single left-to-right cursor pass: gaps between the cursor and the next
//! busy start become free slots; the cursor only ever advances via `max`, so
//! overlapping and contained busy intervals are absorbed without
//! double-subtraction and no negative-length slot can be emitted.

use crate::interval::TimeInterval;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A span of uncommitted time inside the working-hours window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl FreeSlot {
    fn span(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            duration_minutes: (end - start).num_minutes(),
        }
    }
}

/// Compute the free slots of `[work_start, work_end)` left by `busy`.
///
/// `non_working` short-circuits to an empty list regardless of input -- the
/// weekly off-day rule. Otherwise the cursor sweep runs; busy intervals may
/// lie partly or wholly outside the window, and emitted gaps are clamped to
/// it, so the returned slots plus the window-clipped busy time always tile
/// `[work_start, work_end)` exactly.
///
/// Preconditions (caller's responsibility, not re-checked here): `busy` is
/// sorted ascending by start and every interval satisfies `start < end`.
/// [`crate::timeline::build_day`] produces such input.
pub fn free_slots(
    busy: &[TimeInterval],
    work_start: DateTime<Utc>,
    work_end: DateTime<Utc>,
    non_working: bool,
) -> Vec<FreeSlot> {
    if non_working {
        return Vec::new();
    }

    let mut slots = Vec::new();
    let mut cursor = work_start;

    for interval in busy {
        if cursor >= work_end {
            break;
        }
        if interval.start > cursor {
            let gap_end = interval.start.min(work_end);
            if gap_end > cursor {
                slots.push(FreeSlot::span(cursor, gap_end));
            }
        }
        cursor = cursor.max(interval.end);
    }

    // Trailing slot after the last busy interval.
    if cursor < work_end {
        slots.push(FreeSlot::span(cursor, work_end));
    }

    slots
}

/// First free slot of at least `min_duration_minutes`, if any.
///
/// Delegates to [`free_slots`] and scans in order, so the earliest qualifying
/// gap wins.
pub fn first_free_slot(
    busy: &[TimeInterval],
    work_start: DateTime<Utc>,
    work_end: DateTime<Utc>,
    non_working: bool,
    min_duration_minutes: i64,
) -> Option<FreeSlot> {
    free_slots(busy, work_start, work_end, non_working)
        .into_iter()
        .find(|slot| slot.duration_minutes >= min_duration_minutes)
}

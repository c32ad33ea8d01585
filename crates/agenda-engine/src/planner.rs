//! Composition root: wires expansion, timeline construction, free-slot
//! computation, and conflict detection into the queries consumers actually
//! ask.
//!
//! Two layers, same semantics:
//!
//! - pure functions over a materialized [`ScheduleSet`] snapshot
//!   ([`compose_day`], [`collect_entries`], [`find_conflicts`]);
//! - [`Planner`], which answers the same queries through a
//!   [`ScheduleRepository`] so callers hold one handle instead of plumbing
//!   collections around.

use crate::conflict::{detect_conflicts, ConflictRecord};
use crate::error::Result;
use crate::expander::expand_routine;
use crate::freeslots::{free_slots, FreeSlot};
use crate::model::ScheduleSet;
use crate::policy::{HolidayPolicy, WorkingHours};
use crate::repository::ScheduleRepository;
use crate::timeline::{build_day, DayTimeline, TaggedInterval};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One rendered day: the merged busy timeline plus the free slots left open
/// by it. Everything a day screen needs in a single call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayView {
    pub timeline: DayTimeline,
    pub free: Vec<FreeSlot>,
}

/// Compose a single day from a snapshot.
///
/// Saturdays never yield free slots. Holiday-marked weekdays yield none only
/// under [`HolidayPolicy::Blocking`]; under the default
/// [`HolidayPolicy::Decorative`] the marker shows on the timeline and free
/// slots are computed as usual.
pub fn compose_day(
    set: &ScheduleSet,
    date: NaiveDate,
    hours: &WorkingHours,
    policy: HolidayPolicy,
) -> DayView {
    let occurrences = expand_routine(&set.routine, date);
    let timeline = build_day(date, &occurrences, &set.tasks, &set.holidays);

    let saturday = date.weekday() == Weekday::Sat;
    let marked = set.holidays.iter().any(|h| h.date == date);
    let non_working = saturday || (policy == HolidayPolicy::Blocking && marked);

    let busy: Vec<_> = timeline.busy.iter().map(|e| e.interval.clone()).collect();
    let (work_start, work_end) = hours.window_on(date);
    let free = free_slots(&busy, work_start, work_end, non_working);

    DayView { timeline, free }
}

/// Every busy entry in `from..=to`, day by day in ascending date order, each
/// day already merge-sorted. This is the input shape conflict detection over
/// a range wants.
///
/// An inverted range (`from > to`) yields no entries.
pub fn collect_entries(set: &ScheduleSet, from: NaiveDate, to: NaiveDate) -> Vec<TaggedInterval> {
    let mut entries = Vec::new();
    let mut date = from;
    while date <= to {
        let occurrences = expand_routine(&set.routine, date);
        entries.extend(build_day(date, &occurrences, &set.tasks, &set.holidays).busy);
        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    entries
}

/// Detect every pairwise conflict among the busy entries of `from..=to`.
pub fn find_conflicts(set: &ScheduleSet, from: NaiveDate, to: NaiveDate) -> Vec<ConflictRecord> {
    detect_conflicts(&collect_entries(set, from, to))
}

/// Repository-backed façade over the pure queries.
///
/// Holds the store behind [`Arc<dyn ScheduleRepository>`] so the same planner
/// serves an in-memory store in tests and a remote-backed one in production.
#[derive(Clone)]
pub struct Planner {
    repo: Arc<dyn ScheduleRepository>,
    hours: WorkingHours,
    holiday_policy: HolidayPolicy,
}

impl Planner {
    /// Planner with default working hours (09:00 to 17:00) and decorative
    /// holidays.
    pub fn new(repo: Arc<dyn ScheduleRepository>) -> Self {
        Self {
            repo,
            hours: WorkingHours::default(),
            holiday_policy: HolidayPolicy::default(),
        }
    }

    pub fn with_hours(mut self, hours: WorkingHours) -> Self {
        self.hours = hours;
        self
    }

    pub fn with_holiday_policy(mut self, policy: HolidayPolicy) -> Self {
        self.holiday_policy = policy;
        self
    }

    /// Timeline plus free slots for one date.
    ///
    /// # Errors
    ///
    /// Propagates repository failures; the composition itself cannot fail.
    pub fn day_view(&self, date: NaiveDate) -> Result<DayView> {
        let set = self.repo.snapshot(date, date)?;
        Ok(compose_day(&set, date, &self.hours, self.holiday_policy))
    }

    /// Conflicts among all busy entries in `from..=to`.
    ///
    /// # Errors
    ///
    /// Propagates repository failures.
    pub fn conflicts(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<ConflictRecord>> {
        let set = self.repo.snapshot(from, to)?;
        Ok(find_conflicts(&set, from, to))
    }
}

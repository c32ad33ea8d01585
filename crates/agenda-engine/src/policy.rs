//! Planning policies: the working-hours window and how holiday markers are
//! treated when composing a day.

use crate::error::{AgendaError, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// The daily window free-slot computation runs over.
///
/// Times of day only; [`WorkingHours::window_on`] pins them to a concrete
/// date when a day is composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl WorkingHours {
    /// Build a validated window.
    ///
    /// # Errors
    ///
    /// Returns [`AgendaError::InvalidWorkingHours`] when `start >= end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if start >= end {
            return Err(AgendaError::InvalidWorkingHours(format!(
                "start {start} is not before end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Instantiate the window on a concrete date.
    pub fn window_on(&self, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        (
            date.and_time(self.start).and_utc(),
            date.and_time(self.end).and_utc(),
        )
    }
}

impl Default for WorkingHours {
    /// 09:00 to 17:00, the conventional faculty day.
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        }
    }
}

/// How holiday markers influence free-slot computation.
///
/// Saturdays are non-working under either policy; the policy only decides
/// whether a marker on an otherwise ordinary day suppresses free slots too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HolidayPolicy {
    /// Markers annotate the timeline but leave free slots untouched.
    #[default]
    Decorative,
    /// Marker days yield no free slots, same as Saturdays.
    Blocking,
}

//! Closed-open time intervals and the arithmetic the rest of the engine
//! shares: validation, overlap testing, and intersection.
//!
//! Every interval is a pair of absolute instants. Time-of-day values never
//! appear here -- they are converted exactly once, at the recurrence
//! expansion boundary.

use crate::error::{AgendaError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A span of committed time: `[start, end)` with `start < end`.
///
/// Zero-length and inverted intervals are invalid; [`TimeInterval::new`]
/// rejects them. Code that builds intervals from already-validated bounds may
/// construct the struct directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    /// Build a validated interval.
    ///
    /// # Errors
    /// Returns `AgendaError::InvalidInterval` if `end <= start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end <= start {
            return Err(AgendaError::InvalidInterval(format!(
                "end {} is not after start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    ///
    /// Strict inequalities: adjacent intervals (one ends exactly when the
    /// other starts) do NOT overlap. Symmetric in its arguments.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The shared span `[max(starts), min(ends)]`, or `None` when the
    /// intervals do not overlap. Identical regardless of argument order.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        })
    }

    /// Whole minutes between start and end.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

//! # agenda-engine
//!
//! Schedule aggregation and conflict resolution for a faculty planner.
//!
//! The engine consumes already-materialized schedule data (a fixed weekly
//! class routine, ad-hoc scheduled items, holiday markers) and answers the
//! three questions a planner front end asks: what does this day look like,
//! where is the free time, and which entries collide. Every computation is
//! pure and synchronous over an immutable snapshot; persistence and conflict
//! narration sit behind traits at the crate edge.
//!
//! ## Modules
//!
//! - [`model`]: input entities and the [`ScheduleSet`] snapshot bundle
//! - [`interval`]: validated half-open interval arithmetic
//! - [`expander`]: weekly routine expanded onto a concrete calendar date
//! - [`timeline`]: per-day merge of routine occurrences and timed items
//! - [`freeslots`]: gaps in a working-hours window around busy intervals
//! - [`conflict`]: pairwise overlap detection with resolution recommendations
//! - [`narrate`]: conflict narration seam with a templated fallback
//! - [`policy`]: working-hours window and holiday handling knobs
//! - [`repository`]: storage trait plus an in-memory implementation
//! - [`planner`]: day-view and conflict queries composed end to end
//! - [`error`]: error types

pub mod conflict;
pub mod error;
pub mod expander;
pub mod freeslots;
pub mod interval;
pub mod model;
pub mod narrate;
pub mod planner;
pub mod policy;
pub mod repository;
pub mod timeline;

pub use conflict::{detect_conflicts, ConflictRecord, Recommendation};
pub use error::{AgendaError, Result};
pub use expander::{expand_routine, Occurrence};
pub use freeslots::{first_free_slot, free_slots, FreeSlot};
pub use interval::TimeInterval;
pub use model::{HolidayMarker, Priority, RecurringEvent, ScheduleSet, ScheduledItem};
pub use narrate::{narrate_or_fallback, ConflictNarrator, Narration};
pub use planner::{collect_entries, compose_day, find_conflicts, DayView, Planner};
pub use policy::{HolidayPolicy, WorkingHours};
pub use repository::{ItemChange, ItemDraft, MemoryRepository, ScheduleRepository};
pub use timeline::{build_day, is_holiday, DayTimeline, SourceKind, TaggedInterval};

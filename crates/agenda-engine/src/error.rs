//! Error types for agenda-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgendaError {
    /// An interval with `end <= start`. Pipeline stages drop the offending
    /// record with a warning instead of propagating this.
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    /// A recurring definition with an out-of-range day-of-week or inverted
    /// time bounds. Skipped during expansion, never fatal.
    #[error("Malformed recurrence: {0}")]
    MalformedRecurrence(String),

    /// The external narration collaborator errored or timed out. Callers fall
    /// back to templated text.
    #[error("Narrator unavailable: {0}")]
    NarratorUnavailable(String),

    /// A working-hours window with `end <= start`.
    #[error("Invalid working hours: {0}")]
    InvalidWorkingHours(String),

    /// A repository lookup by id found nothing.
    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, AgendaError>;

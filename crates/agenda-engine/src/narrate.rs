//! Conflict narration -- the seam to the external natural-language service,
//! plus the templated fallback the engine guarantees.
//!
//! The engine never depends on the collaborator being reachable: a missing
//! narrator gets the template, and a failing one gets the template plus a
//! `degraded` flag and a warning. Narration problems are never surfaced as
//! errors to the caller.

use crate::conflict::{ConflictRecord, Recommendation};
use crate::error::Result;
use crate::interval::TimeInterval;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Turns a structured conflict record into human-readable text.
///
/// Implemented outside the engine (the reference system backs this with a
/// prompt-based service). Implementations should map their transport or
/// timeout failures into [`crate::AgendaError::NarratorUnavailable`].
pub trait ConflictNarrator {
    fn narrate(&self, record: &ConflictRecord) -> Result<String>;
}

/// Narration outcome. `degraded` is true only when a narrator was present
/// and failed, and the templated text was substituted -- a degraded but
/// successful result, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Narration {
    pub text: String,
    pub degraded: bool,
}

/// Narrate a conflict, falling back to the built-in template.
///
/// - `None` narrator: template text, not degraded (the template IS the
///   baseline contract).
/// - `Some` narrator returning `Ok`: its text verbatim.
/// - `Some` narrator returning `Err`: template text, `degraded = true`, one
///   warning logged.
pub fn narrate_or_fallback(
    narrator: Option<&dyn ConflictNarrator>,
    record: &ConflictRecord,
) -> Narration {
    match narrator {
        None => Narration {
            text: fallback_text(record),
            degraded: false,
        },
        Some(n) => match n.narrate(record) {
            Ok(text) => Narration {
                text,
                degraded: false,
            },
            Err(err) => {
                warn!(%err, "conflict narrator failed; using templated text");
                Narration {
                    text: fallback_text(record),
                    degraded: true,
                }
            }
        },
    }
}

/// The generic templated recommendation, built from nothing but the record.
pub fn fallback_text(record: &ConflictRecord) -> String {
    let span = format_span(&record.overlap);
    match record.recommendation {
        Recommendation::RescheduleA => format!(
            "Reschedule \"{}\": it overlaps the official entry \"{}\" ({}).",
            record.a.title, record.b.title, span
        ),
        Recommendation::RescheduleB => format!(
            "Reschedule \"{}\": it overlaps the official entry \"{}\" ({}).",
            record.b.title, record.a.title, span
        ),
        Recommendation::ManualReview => format!(
            "Manual review required: \"{}\" and \"{}\" overlap ({}) and neither takes precedence.",
            record.a.title, record.b.title, span
        ),
    }
}

fn format_span(overlap: &TimeInterval) -> String {
    if overlap.start.date_naive() == overlap.end.date_naive() {
        format!(
            "{} to {}",
            overlap.start.format("%Y-%m-%d %H:%M"),
            overlap.end.format("%H:%M")
        )
    } else {
        format!(
            "{} to {}",
            overlap.start.format("%Y-%m-%d %H:%M"),
            overlap.end.format("%Y-%m-%d %H:%M")
        )
    }
}

//! Conflict detection -- pairwise overlap scan over tagged entries with a
//! resolution recommendation per overlapping pair.
//!
//! Adjacent entries (one ends exactly when the other starts) are NOT
//! conflicts. The scan is O(n²) over the queried entry set, which is fine at
//! the expected scale of tens of entries; the contract would survive a
//! sweep-line replacement unchanged if that ever stops being true.

use crate::interval::TimeInterval;
use crate::timeline::TaggedInterval;
use serde::{Deserialize, Serialize};

/// What to do about an overlapping pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    /// Move the first entry of the pair; the second is official.
    RescheduleA,
    /// Move the second entry of the pair; the first is official.
    RescheduleB,
    /// Both official or both personal -- no automatic winner.
    ManualReview,
}

/// A detected overlap between two entries, with the shared span and the
/// resolution the policy recommends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub a: TaggedInterval,
    pub b: TaggedInterval,
    pub overlap: TimeInterval,
    pub recommendation: Recommendation,
}

/// Scan every unordered pair of entries for overlaps.
///
/// Entries may span multiple dates; intervals on different days simply never
/// overlap. Records are emitted in first-encounter order -- the pair (i, j)
/// with i < j appears when the scan reaches i -- so results are deterministic
/// and directly comparable in tests.
///
/// Resolution policy:
/// - exactly one of the pair is official -> reschedule the other one;
/// - both official or both non-official -> manual review, no automatic
///   priority between equals.
pub fn detect_conflicts(entries: &[TaggedInterval]) -> Vec<ConflictRecord> {
    let mut records = Vec::new();

    for i in 0..entries.len() {
        for j in (i + 1)..entries.len() {
            let a = &entries[i];
            let b = &entries[j];
            let Some(overlap) = a.interval.intersection(&b.interval) else {
                continue;
            };
            records.push(ConflictRecord {
                a: a.clone(),
                b: b.clone(),
                overlap,
                recommendation: classify(a.official, b.official),
            });
        }
    }

    records
}

/// The official entry always stands; equals go to manual review.
fn classify(a_official: bool, b_official: bool) -> Recommendation {
    match (a_official, b_official) {
        (true, false) => Recommendation::RescheduleB,
        (false, true) => Recommendation::RescheduleA,
        _ => Recommendation::ManualReview,
    }
}

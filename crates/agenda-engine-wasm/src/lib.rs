//! WASM bindings for agenda-engine.
//!
//! Exposes routine expansion, day views, free-slot queries, and conflict
//! detection to JavaScript via `wasm-bindgen`. All structured data crosses
//! the boundary as JSON strings: the host passes the same schedule document
//! the CLI reads, and results come back as JSON arrays/objects.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p agenda-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/agenda_engine_wasm.wasm
//! ```

use agenda_engine::{
    compose_day, find_conflicts, narrate_or_fallback, HolidayPolicy, RecurringEvent, ScheduleSet,
    WorkingHours,
};
use chrono::{NaiveDate, NaiveTime};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Parsing helpers: map every failure onto a JsValue error message
// ---------------------------------------------------------------------------

fn parse_schedule(json: &str) -> Result<ScheduleSet, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid schedule JSON: {}", e)))
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

/// Parse an optional HH:MM string, falling back to `default` when absent.
fn parse_time(s: Option<&str>, default: (u32, u32)) -> Result<NaiveTime, JsValue> {
    match s {
        Some(raw) => NaiveTime::parse_from_str(raw, "%H:%M")
            .map_err(|e| JsValue::from_str(&format!("Invalid time '{}': {}", raw, e))),
        None => NaiveTime::from_hms_opt(default.0, default.1, 0)
            .ok_or_else(|| JsValue::from_str("invalid default time")),
    }
}

fn hours(work_start: Option<String>, work_end: Option<String>) -> Result<WorkingHours, JsValue> {
    let start = parse_time(work_start.as_deref(), (9, 0))?;
    let end = parse_time(work_end.as_deref(), (17, 0))?;
    WorkingHours::new(start, end).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn policy(holidays_block: Option<bool>) -> HolidayPolicy {
    if holidays_block.unwrap_or(false) {
        HolidayPolicy::Blocking
    } else {
        HolidayPolicy::Decorative
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Expand a weekly routine onto one calendar date.
///
/// `routine_json` must be a JSON array of recurring-event objects (the
/// `routine` section of a schedule document); `date` is `YYYY-MM-DD`.
/// Returns a JSON array of occurrences with concrete UTC intervals.
#[wasm_bindgen(js_name = "expandRoutine")]
pub fn expand_routine(routine_json: &str, date: &str) -> Result<String, JsValue> {
    let routine: Vec<RecurringEvent> = serde_json::from_str(routine_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid routine JSON: {}", e)))?;
    let date = parse_date(date)?;

    let occurrences = agenda_engine::expand_routine(&routine, date);
    to_json(&occurrences)
}

/// Compose one day from a schedule document: merged busy timeline, all-day
/// items, holiday flag, and free slots.
///
/// # Arguments
/// - `schedule_json` -- schedule document (`routine`, `tasks`, `holidays`)
/// - `date` -- day to render, `YYYY-MM-DD`
/// - `work_start` / `work_end` -- optional `HH:MM` window bounds
///   (default 09:00 and 17:00)
/// - `holidays_block` -- optional; true makes holiday markers suppress free
///   slots like Saturdays do
#[wasm_bindgen(js_name = "dayView")]
pub fn day_view(
    schedule_json: &str,
    date: &str,
    work_start: Option<String>,
    work_end: Option<String>,
    holidays_block: Option<bool>,
) -> Result<String, JsValue> {
    let set = parse_schedule(schedule_json)?;
    let date = parse_date(date)?;
    let hours = hours(work_start, work_end)?;

    let view = compose_day(&set, date, &hours, policy(holidays_block));
    to_json(&view)
}

/// Free slots of one day, optionally keeping only slots of at least
/// `min_minutes`. Same arguments as [`day_view`] otherwise.
#[wasm_bindgen(js_name = "freeSlots")]
pub fn free_slots(
    schedule_json: &str,
    date: &str,
    work_start: Option<String>,
    work_end: Option<String>,
    holidays_block: Option<bool>,
    min_minutes: Option<u32>,
) -> Result<String, JsValue> {
    let set = parse_schedule(schedule_json)?;
    let date = parse_date(date)?;
    let hours = hours(work_start, work_end)?;

    let view = compose_day(&set, date, &hours, policy(holidays_block));
    let min = i64::from(min_minutes.unwrap_or(0));
    let slots: Vec<_> = view
        .free
        .into_iter()
        .filter(|slot| slot.duration_minutes >= min)
        .collect();
    to_json(&slots)
}

/// Detect conflicts over an inclusive date range.
///
/// Returns a JSON array of `{record, narration, degraded}` objects: the
/// structured conflict plus the templated recommendation text the host can
/// show as-is or replace with its own narration.
#[wasm_bindgen(js_name = "findConflicts")]
pub fn find_conflicts_js(
    schedule_json: &str,
    from: &str,
    to: &str,
) -> Result<String, JsValue> {
    let set = parse_schedule(schedule_json)?;
    let from = parse_date(from)?;
    let to = parse_date(to)?;

    let report: Vec<serde_json::Value> = find_conflicts(&set, from, to)
        .iter()
        .map(|record| {
            let narration = narrate_or_fallback(None, record);
            serde_json::json!({
                "record": record,
                "narration": narration.text,
                "degraded": narration.degraded,
            })
        })
        .collect();
    to_json(&report)
}

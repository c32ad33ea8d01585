//! `agenda` CLI: day timelines, free slots, and conflict reports from a JSON
//! schedule document.
//!
//! ## Usage
//!
//! ```sh
//! # Render a day (stdin -> stdout)
//! cat schedule.json | agenda day --date 2026-03-02
//!
//! # Free slots from a file, custom working hours
//! agenda free --date 2026-03-02 -i schedule.json --work-start 08:00 --work-end 18:00
//!
//! # Only slots of an hour or more
//! agenda free --date 2026-03-02 -i schedule.json --min 60
//!
//! # Conflict report for a week, as JSON
//! agenda conflicts --from 2026-03-02 --to 2026-03-08 -i schedule.json --json
//!
//! # Treat holiday markers as blocking
//! agenda free --date 2026-03-05 -i schedule.json --holidays-block
//! ```

use agenda_engine::{
    narrate_or_fallback, ConflictRecord, DayView, FreeSlot, HolidayPolicy, MemoryRepository,
    Planner, ScheduleSet, WorkingHours,
};
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use std::fmt::Write as _;
use std::io::{self, Read};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "agenda",
    version,
    about = "Schedule aggregation and conflict resolution CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CommonOpts {
    /// Schedule document (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// Output file (writes to stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,
    /// Start of the working day, HH:MM
    #[arg(long, value_parser = parse_hhmm, default_value = "09:00")]
    work_start: NaiveTime,
    /// End of the working day, HH:MM
    #[arg(long, value_parser = parse_hhmm, default_value = "17:00")]
    work_end: NaiveTime,
    /// Suppress free slots on holiday-marked days, not just Saturdays
    #[arg(long)]
    holidays_block: bool,
    /// Emit JSON instead of human-readable text
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one day: merged timeline, all-day items, and free slots
    Day {
        /// Date to render, YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        #[command(flatten)]
        opts: CommonOpts,
    },
    /// List the free slots of one day
    Free {
        /// Date to query, YYYY-MM-DD
        #[arg(long)]
        date: NaiveDate,
        /// Only report slots of at least this many minutes
        #[arg(long)]
        min: Option<i64>,
        #[command(flatten)]
        opts: CommonOpts,
    },
    /// Report conflicts over an inclusive date range
    Conflicts {
        /// First date of the range, YYYY-MM-DD
        #[arg(long)]
        from: NaiveDate,
        /// Last date of the range, YYYY-MM-DD
        #[arg(long)]
        to: NaiveDate,
        #[command(flatten)]
        opts: CommonOpts,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Day { date, opts } => {
            let planner = load_planner(&opts)?;
            let view = planner.day_view(date)?;
            let rendered = if opts.json {
                to_pretty_json(&view)?
            } else {
                render_day(date, &view)
            };
            write_output(opts.output.as_deref(), &rendered)?;
        }
        Commands::Free { date, min, opts } => {
            let planner = load_planner(&opts)?;
            let view = planner.day_view(date)?;
            let slots: Vec<FreeSlot> = match min {
                Some(min) => view
                    .free
                    .into_iter()
                    .filter(|slot| slot.duration_minutes >= min)
                    .collect(),
                None => view.free,
            };
            let rendered = if opts.json {
                to_pretty_json(&slots)?
            } else {
                render_free(date, &slots, view.timeline.holiday)
            };
            write_output(opts.output.as_deref(), &rendered)?;
        }
        Commands::Conflicts { from, to, opts } => {
            let planner = load_planner(&opts)?;
            let records = planner.conflicts(from, to)?;
            let rendered = if opts.json {
                conflicts_json(&records)?
            } else {
                render_conflicts(from, to, &records)
            };
            write_output(opts.output.as_deref(), &rendered)?;
        }
    }

    Ok(())
}

fn parse_hhmm(raw: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|err| format!("invalid time {raw:?} (expected HH:MM): {err}"))
}

/// Warnings from the engine (dropped records, narrator fallbacks) go to
/// stderr so stdout stays parseable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Parse the input document and assemble a planner with the requested
/// policies.
fn load_planner(opts: &CommonOpts) -> Result<Planner> {
    let raw = read_input(opts.input.as_deref())?;
    let set: ScheduleSet =
        serde_json::from_str(&raw).context("Failed to parse schedule document")?;
    let hours =
        WorkingHours::new(opts.work_start, opts.work_end).context("Invalid working hours")?;
    let policy = if opts.holidays_block {
        HolidayPolicy::Blocking
    } else {
        HolidayPolicy::Decorative
    };

    Ok(Planner::new(Arc::new(MemoryRepository::seeded(set)))
        .with_hours(hours)
        .with_holiday_policy(policy))
}

fn render_day(date: NaiveDate, view: &DayView) -> String {
    let mut out = String::new();
    let holiday = if view.timeline.holiday { " (holiday)" } else { "" };
    let _ = writeln!(out, "{}{}", date.format("%A %Y-%m-%d"), holiday);

    let _ = writeln!(out, "Busy:");
    if view.timeline.busy.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for entry in &view.timeline.busy {
        let _ = writeln!(
            out,
            "  {}-{}  {}{}",
            entry.interval.start.format("%H:%M"),
            entry.interval.end.format("%H:%M"),
            entry.title,
            if entry.official { " [official]" } else { "" }
        );
    }

    if !view.timeline.all_day.is_empty() {
        let _ = writeln!(out, "All-day:");
        for item in &view.timeline.all_day {
            let _ = writeln!(out, "  - {}", item.title);
        }
    }

    let _ = writeln!(out, "Free:");
    out.push_str(&slot_lines(&view.free, view.timeline.holiday));
    out
}

fn render_free(date: NaiveDate, slots: &[FreeSlot], holiday: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Free slots for {}:", date.format("%A %Y-%m-%d"));
    out.push_str(&slot_lines(slots, holiday));
    out
}

fn slot_lines(slots: &[FreeSlot], holiday: bool) -> String {
    if slots.is_empty() {
        return if holiday {
            "  non-working day, no free slots\n".to_string()
        } else {
            "  (none)\n".to_string()
        };
    }
    let mut out = String::new();
    for slot in slots {
        let _ = writeln!(
            out,
            "  {}-{}  ({} min)",
            slot.start.format("%H:%M"),
            slot.end.format("%H:%M"),
            slot.duration_minutes
        );
    }
    out
}

fn render_conflicts(from: NaiveDate, to: NaiveDate, records: &[ConflictRecord]) -> String {
    if records.is_empty() {
        return format!("No conflicts between {from} and {to}.\n");
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} conflict(s) between {} and {}:",
        records.len(),
        from,
        to
    );
    for (index, record) in records.iter().enumerate() {
        let narration = narrate_or_fallback(None, record);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}. {} / {}", index + 1, record.a.title, record.b.title);
        let _ = writeln!(out, "   overlap: {} min", record.overlap.duration_minutes());
        let _ = writeln!(out, "   {}", narration.text);
    }
    out
}

/// Conflict records plus their narration, one JSON array.
fn conflicts_json(records: &[ConflictRecord]) -> Result<String> {
    let report: Vec<serde_json::Value> = records
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
    to_pretty_json(&report)
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String> {
    let mut rendered =
        serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    rendered.push('\n');
    Ok(rendered)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}

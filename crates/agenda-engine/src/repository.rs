//! Storage seam: the trait schedule data is loaded and saved through, plus an
//! in-memory implementation for tests, the CLI, and local development.
//!
//! Item writes go through [`ItemChange`], which makes create-versus-update an
//! explicit tagged choice instead of sniffing the payload for an id. The
//! engine's computations never touch this module; they consume materialized
//! [`crate::model::ScheduleSet`] snapshots, and [`crate::planner::Planner`] is
//! the piece that bridges the two.

use crate::error::{AgendaError, Result};
use crate::model::{HolidayMarker, Priority, RecurringEvent, ScheduleSet, ScheduledItem};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock};

/// Everything needed to create or replace a scheduled item, minus its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub title: String,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub official: bool,
}

impl ItemDraft {
    /// Materialize the draft under a concrete id.
    pub fn into_item(self, id: String) -> ScheduledItem {
        ScheduledItem {
            id,
            title: self.title,
            due_date: self.due_date,
            start_time: self.start_time,
            end_time: self.end_time,
            priority: self.priority,
            completed: self.completed,
            official: self.official,
        }
    }
}

/// A write to the item collection. `Create` lets the store assign the id;
/// `Update` replaces the identified item wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemChange {
    Create(ItemDraft),
    Update { id: String, draft: ItemDraft },
}

/// Backing store for routine events, scheduled items, and holiday markers.
///
/// Implementations may block (a remote document store sits behind this trait
/// in the reference deployment); the engine itself only ever sees the
/// collections an implementation hands back.
pub trait ScheduleRepository: Send + Sync {
    /// All recurring events, in stored order.
    fn list_routine(&self) -> Result<Vec<RecurringEvent>>;

    /// Append a recurring event. The caller owns id uniqueness.
    fn add_routine(&self, event: RecurringEvent) -> Result<()>;

    /// Replace the recurring event with `event.id`.
    ///
    /// # Errors
    ///
    /// [`AgendaError::NotFound`] when no event carries that id.
    fn update_routine(&self, event: RecurringEvent) -> Result<()>;

    /// Remove the recurring event with `id`.
    ///
    /// # Errors
    ///
    /// [`AgendaError::NotFound`] when no event carries that id.
    fn delete_routine(&self, id: &str) -> Result<()>;

    /// Scheduled items with `due_date` in `from..=to`, in stored order.
    fn list_items(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<ScheduledItem>>;

    /// Apply a create or update and return the stored item.
    ///
    /// # Errors
    ///
    /// [`AgendaError::NotFound`] for an [`ItemChange::Update`] naming an
    /// unknown id.
    fn apply_item(&self, change: ItemChange) -> Result<ScheduledItem>;

    /// Remove the scheduled item with `id`.
    ///
    /// # Errors
    ///
    /// [`AgendaError::NotFound`] when no item carries that id.
    fn delete_item(&self, id: &str) -> Result<()>;

    /// Holiday markers with `date` in `from..=to`, in stored order.
    fn list_holidays(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<HolidayMarker>>;

    /// One snapshot covering `from..=to`: the full routine plus range-filtered
    /// items and holidays.
    fn snapshot(&self, from: NaiveDate, to: NaiveDate) -> Result<ScheduleSet> {
        Ok(ScheduleSet {
            routine: self.list_routine()?,
            tasks: self.list_items(from, to)?,
            holidays: self.list_holidays(from, to)?,
        })
    }
}

#[derive(Debug, Default)]
struct Store {
    routine: Vec<RecurringEvent>,
    items: Vec<ScheduledItem>,
    holidays: Vec<HolidayMarker>,
    next_id: u64,
}

/// In-memory [`ScheduleRepository`]. Assigns sequential `task-<n>` ids on
/// create and keeps insertion order, so listings are deterministic.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    inner: RwLock<Store>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot, e.g. a deserialized schedule document.
    pub fn seeded(set: ScheduleSet) -> Self {
        Self {
            inner: RwLock::new(Store {
                routine: set.routine,
                items: set.tasks,
                holidays: set.holidays,
                next_id: 0,
            }),
        }
    }

    // Lock poisoning only means another caller panicked mid-operation; every
    // mutation here leaves the vectors structurally valid, so recover the
    // guard instead of cascading the panic.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, Store> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Store> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn alloc_item_id(store: &mut Store) -> String {
    loop {
        store.next_id += 1;
        let id = format!("task-{}", store.next_id);
        if !store.items.iter().any(|item| item.id == id) {
            return id;
        }
    }
}

impl ScheduleRepository for MemoryRepository {
    fn list_routine(&self) -> Result<Vec<RecurringEvent>> {
        Ok(self.read().routine.clone())
    }

    fn add_routine(&self, event: RecurringEvent) -> Result<()> {
        self.write().routine.push(event);
        Ok(())
    }

    fn update_routine(&self, event: RecurringEvent) -> Result<()> {
        let mut store = self.write();
        match store.routine.iter_mut().find(|e| e.id == event.id) {
            Some(slot) => {
                *slot = event;
                Ok(())
            }
            None => Err(AgendaError::NotFound(format!(
                "recurring event {}",
                event.id
            ))),
        }
    }

    fn delete_routine(&self, id: &str) -> Result<()> {
        let mut store = self.write();
        let before = store.routine.len();
        store.routine.retain(|e| e.id != id);
        if store.routine.len() == before {
            return Err(AgendaError::NotFound(format!("recurring event {id}")));
        }
        Ok(())
    }

    fn list_items(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<ScheduledItem>> {
        Ok(self
            .read()
            .items
            .iter()
            .filter(|item| item.due_date >= from && item.due_date <= to)
            .cloned()
            .collect())
    }

    fn apply_item(&self, change: ItemChange) -> Result<ScheduledItem> {
        let mut store = self.write();
        match change {
            ItemChange::Create(draft) => {
                let id = alloc_item_id(&mut store);
                let item = draft.into_item(id);
                store.items.push(item.clone());
                Ok(item)
            }
            ItemChange::Update { id, draft } => {
                match store.items.iter_mut().find(|item| item.id == id) {
                    Some(slot) => {
                        *slot = draft.into_item(id);
                        Ok(slot.clone())
                    }
                    None => Err(AgendaError::NotFound(format!("scheduled item {id}"))),
                }
            }
        }
    }

    fn delete_item(&self, id: &str) -> Result<()> {
        let mut store = self.write();
        let before = store.items.len();
        store.items.retain(|item| item.id != id);
        if store.items.len() == before {
            return Err(AgendaError::NotFound(format!("scheduled item {id}")));
        }
        Ok(())
    }

    fn list_holidays(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<HolidayMarker>> {
        Ok(self
            .read()
            .holidays
            .iter()
            .filter(|h| h.date >= from && h.date <= to)
            .cloned()
            .collect())
    }
}

use super::{ScheduleStore, StoreError};
use crate::model::{EntryId, EntryPatch, Schedule, ScheduleEntry};
use chrono::Utc;

pub(super) fn add_entry(
    store: &mut ScheduleStore,
    mut entry: ScheduleEntry,
) -> Result<&Schedule, StoreError> {
    let ScheduleStore {
        schedules,
        current,
        conflicts,
    } = store;
    let schedule = current
        .as_ref()
        .and_then(|id| schedules.iter_mut().find(|s| &s.id == id))
        .ok_or(StoreError::NoCurrentSchedule)?;
    if schedule.find_entry(&entry.id).is_some() {
        return Err(StoreError::DuplicateEntry(entry.id));
    }

    let now = Utc::now();
    entry.updated_at = now;
    #[cfg(feature = "logging")]
    tracing::debug!(entry = %entry.id, staff = %entry.staff_id, "entry added");
    schedule.entries.push(entry);
    schedule.updated_at = now;
    conflicts.clear();
    Ok(&*schedule)
}

/// Fusionne le patch dans l'entrée ; `None` (sans effet) si elle n'existe pas.
pub(super) fn update_entry<'a>(
    store: &'a mut ScheduleStore,
    id: &EntryId,
    patch: EntryPatch,
) -> Option<&'a ScheduleEntry> {
    let ScheduleStore {
        schedules,
        current,
        conflicts,
    } = store;
    let schedule = current
        .as_ref()
        .and_then(|cur| schedules.iter_mut().find(|s| &s.id == cur))?;
    let pos = schedule.entries.iter().position(|e| &e.id == id)?;

    let now = Utc::now();
    schedule.updated_at = now;
    conflicts.clear();

    let entry = &mut schedule.entries[pos];
    entry.apply(patch);
    entry.updated_at = now;
    #[cfg(feature = "logging")]
    tracing::debug!(entry = %id, "entry updated");
    Some(&*entry)
}

pub(super) fn remove_entry(store: &mut ScheduleStore, id: &EntryId) -> Option<ScheduleEntry> {
    let ScheduleStore {
        schedules,
        current,
        conflicts,
    } = store;
    let schedule = current
        .as_ref()
        .and_then(|cur| schedules.iter_mut().find(|s| &s.id == cur))?;
    schedule.updated_at = Utc::now();
    let pos = schedule.entries.iter().position(|e| &e.id == id)?;
    conflicts.clear();
    #[cfg(feature = "logging")]
    tracing::debug!(entry = %id, "entry removed");
    Some(schedule.entries.remove(pos))
}

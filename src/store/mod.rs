//! Agrégat des plannings : seule surface de mutation autorisée.
//!
//! Le store est une valeur explicite passée par le code appelant. Toute
//! mutation invalide la dernière liste de conflits calculée.

mod mutate;
mod sweep;
mod types;

pub use types::StoreError;

use crate::detector::{self, DetectOptions, ScheduleConflict};
use crate::model::{Catalog, EntryId, EntryPatch, Schedule, ScheduleEntry, ScheduleId};
use chrono::{NaiveDate, Utc};
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct ScheduleStore {
    schedules: Vec<Schedule>,
    current: Option<ScheduleId>,
    conflicts: Vec<ScheduleConflict>,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reprend des plannings déjà chargés ; le premier devient courant.
    ///
    /// Refuse deux plannings à la même date ou deux entrées de même id dans
    /// un planning.
    pub fn from_schedules(schedules: Vec<Schedule>) -> Result<Self, StoreError> {
        let mut dates = HashSet::new();
        for schedule in &schedules {
            if !dates.insert(schedule.date) {
                return Err(StoreError::DuplicateDate(schedule.date));
            }
            let mut ids = HashSet::new();
            if let Some(dup) = schedule.entries.iter().find(|e| !ids.insert(&e.id)) {
                return Err(StoreError::DuplicateEntry(dup.id.clone()));
            }
        }
        let current = schedules.first().map(|s| s.id.clone());
        Ok(Self {
            schedules,
            current,
            conflicts: Vec::new(),
        })
    }

    pub fn into_schedules(self) -> Vec<Schedule> {
        self.schedules
    }

    pub fn schedule(&self, id: &ScheduleId) -> Option<&Schedule> {
        self.schedules.iter().find(|s| &s.id == id)
    }

    pub fn schedule_for_date(&self, date: NaiveDate) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.date == date)
    }

    pub fn current(&self) -> Option<&Schedule> {
        self.current.as_ref().and_then(|id| self.schedule(id))
    }

    /// Conflits du dernier balayage ; vidés à chaque mutation.
    pub fn conflicts(&self) -> &[ScheduleConflict] {
        &self.conflicts
    }

    /// Crée le planning d'une date (un seul par date).
    pub fn create_schedule(&mut self, date: NaiveDate) -> Result<ScheduleId, StoreError> {
        if self.schedule_for_date(date).is_some() {
            return Err(StoreError::DuplicateDate(date));
        }
        let schedule = Schedule::new(date);
        let id = schedule.id.clone();
        self.schedules.push(schedule);
        if self.current.is_none() {
            self.current = Some(id.clone());
        }
        self.conflicts.clear();
        #[cfg(feature = "logging")]
        tracing::debug!(schedule = %id, %date, "schedule created");
        Ok(id)
    }

    pub fn select(&mut self, id: &ScheduleId) -> Result<&Schedule, StoreError> {
        let pos = self.position(id)?;
        self.current = Some(id.clone());
        Ok(&self.schedules[pos])
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<&Schedule, StoreError> {
        let id = self
            .schedule_for_date(date)
            .map(|s| s.id.clone())
            .ok_or(StoreError::UnknownDate(date))?;
        self.select(&id)
    }

    pub fn add_entry(&mut self, entry: ScheduleEntry) -> Result<&Schedule, StoreError> {
        mutate::add_entry(self, entry)
    }

    pub fn update_entry(&mut self, id: &EntryId, patch: EntryPatch) -> Option<&ScheduleEntry> {
        mutate::update_entry(self, id, patch)
    }

    pub fn remove_entry(&mut self, id: &EntryId) -> Option<ScheduleEntry> {
        mutate::remove_entry(self, id)
    }

    /// Balayage double réservation du planning entier ; remplace
    /// [`ScheduleStore::conflicts`].
    pub fn detect_conflicts_for_schedule(
        &mut self,
        id: &ScheduleId,
    ) -> Result<&[ScheduleConflict], StoreError> {
        let pos = self.position(id)?;
        self.conflicts = sweep::double_bookings(&self.schedules[pos]);
        #[cfg(feature = "logging")]
        tracing::debug!(schedule = %id, found = self.conflicts.len(), "conflict sweep");
        Ok(&self.conflicts)
    }

    /// Publie sans contrôle des conflits ; idempotent.
    pub fn publish_schedule(&mut self, id: &ScheduleId) -> Result<&Schedule, StoreError> {
        let pos = self.position(id)?;
        let schedule = &mut self.schedules[pos];
        schedule.published = true;
        schedule.updated_at = Utc::now();
        #[cfg(feature = "logging")]
        tracing::debug!(schedule = %id, "schedule published");
        Ok(&*schedule)
    }

    /// Contrôle complet d'une entrée candidate contre le planning courant.
    pub fn check_entry(
        &self,
        entry: &ScheduleEntry,
        catalog: &Catalog,
        opts: DetectOptions,
    ) -> Vec<ScheduleConflict> {
        let entries = self.current().map(|s| s.entries.as_slice()).unwrap_or(&[]);
        detector::detect_conflicts_at(
            entry,
            entries,
            &catalog.staff,
            &catalog.time_slots,
            opts,
            Utc::now(),
        )
    }

    fn position(&self, id: &ScheduleId) -> Result<usize, StoreError> {
        self.schedules
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| StoreError::UnknownSchedule(id.clone()))
    }
}

#![forbid(unsafe_code)]
//! Labshift — validation des plannings d'équipe d'un laboratoire.
//!
//! - Arithmétique horaire `HH:mm`, intervalles semi-ouverts.
//! - Détection de conflits : double réservation, certifications expirées,
//!   heures supplémentaires, pauses manquantes.
//! - Store des plannings : ajout/modification/suppression d'entrées, publication.
//! - Les conflits sont des données, jamais des erreurs.

pub mod detector;
#[cfg(feature = "serde")]
pub mod io;
pub mod model;
#[cfg(feature = "serde")]
pub mod storage;
pub mod store;
pub mod time;

pub use detector::{
    detect_conflicts, detect_conflicts_at, has_errors, ConflictKind, DetectOptions,
    ScheduleConflict, Severity,
};
pub use model::{
    Availability, Catalog, Certification, Dataset, EntryId, EntryPatch, Schedule, ScheduleEntry,
    ScheduleId, Staff, StaffId, TimeSlot, TimeSlotId,
};
#[cfg(feature = "serde")]
pub use storage::{JsonStorage, Storage};
pub use store::{ScheduleStore, StoreError};
pub use time::{
    intervals_overlap, is_valid_time_format, minutes_to_time, time_to_minutes, TimeRange,
};

//! Détection des conflits pour une entrée candidate.
//!
//! Quatre règles indépendantes : double réservation (ERROR), certifications
//! expirées, heures supplémentaires et pause manquante (WARNING). Une
//! référence introuvable (personnel ou créneau) court-circuite le tout.

mod checks;
mod types;

pub use types::{has_errors, ConflictKind, DetectOptions, ScheduleConflict, Severity};

use crate::model::{self, ScheduleEntry, Staff, TimeSlot};
use chrono::{DateTime, Utc};

/// Détecte les conflits de `candidate` à l'heure courante, seuils par défaut.
pub fn detect_conflicts(
    candidate: &ScheduleEntry,
    entries: &[ScheduleEntry],
    staff: &[Staff],
    time_slots: &[TimeSlot],
) -> Vec<ScheduleConflict> {
    detect_conflicts_at(
        candidate,
        entries,
        staff,
        time_slots,
        DetectOptions::default(),
        Utc::now(),
    )
}

/// Comme [`detect_conflicts`], avec seuils et instant d'évaluation explicites.
///
/// Les certifications sont comparées à `now`, pas à la date du planning.
pub fn detect_conflicts_at(
    candidate: &ScheduleEntry,
    entries: &[ScheduleEntry],
    staff: &[Staff],
    time_slots: &[TimeSlot],
    opts: DetectOptions,
    now: DateTime<Utc>,
) -> Vec<ScheduleConflict> {
    let Some(member) = model::find_staff(staff, &candidate.staff_id) else {
        return vec![unresolved(candidate, "Staff member not found")];
    };
    let Some(slot) = model::find_time_slot(time_slots, &candidate.time_slot_id) else {
        return vec![unresolved(candidate, "Time slot not found")];
    };

    let day = checks::StaffDay::collect(candidate, entries, time_slots);
    let worked = day.worked_minutes();

    let mut out = checks::double_booking(member, slot, &day);
    out.extend(checks::expired_certifications(member, candidate, now));
    out.extend(checks::overtime(member, candidate, worked, opts));
    out.extend(checks::missing_break(member, &day, worked, opts));
    out
}

fn unresolved(candidate: &ScheduleEntry, message: &str) -> ScheduleConflict {
    ScheduleConflict::error(
        ConflictKind::DoubleBooking,
        &candidate.staff_id,
        &candidate.time_slot_id,
        message,
    )
}

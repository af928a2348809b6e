use crate::detector::{ConflictKind, ScheduleConflict};
use crate::model::{Schedule, StaffId, TimeSlotId};
use std::collections::{HashMap, HashSet};

/// Balayage du planning entier : seule la double réservation est re-dérivée.
/// Chaque paire `(staff, slot)` répétée, dans l'ordre des entrées, produit
/// un conflit.
pub(super) fn double_bookings(schedule: &Schedule) -> Vec<ScheduleConflict> {
    let mut seen: HashMap<&StaffId, HashSet<&TimeSlotId>> = HashMap::new();
    let mut out = Vec::new();

    for entry in &schedule.entries {
        let slots = seen.entry(&entry.staff_id).or_default();
        if !slots.insert(&entry.time_slot_id) {
            out.push(ScheduleConflict::error(
                ConflictKind::DoubleBooking,
                &entry.staff_id,
                &entry.time_slot_id,
                format!(
                    "Staff {} is double-booked in time slot {}",
                    entry.staff_id, entry.time_slot_id
                ),
            ));
        }
    }

    out
}

use super::{ConflictKind, DetectOptions, ScheduleConflict};
use crate::model::{self, ScheduleEntry, Staff, TimeSlot, TimeSlotId};
use crate::time;
use chrono::{DateTime, Utc};

/// Journée d'un membre du personnel : le candidat + ses autres entrées à la
/// même date. Une entrée portant l'id du candidat est remplacée par celui-ci.
pub(super) struct StaffDay<'a> {
    candidate: &'a ScheduleEntry,
    others: Vec<&'a ScheduleEntry>,
    time_slots: &'a [TimeSlot],
}

impl<'a> StaffDay<'a> {
    pub(super) fn collect(
        candidate: &'a ScheduleEntry,
        entries: &'a [ScheduleEntry],
        time_slots: &'a [TimeSlot],
    ) -> Self {
        let others = entries
            .iter()
            .filter(|e| {
                e.id != candidate.id && e.staff_id == candidate.staff_id && e.date == candidate.date
            })
            .collect();
        Self {
            candidate,
            others,
            time_slots,
        }
    }

    fn slot(&self, id: &TimeSlotId) -> Option<&'a TimeSlot> {
        model::find_time_slot(self.time_slots, id)
    }

    fn all(&self) -> impl Iterator<Item = &'a ScheduleEntry> + '_ {
        std::iter::once(self.candidate).chain(self.others.iter().copied())
    }

    /// Minutes hors pauses ; un créneau introuvable compte pour 0.
    pub(super) fn worked_minutes(&self) -> u32 {
        self.all()
            .filter(|e| !e.is_break)
            .filter_map(|e| self.slot(&e.time_slot_id))
            .map(TimeSlot::duration_minutes)
            .sum()
    }

    pub(super) fn has_break(&self) -> bool {
        self.all().any(|e| e.is_break)
    }
}

pub(super) fn double_booking(
    staff: &Staff,
    slot: &TimeSlot,
    day: &StaffDay<'_>,
) -> Vec<ScheduleConflict> {
    let range = slot.range();
    day.others
        .iter()
        .filter_map(|e| day.slot(&e.time_slot_id))
        .filter(|other| time::intervals_overlap(range, other.range()))
        .map(|_| {
            ScheduleConflict::error(
                ConflictKind::DoubleBooking,
                &staff.id,
                &day.candidate.time_slot_id,
                format!("{} is already scheduled during this time", staff.name),
            )
        })
        .collect()
}

pub(super) fn expired_certifications(
    staff: &Staff,
    candidate: &ScheduleEntry,
    now: DateTime<Utc>,
) -> Option<ScheduleConflict> {
    let expired = staff.expired_certifications(now);
    if expired.is_empty() {
        return None;
    }
    Some(ScheduleConflict::warning(
        ConflictKind::CertificationExpired,
        &staff.id,
        &candidate.time_slot_id,
        format!(
            "{} has {} expired certification(s)",
            staff.name,
            expired.len()
        ),
    ))
}

pub(super) fn overtime(
    staff: &Staff,
    candidate: &ScheduleEntry,
    worked_minutes: u32,
    opts: DetectOptions,
) -> Option<ScheduleConflict> {
    if worked_minutes <= opts.overtime_threshold_minutes {
        return None;
    }
    Some(ScheduleConflict::warning(
        ConflictKind::Overtime,
        &staff.id,
        &candidate.time_slot_id,
        format!(
            "{} is scheduled for {} hours",
            staff.name,
            rounded_hours(worked_minutes)
        ),
    ))
}

pub(super) fn missing_break(
    staff: &Staff,
    day: &StaffDay<'_>,
    worked_minutes: u32,
    opts: DetectOptions,
) -> Option<ScheduleConflict> {
    if worked_minutes < opts.break_required_after_minutes || day.has_break() {
        return None;
    }
    Some(ScheduleConflict::warning(
        ConflictKind::BreakViolation,
        &staff.id,
        &day.candidate.time_slot_id,
        format!(
            "{} has no break scheduled for {} hours of work",
            staff.name,
            rounded_hours(worked_minutes)
        ),
    ))
}

fn rounded_hours(minutes: u32) -> u32 {
    (minutes + 30) / 60
}

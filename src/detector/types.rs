use crate::model::{StaffId, TimeSlotId};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seuils des règles de temps de travail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectOptions {
    /// Au-delà (strictement) : heures supplémentaires.
    pub overtime_threshold_minutes: u32,
    /// À partir de ce total, une pause est exigée.
    pub break_required_after_minutes: u32,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            overtime_threshold_minutes: 8 * 60,
            break_required_after_minutes: 4 * 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ConflictKind {
    DoubleBooking,
    CertificationExpired,
    Overtime,
    BreakViolation,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictKind::DoubleBooking => "DOUBLE_BOOKING",
            ConflictKind::CertificationExpired => "CERTIFICATION_EXPIRED",
            ConflictKind::Overtime => "OVERTIME",
            ConflictKind::BreakViolation => "BREAK_VIOLATION",
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ERROR = planning structurellement invalide ; WARNING = avis de politique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conflit dérivé ; à recalculer après toute mutation des entrées.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleConflict {
    pub kind: ConflictKind,
    pub staff_id: StaffId,
    pub time_slot_id: TimeSlotId,
    pub message: String,
    pub severity: Severity,
}

impl ScheduleConflict {
    pub fn error<M: Into<String>>(
        kind: ConflictKind,
        staff_id: &StaffId,
        time_slot_id: &TimeSlotId,
        message: M,
    ) -> Self {
        Self::with_severity(kind, Severity::Error, staff_id, time_slot_id, message)
    }

    pub fn warning<M: Into<String>>(
        kind: ConflictKind,
        staff_id: &StaffId,
        time_slot_id: &TimeSlotId,
        message: M,
    ) -> Self {
        Self::with_severity(kind, Severity::Warning, staff_id, time_slot_id, message)
    }

    fn with_severity<M: Into<String>>(
        kind: ConflictKind,
        severity: Severity,
        staff_id: &StaffId,
        time_slot_id: &TimeSlotId,
        message: M,
    ) -> Self {
        Self {
            kind,
            staff_id: staff_id.clone(),
            time_slot_id: time_slot_id.clone(),
            message: message.into(),
            severity,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ScheduleConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} staff={} slot={}: {}",
            self.severity, self.kind, self.staff_id, self.time_slot_id, self.message
        )
    }
}

/// Vrai si au moins un conflit bloquant est présent.
pub fn has_errors(conflicts: &[ScheduleConflict]) -> bool {
    conflicts.iter().any(ScheduleConflict::is_error)
}

use crate::time::{self, TimeRange};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub struct $name(String);

        impl $name {
            pub fn new<S: AsRef<str>>(s: S) -> Self {
                Self(s.as_ref().to_owned())
            }
            pub fn random() -> Self {
                Self(Uuid::new_v4().to_string())
            }
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifiant fort pour Staff
    StaffId
);
string_id!(
    /// Identifiant fort pour TimeSlot
    TimeSlotId
);
string_id!(
    /// Identifiant fort pour ScheduleEntry
    EntryId
);
string_id!(
    /// Identifiant fort pour Schedule
    ScheduleId
);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error(transparent)]
    Time(#[from] time::TimeError),
    #[error("time slot end must be strictly after start: {start} -> {end}")]
    InvertedSlot { start: String, end: String },
}

/// Certification d'un membre du personnel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Certification {
    pub name: String,
    pub expiration_date: NaiveDate,
}

impl Certification {
    pub fn new<N: Into<String>>(name: N, expiration_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            expiration_date,
        }
    }

    /// Expirée si minuit UTC du jour d'expiration est strictement avant `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date.and_time(NaiveTime::default()).and_utc() < now
    }
}

/// Fenêtre de disponibilité hebdomadaire (au plus une par jour, non vérifié).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Availability {
    pub day_of_week: Weekday,
    pub start_time: String,
    pub end_time: String,
}

/// Membre du personnel (lecture seule pour le moteur)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    pub role: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub certifications: Vec<Certification>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub availability: Vec<Availability>,
}

impl Staff {
    pub fn new<N: Into<String>, R: Into<String>>(name: N, role: R) -> Self {
        Self {
            id: StaffId::random(),
            name: name.into(),
            role: role.into(),
            certifications: Vec::new(),
            availability: Vec::new(),
        }
    }

    pub fn with_certification(mut self, certification: Certification) -> Self {
        self.certifications.push(certification);
        self
    }

    pub fn expired_certifications(&self, now: DateTime<Utc>) -> Vec<&Certification> {
        self.certifications
            .iter()
            .filter(|c| c.is_expired_at(now))
            .collect()
    }
}

/// Créneau horaire du catalogue (`HH:mm`, même journée)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeSlot {
    pub id: TimeSlotId,
    pub start_time: String,
    pub end_time: String,
}

impl TimeSlot {
    /// Crée un créneau en validant le format et `start < end`.
    pub fn new<S: AsRef<str>>(
        id: S,
        start_time: &str,
        end_time: &str,
    ) -> Result<Self, ModelError> {
        let start = time::parse_time(start_time)?;
        let end = time::parse_time(end_time)?;
        if end <= start {
            return Err(ModelError::InvertedSlot {
                start: start_time.to_string(),
                end: end_time.to_string(),
            });
        }
        Ok(Self {
            id: TimeSlotId::new(id),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        })
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::from_hhmm(&self.start_time, &self.end_time)
    }

    /// Durée en minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.range().duration_minutes()
    }
}

/// Affectation d'un membre du personnel à un créneau, à une date donnée.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleEntry {
    pub id: EntryId,
    pub staff_id: StaffId,
    pub time_slot_id: TimeSlotId,
    pub date: NaiveDate,
    pub role: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub station: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_break: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl ScheduleEntry {
    pub fn new<R: Into<String>>(
        staff_id: StaffId,
        time_slot_id: TimeSlotId,
        date: NaiveDate,
        role: R,
    ) -> Self {
        Self {
            id: EntryId::random(),
            staff_id,
            time_slot_id,
            date,
            role: role.into(),
            station: None,
            is_break: false,
            notes: None,
            updated_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: EntryId) -> Self {
        self.id = id;
        self
    }

    pub fn as_break(mut self) -> Self {
        self.is_break = true;
        self
    }

    /// Applique les champs renseignés du patch.
    pub fn apply(&mut self, patch: EntryPatch) {
        let EntryPatch {
            staff_id,
            time_slot_id,
            date,
            role,
            station,
            is_break,
            notes,
        } = patch;
        if let Some(v) = staff_id {
            self.staff_id = v;
        }
        if let Some(v) = time_slot_id {
            self.time_slot_id = v;
        }
        if let Some(v) = date {
            self.date = v;
        }
        if let Some(v) = role {
            self.role = v;
        }
        if let Some(v) = station {
            self.station = v;
        }
        if let Some(v) = is_break {
            self.is_break = v;
        }
        if let Some(v) = notes {
            self.notes = v;
        }
    }
}

/// Mise à jour partielle d'une entrée. `None` = champ inchangé ; pour les
/// champs optionnels, `Some(None)` efface la valeur.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub staff_id: Option<StaffId>,
    pub time_slot_id: Option<TimeSlotId>,
    pub date: Option<NaiveDate>,
    pub role: Option<String>,
    pub station: Option<Option<String>>,
    pub is_break: Option<bool>,
    pub notes: Option<Option<String>>,
}

/// Planning d'une journée ; possède ses entrées.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Schedule {
    pub id: ScheduleId,
    pub date: NaiveDate,
    #[cfg_attr(feature = "serde", serde(default))]
    pub entries: Vec<ScheduleEntry>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub published: bool,
    pub updated_at: DateTime<Utc>,
}

impl Schedule {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: ScheduleId::random(),
            date,
            entries: Vec::new(),
            published: false,
            updated_at: Utc::now(),
        }
    }

    pub fn find_entry(&self, id: &EntryId) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }
}

/// Catalogues fournis par le chargeur de données externe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Catalog {
    #[cfg_attr(feature = "serde", serde(default))]
    pub staff: Vec<Staff>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub time_slots: Vec<TimeSlot>,
}

impl Catalog {
    pub fn find_staff_by_name<'a>(&'a self, name: &str) -> Option<&'a Staff> {
        self.staff.iter().find(|s| s.name == name)
    }
    pub fn find_time_slot<'a>(&'a self, id: &TimeSlotId) -> Option<&'a TimeSlot> {
        find_time_slot(&self.time_slots, id)
    }
}

pub fn find_staff<'a>(staff: &'a [Staff], id: &StaffId) -> Option<&'a Staff> {
    staff.iter().find(|s| &s.id == id)
}

pub fn find_time_slot<'a>(time_slots: &'a [TimeSlot], id: &TimeSlotId) -> Option<&'a TimeSlot> {
    time_slots.iter().find(|t| &t.id == id)
}

/// Document complet échangé avec le stockage : catalogues + plannings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dataset {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub catalog: Catalog,
    #[cfg_attr(feature = "serde", serde(default))]
    pub schedules: Vec<Schedule>,
}

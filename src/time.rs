//! Arithmétique horaire `HH:mm` <-> minutes depuis minuit.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("invalid time format (expected HH:mm): {0}")]
    InvalidFormat(String),
}

/// Intervalle semi-ouvert `[start, end)` en minutes depuis minuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: u32,
    pub end: u32,
}

impl TimeRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Construit l'intervalle depuis deux heures `HH:mm` supposées valides.
    pub fn from_hhmm(start: &str, end: &str) -> Self {
        Self::new(time_to_minutes(start), time_to_minutes(end))
    }

    /// Durée en minutes (0 si l'intervalle est inversé).
    pub fn duration_minutes(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

/// Vrai ssi `time` est au format 24h strict `HH:mm` (00-23, 00-59).
pub fn is_valid_time_format(time: &str) -> bool {
    parse_time(time).is_ok()
}

/// Parsing strict d'une heure `HH:mm`.
pub fn parse_time(time: &str) -> Result<u32, TimeError> {
    let invalid = || TimeError::InvalidFormat(time.to_string());
    let bytes = time.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }
    let digits: Option<Vec<u32>> = [0usize, 1, 3, 4]
        .iter()
        .map(|&i| char::from(bytes[i]).to_digit(10))
        .collect();
    let Some(d) = digits else {
        return Err(invalid());
    };
    let hours = d[0] * 10 + d[1];
    let minutes = d[2] * 10 + d[3];
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

/// Convertit `HH:mm` en minutes depuis minuit.
///
/// L'appelant doit valider l'entrée avec [`is_valid_time_format`] : une
/// composante illisible compte pour 0 et le calcul sature, sans panique.
pub fn time_to_minutes(time: &str) -> u32 {
    let (hours, minutes) = time.split_once(':').unwrap_or((time, "0"));
    let hours: u32 = hours.trim().parse().unwrap_or(0);
    let minutes: u32 = minutes.trim().parse().unwrap_or(0);
    hours.saturating_mul(60).saturating_add(minutes)
}

/// Inverse de [`time_to_minutes`], avec zéros de tête.
pub fn minutes_to_time(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Chevauchement semi-ouvert : un créneau qui finit quand l'autre commence
/// ne chevauche pas.
pub fn intervals_overlap(a: TimeRange, b: TimeRange) -> bool {
    a.start < b.end && b.start < a.end
}

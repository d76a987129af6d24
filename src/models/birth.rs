use crate::error::{FalakError, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// BirthQuery — the immutable input of the whole pipeline
// ---------------------------------------------------------------------------

/// A birth date, an optional birth time, and a free-text birthplace.
///
/// `time: None` means the birth time is *unknown*, not midnight. House cusps,
/// the ascendant, and the midheaven are suppressed downstream for such
/// queries; a noon placeholder is used for the day-count arithmetic only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthQuery {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub place: String,
}

impl BirthQuery {
    pub fn new(date: NaiveDate, time: Option<NaiveTime>, place: impl Into<String>) -> Self {
        Self {
            date,
            time,
            place: place.into(),
        }
    }

    /// Parse a query from user-supplied strings (`YYYY-MM-DD` and `HH:MM`).
    ///
    /// A missing, empty, or whitespace-only time is treated as "unknown";
    /// malformed dates or times are rejected with
    /// [`FalakError::InvalidBirthData`] before any computation runs.
    pub fn parse(date: &str, time: Option<&str>, place: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|e| FalakError::InvalidBirthData(format!("bad date {date:?}: {e}")))?;

        let time = match time.map(str::trim) {
            Some(t) if !t.is_empty() => Some(
                NaiveTime::parse_from_str(t, "%H:%M")
                    .map_err(|e| FalakError::InvalidBirthData(format!("bad time {t:?}: {e}")))?,
            ),
            _ => None,
        };

        let place = place.trim();
        if place.is_empty() {
            return Err(FalakError::InvalidBirthData(
                "empty birth place".to_string(),
            ));
        }

        Ok(Self::new(date, time, place))
    }

    /// Whether the birth time is actually known (as opposed to the noon
    /// placeholder used for day-count arithmetic).
    pub fn has_time(&self) -> bool {
        self.time.is_some()
    }
}

// ---------------------------------------------------------------------------
// GeoCoordinates
// ---------------------------------------------------------------------------

/// A latitude/longitude pair in degrees.
///
/// Derived from [`BirthQuery::place`]; never persisted on its own, only as
/// part of the chart that used it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

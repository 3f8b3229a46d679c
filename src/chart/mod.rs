//! Chart engine.
//!
//! Turns a [`Subject`] (a resolved birth instant and place) into a
//! [`NatalChart`], and a second subject plus a natal chart into a
//! [`TransitChart`]. Everything here is pure computation; the house system
//! and orbs are passed explicitly to each call.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`time`] | Julian days, sidereal time, local time to UTC |
//! | [`ephemeris`] | Geocentric positions of the Sun, Moon, planets and lunar points |
//! | [`houses`] | Angles and house cusps |
//! | [`aspects`] | Major aspects and orbs |
//! | [`objects`] | Serialized chart objects |
//! | [`natal`] | Natal and transit chart assembly |
//! | [`timezone`] | Timezone lookup from coordinates |

pub mod aspects;
pub mod ephemeris;
pub mod houses;
pub mod math;
pub mod natal;
pub mod objects;
pub mod time;
pub mod timezone;

pub use aspects::{Aspect, AspectKind, AspectMovement, Orbs};
pub use houses::HouseSystem;
pub use natal::{MoonPhase, NatalChart, TransitChart};
pub use objects::ChartObject;
pub use timezone::TimezoneLocator;

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use utoipa::ToSchema;

/// Errors raised while building a chart.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartError {
    /// Date string is not `YYYY-MM-DD`.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Time string is not `HH:MM[:SS]`.
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    /// Timezone name is not in the tz database.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Local time falls in a daylight-saving gap.
    #[error("Nonexistent local time: {0}")]
    NonexistentLocalTime(String),

    /// Latitude or longitude out of range.
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// The engine produced a non-finite value.
    #[error("Chart computation failed: {0}")]
    Computation(String),
}

impl ChartError {
    /// Whether the error was caused by the caller's input.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        !matches!(self, ChartError::Computation(_))
    }
}

/// Per-computation settings that do not vary by subject.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChartSettings {
    pub orbs: Orbs,
}

/// Checks that a latitude lies in `[-90, 90]` and a longitude in
/// `[-180, 180]`.
///
/// # Errors
/// Returns [`ChartError::InvalidCoordinates`] naming the offending value.
pub fn check_coordinates(latitude: f64, longitude: f64) -> Result<(), ChartError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(ChartError::InvalidCoordinates(format!(
            "latitude {} is outside [-90, 90]",
            latitude
        )));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(ChartError::InvalidCoordinates(format!(
            "longitude {} is outside [-180, 180]",
            longitude
        )));
    }
    Ok(())
}

/// A moment and place for which a chart is cast.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    pub local: NaiveDateTime,
    pub timezone: Tz,
    pub utc: DateTime<Utc>,
    pub julian_day: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl Subject {
    /// Resolves a wall-clock time at a location into a chart subject.
    ///
    /// # Errors
    /// Returns [`ChartError::InvalidCoordinates`] for coordinates rejected by
    /// [`check_coordinates`], and [`ChartError::NonexistentLocalTime`] when
    /// `local` is skipped by a daylight-saving transition.
    pub fn new(local: NaiveDateTime, latitude: f64, longitude: f64, timezone: Tz) -> Result<Self, ChartError> {
        check_coordinates(latitude, longitude)?;
        let utc = time::local_to_utc(local, timezone)?;

        Ok(Self {
            local,
            timezone,
            utc,
            julian_day: time::julian_day(utc),
            latitude,
            longitude,
        })
    }

    /// Serializable description of the subject.
    #[must_use]
    pub fn info(&self) -> SubjectInfo {
        let offset = self.utc.with_timezone(&self.timezone).format("%:z");
        SubjectInfo {
            date_time: self.local.format("%Y-%m-%d %H:%M:%S").to_string(),
            timezone: self.timezone.name().to_string(),
            utc_offset: offset.to_string(),
            utc: self.utc.to_rfc3339(),
            julian_date: self.julian_day,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// The `native` block of a serialized chart.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SubjectInfo {
    /// Local wall-clock time, `YYYY-MM-DD HH:MM:SS`.
    pub date_time: String,
    /// IANA timezone name.
    pub timezone: String,
    /// Offset from UTC at that instant, e.g. `+11:00`.
    pub utc_offset: String,
    /// RFC 3339 UTC instant.
    pub utc: String,
    pub julian_date: f64,
    pub latitude: f64,
    pub longitude: f64,
}

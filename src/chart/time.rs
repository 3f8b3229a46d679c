//! Time scales and local-time resolution for chart subjects.

use super::ChartError;
use super::math::{normalize_degrees, sin_deg};
use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Julian day of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000: f64 = 2_451_545.0;

/// Julian day of 1999-12-31 00:00 UT, the zero point of the orbital elements.
pub const ELEMENTS_EPOCH: f64 = 2_451_543.5;

/// Days in a Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian day number for a UTC instant.
#[must_use]
pub fn julian_day(instant: DateTime<Utc>) -> f64 {
    // Unix epoch is JD 2440587.5; millisecond resolution is ample here.
    instant.timestamp_millis() as f64 / 86_400_000.0 + 2_440_587.5
}

/// Julian centuries since J2000.0.
#[must_use]
pub fn centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000) / DAYS_PER_CENTURY
}

/// Days since [`ELEMENTS_EPOCH`].
#[must_use]
pub fn days_since_elements_epoch(jd: f64) -> f64 {
    jd - ELEMENTS_EPOCH
}

/// Greenwich mean sidereal time in degrees.
#[must_use]
pub fn greenwich_sidereal_time(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);
    normalize_degrees(
        280.460_618_37 + 360.985_647_366_29 * (jd - J2000) + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0,
    )
}

/// Right ascension of the meridian for an east-positive geographic longitude.
#[must_use]
pub fn ramc(jd: f64, longitude: f64) -> f64 {
    normalize_degrees(greenwich_sidereal_time(jd) + longitude)
}

/// Mean obliquity of the ecliptic in degrees.
#[must_use]
pub fn obliquity(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);
    23.439_291 - 0.013_004_2 * t - 1.64e-7 * t * t + 5.04e-7 * t * t * t
}

/// Declination of an ecliptic position.
#[must_use]
pub fn declination(longitude: f64, latitude: f64, obliquity: f64) -> f64 {
    let (sin_eps, cos_eps) = obliquity.to_radians().sin_cos();
    let (sin_beta, cos_beta) = latitude.to_radians().sin_cos();
    (sin_beta * cos_eps + cos_beta * sin_eps * sin_deg(longitude))
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees()
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
/// Returns [`ChartError::InvalidDate`] if the string is not a calendar date.
pub fn parse_date(date: &str) -> Result<NaiveDate, ChartError> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| ChartError::InvalidDate(format!("{}: {}", date, e)))
}

/// Parses an `HH:MM:SS` or `HH:MM` time of day.
///
/// # Errors
/// Returns [`ChartError::InvalidTime`] if neither form matches.
pub fn parse_time(time: &str) -> Result<NaiveTime, ChartError> {
    let trimmed = time.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|e| ChartError::InvalidTime(format!("{}: {}", time, e)))
}

/// Parses an IANA timezone name.
///
/// # Errors
/// Returns [`ChartError::UnknownTimezone`] for names absent from the tz database.
pub fn parse_timezone(name: &str) -> Result<Tz, ChartError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ChartError::UnknownTimezone(name.to_string()))
}

/// Converts a wall-clock time in `tz` to UTC.
///
/// Ambiguous times (clocks turned back) resolve to the earlier instant.
///
/// # Errors
/// Returns [`ChartError::NonexistentLocalTime`] for times skipped by a
/// daylight-saving transition.
pub fn local_to_utc(local: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>, ChartError> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(ChartError::NonexistentLocalTime(format!(
            "{} does not exist in {}",
            local, tz
        ))),
    }
}

/// Fixed-offset zone approximating local mean time at a longitude.
///
/// Used when the coordinate lookup finds no zone (open ocean, poles).
#[must_use]
pub fn nautical_timezone(longitude: f64) -> Tz {
    let hours = (longitude / 15.0).round().clamp(-12.0, 12.0) as i32;
    // Etc/GMT zones use inverted signs: Etc/GMT-10 is UTC+10.
    let name = match hours {
        0 => "Etc/GMT".to_string(),
        h if h > 0 => format!("Etc/GMT-{}", h),
        h => format!("Etc/GMT+{}", -h),
    };
    name.parse::<Tz>().unwrap_or(Tz::UTC)
}

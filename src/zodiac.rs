//! Zodiac signs and sign-relative degree formatting.

use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

/// Width of one zodiac sign in degrees.
pub const SIGN_WIDTH: f64 = 30.0;

/// The twelve tropical signs, in ecliptic order from 0° Aries.
pub const SIGN_ORDER: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

/// A zodiac sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// Classical element of a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

/// Modality (quadruplicity) of a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

impl Sign {
    /// Zero-based position in [`SIGN_ORDER`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// One-based sign number (Aries = 1).
    #[must_use]
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    #[must_use]
    pub fn element(self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    #[must_use]
    pub fn modality(self) -> Modality {
        match self.index() % 3 {
            0 => Modality::Cardinal,
            1 => Modality::Fixed,
            _ => Modality::Mutable,
        }
    }

    /// Longitude at which this sign begins.
    #[must_use]
    pub fn band_start(self) -> f64 {
        self.index() as f64 * SIGN_WIDTH
    }

    /// Returns the sign containing the given absolute ecliptic longitude.
    #[must_use]
    pub fn from_longitude(longitude: f64) -> Self {
        let normalized = longitude.rem_euclid(360.0);
        let index = (normalized / SIGN_WIDTH).floor() as usize;
        SIGN_ORDER[index.min(11)]
    }

    /// Looks up a sign by its exact English name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        SIGN_ORDER.iter().copied().find(|sign| sign.name() == name)
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Degrees and minutes of a longitude within a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignDegree {
    /// Whole degrees, normally 0..=29.
    pub degrees: u32,
    /// Whole minutes, always 0..=59.
    pub minutes: u32,
}

impl fmt::Display for SignDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°{:02}'", self.degrees, self.minutes)
    }
}

/// Splits an absolute longitude into degrees and minutes relative to the
/// start of `sign_name`'s band.
///
/// Unknown sign names are treated as Aries. Values that land slightly before
/// the band start (upstream rounding) wrap forward by one sign width, and a
/// minute count that rounds to 60 carries into the degree.
#[must_use]
pub fn sign_degree(longitude: f64, sign_name: &str) -> SignDegree {
    let band_start = Sign::from_name(sign_name).map_or(0.0, Sign::band_start);

    let mut in_sign = longitude - band_start;
    if in_sign < 0.0 {
        in_sign += SIGN_WIDTH;
    }

    let whole = in_sign.floor();
    let mut degrees = whole.max(0.0) as u32;
    let mut minutes = ((in_sign - whole) * 60.0).round() as u32;
    if minutes == 60 {
        degrees += 1;
        minutes = 0;
    }

    SignDegree { degrees, minutes }
}

/// Formats an absolute longitude as `D°MM'` within the named sign.
///
/// # Examples
///
/// ```
/// use astrology_api::zodiac::format_sign_degree;
///
/// assert_eq!(format_sign_degree(257.15, "Sagittarius"), "17°09'");
/// assert_eq!(format_sign_degree(30.0, "Taurus"), "0°00'");
/// ```
#[must_use]
pub fn format_sign_degree(longitude: f64, sign_name: &str) -> String {
    sign_degree(longitude, sign_name).to_string()
}

/// Formats an absolute longitude as `DDD°MM'` without reference to a sign.
#[must_use]
pub fn format_longitude(longitude: f64) -> String {
    let normalized = longitude.rem_euclid(360.0);
    let mut degrees = normalized.floor() as u32;
    let mut minutes = ((normalized - normalized.floor()) * 60.0).round() as u32;
    if minutes == 60 {
        degrees = (degrees + 1) % 360;
        minutes = 0;
    }
    format!("{}°{:02}'", degrees, minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(formatted: &str) -> (u32, u32) {
        let trimmed = formatted.trim_end_matches('\'');
        let (deg, min) = trimmed.split_once('°').expect("degree sign");
        (deg.parse().unwrap(), min.parse().unwrap())
    }

    #[test]
    fn test_format_reference_value() {
        assert_eq!(format_sign_degree(257.15, "Sagittarius"), "17°09'");
        assert_eq!(format_sign_degree(214.0, "Scorpio"), "4°00'");
        assert_eq!(format_sign_degree(163.9166, "Virgo"), "13°55'");
    }

    #[test]
    fn test_band_start_is_zero() {
        for sign in SIGN_ORDER {
            assert_eq!(format_sign_degree(sign.band_start(), sign.name()), "0°00'");
        }
    }

    #[test]
    fn test_unknown_sign_defaults_to_aries() {
        assert_eq!(format_sign_degree(12.5, "Ophiuchus"), "12°30'");
        assert_eq!(
            format_sign_degree(45.25, "bogus"),
            format_sign_degree(45.25, "Aries")
        );
    }

    #[test]
    fn test_sign_name_match_is_exact() {
        // Lower-case names are not recognized and fall back to Aries.
        assert_eq!(format_sign_degree(40.0, "taurus"), "40°00'");
    }

    #[test]
    fn test_minutes_carry_into_degrees() {
        // 0.9999° rounds to 60 minutes.
        assert_eq!(format_sign_degree(60.9999, "Gemini"), "1°00'");
        assert_eq!(format_sign_degree(89.9999, "Gemini"), "30°00'");
    }

    #[test]
    fn test_slight_underflow_wraps() {
        // Upstream rounding placed the value just before the Leo band.
        assert_eq!(format_sign_degree(119.99, "Leo"), "29°59'");
    }

    #[test]
    fn test_range_over_all_longitudes() {
        let mut longitude = 0.0;
        while longitude < 360.0 {
            let sign = Sign::from_longitude(longitude);
            let (deg, min) = parse(&format_sign_degree(longitude, sign.name()));
            assert!(min < 60, "minutes out of range at {longitude}");
            assert!(
                deg < 30 || (deg == 30 && min == 0),
                "degrees out of range at {longitude}"
            );
            longitude += 0.0137;
        }
    }

    #[test]
    fn test_deterministic() {
        let a = format_sign_degree(301.123456, "Aquarius");
        let b = format_sign_degree(301.123456, "Aquarius");
        assert_eq!(a, b);
    }

    #[test]
    fn test_sign_from_longitude() {
        assert_eq!(Sign::from_longitude(0.0), Sign::Aries);
        assert_eq!(Sign::from_longitude(257.15), Sign::Sagittarius);
        assert_eq!(Sign::from_longitude(359.999), Sign::Pisces);
        assert_eq!(Sign::from_longitude(-0.5), Sign::Pisces);
        assert_eq!(Sign::from_longitude(360.0), Sign::Aries);
    }

    #[test]
    fn test_sign_attributes() {
        assert_eq!(Sign::Sagittarius.number(), 9);
        assert_eq!(Sign::Sagittarius.element(), Element::Fire);
        assert_eq!(Sign::Sagittarius.modality(), Modality::Mutable);
        assert_eq!(Sign::Cancer.element(), Element::Water);
        assert_eq!(Sign::Cancer.modality(), Modality::Cardinal);
        assert_eq!(Sign::Taurus.modality(), Modality::Fixed);
    }

    #[test]
    fn test_format_longitude() {
        assert_eq!(format_longitude(257.15), "257°09'");
        assert_eq!(format_longitude(359.9999), "0°00'");
    }
}

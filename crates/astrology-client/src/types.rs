//! Request and response types for the astrology API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;


// ============================================================================
// Health
// ============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Human-readable status message.
    pub message: String,
    /// Service version.
    pub version: String,
}

/// Error body returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error message.
    pub detail: String,
    /// Error code.
    pub code: String,
}

// ============================================================================
// Requests
// ============================================================================

/// Request to cast a birth chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirthRequest {
    /// Birth date, `YYYY-MM-DD`.
    pub date: String,
    /// Local birth time, `HH:MM` or `HH:MM:SS`.
    pub time: String,
    /// Place name, for display only.
    pub place: String,
    /// Latitude in degrees, north positive.
    pub latitude: f64,
    /// Longitude in degrees, east positive.
    pub longitude: f64,
    /// `whole_sign` or `placidus`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_system: Option<String>,
    /// IANA timezone name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl BirthRequest {
    /// Creates a request using the server's default house system and
    /// coordinate-based timezone lookup.
    #[must_use]
    pub fn new(date: &str, time: &str, place: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            date: date.to_string(),
            time: time.to_string(),
            place: place.to_string(),
            latitude,
            longitude,
            house_system: None,
            timezone: None,
        }
    }

    /// Sets the house system.
    #[must_use]
    pub fn with_house_system(mut self, house_system: &str) -> Self {
        self.house_system = Some(house_system.to_string());
        self
    }

    /// Sets the timezone.
    #[must_use]
    pub fn with_timezone(mut self, timezone: &str) -> Self {
        self.timezone = Some(timezone.to_string());
        self
    }
}

/// Request to compute transits against a birth chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitRequest {
    /// Birth date, `YYYY-MM-DD`.
    pub natal_date: String,
    /// Local birth time, `HH:MM` or `HH:MM:SS`.
    pub natal_time: String,
    /// Birth latitude in degrees.
    pub natal_latitude: f64,
    /// Birth longitude in degrees.
    pub natal_longitude: f64,
    /// Transit date, `YYYY-MM-DD`.
    pub transit_date: String,
    /// `whole_sign` or `placidus`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_system: Option<String>,
    /// IANA timezone name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl TransitRequest {
    /// Transits on `transit_date` for the given birth data.
    #[must_use]
    pub fn for_birth(birth: &BirthRequest, transit_date: &str) -> Self {
        Self {
            natal_date: birth.date.clone(),
            natal_time: birth.time.clone(),
            natal_latitude: birth.latitude,
            natal_longitude: birth.longitude,
            transit_date: transit_date.to_string(),
            house_system: birth.house_system.clone(),
            timezone: birth.timezone.clone(),
        }
    }
}

// ============================================================================
// Charts
// ============================================================================

/// When and where a chart was cast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Native {
    /// Local wall-clock time.
    pub date_time: String,
    /// IANA timezone name.
    pub timezone: String,
    /// Offset from UTC, e.g. `+11:00`.
    pub utc_offset: String,
    /// RFC 3339 UTC instant.
    pub utc: String,
    /// Julian day.
    pub julian_date: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// Object category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectType {
    /// Category id.
    pub index: u8,
    /// `Planet`, `Asteroid`, `Point`, `Angle` or `House`.
    pub name: String,
}

/// Absolute ecliptic longitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Longitude {
    /// Degrees from 0° Aries.
    pub raw: f64,
    /// `DDD°MM'`.
    pub formatted: String,
    /// Whether the object is retrograde.
    pub retrograde: bool,
}

/// Longitude within the object's sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignLongitude {
    /// Degrees from the start of the sign.
    pub raw: f64,
    /// `D°MM'`.
    pub formatted: String,
}

/// Zodiac sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sign {
    /// 1 (Aries) to 12 (Pisces).
    pub number: u8,
    /// Sign name.
    pub name: String,
    /// `Fire`, `Earth`, `Air` or `Water`.
    pub element: String,
    /// `Cardinal`, `Fixed` or `Mutable`.
    pub modality: String,
}

/// House an object falls in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    /// 1 to 12.
    pub number: u8,
    /// E.g. `1st House`.
    pub name: String,
}

/// Direction of motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    /// Moving forward through the zodiac.
    pub direct: bool,
    /// Nearly motionless.
    pub stationary: bool,
    /// Moving backward through the zodiac.
    pub retrograde: bool,
    /// `Direct`, `Stationary` or `Retrograde`.
    pub formatted: String,
}

/// A planet, asteroid, point, angle or house cusp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartObject {
    /// Object id.
    pub index: u32,
    /// Display name.
    pub name: String,
    /// Category.
    #[serde(rename = "type")]
    pub kind: ObjectType,
    /// Absolute longitude.
    pub longitude: Longitude,
    /// Ecliptic latitude in degrees.
    pub latitude: f64,
    /// Longitude within the sign.
    pub sign_longitude: SignLongitude,
    /// Sign.
    pub sign: Sign,
    /// House.
    pub house: House,
    /// Declination in degrees.
    pub declination: f64,
    /// Degrees per day; absent for cusps and angles.
    #[serde(default)]
    pub speed: Option<f64>,
    /// Motion; absent for cusps and angles.
    #[serde(default)]
    pub movement: Option<Movement>,
}

/// One end of an aspect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectMember {
    /// Object id.
    pub index: u32,
    /// Display name.
    pub name: String,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// An aspect between two objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    /// Aspecting object.
    pub active: AspectMember,
    /// Aspected object.
    pub passive: AspectMember,
    /// `Conjunction`, `Sextile`, `Square`, `Trine` or `Opposition`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Exact angle of the aspect.
    pub aspect: f64,
    /// Orb allowed.
    pub orb: f64,
    /// Separation of the two longitudes.
    pub distance: f64,
    /// Distance minus the exact angle.
    pub difference: f64,
    /// `Applying`, `Exact` or `Separating`.
    pub movement: String,
}

/// A birth chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatalChart {
    /// Subject of the chart.
    pub native: Native,
    /// `whole_sign` or `placidus`.
    pub house_system: String,
    /// Whether the Sun is above the horizon.
    pub diurnal: bool,
    /// Moon phase name.
    pub moon_phase: String,
    /// Objects keyed by id.
    pub objects: BTreeMap<String, ChartObject>,
    /// Aspects keyed by active id, then passive id.
    pub aspects: BTreeMap<String, BTreeMap<String, Aspect>>,
}

impl NatalChart {
    /// Looks an object up by display name.
    #[must_use]
    pub fn object(&self, name: &str) -> Option<&ChartObject> {
        self.objects.values().find(|object| object.name == name)
    }

    /// House cusps in house order.
    #[must_use]
    pub fn houses(&self) -> Vec<&ChartObject> {
        let mut houses: Vec<_> = self
            .objects
            .values()
            .filter(|object| object.kind.name == "House")
            .collect();
        houses.sort_by_key(|object| object.house.number);
        houses
    }

    /// Every aspect, each pair reported once.
    #[must_use]
    pub fn unique_aspects(&self) -> Vec<&Aspect> {
        self.aspects
            .values()
            .flat_map(BTreeMap::values)
            .filter(|aspect| aspect.active.index < aspect.passive.index)
            .collect()
    }
}

/// Transits against a birth chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitChart {
    /// Transit moment.
    pub native: Native,
    /// Subject of the natal chart.
    pub aspects_to: Native,
    /// `whole_sign` or `placidus`.
    pub house_system: String,
    /// Whether the Sun is above the horizon.
    pub diurnal: bool,
    /// Moon phase name.
    pub moon_phase: String,
    /// Transiting objects keyed by id.
    pub objects: BTreeMap<String, ChartObject>,
    /// Aspects keyed by transit object id, then natal object id.
    pub aspects: BTreeMap<String, BTreeMap<String, Aspect>>,
}

impl TransitChart {
    /// Looks a transiting object up by display name.
    #[must_use]
    pub fn object(&self, name: &str) -> Option<&ChartObject> {
        self.objects.values().find(|object| object.name == name)
    }
}

//! Request and response models for the REST API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use crate::chart::HouseSystem;

/// Request to cast a birth chart.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct BirthRequest {
    /// Birth date, `YYYY-MM-DD`.
    #[schema(example = "1991-12-10")]
    pub date: String,
    /// Local birth time, `HH:MM` or `HH:MM:SS`.
    #[schema(example = "04:59")]
    pub time: String,
    /// Place name, for display only.
    #[schema(example = "Melbourne, Australia")]
    pub place: String,
    /// Latitude in degrees, north positive.
    #[schema(example = -37.8136)]
    pub latitude: f64,
    /// Longitude in degrees, east positive.
    #[schema(example = 144.9631)]
    pub longitude: f64,
    /// `whole_sign` (default) or `placidus`.
    #[serde(default)]
    #[schema(example = "placidus")]
    pub house_system: Option<String>,
    /// IANA timezone name; looked up from the coordinates when omitted.
    #[serde(default)]
    #[schema(example = "Australia/Melbourne")]
    pub timezone: Option<String>,
}

/// Request to compute transits against a birth chart.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct TransitRequest {
    /// Birth date, `YYYY-MM-DD`.
    #[schema(example = "1991-12-10")]
    pub natal_date: String,
    /// Local birth time, `HH:MM` or `HH:MM:SS`.
    #[schema(example = "04:59")]
    pub natal_time: String,
    /// Birth latitude in degrees.
    #[schema(example = -37.8136)]
    pub natal_latitude: f64,
    /// Birth longitude in degrees.
    #[schema(example = 144.9631)]
    pub natal_longitude: f64,
    /// Transit date, `YYYY-MM-DD`; evaluated at local midnight.
    #[schema(example = "2024-01-01")]
    pub transit_date: String,
    /// `whole_sign` (default) or `placidus`.
    #[serde(default)]
    pub house_system: Option<String>,
    /// IANA timezone name for both dates; looked up from the coordinates
    /// when omitted.
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Human-readable status message.
    pub message: String,
    /// Service version.
    pub version: String,
}

//! API request handlers.

use crate::chart::time::{parse_date, parse_time, parse_timezone};
use crate::chart::{ChartError, HouseSystem, NatalChart, Subject, TransitChart, check_coordinates};
use crate::error::{ApiError, ErrorResponse};
use crate::models::{BirthRequest, HealthResponse, TransitRequest};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use chrono::NaiveTime;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Message returned by the health endpoints.
pub const HEALTH_MESSAGE: &str = "Astrology API is running";

fn health() -> HealthResponse {
    HealthResponse {
        status: "healthy".to_string(),
        message: HEALTH_MESSAGE.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Logs a chart failure at a level matching its cause and converts it.
fn chart_failure(err: ChartError) -> ApiError {
    if err.is_input_error() {
        warn!("Rejected chart request: {}", err);
    } else {
        error!("Chart computation failed: {}", err);
    }
    err.into()
}

/// Builds a subject from request strings.
///
/// The timezone is looked up from the coordinates when not given.
fn resolve_subject(
    state: &AppState,
    date: &str,
    time: Option<&str>,
    latitude: f64,
    longitude: f64,
    timezone: Option<&str>,
) -> Result<Subject, ChartError> {
    check_coordinates(latitude, longitude)?;

    let date = parse_date(date)?;
    let time = match time {
        Some(time) => parse_time(time)?,
        None => NaiveTime::MIN,
    };
    let timezone = match timezone {
        Some(name) => parse_timezone(name)?,
        None => state.timezones.locate(latitude, longitude),
    };

    Subject::new(date.and_time(time), latitude, longitude, timezone)
}

// ============================================================================
// Health Check
// ============================================================================

/// Root endpoint; same payload as `/health`.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn root() -> Json<HealthResponse> {
    Json(health())
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(health())
}

// ============================================================================
// Charts
// ============================================================================

/// Cast a birth chart.
///
/// Requires the `X-API-Key` header when the server has a key configured.
#[utoipa::path(
    post,
    path = "/birth-chart",
    request_body = BirthRequest,
    params(
        ("X-API-Key" = Option<String>, Header, description = "API key")
    ),
    responses(
        (status = 200, description = "Natal chart", body = NatalChart),
        (status = 400, description = "Invalid date, time, timezone or coordinates", body = ErrorResponse),
        (status = 401, description = "Missing API key", body = ErrorResponse),
        (status = 403, description = "Invalid API key", body = ErrorResponse),
        (status = 500, description = "Chart computation failed", body = ErrorResponse)
    ),
    tag = "Charts"
)]
pub async fn birth_chart(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BirthRequest>,
) -> Result<Json<NatalChart>, ApiError> {
    let house_system = HouseSystem::resolve_or(request.house_system.as_deref(), state.default_house_system);

    let subject = resolve_subject(
        &state,
        &request.date,
        Some(&request.time),
        request.latitude,
        request.longitude,
        request.timezone.as_deref(),
    )
    .map_err(chart_failure)?;

    let chart = NatalChart::new(&subject, house_system, &state.settings).map_err(chart_failure)?;

    info!(
        "Birth chart for {} ({}), house system {}, JD {:.5}",
        request.place, subject.timezone, house_system, subject.julian_day
    );

    Ok(Json(chart))
}

/// Compute transits for a date against a birth chart.
///
/// The transit moment is local midnight of `transit_date` at the birth
/// location. Requires the `X-API-Key` header when the server has a key
/// configured.
#[utoipa::path(
    post,
    path = "/transits",
    request_body = TransitRequest,
    params(
        ("X-API-Key" = Option<String>, Header, description = "API key")
    ),
    responses(
        (status = 200, description = "Transit chart", body = TransitChart),
        (status = 400, description = "Invalid date, time, timezone or coordinates", body = ErrorResponse),
        (status = 401, description = "Missing API key", body = ErrorResponse),
        (status = 403, description = "Invalid API key", body = ErrorResponse),
        (status = 500, description = "Chart computation failed", body = ErrorResponse)
    ),
    tag = "Charts"
)]
pub async fn transits(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TransitRequest>,
) -> Result<Json<TransitChart>, ApiError> {
    let house_system = HouseSystem::resolve_or(request.house_system.as_deref(), state.default_house_system);

    let natal_subject = resolve_subject(
        &state,
        &request.natal_date,
        Some(&request.natal_time),
        request.natal_latitude,
        request.natal_longitude,
        request.timezone.as_deref(),
    )
    .map_err(chart_failure)?;

    let transit_subject = resolve_subject(
        &state,
        &request.transit_date,
        None,
        request.natal_latitude,
        request.natal_longitude,
        Some(natal_subject.timezone.name()),
    )
    .map_err(chart_failure)?;

    let natal = NatalChart::new(&natal_subject, house_system, &state.settings).map_err(chart_failure)?;
    let chart =
        TransitChart::new(&transit_subject, house_system, &natal, &state.settings).map_err(chart_failure)?;

    info!(
        "Transits for {} against natal JD {:.5}, house system {}",
        request.transit_date, natal_subject.julian_day, house_system
    );

    Ok(Json(chart))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::objects::ids;

    fn create_test_state() -> Arc<AppState> {
        Arc::new(AppState::new())
    }

    fn melbourne_request() -> BirthRequest {
        BirthRequest {
            date: "1991-12-10".to_string(),
            time: "04:59".to_string(),
            place: "Melbourne".to_string(),
            latitude: -37.8136,
            longitude: 144.9631,
            house_system: None,
            timezone: Some("Australia/Melbourne".to_string()),
        }
    }

    fn transit_request() -> TransitRequest {
        TransitRequest {
            natal_date: "1991-12-10".to_string(),
            natal_time: "04:59".to_string(),
            natal_latitude: -37.8136,
            natal_longitude: 144.9631,
            transit_date: "2024-01-01".to_string(),
            house_system: Some("placidus".to_string()),
            timezone: Some("Australia/Melbourne".to_string()),
        }
    }

    // ========================================================================
    // Health
    // ========================================================================

    #[tokio::test]
    async fn test_health_check() {
        let Json(response) = health_check().await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.message, HEALTH_MESSAGE);
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));

        let Json(root) = root().await;
        assert_eq!(root.status, "healthy");
    }

    // ========================================================================
    // Birth chart
    // ========================================================================

    #[tokio::test]
    async fn test_birth_chart_default_house_system() {
        let Json(chart) = birth_chart(State(create_test_state()), Json(melbourne_request()))
            .await
            .unwrap();

        assert_eq!(chart.house_system, HouseSystem::WholeSign);
        assert_eq!(chart.native.timezone, "Australia/Melbourne");
        let sun = &chart.objects[&ids::SUN];
        assert_eq!(sun.sign.name, "Sagittarius");
    }

    #[tokio::test]
    async fn test_birth_chart_placidus_case_insensitive() {
        let request = BirthRequest {
            house_system: Some(" PLACIDUS ".to_string()),
            ..melbourne_request()
        };
        let Json(chart) = birth_chart(State(create_test_state()), Json(request))
            .await
            .unwrap();
        assert_eq!(chart.house_system, HouseSystem::Placidus);
    }

    #[tokio::test]
    async fn test_birth_chart_unknown_house_system_falls_back() {
        let request = BirthRequest {
            house_system: Some("koch".to_string()),
            ..melbourne_request()
        };
        let Json(chart) = birth_chart(State(create_test_state()), Json(request))
            .await
            .unwrap();
        assert_eq!(chart.house_system, HouseSystem::WholeSign);
    }

    #[tokio::test]
    async fn test_birth_chart_timezone_lookup() {
        let request = BirthRequest {
            timezone: None,
            ..melbourne_request()
        };
        let Json(chart) = birth_chart(State(create_test_state()), Json(request))
            .await
            .unwrap();
        assert_eq!(chart.native.timezone, "Australia/Melbourne");
        assert!(chart.native.utc.starts_with("1991-12-09T17:59:00"));
    }

    #[tokio::test]
    async fn test_birth_chart_invalid_date() {
        let request = BirthRequest {
            date: "1991-13-40".to_string(),
            ..melbourne_request()
        };
        let result = birth_chart(State(create_test_state()), Json(request)).await;
        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_birth_chart_invalid_time() {
        let request = BirthRequest {
            time: "25:99".to_string(),
            ..melbourne_request()
        };
        let result = birth_chart(State(create_test_state()), Json(request)).await;
        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_birth_chart_invalid_latitude() {
        let request = BirthRequest {
            latitude: 123.0,
            ..melbourne_request()
        };
        let result = birth_chart(State(create_test_state()), Json(request)).await;
        match result {
            Err(ApiError::InvalidInput(detail)) => assert!(detail.contains("latitude")),
            other => panic!("expected InvalidInput, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_birth_chart_unknown_timezone() {
        let request = BirthRequest {
            timezone: Some("Mars/Olympus_Mons".to_string()),
            ..melbourne_request()
        };
        let result = birth_chart(State(create_test_state()), Json(request)).await;
        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_birth_chart_nonexistent_local_time() {
        let request = BirthRequest {
            date: "2024-03-10".to_string(),
            time: "02:30".to_string(),
            place: "New York".to_string(),
            latitude: 40.7128,
            longitude: -74.006,
            house_system: None,
            timezone: Some("America/New_York".to_string()),
        };
        let result = birth_chart(State(create_test_state()), Json(request)).await;
        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    }

    // ========================================================================
    // Transits
    // ========================================================================

    #[tokio::test]
    async fn test_transits() {
        let Json(chart) = transits(State(create_test_state()), Json(transit_request()))
            .await
            .unwrap();

        assert_eq!(chart.house_system, HouseSystem::Placidus);
        assert_eq!(chart.native.date_time, "2024-01-01 00:00:00");
        assert_eq!(chart.aspects_to.date_time, "1991-12-10 04:59:00");
        assert!(!chart.aspects.is_empty());
    }

    #[tokio::test]
    async fn test_transits_on_natal_date() {
        let request = TransitRequest {
            transit_date: "1991-12-10".to_string(),
            ..transit_request()
        };
        let Json(chart) = transits(State(create_test_state()), Json(request))
            .await
            .unwrap();

        assert_eq!(chart.native.date_time, "1991-12-10 00:00:00");
        assert!(!chart.objects.is_empty());
        assert!(!chart.aspects.is_empty());
        let natal_pluto = chart.aspects[&ids::PLUTO][&ids::PLUTO].passive.longitude;
        assert!((natal_pluto - 231.23).abs() < 1.0);
    }

    #[tokio::test]
    async fn test_transits_invalid_transit_date() {
        let request = TransitRequest {
            transit_date: "someday".to_string(),
            ..transit_request()
        };
        let result = transits(State(create_test_state()), Json(request)).await;
        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    }
}

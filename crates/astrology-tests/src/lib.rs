//! Integration tests for the Astrology API.
//!
//! Each test starts the real router on an ephemeral local port and talks to
//! it through `astrology-client`. Set `API_BASE_URL` to run the same tests
//! against an already running server instead; its key is then read from
//! `API_KEY`.

use astrology_api::api::create_router;
use astrology_api::config::Config;
use astrology_api::state::AppState;
use astrology_client::{AstrologyClient, BirthRequest, ClientConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// API key configured on in-process test servers.
pub const TEST_API_KEY: &str = "integration-test-key";

/// Key the test clients present.
#[must_use]
pub fn api_key() -> String {
    std::env::var("API_KEY").unwrap_or_else(|_| TEST_API_KEY.to_string())
}

/// Returns the base URL of the server under test, starting one in-process
/// unless `API_BASE_URL` is set.
///
/// # Panics
/// Panics if the local listener cannot be bound.
pub async fn spawn_server() -> String {
    if let Ok(url) = std::env::var("API_BASE_URL") {
        return url;
    }

    let mut config = Config::default();
    config.auth.api_key = Some(TEST_API_KEY.to_string());
    let app = create_router(Arc::new(AppState::from_config(&config)));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });

    format!("http://{}", addr)
}

/// Creates a test client that sends the API key.
///
/// # Errors
/// Returns error if client creation fails.
pub async fn create_test_client() -> Result<AstrologyClient, astrology_client::Error> {
    AstrologyClient::new(ClientConfig {
        base_url: spawn_server().await,
        timeout: Duration::from_secs(10),
        api_key: Some(api_key()),
    })
}

/// Creates a test client that sends no API key.
///
/// # Errors
/// Returns error if client creation fails.
pub async fn create_unauthenticated_client() -> Result<AstrologyClient, astrology_client::Error> {
    AstrologyClient::new(ClientConfig {
        base_url: spawn_server().await,
        timeout: Duration::from_secs(10),
        api_key: None,
    })
}

/// Birth data for Melbourne, 10 December 1991, 04:59 local time.
#[must_use]
pub fn melbourne_birth() -> BirthRequest {
    BirthRequest::new("1991-12-10", "04:59", "Melbourne, Australia", -37.8136, 144.9631)
        .with_timezone("Australia/Melbourne")
}

/// Shortest angular distance between two longitudes.
#[must_use]
pub fn separation(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    diff.min(360.0 - diff)
}

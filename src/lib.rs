//! # Astrology API - REST API Server
//!
//! An HTTP service that takes birth data (date, time, place) and returns
//! astrological chart data as JSON: planetary positions, house cusps, angles,
//! aspects and transits. Built with [Axum](https://crates.io/crates/axum) for
//! async HTTP handling and provides OpenAPI/Swagger documentation via
//! [utoipa](https://crates.io/crates/utoipa).
//!
//! ## Key Features
//!
//! - **Natal Charts**: Sun through Pluto, Chiron (1980-2040), the lunar
//!   nodes, Lilith, Part of Fortune, Vertex, the four angles and twelve house
//!   cusps.
//!
//! - **Transits**: Positions for a later date placed in the natal houses, with
//!   aspects to the natal chart.
//!
//! - **House Systems**: Whole sign (default) and Placidus, chosen per request.
//!
//! - **API Key Gate**: Chart endpoints require the `X-API-Key` header when a
//!   key is configured.
//!
//! - **OpenAPI Documentation**: Auto-generated Swagger UI at `/swagger-ui/`.
//!
//! - **Structured Logging**: Request tracing with `tower-http`.
//!
//! ## Architecture
//!
//! ```text
//! HTTP request
//!   └── API key gate (chart routes only)
//!         └── input validation → Subject (UTC instant, Julian day)
//!               └── chart engine: ephemeris → angles/houses → objects → aspects
//!                     └── JSON response
//! ```
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Route handlers, router and auth middleware |
//! | [`auth`] | API key verification |
//! | [`chart`] | Chart engine |
//! | [`config`] | TOML configuration with environment overrides |
//! | [`error`] | API error types with `IntoResponse` implementation |
//! | [`models`] | Request/response DTOs with OpenAPI schemas |
//! | [`state`] | Application state management |
//! | [`zodiac`] | Signs and sign-degree formatting |
//!
//! ## API Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/` | Health check |
//! | GET | `/health` | Health check |
//! | POST | `/birth-chart` | Natal chart |
//! | POST | `/transits` | Transits against a natal chart |
//!
//! ## Example Usage
//!
//! ### Starting the Server
//!
//! ```bash
//! # Development mode
//! cargo run
//!
//! # With custom host/port and API key
//! HOST=127.0.0.1 PORT=3000 API_KEY=s3cret cargo run
//!
//! # With a configuration file
//! ASTROLOGY_CONFIG=config.toml cargo run
//! ```
//!
//! ### API Requests
//!
//! ```bash
//! # Birth chart
//! curl -X POST http://localhost:8080/birth-chart \
//!   -H "Content-Type: application/json" \
//!   -H "X-API-Key: s3cret" \
//!   -d '{"date": "1991-12-10", "time": "04:59", "place": "Melbourne",
//!        "latitude": -37.8136, "longitude": 144.9631, "house_system": "placidus"}'
//!
//! # Transits for New Year's Day 2024
//! curl -X POST http://localhost:8080/transits \
//!   -H "Content-Type: application/json" \
//!   -H "X-API-Key: s3cret" \
//!   -d '{"natal_date": "1991-12-10", "natal_time": "04:59",
//!        "natal_latitude": -37.8136, "natal_longitude": 144.9631,
//!        "transit_date": "2024-01-01"}'
//! ```
//!
//! ## Swagger UI
//!
//! Once the server is running, access the interactive API documentation at:
//!
//! ```text
//! http://localhost:8080/swagger-ui/
//! ```
//!
//! ## Dependencies
//!
//! - **axum** (0.8): Async web framework
//! - **tower-http** (0.6): HTTP middleware (CORS, tracing)
//! - **utoipa** (5.4): OpenAPI documentation generation
//! - **utoipa-swagger-ui** (9.0): Swagger UI integration
//! - **tokio** (1.49): Async runtime
//! - **serde** (1.0): Serialization/deserialization
//! - **tracing** (0.1): Structured logging
//! - **chrono** / **chrono-tz** / **tzf-rs**: Dates, timezones and timezone
//!   lookup from coordinates

pub mod api;
pub mod auth;
pub mod chart;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod zodiac;

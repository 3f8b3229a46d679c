//! HTTP client library for the Astrology API.
//!
//! This crate provides a typed HTTP client for the astrology backend: health
//! checks, birth charts and transits.
//!
//! # Example
//!
//! ```no_run
//! use astrology_client::{AstrologyClient, BirthRequest, ClientConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), astrology_client::Error> {
//!     let client = AstrologyClient::new(ClientConfig {
//!         base_url: "http://localhost:8080".into(),
//!         timeout: Duration::from_secs(30),
//!         api_key: Some("s3cret".into()),
//!     })?;
//!
//!     let request = BirthRequest::new("1991-12-10", "04:59", "Melbourne", -37.8136, 144.9631)
//!         .with_house_system("placidus");
//!     let chart = client.birth_chart(&request).await?;
//!
//!     if let Some(sun) = chart.object("Sun") {
//!         println!("Sun: {} {}", sun.sign_longitude.formatted, sun.sign.name);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::{API_KEY_HEADER, AstrologyClient, ClientConfig};
pub use error::Error;
pub use types::*;

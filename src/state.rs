//! Application state management.

use crate::auth::ApiKeyGate;
use crate::chart::{ChartSettings, HouseSystem, TimezoneLocator};
use crate::config::Config;
use std::sync::Arc;
use tracing::{info, warn};

/// Application state shared across all handlers.
///
/// Everything here is read-only after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    /// API key check for chart endpoints.
    pub gate: ApiKeyGate,
    /// House system used when a request names none.
    pub default_house_system: HouseSystem,
    /// Engine settings.
    pub settings: ChartSettings,
    /// Coordinate to timezone lookup.
    pub timezones: Arc<TimezoneLocator>,
}

impl AppState {
    /// Creates a new application state with default configuration and no
    /// API key.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    /// Creates a new application state from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let gate = ApiKeyGate::new(config.auth.api_key.as_deref());
        if gate.is_enabled() {
            info!("API key authentication enabled for chart endpoints");
        } else {
            warn!("No API key configured, chart endpoints are unauthenticated");
        }

        info!(
            "Default house system: {}",
            config.chart.default_house_system
        );

        Self {
            gate,
            default_house_system: config.chart.default_house_system,
            settings: config.chart.settings(),
            timezones: Arc::new(TimezoneLocator::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

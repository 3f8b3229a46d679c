//! Timezone lookup from geographic coordinates.

use super::time::nautical_timezone;
use chrono_tz::Tz;
use tracing::debug;
use tzf_rs::DefaultFinder;

/// Finds the IANA timezone governing a point on Earth.
///
/// Building the finder loads the boundary data, so one instance is created
/// at startup and shared.
pub struct TimezoneLocator {
    finder: DefaultFinder,
}

impl TimezoneLocator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            finder: DefaultFinder::new(),
        }
    }

    /// Timezone at `latitude`/`longitude`.
    ///
    /// Points without a civil zone, or whose zone name the tz database does
    /// not know, get the nautical zone for their longitude.
    #[must_use]
    pub fn locate(&self, latitude: f64, longitude: f64) -> Tz {
        let name = self.finder.get_tz_name(longitude, latitude);
        match name.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                debug!(
                    "No timezone for ({:.4}, {:.4}), using nautical zone",
                    latitude, longitude
                );
                nautical_timezone(longitude)
            }
        }
    }
}

impl Default for TimezoneLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TimezoneLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimezoneLocator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_cities() {
        let locator = TimezoneLocator::new();
        assert_eq!(locator.locate(-37.8136, 144.9631), chrono_tz::Australia::Melbourne);
        assert_eq!(locator.locate(51.5074, -0.1278), chrono_tz::Europe::London);
        assert_eq!(locator.locate(40.7128, -74.0060), chrono_tz::America::New_York);
    }
}

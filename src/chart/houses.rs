//! Chart angles and house cusps.

use super::math::{atan2_deg, cos_deg, normalize_degrees, separation, sin_deg, tan_deg};
use super::time::{obliquity, ramc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;
use utoipa::ToSchema;

/// Iteration cap for the Placidus cusp solver.
const PLACIDUS_MAX_ITERATIONS: usize = 50;

/// Convergence threshold for the Placidus cusp solver, in degrees.
const PLACIDUS_TOLERANCE: f64 = 1e-7;

/// Supported house systems.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    /// Each house is one whole sign, starting with the rising sign.
    #[default]
    WholeSign,
    /// Time-based trisection of the diurnal and nocturnal semi-arcs.
    Placidus,
}

impl HouseSystem {
    /// Resolves a user-supplied house system name.
    ///
    /// Matching ignores case and surrounding whitespace. Anything other than
    /// `whole_sign` or `placidus`, including no value at all, resolves to
    /// [`HouseSystem::WholeSign`].
    #[must_use]
    pub fn resolve(name: Option<&str>) -> Self {
        Self::resolve_or(name, Self::WholeSign)
    }

    /// Like [`HouseSystem::resolve`], but an absent name yields `default`.
    #[must_use]
    pub fn resolve_or(name: Option<&str>, default: Self) -> Self {
        match name {
            None => default,
            Some(raw) => match raw.trim().to_lowercase().as_str() {
                "placidus" => Self::Placidus,
                _ => Self::WholeSign,
            },
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::WholeSign => "Whole Sign",
            Self::Placidus => "Placidus",
        }
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The four angles plus the Vertex, with the sidereal quantities used to
/// derive house cusps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angles {
    /// Right ascension of the meridian.
    pub ramc: f64,
    /// Obliquity of the ecliptic.
    pub obliquity: f64,
    pub ascendant: f64,
    pub midheaven: f64,
    pub vertex: f64,
}

impl Angles {
    /// Computes the angles for a Julian day and geographic position.
    #[must_use]
    pub fn compute(jd: f64, latitude: f64, longitude: f64) -> Self {
        let ramc = ramc(jd, longitude);
        let eps = obliquity(jd);

        // The Vertex is the ascendant of the co-latitude, half a day round.
        let co_latitude = if latitude >= 0.0 {
            90.0 - latitude
        } else {
            -90.0 - latitude
        };

        Self {
            ramc,
            obliquity: eps,
            ascendant: ascendant(ramc, latitude, eps),
            midheaven: midheaven(ramc, eps),
            vertex: ascendant(ramc + 180.0, co_latitude, eps),
        }
    }

    #[must_use]
    pub fn descendant(&self) -> f64 {
        normalize_degrees(self.ascendant + 180.0)
    }

    #[must_use]
    pub fn imum_coeli(&self) -> f64 {
        normalize_degrees(self.midheaven + 180.0)
    }
}

fn ascendant(ramc: f64, latitude: f64, eps: f64) -> f64 {
    atan2_deg(
        cos_deg(ramc),
        -(sin_deg(ramc) * cos_deg(eps) + tan_deg(latitude) * sin_deg(eps)),
    )
}

fn midheaven(ramc: f64, eps: f64) -> f64 {
    atan2_deg(sin_deg(ramc), cos_deg(ramc) * cos_deg(eps))
}

/// Ecliptic longitude of the point with the given right ascension.
fn ecliptic_from_ra(ra: f64, eps: f64) -> f64 {
    atan2_deg(sin_deg(ra), cos_deg(ra) * cos_deg(eps))
}

/// The twelve cusps of a chart, index 0 being the first house.
pub type Cusps = [f64; 12];

/// Computes house cusps, falling back to Porphyry where Placidus is
/// undefined (inside the polar circles).
#[must_use]
pub fn cusps(system: HouseSystem, angles: &Angles, latitude: f64) -> Cusps {
    match system {
        HouseSystem::WholeSign => whole_sign_cusps(angles.ascendant),
        HouseSystem::Placidus => placidus_cusps(angles, latitude).unwrap_or_else(|| {
            warn!(
                "Placidus undefined at latitude {:.4}, using Porphyry cusps",
                latitude
            );
            porphyry_cusps(angles)
        }),
    }
}

/// Whole-sign cusps: 0° of the rising sign, then every 30°.
#[must_use]
pub fn whole_sign_cusps(ascendant: f64) -> Cusps {
    let first = (normalize_degrees(ascendant) / 30.0).floor() * 30.0;
    std::array::from_fn(|i| normalize_degrees(first + 30.0 * i as f64))
}

/// Porphyry cusps: each quadrant between the angles split into thirds.
#[must_use]
pub fn porphyry_cusps(angles: &Angles) -> Cusps {
    let mc = angles.midheaven;
    let asc = angles.ascendant;
    let upper = normalize_degrees(asc - mc) / 3.0;
    let lower = normalize_degrees(angles.imum_coeli() - asc) / 3.0;

    let mut cusps = [0.0; 12];
    cusps[0] = asc;
    cusps[1] = normalize_degrees(asc + lower);
    cusps[2] = normalize_degrees(asc + 2.0 * lower);
    cusps[9] = mc;
    cusps[10] = normalize_degrees(mc + upper);
    cusps[11] = normalize_degrees(mc + 2.0 * upper);
    fill_opposites(&mut cusps);
    cusps
}

/// Placidus cusps, or `None` when a cusp never rises or sets.
#[must_use]
pub fn placidus_cusps(angles: &Angles, latitude: f64) -> Option<Cusps> {
    let eps = angles.obliquity;
    if latitude.abs() >= 90.0 - eps {
        return None;
    }

    let mut cusps = [0.0; 12];
    cusps[0] = angles.ascendant;
    cusps[9] = angles.midheaven;
    cusps[10] = placidus_cusp(angles.ramc, eps, latitude, 1.0 / 3.0, true)?;
    cusps[11] = placidus_cusp(angles.ramc, eps, latitude, 2.0 / 3.0, true)?;
    cusps[1] = placidus_cusp(angles.ramc, eps, latitude, 2.0 / 3.0, false)?;
    cusps[2] = placidus_cusp(angles.ramc, eps, latitude, 1.0 / 3.0, false)?;
    fill_opposites(&mut cusps);
    Some(cusps)
}

/// Solves for one intermediate Placidus cusp.
///
/// Above the horizon the cusp's right ascension is `RAMC + f·SDA`; below it
/// is `RAMC + 180° − f·SNA`, where SDA/SNA are the diurnal and nocturnal
/// semi-arcs of the cusp itself.
fn placidus_cusp(ramc: f64, eps: f64, latitude: f64, fraction: f64, above: bool) -> Option<f64> {
    let tan_lat = tan_deg(latitude);
    let initial_ra = if above {
        ramc + fraction * 90.0
    } else {
        ramc + 180.0 - fraction * 90.0
    };
    let mut longitude = ecliptic_from_ra(initial_ra, eps);

    for _ in 0..PLACIDUS_MAX_ITERATIONS {
        let declination = (sin_deg(eps) * sin_deg(longitude)).asin().to_degrees();
        let product = tan_lat * tan_deg(declination);
        if product.abs() > 1.0 {
            return None;
        }
        let ascensional_difference = product.asin().to_degrees();

        let ra = if above {
            ramc + fraction * (90.0 + ascensional_difference)
        } else {
            ramc + 180.0 - fraction * (90.0 - ascensional_difference)
        };

        let next = ecliptic_from_ra(ra, eps);
        if separation(next, longitude) < PLACIDUS_TOLERANCE {
            return Some(next);
        }
        longitude = next;
    }

    Some(longitude)
}

fn fill_opposites(cusps: &mut Cusps) {
    for i in 0..6 {
        let (known, opposite) = if matches!(i, 0..=2) { (i, i + 6) } else { (i + 6, i) };
        cusps[opposite] = normalize_degrees(cusps[known] + 180.0);
    }
}

/// House number (1-12) containing `longitude`.
#[must_use]
pub fn house_of(longitude: f64, cusps: &Cusps) -> u8 {
    let longitude = normalize_degrees(longitude);
    for i in 0..12 {
        let start = cusps[i];
        let span = normalize_degrees(cusps[(i + 1) % 12] - start);
        if normalize_degrees(longitude - start) < span {
            return i as u8 + 1;
        }
    }
    // Only reachable when cusps coincide; the first house absorbs it.
    1
}

/// Ordinal house name, e.g. `"1st House"`.
#[must_use]
pub fn house_name(number: u8) -> String {
    let suffix = match number {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };
    format!("{}{} House", number, suffix)
}

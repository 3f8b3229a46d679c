//! Low-precision analytic ephemeris.
//!
//! Geocentric ecliptic positions for the equinox of date, from mean orbital
//! elements plus the largest periodic perturbations. Typical error is one to
//! a few arc-minutes between 1800 and 2100, which is well inside the orbs
//! used for chart work. Chiron comes from fixed osculating elements and is
//! only offered between 1980 and 2040.

use super::math::{atan2_deg, cos_deg, eccentric_anomaly, normalize_degrees, signed_difference, sin_deg};
use super::time::{centuries_since_j2000, days_since_elements_epoch};

/// Half-width, in days, of the window used for speed estimates.
const SPEED_HALF_WINDOW: f64 = 0.5;

/// Fraction of mean daily motion under which a body counts as stationary.
const STATIONARY_FRACTION: f64 = 0.01;

/// Julian days (1980-01-01 to 2040-01-01) over which the fixed Chiron
/// elements stay within about half a degree. Saturn and Uranus pull the
/// orbit away from them outside this window.
pub const CHIRON_VALID_RANGE: std::ops::Range<f64> = 2_444_239.5..2_466_154.5;

/// A body whose position the ephemeris can compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    /// Mean ascending lunar node.
    MeanNode,
    /// Mean lunar apogee ("Black Moon Lilith").
    MeanLilith,
    /// Minor planet 2060 Chiron. Only computed inside [`CHIRON_VALID_RANGE`].
    Chiron,
}

impl Body {
    /// Every body, in conventional chart order.
    pub const ALL: [Body; 13] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::MeanNode,
        Body::MeanLilith,
        Body::Chiron,
    ];

    /// Average geocentric motion in degrees per day.
    #[must_use]
    pub fn mean_daily_motion(self) -> f64 {
        match self {
            Self::Sun => 0.9856,
            Self::Moon => 13.1764,
            Self::Mercury => 1.3833,
            Self::Venus => 1.2,
            Self::Mars => 0.5240,
            Self::Jupiter => 0.0831,
            Self::Saturn => 0.0334,
            Self::Uranus => 0.0117,
            Self::Neptune => 0.0060,
            Self::Pluto => 0.0040,
            Self::MeanNode => 0.0530,
            Self::MeanLilith => 0.1114,
            Self::Chiron => 0.0195,
        }
    }

    /// Whether the ephemeris gives a usable position for this body at `jd`.
    #[must_use]
    pub fn covers(self, jd: f64) -> bool {
        match self {
            Self::Chiron => CHIRON_VALID_RANGE.contains(&jd),
            _ => true,
        }
    }
}

/// Geocentric ecliptic position of a body with its daily motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPosition {
    /// Ecliptic longitude in degrees, `[0, 360)`.
    pub longitude: f64,
    /// Ecliptic latitude in degrees.
    pub latitude: f64,
    /// Longitudinal speed in degrees per day; negative when retrograde.
    pub speed: f64,
    /// Whether the speed is near zero relative to the body's mean motion.
    pub stationary: bool,
}

impl BodyPosition {
    #[must_use]
    pub fn retrograde(&self) -> bool {
        self.speed < 0.0
    }
}

/// Computes the position and speed of `body` at Julian day `jd` (UT).
#[must_use]
pub fn locate(body: Body, jd: f64) -> BodyPosition {
    let (longitude, latitude) = ecliptic(body, jd);
    let (before, _) = ecliptic(body, jd - SPEED_HALF_WINDOW);
    let (after, _) = ecliptic(body, jd + SPEED_HALF_WINDOW);
    let speed = signed_difference(before, after) / (2.0 * SPEED_HALF_WINDOW);

    BodyPosition {
        longitude,
        latitude,
        speed,
        stationary: speed.abs() < body.mean_daily_motion() * STATIONARY_FRACTION,
    }
}

/// Geocentric ecliptic longitude and latitude of `body` at `jd`.
#[must_use]
pub fn ecliptic(body: Body, jd: f64) -> (f64, f64) {
    let d = days_since_elements_epoch(jd);
    match body {
        Body::Sun => (sun(d).longitude, 0.0),
        Body::Moon => moon(d),
        Body::Mercury => planet(&MERCURY, d, unperturbed),
        Body::Venus => planet(&VENUS, d, unperturbed),
        Body::Mars => planet(&MARS, d, unperturbed),
        Body::Jupiter => planet(&JUPITER, d, jupiter_perturbations),
        Body::Saturn => planet(&SATURN, d, saturn_perturbations),
        Body::Uranus => planet(&URANUS, d, uranus_perturbations),
        Body::Neptune => planet(&NEPTUNE, d, unperturbed),
        Body::Pluto => pluto(d),
        Body::MeanNode => (mean_node(jd), 0.0),
        Body::MeanLilith => (mean_lilith(jd), 0.0),
        Body::Chiron => planet(&CHIRON, d, unperturbed),
    }
}

/// Longitude of the mean ascending lunar node.
#[must_use]
pub fn mean_node(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);
    normalize_degrees(
        125.044_547_9 - 1_934.136_289_1 * t + 0.002_075_4 * t * t + t * t * t / 467_441.0
            - t * t * t * t / 60_616_000.0,
    )
}

/// Longitude of the mean lunar apogee.
#[must_use]
pub fn mean_lilith(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);
    let perigee = 83.353_246_5 + 4_069.013_728_7 * t - 0.010_320_0 * t * t - t * t * t / 80_053.0
        + t * t * t * t / 18_999_000.0;
    normalize_degrees(perigee + 180.0)
}

/// Mean orbital elements as `base + rate * d`, `d` in days from the
/// elements epoch.
struct Elements {
    /// Longitude of the ascending node.
    node: (f64, f64),
    inclination: (f64, f64),
    /// Argument of perihelion.
    perihelion: (f64, f64),
    semi_major_axis: (f64, f64),
    eccentricity: (f64, f64),
    mean_anomaly: (f64, f64),
}

const SUN: Elements = Elements {
    node: (0.0, 0.0),
    inclination: (0.0, 0.0),
    perihelion: (282.9404, 4.70935e-5),
    semi_major_axis: (1.0, 0.0),
    eccentricity: (0.016709, -1.151e-9),
    mean_anomaly: (356.0470, 0.985_600_258_5),
};

const MOON: Elements = Elements {
    node: (125.1228, -0.052_953_808_3),
    inclination: (5.1454, 0.0),
    perihelion: (318.0634, 0.164_357_322_3),
    semi_major_axis: (60.2666, 0.0),
    eccentricity: (0.054900, 0.0),
    mean_anomaly: (115.3654, 13.064_992_950_9),
};

const MERCURY: Elements = Elements {
    node: (48.3313, 3.24587e-5),
    inclination: (7.0047, 5.00e-8),
    perihelion: (29.1241, 1.01444e-5),
    semi_major_axis: (0.387098, 0.0),
    eccentricity: (0.205635, 5.59e-10),
    mean_anomaly: (168.6562, 4.092_334_436_8),
};

const VENUS: Elements = Elements {
    node: (76.6799, 2.46590e-5),
    inclination: (3.3946, 2.75e-8),
    perihelion: (54.8910, 1.38374e-5),
    semi_major_axis: (0.723330, 0.0),
    eccentricity: (0.006773, -1.302e-9),
    mean_anomaly: (48.0052, 1.602_130_224_4),
};

const MARS: Elements = Elements {
    node: (49.5574, 2.11081e-5),
    inclination: (1.8497, -1.78e-8),
    perihelion: (286.5016, 2.92961e-5),
    semi_major_axis: (1.523688, 0.0),
    eccentricity: (0.093405, 2.516e-9),
    mean_anomaly: (18.6021, 0.524_020_776_6),
};

const JUPITER: Elements = Elements {
    node: (100.4542, 2.76854e-5),
    inclination: (1.3030, -1.557e-7),
    perihelion: (273.8777, 1.64505e-5),
    semi_major_axis: (5.20256, 0.0),
    eccentricity: (0.048498, 4.469e-9),
    mean_anomaly: (19.8950, 0.083_085_300_1),
};

const SATURN: Elements = Elements {
    node: (113.6634, 2.38980e-5),
    inclination: (2.4886, -1.081e-7),
    perihelion: (339.3939, 2.97661e-5),
    semi_major_axis: (9.55475, 0.0),
    eccentricity: (0.055546, -9.499e-9),
    mean_anomaly: (316.9670, 0.033_444_228_2),
};

const URANUS: Elements = Elements {
    node: (74.0005, 1.3978e-5),
    inclination: (0.7733, 1.9e-8),
    perihelion: (96.6612, 3.0565e-5),
    semi_major_axis: (19.18171, -1.55e-8),
    eccentricity: (0.047318, 7.45e-9),
    mean_anomaly: (142.5905, 0.011_725_806),
};

const NEPTUNE: Elements = Elements {
    node: (131.7806, 3.0173e-5),
    inclination: (1.7700, -2.55e-7),
    perihelion: (272.8461, -6.027e-6),
    semi_major_axis: (30.05826, 3.313e-8),
    eccentricity: (0.008606, 2.15e-9),
    mean_anomaly: (260.2471, 0.005_995_147),
};

// Osculating elements for perihelion 1996-02-14, referred to the J2000
// equinox; the node rate carries general precession to the equinox of date.
const CHIRON: Elements = Elements {
    node: (209.2999, 3.82394e-5),
    inclination: (6.926, 0.0),
    perihelion: (339.25, 0.0),
    semi_major_axis: (13.633, 0.0),
    eccentricity: (0.3786, 0.0),
    mean_anomaly: (27.7158, 0.019_580_191),
};

fn at(term: (f64, f64), d: f64) -> f64 {
    term.0 + term.1 * d
}

/// Ecliptic coordinates relative to the orbit's central body.
struct Orbit {
    longitude: f64,
    latitude: f64,
    radius: f64,
}

fn orbit(elements: &Elements, d: f64) -> Orbit {
    let node = at(elements.node, d);
    let inclination = at(elements.inclination, d);
    let perihelion = at(elements.perihelion, d);
    let a = at(elements.semi_major_axis, d);
    let e = at(elements.eccentricity, d);
    let m = at(elements.mean_anomaly, d);

    let ea = eccentric_anomaly(m, e);
    let xv = a * (cos_deg(ea) - e);
    let yv = a * (1.0 - e * e).sqrt() * sin_deg(ea);
    let true_anomaly = yv.atan2(xv).to_degrees();
    let radius = xv.hypot(yv);

    let arg = true_anomaly + perihelion;
    let x = radius * (cos_deg(node) * cos_deg(arg) - sin_deg(node) * sin_deg(arg) * cos_deg(inclination));
    let y = radius * (sin_deg(node) * cos_deg(arg) + cos_deg(node) * sin_deg(arg) * cos_deg(inclination));
    let z = radius * sin_deg(arg) * sin_deg(inclination);

    Orbit {
        longitude: atan2_deg(y, x),
        latitude: z.atan2(x.hypot(y)).to_degrees(),
        radius,
    }
}

struct SolarPosition {
    longitude: f64,
    radius: f64,
    mean_anomaly: f64,
    mean_longitude: f64,
}

fn sun(d: f64) -> SolarPosition {
    let perihelion = at(SUN.perihelion, d);
    let e = at(SUN.eccentricity, d);
    let m = normalize_degrees(at(SUN.mean_anomaly, d));

    let ea = eccentric_anomaly(m, e);
    let xv = cos_deg(ea) - e;
    let yv = (1.0 - e * e).sqrt() * sin_deg(ea);

    SolarPosition {
        longitude: normalize_degrees(yv.atan2(xv).to_degrees() + perihelion),
        radius: xv.hypot(yv),
        mean_anomaly: m,
        mean_longitude: normalize_degrees(m + perihelion),
    }
}

fn moon(d: f64) -> (f64, f64) {
    let base = orbit(&MOON, d);
    let solar = sun(d);

    let ms = solar.mean_anomaly;
    let mm = normalize_degrees(at(MOON.mean_anomaly, d));
    let node = at(MOON.node, d);
    let lm = normalize_degrees(node + at(MOON.perihelion, d) + mm);
    let elongation = lm - solar.mean_longitude;
    let f = lm - node;

    let longitude = base.longitude - 1.274 * sin_deg(mm - 2.0 * elongation)
        + 0.658 * sin_deg(2.0 * elongation)
        - 0.186 * sin_deg(ms)
        - 0.059 * sin_deg(2.0 * mm - 2.0 * elongation)
        - 0.057 * sin_deg(mm - 2.0 * elongation + ms)
        + 0.053 * sin_deg(mm + 2.0 * elongation)
        + 0.046 * sin_deg(2.0 * elongation - ms)
        + 0.041 * sin_deg(mm - ms)
        - 0.035 * sin_deg(elongation)
        - 0.031 * sin_deg(mm + ms)
        - 0.015 * sin_deg(2.0 * f - 2.0 * elongation)
        + 0.011 * sin_deg(mm - 4.0 * elongation);

    let latitude = base.latitude - 0.173 * sin_deg(f - 2.0 * elongation)
        - 0.055 * sin_deg(mm - f - 2.0 * elongation)
        - 0.046 * sin_deg(mm + f - 2.0 * elongation)
        + 0.033 * sin_deg(f + 2.0 * elongation)
        + 0.017 * sin_deg(2.0 * mm + f);

    (normalize_degrees(longitude), latitude)
}

/// Mean anomalies of the giant planets, which drive the largest mutual
/// perturbations.
#[derive(Debug, Clone, Copy)]
struct GiantAnomalies {
    jupiter: f64,
    saturn: f64,
    uranus: f64,
}

impl GiantAnomalies {
    fn at(d: f64) -> Self {
        Self {
            jupiter: normalize_degrees(at(JUPITER.mean_anomaly, d)),
            saturn: normalize_degrees(at(SATURN.mean_anomaly, d)),
            uranus: normalize_degrees(at(URANUS.mean_anomaly, d)),
        }
    }
}

/// Corrections to heliocentric (longitude, latitude) in degrees.
type Perturbation = fn(GiantAnomalies) -> (f64, f64);

fn unperturbed(_: GiantAnomalies) -> (f64, f64) {
    (0.0, 0.0)
}

fn jupiter_perturbations(g: GiantAnomalies) -> (f64, f64) {
    let (mj, ms) = (g.jupiter, g.saturn);
    let longitude = -0.332 * sin_deg(2.0 * mj - 5.0 * ms - 67.6)
        - 0.056 * sin_deg(2.0 * mj - 2.0 * ms + 21.0)
        + 0.042 * sin_deg(3.0 * mj - 5.0 * ms + 21.0)
        - 0.036 * sin_deg(mj - 2.0 * ms)
        + 0.022 * cos_deg(mj - ms)
        + 0.023 * sin_deg(2.0 * mj - 3.0 * ms + 52.0)
        - 0.016 * sin_deg(mj - 5.0 * ms - 69.0);
    (longitude, 0.0)
}

fn saturn_perturbations(g: GiantAnomalies) -> (f64, f64) {
    let (mj, ms) = (g.jupiter, g.saturn);
    let longitude = 0.812 * sin_deg(2.0 * mj - 5.0 * ms - 67.6)
        - 0.229 * cos_deg(2.0 * mj - 4.0 * ms - 2.0)
        + 0.119 * sin_deg(mj - 2.0 * ms - 3.0)
        + 0.046 * sin_deg(2.0 * mj - 6.0 * ms - 69.0)
        + 0.014 * sin_deg(mj - 3.0 * ms + 32.0);
    let latitude =
        -0.020 * cos_deg(2.0 * mj - 4.0 * ms - 2.0) + 0.018 * sin_deg(2.0 * mj - 6.0 * ms - 49.0);
    (longitude, latitude)
}

fn uranus_perturbations(g: GiantAnomalies) -> (f64, f64) {
    let (mj, ms, mu) = (g.jupiter, g.saturn, g.uranus);
    let longitude = 0.040 * sin_deg(ms - 2.0 * mu + 6.0) + 0.035 * sin_deg(ms - 3.0 * mu + 33.0)
        - 0.015 * sin_deg(mj - mu + 20.0);
    (longitude, 0.0)
}

fn planet(elements: &Elements, d: f64, perturb: Perturbation) -> (f64, f64) {
    let helio = orbit(elements, d);
    let (d_lon, d_lat) = perturb(GiantAnomalies::at(d));
    geocentric(
        helio.longitude + d_lon,
        helio.latitude + d_lat,
        helio.radius,
        &sun(d),
    )
}

fn pluto(d: f64) -> (f64, f64) {
    let s = 50.03 + 0.033_459_652 * d;
    let p = 238.95 + 0.003_968_789 * d;

    let longitude = 238.9508 + 0.004_007_03 * d - 19.799 * sin_deg(p) + 19.848 * cos_deg(p)
        + 0.897 * sin_deg(2.0 * p)
        - 4.956 * cos_deg(2.0 * p)
        + 0.610 * sin_deg(3.0 * p)
        + 1.211 * cos_deg(3.0 * p)
        - 0.341 * sin_deg(4.0 * p)
        - 0.190 * cos_deg(4.0 * p)
        + 0.128 * sin_deg(5.0 * p)
        - 0.034 * cos_deg(5.0 * p)
        - 0.038 * sin_deg(6.0 * p)
        + 0.031 * cos_deg(6.0 * p)
        + 0.020 * sin_deg(s - p)
        - 0.010 * cos_deg(s - p);

    let latitude = -3.9082 - 5.453 * sin_deg(p) - 14.975 * cos_deg(p)
        + 3.527 * sin_deg(2.0 * p)
        + 1.673 * cos_deg(2.0 * p)
        - 1.051 * sin_deg(3.0 * p)
        + 0.328 * cos_deg(3.0 * p)
        + 0.179 * sin_deg(4.0 * p)
        - 0.292 * cos_deg(4.0 * p)
        + 0.019 * sin_deg(5.0 * p)
        + 0.100 * cos_deg(5.0 * p)
        - 0.031 * sin_deg(6.0 * p)
        - 0.026 * cos_deg(6.0 * p)
        + 0.011 * cos_deg(s - p);

    let radius = 40.72 + 6.68 * sin_deg(p) + 6.90 * cos_deg(p) - 1.18 * sin_deg(2.0 * p)
        - 0.03 * cos_deg(2.0 * p)
        + 0.15 * sin_deg(3.0 * p)
        - 0.14 * cos_deg(3.0 * p);

    // The series is referred to the J2000 equinox; precess to date.
    let precession = 3.823_94e-5 * d;

    geocentric(longitude + precession, latitude, radius, &sun(d))
}

/// Converts heliocentric ecliptic coordinates to geocentric.
fn geocentric(longitude: f64, latitude: f64, radius: f64, solar: &SolarPosition) -> (f64, f64) {
    let x = radius * cos_deg(longitude) * cos_deg(latitude) + solar.radius * cos_deg(solar.longitude);
    let y = radius * sin_deg(longitude) * cos_deg(latitude) + solar.radius * sin_deg(solar.longitude);
    let z = radius * sin_deg(latitude);

    (atan2_deg(y, x), z.atan2(x.hypot(y)).to_degrees())
}

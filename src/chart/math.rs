//! Degree-based trigonometry helpers.

/// Wraps an angle into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Signed shortest difference `to - from`, in `(-180, 180]`.
#[must_use]
pub fn signed_difference(from: f64, to: f64) -> f64 {
    let diff = normalize_degrees(to - from);
    if diff > 180.0 { diff - 360.0 } else { diff }
}

/// Unsigned separation between two longitudes, in `[0, 180]`.
#[must_use]
pub fn separation(a: f64, b: f64) -> f64 {
    signed_difference(a, b).abs()
}

#[must_use]
pub fn sin_deg(angle: f64) -> f64 {
    angle.to_radians().sin()
}

#[must_use]
pub fn cos_deg(angle: f64) -> f64 {
    angle.to_radians().cos()
}

#[must_use]
pub fn tan_deg(angle: f64) -> f64 {
    angle.to_radians().tan()
}

/// `atan2` returning degrees in `[0, 360)`.
#[must_use]
pub fn atan2_deg(y: f64, x: f64) -> f64 {
    normalize_degrees(y.atan2(x).to_degrees())
}

/// Solves Kepler's equation for the eccentric anomaly (degrees).
#[must_use]
pub fn eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let m = normalize_degrees(mean_anomaly);
    let e = eccentricity;
    let mut anomaly = m + (e * sin_deg(m) * (1.0 + e * cos_deg(m))).to_degrees();

    for _ in 0..30 {
        let delta = (anomaly - (e * sin_deg(anomaly)).to_degrees() - m) / (1.0 - e * cos_deg(anomaly));
        anomaly -= delta;
        if delta.abs() < 1e-9 {
            break;
        }
    }

    anomaly
}

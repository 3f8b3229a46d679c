//! Major aspects between chart objects.

use super::math::{normalize_degrees, separation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Differences under this many degrees count as exact (one arc-minute).
const EXACT_THRESHOLD: f64 = 1.0 / 60.0;

/// Look-ahead, in days, used to decide whether an aspect is applying.
const MOVEMENT_STEP_DAYS: f64 = 0.01;

/// A major (Ptolemaic) aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    pub const ALL: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    /// Exact angular separation of the aspect in degrees.
    #[must_use]
    pub fn angle(self) -> f64 {
        match self {
            Self::Conjunction => 0.0,
            Self::Sextile => 60.0,
            Self::Square => 90.0,
            Self::Trine => 120.0,
            Self::Opposition => 180.0,
        }
    }
}

/// Maximum allowed deviation from exact, per aspect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Orbs {
    pub conjunction: f64,
    pub sextile: f64,
    pub square: f64,
    pub trine: f64,
    pub opposition: f64,
}

impl Default for Orbs {
    fn default() -> Self {
        Self {
            conjunction: 10.0,
            sextile: 6.0,
            square: 8.0,
            trine: 8.0,
            opposition: 10.0,
        }
    }
}

impl Orbs {
    #[must_use]
    pub fn for_kind(&self, kind: AspectKind) -> f64 {
        match kind {
            AspectKind::Conjunction => self.conjunction,
            AspectKind::Sextile => self.sextile,
            AspectKind::Square => self.square,
            AspectKind::Trine => self.trine,
            AspectKind::Opposition => self.opposition,
        }
    }

    /// Whether every orb is finite and within `[0, 30]`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        AspectKind::ALL.iter().all(|&kind| {
            let orb = self.for_kind(kind);
            orb.is_finite() && (0.0..=30.0).contains(&orb)
        })
    }
}

/// Whether the aspect is tightening or loosening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum AspectMovement {
    Applying,
    Exact,
    Separating,
}

/// One end of an aspect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectPoint<'a> {
    pub index: u32,
    pub name: &'a str,
    pub longitude: f64,
    /// Degrees per day; zero for fixed natal positions.
    pub speed: f64,
}

/// Reference to an aspecting object in serialized output.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AspectMember {
    pub index: u32,
    pub name: String,
    pub longitude: f64,
}

impl From<&AspectPoint<'_>> for AspectMember {
    fn from(point: &AspectPoint<'_>) -> Self {
        Self {
            index: point.index,
            name: point.name.to_string(),
            longitude: point.longitude,
        }
    }
}

/// An aspect between two chart objects.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Aspect {
    pub active: AspectMember,
    pub passive: AspectMember,
    #[serde(rename = "type")]
    pub kind: AspectKind,
    /// Exact angle of the aspect.
    pub aspect: f64,
    /// Orb allowed for this aspect.
    pub orb: f64,
    /// Actual separation of the two longitudes, `[0, 180]`.
    pub distance: f64,
    /// `distance - aspect`; negative when inside the exact angle.
    pub difference: f64,
    pub movement: AspectMovement,
}

/// Finds the tightest major aspect between two points, if any is in orb.
#[must_use]
pub fn find_aspect(active: &AspectPoint<'_>, passive: &AspectPoint<'_>, orbs: &Orbs) -> Option<Aspect> {
    let distance = separation(active.longitude, passive.longitude);

    let (kind, difference) = AspectKind::ALL
        .iter()
        .map(|&kind| (kind, distance - kind.angle()))
        .filter(|&(kind, difference)| difference.abs() <= orbs.for_kind(kind))
        .min_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))?;

    Some(Aspect {
        active: active.into(),
        passive: passive.into(),
        kind,
        aspect: kind.angle(),
        orb: orbs.for_kind(kind),
        distance,
        difference,
        movement: movement(active, passive, kind, difference),
    })
}

fn movement(active: &AspectPoint<'_>, passive: &AspectPoint<'_>, kind: AspectKind, difference: f64) -> AspectMovement {
    if difference.abs() < EXACT_THRESHOLD {
        return AspectMovement::Exact;
    }

    let future_distance = separation(
        normalize_degrees(active.longitude + active.speed * MOVEMENT_STEP_DAYS),
        normalize_degrees(passive.longitude + passive.speed * MOVEMENT_STEP_DAYS),
    );
    let future_difference = future_distance - kind.angle();

    if future_difference.abs() < difference.abs() {
        AspectMovement::Applying
    } else {
        AspectMovement::Separating
    }
}

//! Chart objects: the serialized form of planets, points, angles and houses.

use super::houses::house_name;
use super::time::declination;
use crate::zodiac::{Element, Modality, Sign, format_longitude, format_sign_degree};
use serde::Serialize;
use utoipa::ToSchema;

/// Stable object identifiers used as keys of the `objects` mapping.
pub mod ids {
    pub const HOUSE_1: u32 = 2_000_001;

    pub const SUN: u32 = 4_000_001;
    pub const MOON: u32 = 4_000_002;
    pub const MERCURY: u32 = 4_000_003;
    pub const VENUS: u32 = 4_000_004;
    pub const MARS: u32 = 4_000_005;
    pub const JUPITER: u32 = 4_000_006;
    pub const SATURN: u32 = 4_000_007;
    pub const URANUS: u32 = 4_000_008;
    pub const NEPTUNE: u32 = 4_000_009;
    pub const PLUTO: u32 = 4_000_010;

    /// Minor planet 2060.
    pub const CHIRON: u32 = 5_002_060;

    pub const NORTH_NODE: u32 = 6_000_001;
    pub const SOUTH_NODE: u32 = 6_000_002;
    pub const LILITH: u32 = 6_000_003;
    pub const VERTEX: u32 = 6_000_004;
    pub const PART_OF_FORTUNE: u32 = 6_000_005;

    pub const ASC: u32 = 9_000_001;
    pub const DESC: u32 = 9_000_002;
    pub const MC: u32 = 9_000_003;
    pub const IC: u32 = 9_000_004;

    /// Identifier of the `number`th house cusp (1-12).
    #[must_use]
    pub fn house(number: u8) -> u32 {
        HOUSE_1 + u32::from(number) - 1
    }
}

/// Broad category of a chart object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    House,
    Planet,
    Asteroid,
    Point,
    Angle,
}

impl ObjectKind {
    fn info(self) -> ObjectTypeInfo {
        let (index, name) = match self {
            Self::House => (2, "House"),
            Self::Planet => (4, "Planet"),
            Self::Asteroid => (5, "Asteroid"),
            Self::Point => (6, "Point"),
            Self::Angle => (9, "Angle"),
        };
        ObjectTypeInfo {
            index,
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ObjectTypeInfo {
    pub index: u8,
    pub name: String,
}

/// Absolute ecliptic longitude.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LongitudeInfo {
    /// Degrees from 0° Aries, `[0, 360)`.
    pub raw: f64,
    /// `DDD°MM'`.
    pub formatted: String,
    pub retrograde: bool,
}

/// Longitude measured from the start of the object's sign.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SignLongitude {
    pub raw: f64,
    /// `D°MM'`.
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SignInfo {
    /// 1 (Aries) to 12 (Pisces).
    pub number: u8,
    pub name: String,
    pub element: Element,
    pub modality: Modality,
}

impl From<Sign> for SignInfo {
    fn from(sign: Sign) -> Self {
        Self {
            number: sign.number(),
            name: sign.name().to_string(),
            element: sign.element(),
            modality: sign.modality(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HouseInfo {
    pub number: u8,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MovementInfo {
    pub direct: bool,
    pub stationary: bool,
    pub retrograde: bool,
    /// `Direct`, `Stationary` or `Retrograde`.
    pub formatted: String,
}

impl MovementInfo {
    fn new(speed: f64, stationary: bool) -> Self {
        let retrograde = speed < 0.0;
        let formatted = if stationary {
            "Stationary"
        } else if retrograde {
            "Retrograde"
        } else {
            "Direct"
        };
        Self {
            direct: !retrograde,
            stationary,
            retrograde,
            formatted: formatted.to_string(),
        }
    }
}

/// Where an object sits and how it moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub longitude: f64,
    pub latitude: f64,
    /// Degrees per day, `None` for objects fixed to the chart frame.
    pub speed: Option<f64>,
    pub stationary: bool,
}

impl Placement {
    /// A point on the ecliptic with no motion of its own.
    #[must_use]
    pub fn fixed(longitude: f64) -> Self {
        Self {
            longitude,
            latitude: 0.0,
            speed: None,
            stationary: false,
        }
    }
}

/// A single planet, point, angle or house cusp in a chart.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChartObject {
    pub index: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ObjectTypeInfo,
    pub longitude: LongitudeInfo,
    /// Ecliptic latitude in degrees.
    pub latitude: f64,
    pub sign_longitude: SignLongitude,
    pub sign: SignInfo,
    pub house: HouseInfo,
    pub declination: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movement: Option<MovementInfo>,
}

impl ChartObject {
    /// Builds the serialized view of an object at `placement`, lying in
    /// house `house`.
    #[must_use]
    pub fn new(index: u32, name: &str, kind: ObjectKind, placement: Placement, house: u8, obliquity: f64) -> Self {
        let sign = Sign::from_longitude(placement.longitude);
        let retrograde = placement.speed.is_some_and(|speed| speed < 0.0);

        Self {
            index,
            name: name.to_string(),
            kind: kind.info(),
            longitude: LongitudeInfo {
                raw: placement.longitude,
                formatted: format_longitude(placement.longitude),
                retrograde,
            },
            latitude: placement.latitude,
            sign_longitude: SignLongitude {
                raw: placement.longitude - sign.band_start(),
                formatted: format_sign_degree(placement.longitude, sign.name()),
            },
            sign: sign.into(),
            house: HouseInfo {
                number: house,
                name: house_name(house),
            },
            declination: declination(placement.longitude, placement.latitude, obliquity),
            speed: placement.speed,
            movement: placement
                .speed
                .map(|speed| MovementInfo::new(speed, placement.stationary)),
        }
    }

    /// Whether this object takes part in aspect calculations.
    ///
    /// House cusps and the mirror points (Desc, IC, South Node) are excluded;
    /// their aspects duplicate those of Asc, MC and North Node.
    #[must_use]
    pub fn aspects_enabled(&self) -> bool {
        self.kind.name != "House" && !matches!(self.index, ids::DESC | ids::IC | ids::SOUTH_NODE)
    }

    /// Whether every numeric field is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.longitude.raw.is_finite()
            && self.latitude.is_finite()
            && self.declination.is_finite()
            && self.speed.is_none_or(f64::is_finite)
    }
}

//! Natal and transit chart assembly.

use super::aspects::{Aspect, AspectPoint, Orbs, find_aspect};
use super::ephemeris::{self, Body};
use super::houses::{self, Angles, Cusps, HouseSystem, house_name, house_of};
use super::math::normalize_degrees;
use super::objects::{ChartObject, ObjectKind, Placement, ids};
use super::{ChartError, ChartSettings, Subject, SubjectInfo};
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Chart objects keyed by their identifier.
pub type ObjectMap = BTreeMap<u32, ChartObject>;

/// Aspects keyed by active object id, then passive object id.
pub type AspectMap = BTreeMap<u32, BTreeMap<u32, Aspect>>;

struct BodyEntry {
    body: Body,
    index: u32,
    name: &'static str,
    kind: ObjectKind,
}

const BODIES: [BodyEntry; 13] = [
    BodyEntry { body: Body::Sun, index: ids::SUN, name: "Sun", kind: ObjectKind::Planet },
    BodyEntry { body: Body::Moon, index: ids::MOON, name: "Moon", kind: ObjectKind::Planet },
    BodyEntry { body: Body::Mercury, index: ids::MERCURY, name: "Mercury", kind: ObjectKind::Planet },
    BodyEntry { body: Body::Venus, index: ids::VENUS, name: "Venus", kind: ObjectKind::Planet },
    BodyEntry { body: Body::Mars, index: ids::MARS, name: "Mars", kind: ObjectKind::Planet },
    BodyEntry { body: Body::Jupiter, index: ids::JUPITER, name: "Jupiter", kind: ObjectKind::Planet },
    BodyEntry { body: Body::Saturn, index: ids::SATURN, name: "Saturn", kind: ObjectKind::Planet },
    BodyEntry { body: Body::Uranus, index: ids::URANUS, name: "Uranus", kind: ObjectKind::Planet },
    BodyEntry { body: Body::Neptune, index: ids::NEPTUNE, name: "Neptune", kind: ObjectKind::Planet },
    BodyEntry { body: Body::Pluto, index: ids::PLUTO, name: "Pluto", kind: ObjectKind::Planet },
    BodyEntry { body: Body::MeanNode, index: ids::NORTH_NODE, name: "North Node", kind: ObjectKind::Point },
    BodyEntry { body: Body::MeanLilith, index: ids::LILITH, name: "Lilith", kind: ObjectKind::Point },
    BodyEntry { body: Body::Chiron, index: ids::CHIRON, name: "Chiron", kind: ObjectKind::Asteroid },
];

/// Phase of the Moon by its elongation from the Sun, in 45° sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum MoonPhase {
    #[serde(rename = "New Moon")]
    NewMoon,
    #[serde(rename = "Waxing Crescent")]
    WaxingCrescent,
    #[serde(rename = "First Quarter")]
    FirstQuarter,
    #[serde(rename = "Waxing Gibbous")]
    WaxingGibbous,
    #[serde(rename = "Full Moon")]
    FullMoon,
    #[serde(rename = "Disseminating")]
    Disseminating,
    #[serde(rename = "Third Quarter")]
    ThirdQuarter,
    #[serde(rename = "Balsamic")]
    Balsamic,
}

impl MoonPhase {
    /// Phase for the given Sun and Moon longitudes.
    #[must_use]
    pub fn from_longitudes(sun: f64, moon: f64) -> Self {
        let elongation = normalize_degrees(moon - sun);
        match (elongation / 45.0) as u8 {
            0 => Self::NewMoon,
            1 => Self::WaxingCrescent,
            2 => Self::FirstQuarter,
            3 => Self::WaxingGibbous,
            4 => Self::FullMoon,
            5 => Self::Disseminating,
            6 => Self::ThirdQuarter,
            _ => Self::Balsamic,
        }
    }
}

/// A birth chart.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct NatalChart {
    pub native: SubjectInfo,
    pub house_system: HouseSystem,
    /// Whether the Sun is above the horizon.
    pub diurnal: bool,
    pub moon_phase: MoonPhase,
    pub objects: BTreeMap<u32, ChartObject>,
    pub aspects: BTreeMap<u32, BTreeMap<u32, Aspect>>,
    #[serde(skip)]
    cusps: Cusps,
}

impl NatalChart {
    /// Casts the chart for `subject`.
    ///
    /// # Errors
    /// Returns [`ChartError::Computation`] if any object position is not
    /// finite.
    pub fn new(subject: &Subject, house_system: HouseSystem, settings: &ChartSettings) -> Result<Self, ChartError> {
        let jd = subject.julian_day;
        let angles = Angles::compute(jd, subject.latitude, subject.longitude);
        let cusps = houses::cusps(house_system, &angles, subject.latitude);
        let eps = angles.obliquity;
        let place = |index: u32, name: &str, kind: ObjectKind, placement: Placement| {
            ChartObject::new(index, name, kind, placement, house_of(placement.longitude, &cusps), eps)
        };

        let mut objects = ObjectMap::new();

        for (number, &cusp) in (1u8..=12).zip(cusps.iter()) {
            let index = ids::house(number);
            let object = ChartObject::new(index, &house_name(number), ObjectKind::House, Placement::fixed(cusp), number, eps);
            objects.insert(index, object);
        }

        for object in moving_objects(jd, &cusps, eps) {
            objects.insert(object.index, object);
        }

        let sun = longitude_of(&objects, ids::SUN)?;
        let moon = longitude_of(&objects, ids::MOON)?;
        let diurnal = is_diurnal(sun, angles.ascendant);
        let fortune = part_of_fortune(angles.ascendant, sun, moon, diurnal);

        let fixed = [
            (ids::VERTEX, "Vertex", ObjectKind::Point, angles.vertex),
            (ids::PART_OF_FORTUNE, "Part of Fortune", ObjectKind::Point, fortune),
            (ids::ASC, "Asc", ObjectKind::Angle, angles.ascendant),
            (ids::DESC, "Desc", ObjectKind::Angle, angles.descendant()),
            (ids::MC, "MC", ObjectKind::Angle, angles.midheaven),
            (ids::IC, "IC", ObjectKind::Angle, angles.imum_coeli()),
        ];
        for (index, name, kind, longitude) in fixed {
            objects.insert(index, place(index, name, kind, Placement::fixed(longitude)));
        }

        ensure_finite(&objects)?;

        let aspects = natal_aspects(&objects, &settings.orbs);

        Ok(Self {
            native: subject.info(),
            house_system,
            diurnal,
            moon_phase: MoonPhase::from_longitudes(sun, moon),
            objects,
            aspects,
            cusps,
        })
    }

    /// House cusps of the chart, first house first.
    #[must_use]
    pub fn cusps(&self) -> &Cusps {
        &self.cusps
    }

    /// Looks an object up by display name.
    #[must_use]
    pub fn object_named(&self, name: &str) -> Option<&ChartObject> {
        self.objects.values().find(|object| object.name == name)
    }
}

/// Positions at a later date, set against a natal chart.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TransitChart {
    /// The transit moment.
    pub native: SubjectInfo,
    /// The natal chart's subject.
    pub aspects_to: SubjectInfo,
    pub house_system: HouseSystem,
    /// Whether the Sun is above the horizon at the transit moment.
    pub diurnal: bool,
    pub moon_phase: MoonPhase,
    /// Transiting bodies, placed in the natal houses.
    pub objects: BTreeMap<u32, ChartObject>,
    /// Aspects from transiting objects (outer key) to natal objects.
    pub aspects: BTreeMap<u32, BTreeMap<u32, Aspect>>,
}

impl TransitChart {
    /// Casts the transits at `subject` against `natal`.
    ///
    /// # Errors
    /// Returns [`ChartError::Computation`] if any object position is not
    /// finite.
    pub fn new(
        subject: &Subject,
        house_system: HouseSystem,
        natal: &NatalChart,
        settings: &ChartSettings,
    ) -> Result<Self, ChartError> {
        let jd = subject.julian_day;
        let angles = Angles::compute(jd, subject.latitude, subject.longitude);

        let objects: ObjectMap = moving_objects(jd, &natal.cusps, angles.obliquity)
            .into_iter()
            .map(|object| (object.index, object))
            .collect();
        ensure_finite(&objects)?;

        let sun = longitude_of(&objects, ids::SUN)?;
        let moon = longitude_of(&objects, ids::MOON)?;

        let mut aspects = AspectMap::new();
        for transit in objects.values().filter(|object| object.aspects_enabled()) {
            let active = aspect_point(transit);
            for natal_object in natal.objects.values().filter(|object| object.aspects_enabled()) {
                let passive = AspectPoint {
                    speed: 0.0,
                    ..aspect_point(natal_object)
                };
                if let Some(aspect) = find_aspect(&active, &passive, &settings.orbs) {
                    aspects
                        .entry(transit.index)
                        .or_default()
                        .insert(natal_object.index, aspect);
                }
            }
        }

        Ok(Self {
            native: subject.info(),
            aspects_to: natal.native.clone(),
            house_system,
            diurnal: is_diurnal(sun, angles.ascendant),
            moon_phase: MoonPhase::from_longitudes(sun, moon),
            objects,
            aspects,
        })
    }
}

/// Sun, Moon, planets, lunar points (including the South Node) and Chiron.
///
/// Bodies the ephemeris does not cover at `jd` are left out.
fn moving_objects(jd: f64, cusps: &Cusps, eps: f64) -> Vec<ChartObject> {
    let place = |index: u32, name: &str, kind: ObjectKind, placement: Placement| {
        ChartObject::new(index, name, kind, placement, house_of(placement.longitude, cusps), eps)
    };

    let mut objects = Vec::with_capacity(BODIES.len() + 1);
    for entry in BODIES.iter().filter(|entry| entry.body.covers(jd)) {
        let position = ephemeris::locate(entry.body, jd);
        let placement = Placement {
            longitude: position.longitude,
            latitude: position.latitude,
            speed: Some(position.speed),
            stationary: position.stationary,
        };
        objects.push(place(entry.index, entry.name, entry.kind, placement));

        if entry.body == Body::MeanNode {
            let south = Placement {
                longitude: normalize_degrees(position.longitude + 180.0),
                latitude: -position.latitude,
                ..placement
            };
            objects.push(place(ids::SOUTH_NODE, "South Node", ObjectKind::Point, south));
        }
    }
    objects
}

/// The Sun is above the horizon when it lies in houses 7 to 12, i.e. more
/// than half a circle ahead of the Ascendant.
fn is_diurnal(sun: f64, ascendant: f64) -> bool {
    normalize_degrees(sun - ascendant) >= 180.0
}

fn part_of_fortune(ascendant: f64, sun: f64, moon: f64, diurnal: bool) -> f64 {
    if diurnal {
        normalize_degrees(ascendant + moon - sun)
    } else {
        normalize_degrees(ascendant + sun - moon)
    }
}

fn ensure_finite(objects: &ObjectMap) -> Result<(), ChartError> {
    match objects.values().find(|object| !object.is_finite()) {
        Some(object) => Err(ChartError::Computation(format!(
            "non-finite position for {}",
            object.name
        ))),
        None => Ok(()),
    }
}

fn longitude_of(objects: &ObjectMap, index: u32) -> Result<f64, ChartError> {
    objects
        .get(&index)
        .map(|object| object.longitude.raw)
        .ok_or_else(|| ChartError::Computation(format!("object {} missing from chart", index)))
}

fn aspect_point(object: &ChartObject) -> AspectPoint<'_> {
    AspectPoint {
        index: object.index,
        name: &object.name,
        longitude: object.longitude.raw,
        speed: object.speed.unwrap_or(0.0),
    }
}

/// Aspects between every pair of natal objects, recorded under both members.
fn natal_aspects(objects: &ObjectMap, orbs: &Orbs) -> AspectMap {
    let points: Vec<AspectPoint<'_>> = objects
        .values()
        .filter(|object| object.aspects_enabled())
        .map(aspect_point)
        .collect();

    let mut aspects = AspectMap::new();
    for (i, first) in points.iter().enumerate() {
        for second in &points[i + 1..] {
            if let Some(aspect) = find_aspect(first, second, orbs) {
                aspects.entry(first.index).or_default().insert(second.index, aspect);
            }
            if let Some(aspect) = find_aspect(second, first, orbs) {
                aspects.entry(second.index).or_default().insert(first.index, aspect);
            }
        }
    }
    aspects
}

#[cfg(test)]
mod tests;

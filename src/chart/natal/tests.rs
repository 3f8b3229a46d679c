//! Unit tests for chart assembly.

use super::*;
use crate::chart::math::separation;
use chrono::NaiveDate;

fn melbourne() -> Subject {
    let local = NaiveDate::from_ymd_opt(1991, 12, 10)
        .unwrap()
        .and_hms_opt(4, 59, 0)
        .unwrap();
    Subject::new(local, -37.8136, 144.9631, chrono_tz::Australia::Melbourne).unwrap()
}

fn natal(house_system: HouseSystem) -> NatalChart {
    NatalChart::new(&melbourne(), house_system, &ChartSettings::default()).unwrap()
}

fn longitude(chart: &NatalChart, index: u32) -> f64 {
    chart.objects[&index].longitude.raw
}

// ============================================================================
// Natal Chart Tests
// ============================================================================

#[test]
fn test_melbourne_positions_match_reference() {
    let chart = natal(HouseSystem::Placidus);

    let reference = [
        (ids::SUN, 257.15),
        (ids::MOON, 296.33),
        (ids::MERCURY, 254.47),
        (ids::VENUS, 214.00),
        (ids::MARS, 247.63),
        (ids::JUPITER, 163.90),
        (ids::SATURN, 303.57),
        (ids::URANUS, 282.39),
        (ids::NEPTUNE, 285.41),
        (ids::PLUTO, 231.23),
        (ids::NORTH_NODE, 280.98),
        (ids::LILITH, 295.30),
        (ids::ASC, 241.67),
        (ids::MC, 130.23),
        (ids::VERTEX, 29.73),
        (ids::PART_OF_FORTUNE, 202.48),
    ];

    for (index, expected) in reference {
        let object = &chart.objects[&index];
        assert!(
            separation(object.longitude.raw, expected) < 1.0,
            "{} at {} expected near {}",
            object.name,
            object.longitude.raw,
            expected
        );
    }
}

#[test]
fn test_melbourne_signs() {
    let chart = natal(HouseSystem::WholeSign);

    assert_eq!(chart.object_named("Sun").unwrap().sign.name, "Sagittarius");
    assert_eq!(chart.object_named("Moon").unwrap().sign.name, "Capricorn");
    assert_eq!(chart.object_named("Asc").unwrap().sign.name, "Sagittarius");
    assert_eq!(chart.object_named("MC").unwrap().sign.name, "Leo");
    assert_eq!(chart.object_named("Vertex").unwrap().sign.name, "Aries");
    assert_eq!(chart.object_named("Part of Fortune").unwrap().sign.name, "Libra");
    assert_eq!(chart.object_named("North Node").unwrap().sign.name, "Capricorn");
}

#[test]
fn test_mercury_retrograde_node_retrograde() {
    let chart = natal(HouseSystem::WholeSign);

    let mercury = &chart.objects[&ids::MERCURY];
    assert!(mercury.longitude.retrograde);
    assert!(mercury.movement.as_ref().unwrap().retrograde);

    let node = &chart.objects[&ids::NORTH_NODE];
    assert!(node.longitude.retrograde);

    let sun = &chart.objects[&ids::SUN];
    assert!(!sun.longitude.retrograde);
}

#[test]
fn test_object_set() {
    let chart = natal(HouseSystem::WholeSign);

    // 12 cusps, 10 planets, Chiron, 5 points, 4 angles.
    assert_eq!(chart.objects.len(), 32);
    for number in 1..=12u8 {
        let cusp = &chart.objects[&ids::house(number)];
        assert_eq!(cusp.name, house_name(number));
        assert_eq!(cusp.house.number, number);
        assert!(cusp.speed.is_none());
    }
    assert_eq!(chart.objects[&ids::house(12)].name, "12th House");
}

#[test]
fn test_melbourne_chiron() {
    let chart = natal(HouseSystem::WholeSign);

    let chiron = chart.object_named("Chiron").unwrap();
    assert_eq!(chiron.index, ids::CHIRON);
    assert_eq!(chiron.kind.name, "Asteroid");
    assert_eq!(chiron.sign.name, "Leo");
    assert!(separation(chiron.longitude.raw, 129.33) < 0.5);
    assert!(chiron.longitude.retrograde);
    assert!(chiron.aspects_enabled());
}

#[test]
fn test_chiron_omitted_outside_covered_dates() {
    let local = NaiveDate::from_ymd_opt(1950, 6, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let subject = Subject::new(local, 51.5074, -0.1278, chrono_tz::Europe::London).unwrap();
    let chart = NatalChart::new(&subject, HouseSystem::WholeSign, &ChartSettings::default()).unwrap();

    assert_eq!(chart.objects.len(), 31);
    assert!(!chart.objects.contains_key(&ids::CHIRON));
    assert!(!chart.aspects.contains_key(&ids::CHIRON));
}

#[test]
fn test_mirror_points() {
    let chart = natal(HouseSystem::Placidus);

    let north = longitude(&chart, ids::NORTH_NODE);
    let south = longitude(&chart, ids::SOUTH_NODE);
    assert!((separation(north, south) - 180.0).abs() < 1e-9);

    let asc = longitude(&chart, ids::ASC);
    let desc = longitude(&chart, ids::DESC);
    assert!((separation(asc, desc) - 180.0).abs() < 1e-9);

    let mc = longitude(&chart, ids::MC);
    let ic = longitude(&chart, ids::IC);
    assert!((separation(mc, ic) - 180.0).abs() < 1e-9);
}

#[test]
fn test_night_chart_part_of_fortune() {
    let chart = natal(HouseSystem::WholeSign);

    assert!(!chart.diurnal);
    let fortune = &chart.objects[&ids::PART_OF_FORTUNE];
    let expected = normalize_degrees(
        longitude(&chart, ids::ASC) + longitude(&chart, ids::SUN) - longitude(&chart, ids::MOON),
    );
    assert!((fortune.longitude.raw - expected).abs() < 1e-9);
}

#[test]
fn test_melbourne_moon_phase() {
    // Moon about 39° ahead of the Sun.
    assert_eq!(natal(HouseSystem::WholeSign).moon_phase, MoonPhase::NewMoon);
}

// ============================================================================
// House System Tests
// ============================================================================

#[test]
fn test_whole_sign_houses() {
    let chart = natal(HouseSystem::WholeSign);

    assert_eq!(chart.house_system, HouseSystem::WholeSign);
    assert_eq!(chart.cusps()[0], 240.0);
    assert_eq!(chart.objects[&ids::SUN].house.number, 1);
    assert_eq!(chart.objects[&ids::MOON].house.number, 2);
    assert_eq!(chart.objects[&ids::MC].house.number, 9);
    assert_eq!(chart.objects[&ids::house(1)].sign_longitude.formatted, "0°00'");
}

#[test]
fn test_placidus_houses() {
    let chart = natal(HouseSystem::Placidus);

    assert_eq!(chart.house_system, HouseSystem::Placidus);
    let cusps = chart.cusps();
    assert!((cusps[0] - longitude(&chart, ids::ASC)).abs() < 1e-9);
    assert!((cusps[9] - longitude(&chart, ids::MC)).abs() < 1e-9);
    assert!(separation(cusps[10], 158.94) < 0.5);
    assert!(separation(cusps[11], 197.68) < 0.5);
    assert!(separation(cusps[1], 266.11) < 0.5);
    assert!(separation(cusps[2], 287.42) < 0.5);

    assert_eq!(chart.objects[&ids::SUN].house.number, 1);
    assert_eq!(chart.objects[&ids::MOON].house.number, 3);
    assert_eq!(chart.objects[&ids::ASC].house.number, 1);
}

// ============================================================================
// Aspect Tests
// ============================================================================

#[test]
fn test_natal_aspects_recorded_both_ways() {
    let chart = natal(HouseSystem::WholeSign);

    let sun_jupiter = &chart.aspects[&ids::SUN][&ids::JUPITER];
    assert_eq!(sun_jupiter.kind, crate::chart::AspectKind::Square);
    assert_eq!(sun_jupiter.active.name, "Sun");
    assert_eq!(sun_jupiter.passive.name, "Jupiter");

    let jupiter_sun = &chart.aspects[&ids::JUPITER][&ids::SUN];
    assert_eq!(jupiter_sun.kind, crate::chart::AspectKind::Square);
    assert_eq!(jupiter_sun.active.name, "Jupiter");
}

#[test]
fn test_natal_aspects_skip_cusps_and_mirrors() {
    let chart = natal(HouseSystem::Placidus);

    for (active, inner) in &chart.aspects {
        assert!(chart.objects[active].aspects_enabled());
        for passive in inner.keys() {
            assert!(chart.objects[passive].aspects_enabled());
            assert_ne!(active, passive);
        }
    }
    assert!(!chart.aspects.contains_key(&ids::SOUTH_NODE));
    assert!(!chart.aspects.contains_key(&ids::DESC));
}

#[test]
fn test_tighter_orbs_give_fewer_aspects() {
    let count = |chart: &NatalChart| chart.aspects.values().map(BTreeMap::len).sum::<usize>();

    let default = natal(HouseSystem::WholeSign);
    let tight = NatalChart::new(
        &melbourne(),
        HouseSystem::WholeSign,
        &ChartSettings {
            orbs: Orbs {
                conjunction: 1.0,
                sextile: 1.0,
                square: 1.0,
                trine: 1.0,
                opposition: 1.0,
            },
        },
    )
    .unwrap();

    assert!(count(&tight) < count(&default));
}

// ============================================================================
// Transit Tests
// ============================================================================

fn transit_subject() -> Subject {
    let local = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    Subject::new(local, -37.8136, 144.9631, chrono_tz::Australia::Melbourne).unwrap()
}

#[test]
fn test_transit_chart() {
    let natal = natal(HouseSystem::Placidus);
    let transits = TransitChart::new(
        &transit_subject(),
        HouseSystem::Placidus,
        &natal,
        &ChartSettings::default(),
    )
    .unwrap();

    assert_eq!(transits.house_system, HouseSystem::Placidus);
    assert_eq!(transits.aspects_to, natal.native);
    assert_eq!(transits.native.date_time, "2024-01-01 00:00:00");

    // Bodies, lunar points and Chiron only.
    assert_eq!(transits.objects.len(), 14);
    for object in transits.objects.values() {
        assert!((1..=12).contains(&object.house.number));
        assert_ne!(object.kind.name, "House");
        assert!(object.speed.is_some());
    }
}

#[test]
fn test_transit_aspects_reference_natal_objects() {
    let natal = natal(HouseSystem::WholeSign);
    let transits = TransitChart::new(
        &transit_subject(),
        HouseSystem::WholeSign,
        &natal,
        &ChartSettings::default(),
    )
    .unwrap();

    assert!(!transits.aspects.is_empty());
    for (transit_id, inner) in &transits.aspects {
        assert!(transits.objects.contains_key(transit_id));
        for (natal_id, aspect) in inner {
            let natal_object = &natal.objects[natal_id];
            assert!(natal_object.aspects_enabled());
            assert_eq!(aspect.active.index, *transit_id);
            assert_eq!(aspect.passive.name, natal_object.name);
            assert_eq!(aspect.passive.longitude, natal_object.longitude.raw);
        }
    }
}

#[test]
fn test_transits_on_birth_date() {
    let natal = natal(HouseSystem::WholeSign);
    let local = NaiveDate::from_ymd_opt(1991, 12, 10)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let subject = Subject::new(local, -37.8136, 144.9631, chrono_tz::Australia::Melbourne).unwrap();
    let transits =
        TransitChart::new(&subject, HouseSystem::WholeSign, &natal, &ChartSettings::default()).unwrap();

    assert_eq!(transits.native.date_time, "1991-12-10 00:00:00");
    assert_eq!(transits.objects.len(), 14);

    // Five hours before birth the slow bodies sit on their natal places.
    let natal_pluto = natal.objects[&ids::PLUTO].longitude.raw;
    assert!(separation(transits.objects[&ids::PLUTO].longitude.raw, natal_pluto) < 0.01);
    let pluto = &transits.aspects[&ids::PLUTO][&ids::PLUTO];
    assert_eq!(pluto.kind, crate::chart::AspectKind::Conjunction);
    assert_eq!(pluto.passive.longitude, natal_pluto);
}

// ============================================================================
// Helper Tests
// ============================================================================

#[test]
fn test_moon_phase_sectors() {
    assert_eq!(MoonPhase::from_longitudes(0.0, 0.0), MoonPhase::NewMoon);
    assert_eq!(MoonPhase::from_longitudes(0.0, 60.0), MoonPhase::WaxingCrescent);
    assert_eq!(MoonPhase::from_longitudes(0.0, 180.0), MoonPhase::FullMoon);
    assert_eq!(MoonPhase::from_longitudes(100.0, 90.0), MoonPhase::Balsamic);
    assert_eq!(
        serde_json::to_value(MoonPhase::ThirdQuarter).unwrap(),
        "Third Quarter"
    );
}

#[test]
fn test_diurnal_and_fortune_formulas() {
    // Sun in the 10th house region: above the horizon.
    assert!(is_diurnal(150.0, 240.0));
    assert!(!is_diurnal(250.0, 240.0));

    assert!((part_of_fortune(0.0, 10.0, 50.0, true) - 40.0).abs() < 1e-9);
    assert!((part_of_fortune(0.0, 10.0, 50.0, false) - 320.0).abs() < 1e-9);
}

#[test]
fn test_chart_serialization_shape() {
    let chart = natal(HouseSystem::WholeSign);
    let json = serde_json::to_value(&chart).unwrap();

    assert_eq!(json["house_system"], "whole_sign");
    assert_eq!(json["diurnal"], false);
    assert!(json.get("cusps").is_none());
    let sun = &json["objects"][ids::SUN.to_string()];
    assert_eq!(sun["name"], "Sun");
    assert_eq!(sun["sign"]["name"], "Sagittarius");
    assert_eq!(sun["type"]["name"], "Planet");
    assert_eq!(json["native"]["timezone"], "Australia/Melbourne");
}

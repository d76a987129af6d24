//! Raw longitudes to a finished [`Chart`].
//!
//! Pure transformation: no I/O, no clock reads, no randomness. Identical
//! inputs produce bit-identical charts, whichever ephemeris backend supplied
//! the raw numbers.

use crate::ephemeris::{RawBody, RawHouses};
use crate::models::{
    Aspect, AspectKind, Chart, GeoCoordinates, HouseCusp, PlanetPosition, Sign, SignPosition,
};
use chrono::{DateTime, Utc};

/// Assemble a chart from raw ephemeris output.
///
/// When `has_birth_time` is false the raw house data is ignored even if
/// present: a guessed time corrupts the angular data, so houses, ascendant,
/// and midheaven are omitted outright.
pub fn assemble(
    raw_bodies: &[RawBody],
    raw_houses: Option<&RawHouses>,
    julian_day: f64,
    coordinates: GeoCoordinates,
    has_birth_time: bool,
    degraded: bool,
    computed_at: DateTime<Utc>,
) -> Chart {
    let planets = raw_bodies
        .iter()
        .map(|raw| PlanetPosition {
            body: raw.body,
            sign: Sign::from_longitude(raw.longitude),
            degree_in_sign: raw.longitude.rem_euclid(360.0) % 30.0,
            retrograde: raw.speed < 0.0,
        })
        .collect();

    let (houses, ascendant, midheaven) = match raw_houses {
        Some(raw) if has_birth_time => {
            let cusps = raw
                .cusps
                .iter()
                .enumerate()
                .map(|(i, &lon)| HouseCusp {
                    number: i as u8 + 1,
                    sign: Sign::from_longitude(lon),
                    degree: lon.rem_euclid(360.0) % 30.0,
                })
                .collect();
            (
                Some(cusps),
                Some(sign_position(raw.ascendant)),
                Some(sign_position(raw.midheaven)),
            )
        }
        _ => (None, None, None),
    };

    Chart {
        julian_day,
        coordinates,
        planets,
        houses,
        ascendant,
        midheaven,
        aspects: find_aspects(raw_bodies),
        has_birth_time,
        degraded,
        computed_at,
    }
}

fn sign_position(longitude: f64) -> SignPosition {
    SignPosition {
        sign: Sign::from_longitude(longitude),
        degree: longitude.rem_euclid(360.0) % 30.0,
    }
}

/// Aspects over every unordered pair of bodies.
///
/// The separation is reduced into `[0, 180]`, then tested against each kind
/// in [`AspectKind::ALL`] order; the first kind whose orb budget covers the
/// separation wins and the pair contributes exactly one aspect. Pairs
/// outside every budget contribute none.
fn find_aspects(bodies: &[RawBody]) -> Vec<Aspect> {
    let mut aspects = Vec::new();

    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            let diff = (a.longitude - b.longitude).rem_euclid(360.0);
            let separation = if diff > 180.0 { 360.0 - diff } else { diff };

            for kind in AspectKind::ALL {
                let orb = (separation - kind.angle()).abs();
                if orb <= kind.orb_limit() {
                    aspects.push(Aspect {
                        body_a: a.body,
                        body_b: b.body,
                        kind,
                        orb,
                    });
                    break;
                }
            }
        }
    }

    aspects
}

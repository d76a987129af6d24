//! Deterministic chart synthesis for when the real ephemeris is unreachable.
//!
//! The positions are not astronomically meaningful, but they are stable: the
//! same birth input always seeds the same generator and therefore the same
//! longitudes, so a user who hits an outage twice sees the same chart twice.

use crate::error::Result;
use crate::models::{Body, BirthQuery, GeoCoordinates};
use crate::time;
use chrono::{Datelike, Timelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{EphemerisSource, RawBody, RawHouses};

/// Ephemeris backend seeded from the birth input.
pub struct FallbackEphemeris {
    seed: u64,
}

impl FallbackEphemeris {
    pub fn new(query: &BirthQuery) -> Self {
        Self {
            seed: seed_for(query),
        }
    }
}

/// Reduce a birth query to a single seed.
///
/// `YYYYMMDD * 10_000 + minutes-into-day` (noon placeholder when the time is
/// unknown), then folded with the place's UTF-8 bytes. Stable across runs
/// and processes; changing any component of the birth input changes the
/// seed.
fn seed_for(query: &BirthQuery) -> u64 {
    let ymd = query.date.year() as i64 * 10_000
        + query.date.month() as i64 * 100
        + query.date.day() as i64;

    let t = query.time.unwrap_or_else(time::noon);
    let minutes = (t.hour() * 60 + t.minute()) as u64;

    let mut seed = (ymd as u64).wrapping_mul(10_000).wrapping_add(minutes);
    for byte in query.place.trim().as_bytes() {
        seed = seed.wrapping_mul(31).wrapping_add(u64::from(*byte));
    }
    seed
}

impl EphemerisSource for FallbackEphemeris {
    fn bodies(&self, _julian_day: f64) -> Result<Vec<RawBody>> {
        let mut rng = StdRng::seed_from_u64(self.seed);

        Ok(Body::ALL
            .iter()
            .map(|&body| {
                let longitude = rng.gen_range(0.0..360.0);
                let magnitude = rng.gen_range(0.05..1.2);
                let retrograde = body.can_retrograde() && rng.gen_bool(0.25);
                RawBody {
                    body,
                    longitude,
                    speed: if retrograde { -magnitude } else { magnitude },
                }
            })
            .collect())
    }

    fn houses(&self, _julian_day: f64, _coords: &GeoCoordinates) -> Result<RawHouses> {
        // Separate stream so house longitudes don't depend on how many
        // draws the body pass consumed.
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(1));

        let mut cusps = [0.0; 12];
        for cusp in &mut cusps {
            *cusp = rng.gen_range(0.0..360.0);
        }

        Ok(RawHouses {
            cusps,
            ascendant: rng.gen_range(0.0..360.0),
            midheaven: rng.gen_range(0.0..360.0),
        })
    }
}

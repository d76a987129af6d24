//! Shared test fixtures for the Falak SDK integration tests.
//!
//! Provides `ScriptedEphemeris`, an ephemeris backend that returns fixed
//! longitudes (or a scripted outage) and counts how often the expensive
//! body computation runs, plus helpers for building an SDK against a
//! temporary cache directory.

#![allow(dead_code)]

use falak_sdk::ephemeris::{EphemerisSource, RawBody, RawHouses};
use falak_sdk::models::{BirthQuery, Body, GeoCoordinates};
use falak_sdk::{FalakError, FalakSdk, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Fixed body longitudes, loosely modeled on late September 1992: the Sun
/// just into Libra, Saturn retrograde in Aquarius, the Uranus/Neptune
/// conjunction in Capricorn.
pub fn fixed_bodies() -> Vec<RawBody> {
    let positions: [(Body, f64, f64); 10] = [
        (Body::Sun, 181.93, 0.98),
        (Body::Moon, 95.0, 13.2),
        (Body::Mercury, 210.0, 1.1),
        (Body::Venus, 155.0, 1.2),
        (Body::Mars, 85.0, 0.5),
        (Body::Jupiter, 175.0, 0.08),
        (Body::Saturn, 315.5, -0.05),
        (Body::Uranus, 285.0, 0.04),
        (Body::Neptune, 286.5, 0.03),
        (Body::Pluto, 231.0, 0.02),
    ];

    positions
        .iter()
        .map(|&(body, longitude, speed)| RawBody {
            body,
            longitude,
            speed,
        })
        .collect()
}

/// Fixed Placidus-shaped cusps: one per sign starting at Aries 15°.
pub fn fixed_houses() -> RawHouses {
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = 15.0 + 30.0 * i as f64;
    }
    RawHouses {
        cusps,
        ascendant: 15.0,
        midheaven: 285.0,
    }
}

/// Ephemeris backend returning [`fixed_bodies`]/[`fixed_houses`], counting
/// each body computation. With `fail: true` every call reports an outage.
pub struct ScriptedEphemeris {
    pub calls: Arc<AtomicUsize>,
    pub fail: bool,
}

impl EphemerisSource for ScriptedEphemeris {
    fn bodies(&self, _julian_day: f64) -> Result<Vec<RawBody>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(FalakError::EphemerisUnavailable(
                "scripted outage".to_string(),
            ));
        }
        Ok(fixed_bodies())
    }

    fn houses(&self, _julian_day: f64, _coords: &GeoCoordinates) -> Result<RawHouses> {
        if self.fail {
            return Err(FalakError::EphemerisUnavailable(
                "scripted outage".to_string(),
            ));
        }
        Ok(fixed_houses())
    }
}

/// Build an SDK against a temporary cache directory, wired to a
/// [`ScriptedEphemeris`]. Returns the SDK, the body-computation call
/// counter, and the temp dir (keep it alive for the test's duration).
pub fn scripted_sdk(fail: bool) -> (FalakSdk, Arc<AtomicUsize>, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let sdk = FalakSdk::builder()
        .cache_dir(tmp.path())
        .ephemeris(ScriptedEphemeris {
            calls: calls.clone(),
            fail,
        })
        .build()
        .unwrap();
    (sdk, calls, tmp)
}

/// The canonical test birth query: 1992-09-24 09:10 in Cairo.
pub fn sample_query() -> BirthQuery {
    BirthQuery::parse("1992-09-24", Some("09:10"), "Cairo").unwrap()
}

//! Pluggable ephemeris backends.
//!
//! The pipeline only ever sees the [`EphemerisSource`] trait: raw ecliptic
//! longitudes in, nothing else. [`RemoteEphemeris`] backs it with the hosted
//! astronomy service; [`FallbackEphemeris`] synthesizes deterministic
//! positions from the birth input when the service is unreachable. Chart
//! assembly downstream is identical for both, so every chart invariant holds
//! regardless of which backend produced the numbers.

pub mod fallback;
pub mod remote;

pub use fallback::FallbackEphemeris;
pub use remote::RemoteEphemeris;

use crate::error::Result;
use crate::models::{Body, GeoCoordinates};
use serde::{Deserialize, Serialize};

/// One body's raw ecliptic position.
///
/// `longitude` is in degrees `[0, 360)`; `speed` is degrees per day along
/// the ecliptic, negative while the body is retrograde.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawBody {
    pub body: Body,
    pub longitude: f64,
    pub speed: f64,
}

/// Raw house-system output: twelve cusp longitudes plus the ascendant and
/// midheaven, all in degrees `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawHouses {
    pub cusps: [f64; 12],
    pub ascendant: f64,
    pub midheaven: f64,
}

/// A source of raw ephemeris data.
///
/// Implementations must return all ten bodies of [`Body::ALL`], in that
/// order, or fail with [`FalakError::EphemerisUnavailable`]. Never partial
/// data.
///
/// [`FalakError::EphemerisUnavailable`]: crate::FalakError::EphemerisUnavailable
pub trait EphemerisSource: Send + Sync {
    /// Ecliptic longitude and angular speed for each of the ten bodies.
    fn bodies(&self, julian_day: f64) -> Result<Vec<RawBody>>;

    /// Placidus house cusps, ascendant, and midheaven for a time and place.
    fn houses(&self, julian_day: f64, coords: &GeoCoordinates) -> Result<RawHouses>;
}

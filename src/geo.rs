//! Birthplace resolution against the built-in geocoding table.
//!
//! Resolution is total: unmatched input falls through to the default
//! coordinates instead of failing, so the pipeline always has a location to
//! chart against. The precision of every downstream chart is bounded by the
//! coarseness of this table.

use crate::config;
use crate::models::GeoCoordinates;
use tracing::debug;

/// Resolve a free-text birthplace to coordinates.
///
/// Tries a substring match of the place against each known city, in table
/// order, accepting either the Latin or the Arabic spelling; the first match
/// wins. Anything unmatched resolves to [`config::default_coordinates`].
pub fn resolve(place: &str) -> GeoCoordinates {
    let needle = place.trim().to_lowercase();

    for (latin, arabic, latitude, longitude) in config::GEOCODE_TABLE {
        if needle.contains(latin) || place.contains(arabic) {
            return GeoCoordinates {
                latitude: *latitude,
                longitude: *longitude,
            };
        }
    }

    debug!(place, "no geocode match, using default coordinates");
    config::default_coordinates()
}

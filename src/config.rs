use crate::models::GeoCoordinates;
use std::path::PathBuf;
use std::time::Duration;

/// Base URL of the remote ephemeris service.
pub const EPHEMERIS_BASE: &str =
    "https://astrohabibiapi-564958434402.me-central1.run.app";

/// Default timeout for ephemeris service calls. The payloads are small JSON
/// documents, so anything slower than this is treated as an outage.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// House system code sent to the ephemeris service (Placidus). The service
/// accepts the usual single-letter codes; this is the only one we request.
pub const HOUSE_SYSTEM: &str = "P";

/// Built-in geocoding table: `(latin name, arabic name, latitude, longitude)`.
///
/// Substring matching against this table bounds the precision of every chart:
/// a birthplace is resolved to the nearest listed city, or to
/// [`default_coordinates`] when nothing matches.
pub(crate) const GEOCODE_TABLE: &[(&str, &str, f64, f64)] = &[
    ("cairo", "القاهرة", 30.0444, 31.2357),
    ("beirut", "بيروت", 33.8886, 35.4955),
    ("dubai", "دبي", 25.2048, 55.2708),
    ("riyadh", "الرياض", 24.7136, 46.6753),
    ("amman", "عمان", 31.9454, 35.9284),
    ("baghdad", "بغداد", 33.3152, 44.3661),
    ("damascus", "دمشق", 33.5138, 36.2765),
    ("algiers", "الجزائر", 36.7372, 3.0864),
    ("tripoli", "طرابلس", 32.8872, 13.1913),
    ("khartoum", "الخرطوم", 15.5007, 32.5599),
];

/// Coordinates used when a birthplace matches nothing in the table (Cairo).
pub fn default_coordinates() -> GeoCoordinates {
    GeoCoordinates {
        latitude: 30.0444,
        longitude: 31.2357,
    }
}

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("falak-sdk")
    } else {
        PathBuf::from(".falak-sdk-cache")
    }
}

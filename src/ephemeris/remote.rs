//! HTTP client for the hosted ephemeris service.
//!
//! Connection errors, timeouts, non-2xx statuses, and malformed or
//! out-of-range payloads all collapse into
//! [`FalakError::EphemerisUnavailable`] so the pipeline has exactly one
//! recovery path. Each request is retried once before giving up.

use crate::config;
use crate::error::{FalakError, Result};
use crate::models::{Body, GeoCoordinates};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use super::{EphemerisSource, RawBody, RawHouses};

/// Ephemeris backend speaking JSON to the remote astronomy service.
pub struct RemoteEphemeris {
    base_url: String,
    client: Client,
}

impl RemoteEphemeris {
    /// Create a client against `base_url` with the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// POST a JSON request, retrying once on any transport or decode error.
    fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let url = format!("{}/{}", self.base_url, path);

        let mut last_err = String::new();
        for attempt in 0..2 {
            match self.try_post(&url, body) {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    if attempt == 0 {
                        debug!(url = %url, error = %e, "ephemeris request failed, retrying");
                    }
                    last_err = e.to_string();
                }
            }
        }

        Err(FalakError::EphemerisUnavailable(format!(
            "{url}: {last_err}"
        )))
    }

    fn try_post<B: Serialize, R: DeserializeOwned>(&self, url: &str, body: &B) -> Result<R> {
        let resp = self.client.post(url).json(body).send()?.error_for_status()?;
        Ok(resp.json()?)
    }
}

impl EphemerisSource for RemoteEphemeris {
    fn bodies(&self, julian_day: f64) -> Result<Vec<RawBody>> {
        let resp: PositionsResponse = self.post("positions", &PositionsRequest { julian_day })?;

        // Re-key by body so a response in any order still comes out in
        // Body::ALL order, and missing or duplicated bodies are caught.
        let mut by_body: HashMap<Body, RawBody> = HashMap::new();
        for raw in resp.bodies {
            if !raw.longitude.is_finite() || !(0.0..360.0).contains(&raw.longitude) {
                return Err(malformed(format!(
                    "longitude {} out of range for {}",
                    raw.longitude, raw.body
                )));
            }
            if !raw.speed.is_finite() {
                return Err(malformed(format!("non-finite speed for {}", raw.body)));
            }
            if by_body.insert(raw.body, raw).is_some() {
                return Err(malformed(format!("duplicate entry for {}", raw.body)));
            }
        }

        Body::ALL
            .iter()
            .map(|b| {
                by_body
                    .remove(b)
                    .ok_or_else(|| malformed(format!("missing entry for {b}")))
            })
            .collect()
    }

    fn houses(&self, julian_day: f64, coords: &GeoCoordinates) -> Result<RawHouses> {
        let resp: HousesResponse = self.post(
            "houses",
            &HousesRequest {
                julian_day,
                latitude: coords.latitude,
                longitude: coords.longitude,
                house_system: config::HOUSE_SYSTEM,
            },
        )?;

        let cusps: [f64; 12] = resp
            .cusps
            .try_into()
            .map_err(|v: Vec<f64>| malformed(format!("expected 12 cusps, got {}", v.len())))?;

        for lon in cusps.iter().chain([&resp.ascendant, &resp.midheaven]) {
            if !lon.is_finite() || !(0.0..360.0).contains(lon) {
                return Err(malformed(format!("house longitude {lon} out of range")));
            }
        }

        Ok(RawHouses {
            cusps,
            ascendant: resp.ascendant,
            midheaven: resp.midheaven,
        })
    }
}

fn malformed(detail: String) -> FalakError {
    FalakError::EphemerisUnavailable(format!("malformed response: {detail}"))
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct PositionsRequest {
    julian_day: f64,
}

#[derive(Deserialize)]
struct PositionsResponse {
    bodies: Vec<RawBody>,
}

#[derive(Serialize)]
struct HousesRequest {
    julian_day: f64,
    latitude: f64,
    longitude: f64,
    house_system: &'static str,
}

#[derive(Deserialize)]
struct HousesResponse {
    cusps: Vec<f64>,
    ascendant: f64,
    midheaven: f64,
}

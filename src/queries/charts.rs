//! Chart retrieval and computation.
//!
//! Cache-first: a stored chart whose birth data matches the request is
//! returned untouched, with no network traffic. Only a cache miss or a
//! birth-data change runs the pipeline, and only one computation per user
//! can be in flight at a time.

use crate::chart;
use crate::ephemeris::{EphemerisSource, FallbackEphemeris};
use crate::error::{FalakError, Result};
use crate::geo;
use crate::models::{BirthQuery, Chart, GeoCoordinates};
use crate::pipeline::{CancelToken, Pipeline};
use crate::store::ChartRecord;
use crate::time;
use chrono::{DateTime, Utc};
use std::sync::PoisonError;
use tracing::{debug, warn};

/// Query interface for natal charts.
pub struct ChartQuery<'a> {
    pipeline: &'a Pipeline,
}

impl<'a> ChartQuery<'a> {
    pub fn new(pipeline: &'a Pipeline) -> Self {
        Self { pipeline }
    }

    /// Return the user's chart, computing and caching it if necessary.
    ///
    /// Total apart from store failures: a geocoding miss falls back to the
    /// default coordinates and an ephemeris outage falls back to the
    /// deterministic synthesizer (marked by `Chart::degraded`), so a usable
    /// chart always comes back.
    pub fn get_or_compute(&self, user_id: &str, query: &BirthQuery) -> Result<Chart> {
        self.get_or_compute_with_cancel(user_id, query, &CancelToken::default())
    }

    /// [`get_or_compute`](Self::get_or_compute) with cooperative
    /// cancellation: once `cancel` fires, the request finishes with
    /// [`FalakError::Cancelled`] and nothing is written to the store.
    pub fn get_or_compute_with_cancel(
        &self,
        user_id: &str,
        query: &BirthQuery,
        cancel: &CancelToken,
    ) -> Result<Chart> {
        let lock = self.pipeline.user_lock(user_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(record) = self.pipeline.chart_store.load(user_id)? {
            if record.query == *query {
                debug!(user_id, "chart cache hit");
                return Ok(record.chart);
            }
            debug!(user_id, "birth data changed, recomputing chart");
        }

        if cancel.is_cancelled() {
            return Err(FalakError::Cancelled);
        }

        let computed = self.compute(query)?;

        if cancel.is_cancelled() {
            return Err(FalakError::Cancelled);
        }

        self.pipeline.chart_store.save(&ChartRecord {
            user_id: user_id.to_string(),
            query: query.clone(),
            chart: computed.clone(),
        })?;

        Ok(computed)
    }

    /// Run the full pipeline: geocode, Julian Day, ephemeris, assembly.
    fn compute(&self, query: &BirthQuery) -> Result<Chart> {
        let coords = geo::resolve(&query.place);
        let julian_day = time::julian_day(query.date, query.time, coords.longitude);
        let has_time = query.has_time();
        let computed_at = Utc::now();

        if !self.pipeline.offline {
            match assemble_from(
                self.pipeline.ephemeris.as_ref(),
                julian_day,
                coords,
                has_time,
                false,
                computed_at,
            ) {
                Ok(chart) => return Ok(chart),
                Err(FalakError::EphemerisUnavailable(reason)) => {
                    warn!(%reason, "ephemeris unavailable, synthesizing fallback chart");
                }
                Err(other) => return Err(other),
            }
        }

        let fallback = FallbackEphemeris::new(query);
        assemble_from(&fallback, julian_day, coords, has_time, true, computed_at)
    }
}

fn assemble_from(
    source: &dyn EphemerisSource,
    julian_day: f64,
    coords: GeoCoordinates,
    has_time: bool,
    degraded: bool,
    computed_at: DateTime<Utc>,
) -> Result<Chart> {
    let bodies = source.bodies(julian_day)?;
    let houses = if has_time {
        Some(source.houses(julian_day, &coords)?)
    } else {
        None
    };

    Ok(chart::assemble(
        &bodies,
        houses.as_ref(),
        julian_day,
        coords,
        has_time,
        degraded,
        computed_at,
    ))
}

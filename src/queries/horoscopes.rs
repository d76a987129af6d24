//! Horoscope composition against the `(user, category)` store.

use crate::error::Result;
use crate::horoscope::{self, ComposeContext};
use crate::models::{Category, Chart, HoroscopeResult};
use crate::pipeline::Pipeline;
use chrono::Utc;
use tracing::debug;

/// Query interface for horoscopes.
pub struct HoroscopeQuery<'a> {
    pipeline: &'a Pipeline,
}

impl<'a> HoroscopeQuery<'a> {
    pub fn new(pipeline: &'a Pipeline) -> Self {
        Self { pipeline }
    }

    /// Compose a horoscope, or return the stored one while it is valid.
    ///
    /// A stored result whose `valid_until` has not passed comes back
    /// unchanged, lucky attributes included. Only an expired (or
    /// missing) result triggers fresh composition, which is then stored.
    pub fn compose(
        &self,
        user_id: &str,
        chart: &Chart,
        category: Category,
        ctx: &ComposeContext,
    ) -> Result<HoroscopeResult> {
        let now = Utc::now();

        if let Some(stored) = self.pipeline.horoscope_store.load(user_id, category)? {
            if stored.is_valid_at(now) {
                debug!(user_id, %category, "horoscope cache hit");
                return Ok(stored);
            }
        }

        let result = horoscope::compose_fresh(chart, category, ctx, now);
        self.pipeline
            .horoscope_store
            .save(user_id, category, &result)?;

        Ok(result)
    }

    /// A full plain-text reading of the chart. Not cached: it is a pure
    /// function of the chart and cheap to regenerate.
    pub fn birth_chart_analysis(&self, chart: &Chart) -> String {
        horoscope::birth_chart_analysis(chart)
    }
}

//! Falak SDK for Rust.
//!
//! Computes natal charts from a birth date, optional birth time, and a
//! birthplace name, then derives category-specific horoscopes with
//! deterministic lucky attributes. Chart positions come from a remote
//! ephemeris service; when it is unreachable, a deterministic seeded
//! synthesizer stands in so the pipeline always returns a usable (if
//! `degraded`) chart. Charts and horoscopes are cached as JSON records
//! under a local cache directory.
//!
//! # Quick start
//!
//! ```no_run
//! use falak_sdk::{BirthQuery, Category, ComposeContext, FalakSdk};
//!
//! let sdk = FalakSdk::builder().build().unwrap();
//!
//! let query = BirthQuery::parse("1992-09-24", Some("09:10"), "Cairo").unwrap();
//! let chart = sdk.charts().get_or_compute("user-1", &query).unwrap();
//!
//! let horoscope = sdk
//!     .horoscopes()
//!     .compose("user-1", &chart, Category::Daily, &ComposeContext::default())
//!     .unwrap();
//! println!("{}: {}", horoscope.title, horoscope.content);
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod chart;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod geo;
pub mod horoscope;
pub mod models;
pub mod pipeline;
pub mod queries;
pub mod store;
pub mod time;

#[cfg(feature = "async")]
pub use async_client::AsyncFalakSdk;
pub use error::{FalakError, Result};
pub use horoscope::{ComposeContext, Tone, ValidityPolicy};
pub use models::{
    Aspect, AspectKind, BirthQuery, Body, Category, Chart, GeoCoordinates, HoroscopeResult,
    HouseCusp, PlanetPosition, Sign, SignPosition,
};
pub use pipeline::CancelToken;

use crate::ephemeris::{EphemerisSource, RemoteEphemeris};
use crate::pipeline::Pipeline;
use crate::store::{ChartStore, HoroscopeStore};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// FalakSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`FalakSdk`] instance.
///
/// Use [`FalakSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](FalakSdkBuilder::build) to create the SDK.
pub struct FalakSdkBuilder {
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    base_url: String,
    ephemeris: Option<Box<dyn EphemerisSource>>,
}

impl Default for FalakSdkBuilder {
    fn default() -> Self {
        Self {
            cache_dir: None,
            offline: false,
            timeout: config::DEFAULT_TIMEOUT,
            base_url: config::EPHEMERIS_BASE.to_string(),
            ephemeris: None,
        }
    }
}

impl FalakSdkBuilder {
    /// Set a custom cache directory.
    ///
    /// If not set, the platform-appropriate default cache directory is used
    /// (e.g. `~/.cache/falak-sdk` on Linux, `~/Library/Caches/falak-sdk`
    /// on macOS, `%LOCALAPPDATA%\falak-sdk` on Windows).
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, the SDK never calls the remote ephemeris service; any
    /// chart that is not already cached is synthesized by the deterministic
    /// fallback and marked degraded. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for ephemeris service calls.
    ///
    /// A timed-out call is treated the same as a service outage. Defaults
    /// to 10 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Point the SDK at a different ephemeris service base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the ephemeris backend entirely.
    ///
    /// Useful for tests and for alternative computation backends; the
    /// default is the remote service at the configured base URL.
    pub fn ephemeris<E: EphemerisSource + 'static>(mut self, source: E) -> Self {
        self.ephemeris = Some(Box::new(source));
        self
    }

    /// Build the SDK, creating the cache directory and the stores.
    ///
    /// No network traffic happens here; the ephemeris service is only
    /// contacted when a chart actually needs computing.
    pub fn build(self) -> Result<FalakSdk> {
        let cache_dir = self.cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&cache_dir)?;

        let ephemeris = match self.ephemeris {
            Some(source) => source,
            None => Box::new(RemoteEphemeris::new(&self.base_url, self.timeout)?),
        };

        let chart_store = ChartStore::new(&cache_dir)?;
        let horoscope_store = HoroscopeStore::new(&cache_dir)?;

        Ok(FalakSdk {
            pipeline: Pipeline::new(ephemeris, chart_store, horoscope_store, self.offline, cache_dir),
        })
    }
}

// ---------------------------------------------------------------------------
// FalakSdk
// ---------------------------------------------------------------------------

/// The main entry point for the Falak SDK.
///
/// Owns the ephemeris backend, both stores, and the per-user serialization
/// locks, and exposes the domain interfaces as lightweight borrowing
/// wrappers.
///
/// Created via [`FalakSdk::builder()`].
pub struct FalakSdk {
    pipeline: Pipeline,
}

impl FalakSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> FalakSdkBuilder {
        FalakSdkBuilder::default()
    }

    /// Access the chart interface.
    pub fn charts(&self) -> queries::charts::ChartQuery<'_> {
        queries::charts::ChartQuery::new(&self.pipeline)
    }

    /// Access the horoscope interface.
    pub fn horoscopes(&self) -> queries::horoscopes::HoroscopeQuery<'_> {
        queries::horoscopes::HoroscopeQuery::new(&self.pipeline)
    }

    /// Return a reference to the underlying [`Pipeline`] for advanced usage.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}

impl fmt::Display for FalakSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FalakSdk(cache_dir={}, offline={})",
            self.pipeline.cache_dir.display(),
            self.pipeline.offline
        )
    }
}

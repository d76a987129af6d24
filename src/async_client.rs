//! Async wrapper around [`FalakSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free. The
//! chart entry point threads a [`CancelToken`] through, so dropping the
//! future abandons the computation without writing to the stores.
//!
//! # Example
//!
//! ```no_run
//! use falak_sdk::{AsyncFalakSdk, BirthQuery};
//!
//! async fn example() -> falak_sdk::Result<()> {
//!     let sdk = AsyncFalakSdk::builder().build().await?;
//!
//!     let query = BirthQuery::parse("1992-09-24", Some("09:10"), "Cairo")?;
//!     let chart = sdk.get_or_compute("user-1", &query).await?;
//!     println!("sun sign: {}", chart.planets[0].sign);
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{FalakError, Result};
use crate::horoscope::ComposeContext;
use crate::models::{BirthQuery, Category, Chart, HoroscopeResult};
use crate::pipeline::CancelToken;
use crate::FalakSdk;

// ---------------------------------------------------------------------------
// AsyncFalakSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncFalakSdk`] instance.
pub struct AsyncFalakSdkBuilder {
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    base_url: Option<String>,
}

impl Default for AsyncFalakSdkBuilder {
    fn default() -> Self {
        Self {
            cache_dir: None,
            offline: false,
            timeout: crate::config::DEFAULT_TIMEOUT,
            base_url: None,
        }
    }
}

impl AsyncFalakSdkBuilder {
    /// Set a custom cache directory.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for ephemeris service calls.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Point the SDK at a different ephemeris service base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Build the async SDK.
    ///
    /// Initialization runs on the blocking thread pool so it won't block
    /// the async event loop.
    pub async fn build(self) -> Result<AsyncFalakSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = FalakSdk::builder();
            if let Some(dir) = self.cache_dir {
                builder = builder.cache_dir(dir);
            }
            if let Some(url) = self.base_url {
                builder = builder.base_url(url);
            }
            builder = builder.offline(self.offline).timeout(self.timeout);
            let sdk = builder.build()?;
            Ok(AsyncFalakSdk {
                inner: Arc::new(sdk),
            })
        })
        .await
        .map_err(|e| FalakError::Task(e.to_string()))?
    }
}

// ---------------------------------------------------------------------------
// AsyncFalakSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`FalakSdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying SDK is `Sync`, so it is
/// shared behind a plain [`Arc`].
pub struct AsyncFalakSdk {
    inner: Arc<FalakSdk>,
}

impl AsyncFalakSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncFalakSdkBuilder {
        AsyncFalakSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives a `&FalakSdk` reference and should return a
    /// `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&FalakSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&sdk))
            .await
            .map_err(|e| FalakError::Task(e.to_string()))?
    }

    /// Async chart retrieval with drop-cancellation.
    ///
    /// If this future is dropped while the computation is in flight, the
    /// computation is abandoned and the chart store is left untouched.
    pub async fn get_or_compute(&self, user_id: &str, query: &BirthQuery) -> Result<Chart> {
        let cancel = CancelToken::new();
        let guard = CancelOnDrop::new(cancel.clone());

        let user_id = user_id.to_string();
        let query = query.clone();
        let token = cancel.clone();
        let result = self
            .run(move |sdk| {
                sdk.charts()
                    .get_or_compute_with_cancel(&user_id, &query, &token)
            })
            .await;

        guard.disarm();
        result
    }

    /// Async horoscope composition.
    pub async fn compose(
        &self,
        user_id: &str,
        chart: &Chart,
        category: Category,
        ctx: &ComposeContext,
    ) -> Result<HoroscopeResult> {
        let user_id = user_id.to_string();
        let chart = chart.clone();
        let ctx = *ctx;
        self.run(move |sdk| sdk.horoscopes().compose(&user_id, &chart, category, &ctx))
            .await
    }
}

/// Fires the token if dropped before [`disarm`](Self::disarm) is called.
struct CancelOnDrop {
    token: CancelToken,
    armed: bool,
}

impl CancelOnDrop {
    fn new(token: CancelToken) -> Self {
        Self { token, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        if self.armed {
            self.token.cancel();
        }
    }
}

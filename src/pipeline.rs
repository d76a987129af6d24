//! Shared state behind the SDK: the ephemeris backend, both stores, and the
//! per-user lock arena.

use crate::ephemeris::EphemerisSource;
use crate::store::{ChartStore, HoroscopeStore};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Owns everything the query interfaces borrow.
pub struct Pipeline {
    pub(crate) ephemeris: Box<dyn EphemerisSource>,
    pub(crate) chart_store: ChartStore,
    pub(crate) horoscope_store: HoroscopeStore,
    pub(crate) offline: bool,
    pub(crate) cache_dir: PathBuf,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Pipeline {
    pub(crate) fn new(
        ephemeris: Box<dyn EphemerisSource>,
        chart_store: ChartStore,
        horoscope_store: HoroscopeStore,
        offline: bool,
        cache_dir: PathBuf,
    ) -> Self {
        Self {
            ephemeris,
            chart_store,
            horoscope_store,
            offline,
            cache_dir,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// The serialization lock for one user. Computations for the same user
    /// take this lock for their whole duration; unrelated users get
    /// unrelated locks and never block each other.
    pub(crate) fn user_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        locks.entry(user_id.to_string()).or_default().clone()
    }
}

// ---------------------------------------------------------------------------
// CancelToken
// ---------------------------------------------------------------------------

/// Cooperative cancellation for an in-flight chart computation.
///
/// A cancelled token is checked after the ephemeris I/O returns and before
/// anything is written to the stores, so an abandoned request never mutates
/// persisted state. The default token is never cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

//! JSON-file key-value stores for charts and horoscopes.
//!
//! One pretty-printed JSON file per record under the SDK cache directory:
//! `charts/<user>.json` and `horoscopes/<user>_<category>.json`. Writes go
//! to a temp file and rename into place, so an interrupted write never
//! leaves a corrupt record behind; a record that still fails to parse is
//! deleted and treated as a miss so the next request recomputes.

use crate::error::Result;
use crate::models::{BirthQuery, Category, Chart, HoroscopeResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

// ---------------------------------------------------------------------------
// ChartRecord
// ---------------------------------------------------------------------------

/// The persisted unit of the chart store: the chart plus the exact birth
/// query that produced it, so a later request can detect birth-data changes
/// without recomputing anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRecord {
    pub user_id: String,
    pub query: BirthQuery,
    pub chart: Chart,
}

// ---------------------------------------------------------------------------
// ChartStore
// ---------------------------------------------------------------------------

/// One chart per user, replaced wholesale on birth-data changes.
pub struct ChartStore {
    dir: PathBuf,
}

impl ChartStore {
    pub fn new(cache_dir: &Path) -> Result<Self> {
        let dir = cache_dir.join("charts");
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn load(&self, user_id: &str) -> Result<Option<ChartRecord>> {
        read_record(&self.path_for(user_id))
    }

    pub fn save(&self, record: &ChartRecord) -> Result<()> {
        write_record(&self.path_for(&record.user_id), record)
    }

    fn path_for(&self, user_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_key(user_id)))
    }
}

// ---------------------------------------------------------------------------
// HoroscopeStore
// ---------------------------------------------------------------------------

/// The most recent horoscope per `(user, category)`.
pub struct HoroscopeStore {
    dir: PathBuf,
}

impl HoroscopeStore {
    pub fn new(cache_dir: &Path) -> Result<Self> {
        let dir = cache_dir.join("horoscopes");
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn load(&self, user_id: &str, category: Category) -> Result<Option<HoroscopeResult>> {
        read_record(&self.path_for(user_id, category))
    }

    pub fn save(
        &self,
        user_id: &str,
        category: Category,
        result: &HoroscopeResult,
    ) -> Result<()> {
        write_record(&self.path_for(user_id, category), result)
    }

    fn path_for(&self, user_id: &str, category: Category) -> PathBuf {
        self.dir
            .join(format!("{}_{}.json", file_key(user_id), category.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Shared file plumbing
// ---------------------------------------------------------------------------

/// Map an arbitrary key to a safe file stem.
fn file_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn read_record<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    match serde_json::from_str(&contents) {
        Ok(record) => Ok(Some(record)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "corrupt store record, removing");
            let _ = fs::remove_file(path);
            Ok(None)
        }
    }
}

fn write_record<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    let tmp = path.with_extension("json.tmp");

    let result = (|| -> Result<()> {
        let payload = serde_json::to_string_pretty(record)?;
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, path)?;
        Ok(())
    })();

    if result.is_err() {
        // Clean up partial temp file on any error
        let _ = fs::remove_file(&tmp);
    }

    result
}

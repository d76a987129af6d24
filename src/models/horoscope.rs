use super::Body;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Daily,
    Love,
    Career,
    Health,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Daily,
        Category::Love,
        Category::Career,
        Category::Health,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Daily => "daily",
            Category::Love => "love",
            Category::Career => "career",
            Category::Health => "health",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::Daily => "Today's Forecast",
            Category::Love => "Love & Relationships Forecast",
            Category::Career => "Career & Work Forecast",
            Category::Health => "Health & Wellness Forecast",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// HoroscopeResult
// ---------------------------------------------------------------------------

/// A composed horoscope, stored keyed by `(user, category)`.
///
/// Requests before `valid_until` return the stored result unchanged,
/// including the lucky attributes; only after expiry is a new one composed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoroscopeResult {
    pub category: Category,
    pub title: String,
    pub content: String,
    pub lucky_number: u32,
    pub lucky_body: Body,
    pub lucky_color: String,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
}

impl HoroscopeResult {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.valid_until
    }
}

use super::GeoCoordinates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Body — the ten bodies every chart tracks, in stable order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    /// All ten bodies in chart order. Every `Chart.planets` list follows
    /// this ordering.
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }

    /// The Sun and Moon never show apparent retrograde motion.
    pub fn can_retrograde(&self) -> bool {
        !matches!(self, Body::Sun | Body::Moon)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Sign — the twelve zodiac signs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    /// Map an ecliptic longitude to its sign: `floor(lon / 30) mod 12`,
    /// with the longitude normalized into `[0, 360)` first.
    pub fn from_longitude(longitude: f64) -> Sign {
        let normalized = longitude.rem_euclid(360.0);
        Sign::ALL[(normalized / 30.0) as usize % 12]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }

    pub fn element(&self) -> Element {
        match self {
            Sign::Aries | Sign::Leo | Sign::Sagittarius => Element::Fire,
            Sign::Taurus | Sign::Virgo | Sign::Capricorn => Element::Earth,
            Sign::Gemini | Sign::Libra | Sign::Aquarius => Element::Air,
            Sign::Cancer | Sign::Scorpio | Sign::Pisces => Element::Water,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// One body's place in the zodiac.
///
/// Invariants: `degree_in_sign` is in `[0, 30)` and together with `sign`
/// reconstructs the body's ecliptic longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    pub body: Body,
    pub sign: Sign,
    pub degree_in_sign: f64,
    pub retrograde: bool,
}

/// A sign plus in-sign degree, used for the ascendant and midheaven.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignPosition {
    pub sign: Sign,
    pub degree: f64,
}

/// The start of one of the twelve houses. `number` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    pub number: u8,
    pub sign: Sign,
    pub degree: f64,
}

// ---------------------------------------------------------------------------
// Aspects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    /// Test order. A pair is assigned the first kind whose orb budget it
    /// falls within, so earlier kinds win ties.
    pub const ALL: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    /// Exact angular separation for this aspect, in degrees.
    pub fn angle(&self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Opposition => 180.0,
        }
    }

    /// Maximum deviation from [`angle`](Self::angle) still counted as this
    /// aspect.
    pub fn orb_limit(&self) -> f64 {
        match self {
            AspectKind::Conjunction => 8.0,
            AspectKind::Sextile => 6.0,
            AspectKind::Square => 7.0,
            AspectKind::Trine => 8.0,
            AspectKind::Opposition => 8.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An angular relationship between two bodies. At most one aspect is
/// recorded per unordered pair; `orb` is the residual deviation from the
/// kind's exact angle and is always within the kind's orb budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub body_a: Body,
    pub body_b: Body,
    pub kind: AspectKind,
    pub orb: f64,
}

// ---------------------------------------------------------------------------
// Chart
// ---------------------------------------------------------------------------

/// A complete natal chart.
///
/// When `has_birth_time` is false, `houses`, `ascendant`, and `midheaven`
/// are `None`: the angular data cannot be computed honestly from a guessed
/// time, while the body longitudes barely move over a day. `degraded` marks
/// charts produced by the deterministic fallback rather than a real
/// ephemeris computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub julian_day: f64,
    pub coordinates: GeoCoordinates,
    pub planets: Vec<PlanetPosition>,
    pub houses: Option<Vec<HouseCusp>>,
    pub ascendant: Option<SignPosition>,
    pub midheaven: Option<SignPosition>,
    pub aspects: Vec<Aspect>,
    pub has_birth_time: bool,
    pub degraded: bool,
    pub computed_at: DateTime<Utc>,
}

impl Chart {
    /// Look up one body's position. Always present for the ten bodies in
    /// [`Body::ALL`].
    pub fn planet(&self, body: Body) -> Option<&PlanetPosition> {
        self.planets.iter().find(|p| p.body == body)
    }
}

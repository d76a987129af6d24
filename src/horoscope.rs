//! Horoscope composition: category text, lucky attributes, validity windows.
//!
//! Everything here is a pure function of the chart and the compose context.
//! In particular the lucky attributes are reductions of chart fields rather
//! than fresh randomness, so recomposing the same chart yields the same
//! result, which is what the `(user, category)` cache depends on.

use crate::models::{Body, Category, Chart, Element, HoroscopeResult, Sign};
use chrono::{DateTime, Duration, Utc};

// ---------------------------------------------------------------------------
// ValidityPolicy
// ---------------------------------------------------------------------------

/// How long a composed horoscope stays valid, per category class.
///
/// Supplied by the caller: the subscription tier lives outside this crate,
/// so the composer only sees the windows the tier grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityPolicy {
    pub daily: Duration,
    pub standard: Duration,
}

impl ValidityPolicy {
    /// Daily expires after one day, everything else after seven.
    pub fn standard() -> Self {
        Self {
            daily: Duration::days(1),
            standard: Duration::days(7),
        }
    }

    /// Top-tier policy: non-daily forecasts hold for two years.
    pub fn extended() -> Self {
        Self {
            daily: Duration::days(1),
            standard: Duration::days(730),
        }
    }

    pub fn window_for(&self, category: Category) -> Duration {
        match category {
            Category::Daily => self.daily,
            _ => self.standard,
        }
    }
}

impl Default for ValidityPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// ComposeContext
// ---------------------------------------------------------------------------

/// Text register for the composed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Plain,
    Warm,
}

/// Caller-supplied composition parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComposeContext {
    pub tone: Tone,
    pub validity: ValidityPolicy,
}

impl ComposeContext {
    pub fn new(tone: Tone, validity: ValidityPolicy) -> Self {
        Self { tone, validity }
    }
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// Compose a fresh horoscope for a chart. `now` anchors the validity window.
pub fn compose_fresh(
    chart: &Chart,
    category: Category,
    ctx: &ComposeContext,
    now: DateTime<Utc>,
) -> HoroscopeResult {
    let content = match category {
        Category::Daily => daily_content(chart, ctx.tone),
        Category::Love => love_content(chart, ctx.tone),
        Category::Career => career_content(chart, ctx.tone),
        Category::Health => health_content(chart, ctx.tone),
    };

    HoroscopeResult {
        category,
        title: category.title().to_string(),
        content,
        lucky_number: lucky_number(chart),
        lucky_body: lucky_body(chart),
        lucky_color: lucky_color(chart).to_string(),
        valid_from: now,
        valid_until: now + ctx.validity.window_for(category),
    }
}

fn sign_of(chart: &Chart, body: Body) -> Sign {
    chart
        .planet(body)
        .map(|p| p.sign)
        .unwrap_or(Sign::Aries)
}

fn is_retrograde(chart: &Chart, body: Body) -> bool {
    chart.planet(body).map(|p| p.retrograde).unwrap_or(false)
}

fn opener(tone: Tone) -> &'static str {
    match tone {
        Tone::Plain => "",
        Tone::Warm => "Dear friend, ",
    }
}

fn daily_content(chart: &Chart, tone: Tone) -> String {
    let sun = sign_of(chart, Body::Sun);
    let moon = sign_of(chart, Body::Moon);
    format!(
        "{}The Moon in {moon} colors your mood today and sharpens your instincts. \
         With the Sun in {sun} backing you, your confidence carries further than \
         usual. Put that energy into the goals you have been circling.",
        opener(tone)
    )
}

fn love_content(chart: &Chart, tone: Tone) -> String {
    let venus = sign_of(chart, Body::Venus);
    let mars = sign_of(chart, Body::Mars);
    let venus_rx = is_retrograde(chart, Body::Venus);
    format!(
        "{}Venus in {venus} shapes what draws you in, while Mars in {mars} shapes \
         how you pursue it. {}",
        opener(tone),
        if venus_rx {
            "With Venus retrograde, this is a season for revisiting old bonds \
             rather than starting new ones."
        } else {
            "The moment favors saying plainly what you feel; connections made \
             now tend to hold."
        }
    )
}

fn career_content(chart: &Chart, tone: Tone) -> String {
    let mars = sign_of(chart, Body::Mars);
    let jupiter = sign_of(chart, Body::Jupiter);
    let saturn = sign_of(chart, Body::Saturn);
    let mars_rx = is_retrograde(chart, Body::Mars);
    format!(
        "{}Mars in {mars} supplies the drive, Jupiter in {jupiter} opens the doors, \
         and Saturn in {saturn} asks for structure behind the ambition. {}",
        opener(tone),
        if mars_rx {
            "With Mars retrograde, consolidate before you push: review the plan \
             before committing to new projects."
        } else {
            "A good stretch for taking initiative: the opportunities showing up \
             now reward a direct approach."
        }
    )
}

fn health_content(chart: &Chart, tone: Tone) -> String {
    let mercury = sign_of(chart, Body::Mercury);
    let moon = sign_of(chart, Body::Moon);
    let mercury_rx = is_retrograde(chart, Body::Mercury);
    format!(
        "{}Mercury in {mercury} steers your mental state and the Moon in {moon} \
         your rest. {} Guard your sleep and keep the routine simple.",
        opener(tone),
        if mercury_rx {
            "Mercury retrograde scatters focus; build in slack and take \
             decisions slowly."
        } else {
            "Your focus is steady, which makes this a good window for \
             re-establishing habits."
        }
    )
}

// ---------------------------------------------------------------------------
// Lucky attributes — stable reductions of chart data
// ---------------------------------------------------------------------------

/// `floor(sun degree + moon degree) mod 40 + 1`, giving 1..=40.
fn lucky_number(chart: &Chart) -> u32 {
    let sun = chart
        .planet(Body::Sun)
        .map(|p| p.degree_in_sign)
        .unwrap_or(0.0);
    let moon = chart
        .planet(Body::Moon)
        .map(|p| p.degree_in_sign)
        .unwrap_or(0.0);
    ((sun + moon) % 40.0) as u32 + 1
}

/// Picked from the five classical benefics by the whole-day part of the
/// Julian Day.
fn lucky_body(chart: &Chart) -> Body {
    const LUCKY: [Body; 5] = [Body::Jupiter, Body::Venus, Body::Sun, Body::Mercury, Body::Moon];
    LUCKY[(chart.julian_day.floor() as i64).rem_euclid(5) as usize]
}

/// Traditional color of the Sun sign.
fn lucky_color(chart: &Chart) -> &'static str {
    match sign_of(chart, Body::Sun) {
        Sign::Aries => "red",
        Sign::Taurus => "green",
        Sign::Gemini => "yellow",
        Sign::Cancer => "silver",
        Sign::Leo => "gold",
        Sign::Virgo => "light blue",
        Sign::Libra => "pink",
        Sign::Scorpio => "dark red",
        Sign::Sagittarius => "purple",
        Sign::Capricorn => "brown",
        Sign::Aquarius => "blue",
        Sign::Pisces => "sea blue",
    }
}

// ---------------------------------------------------------------------------
// Birth-chart analysis
// ---------------------------------------------------------------------------

/// A multi-section plain-text reading of a whole chart.
pub fn birth_chart_analysis(chart: &Chart) -> String {
    let mut out = String::from("Natal Chart Analysis\n\nOverview:\n");

    let sun = sign_of(chart, Body::Sun);
    let moon = sign_of(chart, Body::Moon);
    out.push_str(&format!(
        "Your Sun in {sun} reflects the core of your character; your Moon in \
         {moon} speaks for your emotional needs.\n"
    ));

    match &chart.ascendant {
        Some(asc) => out.push_str(&format!(
            "Your ascendant in {} is the face you show on first meeting.\n",
            asc.sign
        )),
        None => out.push_str(
            "Birth time unknown: the ascendant and houses cannot be computed \
             reliably and are omitted.\n",
        ),
    }

    out.push_str("\nPlanets:\n");
    for p in &chart.planets {
        out.push_str(&format!(
            "- {} in {} at {:.1}°{}\n",
            p.body,
            p.sign,
            p.degree_in_sign,
            if p.retrograde { " (retrograde)" } else { "" }
        ));
    }

    if let Some(houses) = &chart.houses {
        out.push_str("\nHouses:\n");
        for h in houses {
            out.push_str(&format!("- House {} begins in {}\n", h.number, h.sign));
        }
    }

    out.push('\n');
    out.push_str(&element_balance_line(chart));

    if let Some(stellium) = stellium_line(chart) {
        out.push_str(&stellium);
    }

    out
}

fn element_balance_line(chart: &Chart) -> String {
    let elements = [
        (Element::Fire, "fire"),
        (Element::Earth, "earth"),
        (Element::Air, "air"),
        (Element::Water, "water"),
    ];

    let mut dominant = "";
    let mut max = 0usize;
    for (element, name) in elements {
        let count = chart
            .planets
            .iter()
            .filter(|p| p.sign.element() == element)
            .count();
        if count > max {
            max = count;
            dominant = name;
        }
    }

    if max * 2 >= chart.planets.len() {
        format!("Your chart leans strongly toward the {dominant} element.\n")
    } else {
        "Your chart is fairly balanced across the four elements.\n".to_string()
    }
}

/// Three or more planets sharing a sign concentrate that sign's themes.
fn stellium_line(chart: &Chart) -> Option<String> {
    for sign in Sign::ALL {
        let n = chart.planets.iter().filter(|p| p.sign == sign).count();
        if n >= 3 {
            return Some(format!(
                "Stellium: {n} planets gather in {sign}, concentrating its \
                 themes in your character.\n"
            ));
        }
    }
    None
}

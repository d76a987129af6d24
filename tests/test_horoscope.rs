//! Horoscope composition tests: idempotence inside the validity window,
//! renewal after expiry, deterministic lucky attributes, validity policy.

mod common;

use chrono::{Duration, TimeZone, Utc};
use falak_sdk::chart::assemble;
use falak_sdk::horoscope::{self, ComposeContext, Tone, ValidityPolicy};
use falak_sdk::models::{Body, Category, Chart, GeoCoordinates};

fn fixed_chart() -> Chart {
    let houses = common::fixed_houses();
    assemble(
        &common::fixed_bodies(),
        Some(&houses),
        2448889.7951786,
        GeoCoordinates {
            latitude: 30.0444,
            longitude: 31.2357,
        },
        true,
        false,
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    )
}

// ---------------------------------------------------------------------------
// Validity window caching
// ---------------------------------------------------------------------------

#[test]
fn compose_is_idempotent_within_the_window() {
    let (sdk, _, _tmp) = common::scripted_sdk(false);
    let chart = fixed_chart();
    let ctx = ComposeContext::default();

    let first = sdk
        .horoscopes()
        .compose("user-1", &chart, Category::Daily, &ctx)
        .unwrap();
    let second = sdk
        .horoscopes()
        .compose("user-1", &chart, Category::Daily, &ctx)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.lucky_number, second.lucky_number);
    assert_eq!(first.lucky_body, second.lucky_body);
    assert_eq!(first.lucky_color, second.lucky_color);
}

#[test]
fn expired_result_is_recomposed_with_new_window() {
    let (sdk, _, _tmp) = common::scripted_sdk(false);
    let chart = fixed_chart();

    // Zero-length windows force every request past its own expiry.
    let ctx = ComposeContext::new(
        Tone::Plain,
        ValidityPolicy {
            daily: Duration::zero(),
            standard: Duration::zero(),
        },
    );

    let first = sdk
        .horoscopes()
        .compose("user-1", &chart, Category::Daily, &ctx)
        .unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = sdk
        .horoscopes()
        .compose("user-1", &chart, Category::Daily, &ctx)
        .unwrap();

    assert!(second.valid_from > first.valid_from);
    // Same chart, so the deterministic parts are unchanged.
    assert_eq!(first.content, second.content);
    assert_eq!(first.lucky_number, second.lucky_number);
    assert_eq!(first.lucky_body, second.lucky_body);
}

#[test]
fn categories_are_cached_independently() {
    let (sdk, _, _tmp) = common::scripted_sdk(false);
    let chart = fixed_chart();
    let ctx = ComposeContext::default();

    let daily = sdk
        .horoscopes()
        .compose("user-1", &chart, Category::Daily, &ctx)
        .unwrap();
    let love = sdk
        .horoscopes()
        .compose("user-1", &chart, Category::Love, &ctx)
        .unwrap();

    assert_eq!(daily.category, Category::Daily);
    assert_eq!(love.category, Category::Love);
    assert_ne!(daily.content, love.content);
}

// ---------------------------------------------------------------------------
// Validity policy
// ---------------------------------------------------------------------------

#[test]
fn standard_policy_windows() {
    let chart = fixed_chart();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    let ctx = ComposeContext::default();

    let daily = horoscope::compose_fresh(&chart, Category::Daily, &ctx, now);
    assert_eq!(daily.valid_until - daily.valid_from, Duration::days(1));

    let love = horoscope::compose_fresh(&chart, Category::Love, &ctx, now);
    assert_eq!(love.valid_until - love.valid_from, Duration::days(7));
}

#[test]
fn extended_policy_stretches_non_daily_windows() {
    let chart = fixed_chart();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    let ctx = ComposeContext::new(Tone::Plain, ValidityPolicy::extended());

    let daily = horoscope::compose_fresh(&chart, Category::Daily, &ctx, now);
    assert_eq!(daily.valid_until - daily.valid_from, Duration::days(1));

    let career = horoscope::compose_fresh(&chart, Category::Career, &ctx, now);
    assert_eq!(career.valid_until - career.valid_from, Duration::days(730));
}

// ---------------------------------------------------------------------------
// Deterministic composition
// ---------------------------------------------------------------------------

#[test]
fn compose_fresh_is_a_pure_function() {
    let chart = fixed_chart();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    let ctx = ComposeContext::default();

    let a = horoscope::compose_fresh(&chart, Category::Love, &ctx, now);
    let b = horoscope::compose_fresh(&chart, Category::Love, &ctx, now);
    assert_eq!(a, b);
}

#[test]
fn lucky_attributes_reduce_from_chart_data() {
    let chart = fixed_chart();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    let result = horoscope::compose_fresh(&chart, Category::Daily, &ComposeContext::default(), now);

    // Sun at Libra 1.93°, Moon at Cancer 5.0°: floor(6.93) + 1.
    assert_eq!(result.lucky_number, 7);
    // floor(2448889.795) mod 5 == 4 picks the fifth lucky body.
    assert_eq!(result.lucky_body, Body::Moon);
    // Libra Sun.
    assert_eq!(result.lucky_color, "pink");
}

#[test]
fn lucky_number_stays_in_range() {
    for degree_pair in [(0.0, 0.0), (29.9, 29.9), (15.0, 0.1)] {
        let mut bodies = common::fixed_bodies();
        bodies[0].longitude = degree_pair.0; // Sun in Aries at .0
        bodies[1].longitude = degree_pair.1; // Moon in Aries at .1
        let chart = assemble(
            &bodies,
            None,
            2451545.0,
            GeoCoordinates {
                latitude: 0.0,
                longitude: 0.0,
            },
            false,
            false,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );
        let result = horoscope::compose_fresh(
            &chart,
            Category::Daily,
            &ComposeContext::default(),
            Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        );
        assert!((1..=40).contains(&result.lucky_number));
    }
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

#[test]
fn content_interpolates_chart_signs() {
    let chart = fixed_chart();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    let ctx = ComposeContext::default();

    let daily = horoscope::compose_fresh(&chart, Category::Daily, &ctx, now);
    assert!(daily.content.contains("Libra")); // Sun sign
    assert!(daily.content.contains("Cancer")); // Moon sign
    assert_eq!(daily.title, "Today's Forecast");

    let love = horoscope::compose_fresh(&chart, Category::Love, &ctx, now);
    assert!(love.content.contains("Virgo")); // Venus sign
}

#[test]
fn warm_tone_changes_the_register() {
    let chart = fixed_chart();
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();

    let plain = horoscope::compose_fresh(&chart, Category::Daily, &ComposeContext::default(), now);
    let warm = horoscope::compose_fresh(
        &chart,
        Category::Daily,
        &ComposeContext::new(Tone::Warm, ValidityPolicy::standard()),
        now,
    );
    assert_ne!(plain.content, warm.content);
}

#[test]
fn analysis_reports_planets_and_missing_birth_time() {
    let (sdk, _, _tmp) = common::scripted_sdk(false);

    let chart = fixed_chart();
    let text = sdk.horoscopes().birth_chart_analysis(&chart);
    assert!(text.contains("Sun in Libra"));
    assert!(text.contains("Saturn in Aquarius at 15.5° (retrograde)"));
    assert!(text.contains("House 1 begins in Aries"));

    let timeless = assemble(
        &common::fixed_bodies(),
        None,
        2448889.7951786,
        GeoCoordinates {
            latitude: 30.0444,
            longitude: 31.2357,
        },
        false,
        false,
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    );
    let text = sdk.horoscopes().birth_chart_analysis(&timeless);
    assert!(text.contains("Birth time unknown"));
}

//! Julian Day conversion tests.

use approx::assert_relative_eq;
use chrono::{NaiveDate, NaiveTime};
use falak_sdk::time::julian_day;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

// ---------------------------------------------------------------------------
// Known values
// ---------------------------------------------------------------------------

#[test]
fn known_birth_moment_in_cairo() {
    // 1992-09-24 09:10 local, longitude 31.2357 (Cairo): the local-time day
    // count is 2448889.8819444, minus the 31.2357/15-hour zone estimate.
    let jd = julian_day(date(1992, 9, 24), Some(time(9, 10)), 31.2357);
    assert_relative_eq!(jd, 2448889.7951786, epsilon = 1e-6);
}

#[test]
fn epoch_2000_noon_at_greenwich() {
    // J2000.0 reference epoch.
    let jd = julian_day(date(2000, 1, 1), Some(time(12, 0)), 0.0);
    assert_relative_eq!(jd, 2451545.0, epsilon = 1e-9);
}

// ---------------------------------------------------------------------------
// Structure
// ---------------------------------------------------------------------------

#[test]
fn missing_time_uses_noon_placeholder() {
    let d = date(1992, 9, 24);
    assert_eq!(
        julian_day(d, None, 0.0),
        julian_day(d, Some(time(12, 0)), 0.0)
    );
}

#[test]
fn twelve_hours_are_half_a_day() {
    let d = date(2021, 3, 15);
    let morning = julian_day(d, Some(time(6, 0)), 0.0);
    let evening = julian_day(d, Some(time(18, 0)), 0.0);
    assert_relative_eq!(evening - morning, 0.5, epsilon = 1e-9);
}

#[test]
fn consecutive_days_are_one_apart() {
    let a = julian_day(date(2021, 2, 28), Some(time(10, 0)), 0.0);
    let b = julian_day(date(2021, 3, 1), Some(time(10, 0)), 0.0);
    assert_relative_eq!(b - a, 1.0, epsilon = 1e-9);
}

#[test]
fn fifteen_degrees_east_shift_one_hour() {
    let d = date(2021, 6, 1);
    let t = Some(time(9, 30));
    let at_greenwich = julian_day(d, t, 0.0);
    let east = julian_day(d, t, 15.0);
    assert_relative_eq!(at_greenwich - east, 1.0 / 24.0, epsilon = 1e-9);
}

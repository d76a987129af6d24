//! Civil date/time to Julian Day conversion.
//!
//! The Julian Day is the single numeric time axis for everything downstream;
//! calendar and timezone arithmetic stops here. The timezone is approximated
//! from the birthplace longitude (15 degrees per hour) rather than a
//! timezone database, matching the precision of the built-in geocoder.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

/// Placeholder used for the day-count when the birth time is unknown.
///
/// This only feeds the body-longitude arithmetic; callers track the missing
/// time separately so house and ascendant computation is suppressed.
pub fn noon() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).expect("noon is a valid time")
}

/// Convert a calendar date, an optional clock time, and a longitude to a
/// Julian Day.
pub fn julian_day(date: NaiveDate, time: Option<NaiveTime>, longitude: f64) -> f64 {
    let t = time.unwrap_or_else(noon);
    let hours = t.hour() as f64 + t.minute() as f64 / 60.0 + t.second() as f64 / 3600.0;

    let jd = gregorian_julian_day(date.year(), date.month(), date.day(), hours);

    // 15 degrees of longitude per hour of offset from UT.
    let timezone_offset = longitude / 15.0;
    jd - timezone_offset / 24.0
}

/// Gregorian calendar to Julian Day, fractional hours included.
fn gregorian_julian_day(year: i32, month: u32, day: u32, hours: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };

    let a = (y as f64 / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y as f64 + 4716.0)).floor()
        + (30.6001 * (m as f64 + 1.0)).floor()
        + day as f64
        + b
        - 1524.5
        + hours / 24.0
}

//! Time values: clipping, civil-date construction and ISO-8601 rendering.
//!
//! A date is a count of milliseconds since 1970-01-01T00:00:00Z in the range
//! ±8.64e15; anything else is the invalid date, represented by `NaN`.

/// Milliseconds in a day.
const MS_PER_DAY: i64 = 86_400_000;

/// Days in a 400-year Gregorian cycle.
const DAYS_PER_CYCLE: i64 = 146_097;

/// The largest representable distance from the epoch, in milliseconds.
pub const MAX_TIME: f64 = 8.64e15;

/// Normalises a time value: non-finite or out-of-range values become `NaN`,
/// everything else is truncated toward zero.
#[must_use]
pub fn time_clip(ms: f64) -> f64 {
    if !ms.is_finite() || ms.abs() > MAX_TIME {
        return f64::NAN;
    }
    // `+ 0.0` turns a negative zero into a positive one.
    ms.trunc() + 0.0
}

/// Returns true if `year` is a Gregorian leap year.
#[must_use]
pub const fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

const fn days_in_month(year: i64, month: u32) -> i64 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

/// Builds a time value from UTC calendar fields.
///
/// `month` is 1-based. Fields outside their usual ranges are not rejected;
/// the result is clipped like any other time value.
#[must_use]
pub fn utc(year: i64, month: u32, day: u32, hour: u32, minute: u32, second: u32, ms: u32) -> f64 {
    let days = days_from_civil(year, month, day);
    let time = i64::from(hour) * 3_600_000
        + i64::from(minute) * 60_000
        + i64::from(second) * 1_000
        + i64::from(ms);
    time_clip((days * MS_PER_DAY + time) as f64)
}

fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let m = i64::from(month);
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * DAYS_PER_CYCLE + doe - 719_468
}

/// Renders a time value as an ISO-8601 UTC timestamp.
///
/// Years outside `0..=9999` use the six-digit signed form. Returns `None` for
/// the invalid date.
#[must_use]
pub fn to_iso_string(ms: f64) -> Option<String> {
    let ms = time_clip(ms);
    if ms.is_nan() {
        return None;
    }
    let ms = ms as i64;
    let days = ms.div_euclid(MS_PER_DAY);
    let time = ms.rem_euclid(MS_PER_DAY);

    // The calendar repeats every 400 years, so whole cycles are skipped and
    // at most one cycle is walked year by year.
    let mut year = 1970 + days.div_euclid(DAYS_PER_CYCLE) * 400;
    let mut remaining = days.rem_euclid(DAYS_PER_CYCLE);
    loop {
        let days_in_year = if is_leap_year(year) { 366 } else { 365 };
        if remaining < days_in_year {
            break;
        }
        remaining -= days_in_year;
        year += 1;
    }

    let mut month = 1;
    loop {
        let days_in_month = days_in_month(year, month);
        if remaining < days_in_month {
            break;
        }
        remaining -= days_in_month;
        month += 1;
    }
    let day = remaining + 1;

    let year_text = if (0..=9999).contains(&year) {
        format!("{year:04}")
    } else if year < 0 {
        format!("-{:06}", -year)
    } else {
        format!("+{year:06}")
    };

    Some(format!(
        "{year_text}-{month:02}-{day:02}T{:02}:{:02}:{:02}.{:03}Z",
        time / 3_600_000,
        time / 60_000 % 60,
        time / 1_000 % 60,
        time % 1_000,
    ))
}

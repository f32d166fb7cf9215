//! Calendar dates for todo.txt.
//!
//! All dates in the format are plain calendar days written as `yyyy-MM-dd`. There is
//! no time component and no time zone: "today" is the local calendar day.
//!
//! Parsing is strict about the shape (ten characters, zero padded) and about the
//! calendar (`2023-02-29` is not a date), but it never fails loudly. Anything that
//! does not parse is simply not a date, and the caller keeps it as text.

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a strict `yyyy-MM-dd` date.
///
/// Returns `None` for anything else, including valid-looking but impossible
/// dates and unpadded months or days.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }

    let year = text[0..4].parse().ok()?;
    let month = text[5..7].parse().ok()?;
    let day = text[8..10].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Formats a date as `yyyy-MM-dd`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// The current local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn today_string() -> String {
    format_date(today())
}

/// Offsets a date by a (possibly negative) number of days.
///
/// Month and year rollover are handled by the calendar. Offsets past the
/// representable range saturate at its ends.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(magnitude).unwrap_or(NaiveDate::MAX)
    } else {
        date.checked_sub_days(magnitude).unwrap_or(NaiveDate::MIN)
    }
}

/// Resolves phrases like "tomorrow" or "friday" relative to `today`.
///
/// Recognized, case-insensitively: `today`, `tomorrow`, `yesterday`, and full or
/// three-letter weekday names. A weekday resolves to its next occurrence at or
/// after `today`, so naming today's weekday yields today.
///
/// Returns `None` for anything else; callers treat that as "no change".
pub fn resolve_natural_language(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let phrase = text.trim().to_ascii_lowercase();
    match phrase.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(add_days(today, 1)),
        "yesterday" => return Some(add_days(today, -1)),
        _ => {}
    }

    let weekday = parse_weekday(&phrase)?;
    let current = today.weekday().num_days_from_monday() as i64;
    let target = weekday.num_days_from_monday() as i64;
    let ahead = (target - current).rem_euclid(7);
    Some(add_days(today, ahead))
}

/// Resolves user input for a date field: a strict date or a natural-language phrase.
pub fn resolve_date_input(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    parse_date(text.trim()).or_else(|| resolve_natural_language(text, today))
}

fn parse_weekday(name: &str) -> Option<Weekday> {
    let weekday = match name {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}

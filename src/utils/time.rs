use crate::error::{invalid_input, DtrResult};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// Zero-padded day keys ("01".."31") of the given month
pub fn days_in_month(year: i32, month: u32) -> Vec<String> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    first
        .iter_days()
        .take_while(|date| date.month() == month)
        .map(|date| format!("{:02}", date.day()))
        .collect()
}

/// Path segment of a month, formatted as YYYY-MM
pub fn month_path(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

/// Parse a YYYY-MM month segment
pub fn parse_month(value: &str) -> DtrResult<(i32, u32)> {
    let (year, month) = value
        .trim()
        .split_once('-')
        .ok_or_else(|| invalid_input(&format!("Expected YYYY-MM, got '{}'", value)))?;

    let year = year
        .parse::<i32>()
        .map_err(|_| invalid_input(&format!("Invalid year in '{}'", value)))?;
    let month = month
        .parse::<u32>()
        .map_err(|_| invalid_input(&format!("Invalid month in '{}'", value)))?;

    if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
        return Err(invalid_input(&format!("Month out of range in '{}'", value)));
    }

    Ok((year, month))
}

/// Short row label of a day, e.g. "Feb 01"
pub fn format_short_date(year: i32, month: u32, day: &str) -> Option<String> {
    let day = day.parse::<u32>().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(date.format("%b %d").to_string())
}

/// Heading of a month, e.g. "February 2025"
pub fn format_month_heading(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.format("%B %Y").to_string())
        .unwrap_or_else(|| month_path(year, month))
}

/// Year and month of the given instant in the given zone
pub fn month_of(now: &DateTime<Utc>, tz: &Tz) -> (i32, u32) {
    let local = tz.from_utc_datetime(&now.naive_utc());
    (local.year(), local.month())
}

/// Year and month of "now" in the given zone
pub fn current_month(tz: &Tz) -> (i32, u32) {
    month_of(&Utc::now(), tz)
}

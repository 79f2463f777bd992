//! Worked-time calculation over raw 12-hour punch strings.
//!
//! Nothing here fails: a punch that is missing or cannot be read contributes
//! no time.

use super::models::{MonthlyLog, Session, TimePunchRecord, WorkedDuration};
use tracing::warn;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Parse a 12-hour time such as "08:03 AM" into a 24-hour (hour, minute)
pub fn parse_time_12h(time_str: &str) -> Option<(u32, u32)> {
    let mut parts = time_str.split(' ');
    let time = parts.next().filter(|t| !t.is_empty())?;
    let modifier = parts.next().filter(|m| !m.is_empty())?;

    let (hour, minute) = time.split_once(':')?;
    let mut hour = hour.parse::<u32>().ok()?;
    let minute = minute.parse::<u32>().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }

    if modifier.eq_ignore_ascii_case("PM") && hour < 12 {
        hour += 12;
    }
    if modifier.eq_ignore_ascii_case("AM") && hour == 12 {
        hour = 0;
    }

    Some((hour, minute))
}

/// Time worked between a time-in and a time-out punch
///
/// A time-out earlier on the clock than the time-in is taken to be on the
/// following day.
pub fn session_duration(time_in: Option<&str>, time_out: Option<&str>) -> WorkedDuration {
    let (Some(time_in), Some(time_out)) = (time_in, time_out) else {
        return WorkedDuration::ZERO;
    };
    if time_in.is_empty() || time_out.is_empty() {
        return WorkedDuration::ZERO;
    }

    let (Some((in_h, in_m)), Some((out_h, out_m))) =
        (parse_time_12h(time_in), parse_time_12h(time_out))
    else {
        warn!(time_in, time_out, "Invalid time conversion");
        return WorkedDuration::ZERO;
    };

    let start = i64::from(in_h * 60 + in_m);
    let end = i64::from(out_h * 60 + out_m);

    let mut diff = end - start;
    if diff < 0 {
        diff += MINUTES_PER_DAY;
    }

    WorkedDuration::from_minutes(diff as u32)
}

/// Un-normalized time worked on one day, AM and PM sessions combined
pub fn day_duration(record: &TimePunchRecord) -> WorkedDuration {
    let (am_in, am_out) = record.session(Session::Am);
    let (pm_in, pm_out) = record.session(Session::Pm);
    session_duration(am_in, am_out) + session_duration(pm_in, pm_out)
}

/// Total time worked over the given days of a month
///
/// Days missing from the log count as empty records. Minutes are carried into
/// hours only once, after every session has been summed.
pub fn monthly_total<I, S>(days: I, log: &MonthlyLog) -> WorkedDuration
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let empty = TimePunchRecord::default();

    let total: WorkedDuration = days
        .into_iter()
        .map(|day| day_duration(log.get(day.as_ref()).unwrap_or(&empty)))
        .sum();

    total.normalized()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(am_in: &str, am_out: &str, pm_in: &str, pm_out: &str) -> TimePunchRecord {
        let punch = |s: &str| (!s.is_empty()).then(|| s.to_string());
        TimePunchRecord {
            am_in: punch(am_in),
            am_out: punch(am_out),
            pm_in: punch(pm_in),
            pm_out: punch(pm_out),
        }
    }

    #[test]
    fn test_parse_time_12h() {
        assert_eq!(parse_time_12h("12:00 AM"), Some((0, 0)));
        assert_eq!(parse_time_12h("12:00 PM"), Some((12, 0)));
        assert_eq!(parse_time_12h("01:15 PM"), Some((13, 15)));
        assert_eq!(parse_time_12h("8:03 AM"), Some((8, 3)));
        assert_eq!(parse_time_12h("11:59 pm"), Some((23, 59)));
        assert_eq!(parse_time_12h("12:30 am"), Some((0, 30)));

        // Already 24-hour with a suffix passes through
        assert_eq!(parse_time_12h("13:00 PM"), Some((13, 0)));

        // Anything after the meridiem is ignored
        assert_eq!(parse_time_12h("05:00 PM "), Some((17, 0)));
    }

    #[test]
    fn test_parse_time_12h_unparseable() {
        assert_eq!(parse_time_12h(""), None);
        assert_eq!(parse_time_12h("08:00"), None); // No meridiem
        assert_eq!(parse_time_12h("08:00  AM"), None); // Empty token after double space
        assert_eq!(parse_time_12h("8 AM"), None); // No minutes
        assert_eq!(parse_time_12h("ab:00 AM"), None);
        assert_eq!(parse_time_12h("08:cd PM"), None);
        assert_eq!(parse_time_12h("08:00:30 AM"), None);
        assert_eq!(parse_time_12h("24:00 AM"), None);
        assert_eq!(parse_time_12h("08:60 AM"), None);
        assert_eq!(parse_time_12h(" 08:00 AM"), None); // Leading space leaves an empty time
    }

    #[test]
    fn test_session_duration_missing_punch() {
        assert_eq!(session_duration(None, Some("05:00 PM")), WorkedDuration::ZERO);
        assert_eq!(session_duration(Some("01:00 PM"), None), WorkedDuration::ZERO);
        assert_eq!(session_duration(Some(""), Some("05:00 PM")), WorkedDuration::ZERO);
        assert_eq!(session_duration(Some("garbage"), Some("05:00 PM")), WorkedDuration::ZERO);
    }

    #[test]
    fn test_session_duration() {
        assert_eq!(
            session_duration(Some("08:00 AM"), Some("12:00 PM")),
            WorkedDuration::new(4, 0)
        );
        assert_eq!(
            session_duration(Some("07:52 AM"), Some("12:05 PM")),
            WorkedDuration::new(4, 13)
        );
        assert_eq!(
            session_duration(Some("08:00 AM"), Some("08:00 AM")),
            WorkedDuration::ZERO
        );
    }

    #[test]
    fn test_session_duration_overnight_wrap() {
        assert_eq!(
            session_duration(Some("11:30 PM"), Some("01:00 AM")),
            WorkedDuration::new(1, 30)
        );
        assert_eq!(
            session_duration(Some("01:00 PM"), Some("12:59 PM")),
            WorkedDuration::new(23, 59)
        );
    }

    #[test]
    fn test_monthly_total_two_day_month() {
        let mut log = MonthlyLog::new();
        log.insert("01", record("08:00 AM", "12:00 PM", "01:00 PM", "05:00 PM"));

        assert_eq!(monthly_total(["01", "02"], &log), WorkedDuration::new(8, 0));
    }

    #[test]
    fn test_monthly_total_normalizes_minutes() {
        let mut log = MonthlyLog::new();
        log.insert("01", record("08:00 AM", "08:45 AM", "01:00 PM", "01:40 PM"));
        log.insert("02", record("08:00 AM", "08:40 AM", "", ""));

        // 45 + 40 + 40 = 125 minutes
        assert_eq!(monthly_total(["01", "02"], &log), WorkedDuration::new(2, 5));
    }

    #[test]
    fn test_monthly_total_is_order_independent() {
        let mut log = MonthlyLog::new();
        log.insert("01", record("07:45 AM", "12:10 PM", "12:55 PM", "05:20 PM"));
        log.insert("02", record("08:10 AM", "", "01:00 PM", "06:35 PM"));
        log.insert("03", record("", "", "10:00 PM", "06:00 AM"));

        let forward = monthly_total(["01", "02", "03", "04"], &log);
        let backward = monthly_total(["04", "03", "02", "01"], &log);
        let shuffled = monthly_total(["02", "04", "01", "03"], &log);

        assert_eq!(forward, backward);
        assert_eq!(forward, shuffled);
        assert!(forward.minutes < 60);
    }

    #[test]
    fn test_monthly_total_ignores_days_outside_list() {
        let mut log = MonthlyLog::new();
        log.insert("31", record("08:00 AM", "12:00 PM", "", ""));

        assert_eq!(monthly_total(["29", "30"], &log), WorkedDuration::ZERO);
        assert_eq!(monthly_total(Vec::<String>::new(), &log), WorkedDuration::ZERO);
    }
}

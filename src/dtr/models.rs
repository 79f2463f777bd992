use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Field names used by the attendance device
pub mod fields {
    pub const AM_IN: &str = "AM_IN";
    pub const AM_OUT: &str = "AM_OUT";
    pub const PM_IN: &str = "PM_IN";
    pub const PM_OUT: &str = "PM_OUT";
}

/// Half-day session of a time record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    Am,
    Pm,
}

/// One day's punches for one employee
///
/// `None` means the field was absent in the store, `Some("")` means it was
/// stored empty. Both count as "not recorded" when computing worked time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePunchRecord {
    #[serde(rename = "AM_IN", default, skip_serializing_if = "Option::is_none")]
    pub am_in: Option<String>,
    #[serde(rename = "AM_OUT", default, skip_serializing_if = "Option::is_none")]
    pub am_out: Option<String>,
    #[serde(rename = "PM_IN", default, skip_serializing_if = "Option::is_none")]
    pub pm_in: Option<String>,
    #[serde(rename = "PM_OUT", default, skip_serializing_if = "Option::is_none")]
    pub pm_out: Option<String>,
}

impl TimePunchRecord {
    /// Decode a raw store value, dropping anything that isn't a string punch
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Self {
            am_in: field(fields::AM_IN),
            am_out: field(fields::AM_OUT),
            pm_in: field(fields::PM_IN),
            pm_out: field(fields::PM_OUT),
        }
    }

    /// Time-in and time-out of a session
    pub fn session(&self, session: Session) -> (Option<&str>, Option<&str>) {
        match session {
            Session::Am => (self.am_in.as_deref(), self.am_out.as_deref()),
            Session::Pm => (self.pm_in.as_deref(), self.pm_out.as_deref()),
        }
    }

    /// True when no punch field is present at all
    pub fn is_empty(&self) -> bool {
        self.am_in.is_none() && self.am_out.is_none() && self.pm_in.is_none() && self.pm_out.is_none()
    }
}

/// One employee's records for one calendar month, keyed by "01".."31"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlyLog {
    days: BTreeMap<String, TimePunchRecord>,
}

impl MonthlyLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a raw store value
    ///
    /// Objects are keyed by day as stored. Arrays are keyed by their
    /// zero-padded index, skipping null slots. Anything else is an empty log.
    pub fn from_value(value: &Value) -> Self {
        let mut log = Self::new();

        match value {
            Value::Object(map) => {
                for (day, record) in map {
                    if record.is_object() {
                        log.insert(day.clone(), TimePunchRecord::from_value(record));
                    }
                }
            }
            Value::Array(items) => {
                for (index, record) in items.iter().enumerate() {
                    if record.is_object() {
                        log.insert(format!("{:02}", index), TimePunchRecord::from_value(record));
                    }
                }
            }
            _ => {}
        }

        log
    }

    /// Record for a day key, if any
    pub fn get(&self, day: &str) -> Option<&TimePunchRecord> {
        self.days.get(day)
    }

    /// Set the record for a day key
    pub fn insert(&mut self, day: impl Into<String>, record: TimePunchRecord) {
        self.days.insert(day.into(), record);
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Elapsed working time
///
/// Addition is field-wise and does not carry minutes; call `normalized` once
/// the sum is complete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkedDuration {
    pub hours: u32,
    pub minutes: u32,
}

impl WorkedDuration {
    pub const ZERO: WorkedDuration = WorkedDuration { hours: 0, minutes: 0 };

    pub fn new(hours: u32, minutes: u32) -> Self {
        Self { hours, minutes }
    }

    /// Split a whole number of minutes into hours and minutes
    pub fn from_minutes(total: u32) -> Self {
        Self {
            hours: total / 60,
            minutes: total % 60,
        }
    }

    /// Carry whole hours out of the minutes field
    pub fn normalized(self) -> Self {
        Self {
            hours: self.hours + self.minutes / 60,
            minutes: self.minutes % 60,
        }
    }
}

impl Add for WorkedDuration {
    type Output = WorkedDuration;

    fn add(self, other: WorkedDuration) -> WorkedDuration {
        WorkedDuration {
            hours: self.hours + other.hours,
            minutes: self.minutes + other.minutes,
        }
    }
}

impl Sum for WorkedDuration {
    fn sum<I: Iterator<Item = WorkedDuration>>(iter: I) -> Self {
        iter.fold(WorkedDuration::ZERO, Add::add)
    }
}

impl fmt::Display for WorkedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} hours {} minutes", self.hours, self.minutes)
    }
}

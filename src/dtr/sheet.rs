use super::calculator::{day_duration, monthly_total};
use super::models::{MonthlyLog, TimePunchRecord, WorkedDuration};
use crate::utils::time::{days_in_month, format_month_heading, format_short_date, month_path};
use serde::{Deserialize, Serialize};

/// One printed row of the timesheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DtrRow {
    /// Day key ("01".."31")
    pub day: String,
    /// Short date label, e.g. "Feb 01"
    pub label: String,
    /// Punches for the day, empty when nothing was logged
    pub record: TimePunchRecord,
    /// Time worked that day
    pub worked: WorkedDuration,
}

/// A month's timesheet for one employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DtrSheet {
    pub employee: String,
    pub year: i32,
    pub month: u32,
    /// Month segment, YYYY-MM
    pub month_path: String,
    /// Month heading, e.g. "February 2025"
    pub month_heading: String,
    pub rows: Vec<DtrRow>,
    pub total: WorkedDuration,
}

impl DtrSheet {
    /// Lay out every calendar day of the month against the employee's log
    pub fn build(employee: &str, year: i32, month: u32, log: &MonthlyLog) -> Self {
        let days = days_in_month(year, month);

        let rows = days
            .iter()
            .map(|day| {
                let record = log.get(day).cloned().unwrap_or_default();
                DtrRow {
                    label: format_short_date(year, month, day).unwrap_or_else(|| day.clone()),
                    worked: day_duration(&record).normalized(),
                    day: day.clone(),
                    record,
                }
            })
            .collect();

        Self {
            employee: employee.to_string(),
            year,
            month,
            month_path: month_path(year, month),
            month_heading: format_month_heading(year, month),
            total: monthly_total(&days, log),
            rows,
        }
    }

    /// Number of days that have at least one punch
    pub fn days_logged(&self) -> usize {
        self.rows.iter().filter(|row| !row.record.is_empty()).count()
    }
}

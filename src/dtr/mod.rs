pub mod calculator;
pub mod models;
pub mod sheet;

pub use calculator::{day_duration, monthly_total, parse_time_12h, session_duration};
pub use models::{MonthlyLog, Session, TimePunchRecord, WorkedDuration};
pub use sheet::{DtrRow, DtrSheet};

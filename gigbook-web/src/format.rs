//! Display formatting for show start times

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `Friday February, 1, 2030 at 8:00PM`
    Full,
    /// `Fri 02, 01, 2030 8:00PM`
    Medium,
}

pub fn format_datetime(instant: DateTime<Utc>, format: DateFormat) -> String {
    let pattern = match format {
        DateFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
        DateFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
    };
    instant.format(pattern).to_string()
}

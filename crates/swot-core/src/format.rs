//! Display formatting for durations and instants.

use chrono::{DateTime, TimeZone};

/// `HH:MM:SS` with zero-padded components. Hours grow past two digits
/// rather than wrapping.
pub fn format_hms(total_secs: u64) -> String {
  let hours = total_secs / 3600;
  let minutes = (total_secs % 3600) / 60;
  let seconds = total_secs % 60;
  format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Compact `{h}h {m}m` form used for leaderboard totals.
pub fn format_hours_minutes(total_secs: u64) -> String {
  let hours = total_secs / 3600;
  let minutes = (total_secs % 3600) / 60;
  format!("{hours}h {minutes}m")
}

/// `DD/MM/YYYY` date label.
pub fn format_date<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
  Tz::Offset: std::fmt::Display,
{
  dt.format("%d/%m/%Y").to_string()
}

/// `hh:mm am/pm` time-of-day label.
pub fn format_time_of_day<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
  Tz::Offset: std::fmt::Display,
{
  dt.format("%I:%M %P").to_string()
}

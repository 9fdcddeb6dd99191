//! Tabular layout of study records, independent of the PDF backend.

use chrono::NaiveDate;

use swot_core::{
  format::{format_hms, format_hours_minutes, format_time_of_day},
  record::{StudyRecord, StudyType},
  stats,
};

/// Header strings for the report table, in column order.
pub const COLUMNS: [&str; 5] = ["Date", "Subject", "Start", "End", "Duration"];

/// One rendered table row. All fields are display-ready strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
  pub date:     String,
  pub subject:  String,
  pub start:    String,
  pub end:      String,
  pub duration: String,
}

/// Summary printed above the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
  pub sessions:   usize,
  pub total_time: String,
}

/// Lay out `records` as table rows, preserving their order.
pub fn build_rows(records: &[StudyRecord]) -> Vec<ReportRow> {
  records
    .iter()
    .map(|record| ReportRow {
      date:     record.date.format("%d/%m/%Y").to_string(),
      subject:  record.subject.label().to_owned(),
      start:    format_time_of_day(&record.start_time),
      end:      format_time_of_day(&record.end_time),
      duration: format_hms(record.duration_secs),
    })
    .collect()
}

pub fn build_summary(records: &[StudyRecord]) -> ReportSummary {
  ReportSummary {
    sessions:   stats::session_count(records),
    total_time: format_hours_minutes(stats::total_time(records)),
  }
}

/// `{study-type}-report-{YYYY-MM-DD}.pdf`, dated by generation day.
pub fn report_file_name(study_type: StudyType, generated_on: NaiveDate) -> String {
  format!(
    "{}-report-{}.pdf",
    study_type.slug(),
    generated_on.format("%Y-%m-%d")
  )
}

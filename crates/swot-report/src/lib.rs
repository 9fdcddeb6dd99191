//! PDF study reports.
//!
//! Renders a record list into a fixed-layout A4 report: heading, summary
//! lines, and one table row per session. Cell formatting comes from
//! `swot_core::format`, so the PDF matches what the terminal views show.

mod error;
mod pdf;
mod rows;

pub use error::{Error, Result};
pub use pdf::render_report;
pub use rows::{
  build_rows, build_summary, report_file_name, ReportRow, ReportSummary,
  COLUMNS,
};

#[cfg(test)]
mod tests;

//! A4 page layout and PDF rendering.

use std::{fs::File, io::BufWriter, path::Path};

use chrono::NaiveDate;
use printpdf::{
  BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference,
};

use swot_core::record::{StudyRecord, StudyType};

use crate::{
  rows::{build_rows, build_summary, COLUMNS},
  Error, Result,
};

/// Render `records` as a PDF report and write it to `path`.
///
/// The caller filters `records` to one study type; their order is kept.
/// Fails with [`Error::NoRecords`] when the list is empty rather than
/// producing an empty table.
pub fn render_report(
  records:      &[StudyRecord],
  study_type:   StudyType,
  generated_on: NaiveDate,
  path:         &Path,
) -> Result<()> {
  if records.is_empty() {
    return Err(Error::NoRecords);
  }

  // A4 portrait, all positions in millimetres from the bottom-left corner.
  let (doc, first_page, first_layer) = PdfDocument::new(
    format!("{} Report", study_type.label()),
    Mm(210.0),
    Mm(297.0),
    "report",
  );

  let regular = doc
    .add_builtin_font(BuiltinFont::Helvetica)
    .map_err(|e| Error::Pdf(e.to_string()))?;
  let bold = doc
    .add_builtin_font(BuiltinFont::HelveticaBold)
    .map_err(|e| Error::Pdf(e.to_string()))?;

  let mut layer = doc.get_page(first_page).get_layer(first_layer);
  let mut y = 277.0;

  layer.use_text("SWOT", 20.0, Mm(15.0), Mm(y), &bold);
  y -= 10.0;
  layer.use_text(
    format!("{} Report", study_type.label()),
    14.0,
    Mm(15.0),
    Mm(y),
    &regular,
  );
  y -= 8.0;
  layer.use_text(
    format!("Generated on {}", generated_on.format("%d/%m/%Y")),
    10.0,
    Mm(15.0),
    Mm(y),
    &regular,
  );

  let summary = build_summary(records);
  y -= 6.0;
  layer.use_text(
    format!(
      "Sessions: {}   Total time: {}",
      summary.sessions, summary.total_time
    ),
    10.0,
    Mm(15.0),
    Mm(y),
    &regular,
  );

  y -= 12.0;
  draw_cells(&layer, &bold, Mm(y), COLUMNS);
  y -= 7.0;

  for row in build_rows(records) {
    // Start a fresh page, headers included, once the bottom margin is hit.
    if y < 20.0 {
      let (page, layer_index) = doc.add_page(Mm(210.0), Mm(297.0), "report");
      layer = doc.get_page(page).get_layer(layer_index);
      y = 277.0;
      draw_cells(&layer, &bold, Mm(y), COLUMNS);
      y -= 7.0;
    }

    draw_cells(
      &layer,
      &regular,
      Mm(y),
      [
        row.date.as_str(),
        row.subject.as_str(),
        row.start.as_str(),
        row.end.as_str(),
        row.duration.as_str(),
      ],
    );
    y -= 7.0;
  }

  // Closing footer; the count lets a reader spot a truncated print-out.
  y -= 5.0;
  layer.use_text(
    format!("End of report ({} sessions)", summary.sessions),
    9.0,
    Mm(15.0),
    Mm(y),
    &regular,
  );

  let file = File::create(path)?;
  doc
    .save(&mut BufWriter::new(file))
    .map_err(|e| Error::Pdf(e.to_string()))?;
  Ok(())
}

/// Draw one five-cell table line at height `y`.
fn draw_cells(
  layer: &PdfLayerReference,
  font:  &IndirectFontRef,
  y:     Mm,
  cells: [&str; 5],
) {
  for (cell, x) in cells.into_iter().zip([15.0, 55.0, 105.0, 140.0, 175.0]) {
    layer.use_text(cell, 10.0, Mm(x), y, font);
  }
}

//! Spreadsheet export of a lead set.
//!
//! Phones are normalized before rows reach the writer. The writer is a narrow
//! seam: one sheet, a header row of field names, one row per lead.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use rust_xlsxwriter::Workbook;
use tracing::info;

use crate::error::{ExportError, ExportResult};
use crate::lead::{Lead, LEAD_FIELDS};

pub const SHEET_NAME: &str = "Leads";

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

/// Backend that writes rows to a downloadable spreadsheet file.
pub trait SpreadsheetWriter {
    fn write_rows(
        &self,
        path: &Path,
        sheet: &str,
        header: &[&str],
        rows: &[Vec<String>],
    ) -> ExportResult<()>;
}

/// `.xlsx` writer backed by `rust_xlsxwriter`.
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxWriter;

impl SpreadsheetWriter for XlsxWriter {
    fn write_rows(
        &self,
        path: &Path,
        sheet: &str,
        header: &[&str],
        rows: &[Vec<String>],
    ) -> ExportResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet).map_err(writer_error)?;

        for (col, title) in header.iter().enumerate() {
            worksheet
                .write_string(0, col as u16, *title)
                .map_err(writer_error)?;
        }
        for (row_idx, row) in rows.iter().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                worksheet
                    .write_string(row_idx as u32 + 1, col as u16, cell.as_str())
                    .map_err(writer_error)?;
            }
        }

        workbook.save(path).map_err(writer_error)
    }
}

fn writer_error(e: rust_xlsxwriter::XlsxError) -> ExportError {
    ExportError::Writer(Box::new(e))
}

/// `<prefix>_<category>_<location>_Leads.xlsx`, whitespace runs as `_`.
pub fn export_filename(prefix: &str, category: &str, location: &str) -> String {
    format!(
        "{}_{}_{}_Leads.xlsx",
        prefix,
        WHITESPACE_RE.replace_all(category, "_"),
        WHITESPACE_RE.replace_all(location, "_")
    )
}

/// Normalize phones and write `leads` into `dir`. Returns the filename.
///
/// An empty set still produces a sheet with the header row.
pub fn export_leads(
    leads: &[Lead],
    prefix: &str,
    category: &str,
    location: &str,
    dir: &Path,
    writer: &dyn SpreadsheetWriter,
) -> ExportResult<String> {
    let rows: Vec<Vec<String>> = leads.iter().map(|lead| lead.normalized().to_row()).collect();
    let filename = export_filename(prefix, category, location);
    let path = dir.join(&filename);

    writer.write_rows(&path, SHEET_NAME, &LEAD_FIELDS, &rows)?;
    info!(path = %path.display(), rows = rows.len(), "Exported leads");
    Ok(filename)
}

/// Export with the default `JustDial` filename prefix.
pub fn export_to_excel(
    leads: &[Lead],
    category: &str,
    location: &str,
    dir: &Path,
    writer: &dyn SpreadsheetWriter,
) -> ExportResult<String> {
    export_leads(
        leads,
        crate::config::DEFAULT_EXPORT_PREFIX,
        category,
        location,
        dir,
        writer,
    )
}

//! Table readers for CSV and spreadsheet sources.

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;
use tracing::debug;

use crate::table::{Cell, Record, Table};

/// File formats understood by the reader and writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    /// `.xlsx`, `.xlsm`, `.xls` or `.ods`; only `.xlsx` can be written.
    Spreadsheet,
}

impl TableFormat {
    /// Picks the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(TableFormat::Csv),
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(TableFormat::Spreadsheet),
            _ => bail!("unsupported table format for '{}'", path.display()),
        }
    }

    pub fn output_extension(self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Spreadsheet => "xlsx",
        }
    }
}

/// Reads the first sheet (or the whole CSV) into a [`Table`].
///
/// The first row is the header. Column order is preserved and nothing is
/// filtered.
pub fn read_table(path: &Path) -> Result<Table> {
    let table = match TableFormat::from_path(path)? {
        TableFormat::Csv => read_csv(path),
        TableFormat::Spreadsheet => read_spreadsheet(path),
    }
    .with_context(|| format!("failed to read table '{}'", path.display()))?;

    debug!(
        path = %path.display(),
        columns = table.headers.len(),
        records = table.len(),
        "Table loaded"
    );
    Ok(table)
}

fn read_csv(path: &Path) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let headers = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| header_name(i, h))
        .collect();

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        records.push(Record::new(row.iter().map(Cell::from_field).collect()));
    }

    Ok(Table::new(headers, records))
}

fn read_spreadsheet(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => bail!("workbook has no sheets"),
    };

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(row) => row
            .iter()
            .enumerate()
            .map(|(i, c)| header_name(i, &data_to_cell(c).to_string()))
            .collect(),
        None => Vec::new(),
    };

    let records = rows
        .map(|row| Record::new(row.iter().map(data_to_cell).collect()))
        .collect();

    Ok(Table::new(headers, records))
}

/// Blank header cells get the placeholder name spreadsheet tools use.
fn header_name(index: usize, raw: &str) -> String {
    if raw.trim().is_empty() {
        format!("Unnamed: {index}")
    } else {
        raw.to_string()
    }
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        // dates keep their serial number
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
    }
}

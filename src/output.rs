//! Output formatting and persistence for graded tables.
//!
//! Supports CSV and XLSX export, JSON summaries and log output.

use anyhow::{Context, Result, bail};
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tracing::{debug, info};

use crate::parser::TableFormat;
use crate::stats::GradeSummary;
use crate::table::{Cell, Table};

/// Writes `table` to `path`, choosing CSV or XLSX from the extension.
///
/// Blank cells (including absent results and grades) are written empty.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    debug!(path = %path.display(), records = table.len(), "Writing table");

    let written = match TableFormat::from_path(path)? {
        TableFormat::Csv => write_csv(path, table),
        TableFormat::Spreadsheet => {
            let is_xlsx = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));
            if !is_xlsx {
                bail!("spreadsheet output must be .xlsx");
            }
            write_xlsx(path, table)
        }
    };
    written.with_context(|| format!("failed to write table '{}'", path.display()))
}

fn write_csv(path: &Path, table: &Table) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(&table.headers)?;
    for record in &table.records {
        writer.write_record((0..table.headers.len()).map(|i| record.get(i).to_string()))?;
    }
    writer.flush()?;

    Ok(())
}

fn write_xlsx(path: &Path, table: &Table) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, header) in table.headers.iter().enumerate() {
        sheet.write_string(0, u16::try_from(col)?, header)?;
    }

    for (row, record) in table.records.iter().enumerate() {
        let row = u32::try_from(row + 1)?;
        for col in 0..table.headers.len() {
            let c = u16::try_from(col)?;
            match record.get(col) {
                Cell::Empty => {}
                Cell::Text(s) => {
                    sheet.write_string(row, c, s)?;
                }
                Cell::Number(n) => {
                    sheet.write_number(row, c, *n)?;
                }
                Cell::Bool(b) => {
                    sheet.write_boolean(row, c, *b)?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Logs the grade distribution and overall mean.
pub fn print_summary(summary: &GradeSummary) {
    info!(
        category = summary.category_label.as_str(),
        records = summary.records,
        with_result = summary.with_result,
        graded = summary.graded,
        graded_pct = %format!("{:.1}", summary.graded_pct()),
        "Grading summary"
    );
    for c in &summary.counts {
        info!(grade = %c.grade, count = c.count, "Grade count");
    }
    match summary.mean_result {
        Some(mean) => info!(mean = %format!("{mean:.2}"), "Overall mean result"),
        None => info!("No record produced a result"),
    }
}

/// Writes the summary as pretty-printed JSON.
pub fn write_summary_json(path: &Path, summary: &GradeSummary) -> Result<()> {
    let body = serde_json::to_vec_pretty(summary)?;
    std::fs::write(path, body)
        .with_context(|| format!("failed to write summary '{}'", path.display()))?;
    Ok(())
}

use crate::columns::{ColumnPairing, PairingError};
use crate::config::ColumnConfig;
use crate::grading::aggregate::evaluate_records;
use crate::grading::grade::Category;
use crate::output::{print_summary, write_summary_json, write_table};
use crate::parser::{TableFormat, read_table};
use crate::stats::GradeSummary;
use crate::table::{Cell, Table};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Grades every record of `table` in place.
///
/// Builds the column pairing, evaluates each record and writes the results
/// and grade columns named in `config`, overwriting them if present.
///
/// # Errors
///
/// Fails before touching the table when the score and reliability columns
/// cannot be paired.
pub fn grade_table(
    table: &mut Table,
    config: &ColumnConfig,
    category: Category,
    parallel: bool,
) -> Result<GradeSummary, PairingError> {
    let pairing = ColumnPairing::from_headers(&table.headers, config)?;
    info!(
        pairs = pairing.len(),
        records = table.len(),
        category = category.label(),
        "Column pairing established"
    );

    let evaluations = evaluate_records(&table.records, &pairing, category, parallel);

    table.set_column(
        &config.results_column,
        evaluations.iter().map(|e| Cell::from(e.result)),
    );
    table.set_column(
        &config.grade_column,
        evaluations.iter().map(|e| {
            e.grade
                .map_or(Cell::Empty, |g| Cell::Text(g.as_str().to_string()))
        }),
    );

    Ok(GradeSummary::from_evaluations(category, &evaluations))
}

/// Default output file: `VEGA_<label>_处理结果.<ext>` beside the input.
pub fn default_output_path(input: &Path, category: Category) -> Result<PathBuf> {
    let ext = TableFormat::from_path(input)?.output_extension();
    let name = format!("VEGA_{}_处理结果.{}", category.label(), ext);
    Ok(input
        .parent()
        .map_or_else(|| PathBuf::from(&name), |dir| dir.join(&name)))
}

/// Options for a single file-to-file grading run.
#[derive(Debug)]
pub struct RunOptions<'a> {
    pub input: &'a Path,
    pub output: Option<&'a Path>,
    pub summary_json: Option<&'a Path>,
    pub category: Category,
    pub config: &'a ColumnConfig,
    pub parallel: bool,
}

/// Reads the input table, grades it, writes the augmented table and the
/// optional JSON summary. Returns the summary.
#[tracing::instrument(skip_all, fields(input = %opts.input.display(), category = opts.category.label()))]
pub fn run(opts: &RunOptions<'_>) -> Result<GradeSummary> {
    let mut table = read_table(opts.input)?;

    let summary = grade_table(&mut table, opts.config, opts.category, opts.parallel)?;

    let output = match opts.output {
        Some(path) => path.to_path_buf(),
        None => default_output_path(opts.input, opts.category)?,
    };
    write_table(&output, &table)?;
    info!(output = %output.display(), "Graded table written");

    print_summary(&summary);
    if let Some(path) = opts.summary_json {
        write_summary_json(path, &summary)?;
        info!(path = %path.display(), "Summary written");
    }

    Ok(summary)
}

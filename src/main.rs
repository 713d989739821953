//! CLI entry point for the VEGA grader.
//!
//! Provides subcommands for grading a table, inspecting its score/reliability
//! column pairing, and printing the grading rubric of a category.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use vega_grader::{
    columns::ColumnPairing,
    config::ColumnConfig,
    grading::analyzer::{RunOptions, run},
    grading::grade::Category,
    parser::read_table,
};

#[derive(Parser)]
#[command(name = "vega_grader")]
#[command(about = "Reduce paired score/reliability columns to a graded result", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade every record of a CSV or spreadsheet file
    Grade {
        /// Input table (.csv, .xlsx, .xls, .ods)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Threshold scheme: a (I类, two-tier) or b (II类, three-tier)
        #[arg(short, long, value_enum, default_value_t = Category::A)]
        category: Category,

        /// Output table (.csv or .xlsx); defaults to VEGA_<category>_处理结果 beside the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Optional: write the grade summary as JSON
        #[arg(long)]
        summary_json: Option<PathBuf>,

        /// Optional: JSON file overriding column markers and output column names
        #[arg(long)]
        config: Option<String>,

        /// Evaluate records on the current thread only
        #[arg(long, default_value_t = false)]
        sequential: bool,
    },
    /// Show the score/reliability column pairing discovered in a table
    Columns {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(long)]
        config: Option<String>,
    },
    /// Print the grading thresholds of a category
    Thresholds {
        #[arg(short, long, value_enum, default_value_t = Category::A)]
        category: Category,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/vega_grader.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("vega_grader.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Grade {
            input,
            category,
            output,
            summary_json,
            config,
            sequential,
        } => {
            let config = ColumnConfig::load_or_default(config.as_deref())?;
            run(&RunOptions {
                input: &input,
                output: output.as_deref(),
                summary_json: summary_json.as_deref(),
                category,
                config: &config,
                parallel: !sequential,
            })?;
        }
        Commands::Columns { input, config } => {
            let config = ColumnConfig::load_or_default(config.as_deref())?;
            let table = read_table(&input)?;
            let pairing = ColumnPairing::from_headers(&table.headers, &config)?;

            for (i, pair) in pairing.pairs().iter().enumerate() {
                info!(
                    pair = i,
                    score = %pair.score,
                    reliability = %pair.reliability,
                    "Column pair"
                );
            }

            let ignored = table
                .headers
                .iter()
                .enumerate()
                .filter(|(i, _)| {
                    !pairing
                        .pairs()
                        .iter()
                        .any(|p| p.score_index == *i || p.reliability_index == *i)
                })
                .count();
            info!(
                pairs = pairing.len(),
                ignored,
                records = table.len(),
                "Column pairing summary"
            );
        }
        Commands::Thresholds { category } => {
            println!("{}", category.label());
            print!("{}", category.thresholds());
        }
    }

    Ok(())
}

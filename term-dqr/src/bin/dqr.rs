//! dqr: data quality report for CSV, Parquet and JSON files.
//!
//! Loads the inputs into one dataset, prints the continuous and categorical tables and writes
//! them as CSV files.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use term_dqr::logging::setup::{init_logging, LoggingConfig};
use term_dqr::sources::{
    expand_globs, is_glob, CsvOptions, CsvSource, DataSource, JsonSource, ParquetSource,
};
use term_dqr::{DataQualityReport, ModeTieBreak, ReportConfig};
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input files or glob patterns
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Input format (detected from the file extension when omitted)
    #[arg(long, value_enum)]
    format: Option<InputFormat>,

    /// CSV field delimiter
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// CSV input has no header row
    #[arg(long)]
    no_header: bool,

    /// Destination of the continuous table
    #[arg(long)]
    continuous_out: Option<PathBuf>,

    /// Destination of the categorical table
    #[arg(long)]
    categorical_out: Option<PathBuf>,

    /// Skip writing the CSV tables
    #[arg(long)]
    no_export: bool,

    /// How to print the report to stdout
    #[arg(long, value_enum, default_value_t = PrintMode::Table)]
    print: PrintMode,

    /// Rule for breaking mode frequency ties
    #[arg(long, value_enum, default_value_t = TieBreak::FirstOccurrence)]
    tie_break: TieBreak,

    /// Log level for report components
    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    Csv,
    Parquet,
    Json,
}

impl InputFormat {
    fn detect(path: &str) -> Option<Self> {
        let extension = Path::new(path).extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "csv" | "tsv" | "txt" => Some(Self::Csv),
            "parquet" | "pq" => Some(Self::Parquet),
            "json" | "jsonl" | "ndjson" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PrintMode {
    Table,
    Json,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TieBreak {
    FirstOccurrence,
    Lexicographic,
}

impl From<TieBreak> for ModeTieBreak {
    fn from(value: TieBreak) -> Self {
        match value {
            TieBreak::FirstOccurrence => ModeTieBreak::FirstOccurrence,
            TieBreak::Lexicographic => ModeTieBreak::Lexicographic,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let logging = LoggingConfig::default()
        .with_report_level(args.log_level)
        .with_json_format(args.log_json);
    init_logging(logging).map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))?;

    let source = build_source(&args).await?;
    info!(source = %source.description(), "Loading dataset");
    let dataset = source
        .load()
        .await
        .with_context(|| format!("failed to load {}", source.description()))?;

    let config = build_config(&args)?;
    let report = DataQualityReport::generate_with_config(&dataset, &config)?;

    match args.print {
        PrintMode::Table => println!("{}", report.pretty()?),
        PrintMode::Json => println!("{}", report.to_json()?),
        PrintMode::None => {}
    }

    if !args.no_export {
        report.export(None, None)?;
    }
    Ok(())
}

async fn build_source(args: &Args) -> Result<Box<dyn DataSource>> {
    let paths = if args.inputs.iter().any(|input| is_glob(input)) {
        expand_globs(&args.inputs).await?
    } else {
        args.inputs.clone()
    };

    let format = match args.format {
        Some(format) => format,
        None => match InputFormat::detect(&paths[0]) {
            Some(format) => format,
            None => bail!("cannot detect the format of '{}', pass --format", paths[0]),
        },
    };

    let source: Box<dyn DataSource> = match format {
        InputFormat::Csv => {
            let options = CsvOptions {
                has_header: !args.no_header,
                delimiter: delimiter_byte(args.delimiter)?,
                ..Default::default()
            };
            Box::new(CsvSource::from_paths(paths)?.with_custom_options(options))
        }
        InputFormat::Parquet => Box::new(ParquetSource::from_paths(paths)?),
        InputFormat::Json => Box::new(JsonSource::from_paths(paths)?),
    };
    Ok(source)
}

fn build_config(args: &Args) -> Result<ReportConfig> {
    let mut builder = ReportConfig::builder().tie_break(args.tie_break.into());
    if let Some(path) = &args.continuous_out {
        builder = builder.continuous_path(path);
    }
    if let Some(path) = &args.categorical_out {
        builder = builder.categorical_path(path);
    }
    Ok(builder.build()?)
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("delimiter must be a single ASCII character, got '{delimiter}'");
    }
    Ok(delimiter as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format_from_extension() {
        assert_eq!(InputFormat::detect("people.csv"), Some(InputFormat::Csv));
        assert_eq!(InputFormat::detect("data/people.TSV"), Some(InputFormat::Csv));
        assert_eq!(InputFormat::detect("events.ndjson"), Some(InputFormat::Json));
        assert_eq!(InputFormat::detect("events.jsonl"), Some(InputFormat::Json));
        assert_eq!(InputFormat::detect("part-0.parquet"), Some(InputFormat::Parquet));
        assert_eq!(InputFormat::detect("archive.zip"), None);
        assert_eq!(InputFormat::detect("README"), None);
    }

    #[test]
    fn test_delimiter_must_be_ascii() {
        assert_eq!(delimiter_byte(',').unwrap(), b',');
        assert_eq!(delimiter_byte('\t').unwrap(), b'\t');
        assert!(delimiter_byte('§').is_err());
    }

    #[tokio::test]
    async fn test_unknown_extension_needs_format_flag() {
        let args = Args::try_parse_from(["dqr", "dump.bin"]).unwrap();
        let err = build_source(&args).await.unwrap_err();
        assert!(err.to_string().contains("--format"));

        let args = Args::try_parse_from(["dqr", "dump.bin", "--format", "csv", "--delimiter", "§"])
            .unwrap();
        let err = build_source(&args).await.unwrap_err();
        assert!(err.to_string().contains("ASCII"));
    }
}

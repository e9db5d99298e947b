//! Extract table rows from a fragment dump
//!
//! Reads pages of positioned text (see `pdf_tabular::pipeline::source`) and
//! prints one JSON object per reconstructed row:
//! `{"page": 1, "record": {"last_name": "Smith", ...}}`.
//!
//! Usage:
//!   cargo run --release --bin pdf_tabular -- --labels "Last Name,First Name" --input dump.json
//!   some-layout-dumper statement.pdf | cargo run --release --bin pdf_tabular -- --labels "Date,Amount" --skip-missing

use pdf_tabular::layout::Orientation;
use pdf_tabular::record::RecordBuilder;
use pdf_tabular::text::TextNormalization;
use pdf_tabular::{Error, FragmentDump, Result, TableConfig, TableExtractor};
use serde::Serialize;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

struct CliConfig {
    labels: Vec<String>,
    input: Option<PathBuf>,
    table: TableConfig,
    orientation: Orientation,
    skip_missing: bool,
}

impl CliConfig {
    fn from_args() -> std::result::Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut labels = Vec::new();
        let mut input = None;
        let mut table = TableConfig::default();
        let mut normalization = TextNormalization::default();
        let mut orientation = Orientation::Rows;
        let mut skip_missing = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--labels" | "-l" => {
                    i += 1;
                    let value = args.get(i).ok_or("--labels needs a value")?;
                    labels.extend(
                        value
                            .split(',')
                            .map(str::trim)
                            .filter(|l| !l.is_empty())
                            .map(String::from),
                    );
                },
                "--input" | "-i" => {
                    i += 1;
                    input = Some(PathBuf::from(args.get(i).ok_or("--input needs a path")?));
                },
                "--right-boundary" => {
                    i += 1;
                    table = table.with_right_boundary(parse_number(&args, i, "--right-boundary")?);
                },
                "--header-tolerance" => {
                    i += 1;
                    table = table.with_header_tolerance(parse_number(&args, i, "--header-tolerance")?);
                },
                "--row-tolerance" => {
                    i += 1;
                    table = table.with_vertical_tolerance(parse_number(&args, i, "--row-tolerance")?);
                },
                "--case-insensitive" => {
                    normalization = normalization.with_case_insensitive(true);
                },
                "--collapse-whitespace" => {
                    normalization = normalization.with_collapse_whitespace(true);
                },
                "--no-merge" => {
                    table = table.with_merge_overlapping_rows(false);
                },
                "--columns" => {
                    orientation = Orientation::Columns;
                },
                "--skip-missing" => {
                    skip_missing = true;
                },
                other => return Err(format!("unknown argument: {}", other)),
            }
            i += 1;
        }

        if labels.is_empty() {
            return Err("at least one header label is required (--labels)".to_string());
        }

        Ok(Self {
            labels,
            input,
            table: table.with_text_normalization(normalization),
            orientation,
            skip_missing,
        })
    }
}

fn parse_number(args: &[String], i: usize, flag: &str) -> std::result::Result<f32, String> {
    let raw = args.get(i).ok_or_else(|| format!("{} needs a value", flag))?;
    raw.parse::<f32>()
        .map_err(|e| format!("{}: invalid number {:?}: {}", flag, raw, e))
}

/// One output line; the record sits under its own key so no column name can
/// collide with the page number.
#[derive(Serialize)]
struct PageRecord {
    page: usize,
    record: serde_json::Map<String, serde_json::Value>,
}

fn run(config: CliConfig) -> Result<usize> {
    let dump = match &config.input {
        Some(path) => FragmentDump::open(path)?,
        None => FragmentDump::from_reader(io::stdin().lock())?,
    };
    log::info!("Extracting {} pages", dump.page_count());

    let extractor = TableExtractor::new(config.labels.iter().map(String::as_str))
        .with_config(config.table)
        .with_orientation(config.orientation);
    let records = RecordBuilder::new();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut written = 0;

    for (page_index, outcome) in extractor.extract_pages(dump).enumerate() {
        let page = match outcome {
            Ok(page) => page,
            Err(Error::NoMatchFound { .. }) if config.skip_missing => {
                log::info!("Page {}: header not found, skipped", page_index + 1);
                continue;
            },
            Err(e) => return Err(e),
        };

        for row in &page.rows {
            let line = PageRecord {
                page: page.page_index + 1,
                record: records.build(row),
            };
            serde_json::to_writer(&mut out, &line)?;
            out.write_all(b"\n")?;
            written += 1;
        }
    }

    out.flush()?;
    Ok(written)
}

fn main() {
    env_logger::init();

    let config = match CliConfig::from_args() {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            eprintln!(
                "Usage: pdf_tabular --labels \"A,B\" [--input dump.json] [--right-boundary N] \
                 [--header-tolerance N] [--row-tolerance N] [--case-insensitive] \
                 [--collapse-whitespace] [--no-merge] [--columns] [--skip-missing]"
            );
            std::process::exit(2);
        },
    };

    match run(config) {
        Ok(rows) => log::info!("Wrote {} rows", rows),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        },
    }
}

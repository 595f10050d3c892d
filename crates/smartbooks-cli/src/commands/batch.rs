//! Batch processing command for multiple OCR text dumps.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error};

use smartbooks_core::{ExtractionResult, Field, InvoiceExtractor, InvoiceSink, RuleExtractor};

use crate::sink::JsonlSink;

use super::process::{format_record, load_config, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV in the output directory
    #[arg(long)]
    summary: bool,

    /// Append audit and structured records to a JSONL sink directory
    #[arg(long)]
    save: Option<PathBuf>,

    /// Continue when a file cannot be read
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    result: ExtractionResult,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let extractor = RuleExtractor::new().with_config(config);

    let paths: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|entry| entry.ok())
        .filter(|p| p.is_file())
        .collect();

    if paths.is_empty() {
        anyhow::bail!("No files matched: {}", args.input);
    }

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir)?;
    }

    let mut sink = match &args.save {
        Some(dir) => Some(JsonlSink::new(dir)?),
        None => None,
    };

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let mut results: Vec<FileResult> = Vec::new();
    let mut failed = 0usize;

    for path in paths {
        pb.set_message(path.display().to_string());

        let raw_text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                error!("failed to read {}: {}", path.display(), e);
                failed += 1;
                pb.inc(1);
                if args.continue_on_error {
                    continue;
                }
                anyhow::bail!("failed to read {}: {}", path.display(), e);
            }
        };

        let result = extractor.extract_from_text(&raw_text);
        debug!(
            "extracted {} fields from {}",
            result.record.len(),
            path.display()
        );

        if let Some(sink) = sink.as_mut() {
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            sink.store_raw(&filename, &result.raw_text)?;
            sink.store_record(&result.record.to_row())?;
        }

        if let Some(dir) = &args.output_dir {
            let extension = match args.format {
                OutputFormat::Json => "json",
                OutputFormat::Csv => "csv",
                OutputFormat::Text => "txt",
            };
            let out_path = dir
                .join(path.file_stem().unwrap_or_default())
                .with_extension(extension);
            fs::write(&out_path, format_record(&result, args.format)?)?;
        }

        results.push(FileResult { path, result });
        pb.inc(1);
    }

    pb.finish_and_clear();

    if args.summary {
        let dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let summary_path = dir.join("summary.csv");
        write_summary(&summary_path, &results)?;
        println!(
            "{} {}",
            style("Summary written to").green(),
            summary_path.display()
        );
    }

    println!(
        "{} {} file(s), {} failed, in {:.1}s",
        style("Processed").green(),
        results.len(),
        failed,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// One summary row per file: filename plus the fixed column set.
fn write_summary(path: &PathBuf, results: &[FileResult]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec!["file"];
    header.extend(Field::ALL.iter().map(|f| f.as_str()));
    writer.write_record(&header)?;

    for file_result in results {
        let mut record = vec![file_result.path.display().to_string()];
        for field in Field::ALL {
            record.push(
                file_result
                    .result
                    .record
                    .get(field)
                    .map(|v| v.to_display())
                    .unwrap_or_default(),
            );
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

//! Process command - extract data from a single OCR text dump.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use smartbooks_core::{
    ExtractionConfig, ExtractionResult, Field, InvoiceExtractor, InvoiceSink, RuleExtractor,
};

use crate::sink::JsonlSink;

/// Fields the dashboard never shows as blank; they get an explicit
/// placeholder after extraction. This is presentation only - the record
/// and the persisted row keep the field absent.
const DEFAULTED_FIELDS: [Field; 2] = [Field::ClientName, Field::BankName];

const PLACEHOLDER: &str = "Not Detected";

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (raw OCR text, one recognized line per line)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Append audit and structured records to a JSONL sink directory
    #[arg(long)]
    save: Option<PathBuf>,

    /// Print normalization warnings
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output (fixed column set)
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let raw_text = fs::read_to_string(&args.input)?;
    let extractor = RuleExtractor::new().with_config(config);
    let result = extractor.extract_from_text(&raw_text);

    if args.show_warnings && !result.warnings.is_empty() {
        eprintln!("{}", style("Warnings:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    if let Some(dir) = &args.save {
        let filename = args
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut sink = JsonlSink::new(dir)?;
        sink.store_raw(&filename, &result.raw_text)?;
        sink.store_record(&result.record.to_row())?;
        info!("Saved audit and structured records to {}", dir.display());
    }

    let output = format_record(&result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {}",
            style("Wrote").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ExtractionConfig> {
    match config_path {
        Some(path) => Ok(ExtractionConfig::from_file(std::path::Path::new(path))?),
        None => Ok(ExtractionConfig::default()),
    }
}

/// Render the extraction result in the requested format.
pub fn format_record(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&result.record)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(Field::ALL.iter().map(|f| f.as_str()))?;
            let row = result.record.to_row();
            let values = [
                row.invoice_number,
                row.invoice_date,
                row.due_date,
                row.client_name,
                row.client_address_line1,
                row.client_address_line2,
                row.vat_number,
                row.reg_number,
                row.bank_name,
                row.account_number,
                row.sub_total,
                row.tax_percent,
                row.tax_amount,
                row.total_amount,
                row.balance_due,
                row.status,
            ];
            writer.write_record(values.iter().map(|v| v.as_deref().unwrap_or("")))?;
            let data = writer
                .into_inner()
                .map_err(|e| anyhow::anyhow!("csv writer error: {}", e))?;
            Ok(String::from_utf8(data)?)
        }
        OutputFormat::Text => {
            let mut lines = Vec::new();
            for field in Field::ALL {
                let value = result.record.get(field).map(|v| v.to_display());
                let value = match value {
                    Some(v) => v,
                    None if DEFAULTED_FIELDS.contains(&field) => PLACEHOLDER.to_string(),
                    None => continue,
                };
                lines.push(format!("{:<22} {}", field.as_str(), value));
            }
            if lines.is_empty() {
                lines.push("(no fields extracted)".to_string());
            }
            Ok(lines.join("\n"))
        }
    }
}

//! JSONL file sink, mirroring the raw and structured invoice tables.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use smartbooks_core::{InvoiceRow, InvoiceSink, SinkError};

/// One audit line in `raw_invoices.jsonl`.
#[derive(Serialize)]
struct RawRecord<'a> {
    filename: &'a str,
    raw_text: &'a str,
}

/// Appends audit records and structured rows to two JSONL files in a
/// directory, one line per invoice.
pub struct JsonlSink {
    raw_path: PathBuf,
    structured_path: PathBuf,
}

impl JsonlSink {
    /// Open (creating if needed) a sink rooted at `dir`.
    pub fn new(dir: &Path) -> Result<Self, SinkError> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            raw_path: dir.join("raw_invoices.jsonl"),
            structured_path: dir.join("structured_invoices.jsonl"),
        })
    }

    fn append(path: &Path, line: &str) -> Result<(), SinkError> {
        let mut file: File = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}

impl InvoiceSink for JsonlSink {
    fn store_raw(&mut self, filename: &str, raw_text: &str) -> Result<(), SinkError> {
        let line = serde_json::to_string(&RawRecord { filename, raw_text })?;
        Self::append(&self.raw_path, &line)
    }

    fn store_record(&mut self, row: &InvoiceRow) -> Result<(), SinkError> {
        let line = serde_json::to_string(row)?;
        Self::append(&self.structured_path, &line)
    }
}

//! Persistence sink seam.
//!
//! The sink stores two things per processed invoice, mirroring the raw and
//! structured tables of the backing store: an opaque audit record
//! (filename plus raw OCR text) and the structured row with its fixed
//! column set. Columns the extractor did not produce arrive as explicit
//! nulls in the row; the sink never fabricates values.

use crate::error::SinkError;
use crate::models::record::InvoiceRow;

/// Destination for processed invoices.
pub trait InvoiceSink {
    /// Store the raw OCR text as an audit record.
    fn store_raw(&mut self, filename: &str, raw_text: &str) -> Result<(), SinkError>;

    /// Store the structured row.
    fn store_record(&mut self, row: &InvoiceRow) -> Result<(), SinkError>;
}

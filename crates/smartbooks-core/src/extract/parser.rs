//! Rule-based extractor assembling the final invoice record.

use std::time::Instant;

use tracing::{debug, info};

use crate::document::RawDocument;
use crate::models::config::ExtractionConfig;
use crate::models::record::{Field, InvoiceRecord};
use crate::normalize::normalize;

use super::amounts::extract_amounts;
use super::dates::extract_dates;
use super::parties::{extract_banking, extract_client_block, extract_registration};
use super::patterns::INVOICE_NUMBER;
use super::status::extract_status;
use super::{InvoiceExtractor, RawCaptures};

/// Result of extracting one document.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// The normalized field mapping.
    pub record: InvoiceRecord,
    /// The raw OCR text, kept for the audit record.
    pub raw_text: String,
    /// Fields whose capture was dropped during normalization.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Rule-based field extractor for the scanned invoice layout family.
///
/// Stateless apart from its configuration; each call is an independent
/// single pass over the document.
#[derive(Debug, Clone, Default)]
pub struct RuleExtractor {
    config: ExtractionConfig,
}

impl RuleExtractor {
    /// Create an extractor with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the extraction configuration.
    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    fn capture_invoice_number(&self, doc: &RawDocument) -> Option<String> {
        for line in doc.lines() {
            if let Some(caps) = INVOICE_NUMBER.captures(line) {
                return Some(caps[1].to_string());
            }
        }
        None
    }
}

impl InvoiceExtractor for RuleExtractor {
    fn capture(&self, doc: &RawDocument) -> RawCaptures {
        let mut captures = RawCaptures::new();
        let mut put = |field: Field, value: Option<String>| {
            if let Some(v) = value {
                captures.entry(field).or_insert(v);
            }
        };

        put(Field::InvoiceNumber, self.capture_invoice_number(doc));

        let dates = extract_dates(doc);
        put(Field::InvoiceDate, dates.invoice_date);
        put(Field::DueDate, dates.due_date);

        let client = extract_client_block(doc, &self.config);
        put(Field::ClientName, client.name);
        put(Field::ClientAddressLine1, client.address_line1);
        put(Field::ClientAddressLine2, client.address_line2);

        let registration = extract_registration(doc);
        put(Field::VatNumber, registration.vat_number);
        put(Field::RegNumber, registration.reg_number);

        let banking = extract_banking(doc);
        put(Field::BankName, banking.bank_name);
        put(Field::AccountNumber, banking.account_number);

        let amounts = extract_amounts(doc);
        put(Field::SubTotal, amounts.sub_total);
        put(Field::TaxAmount, amounts.tax_amount);
        put(Field::TotalAmount, amounts.total);
        put(Field::BalanceDue, amounts.balance_due);
        put(Field::TaxPercent, amounts.tax_percent);

        put(Field::Status, extract_status(doc));

        captures
    }

    fn extract(&self, doc: &RawDocument) -> ExtractionResult {
        let start = Instant::now();
        let mut record = InvoiceRecord::new();
        let mut warnings = Vec::new();

        if doc.is_blank() {
            debug!("blank document, returning empty record");
            return ExtractionResult {
                record,
                raw_text: doc.text(),
                warnings,
                processing_time_ms: start.elapsed().as_millis() as u64,
            };
        }

        let captures = self.capture(doc);
        for (field, raw) in captures {
            match normalize(field.kind(), &raw) {
                Some(value) => {
                    record.insert(field, value);
                }
                None => {
                    debug!(field = field.as_str(), raw = %raw, "dropped unnormalizable capture");
                    warnings.push(format!("could not normalize {}: {:?}", field, raw));
                }
            }
        }

        info!(
            fields = record.len(),
            warnings = warnings.len(),
            "extracted invoice record"
        );

        ExtractionResult {
            record,
            raw_text: doc.text(),
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(text: &str) -> InvoiceRecord {
        RuleExtractor::new().extract_from_text(text).record
    }

    fn display(record: &InvoiceRecord, field: Field) -> Option<String> {
        record.get(field).map(|v| v.to_display())
    }

    #[test]
    fn test_end_to_end_scenario() {
        let record = extract("Invoice #INV-2024-001\nInvoice Date: March 3, 2024\nTotal: R1,500.00\nUNPAID");

        assert_eq!(
            display(&record, Field::InvoiceNumber).as_deref(),
            Some("INV-2024-001")
        );
        assert_eq!(
            display(&record, Field::InvoiceDate).as_deref(),
            Some("2024-03-03")
        );
        assert_eq!(
            display(&record, Field::TotalAmount).as_deref(),
            Some("1500.00")
        );
        assert_eq!(display(&record, Field::Status).as_deref(), Some("UNPAID"));
        assert_eq!(record.len(), 4);
    }

    #[test]
    fn test_empty_input_yields_empty_record() {
        assert!(extract("").is_empty());
        assert!(extract("   \n\t\n  ").is_empty());
    }

    #[test]
    fn test_idempotent() {
        let text = "Invoice #7\nSub Total: 9.99\nTotal: 11.49\nPAID";
        let extractor = RuleExtractor::new();
        let first = extractor.extract_from_text(text).record;
        let second = extractor.extract_from_text(text).record;
        assert_eq!(first, second);
    }

    #[test]
    fn test_client_block_scenario() {
        let record = extract("Invoiced To\nAcme Corp\n123 Main St\nSuite 4");
        assert_eq!(
            display(&record, Field::ClientName).as_deref(),
            Some("Acme Corp")
        );
        assert_eq!(
            display(&record, Field::ClientAddressLine1).as_deref(),
            Some("123 Main St")
        );
        assert_eq!(
            display(&record, Field::ClientAddressLine2).as_deref(),
            Some("Suite 4")
        );
    }

    #[test]
    fn test_missing_vat_number_is_omitted() {
        let record = extract("Invoice #1\nTotal: 10.00");
        assert!(!record.contains(Field::VatNumber));
    }

    #[test]
    fn test_unparseable_date_is_dropped_with_warning() {
        let result =
            RuleExtractor::new().extract_from_text("Invoice Date: sometime soon\nTotal: 5.00");
        assert!(!result.record.contains(Field::InvoiceDate));
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("invoice_date")));
    }

    #[test]
    fn test_full_layout() {
        let text = "\
INVOICE
Invoice #2023-0042
Invoice Date: 21 August 2023
Due Date: 04/09/2023
Invoiced To
Acme Trading (Pty) Ltd
123 Main Street
Cape Town 8001
VAT Number: 4820187654
Reg Number: 2017/123456/07
Bank: First National Bank
Account Number: 62345678901
Sub Total: R1,304.35
Tax (15.00% SA): R195.65
Total: R1,500.00
Balance Due: R1,500.00
UNPAID";

        let record = extract(text);

        assert_eq!(
            display(&record, Field::InvoiceNumber).as_deref(),
            Some("2023-0042")
        );
        assert_eq!(
            display(&record, Field::InvoiceDate).as_deref(),
            Some("2023-08-21")
        );
        assert_eq!(
            display(&record, Field::DueDate).as_deref(),
            Some("2023-09-04")
        );
        assert_eq!(
            display(&record, Field::ClientName).as_deref(),
            Some("Acme Trading (Pty) Ltd")
        );
        assert_eq!(
            display(&record, Field::ClientAddressLine1).as_deref(),
            Some("123 Main Street")
        );
        assert_eq!(
            display(&record, Field::ClientAddressLine2).as_deref(),
            Some("Cape Town 8001")
        );
        assert_eq!(
            display(&record, Field::VatNumber).as_deref(),
            Some("4820187654")
        );
        assert_eq!(
            display(&record, Field::RegNumber).as_deref(),
            Some("2017/123456/07")
        );
        assert_eq!(
            display(&record, Field::BankName).as_deref(),
            Some("First National Bank")
        );
        assert_eq!(
            display(&record, Field::AccountNumber).as_deref(),
            Some("62345678901")
        );
        assert_eq!(
            display(&record, Field::SubTotal).as_deref(),
            Some("1304.35")
        );
        assert_eq!(
            display(&record, Field::TaxPercent).as_deref(),
            Some("15.00")
        );
        assert_eq!(
            display(&record, Field::TaxAmount).as_deref(),
            Some("195.65")
        );
        assert_eq!(
            display(&record, Field::TotalAmount).as_deref(),
            Some("1500.00")
        );
        assert_eq!(
            display(&record, Field::BalanceDue).as_deref(),
            Some("1500.00")
        );
        assert_eq!(display(&record, Field::Status).as_deref(), Some("UNPAID"));
    }
}

//! Common regex patterns for invoice field extraction.
//!
//! Labels are matched case-insensitively; the jurisdiction marker next to
//! the tax percentage is a known fixed token and is matched exactly.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // "Invoice #INV-2024-001", "Invoice No: 12345", "Invoice Number INV-7"
    // The captured token must contain a digit so that "Invoice Date" lines
    // are not mistaken for an invoice number.
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?i)\binvoice\s*(?:number|no\.?)?\s*[#:]?\s*([A-Za-z0-9\-]*\d[A-Za-z0-9\-]*)"
    ).unwrap();

    // Labeled dates; the value may sit on the same line or the next one
    pub static ref INVOICE_DATE_LABEL: Regex = Regex::new(
        r"(?i)\binvoice\s+date\b[\s:]*(.*)"
    ).unwrap();

    pub static ref DUE_DATE_LABEL: Regex = Regex::new(
        r"(?i)\bdue\s+date\b[\s:]*(.*)"
    ).unwrap();

    // Client block anchor; OCR sometimes merges the two words
    pub static ref INVOICED_TO: Regex = Regex::new(
        r"(?i)\binvoiced\s*to\b[\s:]*(.*)"
    ).unwrap();

    // Registration identifiers
    pub static ref VAT_NUMBER: Regex = Regex::new(
        r"(?i)\bvat\s*(?:number|no\.?)\b[\s:]*([A-Za-z0-9/\-]+)"
    ).unwrap();

    pub static ref REG_NUMBER: Regex = Regex::new(
        r"(?i)\breg(?:istration)?\.?\s*(?:number|no\.?)\b[\s:]*([A-Za-z0-9/\-]+)"
    ).unwrap();

    // Banking details
    pub static ref BANK_NAME: Regex = Regex::new(
        r"(?i)\bbank(?:\s+name)?\b[\s:]*(.+)"
    ).unwrap();

    pub static ref ACCOUNT_NUMBER: Regex = Regex::new(
        r"(?i)\baccount\s*(?:number|no\.?)?\b[\s:]*(\d+)"
    ).unwrap();

    // Money line labels, matched per line so that "Total" never swallows a
    // "Sub Total" line
    pub static ref SUB_TOTAL_LABEL: Regex = Regex::new(
        r"(?i)\bsub\s*total\b"
    ).unwrap();

    pub static ref TOTAL_LABEL: Regex = Regex::new(
        r"(?i)\btotal\b"
    ).unwrap();

    pub static ref BALANCE_DUE_LABEL: Regex = Regex::new(
        r"(?i)\bbalance\s+due\b"
    ).unwrap();

    pub static ref TAX_LABEL: Regex = Regex::new(
        r"(?i)\b(?:tax|vat)\b"
    ).unwrap();

    // "VAT Number" / "Tax No" lines must not be read as tax amounts
    pub static ref TAX_ID_LINE: Regex = Regex::new(
        r"(?i)\b(?:tax|vat)\s*(?:number|no\.?|reg)"
    ).unwrap();

    // Numeric money token with optional thousands separators and decimals
    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"(\d{1,3}(?:,\d{3})+(?:\.\d{1,2})?|\d+(?:\.\d{1,2})?)"
    ).unwrap();

    // "15.00% SA" - percent token adjacent to the jurisdiction marker,
    // which is a fixed token and matched case-sensitively
    pub static ref TAX_PERCENT: Regex = Regex::new(
        r"(\d{1,2}(?:\.\d{1,2})?)\s*%\s*SA\b"
    ).unwrap();

    // Payment status tokens; UNPAID takes precedence over PAID
    pub static ref UNPAID: Regex = Regex::new(r"(?i)\bunpaid\b").unwrap();
    pub static ref PAID: Regex = Regex::new(r"(?i)\bpaid\b").unwrap();

    // Any known label; used to stop positional block capture early
    pub static ref ANY_LABEL: Regex = Regex::new(
        r"(?i)\b(?:invoice|invoiced\s*to|due\s+date|vat\s*(?:number|no)|reg(?:istration)?\.?\s*(?:number|no)|bank|account\s*(?:number|no)|sub\s*total|total|balance\s+due|unpaid|paid)\b"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_number_requires_digit() {
        let caps = INVOICE_NUMBER.captures("Invoice #INV-2024-001").unwrap();
        assert_eq!(&caps[1], "INV-2024-001");

        // A date label after "Invoice" is not a number token
        assert!(INVOICE_NUMBER.captures("Invoice Date: March 3").is_none());
    }

    #[test]
    fn test_invoice_number_label_variants() {
        let caps = INVOICE_NUMBER.captures("Invoice No: 12345").unwrap();
        assert_eq!(&caps[1], "12345");

        let caps = INVOICE_NUMBER.captures("invoice number 2023-17").unwrap();
        assert_eq!(&caps[1], "2023-17");
    }

    #[test]
    fn test_tax_percent_marker_is_case_sensitive() {
        let caps = TAX_PERCENT.captures("15.00% SA").unwrap();
        assert_eq!(&caps[1], "15.00");
        assert!(TAX_PERCENT.captures("15.00% sa").is_none());
    }

    #[test]
    fn test_paid_does_not_match_inside_unpaid() {
        assert!(!PAID.is_match("UNPAID"));
        assert!(UNPAID.is_match("Status: unpaid"));
    }

    #[test]
    fn test_amount_token_shapes() {
        assert_eq!(&AMOUNT_TOKEN.captures("R1,500.00").unwrap()[1], "1,500.00");
        assert_eq!(&AMOUNT_TOKEN.captures("$42").unwrap()[1], "42");
        assert_eq!(&AMOUNT_TOKEN.captures("1234.5").unwrap()[1], "1234.5");
    }
}

//! Raw capture of labeled money amounts and the tax percentage.

use regex::Regex;

use crate::document::RawDocument;

use super::patterns::{
    AMOUNT_TOKEN, BALANCE_DUE_LABEL, SUB_TOTAL_LABEL, TAX_ID_LINE, TAX_LABEL, TAX_PERCENT,
    TOTAL_LABEL,
};

/// Raw amount captures, commas and all; the normalizer strips separators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentAmounts {
    pub sub_total: Option<String>,
    pub tax_amount: Option<String>,
    pub total: Option<String>,
    pub balance_due: Option<String>,
    pub tax_percent: Option<String>,
}

/// Capture the labeled amounts, scanning top to bottom so the first
/// occurrence of each label wins.
pub fn extract_amounts(doc: &RawDocument) -> DocumentAmounts {
    let mut result = DocumentAmounts::default();

    for line in doc.lines() {
        if result.sub_total.is_none() {
            if let Some(value) = labeled_amount(line, &SUB_TOTAL_LABEL) {
                result.sub_total = Some(value);
                continue;
            }
        }

        if result.balance_due.is_none() {
            if let Some(value) = labeled_amount(line, &BALANCE_DUE_LABEL) {
                result.balance_due = Some(value);
                continue;
            }
        }

        // "Total" must not swallow "Sub Total" lines
        if result.total.is_none() && !SUB_TOTAL_LABEL.is_match(line) {
            if let Some(value) = labeled_amount(line, &TOTAL_LABEL) {
                result.total = Some(value);
                continue;
            }
        }

        // "VAT Number" lines are identifiers, not amounts
        if result.tax_amount.is_none() && !TAX_ID_LINE.is_match(line) {
            if let Some(value) = labeled_amount(line, &TAX_LABEL) {
                result.tax_amount = Some(value);
            }
        }
    }

    if let Some(caps) = TAX_PERCENT.captures(&doc.text()) {
        result.tax_percent = Some(caps[1].to_string());
    }

    result
}

/// First money token after the label on this line, skipping percentage
/// tokens such as the "15.00" in "Tax (15.00% SA): R195.65".
fn labeled_amount(line: &str, label: &Regex) -> Option<String> {
    let m = label.find(line)?;
    let rest = &line[m.end()..];

    for caps in AMOUNT_TOKEN.captures_iter(rest) {
        let token = caps.get(1).unwrap();
        let followed_by_percent = rest[token.end()..].trim_start().starts_with('%');
        if !followed_by_percent {
            return Some(token.as_str().to_string());
        }
    }
    None
}

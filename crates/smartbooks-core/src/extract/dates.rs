//! Raw capture of labeled invoice dates.
//!
//! The value may follow the label on the same line or appear on one of the
//! next lines, so capture scans line-by-line with a short bounded
//! look-ahead instead of a single multi-line regex.

use regex::Regex;

use crate::document::RawDocument;

use super::patterns::{DUE_DATE_LABEL, INVOICE_DATE_LABEL};

/// How far below a date label the value may sit.
const DATE_LOOKAHEAD: usize = 2;

/// Raw date captures, prior to fuzzy parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentDates {
    pub invoice_date: Option<String>,
    pub due_date: Option<String>,
}

/// Capture the raw spans for the invoice and due dates. First match wins
/// for each label.
pub fn extract_dates(doc: &RawDocument) -> DocumentDates {
    DocumentDates {
        invoice_date: capture_labeled(doc, &INVOICE_DATE_LABEL),
        due_date: capture_labeled(doc, &DUE_DATE_LABEL),
    }
}

fn capture_labeled(doc: &RawDocument, label: &Regex) -> Option<String> {
    let lines = doc.lines();
    for (idx, line) in lines.iter().enumerate() {
        let Some(caps) = label.captures(line) else {
            continue;
        };

        // Same-line remainder first
        let remainder = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
        if !remainder.is_empty() {
            return Some(remainder.to_string());
        }

        // Otherwise the value sits on one of the next lines
        let found = lines
            .iter()
            .skip(idx + 1)
            .take(DATE_LOOKAHEAD)
            .map(|l| l.trim())
            .find(|l| !l.is_empty());
        if let Some(value) = found {
            return Some(value.to_string());
        }

        // Label with no value anywhere near it: give up on this label
        return None;
    }
    None
}

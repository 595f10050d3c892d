//! Payment status detection.

use crate::document::RawDocument;

use super::patterns::{PAID, UNPAID};

/// Capture the payment status token, anywhere in the text. "UNPAID" takes
/// precedence over "PAID" when both are present.
pub fn extract_status(doc: &RawDocument) -> Option<String> {
    let text = doc.text();
    if UNPAID.is_match(&text) {
        Some("UNPAID".to_string())
    } else if PAID.is_match(&text) {
        Some("PAID".to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpaid_beats_paid() {
        let doc = RawDocument::from_text("This invoice is marked PAID\nStatus: UNPAID");
        assert_eq!(extract_status(&doc).as_deref(), Some("UNPAID"));
    }

    #[test]
    fn test_case_insensitive() {
        let doc = RawDocument::from_text("paid in full");
        assert_eq!(extract_status(&doc).as_deref(), Some("PAID"));
    }

    #[test]
    fn test_absent_status() {
        let doc = RawDocument::from_text("Total: 10.00");
        assert_eq!(extract_status(&doc), None);
    }
}

//! OCR provider seam.
//!
//! Recognition is an external collaborator: the core consumes its
//! line-ordered output and is not responsible for accuracy. A pooled OCR
//! engine in the surrounding system maps to an injected handle implementing
//! this trait, never to a process-wide singleton.

use crate::document::RawDocument;
use crate::error::OcrError;

/// Black-box OCR provider: image bytes in, ordered text lines out.
pub trait OcrProvider {
    /// Recognize text in an invoice image, preserving line order.
    fn recognize(&self, image: &[u8]) -> Result<RawDocument, OcrError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{InvoiceExtractor, RuleExtractor};
    use crate::models::record::Field;

    /// Canned provider standing in for a real OCR engine.
    struct FixedOcr(Vec<String>);

    impl OcrProvider for FixedOcr {
        fn recognize(&self, _image: &[u8]) -> Result<RawDocument, OcrError> {
            Ok(RawDocument::new(self.0.clone()))
        }
    }

    #[test]
    fn test_provider_output_feeds_extraction() {
        let provider = FixedOcr(vec![
            "Invoice #INV-9".to_string(),
            "Total: 12.00".to_string(),
        ]);

        let doc = provider.recognize(b"fake image bytes").unwrap();
        let record = RuleExtractor::new().extract(&doc).record;

        assert_eq!(
            record.get(Field::InvoiceNumber).map(|v| v.to_display()),
            Some("INV-9".to_string())
        );
    }
}

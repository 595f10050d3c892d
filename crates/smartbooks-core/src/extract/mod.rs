//! Invoice field extraction module.
//!
//! An ordered set of independent pattern rules, each targeting one
//! semantic field. Rules never abort the document: a non-match simply
//! leaves the field out of the result.

pub mod amounts;
pub mod dates;
pub mod parties;
mod parser;
pub mod patterns;
pub mod status;

pub use parser::{ExtractionResult, RuleExtractor};

use std::collections::BTreeMap;

use crate::document::RawDocument;
use crate::models::record::Field;

/// Raw string captures per field, before normalization.
pub type RawCaptures = BTreeMap<Field, String>;

/// Trait for invoice field extractors.
///
/// Extraction is a pure function of the document: no state is read or
/// written across calls, so implementations are trivially parallelizable
/// across documents.
pub trait InvoiceExtractor {
    /// Raw label captures, keyed by canonical field.
    fn capture(&self, doc: &RawDocument) -> RawCaptures;

    /// Full extraction: capture, normalize, build the record.
    fn extract(&self, doc: &RawDocument) -> ExtractionResult;

    /// Extract from a plain newline-joined text blob.
    fn extract_from_text(&self, text: &str) -> ExtractionResult {
        self.extract(&RawDocument::from_text(text))
    }
}

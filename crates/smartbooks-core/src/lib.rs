//! Core library for SmartBooks invoice OCR processing.
//!
//! This crate provides:
//! - The raw OCR document model (ordered text lines)
//! - Rule-based invoice field extraction (numbers, dates, amounts, parties)
//! - Value normalization (ISO dates, plain decimal amounts, status enum)
//! - Collaborator seams for the OCR provider and the persistence sink

pub mod document;
pub mod error;
pub mod extract;
pub mod models;
pub mod normalize;
pub mod ocr;
pub mod sink;

pub use document::RawDocument;
pub use error::{OcrError, Result, SinkError, SmartbooksError};
pub use extract::{ExtractionResult, InvoiceExtractor, RuleExtractor};
pub use models::config::ExtractionConfig;
pub use models::record::{Field, FieldValue, InvoiceRecord, InvoiceRow, PaymentStatus};
pub use normalize::{normalize, FieldKind};
pub use ocr::OcrProvider;
pub use sink::InvoiceSink;

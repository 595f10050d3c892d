//! Raw OCR document model.

/// Ordered OCR text lines for one invoice image.
///
/// Line order is significant: several extraction rules expect a label on
/// one line and its value within the next few lines. The document is
/// immutable once built and carries no state across extractions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    lines: Vec<String>,
}

impl RawDocument {
    /// Build a document from already-recognized OCR lines.
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Build a document from a newline-joined OCR text blob.
    ///
    /// Lines are kept in order; trailing carriage returns are stripped but
    /// interior whitespace is preserved for the positional rules.
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .lines()
            .map(|l| l.trim_end_matches('\r').to_string())
            .collect();
        Self { lines }
    }

    /// The lines in recognition order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines, including empty ones.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when the document has no lines at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// True when the document has no non-whitespace content.
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    /// The full text, lines joined with newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl From<&str> for RawDocument {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

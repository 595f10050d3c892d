//! Raw capture of party, registration, and banking fields.

use crate::document::RawDocument;
use crate::models::config::ExtractionConfig;

use super::patterns::{ACCOUNT_NUMBER, ANY_LABEL, BANK_NAME, INVOICED_TO, REG_NUMBER, VAT_NUMBER};

/// The "Invoiced To" block: a client name and up to two address lines,
/// each independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientBlock {
    pub name: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
}

/// Registration identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub vat_number: Option<String>,
    pub reg_number: Option<String>,
}

/// Banking details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Banking {
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
}

/// Capture the client block anchored by the first "Invoiced To" label.
///
/// The name and address lines are taken positionally from the non-empty
/// lines below the anchor, within a bounded look-ahead. Capture stops
/// early at the next recognizable label so an adjacent field is never
/// swallowed as an address line.
pub fn extract_client_block(doc: &RawDocument, config: &ExtractionConfig) -> ClientBlock {
    let mut block = ClientBlock::default();
    let lines = doc.lines();

    let Some((idx, caps)) = lines
        .iter()
        .enumerate()
        .find_map(|(i, l)| INVOICED_TO.captures(l).map(|c| (i, c)))
    else {
        return block;
    };

    let mut captured: Vec<String> = Vec::new();

    // A name on the anchor line itself counts as the first block line
    let remainder = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
    if !remainder.is_empty() {
        captured.push(remainder.to_string());
    }

    for line in lines.iter().skip(idx + 1).take(config.lookahead_lines) {
        if captured.len() > config.address_lines {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if ANY_LABEL.is_match(trimmed) {
            break;
        }
        captured.push(trimmed.to_string());
    }

    let mut it = captured.into_iter();
    block.name = it.next();
    block.address_line1 = it.next();
    block.address_line2 = it.next();
    block
}

/// Capture VAT and registration numbers. First occurrence of each label
/// wins.
pub fn extract_registration(doc: &RawDocument) -> Registration {
    let mut result = Registration::default();

    for line in doc.lines() {
        if result.vat_number.is_none() {
            if let Some(caps) = VAT_NUMBER.captures(line) {
                result.vat_number = Some(caps[1].to_string());
                continue;
            }
        }
        if result.reg_number.is_none() {
            if let Some(caps) = REG_NUMBER.captures(line) {
                result.reg_number = Some(caps[1].to_string());
            }
        }
    }

    result
}

/// Capture the bank name (trailing free text) and account number (digit
/// run).
pub fn extract_banking(doc: &RawDocument) -> Banking {
    let mut result = Banking::default();

    for line in doc.lines() {
        if result.account_number.is_none() {
            if let Some(caps) = ACCOUNT_NUMBER.captures(line) {
                result.account_number = Some(caps[1].to_string());
                continue;
            }
        }
        if result.bank_name.is_none() {
            if let Some(caps) = BANK_NAME.captures(line) {
                result.bank_name = Some(caps[1].trim().to_string());
            }
        }
    }

    result
}

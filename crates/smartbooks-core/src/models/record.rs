//! Invoice record models aligned with the persistence schema.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::normalize::FieldKind;

/// The canonical invoice fields, named after the persistence schema's
/// snake_case columns. The extractor never produces a key outside this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    InvoiceNumber,
    InvoiceDate,
    DueDate,
    ClientName,
    ClientAddressLine1,
    ClientAddressLine2,
    VatNumber,
    RegNumber,
    BankName,
    AccountNumber,
    SubTotal,
    TaxPercent,
    TaxAmount,
    TotalAmount,
    BalanceDue,
    Status,
}

impl Field {
    /// All fields, in persistence column order.
    pub const ALL: [Field; 16] = [
        Field::InvoiceNumber,
        Field::InvoiceDate,
        Field::DueDate,
        Field::ClientName,
        Field::ClientAddressLine1,
        Field::ClientAddressLine2,
        Field::VatNumber,
        Field::RegNumber,
        Field::BankName,
        Field::AccountNumber,
        Field::SubTotal,
        Field::TaxPercent,
        Field::TaxAmount,
        Field::TotalAmount,
        Field::BalanceDue,
        Field::Status,
    ];

    /// Schema column name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::InvoiceNumber => "invoice_number",
            Field::InvoiceDate => "invoice_date",
            Field::DueDate => "due_date",
            Field::ClientName => "client_name",
            Field::ClientAddressLine1 => "client_address_line1",
            Field::ClientAddressLine2 => "client_address_line2",
            Field::VatNumber => "vat_number",
            Field::RegNumber => "reg_number",
            Field::BankName => "bank_name",
            Field::AccountNumber => "account_number",
            Field::SubTotal => "sub_total",
            Field::TaxPercent => "tax_percent",
            Field::TaxAmount => "tax_amount",
            Field::TotalAmount => "total_amount",
            Field::BalanceDue => "balance_due",
            Field::Status => "status",
        }
    }

    /// Normalization kind applied to this field's raw capture.
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::InvoiceNumber
            | Field::VatNumber
            | Field::RegNumber
            | Field::AccountNumber => FieldKind::Identifier,
            Field::InvoiceDate | Field::DueDate => FieldKind::Date,
            Field::ClientName
            | Field::ClientAddressLine1
            | Field::ClientAddressLine2
            | Field::BankName => FieldKind::Text,
            Field::SubTotal | Field::TaxAmount | Field::TotalAmount | Field::BalanceDue => {
                FieldKind::Amount
            }
            Field::TaxPercent => FieldKind::Percent,
            Field::Status => FieldKind::Status,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invoice payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Unpaid => "UNPAID",
        }
    }
}

/// A normalized, typed field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Calendar date, serialized as ISO year-month-day.
    Date(NaiveDate),
    /// Decimal amount or percentage, no thousands separators.
    Number(Decimal),
    /// Payment status enum.
    Status(PaymentStatus),
    /// Trimmed free text or identifier.
    Text(String),
}

impl FieldValue {
    /// Canonical string form: ISO date, plain decimal, uppercase status.
    pub fn to_display(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Status(s) => s.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_display())
    }
}

/// The final field-name → normalized-value mapping for one invoice.
///
/// Keys are present only when the corresponding rule matched and
/// normalization succeeded; absence is a valid terminal state for any
/// field, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceRecord {
    fields: BTreeMap<Field, FieldValue>,
}

impl InvoiceRecord {
    /// Empty record (the result for a blank document).
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a normalized value. Returns the previous value, if any; the
    /// extractor never overwrites (first match wins).
    pub fn insert(&mut self, field: Field, value: FieldValue) -> Option<FieldValue> {
        self.fields.insert(field, value)
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.fields.get(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldValue)> {
        self.fields.iter().map(|(f, v)| (*f, v))
    }

    /// Plain field-name → display-string mapping for presentation.
    pub fn display_map(&self) -> BTreeMap<&'static str, String> {
        self.fields
            .iter()
            .map(|(f, v)| (f.as_str(), v.to_display()))
            .collect()
    }

    /// Serialize to the sink's fixed column set, with explicit nulls for
    /// columns this record did not extract.
    pub fn to_row(&self) -> InvoiceRow {
        let col = |f: Field| self.fields.get(&f).map(FieldValue::to_display);
        InvoiceRow {
            invoice_number: col(Field::InvoiceNumber),
            invoice_date: col(Field::InvoiceDate),
            due_date: col(Field::DueDate),
            client_name: col(Field::ClientName),
            client_address_line1: col(Field::ClientAddressLine1),
            client_address_line2: col(Field::ClientAddressLine2),
            vat_number: col(Field::VatNumber),
            reg_number: col(Field::RegNumber),
            bank_name: col(Field::BankName),
            account_number: col(Field::AccountNumber),
            sub_total: col(Field::SubTotal),
            tax_percent: col(Field::TaxPercent),
            tax_amount: col(Field::TaxAmount),
            total_amount: col(Field::TotalAmount),
            balance_due: col(Field::BalanceDue),
            status: col(Field::Status),
        }
    }
}

/// One structured row for the persistence sink's fixed column set.
///
/// Every column is always present; fields the extractor did not produce are
/// `None` (serialized as explicit nulls), never fabricated values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRow {
    pub invoice_number: Option<String>,
    pub invoice_date: Option<String>,
    pub due_date: Option<String>,
    pub client_name: Option<String>,
    pub client_address_line1: Option<String>,
    pub client_address_line2: Option<String>,
    pub vat_number: Option<String>,
    pub reg_number: Option<String>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub sub_total: Option<String>,
    pub tax_percent: Option<String>,
    pub tax_amount: Option<String>,
    pub total_amount: Option<String>,
    pub balance_due: Option<String>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_field_names_match_schema() {
        assert_eq!(Field::InvoiceNumber.as_str(), "invoice_number");
        assert_eq!(Field::ClientAddressLine2.as_str(), "client_address_line2");
        assert_eq!(Field::BalanceDue.as_str(), "balance_due");
    }

    #[test]
    fn test_value_display_forms() {
        let date = FieldValue::Date(NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
        assert_eq!(date.to_display(), "2024-03-03");

        let amount = FieldValue::Number(Decimal::from_str("1500.00").unwrap());
        assert_eq!(amount.to_display(), "1500.00");

        let status = FieldValue::Status(PaymentStatus::Unpaid);
        assert_eq!(status.to_display(), "UNPAID");
    }

    #[test]
    fn test_row_has_explicit_nulls_for_missing_fields() {
        let mut record = InvoiceRecord::new();
        record.insert(
            Field::InvoiceNumber,
            FieldValue::Text("INV-001".to_string()),
        );

        let row = record.to_row();
        assert_eq!(row.invoice_number.as_deref(), Some("INV-001"));
        assert_eq!(row.vat_number, None);
        assert_eq!(row.status, None);

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["vat_number"], serde_json::Value::Null);
    }

    #[test]
    fn test_record_serializes_as_plain_map() {
        let mut record = InvoiceRecord::new();
        record.insert(Field::Status, FieldValue::Status(PaymentStatus::Paid));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "PAID" }));
    }
}

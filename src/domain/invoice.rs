//! Individual expense records.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::*;
use crate::errors::EngineError;

/// An uploaded invoice. Read-only as far as the engine is concerned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: String,
    pub number: String,
    pub vendor: String,
    /// Name of the owning entity. A lookup relation, not ownership.
    pub entity: String,
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub status: InvoiceStatus,
    pub filename: String,
}

impl Invoice {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        number: impl Into<String>,
        vendor: impl Into<String>,
        entity: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        status: InvoiceStatus,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            number: number.into(),
            vendor: vendor.into(),
            entity: entity.into(),
            category: category.into(),
            amount,
            date,
            status,
            filename: filename.into(),
        }
    }

    pub fn is_approved(&self) -> bool {
        self.status == InvoiceStatus::Approved
    }

    pub fn is_pending(&self) -> bool {
        self.status == InvoiceStatus::Pending
    }

    /// Amounts must be finite and non-negative to feed entity totals.
    pub fn has_valid_amount(&self) -> bool {
        self.amount.is_finite() && self.amount >= 0.0
    }
}

impl Amounted for Invoice {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl BelongsToCategory for Invoice {
    fn category(&self) -> &str {
        &self.category
    }
}

impl Displayable for Invoice {
    fn display_label(&self) -> String {
        format!("{} ({})", self.number, self.vendor)
    }
}

/// Processing state of an invoice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Processed,
    Approved,
    Rejected,
}

impl InvoiceStatus {
    /// Every status, in the order filter facets present them.
    pub const ALL: [InvoiceStatus; 4] = [
        InvoiceStatus::Pending,
        InvoiceStatus::Processed,
        InvoiceStatus::Approved,
        InvoiceStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Processed => "processed",
            InvoiceStatus::Approved => "approved",
            InvoiceStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        InvoiceStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| EngineError::Validation(format!("unknown invoice status `{}`", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Approved".parse::<InvoiceStatus>(), Ok(InvoiceStatus::Approved));
        assert_eq!(" pending ".parse::<InvoiceStatus>(), Ok(InvoiceStatus::Pending));
        assert!(matches!(
            "archived".parse::<InvoiceStatus>(),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn invoice_deserializes_iso_dates_and_lowercase_status() {
        let json = r#"{
            "id": "INV-003",
            "number": "INV-2024-003",
            "vendor": "Delta Airlines",
            "entity": "Marketing Pro LLC",
            "category": "Travel",
            "amount": 1250.75,
            "date": "2024-01-22",
            "status": "pending",
            "filename": "flight_booking_confirmation.pdf"
        }"#;
        let invoice: Invoice = serde_json::from_str(json).expect("invoice json");
        assert_eq!(invoice.date, NaiveDate::from_ymd_opt(2024, 1, 22).unwrap());
        assert!(invoice.is_pending());
        assert_eq!(invoice.display_label(), "INV-2024-003 (Delta Airlines)");
    }
}

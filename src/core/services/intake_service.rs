use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Invoice, InvoiceStatus};
use crate::errors::{EngineError, EngineResult};

const SUPPORTED_EXTENSIONS: [&str; 4] = ["pdf", "jpg", "jpeg", "png"];

/// Raw form fields captured alongside uploaded invoice files.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InvoiceDraft {
    pub entity: String,
    pub category: String,
    pub amount: String,
    pub date: String,
    pub vendor: String,
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Turns validated drafts into invoices. Transport and document extraction
/// happen elsewhere; only the attachment names reach this service.
pub struct IntakeService;

impl IntakeService {
    pub fn is_supported_attachment(filename: &str) -> bool {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
    }

    /// Splits attachment names into accepted and rejected, keeping order.
    pub fn partition_attachments<'a>(filenames: &[&'a str]) -> (Vec<&'a str>, Vec<&'a str>) {
        filenames
            .iter()
            .copied()
            .partition(|name| Self::is_supported_attachment(name))
    }

    /// Builds one pending invoice per attachment from a filled-in draft.
    pub fn accept(draft: &InvoiceDraft, attachments: &[&str]) -> EngineResult<Vec<Invoice>> {
        if attachments.is_empty() {
            return Err(EngineError::Validation(
                "select at least one invoice file".into(),
            ));
        }
        if let Some(bad) = attachments
            .iter()
            .find(|name| !Self::is_supported_attachment(name))
        {
            return Err(EngineError::Validation(format!(
                "unsupported attachment `{}`; only PDF and image files are accepted",
                bad
            )));
        }
        if draft.entity.trim().is_empty() || draft.category.trim().is_empty() {
            return Err(EngineError::Validation(
                "entity and category are required".into(),
            ));
        }
        let amount = parse_amount(&draft.amount)?;
        let date = NaiveDate::parse_from_str(draft.date.trim(), "%Y-%m-%d").map_err(|err| {
            EngineError::Validation(format!("invalid invoice date `{}`: {}", draft.date, err))
        })?;

        Ok(attachments
            .iter()
            .map(|filename| {
                Invoice::new(
                    Uuid::new_v4().to_string(),
                    draft.number.trim(),
                    draft.vendor.trim(),
                    draft.entity.trim(),
                    draft.category.trim(),
                    amount,
                    date,
                    InvoiceStatus::Pending,
                    *filename,
                )
            })
            .collect())
    }
}

fn parse_amount(raw: &str) -> EngineResult<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    let amount: f64 = cleaned
        .parse()
        .map_err(|_| EngineError::Validation(format!("invalid amount `{}`", raw)))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(EngineError::Validation(format!(
            "amount must be a non-negative number, got `{}`",
            raw
        )));
    }
    Ok(amount)
}

use serde::{Deserialize, Serialize};

use crate::domain::common::{sum_amounts, BelongsToCategory};
use crate::domain::{Invoice, InvoiceStatus};
use crate::errors::EngineResult;

/// Independent, optional constraints over an invoice list.
///
/// `None` means "no constraint"; `Some("")` is a real constraint that matches
/// empty values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InvoiceCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InvoiceStatus>,
}

impl InvoiceCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Builds criteria from raw form fields where an empty field means "any".
    pub fn from_form(
        search: &str,
        entity: &str,
        category: &str,
        status: &str,
    ) -> EngineResult<Self> {
        fn unset_if_empty(value: &str) -> Option<String> {
            (!value.is_empty()).then(|| value.to_string())
        }

        let status = match status.trim() {
            "" => None,
            raw => Some(raw.parse::<InvoiceStatus>()?),
        };
        Ok(Self {
            search_term: unset_if_empty(search),
            entity: unset_if_empty(entity),
            category: unset_if_empty(category),
            status,
        })
    }

    pub fn is_unconstrained(&self) -> bool {
        self.search_term.is_none()
            && self.entity.is_none()
            && self.category.is_none()
            && self.status.is_none()
    }
}

/// Headline figures for a (possibly filtered) invoice list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InvoiceSummary {
    pub count: usize,
    pub total_amount: f64,
    pub approved_amount: f64,
    pub approved_count: usize,
    pub pending_count: usize,
}

/// A filtered invoice list together with its summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceView {
    pub invoices: Vec<Invoice>,
    pub unfiltered_count: usize,
    pub summary: InvoiceSummary,
}

impl InvoiceView {
    pub fn is_filtered(&self) -> bool {
        self.invoices.len() != self.unfiltered_count
    }
}

/// Search and facet filtering over invoice collections.
pub struct FilterService;

impl FilterService {
    /// Compiles criteria into a reusable predicate. All supplied constraints
    /// must hold; the search term matches number, vendor, or filename.
    pub fn build_predicate(criteria: &InvoiceCriteria) -> impl Fn(&Invoice) -> bool {
        let needle = criteria.search_term.as_ref().map(|term| term.to_lowercase());
        let entity = criteria.entity.clone();
        let category = criteria.category.clone();
        let status = criteria.status;

        move |invoice: &Invoice| {
            let matches_search = needle.as_deref().map_or(true, |needle| {
                [&invoice.number, &invoice.vendor, &invoice.filename]
                    .iter()
                    .any(|field| field.to_lowercase().contains(needle))
            });
            matches_search
                && entity.as_deref().map_or(true, |e| invoice.entity == e)
                && category.as_deref().map_or(true, |c| invoice.category == c)
                && status.map_or(true, |s| invoice.status == s)
        }
    }

    /// Returns the matching invoices in their original order.
    pub fn apply_filter(invoices: &[Invoice], criteria: &InvoiceCriteria) -> Vec<Invoice> {
        let predicate = Self::build_predicate(criteria);
        let matched: Vec<Invoice> = invoices
            .iter()
            .filter(|invoice| predicate(*invoice))
            .cloned()
            .collect();
        tracing::debug!(
            total = invoices.len(),
            matched = matched.len(),
            "applied invoice filter"
        );
        matched
    }

    pub fn view(invoices: &[Invoice], criteria: &InvoiceCriteria) -> InvoiceView {
        let matched = Self::apply_filter(invoices, criteria);
        let summary = summarize_invoices(&matched);
        InvoiceView {
            invoices: matched,
            unfiltered_count: invoices.len(),
            summary,
        }
    }

    /// Entity names seen in the invoices, first-seen order.
    ///
    /// Derived from invoices rather than the registry, so names of deleted
    /// entities keep appearing while historical invoices reference them.
    pub fn distinct_entities(invoices: &[Invoice]) -> Vec<String> {
        distinct_in_order(invoices.iter().map(|invoice| invoice.entity.as_str()))
    }

    pub fn distinct_categories(invoices: &[Invoice]) -> Vec<String> {
        distinct_in_order(invoices.iter().map(BelongsToCategory::category))
    }

    pub fn statuses() -> [InvoiceStatus; 4] {
        InvoiceStatus::ALL
    }
}

pub fn summarize_invoices(invoices: &[Invoice]) -> InvoiceSummary {
    let approved: Vec<&Invoice> = invoices.iter().filter(|inv| inv.is_approved()).collect();
    InvoiceSummary {
        count: invoices.len(),
        total_amount: sum_amounts(invoices),
        approved_amount: sum_amounts(approved.iter().copied()),
        approved_count: approved.len(),
        pending_count: invoices.iter().filter(|inv| inv.is_pending()).count(),
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !seen.iter().any(|existing| existing == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EngineError;
    use chrono::NaiveDate;

    fn invoice(id: &str, vendor: &str, entity: &str, status: InvoiceStatus) -> Invoice {
        Invoice::new(
            id,
            format!("INV-2024-{id}"),
            vendor,
            entity,
            "Software",
            100.0,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            status,
            format!("{}.pdf", vendor.to_lowercase()),
        )
    }

    #[test]
    fn search_term_matches_any_text_field_case_insensitively() {
        let invoices = vec![
            invoice("001", "Adobe Inc", "Design Studio Co", InvoiceStatus::Processed),
            invoice("002", "Office Depot", "Tech Solutions Inc", InvoiceStatus::Approved),
        ];
        let search = |term: &str| {
            FilterService::apply_filter(&invoices, &InvoiceCriteria::new().with_search(term))
        };
        assert_eq!(search("ADOBE").len(), 1);
        assert_eq!(search("2024-002")[0].id, "002");
        assert_eq!(search("depot.PDF")[0].id, "002");
    }

    #[test]
    fn criteria_are_combined_with_and() {
        let invoices = vec![
            invoice("001", "Adobe Inc", "Design Studio Co", InvoiceStatus::Approved),
            invoice("002", "Adobe Inc", "Tech Solutions Inc", InvoiceStatus::Approved),
            invoice("003", "Adobe Inc", "Design Studio Co", InvoiceStatus::Rejected),
        ];
        let criteria = InvoiceCriteria::new()
            .with_search("adobe")
            .with_entity("Design Studio Co")
            .with_status(InvoiceStatus::Approved);
        let matched = FilterService::apply_filter(&invoices, &criteria);
        let ids: Vec<_> = matched.iter().map(|inv| inv.id.as_str()).collect();
        assert_eq!(ids, ["001"]);
    }

    #[test]
    fn empty_string_is_a_real_constraint() {
        let invoices = vec![
            invoice("001", "Adobe Inc", "", InvoiceStatus::Pending),
            invoice("002", "Adobe Inc", "Tech Solutions Inc", InvoiceStatus::Pending),
        ];
        let criteria = InvoiceCriteria::new().with_entity("");
        let matched = FilterService::apply_filter(&invoices, &criteria);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "001");
    }

    #[test]
    fn from_form_treats_blank_fields_as_unset() {
        let criteria = InvoiceCriteria::from_form("", "", "", "").unwrap();
        assert!(criteria.is_unconstrained());
        let criteria = InvoiceCriteria::from_form("adobe", "", "Software", "Approved").unwrap();
        assert_eq!(criteria.status, Some(InvoiceStatus::Approved));
        assert_eq!(criteria.entity, None);
        assert!(matches!(
            InvoiceCriteria::from_form("", "", "", "lost"),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn summary_counts_approved_and_pending() {
        let invoices = vec![
            invoice("001", "A", "X", InvoiceStatus::Approved),
            invoice("002", "B", "X", InvoiceStatus::Pending),
            invoice("003", "C", "Y", InvoiceStatus::Pending),
        ];
        let view = FilterService::view(&invoices, &InvoiceCriteria::new().with_entity("X"));
        assert!(view.is_filtered());
        assert_eq!(view.unfiltered_count, 3);
        assert_eq!(view.summary.count, 2);
        assert_eq!(view.summary.total_amount, 200.0);
        assert_eq!(view.summary.approved_amount, 100.0);
        assert_eq!(view.summary.approved_count, 1);
        assert_eq!(view.summary.pending_count, 1);
    }

    #[test]
    fn facets_keep_first_seen_order() {
        let invoices = vec![
            invoice("001", "A", "Tech Solutions Inc", InvoiceStatus::Approved),
            invoice("002", "B", "Marketing Pro LLC", InvoiceStatus::Pending),
            invoice("003", "C", "Tech Solutions Inc", InvoiceStatus::Pending),
        ];
        assert_eq!(
            FilterService::distinct_entities(&invoices),
            ["Tech Solutions Inc", "Marketing Pro LLC"]
        );
        assert_eq!(FilterService::distinct_categories(&invoices), ["Software"]);
    }
}

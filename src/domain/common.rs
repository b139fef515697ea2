/// Provides access to a human-friendly record name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Exposes the free-text grouping key a record is filed under.
pub trait BelongsToCategory {
    fn category(&self) -> &str;
}

/// Supplies a common contract for retrieving monetary amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Sums the amounts of any amounted records.
pub fn sum_amounts<'a, T, I>(items: I) -> f64
where
    T: Amounted + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().map(|item| item.amount()).sum()
}

/// Finds the first record whose name matches, ignoring case and surrounding
/// whitespace.
pub fn find_named<'a, T, I>(items: I, name: &str) -> Option<&'a T>
where
    T: NamedEntity + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let wanted = name.trim().to_lowercase();
    items
        .into_iter()
        .find(|item| item.name().trim().to_lowercase() == wanted)
}

/// Sums amounts per category label, in first-seen order.
pub fn totals_by_category<'a, T, I>(items: I) -> Vec<(String, f64)>
where
    T: BelongsToCategory + Amounted + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut totals: Vec<(String, f64)> = Vec::new();
    for item in items {
        match totals.iter().position(|(label, _)| label == item.category()) {
            Some(idx) => totals[idx].1 += item.amount(),
            None => totals.push((item.category().to_string(), item.amount())),
        }
    }
    totals
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Entity, Invoice, InvoiceStatus};
    use chrono::NaiveDate;

    fn invoice(category: &str, amount: f64) -> Invoice {
        Invoice::new(
            "INV",
            "INV-1",
            "Vendor",
            "Tech Solutions Inc",
            category,
            amount,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            InvoiceStatus::Pending,
            "file.pdf",
        )
    }

    #[test]
    fn totals_by_category_keeps_first_seen_order() {
        let invoices = vec![
            invoice("Travel", 300.0),
            invoice("Software", 100.0),
            invoice("Travel", 50.0),
        ];
        assert_eq!(
            totals_by_category(&invoices),
            [("Travel".to_string(), 350.0), ("Software".to_string(), 100.0)]
        );
    }

    #[test]
    fn find_named_ignores_case_and_padding() {
        let entities = vec![Entity::new(1, "Tech Solutions Inc", "#3B82F6")];
        assert_eq!(find_named(&entities, "  TECH solutions inc").map(|e| e.id), Some(1));
        assert!(find_named(&entities, "Tech").is_none());
    }
}

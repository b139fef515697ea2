//! Derived per-category spending totals.

use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// Spending summed over every invoice sharing a category label.
///
/// Never persisted; produced by the category breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub name: String,
    pub amount: f64,
    /// Share of the overall total, rounded to two decimals.
    pub percentage: f64,
}

impl NamedEntity for CategoryTotal {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for CategoryTotal {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for CategoryTotal {
    fn display_label(&self) -> String {
        format!("{} ({}%)", self.name, self.percentage)
    }
}

//! Business units that incur expenses.

use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// Registry-assigned identifier; positive and never reused.
pub type EntityId = u64;

/// A business unit whose expenses are tracked.
///
/// `total_expenses` is a cached aggregate. It is only ever written by the
/// registry's recompute operations, never edited directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub total_expenses: f64,
}

impl Entity {
    pub fn new(id: EntityId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            total_expenses: 0.0,
        }
    }

    pub fn with_total_expenses(mut self, total: f64) -> Self {
        self.total_expenses = total;
        self
    }

    pub fn has_expenses(&self) -> bool {
        self.total_expenses > 0.0
    }
}

impl NamedEntity for Entity {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for Entity {
    fn amount(&self) -> f64 {
        self.total_expenses
    }
}

impl Displayable for Entity {
    fn display_label(&self) -> String {
        format!("#{} {}", self.id, self.name)
    }
}

pub mod json_backend;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    core::EntityRegistry,
    domain::{Entity, EntityId, Invoice, TimeSeriesPoint},
    errors::{EngineError, EngineResult, StoreResult},
};

/// Everything the engine needs, as handed over by the persistence layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSnapshot {
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    #[serde(default)]
    pub monthly: Vec<TimeSeriesPoint>,
    /// Highest entity id ever assigned, so removed ids stay retired.
    #[serde(default)]
    pub highest_entity_id: EntityId,
}

impl ExpenseSnapshot {
    /// Checks the stored records: invoice amounts must be finite and
    /// non-negative, and the entities must form a valid registry.
    pub fn validate(&self) -> EngineResult<()> {
        if let Some(bad) = self.invoices.iter().find(|inv| !inv.has_valid_amount()) {
            return Err(EngineError::Validation(format!(
                "invoice {} has invalid amount {}",
                bad.id, bad.amount
            )));
        }
        self.registry().map(|_| ())
    }

    /// Rebuilds a registry from the stored entities.
    pub fn registry(&self) -> EngineResult<EntityRegistry> {
        Ok(EntityRegistry::from_entities(self.entities.clone())?
            .with_highest_assigned(self.highest_entity_id))
    }

    /// Writes registry state back into the snapshot.
    pub fn store_registry(&mut self, registry: &EntityRegistry) {
        self.entities = registry.list().to_vec();
        self.highest_entity_id = registry.highest_assigned();
    }
}

/// Abstraction over places a snapshot can be read from and written to.
pub trait SnapshotBackend {
    fn load(&self, path: &Path) -> StoreResult<ExpenseSnapshot>;
    fn save(&self, snapshot: &ExpenseSnapshot, path: &Path) -> StoreResult<()>;
}

pub use json_backend::{load_snapshot_from_path, save_snapshot_to_path, JsonSnapshotStore};

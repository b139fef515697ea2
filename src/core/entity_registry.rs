use std::collections::HashSet;

use crate::domain::common::{find_named, sum_amounts, NamedEntity};
use crate::domain::{Entity, EntityId, Invoice};
use crate::errors::{EngineError, EngineResult};

/// Owns the entity collection and guards its lifecycle invariants.
///
/// Ids are `max + 1` over every id the registry has ever handed out, so an id
/// freed by removal is never reused. `total_expenses` is a cache over
/// invoice data: whoever mutates invoices must call [`EntityRegistry::recompute`]
/// (or [`EntityRegistry::recompute_all`]) afterwards. The registry is not
/// synchronised; a multi-threaded host must serialise calls.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    highest_assigned: EntityId,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a registry from previously stored entities, checking the
    /// invariants the registry would otherwise have enforced itself.
    pub fn from_entities(entities: Vec<Entity>) -> EngineResult<Self> {
        let mut seen_ids = HashSet::new();
        let mut seen_names = HashSet::new();
        for entity in &entities {
            if entity.id == 0 {
                return Err(EngineError::Validation(format!(
                    "entity `{}` has a non-positive id",
                    entity.name
                )));
            }
            if !seen_ids.insert(entity.id) {
                return Err(EngineError::Validation(format!(
                    "duplicate entity id {}",
                    entity.id
                )));
            }
            let name = normalize_name(&entity.name)?;
            if !seen_names.insert(name.to_lowercase()) {
                return Err(EngineError::Validation(format!(
                    "Entity `{}` already exists",
                    name
                )));
            }
            if !(entity.total_expenses >= 0.0) {
                return Err(EngineError::Validation(format!(
                    "entity {} has negative total expenses",
                    entity.id
                )));
            }
        }
        let highest_assigned = entities.iter().map(|entity| entity.id).max().unwrap_or(0);
        Ok(Self {
            entities,
            highest_assigned,
        })
    }

    /// Raises the id high-water mark, e.g. to one persisted alongside the
    /// entities after the former maximum was removed.
    pub fn with_highest_assigned(mut self, id: EntityId) -> Self {
        self.highest_assigned = self.highest_assigned.max(id);
        self
    }

    pub fn highest_assigned(&self) -> EntityId {
        self.highest_assigned
    }

    pub fn list(&self) -> &[Entity] {
        &self.entities
    }

    pub fn into_entities(self) -> Vec<Entity> {
        self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    /// Looks an entity up by name, ignoring case and surrounding whitespace.
    pub fn find_by_name(&self, name: &str) -> Option<&Entity> {
        find_named(&self.entities, name)
    }

    pub fn add(&mut self, name: &str, color: &str) -> EngineResult<Entity> {
        let name = normalize_name(name)?;
        self.ensure_unique_name(None, name)?;
        let id = self.next_id()?;
        self.highest_assigned = id;
        let entity = Entity::new(id, name, color);
        self.entities.push(entity.clone());
        tracing::info!(id, name = %entity.name, "entity added");
        Ok(entity)
    }

    /// Renames and recolours an entity; its expense total is left alone.
    pub fn update(&mut self, id: EntityId, name: &str, color: &str) -> EngineResult<&Entity> {
        let name = normalize_name(name)?;
        if self.get(id).is_none() {
            return Err(not_found(id));
        }
        self.ensure_unique_name(Some(id), name)?;
        let entity = self.entity_mut(id)?;
        entity.name = name.to_string();
        entity.color = color.to_string();
        tracing::info!(id, name = %entity.name, "entity updated");
        Ok(&*entity)
    }

    /// Removes an entity that has no recorded expenses.
    pub fn remove(&mut self, id: EntityId) -> EngineResult<Entity> {
        let position = self
            .entities
            .iter()
            .position(|entity| entity.id == id)
            .ok_or_else(|| not_found(id))?;
        if self.entities[position].has_expenses() {
            tracing::warn!(id, "refused to delete entity with recorded expenses");
            return Err(EngineError::PreconditionViolation(
                "entity has existing expenses".into(),
            ));
        }
        let removed = self.entities.remove(position);
        tracing::info!(id, name = %removed.name, "entity removed");
        Ok(removed)
    }

    /// Recalculates one entity's total from the invoices that reference it.
    ///
    /// A referencing invoice with a negative or non-finite amount fails the
    /// call and leaves the cached total untouched.
    pub fn recompute(&mut self, id: EntityId, invoices: &[Invoice]) -> EngineResult<f64> {
        let entity = self.entity_mut(id)?;
        entity.total_expenses = total_for(&entity.name, invoices)?;
        tracing::info!(id, total = entity.total_expenses, "entity total recomputed");
        Ok(entity.total_expenses)
    }

    /// Recalculates every total; nothing is written unless all succeed.
    pub fn recompute_all(&mut self, invoices: &[Invoice]) -> EngineResult<()> {
        let totals = self
            .entities
            .iter()
            .map(|entity| total_for(&entity.name, invoices))
            .collect::<EngineResult<Vec<f64>>>()?;
        for (entity, total) in self.entities.iter_mut().zip(totals) {
            entity.total_expenses = total;
        }
        tracing::info!(entities = self.entities.len(), "entity totals recomputed");
        Ok(())
    }

    fn next_id(&self) -> EngineResult<EntityId> {
        self.entities
            .iter()
            .map(|entity| entity.id)
            .fold(self.highest_assigned, EntityId::max)
            .checked_add(1)
            .ok_or_else(|| {
                EngineError::PreconditionViolation("no entity ids left to assign".into())
            })
    }

    fn entity_mut(&mut self, id: EntityId) -> EngineResult<&mut Entity> {
        self.entities
            .iter_mut()
            .find(|entity| entity.id == id)
            .ok_or_else(|| not_found(id))
    }

    fn ensure_unique_name(&self, exclude: Option<EntityId>, candidate: &str) -> EngineResult<()> {
        let normalized = candidate.to_lowercase();
        let duplicate = self.entities.iter().any(|entity| {
            entity.name().trim().to_lowercase() == normalized && exclude != Some(entity.id)
        });
        if duplicate {
            Err(EngineError::Validation(format!(
                "Entity `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}

fn normalize_name(name: &str) -> EngineResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(EngineError::Validation("entity name must not be empty".into()))
    } else {
        Ok(trimmed)
    }
}

fn not_found(id: EntityId) -> EngineError {
    EngineError::NotFound(format!("entity {}", id))
}

fn total_for(name: &str, invoices: &[Invoice]) -> EngineResult<f64> {
    let referencing: Vec<&Invoice> = invoices
        .iter()
        .filter(|invoice| invoice.entity == name)
        .collect();
    if let Some(bad) = referencing.iter().find(|invoice| !invoice.has_valid_amount()) {
        return Err(EngineError::InvalidInput(format!(
            "invoice {} has invalid amount {}",
            bad.id, bad.amount
        )));
    }
    let total = sum_amounts(referencing.iter().copied());
    if !total.is_finite() {
        return Err(EngineError::InvalidInput(format!(
            "total expenses for `{}` overflow",
            name
        )));
    }
    Ok(total)
}

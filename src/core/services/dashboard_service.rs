use serde::{Deserialize, Serialize};

use crate::domain::{CategoryTotal, Entity, EntityId, Invoice, TimeSeriesPoint};

use super::aggregation_service::{AggregationService, PeriodChange};

/// One row of the per-entity breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityShare {
    pub id: EntityId,
    pub name: String,
    pub color: String,
    pub total_expenses: f64,
    pub share: f64,
}

/// Headline figures shown above the entity, category, and trend panels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardOverview {
    pub total_expenses: f64,
    pub average_per_period: Option<f64>,
    pub average_per_entity: f64,
    pub current_period: Option<TimeSeriesPoint>,
    pub period_change: Option<PeriodChange>,
    pub active_entities: usize,
    pub entity_breakdown: Vec<EntityShare>,
    pub category_breakdown: Vec<CategoryTotal>,
}

pub struct DashboardService;

impl DashboardService {
    /// Composes the overview; figures that need data the caller did not
    /// supply (an empty or single-point series) come back as `None`.
    pub fn overview(
        entities: &[Entity],
        invoices: &[Invoice],
        monthly: &[TimeSeriesPoint],
    ) -> DashboardOverview {
        DashboardOverview {
            total_expenses: AggregationService::total_expenses(entities),
            average_per_period: AggregationService::average_per_period(monthly).ok(),
            average_per_entity: AggregationService::average_per_entity(entities),
            current_period: monthly.last().cloned(),
            period_change: AggregationService::month_over_month_change(monthly).ok(),
            active_entities: entities.len(),
            entity_breakdown: Self::entity_breakdown(entities),
            category_breakdown: AggregationService::category_breakdown(invoices),
        }
    }

    pub fn entity_breakdown(entities: &[Entity]) -> Vec<EntityShare> {
        entities
            .iter()
            .map(|entity| EntityShare {
                id: entity.id,
                name: entity.name.clone(),
                color: entity.color.clone(),
                total_expenses: entity.total_expenses,
                share: AggregationService::entity_share(entity, entities),
            })
            .collect()
    }
}

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::currency::round_to;
use crate::domain::common::{sum_amounts, totals_by_category};
use crate::domain::{CategoryTotal, Entity, Invoice, TimeSeriesPoint, MONTH_LABELS, QUARTER_LABELS};
use crate::errors::{EngineError, EngineResult};

const MONTHS_PER_QUARTER: usize = 3;

/// Relative movement between the last two points of a series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum PeriodChange {
    /// Percentage change of the last point over the previous one.
    Percent(f64),
    /// The previous point was zero, so no ratio exists.
    NoBaseline,
}

impl PeriodChange {
    pub fn percent(&self) -> Option<f64> {
        match self {
            PeriodChange::Percent(value) => Some(*value),
            PeriodChange::NoBaseline => None,
        }
    }

    pub fn is_increase(&self) -> bool {
        match self {
            PeriodChange::Percent(value) => *value >= 0.0,
            PeriodChange::NoBaseline => true,
        }
    }
}

/// Pure summary computations over entities, invoices, and time series.
pub struct AggregationService;

impl AggregationService {
    /// Sum of the cached totals of every entity; `0` for no entities.
    pub fn total_expenses(entities: &[Entity]) -> f64 {
        sum_amounts(entities)
    }

    /// Mean amount across every point of the series.
    pub fn average_per_period(series: &[TimeSeriesPoint]) -> EngineResult<f64> {
        if series.is_empty() {
            return Err(EngineError::InvalidInput(
                "cannot average an empty series".into(),
            ));
        }
        Ok(sum_amounts(series) / series.len() as f64)
    }

    /// Percentage change of the last point relative to the one before it.
    ///
    /// The series must already be in chronological order.
    pub fn month_over_month_change(series: &[TimeSeriesPoint]) -> EngineResult<PeriodChange> {
        let [.., previous, current] = series else {
            return Err(EngineError::InvalidInput(format!(
                "period change needs at least 2 points, got {}",
                series.len()
            )));
        };
        if previous.amount == 0.0 {
            return Ok(PeriodChange::NoBaseline);
        }
        Ok(PeriodChange::Percent(
            (current.amount - previous.amount) / previous.amount * 100.0,
        ))
    }

    /// Folds a twelve-month series into Q1..Q4 sums.
    pub fn quarterly_rollup(monthly: &[TimeSeriesPoint]) -> EngineResult<Vec<TimeSeriesPoint>> {
        if monthly.len() != MONTH_LABELS.len() {
            return Err(EngineError::InvalidInput(format!(
                "quarterly rollup needs exactly 12 monthly points, got {}",
                monthly.len()
            )));
        }
        Ok(monthly
            .chunks(MONTHS_PER_QUARTER)
            .zip(QUARTER_LABELS)
            .map(|(months, label)| TimeSeriesPoint::new(label, sum_amounts(months)))
            .collect())
    }

    /// Share of the combined total held by `entity`, in percent.
    pub fn entity_share(entity: &Entity, entities: &[Entity]) -> f64 {
        let total = Self::total_expenses(entities);
        if total == 0.0 {
            return 0.0;
        }
        entity.total_expenses / total * 100.0
    }

    /// Combined total divided by the number of entities; `0` for none.
    pub fn average_per_entity(entities: &[Entity]) -> f64 {
        if entities.is_empty() {
            return 0.0;
        }
        Self::total_expenses(entities) / entities.len() as f64
    }

    /// Groups invoices by category in first-seen order.
    pub fn category_breakdown(invoices: &[Invoice]) -> Vec<CategoryTotal> {
        let mut groups: Vec<CategoryTotal> = totals_by_category(invoices)
            .into_iter()
            .map(|(name, amount)| CategoryTotal {
                name,
                amount,
                percentage: 0.0,
            })
            .collect();

        let total = sum_amounts(&groups);
        if total > 0.0 {
            for group in &mut groups {
                group.percentage = round_to(group.amount / total * 100.0, 2);
            }
        }
        groups
    }

    /// Sums invoice amounts per calendar month of `year`, Jan..Dec.
    pub fn monthly_series(invoices: &[Invoice], year: i32) -> Vec<TimeSeriesPoint> {
        let mut amounts = [0.0; 12];
        for invoice in invoices.iter().filter(|invoice| invoice.date.year() == year) {
            amounts[invoice.date.month0() as usize] += invoice.amount;
        }
        TimeSeriesPoint::monthly(amounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InvoiceStatus;
    use chrono::NaiveDate;

    fn sample_monthly() -> Vec<TimeSeriesPoint> {
        TimeSeriesPoint::monthly([
            4200.0, 3800.0, 5100.0, 4600.0, 6200.0, 5800.0, 7200.0, 6900.0, 5400.0, 6800.0,
            7500.0, 8200.0,
        ])
    }

    fn invoice(category: &str, amount: f64, date: (i32, u32, u32)) -> Invoice {
        Invoice::new(
            "INV",
            "INV-1",
            "Vendor",
            "Tech Solutions Inc",
            category,
            amount,
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            InvoiceStatus::Pending,
            "file.pdf",
        )
    }

    #[test]
    fn quarterly_rollup_sums_fixed_windows() {
        let quarters = AggregationService::quarterly_rollup(&sample_monthly()).unwrap();
        let labels: Vec<_> = quarters.iter().map(|q| q.label.as_str()).collect();
        let amounts: Vec<_> = quarters.iter().map(|q| q.amount).collect();
        assert_eq!(labels, ["Q1", "Q2", "Q3", "Q4"]);
        assert_eq!(amounts, [13100.0, 16600.0, 19500.0, 22500.0]);
    }

    #[test]
    fn quarterly_rollup_rejects_partial_years() {
        let mut series = sample_monthly();
        series.pop();
        assert!(matches!(
            AggregationService::quarterly_rollup(&series),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(AggregationService::quarterly_rollup(&[]).is_err());
    }

    #[test]
    fn month_over_month_uses_last_two_points() {
        let change = AggregationService::month_over_month_change(&sample_monthly()).unwrap();
        assert_eq!(change.percent().map(|p| round_to(p, 2)), Some(9.33));
        assert!(change.is_increase());
    }

    #[test]
    fn month_over_month_reports_missing_baseline() {
        let series = vec![TimeSeriesPoint::new("Nov", 0.0), TimeSeriesPoint::new("Dec", 10.0)];
        assert_eq!(
            AggregationService::month_over_month_change(&series),
            Ok(PeriodChange::NoBaseline)
        );
        let single = vec![TimeSeriesPoint::new("Dec", 10.0)];
        assert!(matches!(
            AggregationService::month_over_month_change(&single),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn average_requires_points() {
        assert!(AggregationService::average_per_period(&[]).is_err());
        let average = AggregationService::average_per_period(&sample_monthly()).unwrap();
        assert_eq!(average, 71700.0 / 12.0);
    }

    #[test]
    fn entity_share_is_zero_without_expenses() {
        let entities = vec![Entity::new(1, "A", "#3B82F6"), Entity::new(2, "B", "#10B981")];
        assert_eq!(AggregationService::entity_share(&entities[0], &entities), 0.0);
        assert_eq!(AggregationService::average_per_entity(&[]), 0.0);
    }

    #[test]
    fn category_breakdown_keeps_first_seen_order() {
        let invoices = vec![
            invoice("Travel", 300.0, (2024, 1, 5)),
            invoice("Software", 100.0, (2024, 1, 6)),
            invoice("Travel", 100.0, (2024, 2, 7)),
        ];
        let breakdown = AggregationService::category_breakdown(&invoices);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].name, "Travel");
        assert_eq!(breakdown[0].amount, 400.0);
        assert_eq!(breakdown[0].percentage, 80.0);
        assert_eq!(breakdown[1].percentage, 20.0);
    }

    #[test]
    fn monthly_series_buckets_by_invoice_month() {
        let invoices = vec![
            invoice("Travel", 300.0, (2024, 1, 5)),
            invoice("Travel", 50.0, (2024, 1, 30)),
            invoice("Software", 100.0, (2024, 12, 6)),
            invoice("Software", 999.0, (2023, 12, 6)),
        ];
        let series = AggregationService::monthly_series(&invoices, 2024);
        assert_eq!(series.len(), 12);
        assert_eq!(series[0], TimeSeriesPoint::new("Jan", 350.0));
        assert_eq!(series[11], TimeSeriesPoint::new("Dec", 100.0));
        assert_eq!(series[5].amount, 0.0);
    }
}

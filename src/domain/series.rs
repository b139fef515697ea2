//! Labelled points of monthly and quarterly expense series.

use serde::{Deserialize, Serialize};

use crate::domain::common::*;

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const QUARTER_LABELS: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];

/// A period label paired with the amount spent during it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSeriesPoint {
    pub label: String,
    pub amount: f64,
}

impl TimeSeriesPoint {
    pub fn new(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }

    /// Builds a Jan..Dec series from twelve amounts.
    pub fn monthly(amounts: [f64; 12]) -> Vec<TimeSeriesPoint> {
        MONTH_LABELS
            .iter()
            .zip(amounts)
            .map(|(label, amount)| TimeSeriesPoint::new(*label, amount))
            .collect()
    }
}

impl Amounted for TimeSeriesPoint {
    fn amount(&self) -> f64 {
        self.amount
    }
}

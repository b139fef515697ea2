#![doc(test(attr(deny(warnings))))]

//! Expense Core aggregates invoice-based business expenses per entity and
//! category, filters invoice lists, and guards the entity lifecycle.
//!
//! The engine (`domain` and `core`) works on in-memory records only; the
//! `config` and `storage` modules sit at the edges for hosts that want them.

pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use crate::core::services::{
    AggregationService, DashboardService, FilterService, IntakeService, InvoiceCriteria,
    PeriodChange,
};
pub use crate::core::EntityRegistry;
pub use crate::errors::{EngineError, EngineResult};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Core tracing initialized.");
    });
}

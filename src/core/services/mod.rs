pub mod aggregation_service;
pub mod dashboard_service;
pub mod filter_service;
pub mod intake_service;

pub use aggregation_service::{AggregationService, PeriodChange};
pub use dashboard_service::{DashboardOverview, DashboardService, EntityShare};
pub use filter_service::{
    summarize_invoices, FilterService, InvoiceCriteria, InvoiceSummary, InvoiceView,
};
pub use intake_service::{IntakeService, InvoiceDraft};

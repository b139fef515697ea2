#![allow(dead_code)]

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use expense_core::{
    domain::{Entity, Invoice, InvoiceStatus, TimeSeriesPoint},
    storage::{save_snapshot_to_path, ExpenseSnapshot},
};

pub const MONTHLY_AMOUNTS: [f64; 12] = [
    4200.0, 3800.0, 5100.0, 4600.0, 6200.0, 5800.0, 7200.0, 6900.0, 5400.0, 6800.0, 7500.0,
    8200.0,
];

pub fn entities() -> Vec<Entity> {
    vec![
        Entity::new(1, "Tech Solutions Inc", "#3B82F6").with_total_expenses(12500.0),
        Entity::new(2, "Marketing Pro LLC", "#10B981").with_total_expenses(8900.0),
        Entity::new(3, "Design Studio Co", "#F59E0B").with_total_expenses(6750.0),
    ]
}

pub fn monthly() -> Vec<TimeSeriesPoint> {
    TimeSeriesPoint::monthly(MONTHLY_AMOUNTS)
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).expect("valid january date")
}

pub fn invoices() -> Vec<Invoice> {
    vec![
        Invoice::new(
            "INV-001",
            "INV-2024-001",
            "Office Depot",
            "Tech Solutions Inc",
            "Office Supplies",
            245.50,
            date(15),
            InvoiceStatus::Approved,
            "office_supplies_jan.pdf",
        ),
        Invoice::new(
            "INV-002",
            "INV-2024-002",
            "Adobe Inc",
            "Design Studio Co",
            "Software",
            599.00,
            date(20),
            InvoiceStatus::Processed,
            "adobe_license.pdf",
        ),
        Invoice::new(
            "INV-003",
            "INV-2024-003",
            "Delta Airlines",
            "Marketing Pro LLC",
            "Travel",
            1250.75,
            date(22),
            InvoiceStatus::Pending,
            "flight_booking_confirmation.pdf",
        ),
        Invoice::new(
            "INV-004",
            "INV-2024-004",
            "Google Ads",
            "Marketing Pro LLC",
            "Marketing",
            850.00,
            date(25),
            InvoiceStatus::Approved,
            "google_ads_invoice.pdf",
        ),
        Invoice::new(
            "INV-005",
            "INV-2024-005",
            "Best Buy",
            "Tech Solutions Inc",
            "Equipment",
            1899.99,
            date(28),
            InvoiceStatus::Rejected,
            "laptop_purchase.pdf",
        ),
    ]
}

pub fn snapshot() -> ExpenseSnapshot {
    ExpenseSnapshot {
        entities: entities(),
        invoices: invoices(),
        monthly: monthly(),
        highest_entity_id: 3,
    }
}

/// Writes the sample snapshot into `dir` and returns its path.
pub fn write_snapshot(dir: &Path) -> PathBuf {
    let path = dir.join("snapshot.json");
    save_snapshot_to_path(&snapshot(), &path).expect("write sample snapshot");
    path
}

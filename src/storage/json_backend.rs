use std::{fs, path::Path};

use crate::{
    errors::StoreResult,
    utils::write_atomic,
};

use super::{ExpenseSnapshot, SnapshotBackend};

/// Reads and writes snapshots as pretty-printed JSON files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSnapshotStore;

impl SnapshotBackend for JsonSnapshotStore {
    fn load(&self, path: &Path) -> StoreResult<ExpenseSnapshot> {
        load_snapshot_from_path(path)
    }

    fn save(&self, snapshot: &ExpenseSnapshot, path: &Path) -> StoreResult<()> {
        save_snapshot_to_path(snapshot, path)
    }
}

/// Loads a snapshot and rejects it unless [`ExpenseSnapshot::validate`] passes.
pub fn load_snapshot_from_path(path: &Path) -> StoreResult<ExpenseSnapshot> {
    let data = fs::read_to_string(path)?;
    let snapshot: ExpenseSnapshot = serde_json::from_str(&data)?;
    snapshot.validate()?;
    tracing::info!(
        path = %path.display(),
        entities = snapshot.entities.len(),
        invoices = snapshot.invoices.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

pub fn save_snapshot_to_path(snapshot: &ExpenseSnapshot, path: &Path) -> StoreResult<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    write_atomic(path, &json)?;
    tracing::info!(path = %path.display(), "snapshot saved");
    Ok(())
}

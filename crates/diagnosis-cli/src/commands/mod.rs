pub mod diagnose;
pub mod flip;
pub mod kominka;
pub mod legacy;
pub mod show;
pub mod subsidy;

use std::path::Path;

use diagnosis_core::{DiagnosisRecord, FileStore, ResultStore};

/// Write the record to the file store when one is configured.
pub fn persist(
    store_dir: Option<&Path>,
    record: DiagnosisRecord,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = store_dir {
        let mut store = FileStore::new(dir);
        store.save(&record)?;
        tracing::info!(path = %store.path().display(), brand = %record.brand(), "stored diagnosis");
    }
    Ok(())
}

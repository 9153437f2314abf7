//! Single-slot storage for the latest diagnosis record.
//!
//! Every save replaces the previous record outright; there is no history
//! and no merge.

use std::fs;
use std::path::{Path, PathBuf};

use crate::handoff::DiagnosisRecord;
use crate::DiagnosisResult;

/// Key the latest record is stored under.
pub const STORAGE_KEY: &str = "diagnosis_result";

pub trait ResultStore {
    fn save(&mut self, record: &DiagnosisRecord) -> DiagnosisResult<()>;

    /// `None` when nothing has been saved yet.
    fn load(&self) -> DiagnosisResult<Option<DiagnosisRecord>>;
}

/// Holds the serialized record in memory, like a browser storage slot.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw JSON currently stored.
    pub fn raw(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl ResultStore for MemoryStore {
    fn save(&mut self, record: &DiagnosisRecord) -> DiagnosisResult<()> {
        self.slot = Some(record.to_json()?);
        Ok(())
    }

    fn load(&self) -> DiagnosisResult<Option<DiagnosisRecord>> {
        self.slot
            .as_deref()
            .map(DiagnosisRecord::from_json)
            .transpose()
    }
}

/// Stores the record as `<dir>/diagnosis_result.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        FileStore {
            path: dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultStore for FileStore {
    fn save(&mut self, record: &DiagnosisRecord) -> DiagnosisResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(record)?;
        // Readers only ever see a complete record.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), brand = %record.brand(), "saved diagnosis record");
        Ok(())
    }

    fn load(&self) -> DiagnosisResult<Option<DiagnosisRecord>> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(Some(DiagnosisRecord::from_json(&json)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

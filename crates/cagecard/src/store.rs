use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Document store with drop-and-bulk-insert semantics: each collection is
/// one JSON array file under the store root, replaced wholesale on every
/// write. The temp-then-rename dance keeps a failed write from leaving a
/// truncated collection behind.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{collection}.json"))
    }

    pub fn replace_collection<T: Serialize>(
        &self,
        collection: &str,
        records: &[T],
    ) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.root)?;
        let json = serde_json::to_vec_pretty(records)?;

        let path = self.collection_path(collection);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &json)?;
        fs::rename(&tmp, &path)?;

        log::info!(
            "Wrote {} record(s) to collection '{}' ({})",
            records.len(),
            collection,
            path.display()
        );
        Ok(path)
    }
}

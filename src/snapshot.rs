use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use crate::constants::SNAPSHOT_TEMP_EXTENSION;
use crate::ingest::record::Dataset;

/// JSON file holding the normalized dataset between runs.
///
/// The ingestion pipeline never touches this; callers load a snapshot, pass it
/// in, and save whatever a successful run hands back.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing snapshot is an empty dataset.
    pub async fn load(&self) -> Result<Dataset> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            debug!("No snapshot at {}, starting empty", self.path.display());
            return Ok(Dataset::default());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read snapshot {}", self.path.display()))?;
        let dataset = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse snapshot {}", self.path.display()))?;
        Ok(dataset)
    }

    /// Writes to a sibling temp file and renames it over the snapshot.
    pub async fn save(&self, dataset: &Dataset) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let temp_path = self.path.with_extension(SNAPSHOT_TEMP_EXTENSION);
        let content = serde_json::to_string_pretty(dataset)?;
        fs::write(&temp_path, content)
            .await
            .with_context(|| format!("Failed to write snapshot {}", temp_path.display()))?;
        fs::rename(&temp_path, &self.path).await?;

        debug!(
            "Saved snapshot with {} records to {}",
            dataset.colleges.len(),
            self.path.display()
        );
        Ok(())
    }
}

pub mod model;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use crate::constants::*;

// Re-export main types
pub use self::model::{Config, FieldDefaults, IngestConfig, IoConfig, LoggingConfig};

impl Config {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when it exists, otherwise falls back to the built-in defaults.
    pub async fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if fs::try_exists(path.as_ref()).await.unwrap_or(false) {
            Self::load(path).await
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.ingest.chunk_size_lines < MIN_CHUNK_SIZE_LINES
            || self.ingest.chunk_size_lines > MAX_CHUNK_SIZE_LINES
        {
            anyhow::bail!(
                "chunk_size_lines must be between {} and {}",
                MIN_CHUNK_SIZE_LINES,
                MAX_CHUNK_SIZE_LINES
            );
        }

        if self.ingest.preview_rows > MAX_PREVIEW_ROWS {
            anyhow::bail!("preview_rows cannot exceed {}", MAX_PREVIEW_ROWS);
        }

        if self.defaults.round.trim().is_empty() {
            anyhow::bail!("defaults.round must not be empty");
        }

        if self.defaults.category.trim().is_empty() {
            anyhow::bail!("defaults.category must not be empty");
        }

        if !matches!(self.logging.verbosity.as_str(), "silent" | "normal" | "verbose") {
            anyhow::bail!("verbosity must be 'silent', 'normal', or 'verbose'");
        }

        if self.io.snapshot_path.trim().is_empty() {
            anyhow::bail!("snapshot_path must not be empty");
        }

        Ok(())
    }
}

//! Environment/runtime helpers
//!
//! Sanity checks to ensure the directory holding the record table exists at startup.

use std::path::Path;

use tracing::{debug, warn};

/// Ensure the parent directory of `table_path` exists, creating it if needed.
pub async fn ensure_data_dir(table_path: &Path) -> anyhow::Result<()> {
    let Some(dir) = table_path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        debug!(path = %table_path.display(), "table lives in the working directory");
        return Ok(());
    };
    if tokio::fs::metadata(dir).await.is_err() {
        warn!(dir = %dir.display(), "data directory missing; creating it");
    }
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    Ok(())
}

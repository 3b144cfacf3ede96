//! Runtime wiring
//!
//! Builds the configured storage backend so binaries and tests only deal with
//! `Arc<dyn UserStore>`.

use std::sync::Arc;

use configs::{StorageBackend, StorageConfig};
use tracing::info;

use crate::storage::{FileUserStore, MemoryUserStore, TimedStore, UserStore};
use crate::user_service::RecordService;

/// Open the store described by `cfg`, with every call bounded by `op_timeout_ms`.
pub async fn open_store(cfg: &StorageConfig) -> anyhow::Result<Arc<dyn UserStore>> {
    cfg.validate()?;
    let timeout = cfg.op_timeout();
    let store: Arc<dyn UserStore> = match cfg.backend {
        StorageBackend::Memory => {
            info!(backend = "memory", timeout_ms = cfg.op_timeout_ms, "opening user table");
            Arc::new(TimedStore::new(MemoryUserStore::new(), timeout))
        }
        StorageBackend::File => {
            common::env::ensure_data_dir(&cfg.path).await?;
            let file = FileUserStore::open(&cfg.path).await?;
            info!(
                backend = "file",
                path = %cfg.path.display(),
                timeout_ms = cfg.op_timeout_ms,
                "opening user table"
            );
            Arc::new(TimedStore::new(file, timeout))
        }
    };
    Ok(store)
}

/// Convenience: `open_store` wrapped in a `RecordService`.
pub async fn record_service(cfg: &StorageConfig) -> anyhow::Result<RecordService<dyn UserStore>> {
    Ok(RecordService::new(open_store(cfg).await?))
}

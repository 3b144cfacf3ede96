use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;

use super::json_map_store::JsonMapStore;
use super::UserStore;
use crate::domain::{FieldUpdates, UserRecord};
use crate::errors::ServiceError;

/// User table persisted as a JSON object of `user_id -> record`.
#[derive(Clone)]
pub struct FileUserStore {
    table: Arc<JsonMapStore<String, UserRecord>>,
}

impl FileUserStore {
    /// Open the table file, creating it if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let table = JsonMapStore::<String, UserRecord>::open(path).await?;
        Ok(Self { table })
    }
}

#[async_trait]
impl UserStore for FileUserStore {
    async fn get(&self, user_id: &str) -> Result<Option<UserRecord>, ServiceError> {
        Ok(self.table.get(&user_id.to_string()).await)
    }

    async fn put(&self, record: UserRecord) -> Result<(), ServiceError> {
        self.table.insert(record.user_id.clone(), record).await
    }

    async fn delete(&self, user_id: &str) -> Result<bool, ServiceError> {
        self.table.remove(&user_id.to_string()).await
    }

    async fn scan(&self) -> Result<Vec<UserRecord>, ServiceError> {
        Ok(self.table.values().await)
    }

    async fn update_fields(
        &self,
        user_id: &str,
        updates: &FieldUpdates,
    ) -> Result<bool, ServiceError> {
        self.table.modify(&user_id.to_string(), |rec| rec.apply(updates)).await
    }
}

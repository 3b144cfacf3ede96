use async_trait::async_trait;
use dashmap::DashMap;

use super::UserStore;
use crate::domain::{FieldUpdates, UserRecord};
use crate::errors::ServiceError;

/// In-process table. Each call locks a single shard, so operations on
/// different keys never contend and same-key writes are last-write-wins.
#[derive(Default)]
pub struct MemoryUserStore {
    items: DashMap<String, UserRecord>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get(&self, user_id: &str) -> Result<Option<UserRecord>, ServiceError> {
        Ok(self.items.get(user_id).map(|r| r.value().clone()))
    }

    async fn put(&self, record: UserRecord) -> Result<(), ServiceError> {
        self.items.insert(record.user_id.clone(), record);
        Ok(())
    }

    async fn delete(&self, user_id: &str) -> Result<bool, ServiceError> {
        Ok(self.items.remove(user_id).is_some())
    }

    async fn scan(&self) -> Result<Vec<UserRecord>, ServiceError> {
        Ok(self.items.iter().map(|r| r.value().clone()).collect())
    }

    async fn update_fields(
        &self,
        user_id: &str,
        updates: &FieldUpdates,
    ) -> Result<bool, ServiceError> {
        match self.items.get_mut(user_id) {
            Some(mut rec) => {
                rec.apply(updates);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

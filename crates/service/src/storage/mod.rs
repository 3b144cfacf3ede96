//! Storage accessor for the user table.
//!
//! `UserStore` is the only seam between the record service and persistence.
//! Backends provide per-key atomicity; nothing spans more than one key.

use async_trait::async_trait;

use crate::domain::{FieldUpdates, UserRecord};
use crate::errors::ServiceError;

pub mod file;
pub mod json_map_store;
pub mod memory;
pub mod timed;

pub use file::FileUserStore;
pub use memory::MemoryUserStore;
pub use timed::TimedStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, user_id: &str) -> Result<Option<UserRecord>, ServiceError>;
    /// Unconditional write of the whole item.
    async fn put(&self, record: UserRecord) -> Result<(), ServiceError>;
    /// Returns whether the key existed.
    async fn delete(&self, user_id: &str) -> Result<bool, ServiceError>;
    async fn scan(&self) -> Result<Vec<UserRecord>, ServiceError>;
    /// Set the given attributes only if the key exists; returns whether it did.
    async fn update_fields(
        &self,
        user_id: &str,
        updates: &FieldUpdates,
    ) -> Result<bool, ServiceError>;
}

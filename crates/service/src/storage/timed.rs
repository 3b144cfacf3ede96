use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::UserStore;
use crate::domain::{FieldUpdates, UserRecord};
use crate::errors::ServiceError;

/// Bounds every call on the wrapped store by `timeout`.
///
/// An elapsed deadline surfaces as `ServiceError::Timeout` and the inner call is
/// dropped. The file backend publishes a write in memory only after the file is
/// replaced, so a dropped write is never visible to later reads in this process;
/// the file itself may already hold it if the rename completed.
pub struct TimedStore<S> {
    inner: S,
    timeout: Duration,
}

impl<S: UserStore> TimedStore<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn bounded<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = Result<T, ServiceError>> + Send,
    ) -> Result<T, ServiceError> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(res) => res,
            Err(_) => {
                warn!(op, timeout_ms = self.timeout.as_millis() as u64, "store call timed out");
                Err(ServiceError::Timeout(self.timeout))
            }
        }
    }
}

#[async_trait]
impl<S: UserStore> UserStore for TimedStore<S> {
    async fn get(&self, user_id: &str) -> Result<Option<UserRecord>, ServiceError> {
        self.bounded("get", self.inner.get(user_id)).await
    }

    async fn put(&self, record: UserRecord) -> Result<(), ServiceError> {
        self.bounded("put", self.inner.put(record)).await
    }

    async fn delete(&self, user_id: &str) -> Result<bool, ServiceError> {
        self.bounded("delete", self.inner.delete(user_id)).await
    }

    async fn scan(&self) -> Result<Vec<UserRecord>, ServiceError> {
        self.bounded("scan", self.inner.scan()).await
    }

    async fn update_fields(
        &self,
        user_id: &str,
        updates: &FieldUpdates,
    ) -> Result<bool, ServiceError> {
        self.bounded("update_fields", self.inner.update_fields(user_id, updates)).await
    }
}

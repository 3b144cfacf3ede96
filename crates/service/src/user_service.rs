use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::{NewUserInput, UserPatch, UserRecord};
use crate::errors::ServiceError;
use crate::storage::UserStore;
use crate::validate;

/// Record service: field validation in front of the store accessor.
///
/// Holds no state of its own beyond the injected store handle.
pub struct RecordService<S: UserStore + ?Sized> {
    store: Arc<S>,
}

impl<S: UserStore + ?Sized> Clone for RecordService<S> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store) }
    }
}

fn require_id(user_id: Option<&str>) -> Result<&str, ServiceError> {
    match user_id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(ServiceError::MissingId),
    }
}

impl<S: UserStore + ?Sized> RecordService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validate and persist a new record under a freshly generated id.
    ///
    /// # Examples
    /// ```
    /// use service::{domain::NewUserInput, storage::MemoryUserStore, user_service::RecordService};
    /// use std::sync::Arc;
    /// let svc = RecordService::new(Arc::new(MemoryUserStore::new()));
    /// let input = NewUserInput {
    ///     full_name: Some("Asha Rao".into()),
    ///     mob_num: Some("1234567890".into()),
    ///     pan_num: Some("ABCDE1234F".into()),
    /// };
    /// let created = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert!(!created.user_id.is_empty());
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewUserInput) -> Result<UserRecord, ServiceError> {
        let full_name = input.full_name.unwrap_or_default();
        let mob_num = input.mob_num.unwrap_or_default();
        let pan_num = input.pan_num.unwrap_or_default();
        validate::validate_all(&full_name, &mob_num, &pan_num)?;

        let user_id = Uuid::new_v4().to_string();
        let record = UserRecord { user_id, full_name, mob_num, pan_num };
        self.store.put(record.clone()).await?;
        info!(user_id = %record.user_id, "user_created");
        Ok(record)
    }

    /// Full scan of the table. Order is whatever the store yields.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<UserRecord>, ServiceError> {
        let users = self.store.scan().await?;
        debug!(count = users.len(), "users_scanned");
        Ok(users)
    }

    #[instrument(skip(self))]
    pub async fn get_one(&self, user_id: Option<&str>) -> Result<UserRecord, ServiceError> {
        let id = require_id(user_id)?;
        self.store.get(id).await?.ok_or(ServiceError::NotFound)
    }

    /// Partial update: only fields present in `patch` are validated and written.
    ///
    /// # Examples
    /// ```
    /// use service::{domain::{NewUserInput, UserPatch}, storage::MemoryUserStore, user_service::RecordService};
    /// use std::sync::Arc;
    /// let svc = RecordService::new(Arc::new(MemoryUserStore::new()));
    /// let created = tokio_test::block_on(svc.create(NewUserInput {
    ///     full_name: Some("Asha Rao".into()),
    ///     mob_num: Some("1234567890".into()),
    ///     pan_num: Some("ABCDE1234F".into()),
    /// })).unwrap();
    /// let patch = UserPatch { full_name: Some("Asha R".into()), ..Default::default() };
    /// tokio_test::block_on(svc.update(Some(&created.user_id), patch)).unwrap();
    /// let got = tokio_test::block_on(svc.get_one(Some(&created.user_id))).unwrap();
    /// assert_eq!(got.full_name, "Asha R");
    /// assert_eq!(got.mob_num, "1234567890");
    /// ```
    #[instrument(skip(self, patch))]
    pub async fn update(
        &self,
        user_id: Option<&str>,
        patch: UserPatch,
    ) -> Result<(), ServiceError> {
        let id = require_id(user_id)?;
        if self.store.get(id).await?.is_none() {
            return Err(ServiceError::NotFound);
        }

        let updates = patch.into_updates()?;
        if updates.is_empty() {
            debug!(user_id = %id, "empty update, nothing to write");
            return Ok(());
        }

        // Deleted between the lookup and the write.
        if !self.store.update_fields(id, &updates).await? {
            return Err(ServiceError::NotFound);
        }
        let fields: Vec<&str> = updates.keys().map(|f| f.as_str()).collect();
        info!(user_id = %id, ?fields, "user_updated");
        Ok(())
    }

    /// Lookup then delete by key. A missing key is a server error, not a client one.
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: Option<&str>) -> Result<(), ServiceError> {
        let id = require_id(user_id).map_err(|_| ServiceError::MissingDeleteKey)?;
        if self.store.get(id).await?.is_none() {
            return Err(ServiceError::NotFound);
        }
        if !self.store.delete(id).await? {
            return Err(ServiceError::NotFound);
        }
        info!(user_id = %id, "user_deleted");
        Ok(())
    }
}

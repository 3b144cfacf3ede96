#![cfg(test)]
use std::sync::Arc;

use crate::domain::NewUserInput;
use crate::storage::MemoryUserStore;
use crate::user_service::RecordService;

/// Service over a fresh in-memory table; the store handle is returned for inspection.
pub fn memory_service() -> (RecordService<MemoryUserStore>, Arc<MemoryUserStore>) {
    let store = Arc::new(MemoryUserStore::new());
    (RecordService::new(Arc::clone(&store)), store)
}

pub fn valid_input() -> NewUserInput {
    NewUserInput {
        full_name: Some("Asha Rao".into()),
        mob_num: Some("1234567890".into()),
        pan_num: Some("ABCDE1234F".into()),
    }
}

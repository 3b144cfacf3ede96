//! Service layer for user records.
//! - `validate`: field formats (name, mobile, PAN).
//! - `storage`: the `UserStore` accessor and its backends.
//! - `user_service`: create / list / get / update / delete over an injected store.

pub mod errors;
pub mod validate;
pub mod domain;
pub mod storage;
pub mod user_service;
pub mod runtime;
#[cfg(test)]
pub mod test_support;

pub use errors::{ErrorKind, ServiceError};
pub use user_service::RecordService;

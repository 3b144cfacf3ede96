//! Shared building blocks for the user record workspace.
//! - `types`: wire envelopes shared by the HTTP layer and its tests.
//! - `utils::logging`: tracing subscriber initialisation.
//! - `env`: startup sanity checks for the data directory.

pub mod types;
pub mod utils;
pub mod env;

//! Shared types for the Crab back-office
//!
//! Product and category models, form draft rules and API response
//! envelopes used by the admin client.

pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

//! Data models
//!
//! Shared between the admin client and the back-office API.
//! IDs are the backend's string `_id` values.

pub mod category;
pub mod product;

// Re-exports
pub use category::*;
pub use product::*;

//! API Response types
//!
//! Envelopes used by the back-office REST API:
//! ```json
//! { "data": [ ... ] }
//! { "message": "Product created" }
//! ```

use serde::{Deserialize, Serialize};

/// Collection / entity response wrapped in `data`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Write response carrying a human-readable message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Error body returned on non-2xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

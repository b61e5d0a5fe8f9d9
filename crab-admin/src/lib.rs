//! Crab Admin - back-office product editor
//!
//! Headless client for the "Add / Edit Product" page: form state with
//! per-field validation, the category selector's options, and the
//! upload-then-save submission workflow against the REST backend.

pub mod category;
pub mod config;
pub mod editor;
pub mod error;
pub mod form;
pub mod http;
pub mod logger;
pub mod upload;

pub use category::{CategoryLoader, LoadStatus};
pub use config::ClientConfig;
pub use editor::{
    EditorMode, EditorParams, Notification, NotificationColor, ProductEditor, Route, SubmitError,
    SubmitOutcome, SubmitState,
};
pub use error::{ClientError, ClientResult};
pub use form::{Field, FieldErrors, ProductForm};
pub use http::{HttpClient, NetworkHttpClient};
pub use upload::{HttpImageUploader, ImageUploader, PRODUCT_IMAGE_FOLDER};

// Re-export shared models for convenience
pub use shared::models::{
    Category, CategoryRef, ImageEntry, Product, ProductDraft, ProductPayload, Season,
    SelectOption, Size,
};

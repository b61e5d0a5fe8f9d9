//! Product editor
//!
//! Ties the form, the category loader and the submission workflow together
//! for one "Add Product" / "Edit Product" page instance.
//!
//! Submission lifecycle:
//!
//! ```text
//! Idle → Uploading → Submitting → Success
//!            │            │
//!            └────────────┴──────→ Failed
//! ```
//!
//! A new submission may start from `Idle`, `Success` or `Failed`.

use serde::Deserialize;
use shared::models::{ImageEntry, Product, SelectOption};
use shared::response::MessageResponse;
use thiserror::Error;
use tokio::sync::watch;

use crate::category::{CategoryLoader, LoadStatus};
use crate::error::{ClientError, ClientResult};
use crate::form::{Field, FieldErrors, ProductForm};
use crate::http::HttpClient;
use crate::upload::{ImageUploader, PRODUCT_IMAGE_FOLDER};

const PRODUCT_PATH: &str = "product";

/// Navigation state handed to the page
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorParams {
    #[serde(default)]
    pub is_update: bool,
    pub data: Option<Product>,
}

impl EditorParams {
    /// Params opening the editor on an existing record
    pub fn update(record: Product) -> Self {
        Self {
            is_update: true,
            data: Some(record),
        }
    }
}

/// Whether the editor creates a new product or updates an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit { product_id: String },
}

/// Page destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ViewProducts,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::ViewProducts => "/products",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationColor {
    Green,
}

/// Toast shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub color: NotificationColor,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            title: "Success".to_string(),
            message: message.into(),
            color: NotificationColor::Green,
        }
    }
}

/// Submission state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Uploading,
    Submitting,
    Success,
    Failed,
}

impl SubmitState {
    /// Submit control shows a spinner and ignores clicks
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmitState::Uploading | SubmitState::Submitting)
    }
}

/// What the page does after a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub notification: Notification,
    pub redirect: Route,
}

/// Submission error
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(FieldErrors),

    #[error("Image upload failed: {0}")]
    Upload(#[source] ClientError),

    #[error("Product request failed: {0}")]
    Request(#[source] ClientError),
}

/// Publishes `Failed` if a submission is dropped before it settles
struct InFlightGuard<'a> {
    state: &'a watch::Sender<SubmitState>,
    settled: bool,
}

impl<'a> InFlightGuard<'a> {
    fn start(state: &'a watch::Sender<SubmitState>) -> Self {
        state.send_replace(SubmitState::Uploading);
        Self {
            state,
            settled: false,
        }
    }

    fn advance(&self, next: SubmitState) {
        self.state.send_replace(next);
    }

    fn settle(mut self, last: SubmitState) {
        self.state.send_replace(last);
        self.settled = true;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.state.send_replace(SubmitState::Failed);
        }
    }
}

/// Replace file entries by uploaded URLs, keeping the draft order
fn merge_image_urls(images: &[ImageEntry], uploaded: Vec<String>) -> ClientResult<Vec<String>> {
    let expected = images.iter().filter(|e| !e.is_uploaded()).count();
    if uploaded.len() != expected {
        return Err(ClientError::InvalidResponse(format!(
            "Uploader returned {} URLs for {} files",
            uploaded.len(),
            expected
        )));
    }

    let mut uploaded = uploaded.into_iter();
    Ok(images
        .iter()
        .filter_map(|entry| match entry {
            ImageEntry::Url(url) => Some(url.clone()),
            ImageEntry::File(_) => uploaded.next(),
        })
        .collect())
}

/// Add / edit product page
pub struct ProductEditor<C, U> {
    http: C,
    uploader: U,
    mode: EditorMode,
    form: ProductForm,
    categories: CategoryLoader,
    state: watch::Sender<SubmitState>,
}

impl<C: HttpClient, U: ImageUploader> ProductEditor<C, U> {
    /// Open the editor; `params` with `is_update` and a record switch to edit mode
    pub fn new(http: C, uploader: U, params: Option<EditorParams>) -> Self {
        let (mode, form) = match params {
            Some(EditorParams {
                is_update: true,
                data: Some(record),
            }) => (
                EditorMode::Edit {
                    product_id: record.id.clone(),
                },
                ProductForm::from_record(&record),
            ),
            Some(EditorParams {
                is_update: true,
                data: None,
            }) => {
                tracing::warn!("Edit requested without a product record, opening in create mode");
                (EditorMode::Create, ProductForm::new())
            }
            _ => (EditorMode::Create, ProductForm::new()),
        };

        let (state, _) = watch::channel(SubmitState::Idle);
        Self {
            http,
            uploader,
            mode,
            form,
            categories: CategoryLoader::new(),
            state,
        }
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_update(&self) -> bool {
        matches!(self.mode, EditorMode::Edit { .. })
    }

    /// Page heading
    pub fn heading(&self) -> &'static str {
        if self.is_update() {
            "Edit Product"
        } else {
            "Add Product"
        }
    }

    /// Label of the submit control
    pub fn submit_label(&self) -> &'static str {
        self.heading()
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.form
    }

    /// Load the category selector's options (one request per editor)
    pub async fn load_categories(&mut self) -> ClientResult<&[SelectOption]> {
        self.categories.load(&self.http).await
    }

    pub fn category_options(&self) -> &[SelectOption] {
        self.categories.options()
    }

    pub fn state(&self) -> SubmitState {
        *self.state.borrow()
    }

    /// Watch submission state changes (e.g. to drive the submit spinner)
    pub fn subscribe(&self) -> watch::Receiver<SubmitState> {
        self.state.subscribe()
    }

    /// Submit control enabled
    pub fn can_submit(&self) -> bool {
        !self.state().is_in_flight() && self.form.is_valid()
    }

    /// Leave without saving
    pub fn cancel(&self) -> Route {
        Route::ViewProducts
    }

    /// Upload pending images, then create or update the product
    ///
    /// On success the form is reset and the caller gets the notification to
    /// show and the route to navigate to. Already uploaded images are not
    /// removed if the create / update request fails.
    ///
    /// Takes `&mut self`, so a second submission cannot start while one is
    /// pending; `subscribe` lets a UI disable its control for that window.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, SubmitError> {
        let draft = self.form.submit().map_err(SubmitError::Invalid)?;
        if self.categories.status() == LoadStatus::Loaded
            && !self.categories.contains(&draft.category)
        {
            self.form
                .set_error(Field::Category, "Please select product category");
            return Err(SubmitError::Invalid(self.form.errors().clone()));
        }

        let guard = InFlightGuard::start(&self.state);

        let files = draft.pending_uploads();
        let uploaded = if files.is_empty() {
            Vec::new()
        } else {
            self.uploader
                .upload_images(&files, PRODUCT_IMAGE_FOLDER)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, files = files.len(), "Image upload failed");
                    SubmitError::Upload(e)
                })?
        };
        let fresh_urls = uploaded.clone();
        let images = merge_image_urls(&draft.images, uploaded).map_err(SubmitError::Upload)?;

        guard.advance(SubmitState::Submitting);
        let payload = draft.into_payload(images);

        let result: ClientResult<MessageResponse> = match &self.mode {
            EditorMode::Create => self.http.post(PRODUCT_PATH, &payload).await,
            EditorMode::Edit { product_id } => {
                self.http
                    .put(&format!("{PRODUCT_PATH}/{product_id}"), &payload)
                    .await
            }
        };

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, mode = ?self.mode, "Product request failed");
                if !fresh_urls.is_empty() {
                    tracing::warn!(urls = ?fresh_urls, "Uploaded images left without a product");
                }
                return Err(SubmitError::Request(e));
            }
        };

        guard.settle(SubmitState::Success);
        self.form.reset();
        tracing::info!(mode = ?self.mode, message = %response.message, "Product saved");

        Ok(SubmitOutcome {
            notification: Notification::success(response.message),
            redirect: Route::ViewProducts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_order() {
        let images = vec![
            ImageEntry::url("https://cdn/a.jpg"),
            ImageEntry::file("/tmp/b.png"),
            ImageEntry::url("https://cdn/c.jpg"),
            ImageEntry::file("/tmp/d.png"),
        ];
        let merged = merge_image_urls(
            &images,
            vec!["https://cdn/b.png".into(), "https://cdn/d.png".into()],
        )
        .unwrap();
        assert_eq!(
            merged,
            vec![
                "https://cdn/a.jpg",
                "https://cdn/b.png",
                "https://cdn/c.jpg",
                "https://cdn/d.png"
            ]
        );
    }

    #[test]
    fn test_merge_rejects_short_upload_result() {
        let images = vec![ImageEntry::file("/tmp/a.png"), ImageEntry::file("/tmp/b.png")];
        let err = merge_image_urls(&images, vec!["https://cdn/a.png".into()]).unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }

    #[test]
    fn test_guard_marks_failed_when_dropped() {
        let (state, rx) = watch::channel(SubmitState::Idle);
        {
            let guard = InFlightGuard::start(&state);
            assert_eq!(*rx.borrow(), SubmitState::Uploading);
            guard.advance(SubmitState::Submitting);
            assert!(rx.borrow().is_in_flight());
        }
        assert_eq!(*rx.borrow(), SubmitState::Failed);

        InFlightGuard::start(&state).settle(SubmitState::Success);
        assert_eq!(*rx.borrow(), SubmitState::Success);
    }

    #[test]
    fn test_route_path() {
        assert_eq!(Route::ViewProducts.path(), "/products");
    }
}

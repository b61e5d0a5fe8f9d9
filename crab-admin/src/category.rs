//! Category loader
//!
//! Fetches `GET /category` once per editor and keeps the selectable
//! (non-blocked) categories as select options.

use shared::models::{Category, SelectOption};
use shared::response::DataResponse;

use crate::error::ClientResult;
use crate::http::HttpClient;

const CATEGORY_PATH: &str = "category";

/// Load status of the category list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    NotLoaded,
    Loaded,
    Failed,
}

/// Map categories to select options, dropping blocked ones
pub fn selectable_options(categories: &[Category]) -> Vec<SelectOption> {
    categories
        .iter()
        .filter(|c| c.is_selectable())
        .map(SelectOption::from)
        .collect()
}

/// Category options for the category selector
#[derive(Debug, Clone, Default)]
pub struct CategoryLoader {
    status: LoadStatus,
    options: Vec<SelectOption>,
}

impl CategoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch categories on first call; later calls return the stored list
    /// without another request, including after a failed fetch.
    pub async fn load<C: HttpClient>(&mut self, http: &C) -> ClientResult<&[SelectOption]> {
        if self.status != LoadStatus::NotLoaded {
            return Ok(&self.options);
        }

        match http.get::<DataResponse<Vec<Category>>>(CATEGORY_PATH).await {
            Ok(response) => {
                self.options = selectable_options(&response.data);
                self.status = LoadStatus::Loaded;
                tracing::info!(
                    total = response.data.len(),
                    selectable = self.options.len(),
                    "Categories loaded"
                );
                Ok(&self.options)
            }
            Err(e) => {
                self.status = LoadStatus::Failed;
                tracing::warn!(error = %e, "Failed to load categories");
                Err(e)
            }
        }
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Whether `id` is a selectable category
    pub fn contains(&self, id: &str) -> bool {
        self.options.iter().any(|o| o.value == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str, title: &str, blocked: bool) -> Category {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "title": title,
            "blocked": blocked
        }))
        .unwrap()
    }

    #[test]
    fn test_blocked_categories_are_dropped() {
        let options = selectable_options(&[
            category("c1", "Knitwear", false),
            category("c2", "Archived", true),
        ]);
        assert_eq!(options, vec![SelectOption::new("Knitwear", "c1")]);
    }

    #[test]
    fn test_new_loader_is_empty() {
        let loader = CategoryLoader::new();
        assert_eq!(loader.status(), LoadStatus::NotLoaded);
        assert_eq!(LoadStatus::default(), LoadStatus::NotLoaded);
        assert!(loader.options().is_empty());
        assert!(!loader.contains("c1"));
    }
}

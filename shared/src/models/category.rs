//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    /// Blocked categories cannot be assigned to products
    #[serde(default)]
    pub blocked: bool,
    /// Remaining backend fields, kept as-is
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Category {
    pub fn is_selectable(&self) -> bool {
        !self.blocked
    }
}

/// Option entry for select widgets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl From<&Category> for SelectOption {
    fn from(category: &Category) -> Self {
        Self::new(&category.title, &category.id)
    }
}

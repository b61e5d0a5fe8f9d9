//! Product form state
//!
//! Holds the [`ProductDraft`] being edited, the per-field error messages and
//! the color palette. Every setter re-runs the rules and updates only the
//! error of the field it touched.

use std::collections::BTreeMap;

use shared::models::{ImageEntry, Product, ProductDraft, Season, Size};
use validator::Validate;

/// Colors offered before the user creates any
pub const DEFAULT_COLORS: &[&str] = &[
    "Black", "White", "Red", "Blue", "Green", "Yellow", "Pink", "Purple", "Orange", "Grey",
    "Brown", "Beige",
];

/// Form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Category,
    Season,
    Colors,
    Sizes,
    Price,
    Sale,
    Quantity,
    Sku,
    Description,
    Images,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::Title,
        Field::Category,
        Field::Season,
        Field::Colors,
        Field::Sizes,
        Field::Price,
        Field::Sale,
        Field::Quantity,
        Field::Sku,
        Field::Description,
        Field::Images,
    ];

    /// Name of the draft field (also the JSON key)
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Category => "category",
            Field::Season => "season",
            Field::Colors => "colors",
            Field::Sizes => "sizes",
            Field::Price => "price",
            Field::Sale => "sale",
            Field::Quantity => "quantity",
            Field::Sku => "sku",
            Field::Description => "description",
            Field::Images => "images",
        }
    }

    /// Whether the field is marked required on the page
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            Field::Title
                | Field::Category
                | Field::Price
                | Field::Quantity
                | Field::Sku
                | Field::Description
                | Field::Images
        )
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error message per failing field
pub type FieldErrors = BTreeMap<Field, String>;

/// First rule violation reported for `field`, if any
fn field_error(draft: &ProductDraft, field: Field) -> Option<String> {
    let errors = draft.validate().err()?;
    let field_errors = errors.field_errors();
    let first = field_errors.get(field.as_str())?.first()?;
    Some(
        first
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| first.code.to_string()),
    )
}

/// Form state holder for the product editor
#[derive(Debug, Clone)]
pub struct ProductForm {
    values: ProductDraft,
    errors: FieldErrors,
    /// Append-only; grows through [`ProductForm::create_color`]
    palette: Vec<String>,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductForm {
    /// Empty form with the default palette
    pub fn new() -> Self {
        Self {
            values: ProductDraft::default(),
            errors: FieldErrors::new(),
            palette: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Form seeded from an existing record
    pub fn from_record(record: &Product) -> Self {
        let mut form = Self::new();
        form.set_values(ProductDraft::from_record(record));
        form
    }

    /// Replace all values at once (edit mode initialization)
    ///
    /// Clears displayed errors; colors missing from the palette are appended.
    pub fn set_values(&mut self, draft: ProductDraft) {
        for color in &draft.colors {
            self.register_color(color);
        }
        self.values = draft;
        self.errors.clear();
    }

    pub fn values(&self) -> &ProductDraft {
        &self.values
    }

    // ========== Getters ==========

    pub fn title(&self) -> &str {
        &self.values.title
    }

    pub fn category(&self) -> &str {
        &self.values.category
    }

    pub fn season(&self) -> Option<Season> {
        self.values.season
    }

    pub fn colors(&self) -> &[String] {
        &self.values.colors
    }

    pub fn sizes(&self) -> &[Size] {
        &self.values.sizes
    }

    pub fn price(&self) -> Option<f64> {
        self.values.price
    }

    pub fn sale(&self) -> Option<f64> {
        self.values.sale
    }

    pub fn quantity(&self) -> i64 {
        self.values.quantity
    }

    pub fn sku(&self) -> &str {
        &self.values.sku
    }

    pub fn description(&self) -> &str {
        &self.values.description
    }

    pub fn images(&self) -> &[ImageEntry] {
        &self.values.images
    }

    // ========== Setters ==========

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.values.title = title.into();
        self.revalidate(Field::Title);
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.values.category = category.into();
        self.revalidate(Field::Category);
    }

    pub fn set_season(&mut self, season: Option<Season>) {
        self.values.season = season;
        self.revalidate(Field::Season);
    }

    pub fn set_colors(&mut self, colors: Vec<String>) {
        self.values.colors = dedup(colors);
        self.revalidate(Field::Colors);
    }

    pub fn set_sizes(&mut self, sizes: Vec<Size>) {
        self.values.sizes = dedup(sizes);
        self.revalidate(Field::Sizes);
    }

    pub fn set_price(&mut self, price: Option<f64>) {
        self.values.price = price;
        self.revalidate(Field::Price);
    }

    pub fn set_sale(&mut self, sale: Option<f64>) {
        self.values.sale = sale;
        self.revalidate(Field::Sale);
    }

    pub fn set_quantity(&mut self, quantity: i64) {
        self.values.quantity = quantity;
        self.revalidate(Field::Quantity);
    }

    pub fn set_sku(&mut self, sku: impl Into<String>) {
        self.values.sku = sku.into();
        self.revalidate(Field::Sku);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.values.description = description.into();
        self.revalidate(Field::Description);
    }

    pub fn set_images(&mut self, images: Vec<ImageEntry>) {
        self.values.images = images;
        self.revalidate(Field::Images);
    }

    pub fn add_image(&mut self, image: ImageEntry) {
        self.values.images.push(image);
        self.revalidate(Field::Images);
    }

    pub fn remove_image(&mut self, index: usize) -> Option<ImageEntry> {
        if index >= self.values.images.len() {
            return None;
        }
        let removed = self.values.images.remove(index);
        self.revalidate(Field::Images);
        Some(removed)
    }

    // ========== Colors ==========

    /// Selectable colors, defaults first then user-created ones
    pub fn palette(&self) -> &[String] {
        &self.palette
    }

    /// Selector "create new option" callback: appends `query` to the palette
    /// and returns the option to select
    pub fn create_color(&mut self, query: &str) -> String {
        let item = query.trim().to_string();
        self.register_color(&item);
        item
    }

    /// Label shown for the create option
    pub fn create_label(query: &str) -> String {
        format!("+ Create {query}")
    }

    fn register_color(&mut self, color: &str) {
        if !color.is_empty() && !self.palette.iter().any(|c| c == color) {
            self.palette.push(color.to_string());
        }
    }

    // ========== Validation ==========

    fn revalidate(&mut self, field: Field) {
        match field_error(&self.values, field) {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    /// Evaluate every rule and refresh all errors
    pub fn validate(&mut self) -> bool {
        self.errors.clear();
        for field in Field::ALL {
            if let Some(message) = field_error(&self.values, field) {
                self.errors.insert(field, message);
            }
        }
        self.errors.is_empty()
    }

    /// Whether every rule currently passes (does not touch displayed errors)
    pub fn is_valid(&self) -> bool {
        self.values.validate().is_ok()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub(crate) fn set_error(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Validate everything and hand out the draft if acceptable
    pub fn submit(&mut self) -> Result<ProductDraft, FieldErrors> {
        if self.validate() {
            Ok(self.values.clone())
        } else {
            Err(self.errors.clone())
        }
    }

    /// Back to empty defaults; the palette is kept
    pub fn reset(&mut self) {
        self.values = ProductDraft::default();
        self.errors.clear();
    }
}

fn dedup<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut unique = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}

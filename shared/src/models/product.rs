//! Product Model

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::category::Category;

/// Maximum number of images attached to one product
pub const MAX_PRODUCT_IMAGES: usize = 10;

/// Product entity as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    /// Populated category object or bare category ID
    pub category: CategoryRef,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    pub price: f64,
    /// Sale in percent
    #[serde(default)]
    pub sale: Option<f64>,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub description: String,
    /// Public image URLs
    #[serde(default)]
    pub images: Vec<String>,
}

/// Category reference on a product record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Populated(Category),
    Id(String),
}

impl CategoryRef {
    /// Category ID, regardless of whether the reference was populated
    pub fn id(&self) -> &str {
        match self {
            CategoryRef::Populated(category) => &category.id,
            CategoryRef::Id(id) => id,
        }
    }
}

/// Product season (fixed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    #[serde(rename = "Winters Collection")]
    Winters,
    #[serde(rename = "Summers Collection")]
    Summers,
}

impl Season {
    /// Selectable seasons in display order
    pub const ALL: [Season; 2] = [Season::Winters, Season::Summers];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winters => "Winters Collection",
            Season::Summers => "Summers Collection",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Season::ALL
            .into_iter()
            .find(|season| season.as_str() == s)
            .ok_or_else(|| format!("unknown season: {s}"))
    }
}

/// Product size (fixed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    #[serde(rename = "3-6M")]
    Months3To6,
    #[serde(rename = "6-9M")]
    Months6To9,
    #[serde(rename = "1-2Y")]
    Years1To2,
    #[serde(rename = "2-3Y")]
    Years2To3,
    #[serde(rename = "3-4Y")]
    Years3To4,
}

impl Size {
    /// Selectable sizes in display order
    pub const ALL: [Size; 5] = [
        Size::Months3To6,
        Size::Months6To9,
        Size::Years1To2,
        Size::Years2To3,
        Size::Years3To4,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::Months3To6 => "3-6M",
            Size::Months6To9 => "6-9M",
            Size::Years1To2 => "1-2Y",
            Size::Years2To3 => "2-3Y",
            Size::Years3To4 => "3-4Y",
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Size::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| format!("unknown size: {s}"))
    }
}

/// A product image: either a local file still to be uploaded or an
/// already-public URL (edit mode).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ImageEntry {
    File(PathBuf),
    Url(String),
}

impl ImageEntry {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        ImageEntry::File(path.into())
    }

    pub fn url(url: impl Into<String>) -> Self {
        ImageEntry::Url(url.into())
    }

    pub fn as_file(&self) -> Option<&Path> {
        match self {
            ImageEntry::File(path) => Some(path),
            ImageEntry::Url(_) => None,
        }
    }

    pub fn is_uploaded(&self) -> bool {
        matches!(self, ImageEntry::Url(_))
    }
}

impl From<String> for ImageEntry {
    fn from(value: String) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            ImageEntry::Url(value)
        } else {
            ImageEntry::File(PathBuf::from(value))
        }
    }
}

impl From<ImageEntry> for String {
    fn from(entry: ImageEntry) -> Self {
        match entry {
            ImageEntry::File(path) => path.to_string_lossy().into_owned(),
            ImageEntry::Url(url) => url,
        }
    }
}

/// Working value of the product editor form
///
/// Field rules are declared here; the form re-runs them on every change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ProductDraft {
    #[validate(length(min = 2, max = 29, message = "Please enter product title"))]
    pub title: String,
    /// Category ID
    #[validate(length(min = 1, message = "Please select product category"))]
    pub category: String,
    pub season: Option<Season>,
    pub colors: Vec<String>,
    pub sizes: Vec<Size>,
    #[validate(
        required(message = "Please enter product price"),
        range(exclusive_min = 0.0, message = "Please enter product price")
    )]
    pub price: Option<f64>,
    #[validate(custom(function = "validate_sale"))]
    pub sale: Option<f64>,
    #[validate(range(min = 0, message = "Please select product quantity"))]
    pub quantity: i64,
    #[validate(length(min = 1, message = "Please select product sku"))]
    pub sku: String,
    #[validate(length(min = 1, message = "Please enter product description"))]
    pub description: String,
    #[validate(custom(function = "validate_images"))]
    pub images: Vec<ImageEntry>,
}

fn validate_images(images: &[ImageEntry]) -> Result<(), ValidationError> {
    if images.is_empty() {
        return Err(ValidationError::new("images_required")
            .with_message(Cow::Borrowed("Please upload product image")));
    }
    if images.len() > MAX_PRODUCT_IMAGES {
        return Err(ValidationError::new("images_limit")
            .with_message(Cow::Borrowed("You can upload up to 10 images")));
    }
    Ok(())
}

/// Sale value accepted by `validate_sale`, bare or still wrapped in its `Option`
trait SalePercent {
    fn percent(&self) -> Option<f64>;
}

impl SalePercent for f64 {
    fn percent(&self) -> Option<f64> {
        Some(*self)
    }
}

impl SalePercent for Option<f64> {
    fn percent(&self) -> Option<f64> {
        *self
    }
}

impl<T: SalePercent + ?Sized> SalePercent for &T {
    fn percent(&self) -> Option<f64> {
        (**self).percent()
    }
}

/// Sale, when set, must be a finite percentage
fn validate_sale<T: SalePercent>(sale: T) -> Result<(), ValidationError> {
    match sale.percent() {
        Some(value) if !value.is_finite() || !(0.0..=100.0).contains(&value) => {
            Err(ValidationError::new("sale_percent")
                .with_message(Cow::Borrowed("Please enter sale in percent")))
        }
        _ => Ok(()),
    }
}

impl ProductDraft {
    /// Seed a draft from an existing record (edit mode)
    ///
    /// The category collapses to its ID; unknown season and size values are
    /// dropped with a warning.
    pub fn from_record(record: &Product) -> Self {
        let season = record.season.as_deref().and_then(|s| match s.parse::<Season>() {
            Ok(season) => Some(season),
            Err(_) => {
                tracing::warn!(product = %record.id, season = %s, "Dropping unknown season");
                None
            }
        });
        let sizes = record
            .sizes
            .iter()
            .filter_map(|s| match s.parse::<Size>() {
                Ok(size) => Some(size),
                Err(_) => {
                    tracing::warn!(product = %record.id, size = %s, "Dropping unknown size");
                    None
                }
            })
            .collect();
        Self {
            title: record.title.clone(),
            category: record.category.id().to_string(),
            season,
            colors: record.colors.clone(),
            sizes,
            price: Some(record.price),
            sale: record.sale,
            quantity: record.quantity,
            sku: record.sku.clone(),
            description: record.description.clone(),
            images: record.images.iter().cloned().map(ImageEntry::Url).collect(),
        }
    }

    /// Local files that still need uploading, in draft order
    pub fn pending_uploads(&self) -> Vec<PathBuf> {
        self.images
            .iter()
            .filter_map(|entry| entry.as_file().map(Path::to_path_buf))
            .collect()
    }

    /// Build the wire payload with `images` replaced by public URLs
    pub fn into_payload(self, images: Vec<String>) -> ProductPayload {
        ProductPayload {
            title: self.title,
            category: self.category,
            season: self.season,
            colors: self.colors,
            sizes: self.sizes,
            price: self.price.unwrap_or_default(),
            sale: self.sale,
            quantity: self.quantity,
            sku: self.sku,
            description: self.description,
            images,
        }
    }
}

/// Create / update product payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub title: String,
    pub category: String,
    pub season: Option<Season>,
    pub colors: Vec<String>,
    pub sizes: Vec<Size>,
    pub price: f64,
    pub sale: Option<f64>,
    pub quantity: i64,
    pub sku: String,
    pub description: String,
    pub images: Vec<String>,
}

// crab-admin/examples/submit_product.rs
// Create or update a product from a JSON draft file
//
//   cargo run -p crab-admin --example submit_product -- draft.json [product.json]
//
// draft.json holds ProductDraft fields; images are local paths or URLs.
// product.json (optional) is an existing record, switching to edit mode.

use crab_admin::{ClientConfig, EditorParams, Product, ProductDraft, ProductEditor, logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    logger::init_logger("info", false)?;

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        println!("Usage: {} <draft.json> [existing_product.json]", args[0]);
        return Ok(());
    }

    let draft: ProductDraft = serde_json::from_str(&std::fs::read_to_string(&args[1])?)?;
    let params = match args.get(2) {
        Some(record_path) => {
            let record: Product = serde_json::from_str(&std::fs::read_to_string(record_path)?)?;
            Some(EditorParams::update(record))
        }
        None => None,
    };

    let config = ClientConfig::from_env()?;
    tracing::info!(backend = %config.base_url, storage = %config.storage_url, "Using configuration");

    let mut editor = ProductEditor::new(
        config.build_http_client()?,
        config.build_uploader()?,
        params,
    );
    tracing::info!("{}", editor.heading());

    match editor.load_categories().await {
        Ok(options) => {
            for option in options {
                tracing::info!(id = %option.value, "Category: {}", option.label);
            }
        }
        Err(e) => tracing::warn!("Continuing without categories: {}", e),
    }

    // Keep edit-mode values for fields the draft file leaves empty
    let form = editor.form_mut();
    if !draft.title.is_empty() {
        form.set_title(draft.title);
    }
    if !draft.category.is_empty() {
        form.set_category(draft.category);
    }
    if draft.season.is_some() {
        form.set_season(draft.season);
    }
    if !draft.colors.is_empty() {
        let colors = draft.colors.iter().map(|c| form.create_color(c)).collect();
        form.set_colors(colors);
    }
    if !draft.sizes.is_empty() {
        form.set_sizes(draft.sizes);
    }
    if draft.price.is_some() {
        form.set_price(draft.price);
    }
    if draft.sale.is_some() {
        form.set_sale(draft.sale);
    }
    if draft.quantity != 0 {
        form.set_quantity(draft.quantity);
    }
    if !draft.sku.is_empty() {
        form.set_sku(draft.sku);
    }
    if !draft.description.is_empty() {
        form.set_description(draft.description);
    }
    if !draft.images.is_empty() {
        form.set_images(draft.images);
    }

    match editor.submit().await {
        Ok(outcome) => {
            tracing::info!(
                "{}: {} → {}",
                outcome.notification.title,
                outcome.notification.message,
                outcome.redirect.path()
            );
        }
        Err(e) => {
            for (field, message) in editor.form().errors() {
                tracing::error!(%field, "{}", message);
            }
            tracing::error!(state = ?editor.state(), "Submit failed: {}", e);
        }
    }

    Ok(())
}

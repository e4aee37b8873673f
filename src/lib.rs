pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod view;

use application::CartStore;
use config::{Config, ConfigError};
use errors::AppError;
use handlers::EventBinder;
use infrastructure::{is_valid_slot_key, FileStorage};
use view::dom::Document;

pub use handlers::UiEvent;

/// Open the configured file-backed cart and bind it to `document`. A key
/// that cannot name a slot fails here rather than on the first command.
pub fn build_binder(
    config: &Config,
    document: Document,
) -> Result<EventBinder<FileStorage>, AppError> {
    if !is_valid_slot_key(&config.cart_key) {
        return Err(ConfigError::InvalidKey(config.cart_key.clone()).into());
    }
    let storage = FileStorage::open(&config.storage_dir)?;
    let store = CartStore::with_key(storage, config.cart_key.clone());
    log::info!(
        "Cart slot '{}' in {}",
        config.cart_key,
        config.storage_dir.display()
    );
    Ok(EventBinder::bind(store, document, config.toast_delay))
}

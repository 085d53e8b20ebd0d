// Adapters layer: concrete content stores behind the ContentStore port.

pub mod http_store;
pub mod local_store;
pub mod memory_store;

use crate::domain::ports::{ConfigProvider, ContentStore, StoreKind};
use crate::utils::error::{NumerologiaError, Result};

pub use http_store::HttpContentStore;
pub use local_store::LocalContentStore;
pub use memory_store::InMemoryContentStore;

/// Builds the store the configuration points at.
pub fn build_store<C: ConfigProvider>(config: &C) -> Result<Box<dyn ContentStore>> {
    match config.store_kind() {
        StoreKind::Http => {
            let store = HttpContentStore::from_config(config)?;
            tracing::info!("🌐 Using HTTP content store");
            Ok(Box::new(store))
        }
        StoreKind::Local => {
            let path = config
                .store_path()
                .ok_or_else(|| NumerologiaError::MissingConfigError {
                    field: "store.path".to_string(),
                })?;
            tracing::info!("📁 Using local content store at {}", path);
            Ok(Box::new(LocalContentStore::new(path)))
        }
        StoreKind::Memory => {
            tracing::info!("🧠 Using empty in-memory content store");
            Ok(Box::new(InMemoryContentStore::new()))
        }
    }
}

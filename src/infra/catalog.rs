//! Session-wide catalog store: one load, one value, many readers.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{watch, OnceCell};
use tracing::info;

use crate::domain::{default_catalog, Catalog};
use crate::util::assets;
use crate::util::config::AppConfig;
use crate::util::fallback::{fetch_with_fallback, Sourced};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("embedded catalog asset is missing")]
    MissingAsset,
    #[error("failed to read catalog: {0}")]
    Io(#[from] io::Error),
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the catalog document is read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogSource {
    Embedded,
    File(PathBuf),
}

impl CatalogSource {
    pub fn from_config(config: &AppConfig) -> Self {
        match &config.catalog_path {
            Some(path) => CatalogSource::File(path.clone()),
            None => CatalogSource::Embedded,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            CatalogSource::Embedded => "built-in catalog file".to_string(),
            CatalogSource::File(path) => path.display().to_string(),
        }
    }
}

pub fn parse_catalog(bytes: &[u8]) -> Result<Catalog, CatalogError> {
    Ok(serde_json::from_slice(bytes)?)
}

pub async fn read_catalog(source: &CatalogSource) -> Result<Catalog, CatalogError> {
    match source {
        CatalogSource::Embedded => {
            let bytes = assets::catalog_json().ok_or(CatalogError::MissingAsset)?;
            parse_catalog(&bytes)
        }
        CatalogSource::File(path) => {
            let bytes = tokio::fs::read(path).await?;
            parse_catalog(&bytes)
        }
    }
}

pub type SharedCatalog = Arc<Catalog>;

#[derive(Clone)]
pub struct CatalogStore {
    source: CatalogSource,
    sender: Arc<watch::Sender<Option<Sourced<SharedCatalog>>>>,
    loaded: Arc<OnceCell<Sourced<SharedCatalog>>>,
}

impl CatalogStore {
    pub fn new(source: CatalogSource) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            source,
            sender: Arc::new(sender),
            loaded: Arc::new(OnceCell::new()),
        }
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Loads the catalog the first time it is called and publishes it;
    /// later calls return the published value. Failures and catalogs
    /// without categories resolve to [`default_catalog`].
    pub async fn load(&self) -> Sourced<SharedCatalog> {
        self.loaded
            .get_or_init(|| async {
                let loaded = fetch_with_fallback(
                    "catalog",
                    async {
                        read_catalog(&self.source)
                            .await
                            .map(|catalog| (!catalog.cargo_catalog.is_empty()).then_some(catalog))
                    },
                    default_catalog,
                )
                .await
                .map(Arc::new);
                info!(
                    source = %self.source.describe(),
                    fallback = loaded.is_fallback(),
                    categories = loaded.value.cargo_catalog.len(),
                    "catalog ready"
                );
                self.sender.send_replace(Some(loaded.clone()));
                loaded
            })
            .await
            .clone()
    }

    /// Current-value stream; holds `None` until [`CatalogStore::load`] finished.
    pub fn subscribe(&self) -> watch::Receiver<Option<Sourced<SharedCatalog>>> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::util::fallback::DataSource;

    #[test]
    fn embedded_catalog_parses_and_contains_the_rice_path() {
        let bytes = assets::catalog_json().unwrap();
        let catalog = parse_catalog(&bytes).unwrap();
        assert_eq!(
            catalog.package_types("Dry Foodstuffs", "Grains & Legumes", "Rice"),
            vec!["Sack (25kg/50kg)", "Box", "Other"]
        );
        assert_eq!(
            catalog.examples("Dry Foodstuffs", "Grains & Legumes", "Rice"),
            vec!["Jasmine Rice", "Parboiled Rice"]
        );
        assert!(!catalog.package_types_master.is_empty());
    }

    #[tokio::test]
    async fn embedded_load_is_primary() {
        let store = CatalogStore::new(CatalogSource::Embedded);
        assert!(store.subscribe().borrow().is_none());
        let loaded = store.load().await;
        assert_eq!(loaded.source, DataSource::Primary);
    }

    #[tokio::test]
    async fn late_subscribers_see_the_published_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(CatalogSource::File(dir.path().join("absent.json")));
        store.load().await;

        let late = store.subscribe();
        let published = late.borrow().clone().unwrap();
        assert!(published.is_fallback());
        assert_eq!(*published.value, default_catalog());
    }

    #[tokio::test]
    async fn catalog_without_categories_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, r#"{ "cargoCatalog": {} }"#).unwrap();
        let store = CatalogStore::new(CatalogSource::File(path));
        let loaded = store.load().await;
        assert!(loaded.is_fallback());
        assert_eq!(loaded.value.cargo_catalog.len(), 4);
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(CatalogSource::File(dir.path().join("absent.json")));
        let loaded = store.load().await;
        assert!(loaded.is_fallback());
        assert_eq!(*loaded.value, default_catalog());
    }

    #[tokio::test]
    async fn malformed_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, r#"{ "cargoCatalog": ["not", "a", "map"] }"#).unwrap();
        let store = CatalogStore::new(CatalogSource::File(path));
        assert!(store.load().await.is_fallback());
    }

    #[tokio::test]
    async fn file_override_is_loaded_once_and_published() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"{ "cargoCatalog": { "Medical": { "Supplies": { "Bandages": { "packageTypes": ["Box"], "examples": [] } } } } }"#,
        )
        .unwrap();

        let store = CatalogStore::new(CatalogSource::File(path.clone()));
        let mut updates = store.subscribe();
        let first = store.load().await;
        assert!(!first.is_fallback());
        assert!(updates.has_changed().unwrap());
        let published = updates.borrow_and_update().clone().unwrap();
        assert_eq!(published.source, DataSource::Primary);
        assert_eq!(published.value.categories(), vec!["Medical"]);

        fs::remove_file(&path).unwrap();
        let second = store.clone().load().await;
        assert!(Arc::ptr_eq(&first.value, &second.value));
        assert!(!updates.has_changed().unwrap());
    }
}

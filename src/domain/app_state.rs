use std::sync::Arc;

use super::catalog::Catalog;
use crate::util::fallback::{DataSource, Sourced};

/// Session state shared by every page.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// `None` until the catalog store finished loading.
    pub catalog: Option<Arc<Catalog>>,
    pub catalog_source: Option<DataSource>,
}

impl AppState {
    /// Takes over a catalog published by the catalog store.
    pub fn apply_catalog(&mut self, loaded: &Sourced<Arc<Catalog>>) {
        self.catalog = Some(loaded.value.clone());
        self.catalog_source = Some(loaded.source);
    }

    pub fn catalog_ready(&self) -> bool {
        self.catalog.is_some()
    }

    pub fn uses_default_catalog(&self) -> bool {
        self.catalog_source == Some(DataSource::Fallback)
    }

    pub fn category_count(&self) -> usize {
        self.catalog
            .as_ref()
            .map(|catalog| catalog.cargo_catalog.len())
            .unwrap_or_default()
    }

    pub fn item_count(&self) -> usize {
        self.catalog
            .as_ref()
            .map(|catalog| catalog.item_count())
            .unwrap_or_default()
    }
}

//! Catalog provider contract
use crate::error::Result;
use groove_core::Catalog;
use tracing::{info, warn};

/// Source of the track catalog
///
/// Loading never fails from the caller's point of view: [`load`] logs the
/// error and falls back to an empty catalog, which the UI shows as an empty
/// state.
///
/// [`load`]: CatalogProvider::load
pub trait CatalogProvider {
    /// Load the catalog, surfacing errors
    fn try_load(&self) -> Result<Catalog>;

    /// Human-readable description of where the catalog comes from
    fn describe(&self) -> String;

    /// Load the catalog, resolving any error to an empty catalog
    fn load(&self) -> Catalog {
        match self.try_load() {
            Ok(catalog) => {
                info!(
                    "Loaded catalog from {}: {} playlists",
                    self.describe(),
                    catalog.len()
                );
                catalog
            }
            Err(e) => {
                warn!("Failed to load catalog from {}: {}", self.describe(), e);
                Catalog::empty()
            }
        }
    }
}

impl<T: CatalogProvider + ?Sized> CatalogProvider for Box<T> {
    fn try_load(&self) -> Result<Catalog> {
        (**self).try_load()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

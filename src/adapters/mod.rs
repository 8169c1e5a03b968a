// Adapters layer: concrete catalog sources.

pub mod delimited_file;
pub mod embedded;

pub use delimited_file::DelimitedFileCatalog;
pub use embedded::EmbeddedCatalog;

use crate::domain::ports::{CatalogSource, ConfigProvider};

/// Picks the catalog file when one is configured, the embedded table otherwise.
pub fn source_for(config: &dyn ConfigProvider) -> Box<dyn CatalogSource> {
    match config.catalog_path() {
        Some(path) => Box::new(DelimitedFileCatalog::new(path)),
        None => Box::new(EmbeddedCatalog),
    }
}

//! Catalog sources: the built-in facets and catalog files on disk.

mod builtin;
mod loader;

pub use builtin::{BuiltinCatalog, builtin_catalog};
pub use loader::{CatalogFile, CatalogFileError, DirectoryCatalog, read_catalog_file};

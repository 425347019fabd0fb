pub mod catalog;
pub mod init;
pub mod play;
pub mod summary;
pub mod validate;

use std::path::Path;

use anyhow::Result;
use robolearn_core::catalog::Catalog;
use robolearn_core::parser;

/// Load the catalog at `path`, or the built-in one.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => {
            tracing::debug!("loading catalog from {}", path.display());
            parser::parse_catalog(path)
        }
        None => Ok(Catalog::builtin()),
    }
}

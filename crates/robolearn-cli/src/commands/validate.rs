//! The `robolearn validate` command.

use std::path::PathBuf;

use anyhow::Result;

use robolearn_core::parser;

pub fn execute(catalog_path: PathBuf) -> Result<()> {
    let raw = parser::parse_raw(&catalog_path)?;

    println!("Catalog: {} ({} modules)", raw.catalog.name, raw.modules.len());

    let warnings = parser::validate_catalog(&raw);
    for w in &warnings {
        let prefix = w
            .module_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    // Warnings only; invariant violations still fail the command.
    parser::build_catalog(raw)?;

    if warnings.is_empty() {
        println!("Catalog valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}

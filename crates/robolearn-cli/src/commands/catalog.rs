//! The `robolearn catalog` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::load_catalog;

pub fn execute(catalog_path: Option<PathBuf>) -> Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;

    let mut table = Table::new();
    table.set_header(vec!["#", "Section", "ID", "Title", "Options"]);

    for section in catalog.sections() {
        for (i, module) in section.modules.iter().enumerate() {
            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(section.id),
                Cell::new(&module.id),
                Cell::new(&module.title),
                Cell::new(module.options.len()),
            ]);
        }
    }

    println!("Catalog: {} ({} modules)", catalog.name(), catalog.len());
    println!("{table}");

    Ok(())
}

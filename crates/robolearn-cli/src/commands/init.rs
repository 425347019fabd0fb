//! The `robolearn init` command.

use std::path::Path;

use anyhow::Result;

use robolearn_core::catalog::Catalog;
use robolearn_core::parser::catalog_to_toml;

pub fn execute() -> Result<()> {
    // Create robolearn.toml
    if Path::new("robolearn.toml").exists() {
        println!("robolearn.toml already exists, skipping.");
    } else {
        std::fs::write("robolearn.toml", SAMPLE_CONFIG)?;
        println!("Created robolearn.toml");
    }

    // Export the built-in catalog as an editable starting point
    std::fs::create_dir_all("catalogs")?;
    let catalog_path = Path::new("catalogs/robotics.toml");
    if catalog_path.exists() {
        println!("catalogs/robotics.toml already exists, skipping.");
    } else {
        std::fs::write(catalog_path, catalog_to_toml(&Catalog::builtin())?)?;
        println!("Created catalogs/robotics.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: robolearn validate --catalog catalogs/robotics.toml");
    println!("  2. Run: robolearn play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# robolearn configuration

# Catalog file to load. Remove to use the built-in robotics catalog.
catalog = "catalogs/robotics.toml"

# Where session reports are written.
output_dir = "./robolearn-results"

# json, html, all, or none
report_format = "json"

show_theory = true
"#;

//! TOML catalog parser.
//!
//! Loads quiz catalogs from TOML files, reports validation warnings, and
//! writes a catalog back out as TOML.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::model::{ModuleDefinition, Section, SectionId};

/// File-level TOML structure, before any invariant checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCatalog {
    pub catalog: RawCatalogHeader,
    #[serde(default)]
    pub modules: Vec<RawModule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCatalogHeader {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawModule {
    pub section: String,
    #[serde(flatten)]
    pub module: ModuleDefinition,
}

/// Parse a single TOML file into a validated [`Catalog`].
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a validated [`Catalog`] (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let raw = parse_raw_str(content, source_path)?;
    build_catalog(raw).with_context(|| format!("invalid catalog: {}", source_path.display()))
}

/// Parse TOML without checking catalog invariants.
pub fn parse_raw_str(content: &str, source_path: &Path) -> Result<RawCatalog> {
    toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))
}

/// Read a file without checking catalog invariants.
pub fn parse_raw(path: &Path) -> Result<RawCatalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;
    parse_raw_str(&content, path)
}

/// Group raw modules by section, preserving file order, and validate.
pub fn build_catalog(raw: RawCatalog) -> Result<Catalog> {
    let mut sections: Vec<Section> = SectionId::ALL
        .iter()
        .map(|&id| Section {
            id,
            modules: Vec::new(),
        })
        .collect();

    for entry in raw.modules {
        let section: SectionId = entry
            .section
            .parse()
            .map_err(|e: String| anyhow::anyhow!("module '{}': {}", entry.module.id, e))?;
        if let Some(target) = sections.iter_mut().find(|s| s.id == section) {
            target.modules.push(entry.module);
        }
    }

    Ok(Catalog::new(raw.catalog.name, sections)?)
}

/// Convert a catalog into its TOML file form.
pub fn catalog_to_toml(catalog: &Catalog) -> Result<String> {
    let raw = RawCatalog {
        catalog: RawCatalogHeader {
            name: catalog.name().to_string(),
            description: String::new(),
        },
        modules: catalog
            .sections()
            .iter()
            .flat_map(|section| {
                section.modules.iter().map(|m| RawModule {
                    section: section.id.to_string().to_lowercase(),
                    module: m.clone(),
                })
            })
            .collect(),
    };
    toml::to_string_pretty(&raw).context("failed to serialize catalog")
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The module ID (if applicable).
    pub module_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn module(id: &str, message: impl Into<String>) -> Self {
        Self {
            module_id: Some(id.to_string()),
            message: message.into(),
        }
    }
}

/// Validate a raw catalog for common issues.
pub fn validate_catalog(raw: &RawCatalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Unknown or empty sections
    for entry in &raw.modules {
        if entry.section.parse::<SectionId>().is_err() {
            warnings.push(ValidationWarning::module(
                &entry.module.id,
                format!("unknown section: {}", entry.section),
            ));
        }
    }
    for id in SectionId::ALL {
        let present = raw
            .modules
            .iter()
            .any(|m| m.section.parse::<SectionId>() == Ok(id));
        if !present {
            warnings.push(ValidationWarning {
                module_id: None,
                message: format!("section {id} has no modules"),
            });
        }
    }

    // Check for duplicate module IDs
    let mut seen_ids = std::collections::HashSet::new();
    for entry in &raw.modules {
        if !seen_ids.insert(&entry.module.id) {
            warnings.push(ValidationWarning::module(
                &entry.module.id,
                format!("duplicate module ID: {}", entry.module.id),
            ));
        }
    }

    for entry in &raw.modules {
        let module = &entry.module;
        if module.options.len() < 2 {
            warnings.push(ValidationWarning::module(
                &module.id,
                "needs at least 2 options",
            ));
        }
        if module.correct_index >= module.options.len() {
            warnings.push(ValidationWarning::module(
                &module.id,
                format!(
                    "correct_index {} out of range for {} options",
                    module.correct_index,
                    module.options.len()
                ),
            ));
        }
        if module.question.trim().is_empty() {
            warnings.push(ValidationWarning::module(&module.id, "question is empty"));
        }
        if module.media_ref.trim().is_empty() {
            warnings.push(ValidationWarning::module(&module.id, "media_ref is empty"));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[catalog]
name = "Mini Robotics"

[[modules]]
section = "joints"
id = "prismatic"
title = "Prismatic Joint"
description = "Linear motion along one axis."
media_ref = "https://example.org/prismatic.gif"
question = "Which of the following is an example of a prismatic joint?"
options = ["Door hinge", "Sliding drawer"]
correct_index = 1

[[modules]]
section = "links"
id = "rigid"
title = "Rigid Links"
media_ref = "https://example.org/rigid.gif"
question = "What is the key feature of a rigid link?"
options = ["Does not bend or stretch", "Made of rubber"]
correct_index = 0
"#;

    fn path() -> PathBuf {
        PathBuf::from("test.toml")
    }

    #[test]
    fn parse_valid_toml() {
        let catalog = parse_catalog_str(VALID_TOML, &path()).unwrap();
        assert_eq!(catalog.name(), "Mini Robotics");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.section(SectionId::Joints).modules[0].id, "prismatic");
        assert_eq!(catalog.module("rigid").unwrap().correct_index, 0);
        assert!(catalog.module("rigid").unwrap().theory.is_empty());
    }

    #[test]
    fn valid_toml_has_no_warnings() {
        let raw = parse_raw_str(VALID_TOML, &path()).unwrap();
        assert!(validate_catalog(&raw).is_empty());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_catalog_str(bad, &path()).is_err());
    }

    #[test]
    fn invariant_violations_are_errors() {
        let toml = VALID_TOML.replace("correct_index = 1", "correct_index = 5");
        let err = parse_catalog_str(&toml, &path()).unwrap_err();
        assert!(format!("{err:#}").contains("correct_index 5 out of range"));
    }

    #[test]
    fn validate_reports_problems() {
        let toml = r#"
[catalog]
name = "Broken"

[[modules]]
section = "joints"
id = "same"
title = "First"
question = ""
options = ["only"]
correct_index = 3

[[modules]]
section = "gears"
id = "same"
title = "Second"
question = "Q?"
options = ["a", "b"]
correct_index = 0
"#;
        let raw = parse_raw_str(toml, &path()).unwrap();
        let messages: Vec<String> = validate_catalog(&raw)
            .into_iter()
            .map(|w| w.message)
            .collect();
        assert!(messages.iter().any(|m| m.contains("unknown section: gears")));
        assert!(messages.iter().any(|m| m.contains("section Links has no modules")));
        assert!(messages.iter().any(|m| m.contains("duplicate module ID")));
        assert!(messages.iter().any(|m| m.contains("at least 2 options")));
        assert!(messages.iter().any(|m| m.contains("correct_index 3 out of range")));
        assert!(messages.iter().any(|m| m.contains("question is empty")));
        assert!(messages.iter().any(|m| m.contains("media_ref is empty")));
    }

    #[test]
    fn builtin_survives_toml_export() {
        let builtin = Catalog::builtin();
        let toml = catalog_to_toml(&builtin).unwrap();
        assert!(toml.contains("section = \"joints\""));
        let reparsed = parse_catalog_str(&toml, &path()).unwrap();
        assert_eq!(reparsed, builtin);
    }

    #[test]
    fn parse_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("catalog.toml");
        std::fs::write(&file_path, VALID_TOML).unwrap();

        let catalog = parse_catalog(&file_path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(parse_catalog(&dir.path().join("missing.toml")).is_err());
    }
}

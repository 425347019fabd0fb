//! The canonical per-module score mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{QuizError, Result};
use crate::model::Outcome;

/// Mapping from module id to [`Outcome`].
///
/// Always covers every id of the catalog it was built from. Writes to ids
/// outside that set are rejected rather than inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreMap {
    entries: BTreeMap<String, Outcome>,
}

impl ScoreMap {
    /// A fresh map with every catalog id unanswered.
    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self {
            entries: catalog
                .modules()
                .map(|m| (m.id.clone(), Outcome::Unanswered))
                .collect(),
        }
    }

    pub fn get(&self, module_id: &str) -> Option<Outcome> {
        self.entries.get(module_id).copied()
    }

    /// Record an outcome. Last write wins.
    pub fn set(&mut self, module_id: &str, outcome: Outcome) -> Result<()> {
        match self.entries.get_mut(module_id) {
            Some(slot) => {
                *slot = outcome;
                Ok(())
            }
            None => Err(QuizError::UnknownModule(module_id.to_string())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Outcome)> {
        self.entries.iter().map(|(id, o)| (id.as_str(), *o))
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.entries.values().filter(|o| **o == outcome).count()
    }

    pub fn answered(&self) -> usize {
        self.entries.values().filter(|o| o.is_answered()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

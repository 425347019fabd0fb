//! Core data model types for robolearn.
//!
//! These are the fundamental types the quiz is built from: module
//! definitions, sections, per-module outcomes and the navigable views.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single content unit with one single-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDefinition {
    /// Unique identifier across the whole catalog.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Short description shown above the theory text.
    #[serde(default)]
    pub description: String,
    /// Longer background text.
    #[serde(default)]
    pub theory: String,
    /// Opaque reference to illustrative media. Never dereferenced.
    #[serde(default)]
    pub media_ref: String,
    /// The quiz prompt.
    pub question: String,
    /// Answer choices, in display order.
    pub options: Vec<String>,
    /// 0-based index of the correct choice in `options`.
    pub correct_index: usize,
}

impl ModuleDefinition {
    /// Text of the correct option.
    pub fn correct_option(&self) -> &str {
        self.options
            .get(self.correct_index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Whether `index` picks the correct option.
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }
}

/// The two fixed sections, in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Joints,
    Links,
}

impl SectionId {
    /// All sections in traversal order.
    pub const ALL: [SectionId; 2] = [SectionId::Joints, SectionId::Links];

    /// The section that follows this one, if any.
    pub fn next(self) -> Option<SectionId> {
        match self {
            SectionId::Joints => Some(SectionId::Links),
            SectionId::Links => None,
        }
    }

    /// The view that renders this section.
    pub fn view(self) -> View {
        match self {
            SectionId::Joints => View::Joints,
            SectionId::Links => View::Links,
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionId::Joints => write!(f, "Joints"),
            SectionId::Links => write!(f, "Links"),
        }
    }
}

impl FromStr for SectionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "joints" | "joint" => Ok(SectionId::Joints),
            "links" | "link" => Ok(SectionId::Links),
            other => Err(format!("unknown section: {other}")),
        }
    }
}

/// An ordered group of modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub modules: Vec<ModuleDefinition>,
}

impl Section {
    pub fn name(&self) -> String {
        self.id.to_string()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Module at a 1-based position.
    pub fn module_at(&self, position: usize) -> Option<&ModuleDefinition> {
        position
            .checked_sub(1)
            .and_then(|index| self.modules.get(index))
    }

    pub fn contains(&self, module_id: &str) -> bool {
        self.modules.iter().any(|m| m.id == module_id)
    }
}

/// Tri-state result for one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    #[default]
    Unanswered,
    Correct,
    Incorrect,
}

impl Outcome {
    pub fn from_correct(correct: bool) -> Self {
        if correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        }
    }

    pub fn is_answered(self) -> bool {
        self != Outcome::Unanswered
    }

    /// Status label as shown in the results list.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Unanswered => "Not Answered",
            Outcome::Correct => "Correct",
            Outcome::Incorrect => "Incorrect",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Home,
    Joints,
    Links,
    Summary,
}

impl View {
    /// The section rendered by this view, if it is a section view.
    pub fn section(self) -> Option<SectionId> {
        match self {
            View::Joints => Some(SectionId::Joints),
            View::Links => Some(SectionId::Links),
            View::Home | View::Summary => None,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Home => write!(f, "home"),
            View::Joints => write!(f, "joints"),
            View::Links => write!(f, "links"),
            View::Summary => write!(f, "summary"),
        }
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" => Ok(View::Home),
            "joints" => Ok(View::Joints),
            "links" => Ok(View::Links),
            "summary" => Ok(View::Summary),
            other => Err(format!("unknown view: {other}")),
        }
    }
}

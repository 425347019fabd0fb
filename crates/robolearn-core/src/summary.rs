//! Score aggregation: percentage, letter grade and per-section breakdowns.
//!
//! Everything here is a pure function of a [`ScoreMap`] and the static
//! [`Catalog`]; recomputing never changes state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::model::{Outcome, SectionId};
use crate::scores::ScoreMap;

/// Letter bucket derived from the percentage of correct answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
}

impl Grade {
    /// Bands are inclusive at their lower bound: 90, 80, 70, 60, then D.
    pub fn for_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Grade::APlus,
            80..=89 => Grade::A,
            70..=79 => Grade::B,
            60..=69 => Grade::C,
            _ => Grade::D,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Grade::APlus => "Outstanding!",
            Grade::A => "Excellent work!",
            Grade::B => "Good job!",
            Grade::C => "Keep learning!",
            Grade::D => "More practice needed",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse performance feedback shown under the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Insight {
    Excellent,
    Good,
    KeepLearning,
}

impl Insight {
    pub fn for_percentage(percentage: u32) -> Self {
        match percentage {
            80.. => Insight::Excellent,
            60..=79 => Insight::Good,
            _ => Insight::KeepLearning,
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Insight::Excellent => "Excellent understanding!",
            Insight::Good => "Good progress!",
            Insight::KeepLearning => "Keep learning!",
        }
    }

    pub fn detail(self) -> &'static str {
        match self {
            Insight::Excellent => {
                "You've mastered the fundamentals of joints and links in robotics."
            }
            Insight::Good => {
                "You have a solid foundation. Consider reviewing the concepts you missed."
            }
            Insight::KeepLearning => {
                "Consider going through the modules again to strengthen your understanding."
            }
        }
    }
}

/// Correct answers within one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionBreakdown {
    pub section: SectionId,
    pub name: String,
    pub correct: usize,
    pub size: usize,
}

/// Outcome of one module, for the detailed results list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleResult {
    pub id: String,
    pub title: String,
    pub section: SectionId,
    pub outcome: Outcome,
}

/// Derived statistics for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_questions: usize,
    pub correct_answers: usize,
    pub answered_questions: usize,
    /// Rounded share of correct answers, 0 to 100.
    pub percentage: u32,
    pub grade: Grade,
    pub insight: Insight,
    pub sections: Vec<SectionBreakdown>,
    pub modules: Vec<ModuleResult>,
}

impl Summary {
    pub fn section(&self, id: SectionId) -> Option<&SectionBreakdown> {
        self.sections.iter().find(|s| s.section == id)
    }
}

/// Compute the full summary for the current scores.
pub fn compute_summary(scores: &ScoreMap, catalog: &Catalog) -> Summary {
    let total_questions = catalog.len();
    let correct_answers = scores.count(Outcome::Correct);
    let answered_questions = scores.answered();
    let percentage = rounded_percentage(correct_answers, total_questions);

    let modules = catalog
        .sections()
        .iter()
        .flat_map(|section| {
            section.modules.iter().map(|m| ModuleResult {
                id: m.id.clone(),
                title: m.title.clone(),
                section: section.id,
                outcome: scores.get(&m.id).unwrap_or_default(),
            })
        })
        .collect();

    Summary {
        total_questions,
        correct_answers,
        answered_questions,
        percentage,
        grade: Grade::for_percentage(percentage),
        insight: Insight::for_percentage(percentage),
        sections: per_section_breakdown(scores, catalog),
        modules,
    }
}

/// Letter grade for a percentage.
pub fn grade_for(percentage: u32) -> Grade {
    Grade::for_percentage(percentage)
}

/// Correct count and size for every section, in traversal order.
pub fn per_section_breakdown(scores: &ScoreMap, catalog: &Catalog) -> Vec<SectionBreakdown> {
    catalog
        .sections()
        .iter()
        .map(|section| SectionBreakdown {
            section: section.id,
            name: section.name(),
            correct: section
                .modules
                .iter()
                .filter(|m| scores.get(&m.id) == Some(Outcome::Correct))
                .count(),
            size: section.len(),
        })
        .collect()
}

/// A fresh all-unanswered map for the catalog.
pub fn reset(catalog: &Catalog) -> ScoreMap {
    ScoreMap::for_catalog(catalog)
}

/// Share of answered modules for the progress bar.
pub fn progress_percentage(answered: usize, total: usize) -> f64 {
    debug_assert!(total > 0, "catalogs are never empty");
    answered as f64 / total as f64 * 100.0
}

/// `round(100 * part / total)`, halves rounded up.
fn rounded_percentage(part: usize, total: usize) -> u32 {
    debug_assert!(total > 0, "catalogs are never empty");
    ((200 * part + total) / (2 * total)) as u32
}

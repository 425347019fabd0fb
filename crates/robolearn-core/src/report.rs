//! Session report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scores::ScoreMap;
use crate::session::Session;
use crate::summary::Summary;

/// A finished (or abandoned) quiz session, ready for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Name of the catalog the session ran on.
    pub catalog_name: String,
    /// Final outcome per module.
    pub scores: ScoreMap,
    /// Aggregate statistics.
    pub summary: Summary,
}

impl SessionReport {
    /// Snapshot a session's current scores.
    pub fn from_session(session: &Session) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            catalog_name: session.catalog().name().to_string(),
            scores: session.scores().clone(),
            summary: session.summary(),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the summary as markdown.
    pub fn to_markdown(&self) -> String {
        let summary = &self.summary;
        let mut md = String::new();

        md.push_str(&format!("## {} results\n\n", self.catalog_name));
        md.push_str(&format!(
            "**Grade {}** ({}%): {} of {} correct. {}\n\n",
            summary.grade,
            summary.percentage,
            summary.correct_answers,
            summary.total_questions,
            summary.grade.message()
        ));

        md.push_str("| Module | Section | Result |\n");
        md.push_str("|--------|---------|--------|\n");
        for m in &summary.modules {
            md.push_str(&format!("| {} | {} | {} |\n", m.title, m.section, m.outcome));
        }
        md.push('\n');

        for s in &summary.sections {
            md.push_str(&format!("- {}: {}/{} correct\n", s.name, s.correct, s.size));
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::model::{Outcome, View};

    fn finished_session() -> Session {
        let mut session = Session::new(Catalog::builtin());
        session.navigate_to(View::Links);
        session.select_option(0).unwrap();
        session.submit_answer().unwrap();
        session
    }

    #[test]
    fn snapshot_captures_scores() {
        let report = SessionReport::from_session(&finished_session());
        assert_eq!(report.catalog_name, "Robotics Explorer");
        assert_eq!(report.scores.get("rigid"), Some(Outcome::Correct));
        assert_eq!(report.summary.correct_answers, 1);
        assert_eq!(report.summary.percentage, 20);
    }

    #[test]
    fn save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/report.json");
        let report = SessionReport::from_session(&finished_session());

        report.save_json(&path).unwrap();
        let loaded = SessionReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.scores, report.scores);
        assert_eq!(loaded.summary, report.summary);
    }

    #[test]
    fn load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = SessionReport::load_json(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse report JSON"));
    }

    #[test]
    fn markdown_lists_every_module() {
        let md = SessionReport::from_session(&finished_session()).to_markdown();
        assert!(md.contains("**Grade D** (20%)"));
        assert!(md.contains("| Rigid Links | Links | Correct |"));
        assert!(md.contains("| Soft Links | Links | Not Answered |"));
        assert!(md.contains("- Joints: 0/3 correct"));
    }
}

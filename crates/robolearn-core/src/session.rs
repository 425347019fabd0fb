//! Session orchestrator.
//!
//! A [`Session`] is the single owner of the canonical [`ScoreMap`] and the
//! active [`View`]. Entering a section view mounts a fresh [`ModuleRunner`];
//! leaving it drops the runner and its state. Runner callbacks are wired
//! back into the score map for the duration of one call only.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::error::{QuizError, Result};
use crate::model::{Outcome, View};
use crate::runner::{Advance, Feedback, ModuleRunner, RunnerEvents};
use crate::scores::ScoreMap;
use crate::summary::{compute_summary, progress_percentage, reset, Summary};

/// Orchestrates navigation, runners and scoring for one learner.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Arc<Catalog>,
    scores: ScoreMap,
    view: View,
    runner: Option<ModuleRunner>,
}

/// Routes a runner's callbacks into the session's score map.
struct Wiring<'a> {
    scores: &'a mut ScoreMap,
    completed: bool,
}

impl RunnerEvents for Wiring<'_> {
    fn update_score(&mut self, module_id: &str, correct: bool) -> Result<()> {
        self.scores.set(module_id, Outcome::from_correct(correct))
    }

    fn on_section_complete(&mut self) {
        self.completed = true;
    }
}

impl Session {
    pub fn new(catalog: impl Into<Arc<Catalog>>) -> Self {
        let catalog = catalog.into();
        Self {
            scores: ScoreMap::for_catalog(&catalog),
            catalog,
            view: View::Home,
            runner: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn scores(&self) -> &ScoreMap {
        &self.scores
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// The runner of the active section view, if any.
    pub fn runner(&self) -> Option<&ModuleRunner> {
        self.runner.as_ref()
    }

    /// Write an outcome for a module. Last write wins.
    pub fn update_score(&mut self, module_id: &str, correct: bool) -> Result<()> {
        self.scores.set(module_id, Outcome::from_correct(correct))
    }

    /// Switch views. Entering a section starts it from its first module.
    pub fn navigate_to(&mut self, view: View) {
        if view == self.view {
            return;
        }
        tracing::debug!("navigating {} -> {}", self.view, view);
        self.view = view;
        self.runner = view
            .section()
            .map(|section| ModuleRunner::new(Arc::clone(self.catalog.section(section))));
    }

    /// Clear every score and return home.
    pub fn reset_progress(&mut self) {
        tracing::info!("progress reset");
        self.scores = reset(&self.catalog);
        self.view = View::Home;
        self.runner = None;
    }

    /// Go back to the overview with scores retained.
    pub fn review_answers(&mut self) {
        self.navigate_to(View::Home);
    }

    pub fn select_option(&mut self, option_index: usize) -> Result<()> {
        self.active_runner()?.select_option(option_index)
    }

    pub fn submit_answer(&mut self) -> Result<Feedback> {
        let runner = self.runner.as_mut().ok_or(QuizError::NoActiveSection)?;
        let mut wiring = Wiring {
            scores: &mut self.scores,
            completed: false,
        };
        runner.submit_answer(&mut wiring)
    }

    /// Advance the active runner. Completing a section moves on to the
    /// next section, or to the summary after the last one.
    pub fn advance(&mut self) -> Result<Advance> {
        let runner = self.runner.as_mut().ok_or(QuizError::NoActiveSection)?;
        let mut wiring = Wiring {
            scores: &mut self.scores,
            completed: false,
        };
        let step = runner.advance(&mut wiring)?;

        if wiring.completed {
            let next = runner
                .section_id()
                .next()
                .map(|s| s.view())
                .unwrap_or(View::Summary);
            self.navigate_to(next);
        }
        Ok(step)
    }

    pub fn summary(&self) -> Summary {
        compute_summary(&self.scores, &self.catalog)
    }

    pub fn answered_count(&self) -> usize {
        self.scores.answered()
    }

    /// Whether the results view should be offered from home.
    pub fn all_answered(&self) -> bool {
        let answered = self.answered_count();
        answered > 0 && answered == self.catalog.len()
    }

    /// Share of answered modules, 0.0 to 100.0.
    pub fn progress_percentage(&self) -> f64 {
        progress_percentage(self.answered_count(), self.catalog.len())
    }

    fn active_runner(&mut self) -> Result<&mut ModuleRunner> {
        self.runner.as_mut().ok_or(QuizError::NoActiveSection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SectionId;
    use crate::summary::Grade;

    fn answer(session: &mut Session, option: usize) -> Feedback {
        session.select_option(option).unwrap();
        let feedback = session.submit_answer().unwrap();
        session.advance().unwrap();
        feedback
    }

    #[test]
    fn starts_home_with_nothing_answered() {
        let session = Session::new(Catalog::builtin());
        assert_eq!(session.view(), View::Home);
        assert!(session.runner().is_none());
        assert_eq!(session.answered_count(), 0);
        assert!(!session.all_answered());
        assert_eq!(session.progress_percentage(), 0.0);
    }

    #[test]
    fn runner_operations_need_a_section() {
        let mut session = Session::new(Catalog::builtin());
        assert_eq!(session.select_option(0), Err(QuizError::NoActiveSection));
        assert_eq!(session.submit_answer(), Err(QuizError::NoActiveSection));
        assert_eq!(session.advance(), Err(QuizError::NoActiveSection));
    }

    #[test]
    fn end_to_end_scenario() {
        let mut session = Session::new(Catalog::builtin());
        session.navigate_to(View::Joints);

        assert!(answer(&mut session, 1).correct); // prismatic
        assert!(!answer(&mut session, 2).correct); // revolute
        assert!(answer(&mut session, 1).correct); // spherical
        assert_eq!(session.view(), View::Links);
        assert_eq!(session.runner().unwrap().section_id(), SectionId::Links);

        assert!(answer(&mut session, 0).correct); // rigid
        assert!(!answer(&mut session, 0).correct); // soft
        assert_eq!(session.view(), View::Summary);
        assert!(session.runner().is_none());

        let summary = session.summary();
        assert_eq!(summary.correct_answers, 3);
        assert_eq!(summary.total_questions, 5);
        assert_eq!(summary.percentage, 60);
        assert_eq!(summary.grade, Grade::C);
        assert_eq!(summary.section(SectionId::Joints).map(|s| (s.correct, s.size)), Some((2, 3)));
        assert_eq!(summary.section(SectionId::Links).map(|s| (s.correct, s.size)), Some((1, 2)));
        assert!(session.all_answered());
        assert_eq!(session.progress_percentage(), 100.0);

        session.reset_progress();
        assert_eq!(session.view(), View::Home);
        assert_eq!(session.scores().count(Outcome::Unanswered), 5);
        assert_eq!(session.summary().percentage, 0);
    }

    #[test]
    fn reentering_a_section_starts_over() {
        let mut session = Session::new(Catalog::builtin());
        session.navigate_to(View::Joints);
        answer(&mut session, 1);
        assert_eq!(session.runner().unwrap().position(), 2);

        session.navigate_to(View::Home);
        assert!(session.runner().is_none());
        session.navigate_to(View::Joints);

        let runner = session.runner().unwrap();
        assert_eq!(runner.position(), 1);
        assert!(!runner.is_submitted());
        assert_eq!(session.scores().get("prismatic"), Some(Outcome::Correct));
    }

    #[test]
    fn navigating_to_same_view_keeps_runner() {
        let mut session = Session::new(Catalog::builtin());
        session.navigate_to(View::Links);
        session.select_option(3).unwrap();
        session.navigate_to(View::Links);
        assert_eq!(session.runner().unwrap().selected(), Some(3));
    }

    #[test]
    fn review_keeps_scores() {
        let mut session = Session::new(Catalog::builtin());
        session.navigate_to(View::Links);
        answer(&mut session, 0);
        session.navigate_to(View::Summary);
        session.review_answers();
        assert_eq!(session.view(), View::Home);
        assert_eq!(session.scores().get("rigid"), Some(Outcome::Correct));
        assert_eq!(session.progress_percentage(), 20.0);
    }

    #[test]
    fn update_score_last_write_wins() {
        let mut session = Session::new(Catalog::builtin());
        session.update_score("spherical", false).unwrap();
        session.update_score("spherical", true).unwrap();
        assert_eq!(session.scores().get("spherical"), Some(Outcome::Correct));
        assert!(session.update_score("gear", true).is_err());
    }

    #[test]
    fn double_submit_leaves_scores_alone() {
        let mut session = Session::new(Catalog::builtin());
        session.navigate_to(View::Joints);
        session.select_option(0).unwrap();
        session.submit_answer().unwrap();
        let before = session.scores().clone();
        assert!(session.submit_answer().is_err());
        assert_eq!(session.scores(), &before);
    }
}

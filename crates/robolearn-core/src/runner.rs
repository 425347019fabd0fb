//! Module runner: drives one section one module at a time.
//!
//! Per module the runner moves `Unanswered -> Selected -> Submitted`; a
//! submitted module is locked. Per section it walks a linear chain
//! `Module[1] -> ... -> Module[n] -> SectionComplete`. The runner owns its
//! [`RunnerState`] and reports outward only through [`RunnerEvents`].

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};
use crate::model::{ModuleDefinition, Section, SectionId};

/// Callbacks a runner invokes on its owner.
pub trait RunnerEvents {
    /// A module's answer was locked in.
    fn update_score(&mut self, module_id: &str, correct: bool) -> Result<()>;

    /// The last module of the section was advanced past.
    fn on_section_complete(&mut self);
}

/// Transient per-section state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerState {
    /// 1-based position of the current module.
    pub current_index: usize,
    /// Chosen option per visited module.
    pub selected: HashMap<String, usize>,
    /// Modules whose answer is locked in.
    pub submitted: HashSet<String>,
}

impl Default for RunnerState {
    fn default() -> Self {
        Self {
            current_index: 1,
            selected: HashMap::new(),
            submitted: HashSet::new(),
        }
    }
}

/// What a submitted answer revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub module_id: String,
    pub correct: bool,
    pub selected_index: usize,
    pub correct_index: usize,
    /// Learner-facing verdict line.
    pub message: String,
}

impl Feedback {
    fn new(module: &ModuleDefinition, selected_index: usize) -> Self {
        let correct = module.is_correct(selected_index);
        let message = if correct {
            "Correct! Well done!".to_string()
        } else {
            format!(
                "Incorrect. The correct answer is: {}",
                module.correct_option()
            )
        };
        Self {
            module_id: module.id.clone(),
            correct,
            selected_index,
            correct_index: module.correct_index,
            message,
        }
    }
}

/// Marker drawn next to an option once the module is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    None,
    Correct,
    WrongChoice,
}

/// Progress indicator for one module of the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Done,
    Current,
    Upcoming,
}

/// Result of [`ModuleRunner::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the module at this 1-based position.
    Next(usize),
    /// The section is finished; `on_section_complete` has fired.
    SectionComplete,
}

/// Drives one section.
#[derive(Debug, Clone)]
pub struct ModuleRunner {
    section: Arc<Section>,
    state: RunnerState,
    finished: bool,
}

impl ModuleRunner {
    pub fn new(section: Arc<Section>) -> Self {
        debug_assert!(!section.is_empty(), "sections are never empty");
        Self {
            section,
            state: RunnerState::default(),
            finished: false,
        }
    }

    pub fn section(&self) -> &Section {
        &self.section
    }

    pub fn section_id(&self) -> SectionId {
        self.section.id
    }

    pub fn state(&self) -> &RunnerState {
        &self.state
    }

    /// 1-based position of the current module.
    pub fn position(&self) -> usize {
        self.state.current_index
    }

    pub fn len(&self) -> usize {
        self.section.len()
    }

    pub fn is_empty(&self) -> bool {
        self.section.is_empty()
    }

    pub fn is_last(&self) -> bool {
        self.state.current_index == self.section.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current_module(&self) -> &ModuleDefinition {
        &self.section.modules[self.state.current_index - 1]
    }

    /// Pending or locked choice for the current module.
    pub fn selected(&self) -> Option<usize> {
        self.state.selected.get(&self.current_module().id).copied()
    }

    pub fn is_submitted(&self) -> bool {
        self.state.submitted.contains(&self.current_module().id)
    }

    /// Record a pending choice. Re-selecting before submission overwrites.
    pub fn select_option(&mut self, option_index: usize) -> Result<()> {
        let module = self.current_module();
        if self.is_submitted() {
            return Err(QuizError::AlreadySubmitted(module.id.clone()));
        }
        let len = module.options.len();
        if option_index >= len {
            tracing::warn!("rejected option {option_index} for '{}'", module.id);
            return Err(QuizError::OptionOutOfRange {
                index: option_index,
                len,
            });
        }
        let id = module.id.clone();
        tracing::debug!("selected option {option_index} for '{id}'");
        self.state.selected.insert(id, option_index);
        Ok(())
    }

    /// Lock in the pending choice and report it through `events`.
    pub fn submit_answer(&mut self, events: &mut dyn RunnerEvents) -> Result<Feedback> {
        let module = self.current_module();
        if self.is_submitted() {
            return Err(QuizError::AlreadySubmitted(module.id.clone()));
        }
        let Some(selected) = self.selected() else {
            return Err(QuizError::NothingSelected(module.id.clone()));
        };

        let feedback = Feedback::new(module, selected);
        events.update_score(&module.id, feedback.correct)?;

        tracing::debug!(
            "submitted '{}': {}",
            feedback.module_id,
            if feedback.correct { "correct" } else { "incorrect" }
        );
        self.state.submitted.insert(feedback.module_id.clone());
        Ok(feedback)
    }

    /// Move forward, or signal completion after the last module.
    pub fn advance(&mut self, events: &mut dyn RunnerEvents) -> Result<Advance> {
        if self.finished {
            return Err(QuizError::SectionFinished(self.section.id));
        }
        if !self.is_submitted() {
            return Err(QuizError::NotSubmitted(self.current_module().id.clone()));
        }

        if self.is_last() {
            self.finished = true;
            tracing::info!("section {} complete", self.section.id);
            events.on_section_complete();
            return Ok(Advance::SectionComplete);
        }

        self.state.current_index += 1;
        Ok(Advance::Next(self.state.current_index))
    }

    /// Feedback for the current module, once submitted.
    pub fn feedback(&self) -> Option<Feedback> {
        if !self.is_submitted() {
            return None;
        }
        self.selected()
            .map(|selected| Feedback::new(self.current_module(), selected))
    }

    /// One marker per option of the current module. All `None` until the
    /// module is submitted.
    pub fn option_marks(&self) -> Vec<OptionMark> {
        let module = self.current_module();
        let revealed = self.is_submitted();
        let selected = self.selected();
        (0..module.options.len())
            .map(|index| {
                if !revealed {
                    OptionMark::None
                } else if module.is_correct(index) {
                    OptionMark::Correct
                } else if selected == Some(index) {
                    OptionMark::WrongChoice
                } else {
                    OptionMark::None
                }
            })
            .collect()
    }

    /// One badge per module of the section.
    pub fn progress_badges(&self) -> Vec<Badge> {
        let current = self.state.current_index;
        (1..=self.section.len())
            .map(|position| match position.cmp(&current) {
                std::cmp::Ordering::Less => Badge::Done,
                std::cmp::Ordering::Equal => Badge::Current,
                std::cmp::Ordering::Greater => Badge::Upcoming,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[derive(Default)]
    struct Recorder {
        scores: Vec<(String, bool)>,
        completions: usize,
    }

    impl RunnerEvents for Recorder {
        fn update_score(&mut self, module_id: &str, correct: bool) -> Result<()> {
            self.scores.push((module_id.to_string(), correct));
            Ok(())
        }

        fn on_section_complete(&mut self) {
            self.completions += 1;
        }
    }

    struct Refusing;

    impl RunnerEvents for Refusing {
        fn update_score(&mut self, module_id: &str, _: bool) -> Result<()> {
            Err(QuizError::UnknownModule(module_id.to_string()))
        }

        fn on_section_complete(&mut self) {}
    }

    fn runner(section: SectionId) -> ModuleRunner {
        ModuleRunner::new(Arc::clone(Catalog::builtin().section(section)))
    }

    fn answer(runner: &mut ModuleRunner, events: &mut Recorder, option: usize) -> Feedback {
        runner.select_option(option).unwrap();
        runner.submit_answer(events).unwrap()
    }

    #[test]
    fn starts_at_first_module() {
        let runner = runner(SectionId::Joints);
        assert_eq!(runner.position(), 1);
        assert_eq!(runner.len(), 3);
        assert_eq!(runner.current_module().id, "prismatic");
        assert_eq!(runner.selected(), None);
        assert!(!runner.is_submitted());
        assert!(!runner.is_finished());
    }

    #[test]
    fn traversal_is_strictly_sequential() {
        let mut runner = runner(SectionId::Joints);
        let mut events = Recorder::default();
        let mut visited = vec![runner.current_module().id.clone()];

        for expected in [Advance::Next(2), Advance::Next(3)] {
            answer(&mut runner, &mut events, 0);
            assert_eq!(runner.advance(&mut events).unwrap(), expected);
            visited.push(runner.current_module().id.clone());
        }
        answer(&mut runner, &mut events, 0);
        assert_eq!(runner.advance(&mut events).unwrap(), Advance::SectionComplete);

        assert_eq!(visited, ["prismatic", "revolute", "spherical"]);
        assert_eq!(events.completions, 1);
        assert!(runner.is_finished());

        let err = runner.advance(&mut events).unwrap_err();
        assert_eq!(err, QuizError::SectionFinished(SectionId::Joints));
        assert_eq!(events.completions, 1);
        assert_eq!(runner.position(), 3);
    }

    #[test]
    fn revolute_scoring_matches_correct_index() {
        let mut runner = runner(SectionId::Joints);
        let mut events = Recorder::default();
        answer(&mut runner, &mut events, 1);
        runner.advance(&mut events).unwrap();

        assert_eq!(runner.current_module().id, "revolute");
        let feedback = answer(&mut runner, &mut events, 0);
        assert!(feedback.correct);
        assert_eq!(feedback.message, "Correct! Well done!");

        let mut other = self::runner(SectionId::Joints);
        let mut other_events = Recorder::default();
        answer(&mut other, &mut other_events, 1);
        other.advance(&mut other_events).unwrap();
        let feedback = answer(&mut other, &mut other_events, 2);
        assert!(!feedback.correct);
        assert_eq!(feedback.message, "Incorrect. The correct answer is: Rotation");
        assert_eq!(other_events.scores.last().unwrap(), &("revolute".to_string(), false));
    }

    #[test]
    fn second_submit_has_no_effect() {
        let mut runner = runner(SectionId::Links);
        let mut events = Recorder::default();
        answer(&mut runner, &mut events, 0);

        let err = runner.submit_answer(&mut events).unwrap_err();
        assert_eq!(err, QuizError::AlreadySubmitted("rigid".into()));
        assert_eq!(events.scores, [("rigid".to_string(), true)]);
    }

    #[test]
    fn selection_is_locked_after_submit() {
        let mut runner = runner(SectionId::Links);
        let mut events = Recorder::default();
        answer(&mut runner, &mut events, 2);

        assert!(runner.select_option(0).is_err());
        assert_eq!(runner.selected(), Some(2));
    }

    #[test]
    fn only_last_selection_is_scored() {
        let mut runner = runner(SectionId::Joints);
        let mut events = Recorder::default();
        runner.select_option(1).unwrap();
        runner.select_option(3).unwrap();
        let feedback = runner.submit_answer(&mut events).unwrap();

        assert_eq!(feedback.selected_index, 3);
        assert!(!feedback.correct);
        assert_eq!(events.scores, [("prismatic".to_string(), false)]);
    }

    #[test]
    fn submit_without_selection_is_rejected() {
        let mut runner = runner(SectionId::Joints);
        let mut events = Recorder::default();
        let err = runner.submit_answer(&mut events).unwrap_err();
        assert_eq!(err, QuizError::NothingSelected("prismatic".into()));
        assert!(events.scores.is_empty());
        assert!(!runner.is_submitted());
    }

    #[test]
    fn advance_before_submit_is_rejected() {
        let mut runner = runner(SectionId::Joints);
        let mut events = Recorder::default();
        runner.select_option(1).unwrap();
        let err = runner.advance(&mut events).unwrap_err();
        assert_eq!(err, QuizError::NotSubmitted("prismatic".into()));
        assert_eq!(runner.position(), 1);
    }

    #[test]
    fn out_of_range_option_leaves_state_untouched() {
        let mut runner = runner(SectionId::Joints);
        runner.select_option(2).unwrap();
        let err = runner.select_option(4).unwrap_err();
        assert_eq!(err, QuizError::OptionOutOfRange { index: 4, len: 4 });
        assert_eq!(runner.selected(), Some(2));
    }

    #[test]
    fn failed_score_write_does_not_lock_module() {
        let mut runner = runner(SectionId::Links);
        runner.select_option(0).unwrap();
        assert!(runner.submit_answer(&mut Refusing).is_err());
        assert!(!runner.is_submitted());
    }

    #[test]
    fn option_marks_reveal_after_submit() {
        let mut runner = runner(SectionId::Joints);
        let mut events = Recorder::default();
        runner.select_option(0).unwrap();
        assert!(runner.option_marks().iter().all(|m| *m == OptionMark::None));

        runner.submit_answer(&mut events).unwrap();
        assert_eq!(
            runner.option_marks(),
            [
                OptionMark::WrongChoice,
                OptionMark::Correct,
                OptionMark::None,
                OptionMark::None
            ]
        );
    }

    #[test]
    fn option_marks_for_correct_answer_show_only_correct() {
        let mut runner = runner(SectionId::Joints);
        let mut events = Recorder::default();
        answer(&mut runner, &mut events, 1);
        let marks = runner.option_marks();
        assert_eq!(marks.iter().filter(|m| **m == OptionMark::Correct).count(), 1);
        assert!(!marks.contains(&OptionMark::WrongChoice));
        assert_eq!(runner.feedback().unwrap().selected_index, 1);
    }

    #[test]
    fn badges_follow_position() {
        let mut runner = runner(SectionId::Joints);
        let mut events = Recorder::default();
        assert_eq!(
            runner.progress_badges(),
            [Badge::Current, Badge::Upcoming, Badge::Upcoming]
        );
        answer(&mut runner, &mut events, 1);
        runner.advance(&mut events).unwrap();
        assert_eq!(
            runner.progress_badges(),
            [Badge::Done, Badge::Current, Badge::Upcoming]
        );
    }

    #[test]
    fn visited_answers_are_retained() {
        let mut runner = runner(SectionId::Links);
        let mut events = Recorder::default();
        answer(&mut runner, &mut events, 3);
        runner.advance(&mut events).unwrap();

        assert_eq!(runner.state().selected.get("rigid"), Some(&3));
        assert!(runner.state().submitted.contains("rigid"));
        assert_eq!(runner.selected(), None);
        assert!(runner.feedback().is_none());
    }
}

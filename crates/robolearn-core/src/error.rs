//! Quiz error types.
//!
//! These errors represent operations invoked out of order by the
//! presentation layer, or catalog data that breaks the catalog invariants.
//! A failing operation never mutates runner or score state.

use thiserror::Error;

use crate::model::SectionId;

/// Errors that can occur while driving a quiz session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// The chosen option index is not one of the module's options.
    #[error("option {index} out of range (module has {len} options)")]
    OptionOutOfRange { index: usize, len: usize },

    /// The module's answer has already been locked in.
    #[error("module '{0}' has already been submitted")]
    AlreadySubmitted(String),

    /// Submit was requested before any option was selected.
    #[error("no option selected for module '{0}'")]
    NothingSelected(String),

    /// Advance was requested before the current module was submitted.
    #[error("module '{0}' must be submitted before advancing")]
    NotSubmitted(String),

    /// The section already signalled completion.
    #[error("section {0} is already complete")]
    SectionFinished(SectionId),

    /// A score was written for an id the catalog does not contain.
    #[error("unknown module: {0}")]
    UnknownModule(String),

    /// A runner operation was requested while no section is active.
    #[error("no section is active")]
    NoActiveSection,

    /// The catalog data violates a structural invariant.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

impl QuizError {
    /// Returns `true` if this error means the presentation layer called an
    /// operation out of state-machine order.
    pub fn is_contract_violation(&self) -> bool {
        !matches!(
            self,
            QuizError::UnknownModule(_) | QuizError::InvalidCatalog(_)
        )
    }
}

pub type Result<T, E = QuizError> = std::result::Result<T, E>;

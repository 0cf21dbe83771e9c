//! Error types for the quiz engine, calculators, and question banks.
//!
//! All quiz and calculator errors are recoverable: a shell reacts by
//! re-prompting (show the options again, show the input form again).

use thiserror::Error;

use crate::quiz::Phase;

/// Errors raised by quiz session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// No question bank is registered under the requested topic.
    #[error("unknown quiz topic: {0}")]
    UnknownTopic(String),

    /// An answer was submitted without selecting an option.
    #[error("no option selected")]
    NoSelection,

    /// The operation is not valid in the session's current phase.
    #[error("cannot {operation} while the session is {phase}")]
    InvalidSessionState {
        operation: &'static str,
        phase: Phase,
    },

    /// The selected option does not exist for the current question.
    #[error("option {selected} is out of range (question has {options} options)")]
    OptionOutOfRange { selected: usize, options: usize },
}

impl QuizError {
    /// Returns `true` if the shell should simply ask the user again.
    ///
    /// An unknown topic is a navigation mistake rather than an input mistake,
    /// so re-prompting for an answer would not help.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            QuizError::NoSelection | QuizError::OptionOutOfRange { .. }
        )
    }
}

/// Errors raised by the strict calculators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculatorError {
    /// A required numeric input was absent or not a positive number.
    #[error("missing or invalid input: {field} must be a positive number")]
    MissingInput { field: &'static str },
}

/// Invariant violations when constructing a question bank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    /// A bank must contain at least one question.
    #[error("question bank '{topic}' has no questions")]
    Empty { topic: String },

    /// Every question offers exactly four options.
    #[error("question {number} has {options} option(s), exactly 4 are required")]
    WrongOptionCount { number: usize, options: usize },

    /// The correct option index does not point at an existing option.
    #[error("question {number}: correct option {correct} is out of range (0..{options})")]
    CorrectOutOfRange {
        number: usize,
        correct: usize,
        options: usize,
    },

    /// Topic identifiers are used as lookup keys and cannot be blank.
    #[error("question bank topic is empty")]
    BlankTopic,
}

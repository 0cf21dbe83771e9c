//! Core data model types for ecgiga.
//!
//! Questions and banks are validated on construction, so every other part of
//! the system can index options without re-checking.

use serde::{Deserialize, Serialize};

use crate::error::BankError;

/// Options offered by every question.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text shown to the learner.
    pub prompt: String,
    /// Answer options, in display order. A bank only accepts [`OPTIONS_PER_QUESTION`] of them.
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct_option_index: usize,
    /// Explanation shown after answering.
    pub explanation: String,
}

impl Question {
    /// Number of options offered by this question.
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Text of the correct option.
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_option_index]
    }

    fn check(&self, number: usize) -> Result<(), BankError> {
        let options = self.options.len();
        if options != OPTIONS_PER_QUESTION {
            return Err(BankError::WrongOptionCount { number, options });
        }
        if self.correct_option_index >= options {
            return Err(BankError::CorrectOutOfRange {
                number,
                correct: self.correct_option_index,
                options,
            });
        }
        Ok(())
    }
}

/// The fixed, ordered set of questions for one topic.
///
/// Fields are private: a bank can only be obtained through [`QuestionBank::new`],
/// which guarantees it is non-empty and that every correct index is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionBank {
    topic: String,
    title: String,
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank, checking the question invariants.
    pub fn new(
        topic: impl Into<String>,
        title: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, BankError> {
        let topic = topic.into();
        if topic.trim().is_empty() {
            return Err(BankError::BlankTopic);
        }
        if questions.is_empty() {
            return Err(BankError::Empty { topic });
        }
        for (i, q) in questions.iter().enumerate() {
            q.check(i + 1)?;
        }
        Ok(Self {
            topic,
            title: title.into(),
            questions,
        })
    }

    /// Topic identifier this bank is registered under.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Human-readable bank title.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Number of questions. Never zero.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always `false`; provided for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Static learning content for one topic module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePayload {
    /// Topic identifier (shared with question banks).
    pub id: String,
    pub title: String,
    /// One-line description used in listings.
    #[serde(default)]
    pub summary: String,
    /// Module text, plain structured text with `#` headings and `-` bullets.
    pub body: String,
    /// Clinical cases referenced from this module.
    #[serde(default)]
    pub case_ids: Vec<String>,
    /// Calculators offered alongside this module (e.g. "sokolow", "qtc").
    #[serde(default)]
    pub calculators: Vec<String>,
}

/// A static clinical case vignette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseVignette {
    pub id: String,
    pub title: String,
    /// One-line teaser used in case listings.
    #[serde(default)]
    pub summary: String,
    pub body: String,
}

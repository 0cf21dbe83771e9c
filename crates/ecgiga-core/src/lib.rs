//! ecgiga-core: quiz engine, clinical calculators, and course content.
//!
//! This crate holds everything the ECG course shell renders: the content
//! registry with modules, cases and question banks, the quiz session state
//! machine, and the Sokolow-Lyon and QTc calculators.

pub mod calculator;
pub mod content;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod quiz;
pub mod registry;

pub use calculator::{corrected_qt, sokolow_lyon, CalculatorResult, LvhVerdict, QtcBand, Sex};
pub use engine::QuizEngine;
pub use error::{BankError, CalculatorError, QuizError};
pub use model::{CaseVignette, ModulePayload, Question, QuestionBank};
pub use quiz::{AnswerOutcome, Phase, QuestionView, QuizSession, QuizStep, Summary, Tier};
pub use registry::ContentRegistry;

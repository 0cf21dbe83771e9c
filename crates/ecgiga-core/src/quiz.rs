//! Quiz session state machine.
//!
//! ```text
//! AwaitingAnswer --submit_answer--> ShowingResult --advance--> AwaitingAnswer
//!                                                 \--advance (last)--> Finished
//! ```
//!
//! Every answer is followed by an explicit acknowledgment step, so the
//! explanation is always shown before the next question loads.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuizError;
use crate::model::QuestionBank;

/// The current step of a session's interaction cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    AwaitingAnswer,
    ShowingResult,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::AwaitingAnswer => write!(f, "awaiting answer"),
            Phase::ShowingResult => write!(f, "showing result"),
            Phase::Finished => write!(f, "finished"),
        }
    }
}

/// Render payload for the question currently on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    /// 1-based question number.
    pub number: usize,
    pub total: usize,
    pub prompt: String,
    pub options: Vec<String>,
    pub score: usize,
    /// Running score, e.g. "1/3".
    pub score_display: String,
}

/// Result of submitting an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub selected: usize,
    pub correct_option_index: usize,
    pub explanation: String,
    /// `true` when advancing will finish the quiz.
    pub is_last_question: bool,
}

/// Performance tier of a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Excellent,
    Good,
    NeedsReview,
}

impl Tier {
    /// Tier for a rounded percentage. Boundaries are inclusive from below.
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= 80 {
            Tier::Excellent
        } else if percentage >= 60 {
            Tier::Good
        } else {
            Tier::NeedsReview
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Excellent => "excellent",
            Tier::Good => "good",
            Tier::NeedsReview => "needs review",
        }
    }

    /// Encouragement shown under the final score.
    pub fn message(&self) -> &'static str {
        match self {
            Tier::Excellent => "Excellent! You have mastered the content.",
            Tier::Good => "Good work! Review a few concepts.",
            Tier::NeedsReview => "Keep studying. Practice makes perfect!",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Final summary of a finished quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub topic: String,
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub tier: Tier,
    /// 1-based numbers of the questions answered incorrectly.
    pub missed: Vec<usize>,
}

/// What the shell should show after advancing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuizStep {
    Question(QuestionView),
    Finished(Summary),
}

/// One submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerRecord {
    pub question_index: usize,
    pub selected: usize,
    pub is_correct: bool,
}

/// `round(100 * score / total)` with halves rounded up, in integer arithmetic.
pub fn percentage(score: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * score + total) / (2 * total)) as u32
}

/// A single learner's run through one question bank.
///
/// The session borrows its bank from the registry and is exclusively owned by
/// whoever started it; every transition goes through `&mut self`.
#[derive(Debug, Clone)]
pub struct QuizSession<'a> {
    id: Uuid,
    bank: &'a QuestionBank,
    current_index: usize,
    score: usize,
    phase: Phase,
    answers: Vec<AnswerRecord>,
}

impl<'a> QuizSession<'a> {
    /// Start a fresh session at the first question.
    pub fn new(bank: &'a QuestionBank) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            bank,
            current_index: 0,
            score: 0,
            phase: Phase::AwaitingAnswer,
            answers: Vec::with_capacity(bank.len()),
        };
        tracing::debug!(
            session = %session.id,
            topic = bank.topic(),
            questions = bank.len(),
            "quiz session created"
        );
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn topic(&self) -> &str {
        self.bank.topic()
    }

    pub fn bank(&self) -> &'a QuestionBank {
        self.bank
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// 0-based index of the current question (equals the bank length once finished).
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total(&self) -> usize {
        self.bank.len()
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Render payload for the current question, `None` once finished.
    pub fn current_question(&self) -> Option<QuestionView> {
        (!self.is_finished()).then(|| self.view())
    }

    /// Submit the selected option for the current question.
    ///
    /// The phase is checked before the selection, so a second submit is
    /// reported as a state error even when it carries no selection.
    pub fn submit_answer(&mut self, selected: Option<usize>) -> Result<AnswerOutcome, QuizError> {
        self.expect_phase(Phase::AwaitingAnswer, "submit an answer")?;
        let selected = selected.ok_or(QuizError::NoSelection)?;

        let question = &self.bank.questions()[self.current_index];
        if selected >= question.option_count() {
            return Err(QuizError::OptionOutOfRange {
                selected,
                options: question.option_count(),
            });
        }

        let is_correct = selected == question.correct_option_index;
        if is_correct {
            self.score += 1;
        }
        self.answers.push(AnswerRecord {
            question_index: self.current_index,
            selected,
            is_correct,
        });
        self.phase = Phase::ShowingResult;

        tracing::debug!(
            session = %self.id,
            question = self.current_index + 1,
            selected,
            is_correct,
            score = self.score,
            "answer submitted"
        );

        Ok(AnswerOutcome {
            is_correct,
            selected,
            correct_option_index: question.correct_option_index,
            explanation: question.explanation.clone(),
            is_last_question: self.current_index + 1 == self.total(),
        })
    }

    /// Acknowledge the shown result and move on.
    pub fn advance(&mut self) -> Result<QuizStep, QuizError> {
        self.expect_phase(Phase::ShowingResult, "advance")?;
        self.current_index += 1;

        if self.current_index < self.total() {
            self.phase = Phase::AwaitingAnswer;
            tracing::debug!(
                session = %self.id,
                question = self.current_index + 1,
                "advanced to next question"
            );
            return Ok(QuizStep::Question(self.view()));
        }

        self.phase = Phase::Finished;
        let summary = self.build_summary();
        tracing::info!(
            session = %self.id,
            topic = self.topic(),
            score = summary.score,
            total = summary.total,
            percentage = summary.percentage,
            tier = %summary.tier,
            "quiz finished"
        );
        Ok(QuizStep::Finished(summary))
    }

    /// Final summary, available once the session is finished.
    pub fn summary(&self) -> Option<Summary> {
        self.is_finished().then(|| self.build_summary())
    }

    /// A fresh session over the same bank.
    pub fn restart(&self) -> QuizSession<'a> {
        QuizSession::new(self.bank)
    }

    fn expect_phase(&self, expected: Phase, operation: &'static str) -> Result<(), QuizError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(QuizError::InvalidSessionState {
                operation,
                phase: self.phase,
            })
        }
    }

    // Only called while current_index < total.
    fn view(&self) -> QuestionView {
        let q = &self.bank.questions()[self.current_index];
        QuestionView {
            number: self.current_index + 1,
            total: self.total(),
            prompt: q.prompt.clone(),
            options: q.options.clone(),
            score: self.score,
            score_display: format!("{}/{}", self.score, self.total()),
        }
    }

    fn build_summary(&self) -> Summary {
        let total = self.total();
        let percentage = percentage(self.score, total);
        Summary {
            topic: self.topic().to_string(),
            score: self.score,
            total,
            percentage,
            tier: Tier::from_percentage(percentage),
            missed: self
                .answers
                .iter()
                .filter(|a| !a.is_correct)
                .map(|a| a.question_index + 1)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;

    fn bank(n: usize) -> QuestionBank {
        let questions = (0..n)
            .map(|i| Question {
                prompt: format!("Question {i}"),
                options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
                correct_option_index: i % 4,
                explanation: format!("Explanation {i}"),
            })
            .collect();
        QuestionBank::new("test", "Test", questions).unwrap()
    }

    #[test]
    fn starts_awaiting_first_question() {
        let bank = bank(3);
        let session = QuizSession::new(&bank);
        assert_eq!(session.phase(), Phase::AwaitingAnswer);
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_index(), 0);

        let view = session.current_question().unwrap();
        assert_eq!(view.number, 1);
        assert_eq!(view.total, 3);
        assert_eq!(view.score_display, "0/3");
        assert_eq!(view.options.len(), 4);
    }

    #[test]
    fn correct_answer_increments_score() {
        let bank = bank(2);
        let mut session = QuizSession::new(&bank);
        let outcome = session.submit_answer(Some(0)).unwrap();
        assert!(outcome.is_correct);
        assert!(!outcome.is_last_question);
        assert_eq!(outcome.explanation, "Explanation 0");
        assert_eq!(session.score(), 1);
        assert_eq!(session.phase(), Phase::ShowingResult);
    }

    #[test]
    fn wrong_answer_keeps_score() {
        let bank = bank(2);
        let mut session = QuizSession::new(&bank);
        let outcome = session.submit_answer(Some(3)).unwrap();
        assert!(!outcome.is_correct);
        assert_eq!(outcome.correct_option_index, 0);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn no_selection_is_rejected_without_state_change() {
        let bank = bank(1);
        let mut session = QuizSession::new(&bank);
        assert_eq!(session.submit_answer(None), Err(QuizError::NoSelection));
        assert_eq!(session.phase(), Phase::AwaitingAnswer);
        assert!(session.answers().is_empty());
    }

    #[test]
    fn out_of_range_option_is_rejected() {
        let bank = bank(1);
        let mut session = QuizSession::new(&bank);
        assert_eq!(
            session.submit_answer(Some(4)),
            Err(QuizError::OptionOutOfRange {
                selected: 4,
                options: 4
            })
        );
        assert_eq!(session.phase(), Phase::AwaitingAnswer);
    }

    #[test]
    fn double_submit_is_rejected() {
        let bank = bank(2);
        let mut session = QuizSession::new(&bank);
        session.submit_answer(Some(0)).unwrap();
        let err = session.submit_answer(Some(0)).unwrap_err();
        assert_eq!(
            err,
            QuizError::InvalidSessionState {
                operation: "submit an answer",
                phase: Phase::ShowingResult,
            }
        );
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn double_submit_without_selection_reports_state_error() {
        let bank = bank(2);
        let mut session = QuizSession::new(&bank);
        session.submit_answer(Some(1)).unwrap();
        assert!(matches!(
            session.submit_answer(None),
            Err(QuizError::InvalidSessionState { .. })
        ));
    }

    #[test]
    fn advance_before_answering_is_rejected() {
        let bank = bank(2);
        let mut session = QuizSession::new(&bank);
        assert_eq!(
            session.advance(),
            Err(QuizError::InvalidSessionState {
                operation: "advance",
                phase: Phase::AwaitingAnswer,
            })
        );
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn advance_moves_to_next_question_with_running_score() {
        let bank = bank(3);
        let mut session = QuizSession::new(&bank);
        session.submit_answer(Some(0)).unwrap();
        match session.advance().unwrap() {
            QuizStep::Question(view) => {
                assert_eq!(view.number, 2);
                assert_eq!(view.score_display, "1/3");
                assert_eq!(view.prompt, "Question 1");
            }
            other => panic!("expected a question, got {other:?}"),
        }
        assert_eq!(session.phase(), Phase::AwaitingAnswer);
    }

    #[test]
    fn full_run_finishes_with_summary() {
        let bank = bank(5);
        let mut session = QuizSession::new(&bank);
        // Right on questions 1, 2, 4; wrong on 3 and 5.
        let picks = [0, 1, 0, 3, 1];
        let mut last = None;
        for (i, pick) in picks.iter().enumerate() {
            let outcome = session.submit_answer(Some(*pick)).unwrap();
            assert_eq!(outcome.is_last_question, i == picks.len() - 1);
            last = Some(session.advance().unwrap());
        }

        let Some(QuizStep::Finished(summary)) = last else {
            panic!("expected quiz to finish");
        };
        assert_eq!(summary.score, 3);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.percentage, 60);
        assert_eq!(summary.tier, Tier::Good);
        assert_eq!(summary.missed, vec![3, 5]);
        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(session.current_index(), 5);
        assert!(session.current_question().is_none());
        assert_eq!(session.summary(), Some(summary));
    }

    #[test]
    fn finished_session_rejects_everything() {
        let bank = bank(1);
        let mut session = QuizSession::new(&bank);
        session.submit_answer(Some(0)).unwrap();
        session.advance().unwrap();
        assert!(matches!(
            session.submit_answer(Some(0)),
            Err(QuizError::InvalidSessionState {
                phase: Phase::Finished,
                ..
            })
        ));
        assert!(matches!(
            session.advance(),
            Err(QuizError::InvalidSessionState {
                phase: Phase::Finished,
                ..
            })
        ));
    }

    #[test]
    fn restart_gives_fresh_session() {
        let bank = bank(1);
        let mut session = QuizSession::new(&bank);
        session.submit_answer(Some(0)).unwrap();
        session.advance().unwrap();

        let again = session.restart();
        assert_ne!(again.id(), session.id());
        assert_eq!(again.phase(), Phase::AwaitingAnswer);
        assert_eq!(again.score(), 0);
        assert_eq!(again.topic(), "test");
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(Tier::from_percentage(100), Tier::Excellent);
        assert_eq!(Tier::from_percentage(80), Tier::Excellent);
        assert_eq!(Tier::from_percentage(79), Tier::Good);
        assert_eq!(Tier::from_percentage(60), Tier::Good);
        assert_eq!(Tier::from_percentage(59), Tier::NeedsReview);
        assert_eq!(Tier::from_percentage(0), Tier::NeedsReview);
        assert_eq!(Tier::NeedsReview.to_string(), "needs review");
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(1, 8), 13); // 12.5
        assert_eq!(percentage(0, 4), 0);
        assert_eq!(percentage(4, 4), 100);
        assert_eq!(percentage(0, 0), 0);
    }
}

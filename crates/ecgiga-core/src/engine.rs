//! Quiz engine: starts sessions from the registry and drives them to the end.
//!
//! Shells either call the [`QuizSession`] transitions directly or hand the
//! engine an [`AnswerSource`] and a [`QuizReporter`] and let [`QuizEngine::run`]
//! walk the state machine.

use crate::error::QuizError;
use crate::quiz::{AnswerOutcome, Phase, QuestionView, QuizSession, QuizStep, Summary};
use crate::registry::ContentRegistry;

/// What the learner did when asked for an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Submit this selection (`None` models "nothing selected").
    Select(Option<usize>),
    /// Leave the quiz.
    Quit,
}

/// Where answers come from: a terminal prompt, a scripted list, a test.
pub trait AnswerSource {
    fn respond(&mut self, question: &QuestionView) -> Response;
}

/// Answers taken from a fixed list; quits when the list runs out.
#[derive(Debug, Clone)]
pub struct ScriptedAnswers {
    answers: std::vec::IntoIter<Option<usize>>,
}

impl ScriptedAnswers {
    pub fn new(answers: Vec<Option<usize>>) -> Self {
        Self {
            answers: answers.into_iter(),
        }
    }
}

impl AnswerSource for ScriptedAnswers {
    fn respond(&mut self, _: &QuestionView) -> Response {
        self.answers.next().map_or(Response::Quit, Response::Select)
    }
}

/// Progress reporting trait.
pub trait QuizReporter {
    fn on_question(&self, question: &QuestionView);
    fn on_answer(&self, question: &QuestionView, outcome: &AnswerOutcome);
    fn on_rejected(&self, question: &QuestionView, error: &QuizError);
    fn on_finished(&self, summary: &Summary);
}

/// No-op reporter.
pub struct NoopReporter;

impl QuizReporter for NoopReporter {
    fn on_question(&self, _: &QuestionView) {}
    fn on_answer(&self, _: &QuestionView, _: &AnswerOutcome) {}
    fn on_rejected(&self, _: &QuestionView, _: &QuizError) {}
    fn on_finished(&self, _: &Summary) {}
}

/// How a driven run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(Summary),
    /// The learner quit before the last question.
    Abandoned { answered: usize, score: usize },
}

/// Starts quiz sessions against a content registry.
#[derive(Debug, Clone, Copy)]
pub struct QuizEngine<'r> {
    registry: &'r ContentRegistry,
}

impl<'r> QuizEngine<'r> {
    pub fn new(registry: &'r ContentRegistry) -> Self {
        Self { registry }
    }

    /// Start a session on the bank registered under `topic`.
    pub fn start_quiz(&self, topic: &str) -> Result<QuizSession<'r>, QuizError> {
        let bank = self
            .registry
            .get_bank(topic)
            .ok_or_else(|| QuizError::UnknownTopic(topic.to_string()))?;
        let session = QuizSession::new(bank);
        tracing::info!(session = %session.id(), topic, questions = bank.len(), "quiz started");
        Ok(session)
    }

    /// Same as [`start_quiz`](Self::start_quiz); named for the "try again" action.
    pub fn restart(&self, topic: &str) -> Result<QuizSession<'r>, QuizError> {
        self.start_quiz(topic)
    }

    /// Drive a full session for `topic`.
    ///
    /// Input errors (no selection, out-of-range option) are reported and the
    /// same question is asked again.
    pub fn run(
        &self,
        topic: &str,
        source: &mut dyn AnswerSource,
        reporter: &dyn QuizReporter,
    ) -> Result<RunOutcome, QuizError> {
        let mut session = self.start_quiz(topic)?;
        drive(&mut session, source, reporter)
    }
}

/// Walk a session until it finishes or the learner quits.
///
/// The session must be awaiting an answer; a finished session just yields
/// its summary.
pub fn drive(
    session: &mut QuizSession<'_>,
    source: &mut dyn AnswerSource,
    reporter: &dyn QuizReporter,
) -> Result<RunOutcome, QuizError> {
    if let Some(summary) = session.summary() {
        return Ok(RunOutcome::Completed(summary));
    }
    let (Phase::AwaitingAnswer, Some(mut question)) = (session.phase(), session.current_question())
    else {
        return Err(QuizError::InvalidSessionState {
            operation: "drive",
            phase: session.phase(),
        });
    };
    reporter.on_question(&question);

    loop {
        let selected = match source.respond(&question) {
            Response::Select(selected) => selected,
            Response::Quit => {
                tracing::info!(
                    session = %session.id(),
                    answered = session.answers().len(),
                    "quiz abandoned"
                );
                return Ok(RunOutcome::Abandoned {
                    answered: session.answers().len(),
                    score: session.score(),
                });
            }
        };

        let outcome = match session.submit_answer(selected) {
            Ok(outcome) => outcome,
            Err(e) if e.is_input_error() => {
                reporter.on_rejected(&question, &e);
                continue;
            }
            Err(e) => return Err(e),
        };
        reporter.on_answer(&question, &outcome);

        match session.advance()? {
            QuizStep::Question(next) => {
                question = next;
                reporter.on_question(&question);
            }
            QuizStep::Finished(summary) => {
                reporter.on_finished(&summary);
                return Ok(RunOutcome::Completed(summary));
            }
        }
    }
}

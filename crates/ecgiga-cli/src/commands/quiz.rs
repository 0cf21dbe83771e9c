//! The `ecgiga quiz` command.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};

use ecgiga_core::engine::{AnswerSource, QuizReporter, Response, RunOutcome, ScriptedAnswers};
use ecgiga_core::{AnswerOutcome, QuestionView, QuizEngine, QuizError, Summary};

use crate::config::EcgigaConfig;

pub fn execute(config: &EcgigaConfig, topic: &str, answers: Option<String>) -> Result<()> {
    let registry = super::load_registry(config)?;
    let engine = QuizEngine::new(&registry);

    let outcome = match answers {
        Some(list) => {
            let mut source = ScriptedAnswers::new(parse_answer_list(&list));
            engine.run(topic, &mut source, &TerminalReporter)?
        }
        None => {
            let stdin = io::stdin();
            let mut source = PromptAnswers {
                input: stdin.lock(),
            };
            engine.run(topic, &mut source, &TerminalReporter)?
        }
    };

    if let RunOutcome::Abandoned { answered, score } = outcome {
        println!();
        println!("Quiz abandoned after {answered} answer(s), {score} correct.");
    }

    Ok(())
}

/// Map a letter (`A`, `b`) or 1-based number to an option index.
fn parse_choice(raw: &str) -> Option<usize> {
    let raw = raw.trim();
    let mut chars = raw.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_alphabetic() {
            return Some((c.to_ascii_uppercase() as u8 - b'A') as usize);
        }
    }
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Some(n - 1),
        _ => None,
    }
}

fn parse_answer_list(list: &str) -> Vec<Option<usize>> {
    list.split(',').map(parse_choice).collect()
}

fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map_or('?', |i| char::from(b'A' + i))
}

/// Reads answers line by line from stdin. `q` or end of input quits.
struct PromptAnswers<R> {
    input: R,
}

impl<R: BufRead> AnswerSource for PromptAnswers<R> {
    fn respond(&mut self, question: &QuestionView) -> Response {
        let last = option_letter(question.options.len().saturating_sub(1));
        print!("Your answer (A-{last}, q to quit): ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => Response::Quit,
            Ok(_) if line.trim().eq_ignore_ascii_case("q") => Response::Quit,
            Ok(_) => Response::Select(parse_choice(&line)),
        }
    }
}

struct TerminalReporter;

impl QuizReporter for TerminalReporter {
    fn on_question(&self, q: &QuestionView) {
        println!();
        println!(
            "Question {} of {}   Score: {}",
            q.number, q.total, q.score_display
        );
        println!("{}", q.prompt);
        for (i, option) in q.options.iter().enumerate() {
            println!("  {}) {option}", option_letter(i));
        }
    }

    fn on_answer(&self, _: &QuestionView, outcome: &AnswerOutcome) {
        if outcome.is_correct {
            println!("Correct!");
        } else {
            println!(
                "Incorrect. The correct answer is {}.",
                option_letter(outcome.correct_option_index)
            );
        }
        println!("{}", outcome.explanation);
    }

    fn on_rejected(&self, _: &QuestionView, error: &QuizError) {
        match error {
            QuizError::NoSelection => println!("Select an answer!"),
            QuizError::OptionOutOfRange { selected, .. } => {
                println!("There is no option {}.", option_letter(*selected))
            }
            other => println!("{other}"),
        }
    }

    fn on_finished(&self, summary: &Summary) {
        println!();
        println!("Quiz finished!");

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["Topic", "Score", "Percentage", "Tier"]);
        table.add_row(vec![
            summary.topic.clone(),
            format!("{}/{}", summary.score, summary.total),
            format!("{}%", summary.percentage),
            summary.tier.label().to_string(),
        ]);
        println!("{table}");

        println!(
            "You got {} of {} questions right.",
            summary.score, summary.total
        );
        println!("{}", summary.tier.message());
        if !summary.missed.is_empty() {
            let missed: Vec<String> = summary.missed.iter().map(|n| n.to_string()).collect();
            println!("Review questions: {}", missed.join(", "));
        }
        println!("Try again: ecgiga quiz {}", summary.topic);
    }
}

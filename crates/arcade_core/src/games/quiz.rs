//! Quiz rules.

use super::{Outcome, Rejection};
use crate::content::Question;
use derive_getters::Getters;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// One pass through the question list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct QuizRound {
    #[getter(skip)]
    questions: &'static [Question],
    /// Index of the question being asked.
    current: usize,
    /// Option selected for the current question.
    selected: Option<usize>,
    /// Correct answers so far.
    score: u32,
    /// `Completed` once the last question has been answered.
    outcome: Outcome,
}

impl QuizRound {
    /// Starts at the first question. An empty list is complete from the start.
    pub fn new(questions: &'static [Question]) -> Self {
        let outcome = if questions.is_empty() {
            Outcome::Completed
        } else {
            Outcome::InProgress
        };
        Self {
            questions,
            current: 0,
            selected: None,
            score: 0,
            outcome,
        }
    }

    /// Questions in the order they are asked.
    pub fn questions(&self) -> &'static [Question] {
        self.questions
    }

    /// The question being asked, if the quiz is still running.
    pub fn current_question(&self) -> Option<&'static Question> {
        if self.outcome.is_terminal() {
            return None;
        }
        self.questions.get(self.current)
    }

    /// Selects an option; the selection may be changed until `advance`.
    ///
    /// # Errors
    ///
    /// Rejects after completion or when `option` is out of range.
    #[instrument(skip(self), fields(question = self.current))]
    pub fn select(&mut self, option: usize) -> Result<(), Rejection> {
        let question = self.current_question().ok_or(Rejection::RoundOver)?;
        if option >= question.options.len() {
            return Err(Rejection::UnknownOption(option));
        }
        self.selected = Some(option);
        Ok(())
    }

    /// Scores the selection and moves to the next question, or completes.
    ///
    /// # Errors
    ///
    /// Rejects after completion or when nothing is selected.
    #[instrument(skip(self), fields(question = self.current, score = self.score))]
    pub fn advance(&mut self) -> Result<(), Rejection> {
        let question = self.current_question().ok_or(Rejection::RoundOver)?;
        let option = self.selected.ok_or(Rejection::NothingSelected)?;

        if question.is_correct(option) {
            self.score += 1;
            debug!(score = self.score, "Correct answer");
        }
        self.selected = None;

        if self.current + 1 < self.questions.len() {
            self.current += 1;
        } else {
            info!(score = self.score, total = self.questions.len(), "Quiz complete");
            self.outcome = Outcome::Completed;
        }
        Ok(())
    }
}

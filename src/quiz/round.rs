use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::table::{SpeedTable, SpeedTerm};
use super::QuizError;

/// Why a submission was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mistake {
    NotANumber,
    WrongValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect(Mistake),
}

/// Result of one `submit_answer` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub outcome: AnswerOutcome,
    /// Position in the round that was just solved.
    pub solved: Option<usize>,
    /// True only on the submission that solved the last term.
    pub round_complete: bool,
}

/// One attempt at the whole table in a freshly shuffled order.
#[derive(Debug, Clone)]
pub struct QuizRound {
    order: Vec<SpeedTerm>,
    cursor: usize,
}

impl QuizRound {
    /// Uniformly random permutation of every term, cursor at the start.
    pub fn start_new_round<R: Rng + ?Sized>(table: &SpeedTable, rng: &mut R) -> Self {
        let mut order = table.terms().to_vec();
        order.shuffle(rng);
        Self { order, cursor: 0 }
    }

    /// Check `text` against the term under the cursor.
    ///
    /// A correct answer advances the cursor. An incorrect one leaves the round
    /// untouched; the caller is expected to throw it away and start over.
    pub fn submit_answer(&mut self, text: &str) -> Result<Submission, QuizError> {
        let term = self.current().ok_or(QuizError::RoundComplete)?;

        let outcome = match parse_answer(text) {
            Ok(value) if value == term.knots => AnswerOutcome::Correct,
            Ok(_) => AnswerOutcome::Incorrect(Mistake::WrongValue),
            Err(mistake) => AnswerOutcome::Incorrect(mistake),
        };

        if outcome != AnswerOutcome::Correct {
            return Ok(Submission {
                outcome,
                solved: None,
                round_complete: false,
            });
        }

        let solved = self.cursor;
        self.cursor += 1;
        Ok(Submission {
            outcome,
            solved: Some(solved),
            round_complete: self.is_complete(),
        })
    }

    pub fn current(&self) -> Option<&SpeedTerm> {
        self.order.get(self.cursor)
    }

    pub fn terms(&self) -> &[SpeedTerm] {
        &self.order
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.order.iter().map(|t| t.label).collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.cursor == self.order.len()
    }
}

/// Parse an answer as a non-negative integer.
///
/// Only ASCII digits (after trimming) count as a number. A digit string too
/// long for `u32` is still a number, just never the right one.
pub fn parse_answer(text: &str) -> Result<u32, Mistake> {
    let digits = text.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Mistake::NotANumber);
    }
    digits.parse::<u32>().map_err(|_| Mistake::WrongValue)
}

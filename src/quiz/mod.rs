pub mod round;
pub mod stats;
pub mod table;

pub use round::{parse_answer, AnswerOutcome, Mistake, QuizRound, Submission};
pub use stats::SessionStats;
pub use table::{SpeedTable, SpeedTerm, V_SPEEDS};

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// A table needs at least one term.
    EmptyTable,
    DuplicateLabel(String),
    /// Every term of the round is already answered.
    RoundComplete,
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::EmptyTable => write!(f, "speed table is empty"),
            QuizError::DuplicateLabel(label) => write!(f, "speed table lists '{}' twice", label),
            QuizError::RoundComplete => write!(f, "round is already complete"),
        }
    }
}

impl std::error::Error for QuizError {}

pub mod core {
	pub mod engine;
	pub mod input;
	pub mod surface;
	pub mod timeline;
}

pub mod app;
pub mod cli;
pub mod fireworks;
pub mod quiz;
pub mod ui;

// Re-export for convenience
pub use crate::app::{App, Flow, Phase};
pub use crate::quiz::{AnswerOutcome, Mistake, QuizRound, SpeedTable};

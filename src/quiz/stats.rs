/*
 * src/quiz/stats.rs
 * Per-process counters. Logged on exit, never written to disk.
 */

use serde::{Deserialize, Serialize};

use super::round::{AnswerOutcome, Mistake, Submission};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub rounds_started: u32,
    pub perfect_rounds: u32,
    pub correct_answers: u32,
    pub not_a_number: u32,
    pub wrong_value: u32,
    /// Most terms answered in a single round.
    pub best_progress: usize,
}

impl SessionStats {
    pub fn record_round_start(&mut self) {
        self.rounds_started += 1;
    }

    /// `progress` is the round's cursor after the submission.
    pub fn record_answer(&mut self, submission: &Submission, progress: usize) {
        match submission.outcome {
            AnswerOutcome::Correct => {
                self.correct_answers += 1;
                self.best_progress = self.best_progress.max(progress);
            }
            AnswerOutcome::Incorrect(Mistake::NotANumber) => self.not_a_number += 1,
            AnswerOutcome::Incorrect(Mistake::WrongValue) => self.wrong_value += 1,
        }
        if submission.round_complete {
            self.perfect_rounds += 1;
        }
    }

    pub fn mistakes(&self) -> u32 {
        self.not_a_number + self.wrong_value
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(outcome: AnswerOutcome, round_complete: bool) -> Submission {
        Submission {
            outcome,
            solved: None,
            round_complete,
        }
    }

    #[test]
    fn counts_by_kind() {
        let mut stats = SessionStats::default();
        stats.record_round_start();
        stats.record_answer(&submission(AnswerOutcome::Correct, false), 1);
        stats.record_answer(&submission(AnswerOutcome::Correct, false), 2);
        stats.record_answer(&submission(AnswerOutcome::Incorrect(Mistake::WrongValue), false), 2);
        stats.record_round_start();
        stats.record_answer(&submission(AnswerOutcome::Incorrect(Mistake::NotANumber), false), 0);

        assert_eq!(stats.rounds_started, 2);
        assert_eq!(stats.correct_answers, 2);
        assert_eq!(stats.mistakes(), 2);
        assert_eq!(stats.best_progress, 2);
        assert_eq!(stats.perfect_rounds, 0);
    }

    #[test]
    fn completion_counts_a_perfect_round() {
        let mut stats = SessionStats::default();
        stats.record_answer(&submission(AnswerOutcome::Correct, true), 18);
        assert_eq!(stats.perfect_rounds, 1);
        assert_eq!(stats.best_progress, 18);
    }

    #[test]
    fn json_summary_reads_back() {
        let mut stats = SessionStats::default();
        stats.record_round_start();
        let parsed: SessionStats = serde_json::from_str(&stats.to_json()).unwrap();
        assert_eq!(parsed, stats);
    }
}

/// Owned state of one quiz session and the handlers that mutate it.
///
/// Everything the main loop touches lives here and is only changed through
/// `&mut App`, one event at a time.
use std::time::Duration;

use crossterm::event::KeyEvent;
use rand::rngs::StdRng;
use rand::Rng;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::core::input::{classify, KeyAction};
use crate::core::surface::Overlay;
use crate::core::timeline::Timeline;
use crate::fireworks::{Animator, AnimatorSignal, LauncherMsg};
use crate::quiz::{AnswerOutcome, QuizRound, SessionStats, SpeedTable};
use crate::ui::board::{Board, Mark};

/// How long the red flash stays up before the new round replaces it.
pub const FLASH_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Answering,
    /// Wrong answer shown; a new round is queued.
    Flashing,
    Celebrating,
    /// Completion prompt is up, waiting for any key.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppTimer {
    RestartRound,
}

pub struct App {
    table: SpeedTable,
    round: QuizRound,
    board: Board,
    overlay: Overlay,
    animator: Animator,
    timeline: Timeline<AppTimer>,
    rng: StdRng,
    phase: Phase,
    /// Re-submission guard while a celebration owns the screen.
    fireworks_active: bool,
    stats: SessionStats,
    launcher_tx: UnboundedSender<LauncherMsg>,
}

impl App {
    pub fn new(table: SpeedTable, mut rng: StdRng, launcher_tx: UnboundedSender<LauncherMsg>) -> Self {
        let round = QuizRound::start_new_round(&table, &mut rng);
        let mut app = Self {
            table,
            round,
            board: Board::new(),
            overlay: Overlay::new(),
            animator: Animator::new(),
            timeline: Timeline::new(),
            rng,
            phase: Phase::Answering,
            fireworks_active: false,
            stats: SessionStats::default(),
            launcher_tx,
        };
        app.present_round();
        app
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn round(&self) -> &QuizRound {
        &self.round
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn fireworks_active(&self) -> bool {
        self.fireworks_active
    }

    /// Earliest moment any pending timer wants the loop to wake.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.timeline.next_deadline(), self.animator.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Flow {
        let action = classify(&key);
        if action == KeyAction::Quit {
            self.animator.stop(&mut self.overlay);
            return Flow::Quit;
        }

        match self.phase {
            Phase::Completed => {
                // Any key dismisses the prompt; the key itself is consumed.
                self.board.dismiss_completion_prompt();
                self.start_new_round();
            }
            Phase::Flashing | Phase::Celebrating => {}
            Phase::Answering => match action {
                KeyAction::Digit(c) => self.board.push_digit(c),
                KeyAction::Erase => self.board.erase(),
                KeyAction::Clear => self.board.clear_entry(),
                KeyAction::Submit => self.submit(now),
                KeyAction::Quit | KeyAction::Rejected => {}
            },
        }
        Flow::Continue
    }

    /// Submit the focused entry. Ignored while fireworks run or a reset is pending.
    pub fn submit(&mut self, now: Instant) {
        if self.fireworks_active || self.phase != Phase::Answering {
            debug!(phase = ?self.phase, "submission ignored");
            return;
        }

        let label = self.round.current().map(|t| t.label).unwrap_or_default();
        let text = self.board.current_text().to_string();
        let submission = match self.round.submit_answer(&text) {
            Ok(submission) => submission,
            Err(e) => {
                warn!(error = %e, "submission rejected");
                return;
            }
        };
        self.stats.record_answer(&submission, self.round.cursor());

        match submission.outcome {
            AnswerOutcome::Correct => {
                info!(label, cursor = self.round.cursor(), "correct");
                if let Some(index) = submission.solved {
                    self.board.mark_entry(index, Mark::Correct);
                }
                self.board.focus(self.round.cursor());
                if submission.round_complete {
                    self.celebrate(now);
                }
            }
            AnswerOutcome::Incorrect(mistake) => {
                info!(label, answer = %text, ?mistake, "incorrect, resetting round");
                self.board.flash_all(Mark::Incorrect);
                self.phase = Phase::Flashing;
                self.timeline.schedule(now, FLASH_DELAY, AppTimer::RestartRound);
            }
        }
    }

    pub fn on_launcher(&mut self, msg: LauncherMsg, now: Instant) {
        if let Some(AnimatorSignal::Finished) = self.animator.handle(msg, now, &mut self.overlay) {
            self.fireworks_active = false;
            self.phase = Phase::Completed;
            self.board.show_completion_prompt();
        }
    }

    /// Run every timer that is due.
    pub fn advance(&mut self, now: Instant) {
        while let Some((_, timer)) = self.timeline.pop_due(now) {
            match timer {
                AppTimer::RestartRound => self.start_new_round(),
            }
        }
        self.animator.advance(now, &mut self.overlay);
    }

    fn celebrate(&mut self, now: Instant) {
        self.fireworks_active = true;
        self.phase = Phase::Celebrating;
        let seed = self.rng.random::<u64>();
        self.animator
            .start(now, &mut self.overlay, seed, self.launcher_tx.clone());
    }

    fn start_new_round(&mut self) {
        self.round = QuizRound::start_new_round(&self.table, &mut self.rng);
        self.present_round();
    }

    fn present_round(&mut self) {
        self.board.render_round(self.round.terms());
        self.phase = Phase::Answering;
        self.stats.record_round_start();
        debug!(order = ?self.round.labels(), "new round");
        info!(round = self.stats.rounds_started, "round started");
    }
}

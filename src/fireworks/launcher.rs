/// Background spawn loop for a celebration.
///
/// Runs as its own tokio task and never touches drawing state: it only posts
/// [`LauncherMsg`]s back to the main loop, which owns the animator.
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant};
use tracing::debug;

use super::plan::FireworkPlan;

pub const CELEBRATION_LENGTH: Duration = Duration::from_secs(10);
pub const SPAWN_INTERVAL: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq)]
pub enum LauncherMsg {
    Launch { session: u64, plan: FireworkPlan },
    Finished { session: u64 },
}

pub fn spawn_launcher(session: u64, seed: u64, tx: UnboundedSender<LauncherMsg>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut rng = StdRng::seed_from_u64(seed);
        let started = Instant::now();
        let mut ticker = interval(SPAWN_INTERVAL);
        let mut launched = 0u32;

        loop {
            ticker.tick().await;
            if started.elapsed() >= CELEBRATION_LENGTH {
                break;
            }
            let plan = FireworkPlan::random(&mut rng);
            if tx.send(LauncherMsg::Launch { session, plan }).is_err() {
                // Main loop is gone.
                return;
            }
            launched += 1;
        }

        debug!(session, launched, "launcher done");
        let _ = tx.send(LauncherMsg::Finished { session });
    })
}

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, sleep_until, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::app::{App, Flow};
use crate::cli::AppConfig;
use crate::quiz::{SessionStats, SpeedTable, V_SPEEDS};
use crate::ui::renderer;

const FRAME_INTERVAL: Duration = Duration::from_millis(33);
/// Wake-up used when no timer is pending, so the select always has a sleep arm.
const IDLE_WAKE: Duration = Duration::from_secs(1);

/// Run the quiz until the user quits. Returns the session's stats.
pub async fn run(config: &AppConfig, mut terminal: DefaultTerminal) -> Result<SessionStats> {
    let table = SpeedTable::new(V_SPEEDS).context("building the V-speed table")?;

    // Launcher tasks post here; only this loop touches the App.
    let (launcher_tx, mut launcher_rx) = mpsc::unbounded_channel();
    let mut app = App::new(table, config.rng(), launcher_tx);

    let mut events = EventStream::new();
    let mut render_timer = interval(FRAME_INTERVAL);
    render_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let wake = app
            .next_deadline()
            .unwrap_or_else(|| Instant::now() + IDLE_WAKE);

        tokio::select! {
            // 1. RENDER
            _ = render_timer.tick() => {
                terminal
                    .draw(|f| renderer::render(f, &app))
                    .context("drawing frame")?;
            }

            // 2. LAUNCHER: fireworks posted from the background spawn loop
            Some(msg) = launcher_rx.recv() => {
                app.on_launcher(msg, Instant::now());
            }

            // 3. INPUT
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key, Instant::now()) == Flow::Quit {
                        info!("quit requested");
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("reading terminal events"),
                None => {
                    debug!("event stream closed");
                    break;
                }
            },

            // 4. TIMERS
            _ = sleep_until(wake) => {
                app.advance(Instant::now());
            }
        }
    }

    Ok(app.stats().clone())
}

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use ratatui::style::Color;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

use super::launcher::{spawn_launcher, LauncherMsg};
use super::particle::{radial_velocities, Particle, BURST_TICKS};
use super::plan::FireworkPlan;
use crate::core::surface::{PointId, Pos, Surface};
use crate::core::timeline::Timeline;

pub const ASCENT_STEPS: u32 = 20;
pub const ASCENT_STEP_DELAY: Duration = Duration::from_millis(20);
/// How long a rocket trail marker stays on screen.
pub const MARKER_LIFETIME: Duration = Duration::from_millis(50);
pub const BURST_TICK: Duration = Duration::from_millis(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorState {
    Idle,
    Running { started: Instant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatorSignal {
    /// The celebration ran its full length and cleaned up after itself.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Ascend(u64),
    Expire(PointId),
    Burst(u64),
}

#[derive(Debug)]
enum Phase {
    Ascent { step: u32 },
    Burst { tick: u32, particles: Vec<Particle> },
}

#[derive(Debug)]
struct Firework {
    launch: Pos,
    burst: Pos,
    color: Color,
    speeds: Vec<f64>,
    phase: Phase,
}

/// Runs the celebration: accepts launches from the background launcher and
/// steps every in-flight firework from the main loop's timer.
///
/// Each firework owns its particles exclusively. Rocket trail markers are
/// tracked separately since they outlive the step that drew them.
pub struct Animator {
    state: AnimatorState,
    session: u64,
    fireworks: HashMap<u64, Firework>,
    markers: HashSet<PointId>,
    timeline: Timeline<Step>,
    launcher: Option<JoinHandle<()>>,
    next_firework: u64,
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator {
    pub fn new() -> Self {
        Self {
            state: AnimatorState::Idle,
            session: 0,
            fireworks: HashMap::new(),
            markers: HashSet::new(),
            timeline: Timeline::new(),
            launcher: None,
            next_firework: 0,
        }
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, AnimatorState::Running { .. })
    }

    pub fn started_at(&self) -> Option<Instant> {
        match self.state {
            AnimatorState::Running { started } => Some(started),
            AnimatorState::Idle => None,
        }
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    /// Fireworks currently ascending or bursting.
    pub fn active_fireworks(&self) -> usize {
        self.fireworks.len()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timeline.next_deadline()
    }

    /// Start a celebration and its launcher task. A no-op while one is running.
    pub fn start(
        &mut self,
        now: Instant,
        surface: &mut dyn Surface,
        seed: u64,
        tx: UnboundedSender<LauncherMsg>,
    ) -> bool {
        if !self.begin(now, surface) {
            return false;
        }
        self.launcher = Some(spawn_launcher(self.session, seed, tx));
        true
    }

    fn begin(&mut self, now: Instant, surface: &mut dyn Surface) -> bool {
        if self.is_running() {
            return false;
        }
        self.session += 1;
        self.state = AnimatorState::Running { started: now };
        surface.show_overlay();
        info!(session = self.session, "celebration started");
        true
    }

    /// Cancel the celebration. Everything this animator drew is removed before
    /// returning and nothing is drawn afterwards. Safe to call at any time.
    pub fn stop(&mut self, surface: &mut dyn Surface) {
        if let Some(handle) = self.launcher.take() {
            handle.abort();
        }
        if self.is_running() {
            info!(session = self.session, "celebration stopped");
        }
        self.state = AnimatorState::Idle;
        self.clear(surface);
        surface.hide_overlay();
    }

    /// Apply a message from the launcher. Messages from an earlier session, or
    /// arriving after a stop, are dropped.
    pub fn handle(
        &mut self,
        msg: LauncherMsg,
        now: Instant,
        surface: &mut dyn Surface,
    ) -> Option<AnimatorSignal> {
        match msg {
            LauncherMsg::Launch { session, plan } => {
                if self.accepts(session) {
                    self.launch(plan, now, surface);
                } else {
                    debug!(session, current = self.session, "dropping stale launch");
                }
                None
            }
            LauncherMsg::Finished { session } => {
                if !self.accepts(session) {
                    return None;
                }
                self.launcher = None;
                self.state = AnimatorState::Idle;
                self.clear(surface);
                surface.hide_overlay();
                info!(session, "celebration finished");
                Some(AnimatorSignal::Finished)
            }
        }
    }

    /// Run every step that is due at `now`.
    pub fn advance(&mut self, now: Instant, surface: &mut dyn Surface) {
        while let Some((due, step)) = self.timeline.pop_due(now) {
            match step {
                Step::Expire(point) => {
                    if self.markers.remove(&point) {
                        surface.remove_point(point);
                    }
                }
                Step::Ascend(id) => self.ascend(id, due, surface),
                Step::Burst(id) => self.burst(id, due, surface),
            }
        }
    }

    fn accepts(&self, session: u64) -> bool {
        session == self.session && self.is_running()
    }

    fn launch(&mut self, plan: FireworkPlan, now: Instant, surface: &mut dyn Surface) {
        let id = self.next_firework;
        self.next_firework += 1;
        self.fireworks.insert(
            id,
            Firework {
                launch: plan.launch,
                burst: plan.burst,
                color: plan.color,
                speeds: plan.speeds.to_vec(),
                phase: Phase::Ascent { step: 0 },
            },
        );
        self.ascend(id, now, surface);
    }

    fn ascend(&mut self, id: u64, now: Instant, surface: &mut dyn Surface) {
        if !self.is_running() {
            return;
        }
        let Some(firework) = self.fireworks.get_mut(&id) else {
            return;
        };
        let Phase::Ascent { step } = firework.phase else {
            return;
        };

        if step < ASCENT_STEPS {
            let pos = firework
                .launch
                .lerp(firework.burst, step as f64 / ASCENT_STEPS as f64);
            let marker = surface.draw_point(pos, firework.color);
            firework.phase = Phase::Ascent { step: step + 1 };
            self.markers.insert(marker);
            self.timeline.schedule(now, MARKER_LIFETIME, Step::Expire(marker));
            self.timeline.schedule(now, ASCENT_STEP_DELAY, Step::Ascend(id));
            return;
        }

        // Reached the top: explode. Tick 0 is the burst point itself.
        let particles = radial_velocities(&firework.speeds)
            .into_iter()
            .map(|velocity| Particle {
                origin: firework.burst,
                velocity,
                point: surface.draw_point(firework.burst, firework.color),
            })
            .collect();
        firework.phase = Phase::Burst { tick: 1, particles };
        self.timeline.schedule(now, BURST_TICK, Step::Burst(id));
    }

    fn burst(&mut self, id: u64, now: Instant, surface: &mut dyn Surface) {
        if !self.is_running() {
            return;
        }
        let Some(firework) = self.fireworks.get_mut(&id) else {
            return;
        };
        let Phase::Burst { tick, particles } = &mut firework.phase else {
            return;
        };

        if *tick > BURST_TICKS {
            for particle in particles.iter() {
                surface.remove_point(particle.point);
            }
            self.fireworks.remove(&id);
            return;
        }

        for particle in particles.iter() {
            surface.move_point(particle.point, particle.position(*tick));
        }
        *tick += 1;
        self.timeline.schedule(now, BURST_TICK, Step::Burst(id));
    }

    /// Remove everything drawn and forget all pending steps.
    fn clear(&mut self, surface: &mut dyn Surface) {
        self.timeline.clear();
        for marker in self.markers.drain() {
            surface.remove_point(marker);
        }
        for (_, firework) in self.fireworks.drain() {
            if let Phase::Burst { particles, .. } = firework.phase {
                for particle in particles {
                    surface.remove_point(particle.point);
                }
            }
        }
    }
}

impl Drop for Animator {
    fn drop(&mut self) {
        if let Some(handle) = self.launcher.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::Overlay;
    use crate::fireworks::plan::PARTICLES_PER_BURST;

    /// Overlay that also counts the calls made on it.
    #[derive(Default)]
    struct RecordingSurface {
        overlay: Overlay,
        draws: usize,
        moves: usize,
        removes: usize,
    }

    impl Surface for RecordingSurface {
        fn show_overlay(&mut self) {
            self.overlay.show_overlay();
        }
        fn hide_overlay(&mut self) {
            self.overlay.hide_overlay();
        }
        fn draw_point(&mut self, pos: Pos, color: Color) -> PointId {
            self.draws += 1;
            self.overlay.draw_point(pos, color)
        }
        fn move_point(&mut self, id: PointId, pos: Pos) {
            self.moves += 1;
            self.overlay.move_point(id, pos);
        }
        fn remove_point(&mut self, id: PointId) {
            self.removes += 1;
            self.overlay.remove_point(id);
        }
    }

    fn plan() -> FireworkPlan {
        FireworkPlan {
            launch: Pos::new(100.0, 750.0),
            burst: Pos::new(300.0, 250.0),
            color: Color::Rgb(0xFF, 0xD7, 0x00),
            speeds: [50.0; PARTICLES_PER_BURST],
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn running() -> (Animator, RecordingSurface, Instant) {
        let mut animator = Animator::new();
        let mut surface = RecordingSurface::default();
        let t0 = Instant::now();
        assert!(animator.begin(t0, &mut surface));
        (animator, surface, t0)
    }

    fn launch(animator: &mut Animator, surface: &mut RecordingSurface, now: Instant) {
        let session = animator.session();
        animator.handle(LauncherMsg::Launch { session, plan: plan() }, now, surface);
    }

    fn has_point_near(surface: &RecordingSurface, expected: Pos) -> bool {
        surface
            .overlay
            .points()
            .any(|(p, _)| (p.x - expected.x).abs() < 1e-9 && (p.y - expected.y).abs() < 1e-9)
    }

    #[test]
    fn start_is_idempotent() {
        let (mut animator, mut surface, t0) = running();
        let session = animator.session();
        assert!(surface.overlay.is_visible());

        assert!(!animator.begin(t0 + ms(100), &mut surface));
        assert_eq!(animator.session(), session);
        assert_eq!(animator.started_at(), Some(t0));
    }

    #[test]
    fn rocket_trail_markers_expire() {
        let (mut animator, mut surface, t0) = running();
        launch(&mut animator, &mut surface, t0);
        assert_eq!(surface.overlay.len(), 1);
        assert!(has_point_near(&surface, Pos::new(100.0, 750.0)));

        // Markers at 0, 20 and 40 ms; the first one expires at 50 ms.
        animator.advance(t0 + ms(50), &mut surface);
        assert_eq!(surface.draws, 3);
        assert_eq!(surface.overlay.len(), 2);
        assert!(!has_point_near(&surface, Pos::new(100.0, 750.0)));
    }

    #[test]
    fn ascent_then_burst() {
        let (mut animator, mut surface, t0) = running();
        launch(&mut animator, &mut surface, t0);

        // Step 19 at 380 ms is the last marker, the burst happens at 400 ms.
        animator.advance(t0 + ms(399), &mut surface);
        assert_eq!(surface.draws, ASCENT_STEPS as usize);
        let last = Pos::new(100.0, 750.0).lerp(Pos::new(300.0, 250.0), 19.0 / 20.0);
        assert!(has_point_near(&surface, last));

        animator.advance(t0 + ms(400), &mut surface);
        assert_eq!(surface.draws, ASCENT_STEPS as usize + PARTICLES_PER_BURST);
        let at_origin = surface
            .overlay
            .points()
            .filter(|(p, _)| *p == Pos::new(300.0, 250.0))
            .count();
        assert_eq!(at_origin, PARTICLES_PER_BURST);
    }

    #[test]
    fn burst_follows_trajectory_and_cleans_up() {
        let (mut animator, mut surface, t0) = running();
        launch(&mut animator, &mut surface, t0);

        // Tick 10 lands at 400 + 10 * 30 ms.
        animator.advance(t0 + ms(700), &mut surface);
        // Particle 0 flies along +x at speed 50: (300 + 50, 250 + 5).
        assert!(has_point_near(&surface, Pos::new(350.0, 255.0)));
        // Particle 5 flies along +y: (300, 250 + 50 + 5).
        assert!(has_point_near(&surface, Pos::new(300.0, 305.0)));

        // Tick 30 at 1300 ms.
        animator.advance(t0 + ms(1300), &mut surface);
        assert!(has_point_near(&surface, Pos::new(450.0, 295.0)));
        assert_eq!(surface.overlay.len(), PARTICLES_PER_BURST);
        assert_eq!(animator.active_fireworks(), 1);

        animator.advance(t0 + ms(1330), &mut surface);
        assert!(surface.overlay.is_empty());
        assert_eq!(animator.active_fireworks(), 0);
        assert!(animator.next_deadline().is_none());
        // Ticks 1..=30 each move every particle once.
        assert_eq!(surface.moves, 30 * PARTICLES_PER_BURST);
    }

    #[test]
    fn stop_mid_flight_halts_all_drawing() {
        let (mut animator, mut surface, t0) = running();
        launch(&mut animator, &mut surface, t0);
        launch(&mut animator, &mut surface, t0 + ms(300));
        animator.advance(t0 + ms(520), &mut surface);
        assert!(!surface.overlay.is_empty());

        let session = animator.session();
        animator.stop(&mut surface);
        assert!(surface.overlay.is_empty());
        assert!(!surface.overlay.is_visible());
        assert_eq!(animator.state(), AnimatorState::Idle);

        let (draws, moves) = (surface.draws, surface.moves);
        animator.advance(t0 + ms(5_000), &mut surface);
        let late = LauncherMsg::Launch { session, plan: plan() };
        assert_eq!(animator.handle(late, t0 + ms(5_000), &mut surface), None);
        let done = LauncherMsg::Finished { session };
        assert_eq!(animator.handle(done, t0 + ms(5_000), &mut surface), None);

        assert_eq!((surface.draws, surface.moves), (draws, moves));
        assert!(surface.overlay.is_empty());

        // Stopping again is harmless.
        animator.stop(&mut surface);
        assert_eq!(animator.state(), AnimatorState::Idle);
    }

    #[test]
    fn old_session_messages_are_ignored_after_restart() {
        let (mut animator, mut surface, t0) = running();
        let old = animator.session();
        animator.stop(&mut surface);
        assert!(animator.begin(t0 + ms(10), &mut surface));

        let stale = LauncherMsg::Launch { session: old, plan: plan() };
        animator.handle(stale, t0 + ms(10), &mut surface);
        assert_eq!(surface.draws, 0);
        assert_eq!(animator.handle(LauncherMsg::Finished { session: old }, t0, &mut surface), None);
        assert!(animator.is_running());
    }

    #[test]
    fn finish_clears_and_reports() {
        let (mut animator, mut surface, t0) = running();
        launch(&mut animator, &mut surface, t0);
        animator.advance(t0 + ms(600), &mut surface);
        assert!(!surface.overlay.is_empty());

        let session = animator.session();
        let signal = animator.handle(LauncherMsg::Finished { session }, t0 + ms(600), &mut surface);
        assert_eq!(signal, Some(AnimatorSignal::Finished));
        assert!(surface.overlay.is_empty());
        assert!(!surface.overlay.is_visible());
        assert!(!animator.is_running());

        let draws = surface.draws;
        animator.advance(t0 + ms(3_000), &mut surface);
        assert_eq!(surface.draws, draws);
    }

    #[tokio::test(start_paused = true)]
    async fn full_run_through_the_launcher() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let mut animator = Animator::new();
        let mut surface = RecordingSurface::default();
        let t0 = Instant::now();

        assert!(animator.start(t0, &mut surface, 17, tx.clone()));
        assert!(!animator.start(t0, &mut surface, 17, tx));

        let signal = loop {
            let wake = animator
                .next_deadline()
                .unwrap_or_else(|| Instant::now() + Duration::from_secs(1));
            tokio::select! {
                Some(msg) = rx.recv() => {
                    if let Some(signal) = animator.handle(msg, Instant::now(), &mut surface) {
                        break signal;
                    }
                }
                _ = tokio::time::sleep_until(wake) => animator.advance(Instant::now(), &mut surface),
            }
        };

        assert_eq!(signal, AnimatorSignal::Finished);
        assert!(t0.elapsed() >= Duration::from_secs(10));
        assert!(surface.overlay.is_empty());
        assert!(surface.draws > 0);
        assert!(!animator.is_running());
    }
}

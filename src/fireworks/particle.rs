use std::f64::consts::TAU;

use crate::core::surface::{PointId, Pos};

/// Last tick a burst particle is drawn at; it is removed on the next one.
pub const BURST_TICKS: u32 = 30;
const DRIFT_PER_TICK: f64 = 0.1;
const GRAVITY: f64 = 0.05;

#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub origin: Pos,
    pub velocity: Pos,
    pub point: PointId,
}

impl Particle {
    pub fn position(&self, tick: u32) -> Pos {
        position_at(self.origin, self.velocity, tick)
    }
}

/// Linear drift plus a quadratic pull on the vertical axis only.
pub fn position_at(origin: Pos, velocity: Pos, tick: u32) -> Pos {
    let t = tick as f64;
    Pos::new(
        origin.x + velocity.x * t * DRIFT_PER_TICK,
        origin.y + velocity.y * t * DRIFT_PER_TICK + t * t * GRAVITY,
    )
}

/// One velocity per speed, spread evenly around the circle starting at angle 0.
pub fn radial_velocities(speeds: &[f64]) -> Vec<Pos> {
    let n = speeds.len() as f64;
    speeds
        .iter()
        .enumerate()
        .map(|(i, speed)| {
            let angle = TAU * i as f64 / n;
            Pos::new(angle.cos() * speed, angle.sin() * speed)
        })
        .collect()
}

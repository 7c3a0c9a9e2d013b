use rand::Rng;
use ratatui::style::Color;

use crate::core::surface::Pos;

/// Virtual canvas the fireworks are laid out on. Scaled to the terminal at draw time.
pub const CANVAS_WIDTH: f64 = 600.0;
pub const CANVAS_HEIGHT: f64 = 900.0;

pub const LAUNCH_Y: f64 = 750.0;
pub const LAUNCH_X_RANGE: (u32, u32) = (100, 500);
pub const BURST_X_RANGE: (u32, u32) = (150, 450);
pub const BURST_Y_RANGE: (u32, u32) = (200, 400);

pub const PARTICLES_PER_BURST: usize = 20;
/// Outward speed of a burst particle, half-open.
pub const PARTICLE_SPEED: (f64, f64) = (30.0, 80.0);

pub const PALETTE: [Color; 10] = [
    Color::Rgb(0xFF, 0x00, 0x00),
    Color::Rgb(0x00, 0xFF, 0x00),
    Color::Rgb(0x00, 0x00, 0xFF),
    Color::Rgb(0xFF, 0xFF, 0x00),
    Color::Rgb(0xFF, 0x00, 0xFF),
    Color::Rgb(0x00, 0xFF, 0xFF),
    Color::Rgb(0xFF, 0xA5, 0x00),
    Color::Rgb(0xFF, 0x69, 0xB4),
    Color::Rgb(0x32, 0xCD, 0x32),
    Color::Rgb(0xFF, 0xD7, 0x00),
];

/// Everything random about one firework, drawn up front so the animation
/// itself is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct FireworkPlan {
    pub launch: Pos,
    pub burst: Pos,
    pub color: Color,
    pub speeds: [f64; PARTICLES_PER_BURST],
}

impl FireworkPlan {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let launch_x = rng.random_range(LAUNCH_X_RANGE.0..=LAUNCH_X_RANGE.1);
        let burst_x = rng.random_range(BURST_X_RANGE.0..=BURST_X_RANGE.1);
        let burst_y = rng.random_range(BURST_Y_RANGE.0..=BURST_Y_RANGE.1);
        let color = PALETTE[rng.random_range(0..PALETTE.len())];

        let mut speeds = [0.0; PARTICLES_PER_BURST];
        for speed in speeds.iter_mut() {
            *speed = rng.random_range(PARTICLE_SPEED.0..PARTICLE_SPEED.1);
        }

        Self {
            launch: Pos::new(launch_x as f64, LAUNCH_Y),
            burst: Pos::new(burst_x as f64, burst_y as f64),
            color,
            speeds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_plans_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let plan = FireworkPlan::random(&mut rng);
            assert_eq!(plan.launch.y, LAUNCH_Y);
            assert!((100.0..=500.0).contains(&plan.launch.x));
            assert!((150.0..=450.0).contains(&plan.burst.x));
            assert!((200.0..=400.0).contains(&plan.burst.y));
            assert!(PALETTE.contains(&plan.color));
            assert!(plan.speeds.iter().all(|s| (30.0..80.0).contains(s)));
        }
    }

    #[test]
    fn same_seed_same_plan() {
        let a = FireworkPlan::random(&mut StdRng::seed_from_u64(5));
        let b = FireworkPlan::random(&mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }
}

pub mod animator;
pub mod launcher;
pub mod particle;
pub mod plan;

pub use animator::{Animator, AnimatorSignal, AnimatorState};
pub use launcher::{LauncherMsg, CELEBRATION_LENGTH};
pub use plan::FireworkPlan;

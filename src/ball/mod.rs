//! Ball module - bodies, physics, the engine, and display systems

mod body;
mod display;
mod engine;
mod physics;
mod seeding;

pub use body::*;
pub use display::*;
pub use engine::*;
pub use physics::*;
pub use seeding::*;

//! Skill roster - the display metadata attached to each ball

mod database;

pub use database::*;

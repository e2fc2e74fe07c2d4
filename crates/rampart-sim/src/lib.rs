//! Combat simulation for RAMPART.
//!
//! Owns the hecs ECS world, the player, the boss and every projectile,
//! runs all systems in a fixed order on each update, and produces
//! `CombatSnapshot`s for presentation.

pub mod ballistics;
pub mod engine;
pub mod grenade;
pub mod score;
pub mod stage;
pub mod systems;
pub mod world_setup;

pub use engine::{CombatEngine, CutsceneGate, NoCutscene};
pub use rampart_core as core;

#[cfg(test)]
mod tests;

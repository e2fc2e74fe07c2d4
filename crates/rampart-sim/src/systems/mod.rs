//! Systems that operate on the combat state each tick.
//!
//! Systems are plain functions over `&mut World` and the engine-owned state
//! they are handed. They do not own state; it lives in components and in
//! the engine.

pub mod boss;
pub mod cleanup;
pub mod collision;
pub mod enemy_ai;
pub mod grenades;
pub mod pickups;
pub mod player;
pub mod projectiles;
pub mod snapshot;
pub mod towers;
pub mod triggers;
pub mod wave_spawner;

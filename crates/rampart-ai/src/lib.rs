//! Unit AI for RAMPART.
//!
//! Implements the boss behaviour state machine, grunt state machines,
//! tower target acquisition and per-kind behaviour profiles.
//! No ECS dependency; everything here operates on plain data.

pub mod boss;
pub mod grunt;
pub mod profiles;
pub mod targeting;

pub use rampart_core as core;

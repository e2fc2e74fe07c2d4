//! Core types and definitions for the RAMPART combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, unit components, the damage contract, input snapshots,
//! render snapshots, events, configuration and tuning constants.
//! It has no dependency on the ECS or any presentation layer.

pub mod assets;
pub mod combat;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod input;
pub mod progress;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;

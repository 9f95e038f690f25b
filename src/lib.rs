//! This is a plugin for Bevy game engine to maintain team-aware analytics over a navigation mesh
//! so that bots can reason about where the enemy team is coming from
//!

pub mod bundle;
pub mod navmesh;
pub mod plugin;

pub mod prelude;

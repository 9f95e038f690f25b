//! A navigation mesh is a set of convex Areas joined by directional connections. Over the top of
//! the static mesh this module maintains a number of per-team derived values that bots use to
//! reason about the shape of a two-team arena.
//!
//! [Valve Developer Wiki - Navigation Meshes](https://developer.valvesoftware.com/wiki/Navigation_Meshes)
//!
//! [Game AI Pro - Tactical position selection](http://www.gameaipro.com/GameAIPro/GameAIPro_Chapter26_Tactical_Position_Selection_An_Architecture_and_Query_Language.pdf)
//!
//! Definitions:
//!
//! * Area - a convex cell of the mesh, the node of the graph. Each Area has up to four lists
//! of connections, one for each [utilities::Ordinal] side, and a connection carries the length of
//! travelling along it
//!
//! ```text
//!  _________________________________
//! |          |          |           |
//! |    0     |    1     |     2     |
//! |        ----->     ----->        |
//! |          |          |     |     |
//! |__________|__________|_____|_____|
//!                             |
//!                          ___v_____
//!                         |         |
//!                         |    3    |
//!                         |_________|
//! ```
//!
//! * Incursion distance - the cumulative travel distance from a team's spawn to an Area. An
//! Area which cannot be reached holds [fields::UNREACHABLE]
//! * Blocking - a per-team flag marking an Area as impassable, derived from doors, triggers and
//! brushes in the world
//! * Invasion area - an Area bordering the region visible from a position through which the
//! enemy will first come into view
//! * Spawn room exit - an Area just outside a team's spawn room. It is treated as open when
//! computing distances because it will open eventually
//! * Recompute pass - decoration, then blocking, then distance fields, then invasion
//! classification, executed as a single unit
//!

pub mod area;
pub mod blocking;
pub mod config;
pub mod danger;
pub mod decorator;
pub mod error;
pub mod fields;
pub mod invasion;
pub mod mesh;
pub mod query;
pub mod utilities;
pub mod visibility;
pub mod world;

/// Small meshes shared by the unit tests
#[cfg(test)]
pub(crate) mod testing;

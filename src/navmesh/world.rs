//! A snapshot of the world entities the pipeline inspects. The game server owns the entities
//! themselves and keeps this component up to date, then raises an
//! [crate::prelude::EventWorldChanged] so the mesh gets recomputed
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Names which teams may pass a trigger or brush
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum TeamFilter {
	/// Anyone may pass
	Everyone,
	/// Only members of the team may pass
	Only(Team),
	/// The entity has no usable filter, treated as passable by nobody
	#[default]
	Undefined,
}

impl TeamFilter {
	/// Teams this filter keeps out
	pub fn get_blocked_teams(&self) -> [bool; TEAM_COUNT] {
		match self {
			TeamFilter::Everyone => [false; TEAM_COUNT],
			TeamFilter::Only(team) => {
				let mut blocked = [false; TEAM_COUNT];
				blocked[team.opposing().index()] = true;
				blocked
			}
			TeamFilter::Undefined => [true; TEAM_COUNT],
		}
	}
}

/// A player spawn location
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnPoint {
	pub position: Vec3,
	pub team: Team,
	/// Disabled spawn points are ignored
	pub enabled: bool,
}

/// The volume of a spawn room
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnRoomVolume {
	pub extent: Extent,
	pub team: Team,
	pub active: bool,
}

/// Whether a door is currently shut
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorState {
	Open,
	Closed,
}

#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Door {
	pub extent: Extent,
	pub state: DoorState,
	/// Set when the door holds a team back during the setup phase of a round and will open
	/// once the round starts
	pub setup_gate: bool,
}

impl Door {
	pub fn is_closed(&self) -> bool {
		self.state == DoorState::Closed
	}
}

/// A volume which opens any door it covers for the teams its filter allows
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorTrigger {
	pub extent: Extent,
	pub filter: TeamFilter,
}

/// A solid brush passable only by the teams its filter allows, such as the visualiser over a
/// spawn room doorway
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockerBrush {
	pub extent: Extent,
	pub filter: TeamFilter,
}

#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPointVolume {
	pub index: u8,
	pub extent: Extent,
	pub captured: bool,
}

#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupKind {
	Health,
	Ammo,
}

#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResourcePickup {
	pub position: Vec3,
	pub kind: PickupKind,
}

/// An automated turret which makes the Areas it can see dangerous for its enemies
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SentryGun {
	pub position: Vec3,
	pub team: Team,
	pub range: f32,
}

/// Every world entity the pipeline cares about
#[cfg_attr(
	feature = "serde",
	derive(serde::Deserialize, serde::Serialize),
	serde(default)
)]
#[derive(Component, Clone, Debug, Default)]
pub struct WorldEntities {
	pub spawn_points: Vec<SpawnPoint>,
	pub spawn_rooms: Vec<SpawnRoomVolume>,
	pub doors: Vec<Door>,
	pub door_triggers: Vec<DoorTrigger>,
	pub blocker_brushes: Vec<BlockerBrush>,
	pub control_points: Vec<ControlPointVolume>,
	pub pickups: Vec<ResourcePickup>,
	/// Where the bomb must be delivered in bomb modes
	pub objective: Option<Extent>,
	pub sentries: Vec<SentryGun>,
}

impl WorldEntities {
	/// Look up the capture state of a control point, [None] if the point doesn't exist
	pub fn is_point_captured(&self, index: u8) -> Option<bool> {
		self.control_points
			.iter()
			.find(|p| p.index == index)
			.map(|p| p.captured)
	}
	/// Triggers whose volume overlaps `extent`
	pub fn get_triggers_covering(&self, extent: &Extent) -> Vec<&DoorTrigger> {
		self.door_triggers
			.iter()
			.filter(|t| t.extent.overlaps(extent))
			.collect()
	}
}

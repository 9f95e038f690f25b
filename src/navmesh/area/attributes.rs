//! Semantic tags of an Area.
//!
//! Some tags are placed by a level designer and travel with the mesh file (door overrides,
//! ambush hints), the rest are derived from the world on every recompute pass by the
//! [crate::navmesh::decorator] and are wiped before each pass so no stale tag survives
//!

use crate::prelude::*;

bitflags::bitflags! {
	/// Open bit-set of semantic flags carried by an Area
	#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
	#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
	pub struct AreaAttributes: u32 {
		/// Inside an active Red spawn room
		const SPAWN_ROOM_RED = 1 << 0;
		/// Inside an active Blue spawn room
		const SPAWN_ROOM_BLUE = 1 << 1;
		/// Just outside a spawn room, leading to the rest of the map
		const SPAWN_ROOM_EXIT = 1 << 2;
		/// Footprint of a control point trigger volume
		const CONTROL_POINT = 1 << 3;
		/// Under a door which opens when the round leaves setup
		const SETUP_GATE = 1 << 4;
		const HAS_HEALTH = 1 << 5;
		const HAS_AMMO = 1 << 6;
		/// The bomb may be dropped here during delivery
		const BOMB_CAN_DROP_HERE = 1 << 7;
		/// Within sight and range of a Blue sentry
		const SENTRY_DANGER_RED = 1 << 8;
		/// Within sight and range of a Red sentry
		const SENTRY_DANGER_BLUE = 1 << 9;
		/// Designer override: a closed door over this Area blocks everyone regardless of triggers
		const DOOR_ALWAYS_BLOCKS = 1 << 16;
		/// Designer override: doors never block this Area
		const DOOR_NEVER_BLOCKS = 1 << 17;
		/// Designer override: nothing ever blocks this Area
		const UNBLOCKABLE = 1 << 18;
		/// Designer hint: good place to lie in wait
		const AMBUSH_CANDIDATE = 1 << 19;
	}
}

impl AreaAttributes {
	/// Tags which may be authored into a mesh file and survive a recompute pass
	pub const DESIGNER: AreaAttributes = AreaAttributes::DOOR_ALWAYS_BLOCKS
		.union(AreaAttributes::DOOR_NEVER_BLOCKS)
		.union(AreaAttributes::UNBLOCKABLE)
		.union(AreaAttributes::AMBUSH_CANDIDATE);
	/// The spawn room tag of `team`
	pub fn spawn_room(team: Team) -> AreaAttributes {
		match team {
			Team::Red => AreaAttributes::SPAWN_ROOM_RED,
			Team::Blue => AreaAttributes::SPAWN_ROOM_BLUE,
		}
	}
	/// The tag marking an Area as dangerous for `team`
	pub fn sentry_danger(team: Team) -> AreaAttributes {
		match team {
			Team::Red => AreaAttributes::SENTRY_DANGER_RED,
			Team::Blue => AreaAttributes::SENTRY_DANGER_BLUE,
		}
	}
}

/// What a [PointGate] does once its control point has been captured
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GateKind {
	/// Blocked for everyone until the point is captured
	BlockedUntilCaptured,
	/// Open until the point is captured, blocked afterwards
	BlockedAfterCaptured,
}

/// Ties the passability of an Area to the capture state of a control point
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PointGate {
	/// Index of the control point
	point: u8,
	/// Behaviour of the gate
	kind: GateKind,
}

impl PointGate {
	/// Create a new instance of [PointGate]
	pub fn new(point: u8, kind: GateKind) -> Self {
		PointGate { point, kind }
	}
	pub fn get_point(&self) -> u8 {
		self.point
	}
	pub fn get_kind(&self) -> GateKind {
		self.kind
	}
	/// Whether the gate is currently closed given the capture state of its point
	pub fn is_closed(&self, captured: bool) -> bool {
		match self.kind {
			GateKind::BlockedUntilCaptured => !captured,
			GateKind::BlockedAfterCaptured => captured,
		}
	}
}

/// Game mode specific data an Area may carry alongside its attributes
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ModePayload {
	/// Attack/defend maps gate sections of the map on point captures
	PointGated(PointGate),
}

//! An Area is a single convex cell of the navigation mesh. Its geometry and connections are fixed
//! when the mesh is loaded, everything else is runtime state owned by the [NavMesh] and rebuilt
//! wholesale on each recompute pass
//!

pub mod attributes;

use crate::prelude::*;
use bevy::prelude::*;

/// Unique ID of an Area, doubles as its index within the [NavMesh] arena
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Reflect)]
pub struct AreaID(u32);

impl AreaID {
	/// Create a new instance of [AreaID]
	pub fn new(id: u32) -> Self {
		AreaID(id)
	}
	/// Get the raw id
	pub fn get(&self) -> u32 {
		self.0
	}
	/// Get the position of the Area in the arena
	pub fn get_index(&self) -> usize {
		self.0 as usize
	}
}

/// A directional link to another Area. The same structure is used for the incoming side of a
/// link, in which case `area` refers to the Area the link starts from
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaConnection {
	/// The Area at the other end of the link
	area: AreaID,
	/// How far an actor travels along the link
	length: f32,
	/// Rise in height when moving along the link in its authored direction, negative for a drop
	height_change: f32,
}

impl AreaConnection {
	/// Create a new instance of [AreaConnection]
	pub fn new(area: AreaID, length: f32, height_change: f32) -> Self {
		AreaConnection {
			area,
			length,
			height_change,
		}
	}
	pub fn get_area(&self) -> AreaID {
		self.area
	}
	pub fn get_length(&self) -> f32 {
		self.length
	}
	pub fn get_height_change(&self) -> f32 {
		self.height_change
	}
}

/// A node of the navigation graph
#[derive(Clone, Debug)]
pub struct Area {
	/// Stable ID
	id: AreaID,
	/// Footprint in world space
	extent: Extent,
	/// Links leaving this Area, indexed by [Ordinal]
	connections: [Vec<AreaConnection>; DIRECTION_COUNT],
	/// Links arriving at this Area, indexed by the side they arrive on
	incoming: [Vec<AreaConnection>; DIRECTION_COUNT],
	/// Tags authored into the mesh file
	designer_attributes: AreaAttributes,
	/// Designer tags plus the tags of the last decoration pass
	attributes: AreaAttributes,
	/// Optional mode specific data
	mode_payload: Option<ModePayload>,
	/// Per-team impassable flag
	blocked: [bool; TEAM_COUNT],
	/// Per-team travel distance from the team spawn, [UNREACHABLE] when there is no route
	incursion_distance: [f32; TEAM_COUNT],
	/// Travel distance to the bomb objective, [UNREACHABLE] when there is no route
	bomb_target_distance: f32,
	/// Cached invasion Areas per occupying team from the last recompute pass
	invasion_areas: [Vec<AreaID>; TEAM_COUNT],
}

impl Area {
	/// Create a new [Area] with no connections and all runtime state reset
	pub fn new(id: AreaID, extent: Extent) -> Self {
		Area {
			id,
			extent,
			connections: Default::default(),
			incoming: Default::default(),
			designer_attributes: AreaAttributes::empty(),
			attributes: AreaAttributes::empty(),
			mode_payload: None,
			blocked: [false; TEAM_COUNT],
			incursion_distance: [UNREACHABLE; TEAM_COUNT],
			bomb_target_distance: UNREACHABLE,
			invasion_areas: Default::default(),
		}
	}
	pub fn get_id(&self) -> AreaID {
		self.id
	}
	pub fn get_extent(&self) -> &Extent {
		&self.extent
	}
	pub fn get_centre(&self) -> Vec3 {
		self.extent.get_centre()
	}
	/// Get the outgoing connections on one side
	pub fn get_connections(&self, ordinal: Ordinal) -> &[AreaConnection] {
		&self.connections[ordinal.index()]
	}
	/// Get the outgoing connections of every side
	pub fn get_all_connections(&self) -> &[Vec<AreaConnection>; DIRECTION_COUNT] {
		&self.connections
	}
	/// Get the incoming connections of every side
	pub fn get_all_incoming(&self) -> &[Vec<AreaConnection>; DIRECTION_COUNT] {
		&self.incoming
	}
	/// Iterate over every outgoing connection regardless of side
	pub fn iter_connections(&self) -> impl Iterator<Item = &AreaConnection> {
		self.connections.iter().flatten()
	}
	/// Iterate over every incoming connection regardless of side
	pub fn iter_incoming(&self) -> impl Iterator<Item = &AreaConnection> {
		self.incoming.iter().flatten()
	}
	/// Get the incoming connections arriving on one side
	pub fn get_incoming(&self, ordinal: Ordinal) -> &[AreaConnection] {
		&self.incoming[ordinal.index()]
	}
	/// Whether there is a direct link from this Area to `other`
	pub fn is_connected_to(&self, other: AreaID) -> bool {
		self.iter_connections().any(|c| c.get_area() == other)
	}
	/// Get the outgoing connection to `other` if there is one
	pub fn get_connection_to(&self, other: AreaID) -> Option<&AreaConnection> {
		self.iter_connections().find(|c| c.get_area() == other)
	}
	/// Record an outgoing link on the `ordinal` side
	pub(crate) fn add_connection(&mut self, ordinal: Ordinal, connection: AreaConnection) {
		self.connections[ordinal.index()].push(connection);
	}
	/// Record a link arriving on the `ordinal` side
	pub(crate) fn add_incoming(&mut self, ordinal: Ordinal, connection: AreaConnection) {
		self.incoming[ordinal.index()].push(connection);
	}
	pub fn get_attributes(&self) -> AreaAttributes {
		self.attributes
	}
	pub fn get_designer_attributes(&self) -> AreaAttributes {
		self.designer_attributes
	}
	/// Test whether all of `attributes` are set
	pub fn has_attributes(&self, attributes: AreaAttributes) -> bool {
		self.attributes.contains(attributes)
	}
	/// Set designer tags, anything that isn't a designer tag is ignored
	pub fn set_designer_attributes(&mut self, attributes: AreaAttributes) {
		self.designer_attributes = attributes & AreaAttributes::DESIGNER;
		self.attributes |= self.designer_attributes;
	}
	/// Add derived tags
	pub(crate) fn set_attributes(&mut self, attributes: AreaAttributes) {
		self.attributes |= attributes;
	}
	/// Remove derived tags, designer tags are kept
	pub(crate) fn clear_attributes(&mut self, attributes: AreaAttributes) {
		self.attributes.remove(attributes & !self.designer_attributes);
	}
	pub fn get_mode_payload(&self) -> Option<&ModePayload> {
		self.mode_payload.as_ref()
	}
	pub fn set_mode_payload(&mut self, payload: Option<ModePayload>) {
		self.mode_payload = payload;
	}
	/// Get the gate tying this Area to a control point, if any
	pub fn get_point_gate(&self) -> Option<PointGate> {
		match self.mode_payload {
			Some(ModePayload::PointGated(gate)) => Some(gate),
			None => None,
		}
	}
	/// Is the Area in a spawn room of `team`
	pub fn is_spawn_room(&self, team: Team) -> bool {
		self.has_attributes(AreaAttributes::spawn_room(team))
	}
	pub fn is_blocked(&self, team: Team) -> bool {
		self.blocked[team.index()]
	}
	/// Mark whether `team` can pass through
	pub(crate) fn set_blocked(&mut self, team: Team, blocked: bool) {
		self.blocked[team.index()] = blocked;
	}
	/// Spawn room exits and setup gates are treated as open for distance purposes as they
	/// will open once the round gets going
	pub fn is_blocked_for_travel(&self, team: Team) -> bool {
		self.is_blocked(team)
			&& !self.attributes.intersects(
				AreaAttributes::SPAWN_ROOM_EXIT.union(AreaAttributes::SETUP_GATE),
			)
	}
	pub fn get_incursion_distance(&self, team: Team) -> f32 {
		self.incursion_distance[team.index()]
	}
	/// Label the incursion distance for `team`
	pub(crate) fn set_incursion_distance(&mut self, team: Team, distance: f32) {
		self.incursion_distance[team.index()] = distance;
	}
	pub fn get_bomb_target_distance(&self) -> f32 {
		self.bomb_target_distance
	}
	/// Label the distance to the bomb objective
	pub(crate) fn set_bomb_target_distance(&mut self, distance: f32) {
		self.bomb_target_distance = distance;
	}
	/// Invasion Areas for an occupying `team` cached by the last recompute pass
	pub fn get_invasion_areas(&self, team: Team) -> &[AreaID] {
		&self.invasion_areas[team.index()]
	}
	/// Cache the invasion Areas of `team`
	pub(crate) fn set_invasion_areas(&mut self, team: Team, areas: Vec<AreaID>) {
		self.invasion_areas[team.index()] = areas;
	}
	/// Wipe every derived value ahead of a recompute pass, only the designer tags remain
	pub(crate) fn reset_runtime_state(&mut self) {
		self.attributes = self.designer_attributes;
		self.blocked = [false; TEAM_COUNT];
		self.incursion_distance = [UNREACHABLE; TEAM_COUNT];
		self.bomb_target_distance = UNREACHABLE;
		for areas in self.invasion_areas.iter_mut() {
			areas.clear();
		}
	}
}

//! Read-only view over a recomputed [NavMesh] for bot AI.
//!
//! Bots never touch the mesh directly. Systems take the mesh entity's components, build a
//! [NavQuery] for the duration of their run and ask it questions. Since the recompute pass
//! holds the mesh mutably for the whole of its run a query can never observe a half updated
//! mesh
//!

use std::collections::BTreeSet;

use crate::prelude::*;
use bevy::prelude::*;

/// Borrowed accessors over a [NavMesh] along with the visibility table and config it was
/// computed with
pub struct NavQuery<'a, V: VisibilityOracle> {
	/// The mesh being asked about
	mesh: &'a NavMesh,
	/// Visibility used by queries that classify on the fly
	visibility: &'a V,
	/// Tunables used by queries that relax on the fly
	config: &'a NavConfig,
}

impl NavMesh {
	/// Create a [NavQuery] over this mesh
	pub fn query<'a, V: VisibilityOracle>(
		&'a self,
		visibility: &'a V,
		config: &'a NavConfig,
	) -> NavQuery<'a, V> {
		NavQuery {
			mesh: self,
			visibility,
			config,
		}
	}
}

impl<'a, V: VisibilityOracle> NavQuery<'a, V> {
	/// Get a reference to the underlying mesh
	pub fn get_mesh(&self) -> &'a NavMesh {
		self.mesh
	}
	/// Travel distance from the spawn of `team` to `area`, `None` when it can't be reached
	pub fn incursion_distance(&self, area: AreaID, team: Team) -> Option<f32> {
		self.mesh
			.get_area(area)
			.map(|a| a.get_incursion_distance(team))
			.filter(|d| *d >= 0.0)
	}
	/// Whether `area` is currently impassable for `team`. Unknown Areas are not blocked
	pub fn is_blocked(&self, area: AreaID, team: Team) -> bool {
		self.mesh.get_area(area).is_some_and(|a| a.is_blocked(team))
	}
	/// Spawn room Areas of `team` in ascending [AreaID] order
	pub fn spawn_room_areas(&self, team: Team) -> &'a [AreaID] {
		self.mesh.get_spawn_room_areas(team)
	}
	/// Spawn room exit Areas of `team` in ascending [AreaID] order
	pub fn spawn_room_exit_areas(&self, team: Team) -> &'a [AreaID] {
		self.mesh.get_spawn_exit_areas(team)
	}
	/// Where the enemy of `team` comes into view when `team` holds `area`, as cached by the last
	/// recompute pass
	pub fn enemy_invasion_areas(&self, area: AreaID, team: Team) -> BTreeSet<AreaID> {
		self.mesh
			.get_area(area)
			.map(|a| a.get_invasion_areas(team).iter().copied().collect())
			.unwrap_or_default()
	}
	/// Places within `radius` of `start` to lie in wait for `team_to_ambush`, see
	/// [NavMesh::collect_ambush_areas]
	pub fn ambush_candidates(
		&self,
		start: AreaID,
		team_to_ambush: Team,
		radius: f32,
		incursion_tolerance: f32,
	) -> BTreeSet<AreaID> {
		self.mesh.collect_ambush_areas(
			start,
			team_to_ambush,
			radius,
			incursion_tolerance,
			self.visibility,
			self.config,
		)
	}
	/// Travel distance from `area` to the bomb objective, `None` when it can't be reached
	pub fn bomb_target_distance(&self, area: AreaID) -> Option<f32> {
		self.mesh
			.get_area(area)
			.map(|a| a.get_bomb_target_distance())
			.filter(|d| *d >= 0.0)
	}
	/// Footprint of control point `index`
	pub fn control_point_areas(&self, index: u8) -> &'a [AreaID] {
		self.mesh.get_control_point_areas(index)
	}
	/// Areas with a health pickup
	pub fn health_areas(&self) -> Vec<AreaID> {
		self.mesh.get_areas_with(AreaAttributes::HAS_HEALTH)
	}
	/// Areas with an ammo pickup
	pub fn ammo_areas(&self) -> Vec<AreaID> {
		self.mesh.get_areas_with(AreaAttributes::HAS_AMMO)
	}
	/// Whether an enemy sentry of `team` covers `area`
	pub fn is_sentry_danger(&self, area: AreaID, team: Team) -> bool {
		self.mesh
			.get_area(area)
			.is_some_and(|a| a.has_attributes(AreaAttributes::sentry_danger(team)))
	}
	/// Whether the bomb may be dropped in `area`
	pub fn is_bomb_drop_allowed(&self, area: AreaID) -> bool {
		self.mesh
			.get_area(area)
			.is_some_and(|a| a.has_attributes(AreaAttributes::BOMB_CAN_DROP_HERE))
	}
	/// The Area an actor at `position` stands on
	pub fn area_at(&self, position: Vec3) -> Option<AreaID> {
		self.mesh
			.get_area_at(position, self.config.get_max_step_height())
	}
	/// The chain of Areas `team` takes out of its spawn to reach `area`
	pub fn route_from_spawn(&self, area: AreaID, team: Team) -> Option<Vec<AreaID>> {
		self.mesh
			.get_incursion_field(team)
			.get_path_to(area, Traversal::Outbound)
	}
	/// Whether `from` could possibly see `to`
	pub fn is_potentially_visible(&self, from: AreaID, to: AreaID) -> bool {
		self.visibility.is_potentially_visible(from, to)
	}
}

//! Incursion distances are the per-team [DistanceField]s rooted at each team's spawn. The same
//! relaxation rooted at the objective instead, walked against the direction of the links,
//! gives the distance a bomb carrier still has to travel.
//!
//! When a team has nowhere to spawn its field stays [UNREACHABLE] and a warning is logged. Modes
//! without an enemy spawn room can opt into a mirrored approximation of the missing field,
//! taken as the opposing field's maximum minus the opposing distance of each Area
//!

use crate::prelude::*;
use bevy::prelude::*;

impl NavMesh {
	/// Label every Area reachable from `spawn_areas` for `team` with its incursion distance and
	/// store the resulting field. Blocking must already be resolved
	pub fn compute_incursion_distances(
		&mut self,
		team: Team,
		spawn_areas: &[AreaID],
		config: &NavConfig,
	) -> &DistanceField {
		let rules = TraversalRules::new(team, Traversal::Outbound, config);
		let mut field = DistanceField::new(self.get_area_count());
		field.calculate_field(spawn_areas, self, &rules);
		self.apply_incursion_field(team, field);
		self.get_incursion_field(team)
	}
	/// Copy the labels of `field` into the Areas and keep the field for later queries
	fn apply_incursion_field(&mut self, team: Team, field: DistanceField) {
		for (area, distance) in self.get_areas_mut().iter_mut().zip(field.get().iter()) {
			area.set_incursion_distance(team, *distance);
		}
		self.set_incursion_field(team, field);
	}
	/// Compute the incursion field of both teams from their spawn points. The two passes are
	/// independent of each other
	pub fn compute_team_fields(&mut self, config: &NavConfig) {
		let mut missing = Vec::new();
		for team in Team::ALL {
			let mut seeds = self.get_spawn_point_areas(team).to_vec();
			if seeds.is_empty() {
				seeds = self.get_spawn_room_areas(team).to_vec();
			}
			if seeds.is_empty() {
				warn!("No spawn area for team {:?}, its incursion field is unreachable", team);
				missing.push(team);
				continue;
			}
			self.compute_incursion_distances(team, &seeds, config);
		}
		if !config.get_mirror_missing_fields() {
			return;
		}
		for team in missing {
			let source = team.opposing();
			let Some(max) = self.get_incursion_field(source).get_max_distance() else {
				continue;
			};
			warn!(
				"Mirroring the incursion field of {:?} to approximate {:?}",
				source, team
			);
			let mut mirrored = DistanceField::new(self.get_area_count());
			for area in self.get_areas().iter() {
				let distance = area.get_incursion_distance(source);
				if distance >= 0.0 {
					mirrored.set_area_value(max - distance, area.get_id());
				}
			}
			self.apply_incursion_field(team, mirrored);
		}
	}
	/// Compute the travel distance of the bomb carrier to the objective. Only runs when a
	/// carrier is configured
	pub fn compute_bomb_target_distances(&mut self, world: &WorldEntities, config: &NavConfig) {
		let Some(carrier) = config.get_bomb_carrier() else {
			return;
		};
		let targets = match world.objective.as_ref() {
			Some(objective) => self.get_overlapping_areas(objective),
			None => Vec::new(),
		};
		if targets.is_empty() {
			warn!("No objective area for the bomb carrier {:?}, bomb distances are unreachable", carrier);
			return;
		}
		let rules = TraversalRules::new(carrier, Traversal::Inbound, config);
		let mut field = DistanceField::new(self.get_area_count());
		field.calculate_field(&targets, self, &rules);
		for (area, distance) in self.get_areas_mut().iter_mut().zip(field.get().iter()) {
			area.set_bomb_target_distance(*distance);
		}
		self.set_bomb_target_field(field);
	}
}

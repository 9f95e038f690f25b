//! Invasion Areas answer "where will the enemy come from" for a team holding a position.
//!
//! Everything potentially visible from the position forms the visible region. Walking one hop
//! out of the region along both outgoing and incoming links finds its border, a border Area is
//! where the enemy enters view when the enemy reaches it before the visible Area next to it:
//!
//! ```text
//!    enemy spawn
//!         |
//!   [ 120 ] <- invasion Area, outside the region and closer to the enemy spawn
//!   [ 180 ] <- visible
//!   [ 240 ] <- position being held
//!   [ 300 ] <- visible
//!   [ 360 ] <- not an invasion Area, the enemy gets here after passing the visible region
//! ```
//!
//! Incoming links count the same as outgoing ones since the enemy may drop in through a link
//! which has no way back. Border Areas the enemy reaches much later than the held position
//! itself, by more than a tolerance, are far behind the front and ignored.
//!
//! Ambush candidates build on top of this, Areas near a starting point which have an
//! invasion Area to watch make good places to lie in wait
//!

use std::collections::BTreeSet;

use crate::prelude::*;

impl NavMesh {
	/// Find the invasion Areas of the enemy of `team` when `team` holds `area`. An unknown
	/// `area` has none
	pub fn collect_invasion_areas(
		&self,
		area: AreaID,
		team: Team,
		visibility: &impl VisibilityOracle,
		tolerance: f32,
	) -> BTreeSet<AreaID> {
		let mut invasion = BTreeSet::new();
		let enemy = team.opposing();
		let Some(held) = self.get_area(area) else {
			return invasion;
		};
		let held_distance = held.get_incursion_distance(enemy);
		let visible: BTreeSet<AreaID> = visibility
			.get_potentially_visible(area)
			.into_iter()
			.collect();
		for id in visible.iter() {
			let Some(visible_area) = self.get_area(*id) else {
				continue;
			};
			let visible_distance = visible_area.get_incursion_distance(enemy);
			if visible_distance < 0.0 {
				continue;
			}
			let neighbours = visible_area
				.iter_connections()
				.chain(visible_area.iter_incoming())
				.map(|c| c.get_area());
			for neighbour in neighbours {
				if visible.contains(&neighbour) || invasion.contains(&neighbour) {
					continue;
				}
				let Some(border) = self.get_area(neighbour) else {
					continue;
				};
				let border_distance = border.get_incursion_distance(enemy);
				if border_distance < 0.0 || border_distance >= visible_distance {
					continue;
				}
				if held_distance >= 0.0 && border_distance > held_distance + tolerance {
					continue;
				}
				invasion.insert(neighbour);
			}
		}
		invasion
	}
	/// Cache the invasion Areas of every Area for both teams
	pub fn compute_invasion_areas(&mut self, visibility: &impl VisibilityOracle, tolerance: f32) {
		let mut cached = Vec::with_capacity(self.get_area_count());
		for area in self.get_areas().iter() {
			let per_team = Team::ALL.map(|team| {
				self.collect_invasion_areas(area.get_id(), team, visibility, tolerance)
					.into_iter()
					.collect::<Vec<AreaID>>()
			});
			cached.push(per_team);
		}
		for (area, per_team) in self.get_areas_mut().iter_mut().zip(cached) {
			for (team, invasion) in Team::ALL.into_iter().zip(per_team) {
				area.set_invasion_areas(team, invasion);
			}
		}
	}
	/// Find places near `start` where the enemy of `team_to_ambush` could lie in wait.
	///
	/// Areas within `radius` travel of `start` for the ambushing team are considered. An Area
	/// qualifies when `team_to_ambush` can reach it, it isn't a spawn room of either team, the
	/// ambushers can stand in it and it has at least one invasion Area to watch (computed with
	/// `incursion_tolerance`). Areas with the designer's ambush hint skip the invasion check
	pub fn collect_ambush_areas(
		&self,
		start: AreaID,
		team_to_ambush: Team,
		radius: f32,
		incursion_tolerance: f32,
		visibility: &impl VisibilityOracle,
		config: &NavConfig,
	) -> BTreeSet<AreaID> {
		let ambusher = team_to_ambush.opposing();
		let rules =
			TraversalRules::new(ambusher, Traversal::Outbound, config).with_range(radius.max(0.0));
		let mut field = DistanceField::new(self.get_area_count());
		field.calculate_field(&[start], self, &rules);
		let mut candidates = BTreeSet::new();
		for id in field.get_reachable_areas() {
			let Some(area) = self.get_area(id) else {
				continue;
			};
			if area.get_incursion_distance(team_to_ambush) < 0.0
				|| area.is_spawn_room(Team::Red)
				|| area.is_spawn_room(Team::Blue)
				|| area.is_blocked(ambusher)
			{
				continue;
			}
			if area.has_attributes(AreaAttributes::AMBUSH_CANDIDATE)
				|| !self
					.collect_invasion_areas(id, ambusher, visibility, incursion_tolerance)
					.is_empty()
			{
				candidates.insert(id);
			}
		}
		candidates
	}
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	use crate::navmesh::testing::*;
	use std::collections::BTreeSet;

	fn id(i: u32) -> AreaID {
		AreaID::new(i)
	}
	fn ids(raw: &[u32]) -> BTreeSet<AreaID> {
		raw.iter().map(|i| AreaID::new(*i)).collect()
	}
	/// Seven Area corridor with blue spawning at the far end, `0` being furthest from blue
	fn corridor_with_blue_field() -> NavMesh {
		let mut mesh = corridor_mesh(&[100.0; 6]);
		mesh.compute_incursion_distances(Team::Blue, &[id(6)], &NavConfig::default());
		mesh
	}

	#[test]
	fn border_towards_enemy() {
		let mesh = corridor_with_blue_field();
		let pvs = PotentiallyVisibleSet::default().with_group(&[id(2), id(3), id(4)]);
		let invasion = mesh.collect_invasion_areas(id(3), Team::Red, &pvs, 1000.0);
		// 5 borders the region on the blue side, 1 is behind red
		assert_eq!(ids(&[5]), invasion);
	}
	#[test]
	fn zero_tolerance_keeps_nearer_borders() {
		let mesh = corridor_with_blue_field();
		let pvs = PotentiallyVisibleSet::default().with_group(&[id(2), id(3), id(4)]);
		// 5 is 100 closer to blue than 3 so any tolerance keeps it
		assert_eq!(ids(&[5]), mesh.collect_invasion_areas(id(3), Team::Red, &pvs, 0.0));
	}
	#[test]
	fn tolerance_excludes_far_borders() {
		let mesh = corridor_with_blue_field();
		// red holds 5, blue reaches it after 100, and can see far back down the corridor to 1
		let pvs = PotentiallyVisibleSet::default().with_group(&[id(5), id(1)]);
		// 2 borders 1 on the blue side but blue only gets there after 400
		assert_eq!(ids(&[2, 6]), mesh.collect_invasion_areas(id(5), Team::Red, &pvs, 1000.0));
		assert_eq!(ids(&[6]), mesh.collect_invasion_areas(id(5), Team::Red, &pvs, 250.0));
		// the band is inclusive
		assert_eq!(ids(&[2, 6]), mesh.collect_invasion_areas(id(5), Team::Red, &pvs, 300.0));
	}
	#[test]
	fn unreachable_borders_are_ignored() {
		let mut mesh = corridor_with_blue_field();
		mesh.get_area_mut(id(5)).unwrap().set_incursion_distance(Team::Blue, UNREACHABLE);
		let pvs = PotentiallyVisibleSet::default().with_group(&[id(2), id(3), id(4)]);
		assert!(mesh.collect_invasion_areas(id(3), Team::Red, &pvs, 1000.0).is_empty());
	}
	#[test]
	fn one_way_link_into_region() {
		// blue arrives at 0 via a long route, 0 drops one way into 1 which can't go back
		let mut file = corridor_file(&[100.0]);
		let (lo, hi) = corridor_extent(2);
		file.add_area(AreaRecord::new(2, lo, hi));
		file.areas[1].connections = Default::default();
		file.connect_two_way(1, 2, Some(100.0));
		let mut mesh = NavMesh::from_file_data(file).unwrap();
		assert!(!mesh.get_area(id(1)).unwrap().is_connected_to(id(0)));
		for (area, distance) in [(0, 50.0), (1, 150.0), (2, 250.0)] {
			mesh.get_area_mut(id(area)).unwrap().set_incursion_distance(Team::Blue, distance);
		}
		let pvs = PotentiallyVisibleSet::default().with_group(&[id(1), id(2)]);
		assert_eq!(ids(&[0]), mesh.collect_invasion_areas(id(2), Team::Red, &pvs, 1000.0));
		// and the link still can't be walked backwards
		let mut field = DistanceField::new(mesh.get_area_count());
		field.calculate_field(&[id(1)], &mesh, &TraversalRules::new(Team::Red, Traversal::Outbound, &NavConfig::default()));
		assert!(!field.is_reachable(id(0)));
	}
	#[test]
	fn cached_per_team() {
		let mut mesh = corridor_mesh(&[100.0; 6]);
		mesh.compute_incursion_distances(Team::Blue, &[id(6)], &NavConfig::default());
		mesh.compute_incursion_distances(Team::Red, &[id(0)], &NavConfig::default());
		let pvs = PotentiallyVisibleSet::default().with_group(&[id(2), id(3), id(4)]);
		mesh.compute_invasion_areas(&pvs, 1000.0);
		let held = mesh.get_area(id(3)).unwrap();
		assert_eq!(&[id(5)], held.get_invasion_areas(Team::Red));
		assert_eq!(&[id(1)], held.get_invasion_areas(Team::Blue));
	}
	#[test]
	fn ambush_near_start() {
		let mut mesh = corridor_mesh(&[100.0; 6]);
		mesh.compute_incursion_distances(Team::Blue, &[id(6)], &NavConfig::default());
		let mut pvs = PotentiallyVisibleSet::default();
		for i in 0..6 {
			pvs.add_mutual(id(i), id(i + 1));
		}
		// red lies in wait for blue within 150 of area 2
		let candidates = mesh.collect_ambush_areas(id(2), Team::Blue, 150.0, 1000.0, &pvs, &NavConfig::default());
		assert_eq!(ids(&[1, 2, 3]), candidates);
		// beyond the radius nothing is considered
		let candidates = mesh.collect_ambush_areas(id(2), Team::Blue, 0.0, 1000.0, &pvs, &NavConfig::default());
		assert_eq!(ids(&[2]), candidates);
	}
	#[test]
	fn ambush_skips_spawn_rooms_and_honours_hints() {
		let mut mesh = corridor_mesh(&[100.0; 6]);
		mesh.compute_incursion_distances(Team::Blue, &[id(6)], &NavConfig::default());
		mesh.get_area_mut(id(1)).unwrap().set_attributes(AreaAttributes::SPAWN_ROOM_RED);
		// everything sees everything, there is no border to watch
		let all: Vec<AreaID> = (0..7).map(id).collect();
		let pvs = PotentiallyVisibleSet::default().with_group(&all);
		let config = NavConfig::default();
		assert!(mesh.collect_ambush_areas(id(2), Team::Blue, 150.0, 1000.0, &pvs, &config).is_empty());
		mesh.get_area_mut(id(3)).unwrap().set_designer_attributes(AreaAttributes::AMBUSH_CANDIDATE);
		assert_eq!(ids(&[3]), mesh.collect_ambush_areas(id(2), Team::Blue, 150.0, 1000.0, &pvs, &config));
	}
}

//! The decoration pass tags Areas with the roles world entities give them. It is a full rebuild,
//! every derived tag is cleared first and set again from the current [WorldEntities], so running
//! it twice gives the same result.
//!
//! Decoration has to happen before blocking and distance fields as spawn room and exit tags
//! seed the incursion fields and soften blocking during travel
//!

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::prelude::*;
use bevy::prelude::*;

/// Every tag the decoration pass owns
const DECORATION: AreaAttributes = AreaAttributes::SPAWN_ROOM_RED
	.union(AreaAttributes::SPAWN_ROOM_BLUE)
	.union(AreaAttributes::SPAWN_ROOM_EXIT)
	.union(AreaAttributes::CONTROL_POINT)
	.union(AreaAttributes::SETUP_GATE)
	.union(AreaAttributes::HAS_HEALTH)
	.union(AreaAttributes::HAS_AMMO)
	.union(AreaAttributes::BOMB_CAN_DROP_HERE);

impl NavMesh {
	/// Run every decoration step against `world`
	pub fn decorate(&mut self, world: &WorldEntities, config: &NavConfig) {
		for area in self.get_areas_mut().iter_mut() {
			area.clear_attributes(DECORATION);
		}
		let max_step_height = config.get_max_step_height();
		self.decorate_spawn_rooms(world, max_step_height);
		self.decorate_control_points(world);
		self.decorate_pickups(world, max_step_height);
		self.decorate_setup_gates(world);
		if let Some(carrier) = config.get_bomb_carrier() {
			self.decorate_bomb_drop(carrier);
		}
	}
	/// Tag the Areas of each active spawn room which holds an enabled spawn point of its team,
	/// then the Areas under those spawn points and finally the exits leading out of the rooms
	fn decorate_spawn_rooms(&mut self, world: &WorldEntities, max_step_height: f32) {
		for team in Team::ALL {
			let mut rooms = BTreeSet::new();
			for room in world.spawn_rooms.iter() {
				if !room.active || room.team != team {
					continue;
				}
				let occupied = world
					.spawn_points
					.iter()
					.any(|p| p.enabled && p.team == team && room.extent.contains(p.position));
				if occupied {
					rooms.extend(self.get_overlapping_areas(&room.extent));
				}
			}
			for id in rooms.iter() {
				if let Some(area) = self.get_area_mut(*id) {
					area.set_attributes(AreaAttributes::spawn_room(team));
				}
			}
			let mut spawn_points = BTreeSet::new();
			for point in world.spawn_points.iter() {
				if !point.enabled || point.team != team {
					continue;
				}
				if let Some(id) = self.get_area_at(point.position, max_step_height) {
					if rooms.contains(&id) {
						spawn_points.insert(id);
					}
				}
			}
			let mut exits = BTreeSet::new();
			for id in rooms.iter() {
				let Some(area) = self.get_area(*id) else {
					continue;
				};
				for connection in area.iter_connections() {
					if !rooms.contains(&connection.get_area()) {
						exits.insert(connection.get_area());
					}
				}
			}
			for id in exits.iter() {
				if let Some(area) = self.get_area_mut(*id) {
					area.set_attributes(AreaAttributes::SPAWN_ROOM_EXIT);
				}
			}
			if rooms.is_empty() {
				debug!("Team {:?} has no active spawn room", team);
			}
			self.set_spawn_room_areas(team, rooms);
			self.set_spawn_point_areas(team, spawn_points);
			self.set_spawn_exit_areas(team, exits);
		}
	}
	/// Tag the footprint of each control point volume
	fn decorate_control_points(&mut self, world: &WorldEntities) {
		let mut footprints: BTreeMap<u8, BTreeSet<AreaID>> = BTreeMap::new();
		for point in world.control_points.iter() {
			footprints
				.entry(point.index)
				.or_default()
				.extend(self.get_overlapping_areas(&point.extent));
		}
		for (index, areas) in footprints {
			for id in areas.iter() {
				if let Some(area) = self.get_area_mut(*id) {
					area.set_attributes(AreaAttributes::CONTROL_POINT);
				}
			}
			self.set_control_point_areas(index, areas);
		}
	}
	/// Tag the Area under each resource pickup
	fn decorate_pickups(&mut self, world: &WorldEntities, max_step_height: f32) {
		for pickup in world.pickups.iter() {
			let Some(id) = self.get_area_at(pickup.position, max_step_height) else {
				debug!("Pickup at {:?} isn't on the mesh", pickup.position);
				continue;
			};
			let tag = match pickup.kind {
				PickupKind::Health => AreaAttributes::HAS_HEALTH,
				PickupKind::Ammo => AreaAttributes::HAS_AMMO,
			};
			if let Some(area) = self.get_area_mut(id) {
				area.set_attributes(tag);
			}
		}
	}
	/// Tag the Areas under doors which hold a team back during setup
	fn decorate_setup_gates(&mut self, world: &WorldEntities) {
		for door in world.doors.iter().filter(|d| d.setup_gate) {
			for id in self.get_overlapping_areas(&door.extent) {
				if let Some(area) = self.get_area_mut(id) {
					area.set_attributes(AreaAttributes::SETUP_GATE);
				}
			}
		}
	}
	/// Walk out from the spawn rooms of the bomb `carrier` tagging every Area it can legally
	/// drop the bomb in. The walk never enters a rival spawn room
	fn decorate_bomb_drop(&mut self, carrier: Team) {
		let rival = carrier.opposing();
		let mut visited = vec![false; self.get_area_count()];
		let mut queue: VecDeque<AreaID> = VecDeque::new();
		for id in self.get_spawn_room_areas(carrier).iter() {
			visited[id.get_index()] = true;
			queue.push_back(*id);
		}
		while let Some(current) = queue.pop_front() {
			let Some(area) = self.get_area(current) else {
				continue;
			};
			for connection in area.iter_connections() {
				let next = connection.get_area();
				if visited[next.get_index()] {
					continue;
				}
				visited[next.get_index()] = true;
				if self
					.get_area(next)
					.is_some_and(|a| a.is_spawn_room(rival))
				{
					continue;
				}
				queue.push_back(next);
			}
		}
		let mut legal = 0;
		for area in self.get_areas_mut().iter_mut() {
			if visited[area.get_id().get_index()] && !area.is_spawn_room(rival) {
				area.set_attributes(AreaAttributes::BOMB_CAN_DROP_HERE);
				legal += 1;
			}
		}
		debug!("Bomb can be dropped in {} areas", legal);
	}
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	use crate::navmesh::testing::*;

	fn id(i: u32) -> AreaID {
		AreaID::new(i)
	}
	/// Five Area corridor with red spawning at one end and blue at the other
	fn two_bases() -> (NavMesh, WorldEntities) {
		let mesh = corridor_mesh(&[100.0; 4]);
		let mut world = WorldEntities::default();
		spawn_in_corridor(&mut world, Team::Red, 0);
		spawn_in_corridor(&mut world, Team::Blue, 4);
		(mesh, world)
	}

	#[test]
	fn spawn_rooms_and_exits() {
		let (mut mesh, world) = two_bases();
		mesh.decorate(&world, &NavConfig::default());
		assert_eq!(&[id(0)], mesh.get_spawn_room_areas(Team::Red));
		assert_eq!(&[id(0)], mesh.get_spawn_point_areas(Team::Red));
		assert_eq!(&[id(1)], mesh.get_spawn_exit_areas(Team::Red));
		assert_eq!(&[id(4)], mesh.get_spawn_room_areas(Team::Blue));
		assert_eq!(&[id(3)], mesh.get_spawn_exit_areas(Team::Blue));
		assert!(mesh.get_area(id(0)).unwrap().is_spawn_room(Team::Red));
		assert!(mesh.get_area(id(1)).unwrap().has_attributes(AreaAttributes::SPAWN_ROOM_EXIT));
		assert!(!mesh.get_area(id(2)).unwrap().has_attributes(AreaAttributes::SPAWN_ROOM_EXIT));
	}
	#[test]
	fn flush_spawn_room() {
		let mut mesh = corridor_mesh(&[100.0; 4]);
		let mut world = WorldEntities::default();
		let (lo, hi) = corridor_extent(0);
		world.spawn_rooms.push(SpawnRoomVolume { extent: Extent::new(lo, hi), team: Team::Red, active: true });
		world.spawn_points.push(SpawnPoint { position: (lo + hi) * 0.5, team: Team::Red, enabled: true });
		mesh.decorate(&world, &NavConfig::default());
		assert_eq!(&[id(0)], mesh.get_spawn_room_areas(Team::Red));
		assert_eq!(&[id(1)], mesh.get_spawn_exit_areas(Team::Red));
		assert!(!mesh.get_area(id(1)).unwrap().is_spawn_room(Team::Red));
	}
	#[test]
	fn inactive_or_empty_rooms_are_ignored() {
		let (mut mesh, mut world) = two_bases();
		world.spawn_rooms[0].active = false;
		world.spawn_points[1].enabled = false;
		mesh.decorate(&world, &NavConfig::default());
		assert!(mesh.get_spawn_room_areas(Team::Red).is_empty());
		assert!(mesh.get_spawn_room_areas(Team::Blue).is_empty());
		assert!(mesh.get_spawn_exit_areas(Team::Blue).is_empty());
	}
	#[test]
	fn redecorating_clears_old_tags() {
		let (mut mesh, mut world) = two_bases();
		world.pickups.push(ResourcePickup { position: Vec3::new(250.0, 50.0, 0.0), kind: PickupKind::Health });
		mesh.decorate(&world, &NavConfig::default());
		assert!(mesh.get_area(id(2)).unwrap().has_attributes(AreaAttributes::HAS_HEALTH));
		world.pickups.clear();
		world.spawn_rooms[0].active = false;
		mesh.decorate(&world, &NavConfig::default());
		assert!(!mesh.get_area(id(2)).unwrap().has_attributes(AreaAttributes::HAS_HEALTH));
		assert!(!mesh.get_area(id(0)).unwrap().is_spawn_room(Team::Red));
		assert!(!mesh.get_area(id(1)).unwrap().has_attributes(AreaAttributes::SPAWN_ROOM_EXIT));
	}
	#[test]
	fn decoration_is_idempotent() {
		let (mut mesh, world) = two_bases();
		mesh.decorate(&world, &NavConfig::default());
		let first: Vec<AreaAttributes> = mesh.get_areas().iter().map(|a| a.get_attributes()).collect();
		mesh.decorate(&world, &NavConfig::default());
		let second: Vec<AreaAttributes> = mesh.get_areas().iter().map(|a| a.get_attributes()).collect();
		assert_eq!(first, second);
	}
	#[test]
	fn control_point_footprint() {
		let (mut mesh, mut world) = two_bases();
		let (lo, hi) = corridor_extent(2);
		world.control_points.push(ControlPointVolume { index: 1, extent: Extent::new(lo + 5.0, hi - 5.0), captured: false });
		mesh.decorate(&world, &NavConfig::default());
		assert_eq!(&[id(2)], mesh.get_control_point_areas(1));
		assert!(mesh.get_control_point_areas(0).is_empty());
		assert!(mesh.get_area(id(2)).unwrap().has_attributes(AreaAttributes::CONTROL_POINT));
	}
	#[test]
	fn setup_gate_tagging() {
		let (mut mesh, mut world) = two_bases();
		let mut door = door_in_corridor(3, DoorState::Closed);
		door.setup_gate = true;
		world.doors.push(door);
		world.doors.push(door_in_corridor(2, DoorState::Closed));
		mesh.decorate(&world, &NavConfig::default());
		assert_eq!(vec![id(3)], mesh.get_areas_with(AreaAttributes::SETUP_GATE));
	}
	#[test]
	fn bomb_drop_stops_at_rival_spawn() {
		let (mut mesh, world) = two_bases();
		let config = NavConfig::default().with_bomb_carrier(Some(Team::Blue));
		mesh.decorate(&world, &config);
		assert_eq!(
			vec![id(1), id(2), id(3), id(4)],
			mesh.get_areas_with(AreaAttributes::BOMB_CAN_DROP_HERE)
		);
	}
	#[test]
	fn no_bomb_drop_without_carrier() {
		let (mut mesh, world) = two_bases();
		mesh.decorate(&world, &NavConfig::default());
		assert!(mesh.get_areas_with(AreaAttributes::BOMB_CAN_DROP_HERE).is_empty());
	}
}

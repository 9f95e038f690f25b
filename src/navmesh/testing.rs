//! Small meshes shared by the unit tests
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Width of each Area in the test meshes
pub(crate) const CELL: f32 = 100.0;

/// Footprint of the `index`th Area of a corridor laid out along `+x`
pub(crate) fn corridor_extent(index: usize) -> (Vec3, Vec3) {
	let x = index as f32 * CELL;
	(Vec3::new(x, 0.0, 0.0), Vec3::new(x + CELL, CELL, 0.0))
}

/// A corridor of `lengths.len() + 1` Areas joined by two-way links of the given lengths
pub(crate) fn corridor_file(lengths: &[f32]) -> NavMeshFile {
	let mut file = NavMeshFile::default();
	for i in 0..=lengths.len() {
		let (lo, hi) = corridor_extent(i);
		file.add_area(AreaRecord::new(i as u32, lo, hi));
	}
	for (i, length) in lengths.iter().enumerate() {
		file.connect_two_way(i as u32, i as u32 + 1, Some(*length));
	}
	file
}

/// See [corridor_file]
pub(crate) fn corridor_mesh(lengths: &[f32]) -> NavMesh {
	NavMesh::from_file_data(corridor_file(lengths)).unwrap()
}

/// A team spawn with a spawn room covering Area `index` of a corridor
pub(crate) fn spawn_in_corridor(world: &mut WorldEntities, team: Team, index: usize) {
	let (lo, hi) = corridor_extent(index);
	let centre = (lo + hi) * 0.5;
	world.spawn_points.push(SpawnPoint {
		position: centre,
		team,
		enabled: true,
	});
	world.spawn_rooms.push(SpawnRoomVolume {
		extent: Extent::new(lo + Vec3::new(10.0, 10.0, 0.0), hi - Vec3::new(10.0, 10.0, 0.0)),
		team,
		active: true,
	});
}

/// A door volume sitting inside Area `index` of a corridor
pub(crate) fn door_in_corridor(index: usize, state: DoorState) -> Door {
	let (lo, hi) = corridor_extent(index);
	Door {
		extent: Extent::new(lo + Vec3::new(40.0, 0.0, 0.0), hi - Vec3::new(40.0, 0.0, -50.0)),
		state,
		setup_gate: false,
	}
}

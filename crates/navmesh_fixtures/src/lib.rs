//! Canned navigation meshes and world snapshots for the integration tests and benches
//!

use bevy::prelude::*;
use bevy_incursion_navmesh_plugin::prelude::*;

/// Width and depth of every fixture Area
pub const CELL: f32 = 100.0;

/// Footprint of the Area at `column`, `row` of a grid laid out across `x` and `y`
pub fn cell_extent(column: u32, row: u32) -> Extent {
	let lo = Vec3::new(column as f32 * CELL, row as f32 * CELL, 0.0);
	Extent::new(lo, lo + Vec3::new(CELL, CELL, 0.0))
}

/// A corridor of `lengths.len() + 1` Areas along `+x` joined by two-way links of the given
/// lengths
pub fn corridor_file(lengths: &[f32]) -> NavMeshFile {
	let mut file = NavMeshFile::default();
	for i in 0..=lengths.len() as u32 {
		let extent = cell_extent(i, 0);
		file.add_area(AreaRecord::new(i, extent.get_lo(), extent.get_hi()));
	}
	for (i, length) in lengths.iter().enumerate() {
		file.connect_two_way(i as u32, i as u32 + 1, Some(*length));
	}
	file
}

/// See [corridor_file]
pub fn corridor(lengths: &[f32]) -> NavMesh {
	NavMesh::from_file_data(corridor_file(lengths)).expect("Corridor fixture is a valid mesh")
}

/// ID of the Area at `column`, `row` of a grid `columns` wide
pub fn grid_id(columns: u32, column: u32, row: u32) -> AreaID {
	AreaID::new(row * columns + column)
}

/// A `columns` by `rows` grid where every Area is linked both ways to its orthogonal
/// neighbours. `length_of` is asked for the length of each pair of links
pub fn grid_file(columns: u32, rows: u32, mut length_of: impl FnMut(AreaID, AreaID) -> f32) -> NavMeshFile {
	let mut file = NavMeshFile::default();
	for row in 0..rows {
		for column in 0..columns {
			let extent = cell_extent(column, row);
			file.add_area(AreaRecord::new(
				grid_id(columns, column, row).get(),
				extent.get_lo(),
				extent.get_hi(),
			));
		}
	}
	for row in 0..rows {
		for column in 0..columns {
			let a = grid_id(columns, column, row);
			if column + 1 < columns {
				let b = grid_id(columns, column + 1, row);
				file.connect_two_way(a.get(), b.get(), Some(length_of(a, b)));
			}
			if row + 1 < rows {
				let b = grid_id(columns, column, row + 1);
				file.connect_two_way(a.get(), b.get(), Some(length_of(a, b)));
			}
		}
	}
	file
}

/// See [grid_file]
pub fn grid(columns: u32, rows: u32, length_of: impl FnMut(AreaID, AreaID) -> f32) -> NavMesh {
	NavMesh::from_file_data(grid_file(columns, rows, length_of)).expect("Grid fixture is a valid mesh")
}

/// Add an active spawn room of `team` just inside `extent` with an enabled spawn point in the
/// middle of it
pub fn add_spawn(world: &mut WorldEntities, team: Team, extent: &Extent) {
	let inset = Vec3::new(10.0, 10.0, 0.0);
	world.spawn_rooms.push(SpawnRoomVolume {
		extent: Extent::new(extent.get_lo() + inset, extent.get_hi() - inset),
		team,
		active: true,
	});
	world.spawn_points.push(SpawnPoint {
		position: extent.get_centre(),
		team,
		enabled: true,
	});
}

/// A door standing in the middle of `extent` which touches no neighbouring Area
pub fn door_within(extent: &Extent, state: DoorState) -> Door {
	let inset = Vec3::new(40.0, 40.0, 0.0);
	Door {
		extent: Extent::new(
			extent.get_lo() + inset,
			extent.get_hi() - inset + Vec3::Z * 50.0,
		),
		state,
		setup_gate: false,
	}
}

/// Each Area sees every Area whose centre is within `radius` of its own
pub fn visibility_within(mesh: &NavMesh, radius: f32) -> PotentiallyVisibleSet {
	let mut pvs = PotentiallyVisibleSet::default();
	for a in mesh.get_areas().iter() {
		for b in mesh.get_areas().iter() {
			if a.get_id() != b.get_id() && a.get_centre().distance(b.get_centre()) <= radius {
				pvs.add_visible(a.get_id(), b.get_id());
			}
		}
	}
	pvs
}

/// A `columns` by `rows` grid of uniform links with red spawning in the middle of the west
/// edge and blue in the middle of the east edge. Areas see each other up to two and a half
/// cells away
pub fn two_base_arena(columns: u32, rows: u32) -> (NavMesh, WorldEntities, PotentiallyVisibleSet) {
	let mesh = grid(columns, rows, |_, _| CELL);
	let mut world = WorldEntities::default();
	add_spawn(&mut world, Team::Red, &cell_extent(0, rows / 2));
	add_spawn(&mut world, Team::Blue, &cell_extent(columns - 1, rows / 2));
	let pvs = visibility_within(&mesh, CELL * 2.5);
	(mesh, world, pvs)
}

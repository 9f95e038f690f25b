//! Measure a full recompute pass: decoration, blocking, both team fields, bomb distances,
//! invasion areas and danger zones
//!
//! Mesh is 60 Areas by 40 Areas with doors scattered down the middle
//!

use bevy_incursion_navmesh_plugin::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use navmesh_fixtures::*;

/// Create the mesh and a busy world snapshot before benchmarking
fn prepare_world() -> (NavMesh, WorldEntities, PotentiallyVisibleSet) {
	let (mesh, mut world, pvs) = two_base_arena(60, 40);
	// every fifth row of the centre column is a closed door only blue can open
	for row in (0..40).step_by(5) {
		let extent = cell_extent(30, row);
		world.doors.push(door_within(&extent, DoorState::Closed));
		world.door_triggers.push(DoorTrigger {
			extent,
			filter: TeamFilter::Only(Team::Blue),
		});
	}
	world.control_points.push(ControlPointVolume {
		index: 0,
		extent: cell_extent(30, 20),
		captured: false,
	});
	world.sentries.push(SentryGun {
		position: cell_extent(10, 20).get_centre(),
		team: Team::Red,
		range: CELL * 4.0,
	});
	(mesh, world, pvs)
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("algorithm_use");
	group.significance_level(0.05).sample_size(20);
	let (mesh, world, pvs) = prepare_world();
	let config = NavConfig::default().with_bomb_carrier(Some(Team::Blue));
	group.bench_function("recompute_pipeline", |b| {
		b.iter(|| {
			let mut mesh = black_box(mesh.clone());
			mesh.recompute(black_box(&world), &pvs, &config);
		})
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

//! Measure labelling the incursion distances of one team across a large mesh
//!
//! Mesh is 100 Areas by 100 Areas with randomised link lengths
//!

use bevy_incursion_navmesh_plugin::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use navmesh_fixtures::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Build a grid whose links vary in length so that labels get corrected as the sweep goes
fn prepare_mesh(columns: u32, rows: u32) -> NavMesh {
	let mut rng = StdRng::seed_from_u64(42);
	grid(columns, rows, |_, _| rng.random_range(50.0..250.0))
}

/// Label the whole mesh from a spawn in the top left corner
fn calc(mut mesh: NavMesh, config: &NavConfig) {
	let spawn = [grid_id(100, 0, 0)];
	mesh.compute_incursion_distances(Team::Red, &spawn, config);
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("algorithm_use");
	group.significance_level(0.05).sample_size(100);
	let mesh = prepare_mesh(100, 100);
	let config = NavConfig::default();
	group.bench_function("calc_incursion", |b| {
		b.iter(|| calc(black_box(mesh.clone()), black_box(&config)))
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

//! The components making up the navigation context of a map. Spawn a [TeamNavBundle] when the
//! map loads and despawn the entity when it unloads
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Everything the pipeline needs for one map
#[derive(Bundle)]
pub struct TeamNavBundle {
	/// The mesh and its derived analytics
	nav_mesh: NavMesh,
	/// Tunables
	nav_config: NavConfig,
	/// Snapshot of the world entities, kept up to date by the game server
	world_entities: WorldEntities,
	/// Precomputed visibility between Areas
	visibility: PotentiallyVisibleSet,
	/// Debounce of recompute passes
	scheduler: RecomputeScheduler,
}

impl TeamNavBundle {
	/// Create a new instance of [TeamNavBundle] with an empty world. The first pass is queued
	/// as soon as the bundle is spawned
	pub fn new(
		nav_mesh: NavMesh,
		visibility: PotentiallyVisibleSet,
		nav_config: NavConfig,
	) -> Result<Self, NavMeshError> {
		nav_config.validate()?;
		Ok(TeamNavBundle {
			nav_mesh,
			nav_config,
			world_entities: WorldEntities::default(),
			visibility,
			scheduler: RecomputeScheduler::default(),
		})
	}
	/// Replace the initial world snapshot
	pub fn with_world(mut self, world_entities: WorldEntities) -> Self {
		self.world_entities = world_entities;
		self
	}
	/// Create a new instance of [TeamNavBundle] where the mesh, visibility and config are
	/// read from `ron` files on disk
	#[cfg(feature = "ron")]
	pub fn new_from_disk(
		mesh_path: &str,
		visibility_path: &str,
		config_path: &str,
	) -> Result<Self, NavMeshError> {
		let nav_mesh = NavMesh::from_ron(mesh_path)?;
		let visibility = PotentiallyVisibleSet::from_ron(visibility_path)?;
		let nav_config = NavConfig::from_ron(config_path)?;
		TeamNavBundle::new(nav_mesh, visibility, nav_config)
	}
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	use std::time::Duration;
	/// A bad config never makes it into the world
	#[test]
	fn rejects_invalid_config() {
		let config = NavConfig::default().with_max_step_height(-1.0);
		let bundle = TeamNavBundle::new(NavMesh::default(), PotentiallyVisibleSet::default(), config);
		assert!(matches!(bundle, Err(NavMeshError::InvalidConfig(_))));
	}
	/// Defaults are accepted
	#[test]
	fn accepts_defaults() {
		let config = NavConfig::default().with_recompute_delay(Duration::from_millis(250));
		assert!(TeamNavBundle::new(NavMesh::default(), PotentiallyVisibleSet::default(), config).is_ok());
	}
	/// Load every input from the assets directory
	#[test]
	#[cfg(feature = "ron")]
	fn bundle_from_disk() {
		let dir = env!("CARGO_MANIFEST_DIR").to_string() + "/assets/";
		let bundle = TeamNavBundle::new_from_disk(
			&(dir.clone() + "corridor_mesh.ron"),
			&(dir.clone() + "corridor_pvs.ron"),
			&(dir + "nav_config.ron"),
		)
		.unwrap();
		assert_eq!(4, bundle.nav_mesh.get_area_count());
	}
}

//! Defines the Bevy [Plugin] for IncursionNavMesh
//!

use crate::prelude::*;
use bevy::prelude::*;

pub mod recompute_layer;
pub mod world_layer;

/// Runs the intake of world events ahead of any recompute pass in the same frame
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum OrderingSet {
	/// Read events and queue passes
	Intake,
	/// Run the passes whose countdown expired
	Recompute,
}

/// Maintains the analytics of every entity carrying a [TeamNavBundle]
pub struct IncursionNavMeshPlugin;

impl Plugin for IncursionNavMeshPlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		app.register_type::<Team>()
			.register_type::<Ordinal>()
			.register_type::<AreaID>()
			.add_event::<world_layer::EventWorldChanged>()
			.configure_sets(Update, (OrderingSet::Intake, OrderingSet::Recompute).chain())
			.add_systems(
				Update,
				(
					(
						recompute_layer::request_initial_recompute,
						world_layer::process_world_changes,
					)
						.chain()
						.in_set(OrderingSet::Intake),
					recompute_layer::run_scheduled_recomputes.in_set(OrderingSet::Recompute),
				),
			);
	}
}

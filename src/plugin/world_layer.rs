//! Intake of world events raised by the game server.
//!
//! Most events change the shape of the map and go through the [RecomputeScheduler]. Buildings
//! coming and going only affect sentry danger zones so they are handled immediately without
//! waiting on a full pass
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Something in the world changed which the navigation analytics depend on
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorldChange {
	/// A navigation mesh has just been spawned
	MapLoaded,
	/// The round started or restarted
	RoundStart,
	/// A control point with the given index was captured
	PointCaptured(u8),
	/// A control point with the given index became capturable
	PointUnlocked(u8),
	/// Doors, triggers or brushes changed in a way that affects blocking
	BlockingChanged,
	/// A building such as a sentry gun was built or destroyed
	ObjectChanged,
}

impl WorldChange {
	/// Whether the change needs a full recompute pass, otherwise only danger zones are refreshed
	pub fn needs_recompute(&self) -> bool {
		!matches!(self, WorldChange::ObjectChanged)
	}
}

/// Notify every navigation mesh of a [WorldChange]. Update [WorldEntities] before sending
#[derive(Event, Clone, Copy, Debug)]
pub struct EventWorldChanged(pub WorldChange);

impl EventWorldChanged {
	/// Create a new instance of [EventWorldChanged]
	pub fn new(change: WorldChange) -> Self {
		EventWorldChanged(change)
	}
	/// Get the change
	pub fn get(&self) -> WorldChange {
		self.0
	}
}

/// Read [EventWorldChanged], schedule recomputes and refresh danger zones
#[cfg(not(tarpaulin_include))]
pub fn process_world_changes(
	mut events: EventReader<EventWorldChanged>,
	mut query: Query<(
		&mut RecomputeScheduler,
		&mut NavMesh,
		&WorldEntities,
		&PotentiallyVisibleSet,
		&NavConfig,
	)>,
) {
	// coalesce building events so a burst only refreshes once
	let mut refresh_danger = false;
	for event in events.read() {
		let change = event.get();
		if !change.needs_recompute() {
			refresh_danger = true;
			continue;
		}
		for (mut scheduler, _mesh, _world, _pvs, config) in query.iter_mut() {
			scheduler.request(change, config.get_recompute_delay());
		}
	}
	if refresh_danger {
		for (_scheduler, mut mesh, world, pvs, config) in query.iter_mut() {
			mesh.compute_sentry_danger(world, pvs, config);
		}
	}
}

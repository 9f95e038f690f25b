//! Debounced scheduling of recompute passes.
//!
//! World events tend to arrive in bursts, a capture flips several doors and gates within a few
//! frames. Each qualifying event (re)starts a short countdown and only once the countdown
//! expires without further events does a single pass run over the whole mesh:
//!
//! ```text
//!           event      event                      expiry
//!             |          |                          |
//!  Idle ------+-> Pending +-> Pending (restarted) ---+-> recompute -> Idle
//! ```
//!
//! A pending pass is never dropped, a later event can only push it back
//!

use std::time::Duration;

use crate::prelude::*;
use bevy::prelude::*;

/// Where the scheduler is in its cycle
#[derive(Clone, Debug, Default)]
pub enum RecomputeState {
	/// Nothing to do
	#[default]
	Idle,
	/// A pass will run when `timer` finishes
	PendingRecompute {
		/// The most recent event that asked for the pass
		reason: WorldChange,
		/// Countdown restarted by each new event
		timer: Timer,
	},
}

/// Describes a pass the scheduler has decided to run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecomputeTrigger {
	/// The most recent event of the burst
	reason: WorldChange,
	/// How many events the pass stands in for
	coalesced: u32,
}

impl RecomputeTrigger {
	/// Get the most recent event of the burst
	pub fn get_reason(&self) -> WorldChange {
		self.reason
	}
	/// Get the number of events the pass stands in for
	pub fn get_coalesced(&self) -> u32 {
		self.coalesced
	}
}

/// Per-mesh debounce state machine and run statistics
#[derive(Component, Clone, Debug, Default)]
pub struct RecomputeScheduler {
	/// Current state
	state: RecomputeState,
	/// Events received since the scheduler last went pending
	pending_events: u32,
	/// Total number of passes triggered
	passes_run: u64,
	/// Total number of events which were folded into a pass run for an earlier or later event
	events_coalesced: u64,
}

impl RecomputeScheduler {
	/// Get the current state
	pub fn get_state(&self) -> &RecomputeState {
		&self.state
	}
	/// Is a pass waiting on its countdown
	pub fn is_pending(&self) -> bool {
		matches!(self.state, RecomputeState::PendingRecompute { .. })
	}
	/// Get the number of passes triggered so far
	pub fn get_passes_run(&self) -> u64 {
		self.passes_run
	}
	/// Get the number of events that didn't need a pass of their own
	pub fn get_events_coalesced(&self) -> u64 {
		self.events_coalesced
	}
	/// Ask for a pass in `delay` time. A pending pass has its countdown restarted instead
	pub fn request(&mut self, reason: WorldChange, delay: Duration) {
		if let RecomputeState::PendingRecompute {
			reason: pending_reason,
			timer,
		} = &mut self.state
		{
			*pending_reason = reason;
			timer.set_duration(delay);
			timer.reset();
			self.pending_events += 1;
			self.events_coalesced += 1;
			debug!(
				"Recompute pushed back by {:?}, {} events pending",
				reason, self.pending_events
			);
			return;
		}
		self.pending_events = 1;
		self.state = RecomputeState::PendingRecompute {
			reason,
			timer: Timer::new(delay, TimerMode::Once),
		};
	}
	/// Advance the countdown by `delta`. When it expires the scheduler returns to idle and the
	/// pass to run is returned
	pub fn tick(&mut self, delta: Duration) -> Option<RecomputeTrigger> {
		let RecomputeState::PendingRecompute { reason, timer } = &mut self.state else {
			return None;
		};
		timer.tick(delta);
		if !timer.finished() {
			return None;
		}
		let trigger = RecomputeTrigger {
			reason: *reason,
			coalesced: self.pending_events,
		};
		self.state = RecomputeState::Idle;
		self.pending_events = 0;
		self.passes_run += 1;
		Some(trigger)
	}
}

/// Queue the first pass of a newly spawned mesh
#[cfg(not(tarpaulin_include))]
pub fn request_initial_recompute(
	mut query: Query<(&mut RecomputeScheduler, &NavConfig), Added<RecomputeScheduler>>,
) {
	for (mut scheduler, config) in query.iter_mut() {
		scheduler.request(WorldChange::MapLoaded, config.get_recompute_delay());
	}
}

/// Tick every scheduler and run the passes whose countdown expired
#[cfg(not(tarpaulin_include))]
pub fn run_scheduled_recomputes(
	time: Res<Time>,
	mut query: Query<(
		&mut RecomputeScheduler,
		&mut NavMesh,
		&WorldEntities,
		&PotentiallyVisibleSet,
		&NavConfig,
	)>,
) {
	for (mut scheduler, mut mesh, world, pvs, config) in query.iter_mut() {
		if let Some(trigger) = scheduler.tick(time.delta()) {
			debug!(
				"Recomputing navigation mesh for {:?}, {} events coalesced",
				trigger.get_reason(),
				trigger.get_coalesced()
			);
			mesh.recompute(world, pvs, config);
		}
	}
}

//! Resolves which Areas are impassable for each team from the doors, triggers and brushes in the
//! world along with point-gated Areas.
//!
//! Every pass starts from every Area being passable and each blocker adds its verdict on top,
//! verdicts are only ever combined with a logical OR so the order the world lists its entities
//! in makes no difference. Per-Area designer flags override what the geometry implies:
//!
//! | Area flag            | Closed door, no trigger | Door with triggers        | Brush         |
//! |----------------------|-------------------------|---------------------------|---------------|
//! | none                 | blocks both teams       | blocks teams not allowed  | filter        |
//! | `DOOR_ALWAYS_BLOCKS` | blocks both teams       | both teams while closed   | filter        |
//! | `DOOR_NEVER_BLOCKS`  | ignored                 | ignored                   | filter        |
//! | `UNBLOCKABLE`        | ignored                 | ignored                   | ignored       |
//!
//! A trigger or brush without a usable team filter blocks both teams
//!

use std::collections::BTreeSet;

use crate::prelude::*;
use bevy::prelude::*;

/// Work out which teams a door keeps out. A door covered by triggers lets through whichever
/// teams any of the triggers admit, regardless of whether it is currently open. An uncovered
/// door blocks everyone while closed and nobody while open
pub fn door_blocked_teams(door: &Door, triggers: &[&DoorTrigger]) -> [bool; TEAM_COUNT] {
	if triggers.is_empty() {
		return [door.is_closed(); TEAM_COUNT];
	}
	if triggers.iter().any(|t| t.filter == TeamFilter::Undefined) {
		return [true; TEAM_COUNT];
	}
	let mut blocked = [true; TEAM_COUNT];
	for trigger in triggers.iter() {
		for (team, keeps_out) in trigger.filter.get_blocked_teams().iter().enumerate() {
			blocked[team] &= *keeps_out;
		}
	}
	blocked
}

/// Merge a verdict into an accumulated one
fn merge(into: &mut [bool; TEAM_COUNT], verdict: [bool; TEAM_COUNT]) {
	for (existing, new) in into.iter_mut().zip(verdict.iter()) {
		*existing |= *new;
	}
}

impl NavMesh {
	/// Recalculate the blocked state of every Area from `world`. Any previous state is
	/// overwritten, an Area no blocker touches is explicitly unblocked
	pub fn resolve_blocked_areas(&mut self, world: &WorldEntities) {
		let mut verdicts = vec![[false; TEAM_COUNT]; self.get_area_count()];
		for door in world.doors.iter() {
			let triggers = world.get_triggers_covering(&door.extent);
			let door_verdict = door_blocked_teams(door, &triggers);
			for id in self.get_overlapping_areas(&door.extent) {
				let Some(area) = self.get_area(id) else {
					continue;
				};
				if area.has_attributes(AreaAttributes::UNBLOCKABLE)
					|| area.has_attributes(AreaAttributes::DOOR_NEVER_BLOCKS)
				{
					continue;
				}
				if area.has_attributes(AreaAttributes::DOOR_ALWAYS_BLOCKS) && door.is_closed() {
					merge(&mut verdicts[id.get_index()], [true; TEAM_COUNT]);
				} else {
					merge(&mut verdicts[id.get_index()], door_verdict);
				}
			}
		}
		for brush in world.blocker_brushes.iter() {
			let brush_verdict = brush.filter.get_blocked_teams();
			for id in self.get_overlapping_areas(&brush.extent) {
				let unblockable = self
					.get_area(id)
					.is_some_and(|a| a.has_attributes(AreaAttributes::UNBLOCKABLE));
				if !unblockable {
					merge(&mut verdicts[id.get_index()], brush_verdict);
				}
			}
		}
		let mut unknown_points = BTreeSet::new();
		for area in self.get_areas().iter() {
			let Some(gate) = area.get_point_gate() else {
				continue;
			};
			if area.has_attributes(AreaAttributes::UNBLOCKABLE) {
				continue;
			}
			let captured = match world.is_point_captured(gate.get_point()) {
				Some(captured) => captured,
				None => {
					unknown_points.insert(gate.get_point());
					false
				}
			};
			if gate.is_closed(captured) {
				merge(&mut verdicts[area.get_id().get_index()], [true; TEAM_COUNT]);
			}
		}
		for point in unknown_points {
			warn!("Areas are gated on control point {} which doesn't exist, treating it as not captured", point);
		}
		let mut blocked_count = [0; TEAM_COUNT];
		for (area, verdict) in self.get_areas_mut().iter_mut().zip(verdicts.iter()) {
			for team in Team::ALL {
				area.set_blocked(team, verdict[team.index()]);
				if verdict[team.index()] {
					blocked_count[team.index()] += 1;
				}
			}
		}
		debug!(
			"Blocked areas, red: {}, blue: {}",
			blocked_count[Team::Red.index()],
			blocked_count[Team::Blue.index()]
		);
	}
}

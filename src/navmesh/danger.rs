//! Sentry guns make the Areas they can see within their range dangerous for the enemy team.
//! Sentries are built and destroyed far more often than anything else changes so the danger
//! zones can be refreshed on their own without a full recompute pass
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Both danger tags
const DANGER: AreaAttributes = AreaAttributes::SENTRY_DANGER_RED.union(AreaAttributes::SENTRY_DANGER_BLUE);

impl NavMesh {
	/// Clear and rebuild the sentry danger tags from the sentries in `world`
	pub fn compute_sentry_danger(
		&mut self,
		world: &WorldEntities,
		visibility: &impl VisibilityOracle,
		config: &NavConfig,
	) {
		for area in self.get_areas_mut().iter_mut() {
			area.clear_attributes(DANGER);
		}
		let mut dangerous = Vec::new();
		for sentry in world.sentries.iter() {
			let Some(sentry_area) = self.get_area_at(sentry.position, config.get_max_step_height()) else {
				debug!("Sentry at {:?} isn't on the mesh", sentry.position);
				continue;
			};
			let tag = AreaAttributes::sentry_danger(sentry.team.opposing());
			for id in visibility.get_potentially_visible(sentry_area) {
				let in_range = self
					.get_area(id)
					.is_some_and(|a| a.get_centre().distance(sentry.position) <= sentry.range);
				if in_range {
					dangerous.push((id, tag));
				}
			}
		}
		for (id, tag) in dangerous.iter() {
			if let Some(area) = self.get_area_mut(*id) {
				area.set_attributes(*tag);
			}
		}
		debug!("Sentry danger refreshed, {} area tags from {} sentries", dangerous.len(), world.sentries.len());
	}
}

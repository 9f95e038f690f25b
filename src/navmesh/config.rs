//! Tunables of the recompute pipeline
//!

use std::time::Duration;

use crate::prelude::*;
use bevy::prelude::*;

/// Default debounce window between a world event and the recompute pass it triggers
pub const DEFAULT_RECOMPUTE_DELAY: Duration = Duration::from_secs(1);
/// Default maximum rise of a connection an actor can climb, anything higher is a ledge
pub const DEFAULT_MAX_STEP_HEIGHT: f32 = 72.0;
/// Default tolerance on distance improvements during relaxation
pub const DEFAULT_RELAXATION_EPSILON: f32 = 0.01;
/// Default tolerance band used when caching invasion Areas
pub const DEFAULT_INVASION_TOLERANCE: f32 = 500.0;

/// Configuration of a navigation mesh, lives alongside the [NavMesh] on the same entity
#[cfg_attr(
	feature = "serde",
	derive(serde::Deserialize, serde::Serialize),
	serde(default)
)]
#[derive(Component, Clone, Debug, PartialEq)]
pub struct NavConfig {
	/// How long to wait after a world event before recomputing, further events within the
	/// window restart the wait
	recompute_delay: Duration,
	/// Connections which rise by more than this are never traversed
	max_step_height: f32,
	/// A new distance only replaces the current one when smaller by more than this
	relaxation_epsilon: f32,
	/// How far ahead of an Area's own enemy incursion distance an invasion Area may sit
	invasion_tolerance: f32,
	/// Substitute an approximate field for a team without a spawn from the opposing field
	mirror_missing_fields: bool,
	/// The team delivering a bomb, enables drop tagging and the distance-to-objective field
	bomb_carrier: Option<Team>,
}

impl Default for NavConfig {
	fn default() -> Self {
		NavConfig {
			recompute_delay: DEFAULT_RECOMPUTE_DELAY,
			max_step_height: DEFAULT_MAX_STEP_HEIGHT,
			relaxation_epsilon: DEFAULT_RELAXATION_EPSILON,
			invasion_tolerance: DEFAULT_INVASION_TOLERANCE,
			mirror_missing_fields: true,
			bomb_carrier: None,
		}
	}
}

impl NavConfig {
	pub fn get_recompute_delay(&self) -> Duration {
		self.recompute_delay
	}
	pub fn get_max_step_height(&self) -> f32 {
		self.max_step_height
	}
	pub fn get_relaxation_epsilon(&self) -> f32 {
		self.relaxation_epsilon
	}
	pub fn get_invasion_tolerance(&self) -> f32 {
		self.invasion_tolerance
	}
	pub fn get_mirror_missing_fields(&self) -> bool {
		self.mirror_missing_fields
	}
	pub fn get_bomb_carrier(&self) -> Option<Team> {
		self.bomb_carrier
	}
	pub fn with_recompute_delay(mut self, delay: Duration) -> Self {
		self.recompute_delay = delay;
		self
	}
	pub fn with_max_step_height(mut self, height: f32) -> Self {
		self.max_step_height = height;
		self
	}
	pub fn with_relaxation_epsilon(mut self, epsilon: f32) -> Self {
		self.relaxation_epsilon = epsilon;
		self
	}
	pub fn with_invasion_tolerance(mut self, tolerance: f32) -> Self {
		self.invasion_tolerance = tolerance;
		self
	}
	pub fn with_mirror_missing_fields(mut self, mirror: bool) -> Self {
		self.mirror_missing_fields = mirror;
		self
	}
	pub fn with_bomb_carrier(mut self, team: Option<Team>) -> Self {
		self.bomb_carrier = team;
		self
	}
	/// Check that every tunable is usable
	pub fn validate(&self) -> Result<(), NavMeshError> {
		let checks = [
			("max_step_height", self.max_step_height),
			("relaxation_epsilon", self.relaxation_epsilon),
			("invasion_tolerance", self.invasion_tolerance),
		];
		for (name, value) in checks {
			if !value.is_finite() || value < 0.0 {
				return Err(NavMeshError::InvalidConfig(format!(
					"`{}` must be a finite, non-negative number, found {}",
					name, value
				)));
			}
		}
		Ok(())
	}
	/// From a `ron` file generate the [NavConfig]
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str) -> Result<Self, NavMeshError> {
		let file = std::fs::File::open(path)?;
		let config: NavConfig =
			ron::de::from_reader(file).map_err(|e| NavMeshError::Deserialize(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}
}

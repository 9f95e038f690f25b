//! Scalar fields laid over the Areas of the mesh
//!

pub mod distance_field;
pub mod incursion;

use crate::prelude::*;

/// Sentinel distance of an Area which cannot be reached
pub const UNREACHABLE: f32 = -1.0;

/// Defines required access to per-Area field arrays
pub trait AreaField<T> {
	/// Get a reference to the field array, indexed by [AreaID]
	fn get(&self) -> &[T];
	/// Retrieve the value of an Area
	fn get_area_value(&self, area: AreaID) -> T;
	/// Set the value of an Area
	fn set_area_value(&mut self, value: T, area: AreaID);
}

/// Which way along the directed connections a field expands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Traversal {
	/// Distances measure travel away from the sources, following links forwards
	Outbound,
	/// Distances measure travel towards the sources, following links backwards
	Inbound,
}

impl Traversal {
	/// The links along which a field expands out of `area`
	pub fn get_expanding_links(self, area: &Area) -> &[Vec<AreaConnection>; DIRECTION_COUNT] {
		match self {
			Traversal::Outbound => area.get_all_connections(),
			Traversal::Inbound => area.get_all_incoming(),
		}
	}
	/// The links along which `area` could itself be reached more cheaply
	pub fn get_feeding_links(self, area: &Area) -> &[Vec<AreaConnection>; DIRECTION_COUNT] {
		match self {
			Traversal::Outbound => area.get_all_incoming(),
			Traversal::Inbound => area.get_all_connections(),
		}
	}
}

/// The rules an actor obeys while a field is being expanded
#[derive(Clone, Copy, Debug)]
pub struct TraversalRules {
	/// Whose blocking applies
	team: Team,
	/// Direction of expansion
	traversal: Traversal,
	/// Links rising by more than this are ledges
	max_step_height: f32,
	/// Smallest improvement which relabels an Area
	epsilon: f32,
	/// Stop expanding past this distance
	range: Option<f32>,
}

impl TraversalRules {
	/// Create a new instance of [TraversalRules] taking the tunables from `config`
	pub fn new(team: Team, traversal: Traversal, config: &NavConfig) -> Self {
		TraversalRules {
			team,
			traversal,
			max_step_height: config.get_max_step_height(),
			epsilon: config.get_relaxation_epsilon(),
			range: None,
		}
	}
	/// Limit the expansion to `range`
	pub fn with_range(mut self, range: f32) -> Self {
		self.range = Some(range);
		self
	}
	pub fn get_team(&self) -> Team {
		self.team
	}
	pub fn get_traversal(&self) -> Traversal {
		self.traversal
	}
	pub fn get_epsilon(&self) -> f32 {
		self.epsilon
	}
	pub fn get_range(&self) -> Option<f32> {
		self.range
	}
	/// A link can be walked unless it climbs higher than a step
	pub fn can_climb(&self, link: &AreaConnection) -> bool {
		link.get_height_change() <= self.max_step_height
	}
	/// An Area can be entered unless it is blocked for the team and isn't one of the Areas
	/// known to open up later
	pub fn can_enter(&self, area: &Area) -> bool {
		!area.is_blocked_for_travel(self.team)
	}
}

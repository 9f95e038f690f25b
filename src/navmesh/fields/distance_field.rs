//! A DistanceField labels every Area with the cumulative travel distance from (or towards) a set
//! of source Areas. It drives both the per-team incursion distances and the distance to the
//! bomb objective.
//!
//! Link lengths vary so a single breadth first wavefront would settle some Areas too early.
//! Instead the field is built by label-correcting relaxation:
//!
//! 1. Every label is reset to [UNREACHABLE] and each source is set to `0` and queued
//! 2. An Area is popped from the queue. Its predecessors are checked first, if arriving from any
//!    of them is cheaper than the current label the label is lowered (this picks up one-way drops
//!    which the forward wave has not explored yet)
//! 3. Every link leaving the Area is relaxed. A neighbour whose label is unreachable or larger
//!    than the candidate by more than the relaxation epsilon takes the candidate and is queued
//!    again, even if it has already been popped before
//! 4. Repeat until the queue drains
//!
//! ```text
//!  A ---10---> B ---1---> D
//!  |           ^
//!  1           1
//!  v           |
//!  C ----------+
//! ```
//!
//! Above, `B` is first labelled `10` from `A` and `D` becomes `11`. Popping `C` relabels `B` to
//! `2`, `B` is queued again and `D` is corrected to `3`.
//!
//! The epsilon guard means every relabel is an improvement of more than epsilon so the queue is
//! guaranteed to drain on a finite mesh. Each label remembers the Area it was reached from which
//! forms the relaxation tree.
//!

use std::collections::VecDeque;

use crate::prelude::*;

/// Per-Area travel distances from a set of sources and the tree of Areas they were reached from
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DistanceField {
	/// Label of each Area, [UNREACHABLE] when there is no route
	distances: Vec<f32>,
	/// The Area each label was relaxed from, `None` for sources and unreached Areas
	parents: Vec<Option<AreaID>>,
}

impl AreaField<f32> for DistanceField {
	/// Get a reference to the labels
	fn get(&self) -> &[f32] {
		&self.distances
	}
	/// Retrieve the label of an Area
	fn get_area_value(&self, area: AreaID) -> f32 {
		if area.get_index() >= self.distances.len() {
			panic!(
				"Cannot get a DistanceField value, index out of bounds. Asked for {:?}, field length is {}",
				area,
				self.distances.len()
			)
		}
		self.distances[area.get_index()]
	}
	/// Set the label of an Area
	fn set_area_value(&mut self, value: f32, area: AreaID) {
		if area.get_index() >= self.distances.len() {
			panic!(
				"Cannot set a DistanceField value, index out of bounds. Asked for {:?}, field length is {}",
				area,
				self.distances.len()
			)
		}
		self.distances[area.get_index()] = value;
	}
}

impl DistanceField {
	/// Create a new [DistanceField] of `area_count` unreachable labels
	pub fn new(area_count: usize) -> Self {
		DistanceField {
			distances: vec![UNREACHABLE; area_count],
			parents: vec![None; area_count],
		}
	}
	/// Reset every label to [UNREACHABLE] and the `sources` to `0`. Sources outside of the field
	/// are ignored
	pub fn reset(&mut self, sources: &[AreaID]) {
		self.distances.fill(UNREACHABLE);
		self.parents.fill(None);
		for source in sources.iter() {
			if source.get_index() < self.distances.len() {
				self.distances[source.get_index()] = 0.0;
			}
		}
	}
	/// Is there a route to `area`
	pub fn is_reachable(&self, area: AreaID) -> bool {
		self.distances
			.get(area.get_index())
			.is_some_and(|d| *d >= 0.0)
	}
	/// The label of `area` or `None` when unreachable or out of bounds
	pub fn get_distance(&self, area: AreaID) -> Option<f32> {
		self.distances
			.get(area.get_index())
			.copied()
			.filter(|d| *d >= 0.0)
	}
	/// The Area the label of `area` was relaxed from
	pub fn get_parent(&self, area: AreaID) -> Option<AreaID> {
		self.parents.get(area.get_index()).copied().flatten()
	}
	/// Largest reachable label
	pub fn get_max_distance(&self) -> Option<f32> {
		self.distances
			.iter()
			.copied()
			.filter(|d| *d >= 0.0)
			.reduce(f32::max)
	}
	/// Every reachable Area
	pub fn get_reachable_areas(&self) -> Vec<AreaID> {
		self.distances
			.iter()
			.enumerate()
			.filter(|(_, d)| **d >= 0.0)
			.map(|(i, _)| AreaID::new(i as u32))
			.collect()
	}
	/// Follow the relaxation tree from `area` back to the source it was reached from. The chain
	/// is returned in the order an actor walks it, so for an [Traversal::Outbound] field it
	/// starts at the source and for an [Traversal::Inbound] field it ends at the source
	pub fn get_path_to(&self, area: AreaID, traversal: Traversal) -> Option<Vec<AreaID>> {
		if !self.is_reachable(area) {
			return None;
		}
		let mut path = vec![area];
		let mut current = area;
		while let Some(parent) = self.get_parent(current) {
			// a tree over n Areas can't be deeper than n
			if path.len() > self.parents.len() {
				return None;
			}
			path.push(parent);
			current = parent;
		}
		if traversal == Traversal::Outbound {
			path.reverse();
		}
		Some(path)
	}
	/// From a list of `sources` relax the labels across `mesh` obeying `rules`. The field is
	/// resized to the mesh if needed
	pub fn calculate_field(&mut self, sources: &[AreaID], mesh: &NavMesh, rules: &TraversalRules) {
		let area_count = mesh.get_area_count();
		if self.distances.len() != area_count {
			*self = DistanceField::new(area_count);
		}
		self.reset(sources);
		let epsilon = rules.get_epsilon();
		let traversal = rules.get_traversal();
		let areas = mesh.get_areas();

		let mut queue: VecDeque<AreaID> = VecDeque::new();
		let mut in_queue = vec![false; area_count];
		for source in sources.iter() {
			if source.get_index() < area_count && !in_queue[source.get_index()] {
				in_queue[source.get_index()] = true;
				queue.push_back(*source);
			}
		}
		while let Some(current) = queue.pop_front() {
			in_queue[current.get_index()] = false;
			let area = &areas[current.get_index()];
			// pull from predecessors
			for link in traversal.get_feeding_links(area).iter().flatten() {
				if !rules.can_climb(link) {
					continue;
				}
				let Some(from) = self.get_distance(link.get_area()) else {
					continue;
				};
				let candidate = from + link.get_length();
				if candidate < self.distances[current.get_index()] - epsilon {
					self.distances[current.get_index()] = candidate;
					self.parents[current.get_index()] = Some(link.get_area());
				}
			}
			let current_distance = self.distances[current.get_index()];
			// push to successors
			for link in traversal.get_expanding_links(area).iter().flatten() {
				let next = link.get_area();
				if !rules.can_climb(link) || !rules.can_enter(&areas[next.get_index()]) {
					continue;
				}
				let candidate = current_distance + link.get_length();
				if rules.get_range().is_some_and(|range| candidate > range) {
					continue;
				}
				let existing = self.distances[next.get_index()];
				if existing < 0.0 || candidate < existing - epsilon {
					self.distances[next.get_index()] = candidate;
					self.parents[next.get_index()] = Some(current);
					if !in_queue[next.get_index()] {
						in_queue[next.get_index()] = true;
						queue.push_back(next);
					}
				}
			}
		}
	}
}

//! Potential visibility between Areas is precomputed offline by raycasting the world geometry.
//! The pipeline only ever asks whether one Area could see another so any source of that answer
//! can be plugged in through [VisibilityOracle]
//!

use std::collections::{BTreeMap, BTreeSet};

use crate::prelude::*;
use bevy::prelude::*;

/// Answers whether anything standing in one Area could possibly see into another
pub trait VisibilityOracle {
	/// Could something in `from` see into `to`
	fn is_potentially_visible(&self, from: AreaID, to: AreaID) -> bool;
	/// Every Area potentially visible from `from`, including `from` itself
	fn get_potentially_visible(&self, from: AreaID) -> Vec<AreaID>;
}

/// A lookup table of which Areas can see which. An Area can always see itself
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct PotentiallyVisibleSet(BTreeMap<AreaID, BTreeSet<AreaID>>);

impl VisibilityOracle for PotentiallyVisibleSet {
	fn is_potentially_visible(&self, from: AreaID, to: AreaID) -> bool {
		from == to || self.0.get(&from).is_some_and(|visible| visible.contains(&to))
	}
	fn get_potentially_visible(&self, from: AreaID) -> Vec<AreaID> {
		let mut visible: BTreeSet<AreaID> = self.0.get(&from).cloned().unwrap_or_default();
		visible.insert(from);
		visible.into_iter().collect()
	}
}

impl PotentiallyVisibleSet {
	/// Get a reference to the table
	pub fn get(&self) -> &BTreeMap<AreaID, BTreeSet<AreaID>> {
		&self.0
	}
	/// Record that `from` can see `to`
	pub fn add_visible(&mut self, from: AreaID, to: AreaID) {
		self.0.entry(from).or_default().insert(to);
	}
	/// Record that `a` and `b` can see each other
	pub fn add_mutual(&mut self, a: AreaID, b: AreaID) {
		self.add_visible(a, b);
		self.add_visible(b, a);
	}
	/// Build a table where each Area in `group` sees every other Area in it
	pub fn with_group(mut self, group: &[AreaID]) -> Self {
		for a in group.iter() {
			for b in group.iter() {
				if a != b {
					self.add_visible(*a, *b);
				}
			}
		}
		self
	}
	/// From a `ron` file generate the [PotentiallyVisibleSet]
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str) -> Result<Self, NavMeshError> {
		let file = std::fs::File::open(path)?;
		ron::de::from_reader(file).map_err(|e| NavMeshError::Deserialize(e.to_string()))
	}
	/// From a CSV file of `from,to` rows generate the [PotentiallyVisibleSet]
	#[cfg(feature = "csv")]
	pub fn from_csv(path: &str) -> Result<Self, NavMeshError> {
		let data = std::fs::File::open(path)?;
		let mut rdr = csv::ReaderBuilder::new()
			.has_headers(false)
			.trim(csv::Trim::All)
			.from_reader(data);
		let mut pvs = PotentiallyVisibleSet::default();
		for (row, record) in rdr.records().enumerate() {
			let record = record.map_err(|e| NavMeshError::Deserialize(e.to_string()))?;
			let mut ids = record.iter().map(|value| value.parse::<u32>());
			match (ids.next(), ids.next()) {
				(Some(Ok(from)), Some(Ok(to))) => {
					pvs.add_visible(AreaID::new(from), AreaID::new(to));
				}
				_ => {
					return Err(NavMeshError::Deserialize(format!(
						"Row {} of {} is not a pair of area IDs",
						row, path
					)));
				}
			}
		}
		Ok(pvs)
	}
}

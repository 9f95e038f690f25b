//! Useful structures and tools used across the mesh
//!

use bevy::prelude::*;

/// Number of teams that own a spawn and a distance field
pub const TEAM_COUNT: usize = 2;
/// Number of sides an Area can have connections on
pub const DIRECTION_COUNT: usize = 4;

/// One of the two opposing teams of the arena
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Reflect)]
pub enum Team {
	Red,
	Blue,
}

impl Team {
	/// Both teams, ordered by their storage index
	pub const ALL: [Team; TEAM_COUNT] = [Team::Red, Team::Blue];
	/// The team fighting against this one
	pub fn opposing(self) -> Team {
		match self {
			Team::Red => Team::Blue,
			Team::Blue => Team::Red,
		}
	}
	/// Index used for per-team arrays
	pub fn index(self) -> usize {
		match self {
			Team::Red => 0,
			Team::Blue => 1,
		}
	}
}

/// Convenience way of accessing the 4 sides of an Area. Connections of an Area are stored in a
/// strict ordering of `0..=3 == North, East, South, West`
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Reflect)]
pub enum Ordinal {
	North,
	East,
	South,
	West,
}

impl Ordinal {
	/// All sides in storage order
	pub const ALL: [Ordinal; DIRECTION_COUNT] =
		[Ordinal::North, Ordinal::East, Ordinal::South, Ordinal::West];
	/// Index of the side used for the connection arrays
	pub fn index(self) -> usize {
		match self {
			Ordinal::North => 0,
			Ordinal::East => 1,
			Ordinal::South => 2,
			Ordinal::West => 3,
		}
	}
	/// Get the side facing the other way, an edge leaving `a` to the East arrives at `b` on its
	/// West side
	pub fn opposite(self) -> Ordinal {
		match self {
			Ordinal::North => Ordinal::South,
			Ordinal::East => Ordinal::West,
			Ordinal::South => Ordinal::North,
			Ordinal::West => Ordinal::East,
		}
	}
	/// Find the side of `from` which best faces `to`, used when a connection is created without
	/// an explicit direction. The world is laid out with `+y` as North and `+x` as East
	pub fn from_centres(from: Vec3, to: Vec3) -> Ordinal {
		let delta = to - from;
		if delta.x.abs() >= delta.y.abs() {
			if delta.x >= 0.0 {
				Ordinal::East
			} else {
				Ordinal::West
			}
		} else if delta.y >= 0.0 {
			Ordinal::North
		} else {
			Ordinal::South
		}
	}
}

/// An axis aligned box in world space described by its minimum and maximum corners. Used for
/// the footprint of an Area and for the volumes of world entities such as doors and triggers
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Extent {
	/// Minimum corner
	lo: Vec3,
	/// Maximum corner
	hi: Vec3,
}

impl Extent {
	/// Create a new instance of [Extent], the corners are sorted per axis so that `lo <= hi`
	pub fn new(a: Vec3, b: Vec3) -> Self {
		Extent {
			lo: a.min(b),
			hi: a.max(b),
		}
	}
	/// Create an [Extent] of `half_size` around `centre`
	pub fn from_centre(centre: Vec3, half_size: Vec3) -> Self {
		Extent::new(centre - half_size, centre + half_size)
	}
	pub fn get_lo(&self) -> Vec3 {
		self.lo
	}
	pub fn get_hi(&self) -> Vec3 {
		self.hi
	}
	/// Midpoint of the box
	pub fn get_centre(&self) -> Vec3 {
		(self.lo + self.hi) * 0.5
	}
	/// `true` if every component of `lo` is finite and no larger than `hi`
	pub fn is_valid(&self) -> bool {
		self.lo.is_finite() && self.hi.is_finite() && self.lo.cmple(self.hi).all()
	}
	/// Footprints must share some area, boxes that only touch along a side don't overlap. Height
	/// is inclusive since Area floors are flat and a door brush rests on them
	pub fn overlaps(&self, other: &Extent) -> bool {
		self.lo.x < other.hi.x
			&& other.lo.x < self.hi.x
			&& self.lo.y < other.hi.y
			&& other.lo.y < self.hi.y
			&& self.lo.z <= other.hi.z
			&& other.lo.z <= self.hi.z
	}
	/// Test whether a point sits inside the box, boundary inclusive
	pub fn contains(&self, point: Vec3) -> bool {
		self.lo.cmple(point).all() && point.cmple(self.hi).all()
	}
	/// Test whether a point sits inside the footprint of the box ignoring height
	pub fn contains_xy(&self, point: Vec3) -> bool {
		point.x >= self.lo.x && point.x <= self.hi.x && point.y >= self.lo.y && point.y <= self.hi.y
	}
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn opposing_team() {
		assert_eq!(Team::Blue, Team::Red.opposing());
		assert_eq!(Team::Red, Team::Blue.opposing());
	}
	#[test]
	fn opposite_ordinals() {
		for ordinal in Ordinal::ALL {
			assert_eq!(ordinal, ordinal.opposite().opposite());
			assert_ne!(ordinal, ordinal.opposite());
		}
	}
	#[test]
	fn ordinal_from_centres() {
		let origin = Vec3::ZERO;
		assert_eq!(Ordinal::East, Ordinal::from_centres(origin, Vec3::new(10.0, 2.0, 0.0)));
		assert_eq!(Ordinal::West, Ordinal::from_centres(origin, Vec3::new(-10.0, 2.0, 0.0)));
		assert_eq!(Ordinal::North, Ordinal::from_centres(origin, Vec3::new(1.0, 5.0, 0.0)));
		assert_eq!(Ordinal::South, Ordinal::from_centres(origin, Vec3::new(1.0, -5.0, 0.0)));
	}
	#[test]
	fn extent_sorts_corners() {
		let extent = Extent::new(Vec3::new(10.0, 0.0, 5.0), Vec3::new(0.0, 10.0, 0.0));
		assert_eq!(Vec3::new(0.0, 0.0, 0.0), extent.get_lo());
		assert_eq!(Vec3::new(10.0, 10.0, 5.0), extent.get_hi());
		assert_eq!(Vec3::new(5.0, 5.0, 2.5), extent.get_centre());
	}
	#[test]
	fn extents_touching_dont_overlap() {
		let a = Extent::new(Vec3::ZERO, Vec3::new(10.0, 10.0, 0.0));
		let b = Extent::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(20.0, 10.0, 0.0));
		let c = Extent::new(Vec3::new(9.9, 0.0, 0.0), Vec3::new(20.0, 10.0, 0.0));
		assert!(!a.overlaps(&b));
		assert!(!b.overlaps(&a));
		assert!(a.overlaps(&c));
		assert!(c.overlaps(&a));
		// a copy of a flat footprint covers it
		assert!(a.overlaps(&a));
		// a brush standing on the floor
		let brush = Extent::new(Vec3::new(2.0, 2.0, 0.0), Vec3::new(8.0, 8.0, 50.0));
		assert!(a.overlaps(&brush));
		let floating = Extent::new(Vec3::new(2.0, 2.0, 1.0), Vec3::new(8.0, 8.0, 50.0));
		assert!(!a.overlaps(&floating));
	}
	#[test]
	fn extent_contains_point() {
		let a = Extent::new(Vec3::ZERO, Vec3::new(10.0, 10.0, 0.0));
		assert!(a.contains(Vec3::new(5.0, 5.0, 0.0)));
		assert!(!a.contains(Vec3::new(5.0, 5.0, 1.0)));
		assert!(a.contains_xy(Vec3::new(5.0, 5.0, 1.0)));
	}
}

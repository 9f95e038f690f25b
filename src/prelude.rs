//! `use bevy_incursion_navmesh_plugin::prelude::*;` to import common structures and methods
//!

#[doc(hidden)]
pub use crate::navmesh::{
	area::{attributes::*, *},
	blocking::*,
	config::*,
	error::*,
	fields::{distance_field::*, *},
	mesh::*,
	query::*,
	utilities::*,
	visibility::*,
	world::*,
	*,
};

#[doc(hidden)]
pub use crate::{
	bundle::*,
	plugin::{recompute_layer::*, world_layer::*, *},
};

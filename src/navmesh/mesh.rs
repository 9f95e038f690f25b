//! The [NavMesh] owns every [Area] in a flat arena indexed by [AreaID] along with the derived
//! per-team collections (spawn rooms, exits) produced by the recompute pipeline.
//!
//! Meshes are generated offline and arrive as a [NavMeshFile]. Loading validates the whole
//! file up front, a file with a version mismatch or broken references never becomes a mesh
//!

use std::collections::{BTreeMap, BTreeSet};

use crate::prelude::*;
use bevy::prelude::*;

/// Major version of the mesh file layout this crate reads
pub const NAV_MESH_VERSION: u32 = 1;
/// Newest minor revision of the layout this crate understands
pub const NAV_MESH_SUB_VERSION: u32 = 2;

/// A link as written in a mesh file. Absent metrics are derived from the Area centres
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectionRecord {
	pub area: AreaID,
	#[cfg_attr(feature = "serde", serde(default))]
	pub length: Option<f32>,
	#[cfg_attr(feature = "serde", serde(default))]
	pub height_change: Option<f32>,
}

impl ConnectionRecord {
	/// Create a new instance of [ConnectionRecord] with derived metrics
	pub fn new(area: AreaID) -> Self {
		ConnectionRecord {
			area,
			length: None,
			height_change: None,
		}
	}
	/// Create a new instance of [ConnectionRecord] with an authored length
	pub fn with_length(area: AreaID, length: f32) -> Self {
		ConnectionRecord {
			area,
			length: Some(length),
			height_change: None,
		}
	}
}

/// An Area as written in a mesh file
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct AreaRecord {
	pub id: AreaID,
	pub lo: Vec3,
	pub hi: Vec3,
	/// Outgoing links ordered `North, East, South, West`
	#[cfg_attr(feature = "serde", serde(default))]
	pub connections: [Vec<ConnectionRecord>; DIRECTION_COUNT],
	#[cfg_attr(feature = "serde", serde(default))]
	pub attributes: AreaAttributes,
	#[cfg_attr(feature = "serde", serde(default))]
	pub mode_payload: Option<ModePayload>,
}

impl AreaRecord {
	/// Create a new instance of [AreaRecord] with no connections
	pub fn new(id: u32, lo: Vec3, hi: Vec3) -> Self {
		AreaRecord {
			id: AreaID::new(id),
			lo,
			hi,
			connections: Default::default(),
			attributes: AreaAttributes::empty(),
			mode_payload: None,
		}
	}
	/// Add an outgoing link on side `ordinal`
	pub fn connect(mut self, ordinal: Ordinal, connection: ConnectionRecord) -> Self {
		self.connections[ordinal.index()].push(connection);
		self
	}
	pub fn with_attributes(mut self, attributes: AreaAttributes) -> Self {
		self.attributes = attributes;
		self
	}
	pub fn with_mode_payload(mut self, payload: ModePayload) -> Self {
		self.mode_payload = Some(payload);
		self
	}
}

/// The persisted form of a navigation mesh
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct NavMeshFile {
	pub version: u32,
	pub sub_version: u32,
	pub areas: Vec<AreaRecord>,
}

impl Default for NavMeshFile {
	fn default() -> Self {
		NavMeshFile {
			version: NAV_MESH_VERSION,
			sub_version: NAV_MESH_SUB_VERSION,
			areas: Vec::new(),
		}
	}
}

impl NavMeshFile {
	/// Append an Area
	pub fn add_area(&mut self, record: AreaRecord) {
		self.areas.push(record);
	}
	/// Add links in both directions between `a` and `b` of the same `length`. The sides are
	/// picked from the relative position of the Area centres
	pub fn connect_two_way(&mut self, a: u32, b: u32, length: Option<f32>) {
		self.connect_one_way(a, b, length);
		self.connect_one_way(b, a, length);
	}
	/// Add a single link from `a` to `b`. Unknown IDs are ignored, loading will reject the file
	/// if they are still missing by then
	pub fn connect_one_way(&mut self, a: u32, b: u32, length: Option<f32>) {
		let centre_of = |areas: &Vec<AreaRecord>, id: u32| {
			areas
				.iter()
				.find(|r| r.id.get() == id)
				.map(|r| (r.lo + r.hi) * 0.5)
		};
		let (Some(from), Some(to)) = (centre_of(&self.areas, a), centre_of(&self.areas, b)) else {
			return;
		};
		let ordinal = Ordinal::from_centres(from, to);
		if let Some(record) = self.areas.iter_mut().find(|r| r.id.get() == a) {
			record.connections[ordinal.index()].push(ConnectionRecord {
				area: AreaID::new(b),
				length,
				height_change: None,
			});
		}
	}
}

/// The navigation mesh of a map, created once when the map loads
#[derive(Component, Clone, Debug, Default)]
pub struct NavMesh {
	/// Every Area, the position in the list is the [AreaID]
	areas: Vec<Area>,
	/// Spawn room Areas of each team from the last decoration pass
	spawn_room_areas: [Vec<AreaID>; TEAM_COUNT],
	/// Spawn room exit Areas of each team from the last decoration pass
	spawn_exit_areas: [Vec<AreaID>; TEAM_COUNT],
	/// Areas directly under an enabled spawn point, these seed the incursion fields
	spawn_point_areas: [Vec<AreaID>; TEAM_COUNT],
	/// Footprint of each control point keyed by point index
	control_point_areas: BTreeMap<u8, Vec<AreaID>>,
	/// Incursion field of each team from the last pass, mirrored fields have no relaxation tree
	incursion_fields: [DistanceField; TEAM_COUNT],
	/// Distance to the bomb objective from the last pass
	bomb_target_field: DistanceField,
	/// Number of completed recompute passes
	passes_completed: u64,
}

impl NavMesh {
	/// Build a mesh from a [NavMeshFile], rejecting it entirely on any inconsistency
	pub fn from_file_data(file: NavMeshFile) -> Result<Self, NavMeshError> {
		if file.version != NAV_MESH_VERSION {
			return Err(NavMeshError::VersionMismatch {
				found: file.version,
				expected: NAV_MESH_VERSION,
			});
		}
		if file.sub_version > NAV_MESH_SUB_VERSION {
			return Err(NavMeshError::SubVersionMismatch {
				found: file.sub_version,
				supported: NAV_MESH_SUB_VERSION,
			});
		}
		let mut records = file.areas;
		records.sort_by_key(|r| r.id);
		for (index, record) in records.iter().enumerate() {
			let expected = AreaID::new(index as u32);
			if index > 0 && records[index - 1].id == record.id {
				return Err(NavMeshError::DuplicateArea(record.id));
			}
			if record.id != expected {
				return Err(NavMeshError::NonContiguousAreaIds {
					expected,
					found: record.id,
				});
			}
		}
		let mut areas = Vec::with_capacity(records.len());
		for record in records.iter() {
			let extent = Extent::new(record.lo, record.hi);
			if !extent.is_valid() || !record.lo.cmple(record.hi).all() {
				return Err(NavMeshError::InvalidExtent(record.id));
			}
			let mut area = Area::new(record.id, extent);
			area.set_designer_attributes(record.attributes);
			area.set_mode_payload(record.mode_payload);
			areas.push(area);
		}
		// outgoing and incoming links
		for record in records.iter() {
			for ordinal in Ordinal::ALL {
				for connection in record.connections[ordinal.index()].iter() {
					let target = connection.area;
					if target.get_index() >= areas.len() {
						return Err(NavMeshError::DanglingConnection {
							from: record.id,
							to: target,
						});
					}
					let from_centre = areas[record.id.get_index()].get_centre();
					let to_centre = areas[target.get_index()].get_centre();
					let length = connection
						.length
						.unwrap_or_else(|| from_centre.distance(to_centre));
					let height_change = connection
						.height_change
						.unwrap_or(to_centre.z - from_centre.z);
					if !length.is_finite() || length < 0.0 || !height_change.is_finite() {
						return Err(NavMeshError::InvalidConnection {
							from: record.id,
							to: target,
						});
					}
					areas[record.id.get_index()].add_connection(
						ordinal,
						AreaConnection::new(target, length, height_change),
					);
					areas[target.get_index()].add_incoming(
						ordinal.opposite(),
						AreaConnection::new(record.id, length, height_change),
					);
				}
			}
		}
		debug!("Loaded navigation mesh of {} areas", areas.len());
		let area_count = areas.len();
		Ok(NavMesh {
			areas,
			incursion_fields: [DistanceField::new(area_count), DistanceField::new(area_count)],
			bomb_target_field: DistanceField::new(area_count),
			..Default::default()
		})
	}
	/// From a `ron` file generate the [NavMesh]
	#[cfg(feature = "ron")]
	pub fn from_ron(path: &str) -> Result<Self, NavMeshError> {
		let file = std::fs::File::open(path)?;
		let data: NavMeshFile =
			ron::de::from_reader(file).map_err(|e| NavMeshError::Deserialize(e.to_string()))?;
		NavMesh::from_file_data(data)
	}
	/// Get a reference to the Area arena
	pub fn get_areas(&self) -> &[Area] {
		&self.areas
	}
	/// Get a mutable reference to the Area arena
	pub(crate) fn get_areas_mut(&mut self) -> &mut [Area] {
		&mut self.areas
	}
	pub fn get_area(&self, id: AreaID) -> Option<&Area> {
		self.areas.get(id.get_index())
	}
	/// Get a mutable reference to an Area
	pub(crate) fn get_area_mut(&mut self, id: AreaID) -> Option<&mut Area> {
		self.areas.get_mut(id.get_index())
	}
	pub fn get_area_count(&self) -> usize {
		self.areas.len()
	}
	/// Find the Area an actor standing at `position` is on. Of the Areas whose footprint
	/// contains the position the one with the highest floor that isn't above the position by
	/// more than `max_step_height` is chosen
	pub fn get_area_at(&self, position: Vec3, max_step_height: f32) -> Option<AreaID> {
		let mut best: Option<(AreaID, f32)> = None;
		for area in self.areas.iter() {
			let extent = area.get_extent();
			if !extent.contains_xy(position) {
				continue;
			}
			let floor = extent.get_lo().z;
			if floor > position.z + max_step_height {
				continue;
			}
			match best {
				Some((_, best_floor)) if best_floor >= floor => {}
				_ => best = Some((area.get_id(), floor)),
			}
		}
		best.map(|(id, _)| id)
	}
	/// Every Area whose footprint overlaps `extent`
	pub fn get_overlapping_areas(&self, extent: &Extent) -> Vec<AreaID> {
		self.areas
			.iter()
			.filter(|a| a.get_extent().overlaps(extent))
			.map(|a| a.get_id())
			.collect()
	}
	/// Every Area carrying all of `attributes`
	pub fn get_areas_with(&self, attributes: AreaAttributes) -> Vec<AreaID> {
		self.areas
			.iter()
			.filter(|a| a.has_attributes(attributes))
			.map(|a| a.get_id())
			.collect()
	}
	pub fn get_spawn_room_areas(&self, team: Team) -> &[AreaID] {
		&self.spawn_room_areas[team.index()]
	}
	pub fn get_spawn_exit_areas(&self, team: Team) -> &[AreaID] {
		&self.spawn_exit_areas[team.index()]
	}
	pub fn get_spawn_point_areas(&self, team: Team) -> &[AreaID] {
		&self.spawn_point_areas[team.index()]
	}
	/// Replace the spawn room Areas of `team`
	pub(crate) fn set_spawn_room_areas(&mut self, team: Team, areas: BTreeSet<AreaID>) {
		self.spawn_room_areas[team.index()] = areas.into_iter().collect();
	}
	/// Replace the spawn room exits of `team`
	pub(crate) fn set_spawn_exit_areas(&mut self, team: Team, areas: BTreeSet<AreaID>) {
		self.spawn_exit_areas[team.index()] = areas.into_iter().collect();
	}
	/// Replace the Areas holding an enabled spawn point of `team`
	pub(crate) fn set_spawn_point_areas(&mut self, team: Team, areas: BTreeSet<AreaID>) {
		self.spawn_point_areas[team.index()] = areas.into_iter().collect();
	}
	/// Areas overlapped by the volume of control point `index`
	pub fn get_control_point_areas(&self, index: u8) -> &[AreaID] {
		self.control_point_areas
			.get(&index)
			.map(|areas| areas.as_slice())
			.unwrap_or(&[])
	}
	/// Replace the footprint of control point `index`
	pub(crate) fn set_control_point_areas(&mut self, index: u8, areas: BTreeSet<AreaID>) {
		self.control_point_areas
			.insert(index, areas.into_iter().collect());
	}
	pub fn get_incursion_field(&self, team: Team) -> &DistanceField {
		&self.incursion_fields[team.index()]
	}
	/// Store the labelled incursion field of `team`
	pub(crate) fn set_incursion_field(&mut self, team: Team, field: DistanceField) {
		self.incursion_fields[team.index()] = field;
	}
	pub fn get_bomb_target_field(&self) -> &DistanceField {
		&self.bomb_target_field
	}
	/// Store the labelled bomb target field
	pub(crate) fn set_bomb_target_field(&mut self, field: DistanceField) {
		self.bomb_target_field = field;
	}
	pub fn get_passes_completed(&self) -> u64 {
		self.passes_completed
	}
	/// Wipe all runtime state so a recompute pass starts from scratch
	pub(crate) fn reset_runtime_state(&mut self) {
		for area in self.areas.iter_mut() {
			area.reset_runtime_state();
		}
		for team in Team::ALL {
			self.spawn_room_areas[team.index()].clear();
			self.spawn_exit_areas[team.index()].clear();
			self.spawn_point_areas[team.index()].clear();
			self.incursion_fields[team.index()].reset(&[]);
		}
		self.control_point_areas.clear();
		self.bomb_target_field.reset(&[]);
	}
	/// Run a full recompute pass: decoration, blocking, distance fields, invasion areas and
	/// finally danger zones. The pass runs to completion, readers never observe a partially
	/// updated mesh
	pub fn recompute(
		&mut self,
		world: &WorldEntities,
		visibility: &impl VisibilityOracle,
		config: &NavConfig,
	) {
		self.reset_runtime_state();
		self.decorate(world, config);
		self.resolve_blocked_areas(world);
		self.compute_team_fields(config);
		self.compute_bomb_target_distances(world, config);
		self.compute_invasion_areas(visibility, config.get_invasion_tolerance());
		self.compute_sentry_danger(world, visibility, config);
		self.passes_completed += 1;
		debug!(
			"Recompute pass {} complete, red spawn {} exits {}, blue spawn {} exits {}",
			self.passes_completed,
			self.spawn_room_areas[Team::Red.index()].len(),
			self.spawn_exit_areas[Team::Red.index()].len(),
			self.spawn_room_areas[Team::Blue.index()].len(),
			self.spawn_exit_areas[Team::Blue.index()].len(),
		);
	}
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	use crate::navmesh::testing::*;

	#[test]
	fn load_corridor() {
		let mesh = corridor_mesh(&[100.0, 150.0]);
		assert_eq!(3, mesh.get_area_count());
		let a = mesh.get_area(AreaID::new(0)).unwrap();
		let connection = a.get_connection_to(AreaID::new(1)).unwrap();
		assert_eq!(100.0, connection.get_length());
		// the reverse link arrives on the west side of B
		let b = mesh.get_area(AreaID::new(1)).unwrap();
		assert_eq!(AreaID::new(0), b.get_incoming(Ordinal::West)[0].get_area());
	}
	#[test]
	fn derived_length() {
		let mut file = NavMeshFile::default();
		file.add_area(AreaRecord::new(0, Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 10.0, 0.0)));
		file.add_area(AreaRecord::new(1, Vec3::new(30.0, 0.0, 0.0), Vec3::new(40.0, 10.0, 0.0)));
		file.connect_one_way(0, 1, None);
		let mesh = NavMesh::from_file_data(file).unwrap();
		let a = mesh.get_area(AreaID::new(0)).unwrap();
		assert_eq!(30.0, a.get_connections(Ordinal::East)[0].get_length());
		// one-way, B has no way back
		assert!(!mesh.get_area(AreaID::new(1)).unwrap().is_connected_to(AreaID::new(0)));
	}
	#[test]
	fn version_mismatch() {
		let file = NavMeshFile { version: NAV_MESH_VERSION + 1, ..Default::default() };
		assert!(matches!(
			NavMesh::from_file_data(file),
			Err(NavMeshError::VersionMismatch { .. })
		));
	}
	#[test]
	fn sub_version_too_new() {
		let file = NavMeshFile { sub_version: NAV_MESH_SUB_VERSION + 1, ..Default::default() };
		assert!(matches!(
			NavMesh::from_file_data(file),
			Err(NavMeshError::SubVersionMismatch { .. })
		));
	}
	#[test]
	fn older_sub_version_accepted() {
		let file = NavMeshFile { sub_version: 0, ..Default::default() };
		assert!(NavMesh::from_file_data(file).is_ok());
	}
	#[test]
	fn dangling_connection() {
		let mut file = NavMeshFile::default();
		file.add_area(
			AreaRecord::new(0, Vec3::ZERO, Vec3::new(10.0, 10.0, 0.0))
				.connect(Ordinal::East, ConnectionRecord::new(AreaID::new(7))),
		);
		assert!(matches!(
			NavMesh::from_file_data(file),
			Err(NavMeshError::DanglingConnection { .. })
		));
	}
	#[test]
	fn duplicate_area() {
		let mut file = NavMeshFile::default();
		file.add_area(AreaRecord::new(0, Vec3::ZERO, Vec3::ONE));
		file.add_area(AreaRecord::new(0, Vec3::ZERO, Vec3::ONE));
		assert!(matches!(NavMesh::from_file_data(file), Err(NavMeshError::DuplicateArea(_))));
	}
	#[test]
	fn gap_in_ids() {
		let mut file = NavMeshFile::default();
		file.add_area(AreaRecord::new(0, Vec3::ZERO, Vec3::ONE));
		file.add_area(AreaRecord::new(2, Vec3::ZERO, Vec3::ONE));
		assert!(matches!(
			NavMesh::from_file_data(file),
			Err(NavMeshError::NonContiguousAreaIds { .. })
		));
	}
	#[test]
	fn negative_length() {
		let mut file = corridor_file(&[100.0]);
		file.connect_one_way(1, 0, Some(-5.0));
		assert!(matches!(
			NavMesh::from_file_data(file),
			Err(NavMeshError::InvalidConnection { .. })
		));
	}
	#[test]
	fn inverted_extent() {
		let mut file = NavMeshFile::default();
		file.add_area(AreaRecord::new(0, Vec3::ONE, Vec3::ZERO));
		assert!(matches!(NavMesh::from_file_data(file), Err(NavMeshError::InvalidExtent(_))));
	}
	#[test]
	fn area_at_position() {
		let mesh = corridor_mesh(&[100.0, 150.0]);
		assert_eq!(Some(AreaID::new(1)), mesh.get_area_at(Vec3::new(150.0, 50.0, 0.0), DEFAULT_MAX_STEP_HEIGHT));
		assert_eq!(None, mesh.get_area_at(Vec3::new(-50.0, 50.0, 0.0), DEFAULT_MAX_STEP_HEIGHT));
	}
	#[test]
	fn area_at_prefers_highest_floor_below() {
		let mut file = NavMeshFile::default();
		file.add_area(AreaRecord::new(0, Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 10.0, 0.0)));
		file.add_area(AreaRecord::new(1, Vec3::new(0.0, 0.0, 200.0), Vec3::new(10.0, 10.0, 200.0)));
		let mesh = NavMesh::from_file_data(file).unwrap();
		assert_eq!(Some(AreaID::new(0)), mesh.get_area_at(Vec3::new(5.0, 5.0, 10.0), DEFAULT_MAX_STEP_HEIGHT));
		assert_eq!(Some(AreaID::new(1)), mesh.get_area_at(Vec3::new(5.0, 5.0, 210.0), DEFAULT_MAX_STEP_HEIGHT));
	}
	#[test]
	fn area_at_honours_step_height() {
		let mut file = NavMeshFile::default();
		file.add_area(AreaRecord::new(0, Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 10.0, 0.0)));
		file.add_area(AreaRecord::new(1, Vec3::new(0.0, 0.0, 100.0), Vec3::new(10.0, 10.0, 100.0)));
		let mesh = NavMesh::from_file_data(file).unwrap();
		// a ledge 60 up is within the default step but not a short one
		let position = Vec3::new(5.0, 5.0, 40.0);
		assert_eq!(Some(AreaID::new(1)), mesh.get_area_at(position, DEFAULT_MAX_STEP_HEIGHT));
		assert_eq!(Some(AreaID::new(0)), mesh.get_area_at(position, 18.0));
	}
}

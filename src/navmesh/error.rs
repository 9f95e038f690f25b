//! Failures which prevent a [crate::prelude::NavMesh] from becoming available.
//!
//! Anything going wrong at runtime (missing spawn rooms, ambiguous blockers) is recovered from
//! locally and logged instead, only bad input data surfaces as an error
//!

use crate::prelude::*;

/// Reasons a mesh, visibility table or config could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum NavMeshError {
	/// A file could not be opened or read
	#[error("Failed reading navigation data: {0}")]
	Io(#[from] std::io::Error),

	/// A file was read but its contents could not be parsed
	#[error("Failed deserializing navigation data: {0}")]
	Deserialize(String),

	/// The mesh file was written by an incompatible version
	#[error("Navigation mesh version {found} is not supported, expected {expected}")]
	VersionMismatch {
		/// Version in the file
		found: u32,
		/// Version this crate reads
		expected: u32,
	},

	/// The mesh file uses a newer sub-version than this crate understands
	#[error("Navigation mesh sub-version {found} is newer than the supported {supported}")]
	SubVersionMismatch {
		/// Sub-version in the file
		found: u32,
		/// Newest sub-version this crate reads
		supported: u32,
	},

	/// Two records share an ID
	#[error("Area {0:?} appears more than once")]
	DuplicateArea(AreaID),

	/// The IDs have a gap so they can't be used as arena indices
	#[error("Area IDs must be contiguous from zero, expected {expected:?} but found {found:?}")]
	NonContiguousAreaIds {
		/// The next ID in sequence
		expected: AreaID,
		/// The ID found in its place
		found: AreaID,
	},

	/// A link points at an Area which isn't in the file
	#[error("Area {from:?} has a connection to non-existent area {to:?}")]
	DanglingConnection {
		/// Area owning the link
		from: AreaID,
		/// Missing destination
		to: AreaID,
	},

	/// A link has a negative or non-finite length or height change
	#[error("Connection from area {from:?} to {to:?} has an invalid length")]
	InvalidConnection {
		/// Area owning the link
		from: AreaID,
		/// Destination of the link
		to: AreaID,
	},

	/// An Area has inverted or non-finite corners
	#[error("Area {0:?} has an invalid extent")]
	InvalidExtent(AreaID),

	/// A [NavConfig] value is out of range
	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_versions() {
		let e = NavMeshError::VersionMismatch { found: 15, expected: 16 };
		assert_eq!("Navigation mesh version 15 is not supported, expected 16", e.to_string());
		let e = NavMeshError::SubVersionMismatch { found: 3, supported: 1 };
		assert_eq!("Navigation mesh sub-version 3 is newer than the supported 1", e.to_string());
	}
	#[test]
	fn io_errors_convert() {
		let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
		let e: NavMeshError = io.into();
		assert!(matches!(e, NavMeshError::Io(_)));
		assert_eq!("Failed reading navigation data: gone", e.to_string());
	}
}

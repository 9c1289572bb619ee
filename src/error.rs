//! Crate-level error types.

use std::fmt;

use crate::mesh::{ModelId, ObjectId};

/// Errors produced by the mesh-subset crate.
#[derive(Debug)]
pub enum SubsetError {
    /// The object ID has no entry in the object index map.
    NotFound {
        /// The object that was requested.
        object_id: ObjectId,
    },
    /// The picked object does not belong to any registered model.
    ModelNotFound {
        /// The model reference carried by the hit.
        model: ModelId,
    },
    /// The mesh has no index buffer.
    UnindexedGeometry,
    /// Mesh buffers are inconsistent (length mismatch, out-of-range index or
    /// material group).
    MalformedGeometry(String),
    /// A triangle index past the end of the index buffer.
    TriangleOutOfRange {
        /// The triangle that was requested.
        triangle_index: u32,
        /// Number of triangles in the index buffer.
        triangle_count: u32,
    },
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for SubsetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { object_id } => {
                write!(f, "no index ranges for object {object_id}")
            }
            Self::ModelNotFound { model } => {
                write!(f, "picked item does not belong to a model ({model})")
            }
            Self::UnindexedGeometry => {
                write!(f, "mesh geometry is not indexed")
            }
            Self::MalformedGeometry(msg) => {
                write!(f, "malformed geometry: {msg}")
            }
            Self::TriangleOutOfRange {
                triangle_index,
                triangle_count,
            } => write!(
                f,
                "triangle {triangle_index} out of range ({triangle_count} \
                 triangles)"
            ),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for SubsetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SubsetError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_object() {
        let err = SubsetError::NotFound { object_id: 42 };
        assert_eq!(err.to_string(), "no index ranges for object 42");
    }

    #[test]
    fn io_error_is_the_source() {
        use std::error::Error;

        let err = SubsetError::from(std::io::Error::other("disk"));
        assert!(err.source().is_some());
        assert!(SubsetError::UnindexedGeometry.source().is_none());
    }
}

//! Source mesh and extracted sub-mesh data.
//!
//! A [`Mesh`] is one merged, GPU-friendly triangle buffer holding many
//! logical objects. Every vertex carries the [`ObjectId`] of the object it
//! belongs to, and the index buffer is partitioned into [`MaterialGroup`]s.
//! Meshes are immutable once built; each one gets a process-unique
//! [`MeshId`] that downstream caches use as its identity.

#[cfg(test)]
pub(crate) mod fixtures;
mod submesh;

use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec3;
pub use submesh::SubMesh;

use crate::error::SubsetError;

/// Per-vertex tag naming the logical object a vertex belongs to.
pub type ObjectId = u32;

/// Material slot of a [`MaterialGroup`].
pub type MaterialId = u32;

/// Reference to a loaded model, as carried by ray-cast hits.
pub type ModelId = u32;

static NEXT_MESH_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a [`Mesh`] instance, assigned at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(u64);

impl MeshId {
    fn fresh() -> Self {
        Self(NEXT_MESH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A contiguous sub-range of the index buffer drawn with one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialGroup {
    /// Material slot used for this range.
    pub material_id: MaterialId,
    /// First index-buffer offset of the group.
    pub start: u32,
    /// Number of index-buffer entries in the group.
    pub count: u32,
}

impl MaterialGroup {
    /// Create a group covering `count` indices starting at `start`.
    #[must_use]
    pub const fn new(material_id: MaterialId, start: u32, count: u32) -> Self {
        Self {
            material_id,
            start,
            count,
        }
    }

    /// One past the last offset of the group. Groups of a [`Mesh`] are
    /// checked not to overflow.
    #[must_use]
    pub const fn end_exclusive(&self) -> u32 {
        self.start + self.count
    }
}

/// Raw buffers handed to [`Mesh::new`].
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Vertex normals, aligned with `positions`.
    pub normals: Vec<Vec3>,
    /// Triangle-list index buffer, `None` for non-indexed geometry.
    pub indices: Option<Vec<u32>>,
    /// Per-vertex object IDs, aligned with `positions`.
    pub object_ids: Vec<ObjectId>,
    /// Material partition of the index buffer.
    pub groups: Vec<MaterialGroup>,
}

/// Immutable merged triangle mesh.
///
/// Within one material group the indices of each object are expected to be
/// contiguous. That ordering is a precondition of
/// [`scan`](crate::scan::scan) and is not checked here.
#[derive(Debug, Clone)]
pub struct Mesh {
    id: MeshId,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Option<Vec<u32>>,
    object_ids: Vec<ObjectId>,
    groups: Vec<MaterialGroup>,
}

impl Mesh {
    /// Validate the buffers and build a mesh.
    ///
    /// Fails with [`SubsetError::MalformedGeometry`] when normals or object
    /// IDs are not aligned with positions, when an index refers past the
    /// last vertex, or when a material group runs past the index buffer.
    pub fn new(data: MeshData) -> Result<Self, SubsetError> {
        let MeshData {
            positions,
            normals,
            indices,
            object_ids,
            groups,
        } = data;

        let vertex_count = positions.len();
        if normals.len() != vertex_count {
            return Err(SubsetError::MalformedGeometry(format!(
                "{} normals for {vertex_count} positions",
                normals.len()
            )));
        }
        if object_ids.len() != vertex_count {
            return Err(SubsetError::MalformedGeometry(format!(
                "{} object ids for {vertex_count} positions",
                object_ids.len()
            )));
        }

        if let Some(indices) = &indices {
            if let Some((offset, &index)) = indices
                .iter()
                .enumerate()
                .find(|&(_, &i)| i as usize >= vertex_count)
            {
                return Err(SubsetError::MalformedGeometry(format!(
                    "index {index} at offset {offset} exceeds vertex count \
                     {vertex_count}"
                )));
            }
            validate_groups(&groups, indices.len())?;
        }

        Ok(Self {
            id: MeshId::fresh(),
            positions,
            normals,
            indices,
            object_ids,
            groups,
        })
    }

    /// Identity of this mesh.
    #[must_use]
    pub fn id(&self) -> MeshId {
        self.id
    }

    /// Vertex positions.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Vertex normals.
    #[must_use]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// The index buffer, if the geometry is indexed.
    #[must_use]
    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    /// The index buffer, or [`SubsetError::UnindexedGeometry`].
    pub fn require_indices(&self) -> Result<&[u32], SubsetError> {
        self.indices().ok_or(SubsetError::UnindexedGeometry)
    }

    /// Per-vertex object IDs.
    #[must_use]
    pub fn object_ids(&self) -> &[ObjectId] {
        &self.object_ids
    }

    /// Material groups in index-buffer order.
    #[must_use]
    pub fn groups(&self) -> &[MaterialGroup] {
        &self.groups
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of whole triangles in the index buffer (0 if unindexed).
    #[must_use]
    pub fn triangle_count(&self) -> u32 {
        self.indices().map_or(0, |i| (i.len() / 3) as u32)
    }

    /// Object ID of the triangle at `triangle_index`, taken from its first
    /// vertex.
    pub fn object_id_at_triangle(
        &self,
        triangle_index: u32,
    ) -> Result<ObjectId, SubsetError> {
        let indices = self.require_indices()?;
        let offset = triangle_index as usize * 3;
        indices
            .get(offset..offset + 3)
            .and_then(|tri| self.object_ids.get(tri[0] as usize))
            .copied()
            .ok_or_else(|| SubsetError::TriangleOutOfRange {
                triangle_index,
                triangle_count: self.triangle_count(),
            })
    }
}

/// Groups must lie inside the index buffer. Gaps or overlaps between groups
/// only get a warning since scanning tolerates them.
fn validate_groups(
    groups: &[MaterialGroup],
    index_count: usize,
) -> Result<(), SubsetError> {
    let mut expected_start = 0u32;
    for group in groups {
        let end = group
            .start
            .checked_add(group.count)
            .filter(|&end| end as usize <= index_count)
            .ok_or_else(|| {
                SubsetError::MalformedGeometry(format!(
                    "material {} group of {} indices at {} exceeds index \
                     count {index_count}",
                    group.material_id, group.count, group.start
                ))
            })?;
        if group.start != expected_start {
            log::warn!(
                "material {} group starts at {} (expected {expected_start})",
                group.material_id,
                group.start
            );
        }
        expected_start = end;
    }
    if expected_start as usize != index_count {
        log::warn!(
            "material groups end at {expected_start}, index buffer has \
             {index_count} entries"
        );
    }
    Ok(())
}

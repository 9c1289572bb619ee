use glam::Vec3;

/// Independently indexed copy of one object's geometry.
///
/// Owns its buffers; nothing aliases the source [`Mesh`](super::Mesh).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubMesh {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
    gap_count: usize,
}

impl SubMesh {
    /// Assemble a sub-mesh from already renumbered buffers. `gap_count` is
    /// the number of attribute slots no index wrote to.
    #[must_use]
    pub fn new(
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        indices: Vec<u32>,
        gap_count: usize,
    ) -> Self {
        Self {
            positions,
            normals,
            indices,
            gap_count,
        }
    }

    /// Vertex positions, one per local slot.
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Vertex normals, one per local slot.
    #[must_use]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Zero-based local index buffer.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of attribute slots.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Slots that were sized for but never written; they hold zero vectors.
    #[must_use]
    pub fn gap_count(&self) -> usize {
        self.gap_count
    }

    /// Whether the sub-mesh holds no indices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Position bytes ready for a vertex-buffer upload.
    #[must_use]
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normal bytes ready for a vertex-buffer upload.
    #[must_use]
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Index bytes ready for an index-buffer upload.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Consume the sub-mesh, returning `(positions, normals, indices)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Vec3>, Vec<Vec3>, Vec<u32>) {
        (self.positions, self.normals, self.indices)
    }
}

//! Hand-built meshes shared by the unit tests.

use glam::Vec3;

use super::{MaterialGroup, Mesh, MeshData, ObjectId};

/// Material slot of the first group in [`two_material_mesh`].
pub(crate) const MATERIAL_A: u32 = 0;
/// Material slot of the second group in [`two_material_mesh`].
pub(crate) const MATERIAL_B: u32 = 1;

/// Seven unshared triangles (21 vertices, identity index buffer) tagged per
/// triangle with objects `[1, 1, 1, 2 | 2, 1, 1]`. Material A covers
/// triangles 0-3, material B triangles 4-6.
pub(crate) fn two_material_mesh() -> Mesh {
    let per_triangle: [ObjectId; 7] = [1, 1, 1, 2, 2, 1, 1];
    let object_ids = per_triangle
        .iter()
        .flat_map(|&id| [id; 3])
        .collect::<Vec<_>>();
    let positions = (0..21).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
    let normals = (0..21).map(|i| Vec3::new(0.0, i as f32, 1.0)).collect();

    Mesh::new(MeshData {
        positions,
        normals,
        indices: Some((0..21).collect()),
        object_ids,
        groups: vec![
            MaterialGroup::new(MATERIAL_A, 0, 12),
            MaterialGroup::new(MATERIAL_B, 12, 9),
        ],
    })
    .unwrap()
}

/// Build a single-material mesh from explicit indices and per-vertex object
/// IDs. Positions encode the vertex index in `x` so extracted slots can be
/// traced back to their source vertex.
pub(crate) fn indexed_mesh(
    indices: Vec<u32>,
    object_ids: Vec<ObjectId>,
) -> Mesh {
    let count = indices.len() as u32;
    let vertex_count = object_ids.len();
    Mesh::new(MeshData {
        positions: (0..vertex_count)
            .map(|i| Vec3::new(i as f32, 1.0, 0.0))
            .collect(),
        normals: vec![Vec3::Z; vertex_count],
        indices: Some(indices),
        object_ids,
        groups: vec![MaterialGroup::new(MATERIAL_A, 0, count)],
    })
    .unwrap()
}

/// A single triangle without an index buffer.
pub(crate) fn unindexed_mesh() -> Mesh {
    Mesh::new(MeshData {
        positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
        normals: vec![Vec3::Z; 3],
        indices: None,
        object_ids: vec![1, 1, 1],
        groups: Vec::new(),
    })
    .unwrap()
}

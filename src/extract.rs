//! Highlight sub-mesh extraction.
//!
//! [`extract`] copies the geometry of one object out of a merged [`Mesh`]
//! into a standalone [`SubMesh`] with its own zero-based index buffer.
//!
//! Renumbering is done per range: each range is shifted down by its own
//! smallest vertex index, then up by the number of indices already emitted
//! for previous materials. Ranges of the same material therefore share the
//! same local origin. When a range's vertices are not densely packed above
//! its minimum, some slots are never written ("gaps"); when two ranges of
//! the same material land on the same slot, the first write wins.
//! [`GapPolicy::Compact`] swaps this scheme for dense first-use numbering.

use std::collections::hash_map::Entry;

use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::error::SubsetError;
use crate::mesh::{Mesh, ObjectId, SubMesh};
use crate::options::{ExtractOptions, GapPolicy};
use crate::scan::{IndexRange, MaterialRanges, ObjectIndexMap};

/// Extract `object_id` from `mesh` using the default (gap-preserving)
/// policy.
///
/// Fails with [`SubsetError::UnindexedGeometry`] if the mesh has no index
/// buffer, [`SubsetError::NotFound`] if the object has no ranges in `map`
/// and [`SubsetError::MalformedGeometry`] if one of its ranges lies past the
/// end of the index buffer (a map scanned from another mesh). Nothing is
/// allocated on failure.
pub fn extract(
    mesh: &Mesh,
    map: &ObjectIndexMap,
    object_id: ObjectId,
) -> Result<SubMesh, SubsetError> {
    extract_with(mesh, map, object_id, ExtractOptions::default())
}

/// Extract `object_id` from `mesh` with explicit options.
pub fn extract_with(
    mesh: &Mesh,
    map: &ObjectIndexMap,
    object_id: ObjectId,
    options: ExtractOptions,
) -> Result<SubMesh, SubsetError> {
    let indices = mesh.require_indices()?;
    let materials = map
        .get(object_id)
        .ok_or(SubsetError::NotFound { object_id })?;
    for range in materials.values().flatten() {
        let _ = range_indices(indices, *range, object_id)?;
    }
    let index_count = map.index_count(object_id);

    let sub = match options.gap_policy {
        GapPolicy::Preserve => extract_preserving(
            mesh,
            indices,
            materials,
            object_id,
            index_count,
        )?,
        GapPolicy::Compact => {
            extract_compact(mesh, indices, materials, object_id, index_count)?
        }
    };

    log::debug!(
        "extracted object {object_id}: {} indices, {} vertices, {} gaps",
        sub.indices().len(),
        sub.vertex_count(),
        sub.gap_count()
    );
    Ok(sub)
}

/// The index-buffer entries covered by `range`.
///
/// A map scanned from a different, larger mesh can hold ranges past the end
/// of this index buffer; those are reported instead of indexed.
fn range_indices(
    indices: &[u32],
    range: IndexRange,
    object_id: ObjectId,
) -> Result<&[u32], SubsetError> {
    indices.get(range.offsets()).ok_or_else(|| {
        SubsetError::MalformedGeometry(format!(
            "range {}..={} of object {object_id} exceeds index count {} \
             (stale index map)",
            range.start,
            range.end,
            indices.len()
        ))
    })
}

/// Attribute slots written at arbitrary positions, growing on demand.
#[derive(Default)]
struct SlotWriter {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    written: Vec<bool>,
}

impl SlotWriter {
    /// Copy the attributes of source vertex `source` into `slot` unless the
    /// slot already holds a vertex. `source` comes from a validated index
    /// buffer, so it is below the mesh's vertex count.
    fn write(&mut self, slot: usize, source: usize, mesh: &Mesh) {
        if slot >= self.written.len() {
            self.positions.resize(slot + 1, Vec3::ZERO);
            self.normals.resize(slot + 1, Vec3::ZERO);
            self.written.resize(slot + 1, false);
        }
        if self.written[slot] {
            return;
        }
        self.positions[slot] = mesh.positions()[source];
        self.normals[slot] = mesh.normals()[source];
        self.written[slot] = true;
    }

    fn finish(self, indices: Vec<u32>) -> SubMesh {
        let gap_count = self.written.iter().filter(|w| !**w).count();
        SubMesh::new(self.positions, self.normals, indices, gap_count)
    }
}

fn extract_preserving(
    mesh: &Mesh,
    indices: &[u32],
    materials: &MaterialRanges,
    object_id: ObjectId,
    index_count: usize,
) -> Result<SubMesh, SubsetError> {
    let mut out_indices = Vec::with_capacity(index_count);
    let mut slots = SlotWriter::default();
    let mut local_origin = 0u32;

    for ranges in materials.values() {
        for range in ranges {
            let sources = range_indices(indices, *range, object_id)?;
            let Some(&base) = sources.iter().min() else {
                continue;
            };
            for &source in sources {
                let slot = source - base + local_origin;
                out_indices.push(slot);
                slots.write(slot as usize, source as usize, mesh);
            }
        }
        local_origin = out_indices.len() as u32;
    }

    Ok(slots.finish(out_indices))
}

fn extract_compact(
    mesh: &Mesh,
    indices: &[u32],
    materials: &MaterialRanges,
    object_id: ObjectId,
    index_count: usize,
) -> Result<SubMesh, SubsetError> {
    let mut out_indices = Vec::with_capacity(index_count);
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut remap: FxHashMap<u32, u32> = FxHashMap::default();

    for range in materials.values().flatten() {
        for &source in range_indices(indices, *range, object_id)? {
            let slot = match remap.entry(source) {
                Entry::Occupied(e) => *e.get(),
                Entry::Vacant(e) => {
                    let slot = positions.len() as u32;
                    positions.push(mesh.positions()[source as usize]);
                    normals.push(mesh.normals()[source as usize]);
                    *e.insert(slot)
                }
            };
            out_indices.push(slot);
        }
    }

    Ok(SubMesh::new(positions, normals, out_indices, 0))
}

//! Per-object index ranges of a merged mesh.
//!
//! [`scan`] walks each material group of the index buffer once and records
//! every run of consecutive indices whose vertices share an object ID. The
//! result is an [`ObjectIndexMap`]: object ID → material ID → ordered list
//! of inclusive [`IndexRange`]s.
//!
//! The scanner never reorders anything. It relies on the mesh having each
//! object's indices contiguous within a material group; if they are not,
//! the object simply ends up with more (smaller) ranges.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use rustc_hash::FxHashMap;

use crate::error::SubsetError;
use crate::mesh::{MaterialGroup, MaterialId, Mesh, ObjectId};

/// Inclusive range of index-buffer offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexRange {
    /// First offset.
    pub start: u32,
    /// Last offset (inclusive).
    pub end: u32,
}

impl IndexRange {
    /// Create a range covering `start..=end`.
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Number of offsets covered.
    #[must_use]
    pub const fn count(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    /// Offsets as a `usize` range for slicing the index buffer.
    #[must_use]
    pub const fn offsets(&self) -> RangeInclusive<usize> {
        self.start as usize..=self.end as usize
    }
}

/// Index ranges of one object, keyed by material.
pub type MaterialRanges = BTreeMap<MaterialId, Vec<IndexRange>>;

/// Object ID → material ID → ordered index ranges.
///
/// Built by [`scan`], read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectIndexMap {
    objects: FxHashMap<ObjectId, MaterialRanges>,
    range_count: usize,
}

impl ObjectIndexMap {
    /// All ranges of `object_id`, or `None` if the object never appears.
    #[must_use]
    pub fn get(&self, object_id: ObjectId) -> Option<&MaterialRanges> {
        self.objects.get(&object_id)
    }

    /// Ranges of `object_id` drawn with `material_id` (empty if none).
    #[must_use]
    pub fn ranges(
        &self,
        object_id: ObjectId,
        material_id: MaterialId,
    ) -> &[IndexRange] {
        self.get(object_id)
            .and_then(|materials| materials.get(&material_id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `object_id` has at least one range.
    #[must_use]
    pub fn contains(&self, object_id: ObjectId) -> bool {
        self.objects.contains_key(&object_id)
    }

    /// Object IDs present in the map, in no particular order.
    pub fn object_ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.keys().copied()
    }

    /// Iterate over every object and its per-material ranges.
    pub fn objects(
        &self,
    ) -> impl Iterator<Item = (ObjectId, &MaterialRanges)> {
        self.objects.iter().map(|(&id, materials)| (id, materials))
    }

    /// Number of distinct objects.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Total number of ranges across all objects and materials.
    #[must_use]
    pub fn range_count(&self) -> usize {
        self.range_count
    }

    /// Whether the map holds no ranges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of index-buffer entries owned by `object_id`.
    #[must_use]
    pub fn index_count(&self, object_id: ObjectId) -> usize {
        self.get(object_id).map_or(0, |materials| {
            materials.values().flatten().map(IndexRange::count).sum()
        })
    }

    fn push(
        &mut self,
        object_id: ObjectId,
        material_id: MaterialId,
        range: IndexRange,
    ) {
        self.objects
            .entry(object_id)
            .or_default()
            .entry(material_id)
            .or_default()
            .push(range);
        self.range_count += 1;
    }
}

/// Build the [`ObjectIndexMap`] of `mesh` in one pass over its index buffer.
///
/// Fails with [`SubsetError::UnindexedGeometry`] before looking at any range
/// when the mesh has no index buffer.
pub fn scan(mesh: &Mesh) -> Result<ObjectIndexMap, SubsetError> {
    let indices = mesh.require_indices()?;
    let object_ids = mesh.object_ids();

    let mut map = ObjectIndexMap::default();
    for group in mesh.groups() {
        scan_group(&mut map, group, indices, object_ids);
    }

    log::debug!(
        "scanned {} indices: {} objects, {} ranges",
        indices.len(),
        map.object_count(),
        map.range_count()
    );
    Ok(map)
}

/// Close every run of one material group. The last run always ends at the
/// group boundary.
fn scan_group(
    map: &mut ObjectIndexMap,
    group: &MaterialGroup,
    indices: &[u32],
    object_ids: &[ObjectId],
) {
    if group.count == 0 {
        return;
    }
    let first = group.start;
    let last = group.end_exclusive() - 1;
    let object_at = |offset: u32| object_ids[indices[offset as usize] as usize];

    let mut run_start = first;
    let mut run_object = object_at(first);
    for offset in first + 1..=last {
        let object = object_at(offset);
        if object == run_object {
            continue;
        }
        map.push(
            run_object,
            group.material_id,
            IndexRange::new(run_start, offset - 1),
        );
        run_start = offset;
        run_object = object;
    }
    map.push(run_object, group.material_id, IndexRange::new(run_start, last));
}

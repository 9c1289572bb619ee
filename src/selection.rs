//! The single highlighted selection.
//!
//! [`SelectionTracker`] owns the one sub-mesh currently shown as a highlight
//! and swaps it through a [`HighlightPresenter`]. It also memoizes the
//! [`ObjectIndexMap`] of every mesh it has picked from, keyed by
//! [`MeshId`], so hovering across a large model scans it only once.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::SubsetError;
use crate::extract::extract_with;
use crate::mesh::{Mesh, MeshId, ModelId, ObjectId, SubMesh};
use crate::options::{
    ExtractOptions, HighlightStyle, Options, SelectionOptions,
};
use crate::scan::{scan, ObjectIndexMap};

/// A resolved pick: which object of which model, hit through which
/// triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick {
    /// Model the hit geometry belongs to.
    pub model: ModelId,
    /// Object resolved from the hit.
    pub object_id: ObjectId,
    /// Triangle reported by the ray cast.
    pub face_index: u32,
}

/// The highlighted object and its owned overlay geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    model: ModelId,
    object_id: ObjectId,
    sub_mesh: SubMesh,
    style: HighlightStyle,
}

impl Selection {
    /// Model the selection was picked from.
    #[must_use]
    pub fn model(&self) -> ModelId {
        self.model
    }

    /// Selected object.
    #[must_use]
    pub fn object_id(&self) -> ObjectId {
        self.object_id
    }

    /// Overlay geometry.
    #[must_use]
    pub fn sub_mesh(&self) -> &SubMesh {
        &self.sub_mesh
    }

    /// Overlay style.
    #[must_use]
    pub fn style(&self) -> &HighlightStyle {
        &self.style
    }
}

/// Presentation layer that turns selections into drawable overlays.
pub trait HighlightPresenter {
    /// Start drawing `selection`.
    fn attach(&mut self, selection: &Selection);
    /// Stop drawing `selection` and release whatever was built for it.
    fn detach(&mut self, selection: &Selection);
}

/// What a call to [`SelectionTracker::select`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Same triangle as the previous pick; nothing was done.
    SameFace,
    /// The object is already highlighted and replacement is disabled.
    Kept,
    /// A new highlight replaced the previous one (if any).
    Highlighted,
}

/// Owner of the current highlight and the per-mesh index map cache.
///
/// Mesh IDs are never reused, so a cached map outlives the mesh it was
/// scanned from until [`invalidate`](Self::invalidate) or
/// [`clear_cache`](Self::clear_cache) drops it. Whoever unloads a model
/// should invalidate its mesh; [`ItemSelector::remove_model`] does this for
/// a [`ModelSet`].
///
/// [`ItemSelector::remove_model`]: crate::picking::ItemSelector::remove_model
/// [`ModelSet`]: crate::picking::ModelSet
#[derive(Debug, Default)]
pub struct SelectionTracker {
    options: SelectionOptions,
    extract: ExtractOptions,
    style: HighlightStyle,
    current: Option<Selection>,
    last_face: Option<(ModelId, u32)>,
    maps: FxHashMap<MeshId, Arc<ObjectIndexMap>>,
}

impl SelectionTracker {
    /// Create an empty tracker configured from `options`.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            options: options.selection.clone(),
            extract: options.extract,
            style: options.highlight.clone(),
            current: None,
            last_face: None,
            maps: FxHashMap::default(),
        }
    }

    /// Highlight `pick.object_id` from `mesh`.
    ///
    /// Repeating the previous pick's triangle is a no-op. Otherwise the
    /// sub-mesh is built first; only when that succeeds is the previous
    /// highlight detached and the new one attached. On error nothing about
    /// the selection changes.
    pub fn select(
        &mut self,
        pick: Pick,
        mesh: &Mesh,
        presenter: &mut impl HighlightPresenter,
    ) -> Result<SelectOutcome, SubsetError> {
        let face = (pick.model, pick.face_index);
        if self.is_repeat(pick.model, pick.face_index) {
            return Ok(SelectOutcome::SameFace);
        }

        if !self.options.remove_previous && self.is_selected(&pick) {
            self.last_face = Some(face);
            return Ok(SelectOutcome::Kept);
        }

        let map = self.index_map(mesh)?;
        let sub_mesh =
            extract_with(mesh, &map, pick.object_id, self.extract)?;
        let next = Selection {
            model: pick.model,
            object_id: pick.object_id,
            sub_mesh,
            style: self.style.clone(),
        };

        if let Some(previous) = self.current.take() {
            presenter.detach(&previous);
        }
        presenter.attach(&next);
        log::debug!(
            "highlighting object {} of model {} (face {})",
            next.object_id,
            next.model,
            pick.face_index
        );
        self.current = Some(next);
        self.last_face = Some(face);
        Ok(SelectOutcome::Highlighted)
    }

    /// Detach the current highlight. Returns `true` if there was one.
    pub fn clear(&mut self, presenter: &mut impl HighlightPresenter) -> bool {
        self.last_face = None;
        self.current.take().is_some_and(|previous| {
            presenter.detach(&previous);
            true
        })
    }

    /// Whether a pick through `face_index` of `model` would repeat the last
    /// successful pick.
    #[must_use]
    pub fn is_repeat(&self, model: ModelId, face_index: u32) -> bool {
        self.last_face == Some((model, face_index))
    }

    /// The current highlight, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    /// Object of the current highlight, if any.
    #[must_use]
    pub fn current_object_id(&self) -> Option<ObjectId> {
        self.current.as_ref().map(Selection::object_id)
    }

    /// Index map of `mesh`, from the cache when enabled.
    ///
    /// The map is shared, so callers may extract from it independently of
    /// the tracker.
    pub fn index_map(
        &mut self,
        mesh: &Mesh,
    ) -> Result<Arc<ObjectIndexMap>, SubsetError> {
        if !self.options.cache_index_maps {
            return scan(mesh).map(Arc::new);
        }
        if let Some(map) = self.maps.get(&mesh.id()) {
            return Ok(Arc::clone(map));
        }
        let map = Arc::new(scan(mesh)?);
        let _ = self.maps.insert(mesh.id(), Arc::clone(&map));
        log::debug!("cached index map for {:?}", mesh.id());
        Ok(map)
    }

    /// Drop the cached map of one mesh. Returns `true` if it was cached.
    pub fn invalidate(&mut self, mesh_id: MeshId) -> bool {
        self.maps.remove(&mesh_id).is_some()
    }

    /// Drop every cached map.
    pub fn clear_cache(&mut self) {
        self.maps.clear();
    }

    /// Number of meshes with a cached map.
    #[must_use]
    pub fn cached_maps(&self) -> usize {
        self.maps.len()
    }

    fn is_selected(&self, pick: &Pick) -> bool {
        self.current.as_ref().is_some_and(|current| {
            current.model == pick.model && current.object_id == pick.object_id
        })
    }
}

use rustc_hash::FxHashMap;

use crate::error::SubsetError;
use crate::mesh::{Mesh, ModelId, ObjectId};

/// Pointer position handed to the ray caster, in normalized device
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    /// Horizontal position, `-1.0` (left) to `1.0` (right).
    pub x: f32,
    /// Vertical position, `-1.0` (bottom) to `1.0` (top).
    pub y: f32,
}

/// One ray-cast intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Model owning the intersected geometry.
    pub model: ModelId,
    /// Intersected triangle of that model's mesh.
    pub triangle_index: u32,
    /// Distance from the ray origin.
    pub distance: f32,
}

/// Casts a ray through the pointer and reports the intersections.
pub trait RayCaster {
    /// Intersections ordered nearest first. Only the first one is used.
    fn cast(&self, event: &PointerEvent) -> Vec<Hit>;
}

/// Loaded models the pointer can hit.
pub trait ModelRegistry {
    /// Mesh of `model`, or [`SubsetError::ModelNotFound`].
    fn find_model(&self, model: ModelId) -> Result<&Mesh, SubsetError>;
}

/// Maps a hit triangle to the object it belongs to.
pub trait IdResolver {
    /// Object owning `triangle_index` of `mesh`.
    fn resolve_object_id(
        &self,
        mesh: &Mesh,
        triangle_index: u32,
    ) -> Result<ObjectId, SubsetError>;
}

/// Reads the object ID stored on the hit triangle's first vertex.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshIdResolver;

impl IdResolver for MeshIdResolver {
    fn resolve_object_id(
        &self,
        mesh: &Mesh,
        triangle_index: u32,
    ) -> Result<ObjectId, SubsetError> {
        mesh.object_id_at_triangle(triangle_index)
    }
}

/// In-memory [`ModelRegistry`].
#[derive(Debug, Clone, Default)]
pub struct ModelSet {
    models: FxHashMap<ModelId, Mesh>,
}

impl ModelSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `mesh` under `model`, returning the mesh it replaced.
    pub fn insert(&mut self, model: ModelId, mesh: Mesh) -> Option<Mesh> {
        self.models.insert(model, mesh)
    }

    /// Unregister `model`.
    pub fn remove(&mut self, model: ModelId) -> Option<Mesh> {
        self.models.remove(&model)
    }

    /// Number of registered models.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether no model is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl ModelRegistry for ModelSet {
    fn find_model(&self, model: ModelId) -> Result<&Mesh, SubsetError> {
        self.models
            .get(&model)
            .ok_or(SubsetError::ModelNotFound { model })
    }
}

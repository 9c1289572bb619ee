use super::collaborators::{
    IdResolver, MeshIdResolver, ModelRegistry, ModelSet, PointerEvent,
    RayCaster,
};
use crate::error::SubsetError;
use crate::mesh::{Mesh, ModelId};
use crate::selection::{
    HighlightPresenter, Pick, SelectOutcome, SelectionTracker,
};

/// Result of [`ItemSelector::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// The ray hit nothing.
    Miss,
    /// The nearest hit was handed to the selection tracker.
    Picked(SelectOutcome),
}

/// Pointer-driven selection over a set of models.
pub struct ItemSelector<R, M, I = MeshIdResolver> {
    ray_caster: R,
    models: M,
    resolver: I,
    tracker: SelectionTracker,
}

impl<R: RayCaster, M: ModelRegistry> ItemSelector<R, M> {
    /// Selector resolving object IDs from the meshes themselves.
    #[must_use]
    pub fn new(ray_caster: R, models: M, tracker: SelectionTracker) -> Self {
        Self::with_resolver(ray_caster, models, MeshIdResolver, tracker)
    }
}

impl<R: RayCaster, M: ModelRegistry, I: IdResolver> ItemSelector<R, M, I> {
    /// Selector with a custom object-ID resolver.
    #[must_use]
    pub fn with_resolver(
        ray_caster: R,
        models: M,
        resolver: I,
        tracker: SelectionTracker,
    ) -> Self {
        Self {
            ray_caster,
            models,
            resolver,
            tracker,
        }
    }

    /// Highlight the object under the pointer.
    ///
    /// Only the nearest hit counts. A hit on the same triangle as the last
    /// successful pick returns before the model lookup and ID resolution.
    /// Errors from the registry, the resolver or the tracker propagate with
    /// the selection unchanged.
    pub fn select(
        &mut self,
        event: &PointerEvent,
        presenter: &mut impl HighlightPresenter,
    ) -> Result<PickOutcome, SubsetError> {
        let hits = self.ray_caster.cast(event);
        let Some(hit) = hits.first() else {
            return Ok(PickOutcome::Miss);
        };
        if self.tracker.is_repeat(hit.model, hit.triangle_index) {
            return Ok(PickOutcome::Picked(SelectOutcome::SameFace));
        }

        let mesh = self.models.find_model(hit.model)?;
        let object_id =
            self.resolver.resolve_object_id(mesh, hit.triangle_index)?;
        let pick = Pick {
            model: hit.model,
            object_id,
            face_index: hit.triangle_index,
        };
        self.tracker
            .select(pick, mesh, presenter)
            .map(PickOutcome::Picked)
    }

    /// Detach the current highlight. Returns `true` if there was one.
    pub fn clear(&mut self, presenter: &mut impl HighlightPresenter) -> bool {
        self.tracker.clear(presenter)
    }

    /// The selection tracker.
    #[must_use]
    pub fn tracker(&self) -> &SelectionTracker {
        &self.tracker
    }

    /// Mutable access to the selection tracker.
    pub fn tracker_mut(&mut self) -> &mut SelectionTracker {
        &mut self.tracker
    }

    /// The model registry.
    #[must_use]
    pub fn models(&self) -> &M {
        &self.models
    }

    /// Mutable access to the model registry. Cached index maps are keyed by
    /// mesh identity, so a replaced mesh never serves a stale map, but its
    /// entry stays cached until [`SelectionTracker::invalidate`].
    pub fn models_mut(&mut self) -> &mut M {
        &mut self.models
    }
}

impl<R: RayCaster, I: IdResolver> ItemSelector<R, ModelSet, I> {
    /// Unregister a model and drop its cached index map.
    pub fn remove_model(&mut self, model: ModelId) -> Option<Mesh> {
        let mesh = self.models.remove(model)?;
        let _ = self.tracker.invalidate(mesh.id());
        Some(mesh)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::mesh::fixtures::two_material_mesh;
    use crate::mesh::ObjectId;
    use crate::picking::Hit;
    use crate::selection::Selection;

    /// Returns whatever hits the test queued last.
    #[derive(Default)]
    struct ScriptedRays {
        hits: RefCell<Vec<Hit>>,
    }

    impl ScriptedRays {
        fn aim(&self, hits: &[(u32, u32)]) {
            *self.hits.borrow_mut() = hits
                .iter()
                .enumerate()
                .map(|(i, &(model, triangle_index))| Hit {
                    model,
                    triangle_index,
                    distance: i as f32,
                })
                .collect();
        }
    }

    impl RayCaster for ScriptedRays {
        fn cast(&self, _event: &PointerEvent) -> Vec<Hit> {
            self.hits.borrow().clone()
        }
    }

    impl RayCaster for &ScriptedRays {
        fn cast(&self, event: &PointerEvent) -> Vec<Hit> {
            ScriptedRays::cast(self, event)
        }
    }

    /// Mesh resolver that counts calls.
    #[derive(Default)]
    struct CountingResolver {
        calls: Cell<usize>,
    }

    impl IdResolver for &CountingResolver {
        fn resolve_object_id(
            &self,
            mesh: &Mesh,
            triangle_index: u32,
        ) -> Result<ObjectId, SubsetError> {
            self.calls.set(self.calls.get() + 1);
            mesh.object_id_at_triangle(triangle_index)
        }
    }

    #[derive(Default)]
    struct Overlay {
        shown: Option<ObjectId>,
    }

    impl HighlightPresenter for Overlay {
        fn attach(&mut self, selection: &Selection) {
            assert!(self.shown.is_none(), "previous highlight not detached");
            self.shown = Some(selection.object_id());
        }

        fn detach(&mut self, _selection: &Selection) {
            self.shown = None;
        }
    }

    fn models() -> ModelSet {
        let mut models = ModelSet::new();
        let _ = models.insert(0, two_material_mesh());
        models
    }

    #[test]
    fn miss_changes_nothing() {
        let rays = ScriptedRays::default();
        let mut selector =
            ItemSelector::new(&rays, models(), SelectionTracker::default());
        let mut overlay = Overlay::default();

        let outcome = selector.select(&PointerEvent::default(), &mut overlay);
        assert_eq!(outcome.unwrap(), PickOutcome::Miss);
        assert!(overlay.shown.is_none());
    }

    #[test]
    fn nearest_hit_is_highlighted() {
        let rays = ScriptedRays::default();
        let mut selector =
            ItemSelector::new(&rays, models(), SelectionTracker::default());
        let mut overlay = Overlay::default();

        // Triangle 3 belongs to object 2; the farther hit is ignored.
        rays.aim(&[(0, 3), (0, 0)]);
        let outcome = selector.select(&PointerEvent::default(), &mut overlay);
        assert_eq!(
            outcome.unwrap(),
            PickOutcome::Picked(SelectOutcome::Highlighted)
        );
        assert_eq!(overlay.shown, Some(2));
        assert_eq!(selector.tracker().current_object_id(), Some(2));

        rays.aim(&[(0, 6)]);
        assert_eq!(
            selector.select(&PointerEvent::default(), &mut overlay).unwrap(),
            PickOutcome::Picked(SelectOutcome::Highlighted)
        );
        assert_eq!(overlay.shown, Some(1));
    }

    #[test]
    fn repeated_face_skips_resolution() {
        let rays = ScriptedRays::default();
        let resolver = CountingResolver::default();
        let mut selector = ItemSelector::with_resolver(
            &rays,
            models(),
            &resolver,
            SelectionTracker::default(),
        );
        let mut overlay = Overlay::default();

        rays.aim(&[(0, 1)]);
        let event = PointerEvent { x: 0.1, y: 0.2 };
        let first = selector.select(&event, &mut overlay).unwrap();
        let second = selector.select(&event, &mut overlay).unwrap();

        assert_eq!(first, PickOutcome::Picked(SelectOutcome::Highlighted));
        assert_eq!(second, PickOutcome::Picked(SelectOutcome::SameFace));
        assert_eq!(resolver.calls.get(), 1);
    }

    #[test]
    fn unknown_model_is_reported() {
        let rays = ScriptedRays::default();
        let mut selector =
            ItemSelector::new(&rays, models(), SelectionTracker::default());
        let mut overlay = Overlay::default();

        rays.aim(&[(0, 0)]);
        assert_eq!(
            selector.select(&PointerEvent::default(), &mut overlay).unwrap(),
            PickOutcome::Picked(SelectOutcome::Highlighted)
        );

        rays.aim(&[(7, 0)]);
        let result = selector.select(&PointerEvent::default(), &mut overlay);
        assert!(matches!(
            result,
            Err(SubsetError::ModelNotFound { model: 7 })
        ));
        assert_eq!(overlay.shown, Some(1));
        assert_eq!(selector.tracker().current_object_id(), Some(1));
    }

    #[test]
    fn out_of_range_triangle_is_reported() {
        let rays = ScriptedRays::default();
        let mut selector =
            ItemSelector::new(&rays, models(), SelectionTracker::default());
        let mut overlay = Overlay::default();

        rays.aim(&[(0, 100)]);
        let result = selector.select(&PointerEvent::default(), &mut overlay);
        assert!(matches!(
            result,
            Err(SubsetError::TriangleOutOfRange { .. })
        ));
        assert!(overlay.shown.is_none());
    }

    #[test]
    fn removing_a_model_drops_its_cached_map() {
        let rays = ScriptedRays::default();
        let mut selector =
            ItemSelector::new(&rays, models(), SelectionTracker::default());
        let mut overlay = Overlay::default();

        rays.aim(&[(0, 0)]);
        assert_eq!(
            selector.select(&PointerEvent::default(), &mut overlay).unwrap(),
            PickOutcome::Picked(SelectOutcome::Highlighted)
        );
        assert_eq!(selector.tracker().cached_maps(), 1);

        assert!(selector.remove_model(0).is_some());
        assert_eq!(selector.tracker().cached_maps(), 0);
        assert!(selector.models().is_empty());
        assert!(selector.remove_model(0).is_none());
    }

    #[test]
    fn clear_detaches() {
        let rays = ScriptedRays::default();
        let mut selector =
            ItemSelector::new(&rays, models(), SelectionTracker::default());
        let mut overlay = Overlay::default();

        rays.aim(&[(0, 0)]);
        assert_eq!(
            selector.select(&PointerEvent::default(), &mut overlay).unwrap(),
            PickOutcome::Picked(SelectOutcome::Highlighted)
        );
        assert!(selector.clear(&mut overlay));
        assert!(overlay.shown.is_none());
        assert!(selector.models().find_model(0).is_ok());
    }
}

//! Pointer picking glue.
//!
//! Ray casting, model lookup and object-ID resolution live outside this
//! crate; they plug in through [`RayCaster`], [`ModelRegistry`] and
//! [`IdResolver`]. [`ItemSelector`] strings them together with a
//! [`SelectionTracker`](crate::selection::SelectionTracker): nearest hit →
//! model → object ID → highlight.

mod collaborators;
mod selector;

pub use collaborators::{
    Hit, IdResolver, MeshIdResolver, ModelRegistry, ModelSet, PointerEvent,
    RayCaster,
};
pub use selector::{ItemSelector, PickOutcome};

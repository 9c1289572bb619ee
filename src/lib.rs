// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![cfg_attr(not(test), deny(clippy::wildcard_imports))]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Per-object index ranges and highlight sub-meshes for merged triangle
//! meshes.
//!
//! Large models are usually flattened into one indexed triangle buffer with
//! an object ID on every vertex and the index buffer split by material.
//! This crate finds where each object lives in that buffer and copies a
//! single object out as a small standalone mesh, ready to be drawn as a
//! selection highlight.
//!
//! # Key entry points
//!
//! - [`scan::scan`] - build the [`scan::ObjectIndexMap`] of a
//!   [`mesh::Mesh`]
//! - [`extract::extract`] - copy one object into a [`mesh::SubMesh`]
//! - [`selection::SelectionTracker`] - own the single current highlight
//! - [`picking::ItemSelector`] - pointer → ray cast → highlight glue
//! - [`options::Options`] - TOML-backed selection and highlight settings
//!
//! Ray casting, model loading and drawing stay with the host application
//! and plug in through the traits in [`picking`] and
//! [`selection::HighlightPresenter`].

pub mod error;
pub mod extract;
pub mod mesh;
pub mod options;
pub mod picking;
pub mod scan;
pub mod selection;

pub use error::SubsetError;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What to do with attribute slots that the per-range renumbering leaves
/// unwritten.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum GapPolicy {
    /// Keep the slot layout produced by per-range renumbering. Unwritten
    /// slots hold zero vectors.
    #[default]
    Preserve,
    /// Renumber vertices densely in first-use order. No gaps, no shared
    /// slots between ranges.
    Compact,
}

/// Sub-mesh extraction settings.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Default,
    JsonSchema,
)]
#[schemars(title = "Extraction", inline)]
#[serde(default)]
pub struct ExtractOptions {
    /// Slot layout of the extracted sub-mesh.
    #[schemars(title = "Gap Policy")]
    pub gap_policy: GapPolicy,
}

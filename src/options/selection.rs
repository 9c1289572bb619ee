use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How picks replace the current highlight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Selection", inline)]
#[serde(default)]
pub struct SelectionOptions {
    /// Rebuild the highlight even when the picked object is already
    /// highlighted.
    #[schemars(title = "Replace Previous")]
    pub remove_previous: bool,
    /// Reuse the object index map of a mesh across picks.
    #[schemars(title = "Cache Index Maps")]
    pub cache_index_maps: bool,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            remove_previous: true,
            cache_index_maps: true,
        }
    }
}

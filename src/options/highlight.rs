use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Style token handed to the presenter alongside a highlighted sub-mesh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Highlight", inline)]
#[serde(default)]
pub struct HighlightStyle {
    /// Overlay color (linear RGB).
    #[schemars(title = "Color")]
    pub color: [f32; 3],
    /// Overlay opacity.
    #[schemars(
        title = "Opacity",
        range(min = 0.0, max = 1.0),
        extend("step" = 0.05)
    )]
    pub opacity: f32,
    /// Whether the overlay is depth-tested against the scene. Off draws it
    /// on top of everything.
    #[schemars(title = "Depth Test")]
    pub depth_test: bool,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            color: [1.0, 0.0, 0.0],
            opacity: 1.0,
            depth_test: false,
        }
    }
}

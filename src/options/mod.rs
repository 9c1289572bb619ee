//! Selection and highlight options with TOML preset support.
//!
//! Options serialize to/from TOML so a host application can keep them next
//! to its own configuration. Every section uses `#[serde(default)]`, so a
//! file that only overrides `[highlight]` is valid.

mod extract;
mod highlight;
mod selection;

use std::path::Path;

pub use extract::{ExtractOptions, GapPolicy};
pub use highlight::HighlightStyle;
use schemars::JsonSchema;
pub use selection::SelectionOptions;
use serde::{Deserialize, Serialize};

use crate::error::SubsetError;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Pick and replacement policy.
    pub selection: SelectionOptions,
    /// Sub-mesh extraction settings.
    pub extract: ExtractOptions,
    /// Style of the highlight overlay.
    pub highlight: HighlightStyle,
}

impl Options {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, SubsetError> {
        let content = std::fs::read_to_string(path)?;
        let options = toml::from_str(&content)
            .map_err(|e| SubsetError::OptionsParse(e.to_string()))?;
        log::info!("Loaded options from '{}'", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), SubsetError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SubsetError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        log::info!("Saved options to '{}'", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[extract]
gap_policy = "compact"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.extract.gap_policy, GapPolicy::Compact);
        // Everything else should be default
        assert!(opts.selection.remove_previous);
        assert!(opts.selection.cache_index_maps);
        assert_eq!(opts.highlight.color, [1.0, 0.0, 0.0]);
        assert!(!opts.highlight.depth_test);
    }

    #[test]
    fn unknown_gap_policy_is_a_parse_error() {
        let result: Result<Options, _> =
            toml::from_str("[extract]\ngap_policy = \"fill\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir()
            .join(format!("mesh-subset-options-{}", std::process::id()));
        let path = dir.join("selection.toml");

        let mut opts = Options::default();
        opts.selection.remove_previous = false;
        opts.highlight.opacity = 0.5;
        opts.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("mesh-subset-does-not-exist.toml");
        assert!(matches!(Options::load(&path), Err(SubsetError::Io(_))));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("selection"));
        assert!(props.contains_key("extract"));
        assert!(props.contains_key("highlight"));

        let highlight = &props["highlight"]["properties"];
        assert!(highlight.get("opacity").is_some());
        assert!(highlight.get("depth_test").is_some());
    }
}

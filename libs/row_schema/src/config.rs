use serde::Deserialize;

/// The default for [`InferenceConfig::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Settings for [`TypeInference`](crate::TypeInference).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InferenceConfig {
    /// How deep types may nest before inference gives up.
    ///
    /// Every list element, map entry, and record member counts as one level.
    pub max_depth: usize,
}

impl InferenceConfig {
    /// Parses a config from TOML text. Missing keys use their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text isn't valid TOML or contains unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

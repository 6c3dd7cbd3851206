//! Driver configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::size::{SizePolicy, SizeSource};

/// Behavior switches for a [`ListDriver`](super::ListDriver).
///
/// Every field has a default, so a configuration file only needs the keys it
/// changes.
///
/// # Example
///
/// ```
/// use horizon_sections::driver::DriverConfig;
/// use horizon_sections::size::SizeSource;
///
/// let config = DriverConfig::from_toml_str(r#"
/// automatic_diffing = false
/// size_policy = ["explicit", { fixed = 44.0 }]
/// "#).unwrap();
///
/// assert!(!config.automatic_diffing);
/// assert!(config.deselect_on_selection);
/// assert_eq!(config.size_policy.sources()[1], SizeSource::Fixed(44.0));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Diff tree swaps into batched edits. When off, every swap reloads all data.
    pub automatic_diffing: bool,
    /// Clear the selection right after an item is selected.
    pub deselect_on_selection: bool,
    /// How header, footer, and item sizes are resolved.
    pub size_policy: SizePolicy,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            automatic_diffing: true,
            deselect_on_selection: true,
            size_policy: SizePolicy::default(),
        }
    }
}

impl DriverConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable automatic diffing.
    pub fn automatic_diffing(mut self, enabled: bool) -> Self {
        self.automatic_diffing = enabled;
        self
    }

    /// Enable or disable deselect-after-select.
    pub fn deselect_on_selection(mut self, enabled: bool) -> Self {
        self.deselect_on_selection = enabled;
        self
    }

    /// Set the size policy chain.
    pub fn size_policy(mut self, sources: Vec<SizeSource>) -> Self {
        self.size_policy = SizePolicy::new(sources);
        self
    }

    /// Parse a configuration from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}

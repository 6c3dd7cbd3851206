//! Accessibility identifier templates.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::index::IndexPath;

/// A template for accessibility identifiers that depend on on-screen position.
///
/// The placeholders `{section}` and `{item}` are replaced with the location
/// the element is rendered at, so the same model yields stable identifiers
/// for UI automation regardless of how the tree was produced.
///
/// # Example
///
/// ```
/// use horizon_sections::model::{AccessibilityFormat, IndexPath};
///
/// let format = AccessibilityFormat::new("access-{section}.{item}");
/// assert_eq!(format.resolve(IndexPath::new(1, 2)), "access-1.2");
///
/// let header = AccessibilityFormat::new("access_header+{section}");
/// assert_eq!(header.resolve_section(0), "access_header+0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessibilityFormat(String);

impl AccessibilityFormat {
    /// Section placeholder.
    pub const SECTION: &'static str = "{section}";
    /// Item placeholder.
    pub const ITEM: &'static str = "{item}";

    /// Creates a format from a template string.
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Returns the raw template.
    pub fn template(&self) -> &str {
        &self.0
    }

    /// Resolves the template for an item location.
    pub fn resolve(&self, path: IndexPath) -> String {
        self.0
            .replace(Self::SECTION, &path.section().to_string())
            .replace(Self::ITEM, &path.item().to_string())
    }

    /// Resolves the template for a section-level element.
    ///
    /// `{item}` placeholders are left untouched.
    pub fn resolve_section(&self, section: usize) -> String {
        self.0.replace(Self::SECTION, &section.to_string())
    }
}

impl fmt::Display for AccessibilityFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccessibilityFormat {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

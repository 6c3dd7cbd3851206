//! Element kinds and reuse descriptors.
//!
//! A [`ReuseDescriptor`] says *how* a model is rendered: which renderer type
//! the surface instantiates, and under which reuse identifier rendering
//! objects are pooled. Registration with the surface is keyed by the
//! identifier together with the [`ElementKind`] slot it fills.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reuse identifier of the hidden placeholder used for absent headers and footers.
pub const HIDDEN_SUPPLEMENTARY_IDENTIFIER: &str = "hidden-supplementary-view";

/// Renderer type of the hidden placeholder.
pub const HIDDEN_SUPPLEMENTARY_RENDERER: &str = "HiddenSupplementaryView";

/// The kind of slot an element occupies on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// A regular item cell.
    Item,
    /// A section header.
    Header,
    /// A section footer.
    Footer,
}

impl ElementKind {
    /// Returns the supplementary kind, if this is a header or footer.
    pub fn supplementary(self) -> Option<SupplementaryKind> {
        match self {
            Self::Item => None,
            Self::Header => Some(SupplementaryKind::Header),
            Self::Footer => Some(SupplementaryKind::Footer),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Item => "item",
            Self::Header => "header",
            Self::Footer => "footer",
        })
    }
}

/// Section-level supplementary slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplementaryKind {
    /// The header slot, rendered before a section's items.
    Header,
    /// The footer slot, rendered after a section's items.
    Footer,
}

impl SupplementaryKind {
    /// Both kinds, header first.
    pub const ALL: [SupplementaryKind; 2] = [Self::Header, Self::Footer];
}

impl From<SupplementaryKind> for ElementKind {
    fn from(kind: SupplementaryKind) -> Self {
        match kind {
            SupplementaryKind::Header => Self::Header,
            SupplementaryKind::Footer => Self::Footer,
        }
    }
}

impl fmt::Display for SupplementaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ElementKind::from(*self).fmt(f)
    }
}

/// Identifies how a model is rendered.
///
/// Two models with equal descriptors may share a rendering object.
///
/// # Example
///
/// ```
/// use horizon_sections::model::{ReuseDescriptor, SupplementaryKind};
///
/// let header = ReuseDescriptor::keyed("TitleHeader", SupplementaryKind::Header, "inbox");
/// assert_eq!(header.identifier(), "header+inbox");
/// assert!(!header.is_hidden());
/// assert!(ReuseDescriptor::hidden().is_hidden());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReuseDescriptor {
    renderer: String,
    identifier: String,
}

impl ReuseDescriptor {
    /// Creates a descriptor from a renderer type and reuse identifier.
    pub fn new(renderer: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            renderer: renderer.into(),
            identifier: identifier.into(),
        }
    }

    /// Creates a supplementary descriptor whose identifier is formed from the
    /// kind and a caller-supplied label, e.g. `header+inbox`.
    ///
    /// Sections that share a label share the descriptor.
    pub fn keyed(renderer: impl Into<String>, kind: SupplementaryKind, label: &str) -> Self {
        Self::new(renderer, format!("{kind}+{label}"))
    }

    /// The placeholder descriptor for headers and footers a section omits.
    pub fn hidden() -> Self {
        Self::new(HIDDEN_SUPPLEMENTARY_RENDERER, HIDDEN_SUPPLEMENTARY_IDENTIFIER)
    }

    /// Returns the renderer type name.
    pub fn renderer(&self) -> &str {
        &self.renderer
    }

    /// Returns the reuse identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns `true` for the hidden placeholder.
    pub fn is_hidden(&self) -> bool {
        self.identifier == HIDDEN_SUPPLEMENTARY_IDENTIFIER
    }
}

impl fmt::Display for ReuseDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.identifier, self.renderer)
    }
}

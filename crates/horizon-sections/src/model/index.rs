//! Index paths for addressing items in a sectioned model tree.
//!
//! An `IndexPath` names one item slot by its section and its position within
//! that section. Index paths are plain coordinates: they carry no reference
//! to the tree they were taken from and may go stale after a commit.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents the position of an item within a sectioned model tree.
///
/// # Example
///
/// ```
/// use horizon_sections::model::IndexPath;
///
/// let path = IndexPath::new(1, 2);
/// assert_eq!(path.section(), 1);
/// assert_eq!(path.item(), 2);
/// assert_eq!(path.to_string(), "1.2");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct IndexPath {
    section: usize,
    item: usize,
}

impl IndexPath {
    /// Creates a new index path.
    #[inline]
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    /// Creates the path of the first item slot in `section`.
    ///
    /// Surfaces use this form to address section-level elements such as
    /// headers and footers.
    #[inline]
    pub const fn section_start(section: usize) -> Self {
        Self { section, item: 0 }
    }

    /// Returns the section index.
    #[inline]
    pub const fn section(&self) -> usize {
        self.section
    }

    /// Returns the item index within the section.
    #[inline]
    pub const fn item(&self) -> usize {
        self.item
    }

    /// Returns a path in the same section at another item position.
    #[inline]
    pub const fn with_item(&self, item: usize) -> Self {
        Self {
            section: self.section,
            item,
        }
    }

    /// Returns a path at the same item position in another section.
    #[inline]
    pub const fn with_section(&self, section: usize) -> Self {
        Self {
            section,
            item: self.item,
        }
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.item)
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, item): (usize, usize)) -> Self {
        Self::new(section, item)
    }
}

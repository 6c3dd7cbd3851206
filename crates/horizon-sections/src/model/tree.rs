//! The immutable model tree.

use std::sync::Arc;

use static_assertions::assert_impl_all;

use super::index::IndexPath;
use super::reuse::SupplementaryKind;
use super::section::Section;
use super::traits::{ItemModel, SupplementaryModel};

/// An ordered sequence of sections describing the desired list content.
///
/// Trees are persistent values: cloning is a reference-count bump, and a
/// tree is never mutated once built. Build a new tree and hand it to the
/// driver to change what is shown.
///
/// All lookups are tolerant. Out-of-range sections report zero items and
/// out-of-range paths resolve to `None`.
///
/// # Example
///
/// ```
/// use horizon_sections::model::{IndexPath, Item, ModelTree, ReuseDescriptor, Section};
///
/// let cell = ReuseDescriptor::new("Cell", "cell");
/// let tree = ModelTree::new(vec![
///     Section::empty().with_item(Item::new(cell.clone())),
///     Section::empty(),
/// ]);
///
/// assert_eq!(tree.section_count(), 2);
/// assert_eq!(tree.item_count(0), 1);
/// assert_eq!(tree.item_count(7), 0);
/// assert!(tree.item(IndexPath::new(1, 0)).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModelTree {
    sections: Arc<[Section]>,
}

assert_impl_all!(ModelTree: Send, Sync, Clone);

impl ModelTree {
    /// Creates a tree from sections in display order.
    pub fn new(sections: Vec<Section>) -> Self {
        Self {
            sections: sections.into(),
        }
    }

    /// Creates a tree with no sections.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the sections in display order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Returns the section at `index`, if any.
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Returns the number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if the tree has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Returns the number of items in `section`, or 0 if out of range.
    pub fn item_count(&self, section: usize) -> usize {
        self.section(section).map_or(0, Section::len)
    }

    /// Returns the total number of items across all sections.
    pub fn total_items(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    /// Returns the item at `path`, if any.
    pub fn item(&self, path: IndexPath) -> Option<&Arc<dyn ItemModel>> {
        self.section(path.section())?.item(path.item())
    }

    /// Returns the header or footer of `section`, if any.
    pub fn supplementary(
        &self,
        section: usize,
        kind: SupplementaryKind,
    ) -> Option<&Arc<dyn SupplementaryModel>> {
        self.section(section)?.supplementary(kind)
    }

    /// Returns `true` if both handles share the same section storage.
    ///
    /// Trees that share storage are identical; the diff engine uses this as
    /// a fast path.
    pub fn ptr_eq(&self, other: &ModelTree) -> bool {
        Arc::ptr_eq(&self.sections, &other.sections)
    }
}

impl FromIterator<Section> for ModelTree {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Section>> for ModelTree {
    fn from(sections: Vec<Section>) -> Self {
        Self::new(sections)
    }
}

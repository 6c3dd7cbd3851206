//! Sections of a model tree.

use std::fmt;
use std::sync::Arc;

use super::reuse::SupplementaryKind;
use super::traits::{ItemModel, SupplementaryModel};

/// One section of a model tree: a run of items with an optional header and footer.
///
/// A section without items still exists and still owns a header slot and a
/// footer slot on the surface. Missing headers and footers are rendered with
/// the hidden placeholder.
///
/// # Identity
///
/// Sections are matched across trees by their [`key`](Section::key) when one
/// is set, and by their position otherwise. Give sections keys whenever they
/// can be inserted, removed, or reordered; unkeyed sections are compared
/// slot-for-slot.
///
/// # Example
///
/// ```
/// use horizon_sections::model::{Item, ReuseDescriptor, Section, Supplementary};
///
/// let section = Section::empty()
///     .with_key("favorites")
///     .with_header(Supplementary::new(ReuseDescriptor::new("Header", "favorites")))
///     .with_item(Item::new(ReuseDescriptor::new("Cell", "cell")).with_label("Alice"));
/// assert_eq!(section.len(), 1);
/// assert!(section.footer().is_none());
/// ```
#[derive(Clone, Default)]
pub struct Section {
    key: Option<String>,
    items: Vec<Arc<dyn ItemModel>>,
    header: Option<Arc<dyn SupplementaryModel>>,
    footer: Option<Arc<dyn SupplementaryModel>>,
}

impl Section {
    /// Creates a section with no items, header, or footer.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a section from shared item models.
    pub fn new(items: impl IntoIterator<Item = Arc<dyn ItemModel>>) -> Self {
        Self {
            items: items.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Creates a section from optional parts, normalizing absent items to empty.
    pub fn from_parts(
        items: Option<Vec<Arc<dyn ItemModel>>>,
        header: Option<Arc<dyn SupplementaryModel>>,
        footer: Option<Arc<dyn SupplementaryModel>>,
    ) -> Self {
        Self {
            key: None,
            items: items.unwrap_or_default(),
            header,
            footer,
        }
    }

    /// Sets the explicit section identity.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Appends an item.
    pub fn with_item(mut self, item: impl ItemModel + 'static) -> Self {
        self.items.push(Arc::new(item));
        self
    }

    /// Appends several items.
    pub fn with_items<I, M>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: ItemModel + 'static,
    {
        self.items
            .extend(items.into_iter().map(|item| Arc::new(item) as Arc<dyn ItemModel>));
        self
    }

    /// Sets the header.
    pub fn with_header(mut self, header: impl SupplementaryModel + 'static) -> Self {
        self.header = Some(Arc::new(header));
        self
    }

    /// Sets the footer.
    pub fn with_footer(mut self, footer: impl SupplementaryModel + 'static) -> Self {
        self.footer = Some(Arc::new(footer));
        self
    }

    /// Returns the explicit section identity.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the items.
    pub fn items(&self) -> &[Arc<dyn ItemModel>] {
        &self.items
    }

    /// Returns the item at `index`, if any.
    pub fn item(&self, index: usize) -> Option<&Arc<dyn ItemModel>> {
        self.items.get(index)
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the section has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the header model.
    pub fn header(&self) -> Option<&Arc<dyn SupplementaryModel>> {
        self.header.as_ref()
    }

    /// Returns the footer model.
    pub fn footer(&self) -> Option<&Arc<dyn SupplementaryModel>> {
        self.footer.as_ref()
    }

    /// Returns the header or footer model.
    pub fn supplementary(&self, kind: SupplementaryKind) -> Option<&Arc<dyn SupplementaryModel>> {
        match kind {
            SupplementaryKind::Header => self.header(),
            SupplementaryKind::Footer => self.footer(),
        }
    }
}

impl fmt::Debug for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section")
            .field("key", &self.key)
            .field("items", &self.items.len())
            .field(
                "header",
                &self.header.as_ref().map(|h| h.reuse_descriptor().identifier().to_string()),
            )
            .field(
                "footer",
                &self.footer.as_ref().map(|f| f.reuse_descriptor().identifier().to_string()),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Item, ReuseDescriptor, Supplementary};

    #[test]
    fn test_absent_items_normalize_to_empty() {
        let section = Section::from_parts(None, None, None);
        assert!(section.is_empty());
        assert_eq!(section.len(), 0);
        assert!(section.item(0).is_none());
    }

    #[test]
    fn test_supplementary_lookup() {
        let section = Section::empty()
            .with_footer(Supplementary::new(ReuseDescriptor::new("Footer", "footer")));
        assert!(section.supplementary(SupplementaryKind::Header).is_none());
        assert!(section.supplementary(SupplementaryKind::Footer).is_some());
    }

    #[test]
    fn test_with_items() {
        let reuse = ReuseDescriptor::new("Cell", "cell");
        let section = Section::empty().with_items(
            ["a", "b", "c"]
                .into_iter()
                .map(|label| Item::new(reuse.clone()).with_label(label)),
        );
        assert_eq!(section.len(), 3);
        assert_eq!(section.item(2).and_then(|i| i.label()), Some("c"));
    }
}

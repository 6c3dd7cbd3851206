//! Text dumps of model trees.
//!
//! ```
//! use horizon_sections::model::{Item, ModelTree, ReuseDescriptor, Section, TreeDebug};
//! use horizon_sections_core::TreeFormatOptions;
//!
//! let tree = ModelTree::new(vec![
//!     Section::empty().with_item(Item::new(ReuseDescriptor::new("Cell", "cell")).with_label("a")),
//! ]);
//! let dump = TreeDebug::new(&tree).options(TreeFormatOptions::minimal()).to_string();
//! assert!(dump.contains("section 0"));
//! ```

use std::fmt;

use horizon_sections_core::{TreeFormatOptions, TreeWriter};

use super::reuse::SupplementaryKind;
use super::section::Section;
use super::traits::ViewModel;
use super::tree::ModelTree;

/// Formats a [`ModelTree`] as an indented outline.
#[derive(Debug, Clone)]
pub struct TreeDebug<'a> {
    tree: &'a ModelTree,
    options: TreeFormatOptions,
}

impl<'a> TreeDebug<'a> {
    /// Creates a formatter with default options.
    pub fn new(tree: &'a ModelTree) -> Self {
        Self {
            tree,
            options: TreeFormatOptions::default(),
        }
    }

    /// Replaces the format options.
    pub fn options(mut self, options: TreeFormatOptions) -> Self {
        self.options = options;
        self
    }

    /// Renders the outline.
    pub fn render(&self) -> String {
        let mut writer = TreeWriter::new(self.options.clone());
        writer.line(
            0,
            true,
            &format!("tree ({} sections)", self.tree.section_count()),
        );

        let count = self.tree.section_count();
        for (index, section) in self.tree.sections().iter().enumerate() {
            self.write_section(&mut writer, index, section, index + 1 == count);
        }

        writer.finish()
    }

    fn write_section(&self, writer: &mut TreeWriter, index: usize, section: &Section, last: bool) {
        let title = match section.key() {
            Some(key) => format!("section {index} [{key}]"),
            None => format!("section {index}"),
        };
        writer.line(1, last, &title);
        if !writer.accepts(2) {
            return;
        }

        for kind in SupplementaryKind::ALL {
            let text = match section.supplementary(kind) {
                Some(model) => format!("{kind}: {}", self.describe(model.as_ref())),
                None => format!("{kind}: <hidden>"),
            };
            let is_last = kind == SupplementaryKind::Footer && section.is_empty();
            writer.line(2, is_last, &text);
        }

        let len = section.len();
        for (item, model) in section.items().iter().enumerate() {
            let text = format!("item {item}: {}", self.describe(model.as_ref()));
            writer.line(2, item + 1 == len, &text);
        }
    }

    fn describe(&self, model: &dyn ViewModel) -> String {
        let mut text = model.label().unwrap_or("-").to_string();
        if let Some(key) = model.diffing_key() {
            text.push_str(&format!(" #{key}"));
        }
        if self.options.show_reuse {
            text.push_str(&format!(" <{}>", model.reuse_descriptor().identifier()));
        }
        if self.options.show_sizes
            && let Some(size) = model.size()
        {
            text.push_str(&format!(" ({size})"));
        }
        text
    }
}

impl fmt::Display for TreeDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

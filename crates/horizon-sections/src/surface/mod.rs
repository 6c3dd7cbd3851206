//! The rendering surface interface.
//!
//! A [`ListSurface`] is the stateful, batch-updatable widget a driver keeps
//! in sync with its model tree. The driver never reaches into the widget: it
//! issues commands through this trait and answers the widget's pull-based
//! queries through its own methods.
//!
//! Surfaces that validate batches (as UIKit-style collection views do) read
//! the expected counts through the [`DataSource`] handed to
//! [`end_updates`](ListSurface::end_updates) and
//! [`reload_data`](ListSurface::reload_data).

mod recording;

use crate::error::SurfaceError;
use crate::model::{ElementKind, IndexPath, ModelTree, ReuseDescriptor, SupplementaryKind};

pub use recording::{RecordingSurface, SurfaceCommand};

/// Read access to the counts a surface displays.
pub trait DataSource {
    /// Returns the number of sections.
    fn section_count(&self) -> usize;

    /// Returns the number of items in `section`, or 0 if out of range.
    fn item_count(&self, section: usize) -> usize;
}

impl DataSource for ModelTree {
    fn section_count(&self) -> usize {
        ModelTree::section_count(self)
    }

    fn item_count(&self, section: usize) -> usize {
        ModelTree::item_count(self, section)
    }
}

/// Commands a driver issues to a list or grid widget.
///
/// Within a transaction, deletes and reloads address the content the surface
/// showed before `begin_updates`; inserts and move destinations address the
/// content it shows after `end_updates`.
pub trait ListSurface {
    /// Opens a batch of updates.
    fn begin_updates(&mut self) -> Result<(), SurfaceError>;

    /// Commits the open batch. `source` reports the content after the batch.
    fn end_updates(&mut self, source: &dyn DataSource) -> Result<(), SurfaceError>;

    /// Discards the open batch after a failed command.
    fn abandon_updates(&mut self) {}

    /// Inserts sections at next indices.
    fn insert_sections(&mut self, sections: &[usize]) -> Result<(), SurfaceError>;

    /// Deletes sections at previous indices.
    fn delete_sections(&mut self, sections: &[usize]) -> Result<(), SurfaceError>;

    /// Moves a section from a previous index to a next index.
    fn move_section(&mut self, from: usize, to: usize) -> Result<(), SurfaceError>;

    /// Reloads whole sections at previous indices.
    fn reload_sections(&mut self, sections: &[usize]) -> Result<(), SurfaceError>;

    /// Reloads one header or footer of a section at its previous index.
    ///
    /// The section's items may be edited in the same batch. Reloading the
    /// whole section instead is not equivalent: a reloaded section is
    /// replaced, and item edits addressing it make the batch inconsistent.
    fn reload_supplementary(
        &mut self,
        section: usize,
        kind: SupplementaryKind,
    ) -> Result<(), SurfaceError>;

    /// Inserts items at next paths.
    fn insert_items(&mut self, paths: &[IndexPath]) -> Result<(), SurfaceError>;

    /// Deletes items at previous paths.
    fn delete_items(&mut self, paths: &[IndexPath]) -> Result<(), SurfaceError>;

    /// Moves an item from a previous path to a next path.
    fn move_item(&mut self, from: IndexPath, to: IndexPath) -> Result<(), SurfaceError>;

    /// Reloads items at previous paths.
    fn reload_items(&mut self, paths: &[IndexPath]) -> Result<(), SurfaceError>;

    /// Discards all displayed content and re-reads it from `source`.
    fn reload_data(&mut self, source: &dyn DataSource);

    /// Registers a renderer for a slot kind under a reuse identifier.
    fn register_reuse_descriptor(&mut self, descriptor: &ReuseDescriptor, kind: ElementKind);

    /// Clears the selection of an item.
    fn deselect_item(&mut self, path: IndexPath);

    /// Returns the layout's reference size for an element kind, if any.
    fn default_size(&self, kind: ElementKind) -> Option<f32>;
}

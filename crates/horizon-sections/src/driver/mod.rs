//! The reconciliation driver.
//!
//! A [`ListDriver`] owns a [`ListSurface`] and the last model tree it
//! committed to it. Handing the driver a new tree diffs it against the
//! committed one and applies the edits inside one surface transaction; the
//! surface then pulls counts, content, and sizes back through the driver's
//! query methods. Interaction events flow the other way, from the surface
//! through the driver into the callbacks the models carry.
//!
//! # Example
//!
//! ```
//! use horizon_sections::driver::ListDriver;
//! use horizon_sections::model::{IndexPath, Item, ModelTree, ReuseDescriptor, Section};
//! use horizon_sections::surface::RecordingSurface;
//!
//! let cell = ReuseDescriptor::new("Cell", "cell");
//! let mut driver = ListDriver::new(RecordingSurface::new());
//!
//! driver.set_model_tree(ModelTree::new(vec![
//!     Section::empty().with_item(Item::new(cell.clone()).with_key("a")),
//! ]));
//! driver.set_model_tree(ModelTree::new(vec![Section::empty().with_items([
//!     Item::new(cell.clone()).with_key("a"),
//!     Item::new(cell).with_key("b"),
//! ])]));
//!
//! assert_eq!(driver.item_count(0), 2);
//! assert!(driver.content_for_item(IndexPath::new(0, 1)).is_some());
//! ```
//!
//! # Threading
//!
//! Drivers are single-threaded. Every operation checks that it runs on the
//! thread the driver was created on (in debug builds, or when thread checks
//! are enabled at runtime).

mod config;
mod content;
mod signals;

use std::sync::Arc;

use horizon_sections_core::logging::{span_names, targets};
use horizon_sections_core::{PerfSpan, ThreadAffinity};
use tracing::{debug, debug_span, error, instrument, trace};

use crate::diff::{EditScript, diff};
use crate::error::{Result, SurfaceError};
use crate::model::{
    ElementKind, IndexPath, ItemModel, ModelTree, SupplementaryKind, SupplementaryModel, TreeDebug,
};
use crate::registry::ReuseRegistry;
use crate::surface::{DataSource, ListSurface};

pub use config::DriverConfig;
pub use content::{CommitMode, CommitSummary, ItemContent, SupplementaryContent, SupplementarySlot};
pub use signals::DriverSignals;

/// Keeps a list surface in sync with a sequence of model trees.
pub struct ListDriver<S: ListSurface> {
    surface: S,
    tree: ModelTree,
    config: DriverConfig,
    registry: ReuseRegistry,
    signals: DriverSignals,
    affinity: ThreadAffinity,
}

impl<S: ListSurface> ListDriver<S> {
    /// Creates a driver showing an empty tree with the default configuration.
    pub fn new(surface: S) -> Self {
        Self::with_tree(surface, ModelTree::empty(), DriverConfig::default())
    }

    /// Creates a driver showing an empty tree.
    pub fn with_config(surface: S, config: DriverConfig) -> Self {
        Self::with_tree(surface, ModelTree::empty(), config)
    }

    /// Creates a driver showing `tree`.
    ///
    /// Registers every descriptor the tree uses, then loads the surface with
    /// a full data reload.
    pub fn with_tree(surface: S, tree: ModelTree, config: DriverConfig) -> Self {
        let mut driver = Self {
            surface,
            tree: ModelTree::empty(),
            config,
            registry: ReuseRegistry::new(),
            signals: DriverSignals::new(),
            affinity: ThreadAffinity::current(),
        };
        driver.register(&tree);
        driver.surface.reload_data(&tree);
        driver.tree = tree;
        debug!(
            target: targets::DRIVER,
            sections = driver.tree.section_count(),
            automatic_diffing = driver.config.automatic_diffing,
            "driver created"
        );
        driver
    }

    /// Replaces the model tree and reconciles the surface.
    ///
    /// # Panics
    ///
    /// Panics if the surface rejects the transaction. The committed tree is
    /// left unchanged and the error is logged before panicking; use
    /// [`try_set_model_tree`](Self::try_set_model_tree) to handle it instead.
    pub fn set_model_tree(&mut self, next: ModelTree) {
        if let Err(err) = self.try_set_model_tree(next) {
            error!(
                target: targets::DRIVER,
                error = %err,
                "surface rejected model tree update"
            );
            panic!("list surface update failed: {err}");
        }
    }

    /// Replaces the model tree and reconciles the surface.
    ///
    /// New reuse descriptors are registered before the transaction opens. On
    /// failure the transaction is abandoned and the previously committed tree
    /// stays current.
    #[instrument(
        target = "horizon_sections::driver",
        level = "debug",
        skip_all,
        fields(sections = next.section_count())
    )]
    pub fn try_set_model_tree(&mut self, next: ModelTree) -> Result<CommitSummary> {
        self.affinity.debug_assert_same_thread();
        let _perf = PerfSpan::new("set_model_tree");

        self.register(&next);

        if !self.config.automatic_diffing {
            self.surface.reload_data(&next);
            return Ok(self.commit(next, 0, CommitMode::Reloaded));
        }

        let script = diff(&self.tree, &next);
        if script.is_empty() {
            trace!(target: targets::DRIVER, "no structural changes");
            return Ok(self.commit(next, 0, CommitMode::Diffed));
        }

        if let Err(err) = self.apply(&script, &next) {
            self.surface.abandon_updates();
            return Err(err.into());
        }
        Ok(self.commit(next, script.len(), CommitMode::Diffed))
    }

    fn apply(&mut self, script: &EditScript, next: &ModelTree) -> std::result::Result<(), SurfaceError> {
        let _span = debug_span!(
            target: targets::SURFACE,
            span_names::TRANSACTION,
            ops = script.len()
        )
        .entered();
        let surface = &mut self.surface;
        surface.begin_updates()?;

        if !script.section_deletes().is_empty() {
            surface.delete_sections(script.section_deletes())?;
        }
        if !script.section_inserts().is_empty() {
            surface.insert_sections(script.section_inserts())?;
        }
        for &(from, to) in script.section_moves() {
            surface.move_section(from, to)?;
        }
        if !script.section_reloads().is_empty() {
            surface.reload_sections(script.section_reloads())?;
        }
        for &(section, kind) in script.supplementary_reloads() {
            surface.reload_supplementary(section, kind)?;
        }

        if !script.item_deletes().is_empty() {
            surface.delete_items(script.item_deletes())?;
        }
        if !script.item_inserts().is_empty() {
            surface.insert_items(script.item_inserts())?;
        }
        for &(from, to) in script.item_moves() {
            surface.move_item(from, to)?;
        }
        if !script.item_reloads().is_empty() {
            surface.reload_items(script.item_reloads())?;
        }

        trace!(target: targets::DRIVER, %script, "edits applied");
        surface.end_updates(next)
    }

    fn commit(&mut self, next: ModelTree, edits: usize, mode: CommitMode) -> CommitSummary {
        self.tree = next;
        let summary = CommitSummary {
            sections: self.tree.section_count(),
            edits,
            mode,
        };
        debug!(
            target: targets::DRIVER,
            sections = summary.sections,
            edits,
            ?mode,
            "tree committed"
        );
        trace!(target: targets::DRIVER, tree = %TreeDebug::new(&self.tree), "committed tree");
        self.signals.tree_committed.emit(summary);
        summary
    }

    fn register(&mut self, tree: &ModelTree) {
        let _span = debug_span!(target: targets::REGISTRY, span_names::REGISTRATION).entered();
        for registration in self.registry.register_tree(tree, &mut self.surface) {
            self.signals.descriptor_registered.emit(registration);
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Returns the number of sections in the committed tree.
    pub fn section_count(&self) -> usize {
        self.affinity.debug_assert_same_thread();
        self.tree.section_count()
    }

    /// Returns the number of items in `section`, or 0 if out of range.
    pub fn item_count(&self, section: usize) -> usize {
        self.affinity.debug_assert_same_thread();
        self.tree.item_count(section)
    }

    /// Returns the item model at `path`, if any.
    pub fn item_model(&self, path: IndexPath) -> Option<&Arc<dyn ItemModel>> {
        self.affinity.debug_assert_same_thread();
        self.tree.item(path)
    }

    /// Returns the header or footer model of `section`, if any.
    pub fn supplementary_model(
        &self,
        section: usize,
        kind: SupplementaryKind,
    ) -> Option<&Arc<dyn SupplementaryModel>> {
        self.affinity.debug_assert_same_thread();
        self.tree.supplementary(section, kind)
    }

    /// Returns the content for the item cell at `path`, if an item exists there.
    pub fn content_for_item(&self, path: IndexPath) -> Option<ItemContent> {
        self.affinity.debug_assert_same_thread();
        self.tree
            .item(path)
            .map(|model| ItemContent::for_model(path, model))
    }

    /// Returns the content for a header or footer slot.
    ///
    /// Every section has both slots. Absent models, models that render with
    /// the hidden placeholder, and out-of-range sections all produce hidden
    /// content.
    pub fn content_for_supplementary(
        &self,
        section: usize,
        kind: SupplementaryKind,
    ) -> SupplementaryContent {
        self.affinity.debug_assert_same_thread();
        match self.tree.supplementary(section, kind) {
            Some(model) if !model.reuse_descriptor().is_hidden() => {
                SupplementaryContent::for_model(section, kind, model)
            }
            _ => SupplementaryContent::hidden(section, kind),
        }
    }

    /// Returns the size of a header or footer slot.
    ///
    /// Out-of-range sections have size 0. In range, the configured size
    /// policy resolves the model's explicit size against the surface default.
    pub fn size_for_supplementary(&self, section: usize, kind: SupplementaryKind) -> f32 {
        self.affinity.debug_assert_same_thread();
        let Some(model_section) = self.tree.section(section) else {
            return 0.0;
        };
        let explicit = model_section.supplementary(kind).and_then(|model| model.size());
        self.config
            .size_policy
            .resolve(explicit, || self.surface.default_size(kind.into()))
    }

    /// Returns the size of the item at `path`, or 0 if no item exists there.
    pub fn size_for_item(&self, path: IndexPath) -> f32 {
        self.affinity.debug_assert_same_thread();
        let Some(model) = self.tree.item(path) else {
            return 0.0;
        };
        self.config
            .size_policy
            .resolve(model.size(), || self.surface.default_size(ElementKind::Item))
    }

    /// Returns whether the item at `path` highlights on touch.
    ///
    /// Paths without an item report `true`.
    pub fn should_highlight(&self, path: IndexPath) -> bool {
        self.affinity.debug_assert_same_thread();
        self.tree
            .item(path)
            .is_none_or(|model| model.should_highlight())
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Routes a selection to the item at `path`.
    ///
    /// With deselect-on-selection enabled, the surface is told to clear the
    /// selection at `path` whether or not an item exists there.
    pub fn did_select(&mut self, path: IndexPath) {
        self.affinity.debug_assert_same_thread();
        if self.config.deselect_on_selection {
            self.surface.deselect_item(path);
        }

        let Some(model) = self.tree.item(path).cloned() else {
            trace!(target: targets::DRIVER, %path, "selection outside model");
            return;
        };
        model.on_select();
        self.signals.item_selected.emit(path);
    }

    /// Routes a deselection to the item at `path`.
    pub fn did_deselect(&mut self, path: IndexPath) {
        self.affinity.debug_assert_same_thread();
        let Some(model) = self.tree.item(path).cloned() else {
            trace!(target: targets::DRIVER, %path, "deselection outside model");
            return;
        };
        model.on_deselect();
        self.signals.item_deselected.emit(path);
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Returns the committed tree.
    pub fn tree(&self) -> &ModelTree {
        &self.tree
    }

    /// Returns the configuration.
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Enables or disables automatic diffing for subsequent tree swaps.
    pub fn set_automatic_diffing(&mut self, enabled: bool) {
        self.affinity.debug_assert_same_thread();
        self.config.automatic_diffing = enabled;
    }

    /// Returns the surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Returns the surface mutably.
    ///
    /// Commands issued directly bypass the driver; a surface that drifts from
    /// the committed tree will reject the next batch.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Returns the reuse registry.
    pub fn registry(&self) -> &ReuseRegistry {
        &self.registry
    }

    /// Returns the driver's signals.
    pub fn signals(&self) -> &DriverSignals {
        &self.signals
    }
}

impl<S: ListSurface> DataSource for ListDriver<S> {
    fn section_count(&self) -> usize {
        ListDriver::section_count(self)
    }

    fn item_count(&self, section: usize) -> usize {
        ListDriver::item_count(self, section)
    }
}

impl<S: ListSurface + std::fmt::Debug> std::fmt::Debug for ListDriver<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListDriver")
            .field("surface", &self.surface)
            .field("tree", &self.tree)
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Item, ReuseDescriptor, Section, Supplementary};
    use crate::surface::{RecordingSurface, SurfaceCommand};
    use parking_lot::Mutex;

    fn cell() -> ReuseDescriptor {
        ReuseDescriptor::new("Cell", "cell")
    }

    fn keyed_tree(keys: &[&str]) -> ModelTree {
        ModelTree::new(vec![Section::empty().with_items(
            keys.iter().map(|key| Item::new(cell()).with_key(*key)),
        )])
    }

    #[test]
    fn test_construction_registers_and_reloads() {
        let driver = ListDriver::with_tree(
            RecordingSurface::new(),
            keyed_tree(&["a"]),
            DriverConfig::default(),
        );
        let commands = driver.surface().commands();
        assert_eq!(commands.last(), Some(&SurfaceCommand::ReloadData));
        assert_eq!(driver.surface().registrations().len(), 3);
        assert_eq!(driver.surface().shape().counts(), &[1]);
    }

    #[test]
    fn test_diffed_commit_emits_summary() {
        let mut driver = ListDriver::with_tree(
            RecordingSurface::new(),
            keyed_tree(&["a"]),
            DriverConfig::default(),
        );
        let summaries = Arc::new(Mutex::new(Vec::new()));
        let sink = summaries.clone();
        driver
            .signals()
            .tree_committed
            .connect(move |summary| sink.lock().push(*summary));

        let summary = driver.try_set_model_tree(keyed_tree(&["a", "b"])).unwrap();
        assert_eq!(
            summary,
            CommitSummary {
                sections: 1,
                edits: 1,
                mode: CommitMode::Diffed,
            }
        );
        assert_eq!(*summaries.lock(), vec![summary]);
        assert_eq!(driver.surface().batch_count(), 1);
    }

    #[test]
    fn test_identical_tree_skips_transaction() {
        let tree = keyed_tree(&["a", "b"]);
        let mut driver = ListDriver::with_tree(RecordingSurface::new(), tree.clone(), DriverConfig::default());
        driver.surface_mut().clear_commands();

        driver.set_model_tree(tree);
        assert!(driver.surface().commands().is_empty());
    }

    #[test]
    fn test_registration_signal() {
        let mut driver = ListDriver::new(RecordingSurface::new());
        let registered = Arc::new(Mutex::new(Vec::new()));
        let sink = registered.clone();
        driver
            .signals()
            .descriptor_registered
            .connect(move |registration| sink.lock().push(registration.clone()));

        driver.set_model_tree(keyed_tree(&["a"]));
        driver.set_model_tree(keyed_tree(&["a", "b"]));
        assert_eq!(
            *registered.lock(),
            vec![(ElementKind::Item, "cell".to_string())]
        );
    }

    #[test]
    fn test_hidden_descriptor_model_reserves_space() {
        let tree = ModelTree::new(vec![Section::empty().with_footer(
            Supplementary::new(ReuseDescriptor::hidden())
                .with_label("spacer")
                .with_size(21.0),
        )]);
        let driver = ListDriver::with_tree(RecordingSurface::new(), tree, DriverConfig::default());

        let content = driver.content_for_supplementary(0, SupplementaryKind::Footer);
        assert!(content.slot.is_hidden());
        assert!(content.label.is_none());
        assert_eq!(driver.size_for_supplementary(0, SupplementaryKind::Footer), 21.0);
    }

    #[test]
    fn test_size_for_item() {
        let tree = ModelTree::new(vec![Section::empty()
            .with_item(Item::new(cell()).with_size(44.0))
            .with_item(Item::new(cell()))]);
        let surface = RecordingSurface::new().with_default_size(ElementKind::Item, 30.0);
        let driver = ListDriver::with_tree(surface, tree, DriverConfig::default());

        assert_eq!(driver.size_for_item(IndexPath::new(0, 0)), 44.0);
        assert_eq!(driver.size_for_item(IndexPath::new(0, 1)), 30.0);
        assert_eq!(driver.size_for_item(IndexPath::new(0, 2)), 0.0);
    }
}

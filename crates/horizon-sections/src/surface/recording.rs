//! A headless surface that records and validates commands.
//!
//! [`RecordingSurface`] behaves like a strict batch-updating list widget
//! without drawing anything. It tracks the shape it displays, checks every
//! batch the way a UIKit-style collection view would, and keeps a log of the
//! commands it accepted. Tests and headless hosts use it to observe exactly
//! what a driver did.

use std::collections::HashMap;

use horizon_sections_core::logging::targets;
use tracing::{debug, trace};

use crate::diff::{EditOp, EditScript, Shape};
use crate::error::SurfaceError;
use crate::model::{ElementKind, IndexPath, ReuseDescriptor, SupplementaryKind};

use super::{DataSource, ListSurface};

/// A command accepted by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    BeginUpdates,
    EndUpdates,
    AbandonUpdates,
    InsertSections(Vec<usize>),
    DeleteSections(Vec<usize>),
    MoveSection { from: usize, to: usize },
    ReloadSections(Vec<usize>),
    ReloadSupplementary { section: usize, kind: SupplementaryKind },
    InsertItems(Vec<IndexPath>),
    DeleteItems(Vec<IndexPath>),
    MoveItem { from: IndexPath, to: IndexPath },
    ReloadItems(Vec<IndexPath>),
    ReloadData,
    Register {
        descriptor: ReuseDescriptor,
        kind: ElementKind,
    },
    DeselectItem(IndexPath),
}

impl SurfaceCommand {
    /// Returns `true` for commands that change displayed structure or content.
    pub fn is_update(&self) -> bool {
        !matches!(
            self,
            Self::BeginUpdates
                | Self::EndUpdates
                | Self::AbandonUpdates
                | Self::Register { .. }
                | Self::DeselectItem(_)
        )
    }
}

/// A headless [`ListSurface`] for tests and offscreen hosts.
///
/// # Example
///
/// ```
/// use horizon_sections::model::{ElementKind, ModelTree, Section};
/// use horizon_sections::surface::{ListSurface, RecordingSurface, SurfaceCommand};
///
/// let mut surface = RecordingSurface::new().with_default_size(ElementKind::Header, 50.0);
/// surface.reload_data(&ModelTree::new(vec![Section::empty()]));
///
/// assert_eq!(surface.commands(), &[SurfaceCommand::ReloadData]);
/// assert_eq!(surface.shape().section_count(), 1);
/// assert_eq!(surface.default_size(ElementKind::Header), Some(50.0));
/// ```
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<SurfaceCommand>,
    shape: Shape,
    pending: Option<EditScript>,
    default_sizes: HashMap<ElementKind, f32>,
    rejection: Option<String>,
}

impl RecordingSurface {
    /// Creates an empty surface with no default sizes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the reference size for an element kind.
    pub fn with_default_size(mut self, kind: ElementKind, size: f32) -> Self {
        self.default_sizes.insert(kind, size);
        self
    }

    /// Sets or clears the reference size for an element kind.
    pub fn set_default_size(&mut self, kind: ElementKind, size: Option<f32>) {
        match size {
            Some(size) => {
                self.default_sizes.insert(kind, size);
            }
            None => {
                self.default_sizes.remove(&kind);
            }
        }
    }

    /// Makes the next `end_updates` fail with [`SurfaceError::Rejected`].
    pub fn reject_next_batch(&mut self, message: impl Into<String>) {
        self.rejection = Some(message.into());
    }

    /// Returns the accepted commands in order.
    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    /// Returns and clears the command log.
    pub fn take_commands(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Clears the command log.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Returns the shape the surface currently displays.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns `true` while a batch is open.
    pub fn in_transaction(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the number of `reload_data` commands accepted.
    pub fn reload_data_count(&self) -> usize {
        self.count(|command| matches!(command, SurfaceCommand::ReloadData))
    }

    /// Returns the number of batches committed.
    pub fn batch_count(&self) -> usize {
        self.count(|command| matches!(command, SurfaceCommand::EndUpdates))
    }

    /// Returns the number of `deselect_item` commands accepted.
    pub fn deselect_count(&self) -> usize {
        self.count(|command| matches!(command, SurfaceCommand::DeselectItem(_)))
    }

    /// Returns the registrations in the order they were issued.
    pub fn registrations(&self) -> Vec<(ElementKind, String)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                SurfaceCommand::Register { descriptor, kind } => {
                    Some((*kind, descriptor.identifier().to_string()))
                }
                _ => None,
            })
            .collect()
    }

    fn count(&self, predicate: impl Fn(&SurfaceCommand) -> bool) -> usize {
        self.commands.iter().filter(|command| predicate(command)).count()
    }

    fn record(&mut self, command: SurfaceCommand) {
        trace!(target: targets::SURFACE, ?command, "accepted");
        self.commands.push(command);
    }

    fn batch(&mut self, operation: &'static str) -> Result<&mut EditScript, SurfaceError> {
        self.pending
            .as_mut()
            .ok_or(SurfaceError::NoTransaction { operation })
    }

    fn check_section(&self, index: usize) -> Result<(), SurfaceError> {
        let count = self.shape.section_count();
        if index < count {
            Ok(())
        } else {
            Err(SurfaceError::SectionOutOfRange { index, count })
        }
    }

    fn check_item(&self, path: IndexPath) -> Result<(), SurfaceError> {
        self.check_section(path.section())?;
        let count = self.shape.item_count(path.section());
        if path.item() < count {
            Ok(())
        } else {
            Err(SurfaceError::ItemOutOfRange { path, count })
        }
    }
}

impl ListSurface for RecordingSurface {
    fn begin_updates(&mut self) -> Result<(), SurfaceError> {
        if self.pending.is_some() {
            return Err(SurfaceError::NestedTransaction);
        }
        self.pending = Some(EditScript::new());
        self.record(SurfaceCommand::BeginUpdates);
        Ok(())
    }

    fn end_updates(&mut self, source: &dyn DataSource) -> Result<(), SurfaceError> {
        let script = self.pending.take().ok_or(SurfaceError::NoTransaction {
            operation: "end_updates",
        })?;
        if let Some(message) = self.rejection.take() {
            return Err(SurfaceError::Rejected(message));
        }

        let next = script.simulate(&self.shape, |section| source.item_count(section))?;
        next.verify(source)?;

        debug!(
            target: targets::SURFACE,
            ops = script.len(),
            sections = next.section_count(),
            "batch committed"
        );
        self.shape = next;
        self.record(SurfaceCommand::EndUpdates);
        Ok(())
    }

    fn abandon_updates(&mut self) {
        self.pending = None;
        self.record(SurfaceCommand::AbandonUpdates);
    }

    fn insert_sections(&mut self, sections: &[usize]) -> Result<(), SurfaceError> {
        self.batch("insert_sections")?
            .extend(sections.iter().map(|&s| EditOp::InsertSection(s)));
        self.record(SurfaceCommand::InsertSections(sections.to_vec()));
        Ok(())
    }

    fn delete_sections(&mut self, sections: &[usize]) -> Result<(), SurfaceError> {
        self.batch("delete_sections")?;
        for &section in sections {
            self.check_section(section)?;
        }
        self.batch("delete_sections")?
            .extend(sections.iter().map(|&s| EditOp::DeleteSection(s)));
        self.record(SurfaceCommand::DeleteSections(sections.to_vec()));
        Ok(())
    }

    fn move_section(&mut self, from: usize, to: usize) -> Result<(), SurfaceError> {
        self.batch("move_section")?;
        self.check_section(from)?;
        self.batch("move_section")?
            .push(EditOp::MoveSection { from, to });
        self.record(SurfaceCommand::MoveSection { from, to });
        Ok(())
    }

    fn reload_sections(&mut self, sections: &[usize]) -> Result<(), SurfaceError> {
        self.batch("reload_sections")?;
        for &section in sections {
            self.check_section(section)?;
        }
        self.batch("reload_sections")?
            .extend(sections.iter().map(|&s| EditOp::ReloadSection(s)));
        self.record(SurfaceCommand::ReloadSections(sections.to_vec()));
        Ok(())
    }

    fn reload_supplementary(
        &mut self,
        section: usize,
        kind: SupplementaryKind,
    ) -> Result<(), SurfaceError> {
        self.batch("reload_supplementary")?;
        self.check_section(section)?;
        self.batch("reload_supplementary")?
            .push(EditOp::ReloadSupplementary { section, kind });
        self.record(SurfaceCommand::ReloadSupplementary { section, kind });
        Ok(())
    }

    fn insert_items(&mut self, paths: &[IndexPath]) -> Result<(), SurfaceError> {
        self.batch("insert_items")?
            .extend(paths.iter().map(|&p| EditOp::InsertItem(p)));
        self.record(SurfaceCommand::InsertItems(paths.to_vec()));
        Ok(())
    }

    fn delete_items(&mut self, paths: &[IndexPath]) -> Result<(), SurfaceError> {
        self.batch("delete_items")?;
        for &path in paths {
            self.check_item(path)?;
        }
        self.batch("delete_items")?
            .extend(paths.iter().map(|&p| EditOp::DeleteItem(p)));
        self.record(SurfaceCommand::DeleteItems(paths.to_vec()));
        Ok(())
    }

    fn move_item(&mut self, from: IndexPath, to: IndexPath) -> Result<(), SurfaceError> {
        self.batch("move_item")?;
        self.check_item(from)?;
        self.batch("move_item")?.push(EditOp::MoveItem { from, to });
        self.record(SurfaceCommand::MoveItem { from, to });
        Ok(())
    }

    fn reload_items(&mut self, paths: &[IndexPath]) -> Result<(), SurfaceError> {
        self.batch("reload_items")?;
        for &path in paths {
            self.check_item(path)?;
        }
        self.batch("reload_items")?
            .extend(paths.iter().map(|&p| EditOp::ReloadItem(p)));
        self.record(SurfaceCommand::ReloadItems(paths.to_vec()));
        Ok(())
    }

    fn reload_data(&mut self, source: &dyn DataSource) {
        self.shape = Shape::of(source);
        self.record(SurfaceCommand::ReloadData);
    }

    fn register_reuse_descriptor(&mut self, descriptor: &ReuseDescriptor, kind: ElementKind) {
        self.record(SurfaceCommand::Register {
            descriptor: descriptor.clone(),
            kind,
        });
    }

    fn deselect_item(&mut self, path: IndexPath) {
        self.record(SurfaceCommand::DeselectItem(path));
    }

    fn default_size(&self, kind: ElementKind) -> Option<f32> {
        self.default_sizes.get(&kind).copied()
    }
}

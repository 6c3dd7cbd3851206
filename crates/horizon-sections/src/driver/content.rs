//! Payloads the driver hands to the surface.

use std::sync::Arc;

use crate::model::{IndexPath, ItemModel, ReuseDescriptor, SupplementaryKind, SupplementaryModel};

/// What occupies a header or footer slot.
#[derive(Clone)]
pub enum SupplementarySlot {
    /// The section supplies a model.
    Model(Arc<dyn SupplementaryModel>),
    /// The section has no model here, or does not exist.
    Hidden,
}

impl SupplementarySlot {
    /// Returns the model, if any.
    pub fn model(&self) -> Option<&Arc<dyn SupplementaryModel>> {
        match self {
            Self::Model(model) => Some(model),
            Self::Hidden => None,
        }
    }

    /// Returns `true` for the hidden placeholder.
    pub fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden)
    }
}

impl std::fmt::Debug for SupplementarySlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Model(model) => f
                .debug_tuple("Model")
                .field(&model.reuse_descriptor().identifier())
                .finish(),
            Self::Hidden => f.write_str("Hidden"),
        }
    }
}

/// Everything a surface needs to configure an item cell.
#[derive(Clone)]
pub struct ItemContent {
    /// Where the item is rendered.
    pub path: IndexPath,
    /// Which renderer to dequeue.
    pub descriptor: ReuseDescriptor,
    /// The model to configure the renderer with.
    pub model: Arc<dyn ItemModel>,
    /// The model's label.
    pub label: Option<String>,
    /// The resolved accessibility identifier.
    pub accessibility_identifier: Option<String>,
}

impl std::fmt::Debug for ItemContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemContent")
            .field("path", &self.path)
            .field("descriptor", &self.descriptor)
            .field("label", &self.label)
            .field("accessibility_identifier", &self.accessibility_identifier)
            .finish_non_exhaustive()
    }
}

/// Everything a surface needs to configure a header or footer view.
#[derive(Debug, Clone)]
pub struct SupplementaryContent {
    /// The section the view belongs to.
    pub section: usize,
    /// Header or footer.
    pub kind: SupplementaryKind,
    /// Which renderer to dequeue; the hidden placeholder for absent slots.
    pub descriptor: ReuseDescriptor,
    /// What occupies the slot.
    pub slot: SupplementarySlot,
    /// The model's label.
    pub label: Option<String>,
    /// The resolved accessibility identifier.
    pub accessibility_identifier: Option<String>,
}

impl SupplementaryContent {
    pub(crate) fn hidden(section: usize, kind: SupplementaryKind) -> Self {
        Self {
            section,
            kind,
            descriptor: ReuseDescriptor::hidden(),
            slot: SupplementarySlot::Hidden,
            label: None,
            accessibility_identifier: None,
        }
    }

    pub(crate) fn for_model(
        section: usize,
        kind: SupplementaryKind,
        model: &Arc<dyn SupplementaryModel>,
    ) -> Self {
        Self {
            section,
            kind,
            descriptor: model.reuse_descriptor().clone(),
            slot: SupplementarySlot::Model(model.clone()),
            label: model.label().map(str::to_owned),
            accessibility_identifier: model
                .accessibility_format()
                .map(|format| format.resolve_section(section)),
        }
    }
}

impl ItemContent {
    pub(crate) fn for_model(path: IndexPath, model: &Arc<dyn ItemModel>) -> Self {
        Self {
            path,
            descriptor: model.reuse_descriptor().clone(),
            model: model.clone(),
            label: model.label().map(str::to_owned),
            accessibility_identifier: model
                .accessibility_format()
                .map(|format| format.resolve(path)),
        }
    }
}

/// How a tree reached the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMode {
    /// Applied as a batch of edits.
    Diffed,
    /// Applied with a full data reload.
    Reloaded,
}

/// Describes one commit, for [`DriverSignals::tree_committed`](super::DriverSignals).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitSummary {
    /// Section count of the committed tree.
    pub sections: usize,
    /// Number of edits applied; zero for full reloads.
    pub edits: usize,
    /// How the tree was applied.
    pub mode: CommitMode,
}

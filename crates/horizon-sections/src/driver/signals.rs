//! Driver notifications.

use horizon_sections_core::Signal;

use crate::model::{ElementKind, IndexPath};

use super::content::CommitSummary;

/// Signals emitted by a [`ListDriver`](super::ListDriver).
///
/// Slots run synchronously on the driver's thread, after the driver has
/// finished the operation they describe.
#[derive(Debug, Default)]
pub struct DriverSignals {
    /// A tree was committed, by batch or by full reload.
    pub tree_committed: Signal<CommitSummary>,
    /// An item selection was routed to its model.
    pub item_selected: Signal<IndexPath>,
    /// An item deselection was routed to its model.
    pub item_deselected: Signal<IndexPath>,
    /// A reuse descriptor was registered with the surface.
    pub descriptor_registered: Signal<(ElementKind, String)>,
}

impl DriverSignals {
    /// Creates signals with no connections.
    pub fn new() -> Self {
        Self::default()
    }
}

//! Prelude module for Horizon Sections.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```
//! use horizon_sections::prelude::*;
//! ```
//!
//! This provides access to:
//! - Model building (`ModelTree`, `Section`, `Item`, `Supplementary`)
//! - Model capabilities (`ViewModel`, `ItemModel`, `SupplementaryModel`)
//! - The driver and its configuration (`ListDriver`, `DriverConfig`)
//! - Surface plumbing (`ListSurface`, `DataSource`, `RecordingSurface`)

// ============================================================================
// Models
// ============================================================================

pub use crate::model::{
    AccessibilityFormat, ElementKind, IndexPath, Item, ModelTree, ReuseDescriptor, Section,
    Supplementary, SupplementaryKind,
};
pub use crate::model::{ItemModel, SupplementaryModel, ViewModel};

// ============================================================================
// Driver
// ============================================================================

pub use crate::driver::{
    CommitMode, CommitSummary, DriverConfig, ItemContent, ListDriver, SupplementaryContent,
    SupplementarySlot,
};
pub use crate::size::{SizePolicy, SizeSource};

// ============================================================================
// Surface
// ============================================================================

pub use crate::surface::{DataSource, ListSurface, RecordingSurface};

// ============================================================================
// Signal/Slot
// ============================================================================

pub use crate::{ConnectionId, Signal};

//! Error types for reconciliation.

use thiserror::Error;

use crate::model::IndexPath;

/// Result type alias for reconciliation operations.
pub type Result<T> = std::result::Result<T, ReconcileError>;

/// A batch of surface edits that cannot be applied to the shape it targets.
///
/// Produced by [`EditScript::simulate`](crate::diff::EditScript::simulate).
/// Deletes, reloads, and move sources are checked against the previous
/// shape; inserts and move destinations against the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    /// A section index outside the shape it addresses.
    #[error("{operation}: section {index} out of range (count {count})")]
    SectionOutOfRange {
        operation: &'static str,
        index: usize,
        count: usize,
    },

    /// An item index outside the section it addresses.
    #[error("{operation}: item {path} out of range (section has {count} items)")]
    ItemOutOfRange {
        operation: &'static str,
        path: IndexPath,
        count: usize,
    },

    /// The same section addressed twice in one batch.
    #[error("{operation}: section {index} addressed more than once")]
    DuplicateSection { operation: &'static str, index: usize },

    /// The same item addressed twice in one batch.
    #[error("{operation}: item {path} addressed more than once")]
    DuplicateItem {
        operation: &'static str,
        path: IndexPath,
    },

    /// An edit addressing a section the same batch deletes.
    #[error("{operation}: section {index} is deleted in this batch")]
    SectionDeleted { operation: &'static str, index: usize },

    /// An edit addressing the contents of a section the same batch reloads.
    #[error("{operation}: section {index} is reloaded in this batch")]
    SectionReloaded { operation: &'static str, index: usize },

    /// An item edit targeting a section the same batch inserts.
    #[error("{operation}: section {section} is inserted in this batch")]
    ItemsInInsertedSection {
        operation: &'static str,
        section: usize,
    },

    /// The batch result disagrees with the data source's section count.
    #[error("section count mismatch: data source has {expected}, batch produces {actual}")]
    SectionCountMismatch { expected: usize, actual: usize },

    /// The batch result disagrees with the data source's item count.
    #[error("item count mismatch in section {section}: data source has {expected}, batch produces {actual}")]
    ItemCountMismatch {
        section: usize,
        expected: usize,
        actual: usize,
    },
}

/// Errors reported by a [`ListSurface`](crate::surface::ListSurface).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    /// An update command issued outside `begin_updates`/`end_updates`.
    #[error("{operation} issued outside an update transaction")]
    NoTransaction { operation: &'static str },

    /// `begin_updates` while a transaction is already open.
    #[error("update transaction already open")]
    NestedTransaction,

    /// A section index the surface does not know.
    #[error("section {index} out of range (surface has {count})")]
    SectionOutOfRange { index: usize, count: usize },

    /// An item index the surface does not know.
    #[error("item {path} out of range (section has {count} items)")]
    ItemOutOfRange { path: IndexPath, count: usize },

    /// The batch is inconsistent with the data source.
    #[error("inconsistent update: {0}")]
    Inconsistent(#[from] ConsistencyError),

    /// Surface-specific rejection.
    #[error("surface rejected update: {0}")]
    Rejected(String),
}

impl SurfaceError {
    /// Create a surface-specific rejection.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }
}

/// Errors that abort a tree swap.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReconcileError {
    /// The surface refused part of the transaction.
    #[error("surface transaction failed: {0}")]
    Surface(#[from] SurfaceError),
}

/// Errors reading or writing driver configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed into a configuration.
    #[error("failed to parse driver configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize driver configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

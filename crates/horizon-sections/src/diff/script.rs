//! Edit scripts: batched structural edits for a list surface.

use std::fmt;

use horizon_sections_core::{TreeFormatOptions, TreeWriter};

use crate::model::{IndexPath, SupplementaryKind};

/// A single structural edit.
///
/// Deletes, reloads, and move sources address the previous tree; inserts and
/// move destinations address the next tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOp {
    /// Remove a whole section.
    DeleteSection(usize),
    /// Add a whole section.
    InsertSection(usize),
    /// Move a section, keeping its contents.
    MoveSection { from: usize, to: usize },
    /// Replace a section wholesale. Equivalent to deleting the section at
    /// its previous index and inserting one at the same next index.
    ReloadSection(usize),
    /// Re-render a header or footer.
    ReloadSupplementary {
        section: usize,
        kind: SupplementaryKind,
    },
    /// Remove an item.
    DeleteItem(IndexPath),
    /// Add an item.
    InsertItem(IndexPath),
    /// Move an item, keeping its rendering object.
    MoveItem { from: IndexPath, to: IndexPath },
    /// Re-render an item in place.
    ReloadItem(IndexPath),
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteSection(section) => write!(f, "delete section {section}"),
            Self::InsertSection(section) => write!(f, "insert section {section}"),
            Self::MoveSection { from, to } => write!(f, "move section {from} -> {to}"),
            Self::ReloadSection(section) => write!(f, "reload section {section}"),
            Self::ReloadSupplementary { section, kind } => {
                write!(f, "reload {kind} {section}")
            }
            Self::DeleteItem(path) => write!(f, "delete item {path}"),
            Self::InsertItem(path) => write!(f, "insert item {path}"),
            Self::MoveItem { from, to } => write!(f, "move item {from} -> {to}"),
            Self::ReloadItem(path) => write!(f, "reload item {path}"),
        }
    }
}

/// An ordered batch of edits, grouped by operation type.
///
/// Operations are stored per type and iterated in application order:
/// section deletes, inserts, moves, reloads, supplementary reloads, then
/// item deletes, inserts, moves, and reloads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditScript {
    pub(crate) section_deletes: Vec<usize>,
    pub(crate) section_inserts: Vec<usize>,
    pub(crate) section_moves: Vec<(usize, usize)>,
    pub(crate) section_reloads: Vec<usize>,
    pub(crate) supplementary_reloads: Vec<(usize, SupplementaryKind)>,
    pub(crate) item_deletes: Vec<IndexPath>,
    pub(crate) item_inserts: Vec<IndexPath>,
    pub(crate) item_moves: Vec<(IndexPath, IndexPath)>,
    pub(crate) item_reloads: Vec<IndexPath>,
}

impl EditScript {
    /// Creates an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an operation to its group.
    pub fn push(&mut self, op: EditOp) {
        match op {
            EditOp::DeleteSection(section) => self.section_deletes.push(section),
            EditOp::InsertSection(section) => self.section_inserts.push(section),
            EditOp::MoveSection { from, to } => self.section_moves.push((from, to)),
            EditOp::ReloadSection(section) => self.section_reloads.push(section),
            EditOp::ReloadSupplementary { section, kind } => {
                self.supplementary_reloads.push((section, kind))
            }
            EditOp::DeleteItem(path) => self.item_deletes.push(path),
            EditOp::InsertItem(path) => self.item_inserts.push(path),
            EditOp::MoveItem { from, to } => self.item_moves.push((from, to)),
            EditOp::ReloadItem(path) => self.item_reloads.push(path),
        }
    }

    /// Iterates all operations in application order.
    pub fn ops(&self) -> impl Iterator<Item = EditOp> + '_ {
        let sections = self
            .section_deletes
            .iter()
            .map(|&s| EditOp::DeleteSection(s))
            .chain(self.section_inserts.iter().map(|&s| EditOp::InsertSection(s)))
            .chain(
                self.section_moves
                    .iter()
                    .map(|&(from, to)| EditOp::MoveSection { from, to }),
            )
            .chain(self.section_reloads.iter().map(|&s| EditOp::ReloadSection(s)))
            .chain(
                self.supplementary_reloads
                    .iter()
                    .map(|&(section, kind)| EditOp::ReloadSupplementary { section, kind }),
            );

        let items = self
            .item_deletes
            .iter()
            .map(|&p| EditOp::DeleteItem(p))
            .chain(self.item_inserts.iter().map(|&p| EditOp::InsertItem(p)))
            .chain(
                self.item_moves
                    .iter()
                    .map(|&(from, to)| EditOp::MoveItem { from, to }),
            )
            .chain(self.item_reloads.iter().map(|&p| EditOp::ReloadItem(p)));

        sections.chain(items)
    }

    /// Returns the total number of operations.
    pub fn len(&self) -> usize {
        self.section_deletes.len()
            + self.section_inserts.len()
            + self.section_moves.len()
            + self.section_reloads.len()
            + self.supplementary_reloads.len()
            + self.item_deletes.len()
            + self.item_inserts.len()
            + self.item_moves.len()
            + self.item_reloads.len()
    }

    /// Returns `true` if the script makes no changes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the script only re-renders existing elements.
    pub fn is_reload_only(&self) -> bool {
        self.section_deletes.is_empty()
            && self.section_inserts.is_empty()
            && self.section_moves.is_empty()
            && self.item_deletes.is_empty()
            && self.item_inserts.is_empty()
            && self.item_moves.is_empty()
    }

    /// Sorts every group by index. Application semantics do not depend on
    /// the order within a group.
    pub fn normalize(&mut self) {
        self.section_deletes.sort_unstable();
        self.section_inserts.sort_unstable();
        self.section_moves.sort_unstable();
        self.section_reloads.sort_unstable();
        self.supplementary_reloads.sort_unstable();
        self.item_deletes.sort_unstable();
        self.item_inserts.sort_unstable();
        self.item_moves.sort_unstable();
        self.item_reloads.sort_unstable();
    }

    /// Section deletes, previous indices.
    pub fn section_deletes(&self) -> &[usize] {
        &self.section_deletes
    }

    /// Section inserts, next indices.
    pub fn section_inserts(&self) -> &[usize] {
        &self.section_inserts
    }

    /// Section moves, previous index to next index.
    pub fn section_moves(&self) -> &[(usize, usize)] {
        &self.section_moves
    }

    /// Section reloads, previous indices.
    pub fn section_reloads(&self) -> &[usize] {
        &self.section_reloads
    }

    /// Header/footer reloads, previous section indices.
    pub fn supplementary_reloads(&self) -> &[(usize, SupplementaryKind)] {
        &self.supplementary_reloads
    }

    /// Item deletes, previous paths.
    pub fn item_deletes(&self) -> &[IndexPath] {
        &self.item_deletes
    }

    /// Item inserts, next paths.
    pub fn item_inserts(&self) -> &[IndexPath] {
        &self.item_inserts
    }

    /// Item moves, previous path to next path.
    pub fn item_moves(&self) -> &[(IndexPath, IndexPath)] {
        &self.item_moves
    }

    /// Item reloads, previous paths.
    pub fn item_reloads(&self) -> &[IndexPath] {
        &self.item_reloads
    }

    /// Renders the script as an outline grouped into section and item edits.
    pub fn outline(&self, options: TreeFormatOptions) -> String {
        let mut writer = TreeWriter::new(options);
        writer.line(0, true, &format!("edit script ({} ops)", self.len()));

        let (sections, items): (Vec<EditOp>, Vec<EditOp>) = self.ops().partition(|op| {
            !matches!(
                op,
                EditOp::DeleteItem(_)
                    | EditOp::InsertItem(_)
                    | EditOp::MoveItem { .. }
                    | EditOp::ReloadItem(_)
            )
        });

        let groups = [("sections", sections), ("items", items)];
        let non_empty: Vec<_> = groups.iter().filter(|(_, ops)| !ops.is_empty()).collect();
        for (group_index, (title, ops)) in non_empty.iter().enumerate() {
            writer.line(1, group_index + 1 == non_empty.len(), title);
            for (op_index, op) in ops.iter().enumerate() {
                writer.line(2, op_index + 1 == ops.len(), &op.to_string());
            }
        }

        writer.finish()
    }
}

impl fmt::Display for EditScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for op in self.ops() {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{op}")?;
        }
        if first {
            f.write_str("(no changes)")?;
        }
        Ok(())
    }
}

impl FromIterator<EditOp> for EditScript {
    fn from_iter<I: IntoIterator<Item = EditOp>>(iter: I) -> Self {
        let mut script = Self::new();
        for op in iter {
            script.push(op);
        }
        script
    }
}

impl Extend<EditOp> for EditScript {
    fn extend<I: IntoIterator<Item = EditOp>>(&mut self, iter: I) {
        for op in iter {
            self.push(op);
        }
    }
}

//! The diff engine.
//!
//! [`diff`] compares two model trees and produces the [`EditScript`] that
//! turns a surface showing the previous tree into one showing the next.
//!
//! Sections and items are matched by identity: their explicit key when one
//! is set, their position otherwise. Matched elements that keep their
//! relative order stay in place; the rest move. Matched elements whose
//! observable content changed (see [`fingerprint`](crate::model::fingerprint))
//! are reloaded.
//!
//! Two constraints of batched surfaces shape the output:
//!
//! - A moving element cannot be reloaded in the same batch, so a moved item
//!   or section whose content changed is deleted and re-inserted instead.
//! - Supplementary reloads address the previous section index, like every
//!   other reload.
//!
//! # Example
//!
//! ```
//! use horizon_sections::diff::{diff, EditOp};
//! use horizon_sections::model::{Item, ModelTree, ReuseDescriptor, Section};
//!
//! let cell = ReuseDescriptor::new("Cell", "cell");
//! let keyed = |key: &str| Item::new(cell.clone()).with_key(key);
//!
//! let previous = ModelTree::new(vec![Section::empty().with_items([keyed("a"), keyed("b")])]);
//! let next = ModelTree::new(vec![Section::empty().with_items([keyed("b"), keyed("a")])]);
//!
//! let script = diff(&previous, &next);
//! assert_eq!(script.len(), 1);
//! assert!(matches!(script.ops().next(), Some(EditOp::MoveItem { .. })));
//! ```

mod matching;
mod script;
mod shape;

use std::sync::Arc;

use horizon_sections_core::logging::targets;
use tracing::{instrument, trace};

use crate::model::{
    IndexPath, ItemModel, ModelTree, Section, SupplementaryKind, SupplementaryModel, fingerprint,
};

use matching::{Identity, match_sequences};

pub use script::{EditOp, EditScript};
pub use shape::Shape;

/// Computes the edit script that turns `previous` into `next`.
///
/// Diffing a tree against itself yields an empty script.
#[instrument(
    target = "horizon_sections::diff",
    level = "debug",
    skip_all,
    fields(previous = previous.section_count(), next = next.section_count())
)]
pub fn diff(previous: &ModelTree, next: &ModelTree) -> EditScript {
    let mut script = EditScript::new();
    if previous.ptr_eq(next) {
        return script;
    }

    let previous_ids = section_identities(previous.sections());
    let next_ids = section_identities(next.sections());
    let matching = match_sequences(&previous_ids, &next_ids);

    for section in matching.deleted() {
        script.push(EditOp::DeleteSection(section));
    }
    for section in matching.inserted() {
        script.push(EditOp::InsertSection(section));
    }

    for (from, to, stable) in matching.pairs() {
        let old = &previous.sections()[from];
        let new = &next.sections()[to];
        let changed: Vec<SupplementaryKind> = SupplementaryKind::ALL
            .into_iter()
            .filter(|&kind| supplementary_changed(old.supplementary(kind), new.supplementary(kind)))
            .collect();

        if stable {
            for kind in changed {
                script.push(EditOp::ReloadSupplementary {
                    section: from,
                    kind,
                });
            }
        } else if changed.is_empty() {
            script.push(EditOp::MoveSection { from, to });
        } else {
            trace!(target: targets::DIFF, from, to, "moved section changed, replacing");
            script.push(EditOp::DeleteSection(from));
            script.push(EditOp::InsertSection(to));
            continue;
        }

        diff_items(&mut script, old, from, new, to);
    }

    script.normalize();
    trace!(target: targets::DIFF, ops = script.len(), "diff complete");
    script
}

fn section_identities(sections: &[Section]) -> Vec<Identity> {
    sections
        .iter()
        .enumerate()
        .map(|(position, section)| Identity::resolve(section.key().map(str::to_owned), position))
        .collect()
}

fn item_identities(items: &[Arc<dyn ItemModel>]) -> Vec<Identity> {
    items
        .iter()
        .enumerate()
        .map(|(position, item)| Identity::resolve(item.diffing_key(), position))
        .collect()
}

fn supplementary_changed(
    old: Option<&Arc<dyn SupplementaryModel>>,
    new: Option<&Arc<dyn SupplementaryModel>>,
) -> bool {
    match (old, new) {
        (None, None) => false,
        (Some(old), Some(new)) => {
            !Arc::ptr_eq(old, new)
                && (old.diffing_key() != new.diffing_key()
                    || fingerprint(old.as_ref()) != fingerprint(new.as_ref()))
        }
        _ => true,
    }
}

fn item_changed(old: &Arc<dyn ItemModel>, new: &Arc<dyn ItemModel>) -> bool {
    !Arc::ptr_eq(old, new) && fingerprint(old.as_ref()) != fingerprint(new.as_ref())
}

fn diff_items(script: &mut EditScript, old: &Section, from: usize, new: &Section, to: usize) {
    let matching = match_sequences(&item_identities(old.items()), &item_identities(new.items()));

    for item in matching.deleted() {
        script.push(EditOp::DeleteItem(IndexPath::new(from, item)));
    }
    for item in matching.inserted() {
        script.push(EditOp::InsertItem(IndexPath::new(to, item)));
    }

    for (old_item, new_item, stable) in matching.pairs() {
        let source = IndexPath::new(from, old_item);
        let destination = IndexPath::new(to, new_item);
        let changed = item_changed(&old.items()[old_item], &new.items()[new_item]);

        match (stable, changed) {
            (true, false) => {}
            (true, true) => script.push(EditOp::ReloadItem(source)),
            (false, false) => script.push(EditOp::MoveItem {
                from: source,
                to: destination,
            }),
            (false, true) => {
                script.push(EditOp::DeleteItem(source));
                script.push(EditOp::InsertItem(destination));
            }
        }
    }
}

//! Tree shapes and batch simulation.
//!
//! A [`Shape`] is all a list surface knows about its content: how many
//! sections there are and how many items each holds. Simulating an
//! [`EditScript`] against a shape applies the batch-update index rules and
//! reports the first violation, which is what a strict surface would reject.

use std::collections::HashSet;

use crate::error::ConsistencyError;
use crate::model::IndexPath;
use crate::surface::DataSource;

use super::script::EditScript;

/// Item counts per section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Shape {
    counts: Vec<usize>,
}

impl Shape {
    /// Creates a shape from item counts per section.
    pub fn new(counts: Vec<usize>) -> Self {
        Self { counts }
    }

    /// Captures the shape a data source currently reports.
    pub fn of(source: &dyn DataSource) -> Self {
        Self::new(
            (0..source.section_count())
                .map(|section| source.item_count(section))
                .collect(),
        )
    }

    /// Returns the number of sections.
    pub fn section_count(&self) -> usize {
        self.counts.len()
    }

    /// Returns the number of items in `section`, or 0 if out of range.
    pub fn item_count(&self, section: usize) -> usize {
        self.counts.get(section).copied().unwrap_or(0)
    }

    /// Returns the counts per section.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Checks that `source` reports exactly this shape.
    pub fn verify(&self, source: &dyn DataSource) -> Result<(), ConsistencyError> {
        let expected = source.section_count();
        if expected != self.section_count() {
            return Err(ConsistencyError::SectionCountMismatch {
                expected,
                actual: self.section_count(),
            });
        }
        for (section, &actual) in self.counts.iter().enumerate() {
            let expected = source.item_count(section);
            if expected != actual {
                return Err(ConsistencyError::ItemCountMismatch {
                    section,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

impl DataSource for Shape {
    fn section_count(&self) -> usize {
        self.section_count()
    }

    fn item_count(&self, section: usize) -> usize {
        self.item_count(section)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PreviousSection {
    Kept,
    Deleted,
    Reloaded,
    MovedOut,
}

#[derive(Debug, Clone, Copy)]
enum NextSection {
    Inserted(usize),
    From(usize),
}

impl EditScript {
    /// Applies the script to `previous` and returns the resulting shape.
    ///
    /// `inserted_count` supplies the item count of each section the script
    /// inserts or reloads, addressed by its next index. A reloaded section
    /// keeps its place among the sections that stay, so its next index
    /// accounts for the deletes and inserts around it.
    ///
    /// # Example
    ///
    /// ```
    /// use horizon_sections::diff::{EditOp, EditScript, Shape};
    /// use horizon_sections::model::IndexPath;
    ///
    /// let script: EditScript = [
    ///     EditOp::DeleteSection(0),
    ///     EditOp::InsertItem(IndexPath::new(0, 2)),
    /// ]
    /// .into_iter()
    /// .collect();
    ///
    /// let next = script.simulate(&Shape::new(vec![4, 2]), |_| 0).unwrap();
    /// assert_eq!(next, Shape::new(vec![3]));
    /// ```
    pub fn simulate(
        &self,
        previous: &Shape,
        inserted_count: impl Fn(usize) -> usize,
    ) -> Result<Shape, ConsistencyError> {
        let old_len = previous.section_count();
        let mut old_state = vec![PreviousSection::Kept; old_len];

        let mut retire = |operation: &'static str,
                          index: usize,
                          state: PreviousSection|
         -> Result<(), ConsistencyError> {
            check_section(operation, index, old_len)?;
            match old_state[index] {
                PreviousSection::Kept => {
                    old_state[index] = state;
                    Ok(())
                }
                _ => Err(ConsistencyError::DuplicateSection { operation, index }),
            }
        };
        for &section in &self.section_deletes {
            retire("delete_sections", section, PreviousSection::Deleted)?;
        }
        for &section in &self.section_reloads {
            retire("reload_sections", section, PreviousSection::Reloaded)?;
        }
        for &(from, _) in &self.section_moves {
            retire("move_section", from, PreviousSection::MovedOut)?;
        }
        for &(section, _) in &self.supplementary_reloads {
            check_section("reload_supplementary", section, old_len)?;
            retired_check("reload_supplementary", section, old_state[section])?;
        }

        let new_len = old_len - self.section_deletes.len() + self.section_inserts.len();
        let mut slots: Vec<Option<NextSection>> = vec![None; new_len];
        let mut place = |operation: &'static str,
                         index: usize,
                         section: NextSection|
         -> Result<(), ConsistencyError> {
            check_section(operation, index, new_len)?;
            if slots[index].is_some() {
                return Err(ConsistencyError::DuplicateSection { operation, index });
            }
            slots[index] = Some(section);
            Ok(())
        };
        for &section in &self.section_inserts {
            place("insert_sections", section, NextSection::Inserted(inserted_count(section)))?;
        }
        for &(from, to) in &self.section_moves {
            place("move_section", to, NextSection::From(from))?;
        }

        let mut staying = (0..old_len).filter(|&index| {
            matches!(old_state[index], PreviousSection::Kept | PreviousSection::Reloaded)
        });
        let layout: Vec<NextSection> = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| match slot {
                Some(section) => section,
                // Slot arithmetic guarantees one staying section per open slot.
                None => match staying.next() {
                    Some(old) if old_state[old] == PreviousSection::Reloaded => {
                        NextSection::Inserted(inserted_count(index))
                    }
                    old => NextSection::From(old.unwrap_or_default()),
                },
            })
            .collect();

        // Items, previous coordinates.
        let mut removed = vec![0usize; old_len];
        let mut touched_old: HashSet<IndexPath> = HashSet::new();
        let mut touch_old = |operation: &'static str,
                             path: IndexPath,
                             removes: bool|
         -> Result<(), ConsistencyError> {
            let section = path.section();
            check_section(operation, section, old_len)?;
            retired_check(operation, section, old_state[section])?;
            let count = previous.item_count(section);
            if path.item() >= count {
                return Err(ConsistencyError::ItemOutOfRange {
                    operation,
                    path,
                    count,
                });
            }
            if !touched_old.insert(path) {
                return Err(ConsistencyError::DuplicateItem { operation, path });
            }
            if removes {
                removed[section] += 1;
            }
            Ok(())
        };
        for &path in &self.item_deletes {
            touch_old("delete_items", path, true)?;
        }
        for &(from, _) in &self.item_moves {
            touch_old("move_item", from, true)?;
        }
        for &path in &self.item_reloads {
            touch_old("reload_items", path, false)?;
        }

        // Items, next coordinates.
        let mut added = vec![0usize; new_len];
        let mut touched_new: Vec<(&'static str, IndexPath)> = Vec::new();
        let mut seen_new: HashSet<IndexPath> = HashSet::new();
        let destinations = self
            .item_inserts
            .iter()
            .map(|&path| ("insert_items", path))
            .chain(self.item_moves.iter().map(|&(_, to)| ("move_item", to)));
        for (operation, path) in destinations {
            let section = path.section();
            check_section(operation, section, new_len)?;
            if let NextSection::Inserted(_) = layout[section] {
                return Err(ConsistencyError::ItemsInInsertedSection { operation, section });
            }
            if !seen_new.insert(path) {
                return Err(ConsistencyError::DuplicateItem { operation, path });
            }
            added[section] += 1;
            touched_new.push((operation, path));
        }

        let counts: Vec<usize> = layout
            .iter()
            .enumerate()
            .map(|(index, section)| match *section {
                NextSection::Inserted(count) => count,
                NextSection::From(old) => previous.item_count(old) - removed[old] + added[index],
            })
            .collect();

        for (operation, path) in touched_new {
            let count = counts[path.section()];
            if path.item() >= count {
                return Err(ConsistencyError::ItemOutOfRange {
                    operation,
                    path,
                    count,
                });
            }
        }

        Ok(Shape::new(counts))
    }
}

fn retired_check(
    operation: &'static str,
    index: usize,
    state: PreviousSection,
) -> Result<(), ConsistencyError> {
    match state {
        PreviousSection::Deleted => Err(ConsistencyError::SectionDeleted { operation, index }),
        PreviousSection::Reloaded => Err(ConsistencyError::SectionReloaded { operation, index }),
        PreviousSection::Kept | PreviousSection::MovedOut => Ok(()),
    }
}

fn check_section(operation: &'static str, index: usize, count: usize) -> Result<(), ConsistencyError> {
    if index < count {
        Ok(())
    } else {
        Err(ConsistencyError::SectionOutOfRange {
            operation,
            index,
            count,
        })
    }
}

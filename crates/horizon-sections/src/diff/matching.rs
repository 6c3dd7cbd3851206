//! Identity matching between two sequences.
//!
//! Matching is a two-step process:
//!
//! 1. Every next element claims the earliest unclaimed previous element with
//!    the same identity. Candidates per identity are kept in a FIFO, so ties
//!    are resolved by position.
//! 2. A longest increasing subsequence over the claimed previous indices,
//!    taken in next order, selects the largest set of matches that keep
//!    their relative order. Those stay put; every other match is a move.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// How an element is recognized across trees.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Identity {
    /// An explicit content identity.
    Keyed(String),
    /// No explicit identity; the position within the sequence stands in.
    Positional(usize),
}

impl Identity {
    pub(crate) fn resolve(key: Option<String>, position: usize) -> Self {
        match key {
            Some(key) => Self::Keyed(key),
            None => Self::Positional(position),
        }
    }
}

/// Result of matching a previous sequence against a next sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Matching {
    /// For each next index, the matched previous index.
    pub next_to_prev: Vec<Option<usize>>,
    /// For each previous index, whether it was matched.
    pub prev_matched: Vec<bool>,
    /// For each next index, whether the match stays in place.
    pub stable: Vec<bool>,
}

impl Matching {
    /// Previous indices without a counterpart, in ascending order.
    pub fn deleted(&self) -> impl Iterator<Item = usize> + '_ {
        self.prev_matched
            .iter()
            .enumerate()
            .filter(|(_, matched)| !**matched)
            .map(|(index, _)| index)
    }

    /// Next indices without a counterpart, in ascending order.
    pub fn inserted(&self) -> impl Iterator<Item = usize> + '_ {
        self.next_to_prev
            .iter()
            .enumerate()
            .filter(|(_, prev)| prev.is_none())
            .map(|(index, _)| index)
    }

    /// Matched pairs `(previous, next, stable)` in next order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.next_to_prev
            .iter()
            .enumerate()
            .filter_map(|(next, prev)| prev.map(|prev| (prev, next, self.stable[next])))
    }
}

/// Matches `next` against `previous` by identity.
pub(crate) fn match_sequences<K: Eq + Hash>(previous: &[K], next: &[K]) -> Matching {
    let mut candidates: HashMap<&K, VecDeque<usize>> = HashMap::with_capacity(previous.len());
    for (index, identity) in previous.iter().enumerate() {
        candidates.entry(identity).or_default().push_back(index);
    }

    let mut prev_matched = vec![false; previous.len()];
    let next_to_prev: Vec<Option<usize>> = next
        .iter()
        .map(|identity| {
            let prev = candidates.get_mut(identity)?.pop_front()?;
            prev_matched[prev] = true;
            Some(prev)
        })
        .collect();

    let mut stable = vec![false; next.len()];
    let matched: Vec<(usize, usize)> = next_to_prev
        .iter()
        .enumerate()
        .filter_map(|(next, prev)| prev.map(|prev| (next, prev)))
        .collect();
    let sequence: Vec<usize> = matched.iter().map(|&(_, prev)| prev).collect();
    for position in longest_increasing_subsequence(&sequence) {
        stable[matched[position].0] = true;
    }

    Matching {
        next_to_prev,
        prev_matched,
        stable,
    }
}

/// Returns the positions of one longest strictly increasing subsequence.
///
/// Patience sorting with predecessor links, `O(n log n)`. Positions are
/// returned in ascending order.
pub(crate) fn longest_increasing_subsequence(values: &[usize]) -> Vec<usize> {
    // tails[k] is the position of the smallest tail of an increasing run of length k + 1.
    let mut tails: Vec<usize> = Vec::new();
    let mut predecessors: Vec<Option<usize>> = vec![None; values.len()];

    for (position, &value) in values.iter().enumerate() {
        let slot = tails.partition_point(|&tail| values[tail] < value);
        if slot > 0 {
            predecessors[position] = Some(tails[slot - 1]);
        }
        if slot == tails.len() {
            tails.push(position);
        } else {
            tails[slot] = position;
        }
    }

    let mut result = Vec::with_capacity(tails.len());
    let mut cursor = tails.last().copied();
    while let Some(position) = cursor {
        result.push(position);
        cursor = predecessors[position];
    }
    result.reverse();
    result
}

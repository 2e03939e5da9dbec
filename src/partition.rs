//! Exhaustive group partitions.
//!
//! A [`Partition`] assigns every unit to exactly one group. It is built from
//! arbitrary hashable labels and stores dense group indices, so the inference
//! engines never touch label types. Like [`Adjacency`][crate::Adjacency], a
//! partition stays fixed for the lifetime of an inference run.

use crate::{Error, Result};
use std::collections::HashMap;
use std::hash::Hash;

/// A mapping from unit index to group index, exhaustive over all units.
///
/// Group indices are assigned in order of first appearance of each label;
/// every group statistic in this crate is a sum over groups, so the
/// numbering does not affect any result.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Partition {
    group_of: Vec<usize>,
    counts: Vec<usize>,
}

impl Partition {
    /// Builds a partition from one group label per unit.
    ///
    /// ```
    /// use inequality::Partition;
    ///
    /// let p = Partition::new(&["a", "b", "a", "c"]).unwrap();
    /// assert_eq!(p.units(), 4);
    /// assert_eq!(p.groups(), 3);
    /// assert_eq!(p.group_of(2), 0);
    /// assert_eq!(p.counts(), &[2, 1, 1]);
    /// ```
    pub fn new<L: Hash + Eq>(labels: &[L]) -> Result<Self> {
        if labels.is_empty() {
            return Err(Error::Empty);
        }

        let mut index: HashMap<&L, usize> = HashMap::new();
        let mut group_of = Vec::with_capacity(labels.len());
        let mut counts = Vec::new();
        for label in labels {
            let next = counts.len();
            let group = *index.entry(label).or_insert(next);
            if group == counts.len() {
                counts.push(0);
            }
            counts[group] += 1;
            group_of.push(group);
        }
        Ok(Partition { group_of, counts })
    }

    /// The number of units partitioned.
    pub fn units(&self) -> usize {
        self.group_of.len()
    }

    /// The number of distinct groups.
    pub fn groups(&self) -> usize {
        self.counts.len()
    }

    /// The group index of `unit`.
    pub fn group_of(&self, unit: usize) -> usize {
        self.group_of[unit]
    }

    /// One group index per unit, in unit order.
    pub fn assignments(&self) -> &[usize] {
        &self.group_of
    }

    /// The number of units in each group.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }
}

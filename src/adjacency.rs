//! Binary spatial neighbor structures.
//!
//! An [`Adjacency`] maps each unit index to the indices of its neighbors. It
//! is symmetric, carries no self-loops, and stays fixed for the lifetime of
//! an inference run: permutation tests reshuffle values across units, never
//! the neighbor structure itself.

use crate::{Error, Result};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::hash::Hash;

/// Contiguity structures have short neighbor lists, so keep them inline.
type NeighborList = SmallVec<[usize; 8]>;

/// A symmetric unit-to-neighbors mapping over `n` units.
#[derive(Clone, Debug)]
pub struct Adjacency {
    neighbors: Vec<NeighborList>,
}

impl Adjacency {
    /// Builds an adjacency structure from undirected edges.
    ///
    /// Each edge is stored in both directions. Duplicate edges and self-loops
    /// are dropped. Fails if an edge references a unit at or beyond `units`.
    ///
    /// ```
    /// use inequality::Adjacency;
    ///
    /// let w = Adjacency::from_edges(4, vec![(0, 1), (1, 2), (2, 3), (2, 1)]).unwrap();
    /// assert_eq!(w.neighbors(1), &[0, 2]);
    /// assert_eq!(w.s0(), 6.0);
    /// ```
    pub fn from_edges<I>(units: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut neighbors = vec![NeighborList::new(); units];
        for (i, j) in edges {
            for &unit in &[i, j] {
                if unit >= units {
                    return Err(Error::UnitOutOfBounds { unit, units });
                }
            }
            if i == j {
                continue;
            }
            neighbors[i].push(j);
            neighbors[j].push(i);
        }
        for list in neighbors.iter_mut() {
            list.sort_unstable();
            list.dedup();
        }
        Ok(Adjacency { neighbors })
    }

    /// Builds a block structure in which every pair of units sharing a label
    /// is a neighbor pair, and no pair straddles two labels.
    ///
    /// This is the regime-based weights construction used for decomposing
    /// inequality by administrative or economic blocks.
    ///
    /// ```
    /// use inequality::Adjacency;
    ///
    /// let w = Adjacency::block(&["north", "north", "south", "south", "south"]);
    /// assert_eq!(w.neighbors(0), &[1]);
    /// assert_eq!(w.neighbors(3), &[2, 4]);
    /// // 1 pair in the first block, 3 in the second, each counted twice.
    /// assert_eq!(w.s0(), 8.0);
    /// ```
    pub fn block<L: Hash + Eq>(labels: &[L]) -> Self {
        let mut members: HashMap<&L, Vec<usize>> = HashMap::new();
        for (unit, label) in labels.iter().enumerate() {
            members.entry(label).or_insert_with(Vec::new).push(unit);
        }

        let mut neighbors = vec![NeighborList::new(); labels.len()];
        for units in members.values() {
            for &i in units {
                neighbors[i].extend(units.iter().copied().filter(|&j| j != i));
            }
        }
        Adjacency { neighbors }
    }

    /// The number of units this structure describes.
    pub fn units(&self) -> usize {
        self.neighbors.len()
    }

    /// The total number of directed neighbor links, conventionally `s0`.
    ///
    /// Each unordered neighbor pair contributes two links, so the number of
    /// neighbor pairs is `s0() / 2`.
    pub fn s0(&self) -> f64 {
        self.neighbors.iter().map(|list| list.len() as f64).sum()
    }

    /// The neighbors of `unit`, in ascending index order.
    pub fn neighbors(&self, unit: usize) -> &[usize] {
        &self.neighbors[unit]
    }

    /// Iterates over `(unit, neighbor-list)` pairs for all units.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.neighbors
            .iter()
            .enumerate()
            .map(|(unit, list)| (unit, list.as_slice()))
    }
}

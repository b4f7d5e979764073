//! Min-cost frontier for the Dijkstra search.

use std::collections::BinaryHeap;

use crate::traits::Cost;

/// Heap entry, ordered so that `BinaryHeap` (a max-heap) pops the lowest
/// cost first and, among equal costs, the earliest push.
#[derive(Clone, Copy, Eq, PartialEq)]
struct Entry {
    cost: Cost,
    seq: u64,
    idx: usize,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority frontier of cell indices keyed by tentative cost.
///
/// [`pop_min`](Self::pop_min) returns the entry with the smallest cost; ties
/// go to whichever entry was pushed first. Pushing an index that is already
/// queued leaves the older entry in place, so consumers skip indices they
/// have already settled.
#[derive(Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl Frontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `idx` with tentative cost `cost`.
    #[inline]
    pub fn push(&mut self, idx: usize, cost: Cost) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Entry { cost, seq, idx });
    }

    /// Remove and return the `(index, cost)` pair with minimum cost.
    #[inline]
    pub fn pop_min(&mut self) -> Option<(usize, Cost)> {
        self.heap.pop().map(|e| (e.idx, e.cost))
    }

    /// Number of queued entries, stale ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every entry and restart the insertion counter.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.seq = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_cost_order() {
        let mut f = Frontier::new();
        f.push(0, 5);
        f.push(1, 1);
        f.push(2, 3);
        assert_eq!(f.len(), 3);
        assert_eq!(f.pop_min(), Some((1, 1)));
        assert_eq!(f.pop_min(), Some((2, 3)));
        assert_eq!(f.pop_min(), Some((0, 5)));
        assert_eq!(f.pop_min(), None);
        assert!(f.is_empty());
    }

    #[test]
    fn equal_costs_pop_first_in_first_out() {
        let mut f = Frontier::new();
        for idx in [7, 3, 9, 1] {
            f.push(idx, 2);
        }
        f.push(4, 1);
        let order: Vec<_> = std::iter::from_fn(|| f.pop_min()).map(|(i, _)| i).collect();
        assert_eq!(order, vec![4, 7, 3, 9, 1]);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut f = Frontier::new();
        f.push(0, 4);
        f.push(0, 2);
        assert_eq!(f.pop_min(), Some((0, 2)));
        assert_eq!(f.pop_min(), Some((0, 4)));
    }

    #[test]
    fn clear_empties() {
        let mut f = Frontier::new();
        f.push(0, 0);
        f.clear();
        assert!(f.is_empty());
        assert_eq!(f.pop_min(), None);
    }
}

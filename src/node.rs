//! The recursive vEB node: a summary child over the high bits, lazily
//! allocated clusters over the low bits, and the `low`/`high` sentinel
//! pair that lets insert/delete recurse in O(1) on the common path
//! (spec.md §4.1). `VebSet` unifies the word-level base case
//! (`Bitboard`, chosen once `lo_bits <= 6` makes every child a leaf)
//! with the general recursive case so callers never need to special-case
//! which one they're holding.

use std::collections::HashMap;

use crate::bitboard::Bitboard;
use crate::key::Universe;

/// Either a word-level leaf or a fully recursive vEB node, chosen by the
/// factory rule in spec.md §4.5 (`lo_bits <= 6` => leaf).
#[derive(Debug)]
pub(crate) enum VebSet {
    Leaf(Bitboard),
    Node(VebNode),
}

impl VebSet {
    pub(crate) fn new(universe: Universe) -> VebSet {
        if universe.bits() <= 6 {
            VebSet::Leaf(Bitboard::new(universe.bits()))
        } else {
            VebSet::Node(VebNode::new(universe))
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        match self {
            VebSet::Leaf(b) => b.is_empty(),
            VebSet::Node(n) => n.is_empty(),
        }
    }

    pub(crate) fn min(&self) -> Option<u64> {
        match self {
            VebSet::Leaf(b) => b.min(),
            VebSet::Node(n) => n.min(),
        }
    }

    pub(crate) fn max(&self) -> Option<u64> {
        match self {
            VebSet::Leaf(b) => b.max(),
            VebSet::Node(n) => n.max(),
        }
    }

    pub(crate) fn member(&self, k: u64) -> bool {
        match self {
            VebSet::Leaf(b) => b.member(k),
            VebSet::Node(n) => n.member(k),
        }
    }

    pub(crate) fn successor(&self, k: u64) -> Option<u64> {
        match self {
            VebSet::Leaf(b) => b.successor(k),
            VebSet::Node(n) => n.successor(k),
        }
    }

    pub(crate) fn predecessor(&self, k: u64) -> Option<u64> {
        match self {
            VebSet::Leaf(b) => b.predecessor(k),
            VebSet::Node(n) => n.predecessor(k),
        }
    }

    /// Precondition: `k` is not already a member (the façade enforces this).
    pub(crate) fn insert(&mut self, k: u64) {
        match self {
            VebSet::Leaf(b) => {
                b.insert(k);
            }
            VebSet::Node(n) => n.insert(k),
        }
    }

    /// Precondition: `k` is a member (the façade enforces this).
    pub(crate) fn delete(&mut self, k: u64) {
        match self {
            VebSet::Leaf(b) => {
                b.delete(k);
            }
            VebSet::Node(n) => n.delete(k),
        }
    }
}

/// Recursive vEB node N(u), u = `universe.bits()` > 6 (smaller universes
/// are represented directly as a `Bitboard` leaf by the factory).
#[derive(Debug)]
pub(crate) struct VebNode {
    universe: Universe,
    low: Option<u64>,
    high: Option<u64>,
    summary: Option<Box<VebSet>>,
    clusters: HashMap<u64, Box<VebSet>>,
}

impl VebNode {
    fn new(universe: Universe) -> Self {
        VebNode {
            universe,
            low: None,
            high: None,
            summary: None,
            clusters: HashMap::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.low.is_none()
    }

    fn min(&self) -> Option<u64> {
        self.low
    }

    fn max(&self) -> Option<u64> {
        self.high
    }

    fn member(&self, k: u64) -> bool {
        if self.is_empty() {
            return false;
        }
        if Some(k) == self.low || Some(k) == self.high {
            return true;
        }
        let i = self.universe.hi(k);
        let j = self.universe.lo(k);
        match self.clusters.get(&i) {
            Some(cluster) => cluster.member(j),
            None => false,
        }
    }

    fn successor(&self, k: u64) -> Option<u64> {
        if self.is_empty() {
            return None;
        }
        if let Some(low) = self.low {
            if k < low {
                return Some(low);
            }
        }
        let i = self.universe.hi(k);
        let j = self.universe.lo(k);
        if let Some(cluster) = self.clusters.get(&i) {
            if let Some(cluster_max) = cluster.max() {
                if j < cluster_max {
                    let next = cluster
                        .successor(j)
                        .expect("j < cluster_max implies a successor exists");
                    return Some(self.universe.join(i, next));
                }
            }
        }

        let next_i = self.summary.as_ref().and_then(|s| s.successor(i));
        match next_i {
            Some(next_i) => {
                let cluster = self
                    .clusters
                    .get(&next_i)
                    .expect("summary reports next_i as non-empty");
                let next_j = cluster
                    .min()
                    .expect("non-empty cluster has a minimum");
                Some(self.universe.join(next_i, next_j))
            }
            None => {
                if let Some(high) = self.high {
                    if k < high {
                        return Some(high);
                    }
                }
                None
            }
        }
    }

    fn predecessor(&self, k: u64) -> Option<u64> {
        if self.is_empty() {
            return None;
        }
        if let Some(high) = self.high {
            if k > high {
                return Some(high);
            }
        }
        let i = self.universe.hi(k);
        let j = self.universe.lo(k);
        if let Some(cluster) = self.clusters.get(&i) {
            if let Some(cluster_min) = cluster.min() {
                if j > cluster_min {
                    let prev = cluster
                        .predecessor(j)
                        .expect("j > cluster_min implies a predecessor exists");
                    return Some(self.universe.join(i, prev));
                }
            }
        }

        let prev_i = self.summary.as_ref().and_then(|s| s.predecessor(i));
        match prev_i {
            Some(prev_i) => {
                let cluster = self
                    .clusters
                    .get(&prev_i)
                    .expect("summary reports prev_i as non-empty");
                let prev_j = cluster
                    .max()
                    .expect("non-empty cluster has a maximum");
                Some(self.universe.join(prev_i, prev_j))
            }
            None => {
                if let Some(low) = self.low {
                    if k > low {
                        return Some(low);
                    }
                }
                None
            }
        }
    }

    fn insert(&mut self, mut k: u64) {
        if self.is_empty() {
            self.low = Some(k);
            self.high = Some(k);
            return;
        }

        if let Some(low) = self.low {
            if k < low {
                self.low = Some(k);
                k = low;
            }
        }

        let i = self.universe.hi(k);
        let j = self.universe.lo(k);
        match self.clusters.get_mut(&i) {
            None => {
                let cluster_universe = self.universe.cluster();
                let summary_universe = self.universe.summary();
                let mut cluster = Box::new(VebSet::new(cluster_universe));
                self.summary
                    .get_or_insert_with(|| Box::new(VebSet::new(summary_universe)))
                    .insert(i);
                cluster.insert(j);
                self.clusters.insert(i, cluster);
            }
            Some(cluster) => cluster.insert(j),
        }

        self.high = Some(self.high.map_or(k, |h| h.max(k)));
    }

    fn delete(&mut self, mut k: u64) {
        if self.low == self.high {
            self.low = None;
            self.high = None;
            return;
        }

        if Some(k) == self.low {
            let i = self
                .summary
                .as_ref()
                .and_then(|s| s.min())
                .expect("a two-or-more element node has a non-empty summary");
            let j = self
                .clusters
                .get(&i)
                .and_then(|c| c.min())
                .expect("the cluster named by summary.min is non-empty");
            k = self.universe.join(i, j);
            self.low = Some(k);
        }

        let i = self.universe.hi(k);
        let j = self.universe.lo(k);
        let cluster = self
            .clusters
            .get_mut(&i)
            .expect("k's cluster exists for a present, non-low key");
        cluster.delete(j);

        if cluster.is_empty() {
            self.clusters.remove(&i);
            if let Some(summary) = self.summary.as_mut() {
                summary.delete(i);
            }
            if Some(k) == self.high {
                let next_high = match self.summary.as_ref().and_then(|s| s.max()) {
                    Some(max_i) => {
                        let max_j = self
                            .clusters
                            .get(&max_i)
                            .and_then(|c| c.max())
                            .expect("cluster named by summary.max is non-empty");
                        self.universe.join(max_i, max_j)
                    }
                    None => self.low.expect("low survives while high is being recomputed"),
                };
                self.high = Some(next_high);
            }
        } else if Some(k) == self.high {
            let max_j = cluster.max().expect("cluster is non-empty in this branch");
            self.high = Some(self.universe.join(i, max_j));
        }
    }
}

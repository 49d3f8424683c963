//! Memory-compacted outer container: a vEB summary over the high bits
//! plus a dense, eagerly-allocated array of compact leaves over the low
//! bits (spec.md §4.3). Unlike the recursive `VebNode`, every member
//! (including the minimum) is stored in its leaf; `low`/`high` are
//! denormalized caches only. This caps total memory at O(U) bits instead
//! of growing with recursion depth, the "recommended variant" from
//! spec.md §1.
//!
//! Grounded on `Hegdahl-flat-veb/src/outer.rs`'s dense `lower:
//! [Lower; UPPER_CAPACITY]` array with a `min`/`max` cache and an
//! `upper` summary, adapted from compile-time const-generic sizing to a
//! runtime `Vec` sized from the constructor's universe.

use crate::bitboard::Bitboard;
use crate::bitvec_leaf::BitVecLeaf;
use crate::key::Universe;
use crate::node::VebSet;

/// A compact leaf: `Bitboard` when the cluster fits in one word,
/// otherwise a plain bit-vector (never a BST-with-sentinel leaf, since
/// that cannot store the key 0).
#[derive(Debug)]
enum CompactLeaf {
    Word(Bitboard),
    Wide(BitVecLeaf),
}

impl CompactLeaf {
    fn new(bits: u32) -> Self {
        if bits <= 6 {
            CompactLeaf::Word(Bitboard::new(bits))
        } else {
            CompactLeaf::Wide(BitVecLeaf::new(bits))
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            CompactLeaf::Word(b) => b.is_empty(),
            CompactLeaf::Wide(v) => v.is_empty(),
        }
    }

    fn member(&self, k: u64) -> bool {
        match self {
            CompactLeaf::Word(b) => b.member(k),
            CompactLeaf::Wide(v) => v.member(k),
        }
    }

    fn min(&self) -> Option<u64> {
        match self {
            CompactLeaf::Word(b) => b.min(),
            CompactLeaf::Wide(v) => v.min(),
        }
    }

    fn max(&self) -> Option<u64> {
        match self {
            CompactLeaf::Word(b) => b.max(),
            CompactLeaf::Wide(v) => v.max(),
        }
    }

    fn successor(&self, k: u64) -> Option<u64> {
        match self {
            CompactLeaf::Word(b) => b.successor(k),
            CompactLeaf::Wide(v) => v.successor(k),
        }
    }

    fn predecessor(&self, k: u64) -> Option<u64> {
        match self {
            CompactLeaf::Word(b) => b.predecessor(k),
            CompactLeaf::Wide(v) => v.predecessor(k),
        }
    }

    fn insert(&mut self, k: u64) {
        match self {
            CompactLeaf::Word(b) => {
                b.insert(k);
            }
            CompactLeaf::Wide(v) => {
                v.insert(k);
            }
        }
    }

    fn delete(&mut self, k: u64) {
        match self {
            CompactLeaf::Word(b) => {
                b.delete(k);
            }
            CompactLeaf::Wide(v) => {
                v.delete(k);
            }
        }
    }
}

/// The memory-compacted outer layout: `summary` indexes which of the
/// `leaves` are currently non-empty.
#[derive(Debug)]
pub(crate) struct CompactVeb {
    universe: Universe,
    low: Option<u64>,
    high: Option<u64>,
    summary: VebSet,
    leaves: Vec<CompactLeaf>,
}

impl CompactVeb {
    pub(crate) fn new(universe: Universe) -> Self {
        let lo_bits = universe.lo_bits();
        let leaves = (0..universe.num_clusters())
            .map(|_| CompactLeaf::new(lo_bits))
            .collect();
        CompactVeb {
            universe,
            low: None,
            high: None,
            summary: VebSet::new(universe.summary()),
            leaves,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.low.is_none()
    }

    pub(crate) fn min(&self) -> Option<u64> {
        self.low
    }

    pub(crate) fn max(&self) -> Option<u64> {
        self.high
    }

    pub(crate) fn member(&self, k: u64) -> bool {
        let i = self.universe.hi(k);
        let j = self.universe.lo(k);
        self.leaves[i as usize].member(j)
    }

    pub(crate) fn successor(&self, k: u64) -> Option<u64> {
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
        if let Some(next_j) = self.leaves[i as usize].successor(j) {
            return Some(self.universe.join(i, next_j));
        }
        match self.summary.successor(i) {
            Some(next_i) => {
                let next_j = self.leaves[next_i as usize]
                    .min()
                    .expect("summary reports next_i as non-empty");
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

    pub(crate) fn predecessor(&self, k: u64) -> Option<u64> {
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
        if let Some(prev_j) = self.leaves[i as usize].predecessor(j) {
            return Some(self.universe.join(i, prev_j));
        }
        match self.summary.predecessor(i) {
            Some(prev_i) => {
                let prev_j = self.leaves[prev_i as usize]
                    .max()
                    .expect("summary reports prev_i as non-empty");
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

    pub(crate) fn insert(&mut self, k: u64) {
        if self.member(k) {
            return;
        }
        let i = self.universe.hi(k);
        let j = self.universe.lo(k);
        if self.leaves[i as usize].is_empty() {
            self.summary.insert(i);
        }
        self.leaves[i as usize].insert(j);
        self.low = Some(self.low.map_or(k, |l| l.min(k)));
        self.high = Some(self.high.map_or(k, |h| h.max(k)));
    }

    pub(crate) fn delete(&mut self, k: u64) {
        let i = self.universe.hi(k);
        let j = self.universe.lo(k);
        self.leaves[i as usize].delete(j);
        if self.leaves[i as usize].is_empty() {
            self.summary.delete(i);
        }

        if Some(k) == self.low {
            self.low = self.summary.min().map(|i2| {
                let j2 = self.leaves[i2 as usize]
                    .min()
                    .expect("summary min names a non-empty leaf");
                self.universe.join(i2, j2)
            });
        }
        if Some(k) == self.high {
            self.high = self
                .summary
                .max()
                .map(|i2| {
                    let j2 = self.leaves[i2 as usize]
                        .max()
                        .expect("summary max names a non-empty leaf");
                    self.universe.join(i2, j2)
                })
                .or(self.low);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact(bits: u32) -> CompactVeb {
        CompactVeb::new(Universe::new(bits).unwrap())
    }

    #[test]
    fn insert_member_delete() {
        let mut c = compact(10);
        for k in [5u64, 9, 2, 14] {
            c.insert(k);
        }
        assert_eq!(c.min(), Some(2));
        assert_eq!(c.max(), Some(14));
        assert!(c.member(9));
        assert!(!c.member(10));
        assert_eq!(c.successor(2), Some(5));
        assert_eq!(c.successor(14), None);
        assert_eq!(c.predecessor(9), Some(5));

        c.delete(2);
        assert_eq!(c.min(), Some(5));
        c.delete(14);
        assert_eq!(c.max(), Some(9));
    }

    #[test]
    fn handles_key_zero() {
        let mut c = compact(14); // lo_bits = 7 > 6, exercises BitVecLeaf
        c.insert(0);
        assert!(c.member(0));
        assert_eq!(c.min(), Some(0));
        c.delete(0);
        assert!(c.is_empty());
    }

    #[test]
    fn empties_out_completely() {
        let mut c = compact(8);
        for k in 0..256u64 {
            c.insert(k);
        }
        for k in (0..256u64).rev() {
            assert!(c.member(k));
            c.delete(k);
        }
        assert!(c.is_empty());
    }
}

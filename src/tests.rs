//! Boundary-case unit tests from spec.md §8 ("Boundary cases"): u = 1,
//! single-element structures, deletion of `low` when only two elements
//! remain, deletion of `high` when its cluster still has other members.

use super::*;

#[test]
fn universe_of_one_bit() {
    let mut t = VebTree::new(1).unwrap();
    assert!(t.is_empty());
    assert_eq!(t.member(0).unwrap(), false);
    assert_eq!(t.member(1).unwrap(), false);

    t.insert(0).unwrap();
    assert_eq!(t.member(0).unwrap(), true);
    assert_eq!(t.member(1).unwrap(), false);
    assert_eq!(t.successor(0).unwrap(), None);

    t.insert(1).unwrap();
    assert_eq!(t.min(), Some(0));
    assert_eq!(t.max(), Some(1));
    assert_eq!(t.successor(0).unwrap(), Some(1));
    assert_eq!(t.predecessor(1).unwrap(), Some(0));

    t.delete(0).unwrap();
    assert_eq!(t.min(), Some(1));
    assert_eq!(t.max(), Some(1));
    t.delete(1).unwrap();
    assert!(t.is_empty());
}

#[test]
fn single_element_structure() {
    let mut t = VebTree::new(16).unwrap();
    t.insert(12345).unwrap();
    assert_eq!(t.min(), Some(12345));
    assert_eq!(t.max(), Some(12345));
    assert_eq!(t.member(12345).unwrap(), true);
    assert_eq!(t.successor(0).unwrap(), Some(12345));
    assert_eq!(t.successor(12345).unwrap(), None);
    assert_eq!(t.predecessor(65535).unwrap(), Some(12345));
    assert_eq!(t.predecessor(12345).unwrap(), None);
    t.delete(12345).unwrap();
    assert!(t.is_empty());
}

#[test]
fn delete_low_with_two_elements_remaining() {
    // Deleting the minimum when exactly two keys remain must re-point
    // `low` at the other key without leaving a dangling cluster entry.
    let mut t = VebTree::new(8).unwrap();
    t.insert(10).unwrap();
    t.insert(200).unwrap();
    t.delete(10).unwrap();
    assert_eq!(t.min(), Some(200));
    assert_eq!(t.max(), Some(200));
    assert_eq!(t.member(10).unwrap(), false);
}

#[test]
fn delete_high_when_its_cluster_keeps_other_members() {
    // 10 and 12 share a cluster (both hi(k) == 1 for an 8-bit universe);
    // deleting the max must fall back to the other member of that
    // cluster, not to the summary.
    let mut t = VebTree::new(8).unwrap();
    t.insert(10).unwrap();
    t.insert(12).unwrap();
    t.insert(200).unwrap();
    t.delete(200).unwrap();
    assert_eq!(t.max(), Some(12));
    assert_eq!(t.min(), Some(10));
    assert_eq!(t.member(12).unwrap(), true);
}

#[test]
fn compact_layout_boundary_cases() {
    let mut t = VebTree::new_compact(1).unwrap();
    t.insert(0).unwrap();
    t.insert(1).unwrap();
    assert_eq!(t.min(), Some(0));
    assert_eq!(t.max(), Some(1));
    t.delete(0).unwrap();
    assert_eq!(t.min(), Some(1));
    t.delete(1).unwrap();
    assert!(t.is_empty());
}

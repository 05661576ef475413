//! Split a destination list into pinned slots and movable destinations.

use std::collections::BTreeSet;

/// Pinned and flexible positions of a validated request.
///
/// A pinned destination `i` always occupies slot `i`. The remaining slots are
/// filled, left to right, by a permutation of the flexible destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SlotLayout {
    pinned: Vec<bool>,
    flexible: Vec<usize>,
}

impl SlotLayout {
    /// Build a layout for `len` destinations. Indices in `fixed` at or above
    /// `len` are ignored; callers validate them first.
    pub(crate) fn new(len: usize, fixed: &BTreeSet<usize>) -> Self {
        let pinned: Vec<bool> = (0..len).map(|slot| fixed.contains(&slot)).collect();
        let flexible = (0..len).filter(|slot| !fixed.contains(slot)).collect();
        Self { pinned, flexible }
    }

    /// Movable destinations in ascending order.
    pub(crate) fn flexible(&self) -> &[usize] {
        &self.flexible
    }

    /// Number of slots.
    pub(crate) fn len(&self) -> usize {
        self.pinned.len()
    }

    /// Place `permutation` into the free slots around the pinned ones.
    pub(crate) fn assemble(&self, permutation: &[usize]) -> Vec<usize> {
        let mut fill = permutation.iter().copied();
        self.pinned
            .iter()
            .enumerate()
            .filter_map(|(slot, &pinned)| if pinned { Some(slot) } else { fill.next() })
            .collect()
    }
}

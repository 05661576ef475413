//! Lazy enumeration of permutations in recursive-swap order.

use std::iter::FusedIterator;

/// Number of permutations of `len` items, or `None` when it overflows.
///
/// # Examples
/// ```
/// use pinroute_solver::permutation_count;
///
/// assert_eq!(permutation_count(0), Some(1));
/// assert_eq!(permutation_count(5), Some(120));
/// assert_eq!(permutation_count(64), None);
/// ```
#[must_use]
pub fn permutation_count(len: usize) -> Option<usize> {
    (1..=len).try_fold(1_usize, usize::checked_mul)
}

/// Iterator over every permutation of an owned buffer.
///
/// Permutations appear in the order produced by the classic recursion that
/// swaps each remaining item into the current slot, recurses on the next
/// slot, then swaps back. The first permutation is the buffer as supplied and
/// an empty buffer yields a single empty permutation.
///
/// The iterator keeps one cursor per slot instead of a call stack, so it holds
/// `O(n)` state and can be paused between items.
///
/// # Examples
/// ```
/// use pinroute_solver::SwapPermutations;
///
/// let orders: Vec<Vec<char>> = SwapPermutations::new(vec!['a', 'b', 'c']).collect();
/// assert_eq!(
///     orders,
///     [
///         vec!['a', 'b', 'c'],
///         vec!['a', 'c', 'b'],
///         vec!['b', 'a', 'c'],
///         vec!['b', 'c', 'a'],
///         vec!['c', 'b', 'a'],
///         vec!['c', 'a', 'b'],
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SwapPermutations<T> {
    items: Vec<T>,
    cursors: Vec<usize>,
    started: bool,
    finished: bool,
    yielded: usize,
}

impl<T: Clone> SwapPermutations<T> {
    /// Enumerate the permutations of `items`.
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        let cursors = (0..items.len()).collect();
        Self {
            items,
            cursors,
            started: false,
            finished: false,
            yielded: 0,
        }
    }

    /// Rewind to the first permutation, restoring the original buffer order.
    pub fn restart(&mut self) {
        if !self.finished {
            self.unwind();
        }
        for (slot, cursor) in self.cursors.iter_mut().enumerate() {
            *cursor = slot;
        }
        self.started = false;
        self.finished = false;
        self.yielded = 0;
    }

    /// Undo every outstanding swap, deepest slot first.
    fn unwind(&mut self) {
        for slot in (0..self.items.len()).rev() {
            if let Some(&cursor) = self.cursors.get(slot) {
                self.items.swap(slot, cursor);
            }
        }
    }

    /// Step to the next permutation, returning `false` once exhausted.
    fn advance(&mut self) -> bool {
        let len = self.items.len();
        for slot in (0..len).rev() {
            let Some(&cursor) = self.cursors.get(slot) else {
                continue;
            };
            self.items.swap(slot, cursor);
            let next = cursor.saturating_add(1);
            if next < len {
                if let Some(current) = self.cursors.get_mut(slot) {
                    *current = next;
                }
                self.items.swap(slot, next);
                for (deeper, cursor) in self.cursors.iter_mut().enumerate().skip(slot + 1) {
                    *cursor = deeper;
                }
                return true;
            }
        }
        false
    }
}

impl<T: Clone> Iterator for SwapPermutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.started {
            if !self.advance() {
                self.finished = true;
                return None;
            }
        } else {
            self.started = true;
        }
        self.yielded = self.yielded.saturating_add(1);
        Some(self.items.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        permutation_count(self.items.len()).map_or((usize::MAX, None), |total| {
            let remaining = total.saturating_sub(self.yielded);
            (remaining, Some(remaining))
        })
    }
}

impl<T: Clone> FusedIterator for SwapPermutations<T> {}

//! Visiting orders over a destination list.
//!
//! A [`VisitOrder`] is a permutation of `0..n`. Constructing one from raw
//! indices checks that property so evaluators can rely on it.

use std::collections::BTreeSet;

use thiserror::Error;

/// Errors returned by [`VisitOrder::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VisitOrderError {
    /// The order does not mention every destination exactly once.
    #[error("visit order has {actual} entries but {expected} destinations exist")]
    WrongLength {
        /// Number of destinations.
        expected: usize,
        /// Number of indices supplied.
        actual: usize,
    },
    /// An index does not name a destination.
    #[error("index {index} is outside 0..{len}")]
    OutOfRange {
        /// Offending index.
        index: usize,
        /// Number of destinations.
        len: usize,
    },
    /// An index appears more than once.
    #[error("index {index} appears more than once")]
    Duplicate {
        /// Repeated index.
        index: usize,
    },
}

/// An ordered sequence of destination indices visiting each exactly once.
///
/// # Examples
/// ```
/// use pinroute_core::VisitOrder;
///
/// let order = VisitOrder::new(vec![2, 0, 1], 3)?;
/// assert_eq!(order.as_slice(), &[2, 0, 1]);
/// assert_eq!(order.position_of(0), Some(1));
/// assert!(VisitOrder::new(vec![0, 0, 1], 3).is_err());
/// # Ok::<(), pinroute_core::VisitOrderError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VisitOrder(Vec<usize>);

impl VisitOrder {
    /// Validate `indices` as a permutation of `0..len`.
    pub fn new(indices: Vec<usize>, len: usize) -> Result<Self, VisitOrderError> {
        if indices.len() != len {
            return Err(VisitOrderError::WrongLength {
                expected: len,
                actual: indices.len(),
            });
        }
        let mut seen = BTreeSet::new();
        for &index in &indices {
            if index >= len {
                return Err(VisitOrderError::OutOfRange { index, len });
            }
            if !seen.insert(index) {
                return Err(VisitOrderError::Duplicate { index });
            }
        }
        Ok(Self(indices))
    }

    /// The order that visits destinations as listed.
    #[must_use]
    pub fn identity(len: usize) -> Self {
        Self((0..len).collect())
    }

    /// Indices in visiting order.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Number of stops.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the order visits nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Position at which `destination` is visited.
    #[must_use]
    pub fn position_of(&self, destination: usize) -> Option<usize> {
        self.0.iter().position(|&index| index == destination)
    }

    /// Consecutive `(from, to)` index pairs.
    pub fn legs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.windows(2).filter_map(|pair| match pair {
            &[from, to] => Some((from, to)),
            _ => None,
        })
    }

    /// Consume the order, returning the raw indices.
    #[must_use]
    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl AsRef<[usize]> for VisitOrder {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

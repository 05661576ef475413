//! Search requests and their up-front validation.

use std::collections::BTreeSet;

use geo::Coord;
use thiserror::Error;

use crate::{Criterion, Destination};

/// Smallest destination count a search accepts.
pub const MIN_DESTINATIONS: usize = 2;

/// Immutable snapshot of everything a search needs.
///
/// `fixed` holds indices into `destinations` whose position must not change.
///
/// # Examples
/// ```rust
/// use std::collections::BTreeSet;
/// use geo::Coord;
/// use pinroute_core::{Criterion, Destination, SearchRequest};
///
/// let request = SearchRequest {
///     destinations: vec![
///         Destination::new("Home", Coord { x: -0.10, y: 51.50 }),
///         Destination::new("Office", Coord { x: -0.08, y: 51.52 }),
///     ],
///     fixed: BTreeSet::from([0]),
///     criterion: Criterion::Duration,
/// };
/// assert!(request.validate().is_ok());
/// assert_eq!(request.flexible_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchRequest {
    /// Destinations in their original order.
    pub destinations: Vec<Destination>,
    /// Indices pinned to their current position.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fixed: BTreeSet<usize>,
    /// Quantity to minimise.
    #[cfg_attr(feature = "serde", serde(default))]
    pub criterion: Criterion,
}

/// Reasons a [`SearchRequest`] is rejected before any lookup is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchRequestValidationError {
    /// Fewer than [`MIN_DESTINATIONS`] destinations were supplied.
    #[error("at least {MIN_DESTINATIONS} destinations are required, got {count}")]
    TooFewDestinations {
        /// Number of destinations supplied.
        count: usize,
    },
    /// A fixed index does not name a destination.
    #[error("fixed index {index} is outside 0..{len}")]
    FixedIndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Number of destinations.
        len: usize,
    },
    /// Too many flexible destinations to enumerate exhaustively.
    #[error("{count} flexible destinations exceed the exhaustive search limit of {limit}")]
    TooManyFlexible {
        /// Number of flexible destinations.
        count: usize,
        /// Configured limit.
        limit: usize,
    },
}

impl SearchRequest {
    /// Build a request from coordinates alone, leaving labels empty.
    pub fn from_coords<I>(coords: I, fixed: BTreeSet<usize>, criterion: Criterion) -> Self
    where
        I: IntoIterator<Item = Coord<f64>>,
    {
        Self {
            destinations: coords.into_iter().map(Destination::unlabelled).collect(),
            fixed,
            criterion,
        }
    }

    /// Coordinates in original order.
    #[must_use]
    pub fn coords(&self) -> Vec<Coord<f64>> {
        self.destinations.iter().map(|dest| dest.location).collect()
    }

    /// Number of destinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    /// Whether the request lists no destinations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Number of destinations the search may move.
    #[must_use]
    pub fn flexible_count(&self) -> usize {
        self.len().saturating_sub(self.fixed.len())
    }

    /// Check the destination count and fixed indices.
    ///
    /// # Examples
    /// ```
    /// use std::collections::BTreeSet;
    /// use geo::Coord;
    /// use pinroute_core::{Criterion, SearchRequest, SearchRequestValidationError};
    ///
    /// let request = SearchRequest::from_coords(
    ///     [Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }],
    ///     BTreeSet::from([2]),
    ///     Criterion::Distance,
    /// );
    /// assert_eq!(
    ///     request.validate(),
    ///     Err(SearchRequestValidationError::FixedIndexOutOfRange { index: 2, len: 2 }),
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), SearchRequestValidationError> {
        validate_inputs(self.len(), &self.fixed)
    }
}

/// Validate a destination count and fixed set without building a request.
pub fn validate_inputs(
    len: usize,
    fixed: &BTreeSet<usize>,
) -> Result<(), SearchRequestValidationError> {
    if len < MIN_DESTINATIONS {
        return Err(SearchRequestValidationError::TooFewDestinations { count: len });
    }
    if let Some(&index) = fixed.iter().find(|&&index| index >= len) {
        return Err(SearchRequestValidationError::FixedIndexOutOfRange { index, len });
    }
    Ok(())
}

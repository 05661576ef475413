//! Editable list of destinations that produces search snapshots.
//!
//! The itinerary owns the state a front end mutates between searches. Each
//! destination carries its own pinned flag, so reordering, removing or
//! applying an optimised order keeps pins attached to the destination rather
//! than to the slot it used to occupy.

use std::collections::BTreeSet;

use geo::Coord;
use thiserror::Error;

use crate::{Criterion, Destination, SearchRequest, VisitOrder};

/// Errors raised while editing an [`Itinerary`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItineraryError {
    /// The index does not name a destination.
    #[error("destination index {index} is outside 0..{len}")]
    IndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Number of destinations.
        len: usize,
    },
    /// A visiting order covers a different number of destinations.
    #[error("visiting order covers {actual} destinations but the itinerary holds {expected}")]
    OrderLengthMismatch {
        /// Destinations in the itinerary.
        expected: usize,
        /// Destinations in the order.
        actual: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct Stop {
    destination: Destination,
    fixed: bool,
}

/// Mutable destination list with per-destination pins.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use pinroute_core::{Criterion, Itinerary};
///
/// let mut itinerary = Itinerary::new();
/// itinerary.push("Depot", Coord { x: -0.12, y: 51.50 });
/// itinerary.push("Bakery", Coord { x: -0.10, y: 51.51 });
/// itinerary.push("Market", Coord { x: -0.09, y: 51.49 });
/// itinerary.set_fixed(0, true)?;
///
/// let request = itinerary.snapshot(Criterion::Duration);
/// assert_eq!(request.len(), 3);
/// assert!(request.fixed.contains(&0));
/// # Ok::<(), pinroute_core::ItineraryError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Itinerary {
    stops: Vec<Stop>,
}

impl Itinerary {
    /// Create an empty itinerary.
    #[must_use]
    pub const fn new() -> Self {
        Self { stops: Vec::new() }
    }

    /// Rebuild an itinerary from a request, pinning its fixed indices.
    ///
    /// # Errors
    ///
    /// Returns [`ItineraryError::IndexOutOfRange`] when a fixed index does not
    /// name a destination of `request`.
    pub fn from_request(request: &SearchRequest) -> Result<Self, ItineraryError> {
        let mut itinerary = Self {
            stops: request
                .destinations
                .iter()
                .cloned()
                .map(|destination| Stop {
                    destination,
                    fixed: false,
                })
                .collect(),
        };
        for &index in &request.fixed {
            itinerary.set_fixed(index, true)?;
        }
        Ok(itinerary)
    }

    /// Number of destinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the itinerary is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Iterate over destinations in their current order.
    pub fn destinations(&self) -> impl Iterator<Item = &Destination> {
        self.stops.iter().map(|stop| &stop.destination)
    }

    /// Iterate over destinations paired with their pinned flag.
    pub fn entries(&self) -> impl Iterator<Item = (&Destination, bool)> {
        self.stops.iter().map(|stop| (&stop.destination, stop.fixed))
    }

    /// Whether the destination at `index` is pinned, or `None` when the index
    /// is out of range.
    #[must_use]
    pub fn is_fixed(&self, index: usize) -> Option<bool> {
        self.stops.get(index).map(|stop| stop.fixed)
    }

    /// Append an unpinned destination and return its index.
    pub fn push(&mut self, label: impl Into<String>, location: Coord<f64>) -> usize {
        self.stops.push(Stop {
            destination: Destination::new(label, location),
            fixed: false,
        });
        self.stops.len().saturating_sub(1)
    }

    /// Pin or unpin the destination at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ItineraryError::IndexOutOfRange`] when `index` is too large.
    pub fn set_fixed(&mut self, index: usize, fixed: bool) -> Result<(), ItineraryError> {
        self.stop_mut(index)?.fixed = fixed;
        Ok(())
    }

    /// Flip the pin of the destination at `index`, returning the new state.
    ///
    /// # Errors
    ///
    /// Returns [`ItineraryError::IndexOutOfRange`] when `index` is too large.
    pub fn toggle_fixed(&mut self, index: usize) -> Result<bool, ItineraryError> {
        let stop = self.stop_mut(index)?;
        stop.fixed = !stop.fixed;
        Ok(stop.fixed)
    }

    /// Remove and return the destination at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ItineraryError::IndexOutOfRange`] when `index` is too large.
    pub fn remove(&mut self, index: usize) -> Result<Destination, ItineraryError> {
        self.check_index(index)?;
        Ok(self.stops.remove(index).destination)
    }

    /// Move the destination at `from` so that it ends up at `to`.
    ///
    /// Destinations in between shift by one place. The pin travels with the
    /// moved destination.
    ///
    /// # Errors
    ///
    /// Returns [`ItineraryError::IndexOutOfRange`] when either index is too
    /// large.
    pub fn move_destination(&mut self, from: usize, to: usize) -> Result<(), ItineraryError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from != to {
            let stop = self.stops.remove(from);
            self.stops.insert(to, stop);
        }
        Ok(())
    }

    /// Rearrange destinations so that position `p` holds the destination that
    /// was at `order[p]`.
    ///
    /// # Errors
    ///
    /// Returns [`ItineraryError::OrderLengthMismatch`] when `order` does not
    /// cover exactly this itinerary.
    pub fn apply_order(&mut self, order: &VisitOrder) -> Result<(), ItineraryError> {
        if order.len() != self.stops.len() {
            return Err(ItineraryError::OrderLengthMismatch {
                expected: self.stops.len(),
                actual: order.len(),
            });
        }
        let mut slots: Vec<Option<Stop>> =
            std::mem::take(&mut self.stops).into_iter().map(Some).collect();
        self.stops = order
            .as_slice()
            .iter()
            .filter_map(|&index| slots.get_mut(index).and_then(Option::take))
            .collect();
        Ok(())
    }

    /// Remove every destination.
    pub fn clear(&mut self) {
        self.stops.clear();
    }

    /// Freeze the current state into a [`SearchRequest`].
    #[must_use]
    pub fn snapshot(&self, criterion: Criterion) -> SearchRequest {
        let fixed: BTreeSet<usize> = self
            .stops
            .iter()
            .enumerate()
            .filter_map(|(index, stop)| stop.fixed.then_some(index))
            .collect();
        SearchRequest {
            destinations: self.destinations().cloned().collect(),
            fixed,
            criterion,
        }
    }

    fn check_index(&self, index: usize) -> Result<(), ItineraryError> {
        if index < self.stops.len() {
            Ok(())
        } else {
            Err(ItineraryError::IndexOutOfRange {
                index,
                len: self.stops.len(),
            })
        }
    }

    fn stop_mut(&mut self, index: usize) -> Result<&mut Stop, ItineraryError> {
        let len = self.stops.len();
        self.stops
            .get_mut(index)
            .ok_or(ItineraryError::IndexOutOfRange { index, len })
    }
}

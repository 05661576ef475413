use geo::Coord;

/// A place the traveller wants to visit.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. The label is
/// purely for display; destinations are identified by their position in the
/// list they belong to.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use pinroute_core::Destination;
///
/// let museum = Destination::new("Museum", Coord { x: -0.13, y: 51.52 });
///
/// assert_eq!(museum.label, "Museum");
/// assert_eq!(museum.location.y, 51.52);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Destination {
    /// Human-readable name, usually a formatted address.
    pub label: String,
    /// Geospatial position.
    pub location: Coord<f64>,
}

impl Destination {
    /// Construct a labelled destination.
    pub fn new(label: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            label: label.into(),
            location,
        }
    }

    /// Construct a destination with an empty label.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use pinroute_core::Destination;
    ///
    /// let stop = Destination::unlabelled(Coord { x: 0.0, y: 0.0 });
    /// assert!(stop.label.is_empty());
    /// ```
    #[must_use]
    pub const fn unlabelled(location: Coord<f64>) -> Self {
        Self {
            label: String::new(),
            location,
        }
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_follow_geo_axis_convention() {
        let stop = Destination::new("Pier", Coord { x: 2.5, y: 48.1 });
        assert_eq!(stop.longitude(), 2.5);
        assert_eq!(stop.latitude(), 48.1);
    }
}

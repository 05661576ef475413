//! Distance oracle trait and coordinate sanity checks.

use async_trait::async_trait;
use geo::Coord;

use crate::LegMetrics;

use super::error::OracleError;

/// Measure one directed leg between two coordinates.
///
/// Implementations perform a single attempt per call; retries, caching and
/// timeouts around a whole search belong to the caller. A returned
/// [`LegMetrics`] must be non-negative and finite.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use async_trait::async_trait;
/// use geo::Coord;
/// use pinroute_core::{DistanceOracle, LegMetrics, OracleError};
///
/// struct Flat;
///
/// #[async_trait]
/// impl DistanceOracle for Flat {
///     async fn lookup(
///         &self,
///         _origin: Coord<f64>,
///         _destination: Coord<f64>,
///     ) -> Result<LegMetrics, OracleError> {
///         Ok(LegMetrics::new(100.0, Duration::from_secs(10)))
///     }
/// }
///
/// let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let leg = runtime.block_on(Flat.lookup(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }))?;
/// assert_eq!(leg.distance_metres, 100.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[async_trait]
pub trait DistanceOracle: Send + Sync {
    /// Return the metrics of the route from `origin` to `destination`.
    async fn lookup(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
    ) -> Result<LegMetrics, OracleError>;
}

#[async_trait]
impl<T> DistanceOracle for &T
where
    T: DistanceOracle + ?Sized,
{
    async fn lookup(
        &self,
        origin: Coord<f64>,
        destination: Coord<f64>,
    ) -> Result<LegMetrics, OracleError> {
        (**self).lookup(origin, destination).await
    }
}

/// Reject coordinates that are not finite or fall outside WGS84 bounds.
///
/// Oracle implementations call this before issuing a request so malformed
/// input fails fast with [`OracleError::InvalidCoordinate`].
///
/// # Examples
/// ```
/// use geo::Coord;
/// use pinroute_core::check_coordinate;
///
/// assert!(check_coordinate(Coord { x: -0.1, y: 51.5 }).is_ok());
/// assert!(check_coordinate(Coord { x: 0.0, y: 91.0 }).is_err());
/// ```
pub fn check_coordinate(coord: Coord<f64>) -> Result<Coord<f64>, OracleError> {
    let valid_lat = coord.y.is_finite() && (-90.0..=90.0).contains(&coord.y);
    let valid_lon = coord.x.is_finite() && (-180.0..=180.0).contains(&coord.x);
    if valid_lat && valid_lon {
        Ok(coord)
    } else {
        Err(OracleError::InvalidCoordinate {
            latitude: coord.y,
            longitude: coord.x,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Coord { x: 180.0, y: -90.0 })]
    #[case(Coord { x: -180.0, y: 90.0 })]
    #[case(Coord { x: 0.0, y: 0.0 })]
    fn accepts_boundary_coordinates(#[case] coord: Coord<f64>) {
        assert_eq!(check_coordinate(coord), Ok(coord));
    }

    #[rstest]
    #[case(Coord { x: 180.5, y: 0.0 })]
    #[case(Coord { x: 0.0, y: -90.5 })]
    #[case(Coord { x: f64::NAN, y: 0.0 })]
    #[case(Coord { x: 0.0, y: f64::INFINITY })]
    fn rejects_out_of_range_coordinates(#[case] coord: Coord<f64>) {
        let err = check_coordinate(coord).expect_err("coordinate should be rejected");
        assert!(matches!(err, OracleError::InvalidCoordinate { .. }));
    }
}

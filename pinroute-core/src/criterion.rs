//! Optimisation criteria and the per-leg metrics they select from.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Metrics reported by a [`DistanceOracle`](crate::DistanceOracle) for one leg.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use pinroute_core::{Criterion, LegMetrics};
///
/// let leg = LegMetrics::new(1_250.0, Duration::from_secs(95));
/// assert_eq!(Criterion::Distance.leg_value(&leg), 1_250.0);
/// assert_eq!(Criterion::Duration.leg_value(&leg), 95.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegMetrics {
    /// Road distance in metres.
    pub distance_metres: f64,
    /// Expected travel time.
    pub duration: Duration,
}

impl LegMetrics {
    /// Construct leg metrics from a distance in metres and a travel time.
    #[must_use]
    pub const fn new(distance_metres: f64, duration: Duration) -> Self {
        Self {
            distance_metres,
            duration,
        }
    }
}

/// The quantity a search minimises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Criterion {
    /// Minimise summed leg distance in metres.
    #[default]
    Distance,
    /// Minimise summed leg travel time in seconds.
    Duration,
}

impl Criterion {
    /// Select the value this criterion accumulates from a leg.
    #[must_use]
    pub const fn leg_value(self, leg: &LegMetrics) -> f64 {
        match self {
            Self::Distance => leg.distance_metres,
            Self::Duration => leg.duration.as_secs_f64(),
        }
    }

    /// Unit of the accumulated metric, for display.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Distance => "m",
            Self::Duration => "s",
        }
    }

    /// Lowercase name used in configuration and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Duration => "duration",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown criterion name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown optimisation criterion {0:?} (expected \"distance\" or \"duration\")")]
pub struct ParseCriterionError(pub String);

impl FromStr for Criterion {
    type Err = ParseCriterionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" => Ok(Self::Distance),
            "duration" => Ok(Self::Duration),
            _ => Err(ParseCriterionError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("distance", Criterion::Distance)]
    #[case("Duration", Criterion::Duration)]
    #[case("  duration ", Criterion::Duration)]
    fn parses_known_names(#[case] input: &str, #[case] expected: Criterion) {
        assert_eq!(input.parse::<Criterion>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_name() {
        let err = "time".parse::<Criterion>().expect_err("unknown name");
        assert_eq!(err, ParseCriterionError("time".to_owned()));
    }

    #[rstest]
    fn display_round_trips_through_from_str() {
        for criterion in [Criterion::Distance, Criterion::Duration] {
            assert_eq!(criterion.to_string().parse::<Criterion>(), Ok(criterion));
        }
    }

    #[rstest]
    fn duration_value_keeps_sub_second_precision() {
        let leg = LegMetrics::new(0.0, Duration::from_millis(1_500));
        assert_eq!(Criterion::Duration.leg_value(&leg), 1.5);
    }
}

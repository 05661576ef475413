//! OSRM API response types for the Route service.
//!
//! Only the fields needed to measure a leg are decoded; everything else in
//! the payload is ignored.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;

/// OSRM Route API response.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"NoRoute"` - No route between the coordinates
    /// - `"NoSegment"` - A coordinate could not be snapped to the network
    /// - `"InvalidQuery"` - Malformed request
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Routes found, best first.
    #[serde(default)]
    pub routes: Vec<RouteSummary>,
}

/// Totals for one route.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RouteSummary {
    /// Distance in metres.
    pub distance: f64,
    /// Duration in seconds.
    pub duration: f64,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_success_response() {
        let json = r#"{
            "code": "Ok",
            "routes": [{"distance": 1520.4, "duration": 183.2, "weight": 183.2, "legs": []}],
            "waypoints": []
        }"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(response.is_ok());
        let first = response.routes.first().expect("one route");
        assert_eq!(first.distance, 1520.4);
        assert_eq!(first.duration, 183.2);
    }

    #[test]
    fn deserialise_error_response() {
        let json = r#"{"code": "NoRoute", "message": "Impossible route between points"}"#;

        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(!response.is_ok());
        assert_eq!(
            response.message.as_deref(),
            Some("Impossible route between points")
        );
        assert!(response.routes.is_empty());
    }
}

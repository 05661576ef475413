//! Adapters connecting pinroute to external data sources.
//!
//! The [`routing`] module measures legs against an OSRM routing service.

#![forbid(unsafe_code)]

pub mod routing;

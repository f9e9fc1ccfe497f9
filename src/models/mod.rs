//! Domain model types for clustered transit networks.
//!
//! Provides the core abstractions: platforms grouped into stations
//! (disjoint clusters), directed weighted ride/transfer edges, the
//! [`TransitGraph`] holding the partition, and the [`Tour`] produced by a
//! solve.

mod graph;
mod platform;
mod tour;

pub use graph::{Neighbor, TransitGraph};
pub use platform::{EdgeKind, EdgeRecord, GeoPoint, Platform, PlatformRecord};
pub use tour::{StationVisit, Tour, TourStep};

//! Error taxonomy for graph construction and solving.
//!
//! Every fatal variant names the offending entity (platform id, station id,
//! weight, or cost discrepancy) so callers can report something actionable.
//! Budget exhaustion is deliberately absent: running out of time or passes
//! degrades to the best tour found, flagged on [`Tour`](crate::models::Tour).

use thiserror::Error;

/// Errors surfaced by graph construction, reduction, and solving.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// A platform id was added twice.
    #[error("platform {platform} already exists in the graph")]
    DuplicateId {
        /// The repeated platform id.
        platform: u64,
    },

    /// An operation referenced a platform that is not in the graph.
    #[error("platform {platform} is not in the graph")]
    UnknownPlatform {
        /// The missing platform id.
        platform: u64,
    },

    /// An edge carried a negative or non-finite weight at construction.
    #[error("edge {from} -> {to} has invalid weight {weight}")]
    InvalidWeight {
        /// Source platform id.
        from: u64,
        /// Destination platform id.
        to: u64,
        /// The rejected weight.
        weight: f64,
    },

    /// The station partition is broken: a declared station has no platforms.
    #[error("station {station} has no platforms")]
    InvalidPartition {
        /// The empty station id.
        station: u64,
    },

    /// A negative edge weight reached the shortest-path oracle.
    ///
    /// Construction already rejects negative weights, so seeing this means a
    /// new data path bypassed [`TransitGraph::add_edge`](crate::models::TransitGraph::add_edge).
    #[error("edge {from} -> {to} carries negative weight {weight}; shortest paths require non-negative weights")]
    NegativeWeight {
        /// Source platform id.
        from: u64,
        /// Destination platform id.
        to: u64,
        /// The offending weight.
        weight: f64,
    },

    /// No finite path connects any platform of one station to any platform
    /// of another, in either direction. A tour visiting both cannot exist.
    #[error("stations {from_station} and {to_station} have no finite connecting path")]
    DisconnectedClusters {
        /// One station of the unreachable pair.
        from_station: u64,
        /// The other station of the pair.
        to_station: u64,
    },

    /// The solver's reported cost disagrees with an independent
    /// recomputation from the cost matrix. Signals a defect in the
    /// reduction or translation logic, never a legitimate result.
    #[error("solver reported cost {reported} but recomputation gives {recomputed} (difference {difference})")]
    CostMismatch {
        /// Cost claimed by the solver.
        reported: f64,
        /// Cost recomputed from the cost matrix.
        recomputed: f64,
        /// Absolute discrepancy.
        difference: f64,
    },

    /// A candidate tour violates a structural invariant: a repeated
    /// platform, a station visited more than once or not at all, or an
    /// endpoint that ignores the configured home platform.
    #[error("degenerate tour: {reason}")]
    DegenerateTour {
        /// Human-readable description naming the offending entity.
        reason: String,
    },

    /// The graph contains no platforms, so there is nothing to visit.
    #[error("the graph has no platforms")]
    EmptyGraph,
}

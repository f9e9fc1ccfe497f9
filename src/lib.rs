//! # transit-tour
//!
//! Minimum-time tours over public-transit networks that visit every
//! station at least once. Stations are clusters of platforms, so this is
//! the Generalized Traveling Salesman Problem on a weighted transit graph:
//! reaching any one platform of a station counts as visiting it.
//!
//! The pipeline closes the platform graph into an all-pairs cost matrix,
//! applies the Noon–Bean transformation so ordinary ATSP machinery can
//! enforce "one visit per station", searches the transformed instance
//! (exactly for small instances, with seeded multi-restart local search
//! otherwise), and verifies the translated tour against an independent
//! cost recomputation.
//!
//! ## Modules
//!
//! - [`models`] — Platforms, stations, edges, [`TransitGraph`](models::TransitGraph), [`Tour`](models::Tour)
//! - [`distance`] — Dense cost matrix and the parallel all-pairs Dijkstra oracle
//! - [`reduction`] — Noon–Bean cluster reduction to an ATSP instance
//! - [`constructive`] — Nearest-neighbor tour construction
//! - [`local_search`] — 2-opt and Or-opt for asymmetric instances
//! - [`solver`] — The [`solve`](solver::solve) entry point, Held–Karp, budgets and restarts
//! - [`evaluation`] — Tour invariant checking and cost cross-verification
//! - [`error`] — The [`SolveError`](error::SolveError) taxonomy
//!
//! ## Example
//!
//! ```
//! use transit_tour::models::{EdgeKind, TransitGraph};
//! use transit_tour::solver::{solve, SolveOptions};
//!
//! // Three stations with two platforms each, free transfers inside a
//! // station, and rides forming a 10/15/20 triangle between them.
//! let mut graph = TransitGraph::new();
//! for (platform, station) in [(10, 1), (11, 1), (20, 2), (21, 2), (30, 3), (31, 3)] {
//!     graph.add_platform(platform, station, None)?;
//! }
//! for (a, b) in [(10, 11), (20, 21), (30, 31)] {
//!     graph.add_edge(a, b, 0.0, EdgeKind::Transfer)?;
//!     graph.add_edge(b, a, 0.0, EdgeKind::Transfer)?;
//! }
//! for (a, b, w) in [(11, 20, 10.0), (21, 30, 15.0), (31, 10, 20.0)] {
//!     graph.add_edge(a, b, w, EdgeKind::Ride)?;
//!     graph.add_edge(b, a, w, EdgeKind::Ride)?;
//! }
//!
//! let tour = solve(&graph, &SolveOptions::default())?;
//! assert_eq!(tour.visits().len(), 3);
//! assert!((tour.total_cost() - 45.0).abs() < 1e-6);
//! # Ok::<(), transit_tour::error::SolveError>(())
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod reduction;
pub mod solver;

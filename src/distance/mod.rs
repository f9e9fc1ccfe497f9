//! Travel-cost matrices and the all-pairs shortest-path oracle.
//!
//! - [`CostMatrix`] — dense n×n cost storage with an `INFINITY` sentinel
//! - [`all_pairs`] — parallel Dijkstra closure over the transit graph

mod matrix;
mod oracle;

pub use matrix::CostMatrix;
pub use oracle::all_pairs;

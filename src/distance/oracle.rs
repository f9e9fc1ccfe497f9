//! All-pairs shortest-path oracle.
//!
//! # Algorithm
//!
//! One Dijkstra run per source platform over the raw edge weights, which
//! are non-negative by construction. Runs are independent and each fills a
//! disjoint row of the result, so rows are computed on parallel rayon
//! workers and merged without locking.
//!
//! # Complexity
//!
//! O(V · E log V) total, O(E log V) per source.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rayon::prelude::*;
use tracing::debug;

use crate::error::SolveError;
use crate::models::TransitGraph;

use super::CostMatrix;

/// Computes the complete platform-to-platform shortest-path cost matrix.
///
/// `cost(a, b)` is the minimum total weight over any path a→b, or
/// `f64::INFINITY` if no path exists. Parallel edges collapse to the
/// cheapest naturally. The matrix is cached by the caller for the lifetime
/// of one solve; the oracle itself holds no state.
///
/// Fails fast with [`SolveError::NegativeWeight`] if a negative weight
/// somehow reached the graph, rather than silently running an algorithm
/// whose correctness assumes non-negativity.
///
/// # Examples
///
/// ```
/// use transit_tour::models::{EdgeKind, TransitGraph};
/// use transit_tour::distance::all_pairs;
///
/// let mut g = TransitGraph::new();
/// g.add_platform(1, 1, None).unwrap();
/// g.add_platform(2, 2, None).unwrap();
/// g.add_platform(3, 3, None).unwrap();
/// g.add_edge(1, 2, 100.0, EdgeKind::Ride).unwrap();
/// g.add_edge(2, 3, 50.0, EdgeKind::Ride).unwrap();
///
/// let costs = all_pairs(&g).unwrap();
/// assert_eq!(costs.get(0, 2), 150.0); // 1 -> 2 -> 3
/// assert!(costs.get(2, 0).is_infinite()); // no reverse edges
/// ```
pub fn all_pairs(graph: &TransitGraph) -> Result<CostMatrix, SolveError> {
    let n = graph.num_platforms();

    for idx in 0..n {
        for arc in graph.arcs(idx) {
            if arc.weight < 0.0 {
                return Err(SolveError::NegativeWeight {
                    from: graph.platform_at(idx).id(),
                    to: graph.platform_at(arc.to).id(),
                    weight: arc.weight,
                });
            }
        }
    }

    let rows: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|source| dijkstra_row(graph, source))
        .collect();

    let matrix = CostMatrix::from_rows(rows).expect("rows are square by construction");
    debug!(platforms = n, "all-pairs cost matrix computed");
    Ok(matrix)
}

/// Single-source shortest paths from `source`, as one matrix row.
fn dijkstra_row(graph: &TransitGraph, source: usize) -> Vec<f64> {
    let n = graph.num_platforms();
    let mut dist = vec![f64::INFINITY; n];
    dist[source] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(HeapEntry {
        cost: 0.0,
        node: source,
    });

    while let Some(HeapEntry { cost, node }) = heap.pop() {
        if cost > dist[node] {
            continue; // stale entry
        }
        for arc in graph.arcs(node) {
            let next = cost + arc.weight;
            if next < dist[arc.to] {
                dist[arc.to] = next;
                heap.push(HeapEntry {
                    cost: next,
                    node: arc.to,
                });
            }
        }
    }

    dist
}

/// Min-heap entry; the ordering is reversed so `BinaryHeap` pops the
/// cheapest node first. Costs are finite and non-NaN inside Dijkstra, so
/// `total_cmp` is a true total order here.
#[derive(Debug, Clone, Copy, PartialEq)]
struct HeapEntry {
    cost: f64,
    node: usize,
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

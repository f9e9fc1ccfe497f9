//! Noon–Bean transformation of the clustered problem into an ATSP.
//!
//! # Algorithm
//!
//! Each station's platforms are arranged in a fixed internal cycle whose
//! arcs cost zero. Every inter-station arc is shifted one step backwards
//! along that cycle: the arc leaving node `i` carries the true cost of
//! leaving `i`'s cycle successor, plus a penalty `M` chosen larger than any
//! possible real tour cost. A tour entering a station at platform `p` is
//! therefore forced to walk the whole zero cycle `p, next(p), ...` and exit
//! from `prev(p)` paying the true cost of leaving `p` — exactly the cost of
//! visiting the station at `p` alone.
//!
//! A Hamiltonian cycle on the transformed instance uses exactly one
//! inter-station arc per station, so subtracting `m·M` (m = station count)
//! recovers the true travel time. Any tour that fragments a station pays at
//! least one extra `M` and can never win, which is what keeps station
//! blocks contiguous without the solver knowing about stations at all.
//!
//! # Reference
//!
//! Noon, C.E. and Bean, J.C. (1993). "An efficient transformation of the
//! generalized traveling salesman problem", *INFOR* 31(1), 39-44.

use tracing::debug;

use crate::distance::CostMatrix;
use crate::error::SolveError;
use crate::models::TransitGraph;

use super::ReducedInstance;

/// Transforms the clustered graph into an ordinary ATSP instance.
///
/// `costs` is the all-pairs platform matrix from the distance oracle.
/// When `home` is set (a platform index), the home station is represented
/// by that platform alone: visiting the station then means visiting the
/// home platform, which anchors the tour.
///
/// Fails with [`SolveError::DisconnectedClusters`] if some station pair has
/// no finite connecting cost in either direction, naming the pair; a tour
/// visiting every station cannot exist in that case, and detecting it here
/// avoids wasting search time.
pub fn reduce(
    graph: &TransitGraph,
    costs: &CostMatrix,
    home: Option<usize>,
) -> Result<ReducedInstance, SolveError> {
    let home_station = home.map(|idx| graph.platform_at(idx).station());

    let mut clusters: Vec<(u64, Vec<usize>)> = Vec::with_capacity(graph.num_stations());
    for (station, members) in graph.station_members() {
        let members = match (home, home_station) {
            (Some(idx), Some(anchor)) if station == anchor => vec![idx],
            _ => members.to_vec(),
        };
        clusters.push((station, members));
    }

    check_cluster_connectivity(costs, &clusters)?;

    let m = clusters.len();
    let node_count: usize = clusters.iter().map(|(_, c)| c.len()).sum();

    // Penalty large enough that m real inter-station legs can never add up
    // to one extra M.
    let mut max_inter = 0.0f64;
    for (ca, cluster_a) in clusters.iter().enumerate() {
        for (cb, cluster_b) in clusters.iter().enumerate() {
            if ca == cb {
                continue;
            }
            for &p in &cluster_a.1 {
                for &q in &cluster_b.1 {
                    let c = costs.get(p, q);
                    if c.is_finite() && c > max_inter {
                        max_inter = c;
                    }
                }
            }
        }
    }
    let penalty = 1.0 + m as f64 * max_inter;

    let mut node_platform = Vec::with_capacity(node_count);
    let mut node_cluster = Vec::with_capacity(node_count);
    let mut cycle_next = Vec::with_capacity(node_count);
    let mut cluster_station = Vec::with_capacity(m);

    for (cluster_idx, (station, members)) in clusters.iter().enumerate() {
        cluster_station.push(*station);
        let base = node_platform.len();
        let k = members.len();
        for (offset, &platform) in members.iter().enumerate() {
            node_platform.push(platform);
            node_cluster.push(cluster_idx);
            cycle_next.push(base + (offset + 1) % k);
        }
    }

    let mut reduced = CostMatrix::unreachable(node_count);
    for node in 0..node_count {
        let successor = cycle_next[node];
        if successor != node {
            reduced.set(node, successor, 0.0);
        }
        // The arc leaving `node` carries the successor's true exit costs.
        let exit_platform = node_platform[successor];
        for other in 0..node_count {
            if node_cluster[other] == node_cluster[node] {
                continue;
            }
            let real = costs.get(exit_platform, node_platform[other]);
            if real.is_finite() {
                reduced.set(node, other, real + penalty);
            }
        }
    }

    let offset = m as f64 * penalty;
    debug!(
        nodes = node_count,
        clusters = m,
        offset,
        "Noon-Bean reduction built"
    );

    Ok(ReducedInstance::new(
        reduced,
        offset,
        node_platform,
        node_cluster,
        cycle_next,
        cluster_station,
        graph.num_platforms(),
    ))
}

/// Every station pair must have a finite connecting cost in at least one
/// direction; otherwise no tour can visit both.
fn check_cluster_connectivity(
    costs: &CostMatrix,
    clusters: &[(u64, Vec<usize>)],
) -> Result<(), SolveError> {
    for a in 0..clusters.len() {
        for b in (a + 1)..clusters.len() {
            let connected = clusters[a].1.iter().any(|&p| {
                clusters[b]
                    .1
                    .iter()
                    .any(|&q| costs.is_reachable(p, q) || costs.is_reachable(q, p))
            });
            if !connected {
                return Err(SolveError::DisconnectedClusters {
                    from_station: clusters[a].0,
                    to_station: clusters[b].0,
                });
            }
        }
    }
    Ok(())
}

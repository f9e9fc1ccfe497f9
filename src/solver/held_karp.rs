//! Held–Karp exact dynamic programming.
//!
//! # Algorithm
//!
//! `dp[S][k]` is the cheapest path that starts at node 0, visits exactly
//! the node set `S` (over nodes 1..n), and ends at `k`. Extending `S` one
//! node at a time and closing the cycle back to node 0 yields the global
//! optimum. The table has sequential dependency across subset sizes, so
//! this search is not parallelized.
//!
//! # Complexity
//!
//! O(2ⁿ·n²) time, O(2ⁿ·n) memory — fine up to the exact-mode threshold,
//! hopeless beyond it.
//!
//! # Reference
//!
//! Held, M. and Karp, R.M. (1962). "A dynamic programming approach to
//! sequencing problems", *Journal of SIAM* 10(1), 196-210.

use crate::distance::CostMatrix;

/// Finds the optimal Hamiltonian cycle of an (A)TSP instance.
///
/// Returns the tour (starting at node 0) and its total cyclic cost. If no
/// finite cycle exists the cost is `INFINITY` and the tour is an arbitrary
/// permutation; callers guard on finiteness.
///
/// # Examples
///
/// ```
/// use transit_tour::distance::CostMatrix;
/// use transit_tour::solver::held_karp;
///
/// let costs = CostMatrix::from_rows(vec![
///     vec![0.0, 1.0, 4.0],
///     vec![4.0, 0.0, 1.0],
///     vec![1.0, 4.0, 0.0],
/// ]).expect("square");
/// let (tour, cost) = held_karp(&costs);
/// assert_eq!(tour, vec![0, 1, 2]);
/// assert_eq!(cost, 3.0);
/// ```
pub fn held_karp(costs: &CostMatrix) -> (Vec<usize>, f64) {
    let n = costs.size();
    match n {
        0 => return (Vec::new(), 0.0),
        1 => return (vec![0], 0.0),
        2 => return (vec![0, 1], costs.get(0, 1) + costs.get(1, 0)),
        _ => {}
    }

    // Bit k of a mask stands for node k + 1; node 0 is the fixed start.
    let m = n - 1;
    let full = (1usize << m) - 1;
    let mut dp = vec![f64::INFINITY; (full + 1) * m];
    let mut parent = vec![u32::MAX; (full + 1) * m];

    for k in 0..m {
        dp[(1 << k) * m + k] = costs.get(0, k + 1);
    }

    for mask in 1..=full {
        for k in 0..m {
            if mask & (1 << k) == 0 {
                continue;
            }
            let here = dp[mask * m + k];
            if !here.is_finite() {
                continue;
            }
            for l in 0..m {
                if mask & (1 << l) != 0 {
                    continue;
                }
                let next_mask = mask | (1 << l);
                let cand = here + costs.get(k + 1, l + 1);
                if cand < dp[next_mask * m + l] {
                    dp[next_mask * m + l] = cand;
                    parent[next_mask * m + l] = k as u32;
                }
            }
        }
    }

    let mut best_cost = f64::INFINITY;
    let mut best_end = 0;
    for k in 0..m {
        let cand = dp[full * m + k] + costs.get(k + 1, 0);
        if cand < best_cost {
            best_cost = cand;
            best_end = k;
        }
    }

    // Walk parents back from the best endpoint.
    let mut order = Vec::with_capacity(n);
    let mut mask = full;
    let mut k = best_end;
    loop {
        order.push(k + 1);
        let p = parent[mask * m + k];
        mask &= !(1 << k);
        if p == u32::MAX {
            break;
        }
        k = p as usize;
    }
    order.push(0);
    order.reverse();

    if !best_cost.is_finite() {
        // No finite cycle; return a structurally complete permutation.
        return ((0..n).collect(), f64::INFINITY);
    }

    debug_assert_eq!(order.len(), n);
    (order, best_cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_search::tour_cost;

    #[test]
    fn test_trivial_sizes() {
        assert_eq!(held_karp(&CostMatrix::new(0)), (vec![], 0.0));
        assert_eq!(held_karp(&CostMatrix::new(1)), (vec![0], 0.0));
        let mut two = CostMatrix::new(2);
        two.set(0, 1, 3.0);
        two.set(1, 0, 4.0);
        assert_eq!(held_karp(&two), (vec![0, 1], 7.0));
    }

    #[test]
    fn test_directed_triangle() {
        let costs = CostMatrix::from_rows(vec![
            vec![0.0, 1.0, 4.0],
            vec![4.0, 0.0, 1.0],
            vec![1.0, 4.0, 0.0],
        ])
        .expect("square");
        let (tour, cost) = held_karp(&costs);
        assert_eq!(tour, vec![0, 1, 2]);
        assert_eq!(cost, 3.0);
    }

    #[test]
    fn test_matches_brute_force() {
        // 6-node asymmetric instance with deterministic pseudo-random costs.
        let n = 6;
        let mut costs = CostMatrix::new(n);
        let mut state = 12345u64;
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                costs.set(i, j, 1.0 + (state >> 33) as f64 % 97.0);
            }
        }

        let (_, hk_cost) = held_karp(&costs);

        // Brute force over all permutations of 1..n.
        let mut nodes: Vec<usize> = (1..n).collect();
        let mut best = f64::INFINITY;
        permute(&mut nodes, 0, &mut |perm| {
            let mut tour = vec![0];
            tour.extend_from_slice(perm);
            let c = tour_cost(&tour, &costs);
            if c < best {
                best = c;
            }
        });

        assert!((hk_cost - best).abs() < 1e-10);
    }

    fn permute(nodes: &mut Vec<usize>, k: usize, visit: &mut impl FnMut(&[usize])) {
        if k == nodes.len() {
            visit(nodes);
            return;
        }
        for i in k..nodes.len() {
            nodes.swap(k, i);
            permute(nodes, k + 1, visit);
            nodes.swap(k, i);
        }
    }

    #[test]
    fn test_unreachable_cycle_reports_infinite() {
        let mut costs = CostMatrix::unreachable(3);
        costs.set(0, 1, 1.0);
        costs.set(1, 2, 1.0);
        // No arc back to 0: no cycle exists.
        let (tour, cost) = held_karp(&costs);
        assert_eq!(tour.len(), 3);
        assert!(cost.is_infinite());
    }

    #[test]
    fn test_returns_cost_of_reported_tour() {
        let costs = CostMatrix::from_rows(vec![
            vec![0.0, 2.0, 9.0, 10.0],
            vec![1.0, 0.0, 6.0, 4.0],
            vec![15.0, 7.0, 0.0, 8.0],
            vec![6.0, 3.0, 12.0, 0.0],
        ])
        .expect("square");
        let (tour, cost) = held_karp(&costs);
        assert!((tour_cost(&tour, &costs) - cost).abs() < 1e-10);
    }
}

//! Or-opt segment relocation for asymmetric tours.
//!
//! # Algorithm
//!
//! Tries moving segments of 1, 2, or 3 consecutive nodes to a different
//! position in the cyclic tour without reversing them, so all arc costs
//! keep their direction — the natural companion to 2-opt on asymmetric
//! instances, where relocation deltas stay O(1):
//!
//! ```text
//! delta = c(prev, after) - c(prev, first) - c(last, after)   // removal
//!       + c(x, first) + c(last, y) - c(x, y)                 // insertion
//! ```
//!
//! Position 0 stays fixed as the tour anchor. First improving relocation
//! wins.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use crate::distance::CostMatrix;

const IMPROVE_EPS: f64 = 1e-10;

/// Total cyclic cost of a tour: `t[0] -> t[1] -> ... -> t[n-1] -> t[0]`.
pub fn tour_cost(tour: &[usize], costs: &CostMatrix) -> f64 {
    if tour.len() < 2 {
        return 0.0;
    }
    let mut cost = 0.0;
    for w in tour.windows(2) {
        cost += costs.get(w[0], w[1]);
    }
    cost + costs.get(tour[tour.len() - 1], tour[0])
}

/// One first-improvement sweep over segment lengths 1..=3: applies the
/// first improving relocation and returns `true`, or `false` if none
/// exists.
pub fn or_opt_pass(tour: &mut Vec<usize>, costs: &CostMatrix) -> bool {
    let n = tour.len();
    if n < 3 {
        return false;
    }

    for seg_len in 1..=3.min(n - 2) {
        for s in 1..=n - seg_len {
            let first = tour[s];
            let last = tour[s + seg_len - 1];
            let prev = tour[s - 1];
            let after = tour[(s + seg_len) % n];

            let removal = costs.get(prev, after) - costs.get(prev, first) - costs.get(last, after);

            for t in 1..=n {
                // Positions inside or adjacent to the segment are no-ops.
                if t >= s && t <= s + seg_len {
                    continue;
                }
                let x = tour[t - 1];
                let y = tour[t % n];
                let insertion = costs.get(x, first) + costs.get(last, y) - costs.get(x, y);

                if removal + insertion < -IMPROVE_EPS {
                    apply_relocation(tour, s, seg_len, t);
                    return true;
                }
            }
        }
    }

    false
}

/// Repeatedly applies [`or_opt_pass`] until no improving move remains.
///
/// Returns the improved tour and its total cyclic cost.
pub fn or_opt_improve(tour: &[usize], costs: &CostMatrix) -> (Vec<usize>, f64) {
    let mut current = tour.to_vec();
    while or_opt_pass(&mut current, costs) {}
    let cost = tour_cost(&current, costs);
    (current, cost)
}

/// Moves `tour[s..s + seg_len]` so it sits just before the node that was at
/// position `t`.
fn apply_relocation(tour: &mut Vec<usize>, s: usize, seg_len: usize, t: usize) {
    let segment: Vec<usize> = tour.drain(s..s + seg_len).collect();
    let adjusted = if t > s { t - seg_len } else { t };
    for (i, node) in segment.into_iter().enumerate() {
        tour.insert(adjusted + i, node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tour_cost_cyclic() {
        let costs = CostMatrix::from_rows(vec![
            vec![0.0, 1.0, 4.0],
            vec![2.0, 0.0, 1.0],
            vec![1.0, 5.0, 0.0],
        ])
        .expect("square");
        // 0 -> 1 (1) -> 2 (1) -> 0 (1)
        assert!((tour_cost(&[0, 1, 2], &costs) - 3.0).abs() < 1e-10);
        assert_eq!(tour_cost(&[0], &costs), 0.0);
        assert_eq!(tour_cost(&[], &costs), 0.0);
    }

    #[test]
    fn test_or_opt_relocates_single_node() {
        // Line instance: [0, 2, 1, 3] is fixed by moving node 1 before 2.
        let costs = CostMatrix::from_rows(vec![
            vec![0.0, 1.0, 2.0, 3.0],
            vec![1.0, 0.0, 1.0, 2.0],
            vec![2.0, 1.0, 0.0, 1.0],
            vec![3.0, 2.0, 1.0, 0.0],
        ])
        .expect("square");
        let (improved, cost) = or_opt_improve(&[0, 2, 1, 3], &costs);
        assert!((cost - 6.0).abs() < 1e-10);
        assert_eq!(improved, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_or_opt_preserves_node_set() {
        let costs = CostMatrix::new(6);
        let (improved, _) = or_opt_improve(&[0, 3, 1, 4, 2, 5], &costs);
        let mut sorted = improved;
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_or_opt_does_not_worsen() {
        let costs = CostMatrix::from_rows(vec![
            vec![0.0, 3.0, 9.0, 5.0],
            vec![3.0, 0.0, 7.0, 2.0],
            vec![9.0, 7.0, 0.0, 4.0],
            vec![5.0, 2.0, 4.0, 0.0],
        ])
        .expect("square");
        let initial = vec![0, 2, 3, 1];
        let before = tour_cost(&initial, &costs);
        let (_, after) = or_opt_improve(&initial, &costs);
        assert!(after <= before + 1e-10);
    }

    #[test]
    fn test_or_opt_short_tour_noop() {
        let costs = CostMatrix::new(2);
        let mut tour = vec![0, 1];
        assert!(!or_opt_pass(&mut tour, &costs));
    }

    #[test]
    fn test_apply_relocation_before_segment() {
        let mut tour = vec![0, 1, 2, 3, 4];
        apply_relocation(&mut tour, 3, 1, 1);
        assert_eq!(tour, vec![0, 3, 1, 2, 4]);
    }

    #[test]
    fn test_apply_relocation_after_segment() {
        let mut tour = vec![0, 1, 2, 3, 4];
        apply_relocation(&mut tour, 1, 2, 5);
        assert_eq!(tour, vec![0, 3, 4, 1, 2]);
    }
}

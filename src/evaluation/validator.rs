//! Tour validation and reporting.

use std::collections::HashMap;

use crate::distance::CostMatrix;
use crate::error::SolveError;
use crate::models::{StationVisit, Tour, TourStep, TransitGraph};
use crate::solver::SolveOptions;

/// Relative tolerance for the solver-vs-recomputation cost comparison.
const COST_TOLERANCE: f64 = 1e-6;

/// Checks a candidate tour's invariants and builds the final [`Tour`].
///
/// `platforms` is the visited platform sequence in cyclic order (one entry
/// per station, the closing leg implied). The checks:
///
/// - every platform exists and none repeats;
/// - every station is visited exactly once;
/// - the first platform matches the configured home platform, if any;
/// - every leg, including the closing one, has finite cost — an infinite
///   leg means two stations were never actually connected;
/// - the cyclic cost recomputed from the matrix agrees with the solver's
///   reported cost within tolerance. Disagreement is
///   [`SolveError::CostMismatch`]: a defect in the reduction or
///   translation, never a legitimate result.
///
/// The recomputed (not the reported) cost populates the returned steps, so
/// cumulative costs are exact sums of matrix entries. For an open tour the
/// closing leg is dropped from both the steps and the total.
pub fn validate_tour(
    graph: &TransitGraph,
    costs: &CostMatrix,
    platforms: &[u64],
    reported_cycle_cost: f64,
    options: &SolveOptions,
    budget_exhausted: bool,
) -> Result<Tour, SolveError> {
    if platforms.is_empty() {
        return Err(SolveError::DegenerateTour {
            reason: "tour contains no platforms".to_string(),
        });
    }

    let mut indices = Vec::with_capacity(platforms.len());
    for &id in platforms {
        indices.push(graph.require(id)?);
    }

    let mut station_hits: HashMap<u64, u64> = HashMap::new();
    let mut seen_platforms: HashMap<u64, u64> = HashMap::new();
    for (&id, &idx) in platforms.iter().zip(&indices) {
        *seen_platforms.entry(id).or_insert(0) += 1;
        *station_hits
            .entry(graph.platform_at(idx).station())
            .or_insert(0) += 1;
    }
    for (&id, &count) in &seen_platforms {
        if count > 1 {
            return Err(SolveError::DegenerateTour {
                reason: format!("platform {id} appears {count} times"),
            });
        }
    }
    for (station, _) in graph.station_members() {
        match station_hits.get(&station) {
            None => {
                return Err(SolveError::DegenerateTour {
                    reason: format!("station {station} is never visited"),
                });
            }
            Some(1) => {}
            Some(count) => {
                return Err(SolveError::DegenerateTour {
                    reason: format!("station {station} is visited {count} times"),
                });
            }
        }
    }

    if let Some(home) = options.home_platform {
        if platforms[0] != home {
            return Err(SolveError::DegenerateTour {
                reason: format!(
                    "tour starts at platform {} instead of home platform {home}",
                    platforms[0]
                ),
            });
        }
    }

    // Leg costs, including the closing leg, recomputed independently.
    let mut leg_costs = Vec::with_capacity(indices.len());
    if indices.len() > 1 {
        for k in 0..indices.len() {
            let from = indices[k];
            let to = indices[(k + 1) % indices.len()];
            let cost = costs.get(from, to);
            if !cost.is_finite() {
                return Err(SolveError::DisconnectedClusters {
                    from_station: graph.platform_at(from).station(),
                    to_station: graph.platform_at(to).station(),
                });
            }
            leg_costs.push(cost);
        }
    }

    let recomputed: f64 = leg_costs.iter().sum();
    let difference = (recomputed - reported_cycle_cost).abs();
    if difference > COST_TOLERANCE * recomputed.abs().max(1.0) {
        return Err(SolveError::CostMismatch {
            reported: reported_cycle_cost,
            recomputed,
            difference,
        });
    }

    let mut steps = Vec::with_capacity(indices.len() + 1);
    let mut cumulative = 0.0;
    for (k, &idx) in indices.iter().enumerate() {
        let platform = graph.platform_at(idx);
        steps.push(TourStep {
            platform: platform.id(),
            station: platform.station(),
            cumulative_cost: cumulative,
        });
        if k < leg_costs.len() {
            cumulative += leg_costs[k];
        }
    }

    let total_cost = if options.round_trip {
        if indices.len() > 1 {
            let first = graph.platform_at(indices[0]);
            steps.push(TourStep {
                platform: first.id(),
                station: first.station(),
                cumulative_cost: recomputed,
            });
        }
        recomputed
    } else {
        // Open tour: the closing leg is dropped.
        recomputed - leg_costs.last().copied().unwrap_or(0.0)
    };

    let mut visits: Vec<StationVisit> = indices
        .iter()
        .map(|&idx| {
            let p = graph.platform_at(idx);
            StationVisit {
                station: p.station(),
                platform: p.id(),
            }
        })
        .collect();
    visits.sort_by_key(|v| v.station);

    Ok(Tour::new(
        steps,
        total_cost,
        visits,
        options.round_trip,
        budget_exhausted,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::all_pairs;
    use crate::models::EdgeKind;

    fn line_graph() -> (TransitGraph, CostMatrix) {
        let mut g = TransitGraph::new();
        g.add_platform(1, 10, None).expect("add");
        g.add_platform(2, 20, None).expect("add");
        g.add_platform(3, 30, None).expect("add");
        for (a, b, w) in [(1, 2, 5.0), (2, 3, 6.0), (3, 1, 7.0)] {
            g.add_edge(a, b, w, EdgeKind::Ride).expect("edge");
            g.add_edge(b, a, w, EdgeKind::Ride).expect("edge");
        }
        let costs = all_pairs(&g).expect("matrix");
        (g, costs)
    }

    #[test]
    fn test_valid_round_trip() {
        let (g, costs) = line_graph();
        let options = SolveOptions::default();
        let tour = validate_tour(&g, &costs, &[1, 2, 3], 18.0, &options, false).expect("valid");
        assert_eq!(tour.total_cost(), 18.0);
        assert_eq!(tour.steps().len(), 4);
        assert_eq!(tour.platform_ids(), vec![1, 2, 3, 1]);
        assert_eq!(tour.visits().len(), 3);
    }

    #[test]
    fn test_valid_open_tour() {
        let (g, costs) = line_graph();
        let options = SolveOptions {
            round_trip: false,
            ..SolveOptions::default()
        };
        let tour = validate_tour(&g, &costs, &[1, 2, 3], 18.0, &options, false).expect("valid");
        assert_eq!(tour.steps().len(), 3);
        // Closing leg 3 -> 1 (7.0) dropped.
        assert!((tour.total_cost() - 11.0).abs() < 1e-10);
    }

    #[test]
    fn test_cost_mismatch_detected() {
        let (g, costs) = line_graph();
        let options = SolveOptions::default();
        let err =
            validate_tour(&g, &costs, &[1, 2, 3], 25.0, &options, false).expect_err("mismatch");
        match err {
            SolveError::CostMismatch {
                reported,
                recomputed,
                difference,
            } => {
                assert_eq!(reported, 25.0);
                assert_eq!(recomputed, 18.0);
                assert!((difference - 7.0).abs() < 1e-10);
            }
            other => panic!("expected CostMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_repeated_platform_rejected() {
        let (g, costs) = line_graph();
        let options = SolveOptions::default();
        assert!(matches!(
            validate_tour(&g, &costs, &[1, 2, 2], 16.0, &options, false),
            Err(SolveError::DegenerateTour { .. })
        ));
    }

    #[test]
    fn test_missing_station_rejected() {
        let (g, costs) = line_graph();
        let options = SolveOptions::default();
        let err =
            validate_tour(&g, &costs, &[1, 2], 10.0, &options, false).expect_err("station 30");
        match err {
            SolveError::DegenerateTour { reason } => assert!(reason.contains("30")),
            other => panic!("expected DegenerateTour, got {other:?}"),
        }
    }

    #[test]
    fn test_twice_visited_station_rejected() {
        let mut g = TransitGraph::new();
        g.add_platform(1, 10, None).expect("add");
        g.add_platform(2, 10, None).expect("add");
        g.add_platform(3, 30, None).expect("add");
        g.add_edge(1, 2, 1.0, EdgeKind::Transfer).expect("edge");
        g.add_edge(2, 3, 1.0, EdgeKind::Ride).expect("edge");
        g.add_edge(3, 1, 1.0, EdgeKind::Ride).expect("edge");
        let costs = all_pairs(&g).expect("matrix");
        let options = SolveOptions::default();
        assert!(matches!(
            validate_tour(&g, &costs, &[1, 2, 3], 3.0, &options, false),
            Err(SolveError::DegenerateTour { .. })
        ));
    }

    #[test]
    fn test_home_anchor_enforced() {
        let (g, costs) = line_graph();
        let options = SolveOptions {
            home_platform: Some(2),
            ..SolveOptions::default()
        };
        assert!(matches!(
            validate_tour(&g, &costs, &[1, 2, 3], 18.0, &options, false),
            Err(SolveError::DegenerateTour { .. })
        ));
        assert!(validate_tour(&g, &costs, &[2, 3, 1], 18.0, &options, false).is_ok());
    }

    #[test]
    fn test_unknown_platform_rejected() {
        let (g, costs) = line_graph();
        let options = SolveOptions::default();
        assert_eq!(
            validate_tour(&g, &costs, &[1, 2, 99], 18.0, &options, false).expect_err("unknown"),
            SolveError::UnknownPlatform { platform: 99 }
        );
    }

    #[test]
    fn test_infinite_leg_names_stations() {
        let mut g = TransitGraph::new();
        g.add_platform(1, 10, None).expect("add");
        g.add_platform(2, 20, None).expect("add");
        g.add_edge(1, 2, 5.0, EdgeKind::Ride).expect("edge");
        // No way back from 2 to 1.
        let costs = all_pairs(&g).expect("matrix");
        let options = SolveOptions::default();
        let err = validate_tour(&g, &costs, &[1, 2], f64::INFINITY, &options, false)
            .expect_err("no closing leg");
        assert_eq!(
            err,
            SolveError::DisconnectedClusters {
                from_station: 20,
                to_station: 10,
            }
        );
    }

    #[test]
    fn test_single_platform_tour() {
        let mut g = TransitGraph::new();
        g.add_platform(1, 10, None).expect("add");
        let costs = all_pairs(&g).expect("matrix");
        let options = SolveOptions::default();
        let tour = validate_tour(&g, &costs, &[1], 0.0, &options, false).expect("trivial");
        assert_eq!(tour.steps().len(), 1);
        assert_eq!(tour.total_cost(), 0.0);
    }

    #[test]
    fn test_budget_flag_propagates() {
        let (g, costs) = line_graph();
        let options = SolveOptions::default();
        let tour = validate_tour(&g, &costs, &[1, 2, 3], 18.0, &options, true).expect("valid");
        assert!(tour.budget_exhausted());
    }
}

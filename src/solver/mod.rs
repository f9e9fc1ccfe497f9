//! Tour solving: the `solve` pipeline, exact search, and the budgeted
//! metaheuristic.
//!
//! The pipeline is one logical computation per request: validate the
//! partition, close the cost matrix, reduce the clustered problem to an
//! ATSP, search it, translate back, and cross-check. Small reduced
//! instances (at most [`SolveOptions::exact_threshold`] nodes) go to
//! [`held_karp`] for the global optimum; larger ones get nearest-neighbor
//! construction improved by 2-opt and Or-opt, with independent restarts on
//! parallel workers.

mod held_karp;

pub use held_karp::held_karp;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::constructive::nearest_neighbor_tour;
use crate::distance::{all_pairs, CostMatrix};
use crate::error::SolveError;
use crate::evaluation::validate_tour;
use crate::local_search::{or_opt_pass, tour_cost, two_opt_pass};
use crate::models::{Tour, TransitGraph};
use crate::reduction::reduce;

/// Cooperative cancellation handle.
///
/// Cloning shares the flag. The metaheuristic checks it between local
/// search passes, so cancellation takes effect within one pass, never
/// mid-move; the best tour found so far is still returned.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Configuration for one solve request.
#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Platform anchoring the start (and, for a round trip, the end) of the
    /// tour. Its station is then visited through this platform.
    pub home_platform: Option<u64>,
    /// Whether the tour must close back at its starting platform.
    pub round_trip: bool,
    /// Wall-clock budget for the metaheuristic phase. Exceeding it returns
    /// the best tour found so far, never an error.
    pub time_budget: Option<Duration>,
    /// Maximum improvement passes per restart; `Some(0)` returns the
    /// construction heuristic's tour untouched. A safety bound — the
    /// primary stop condition is that no improving move remains.
    pub max_passes: Option<u64>,
    /// Seed for the metaheuristic's randomized construction. Fixed seed and
    /// fixed input give a stable tour.
    pub seed: u64,
    /// Largest reduced-instance node count solved exactly with Held–Karp.
    pub exact_threshold: usize,
    /// Independent metaheuristic restarts, run in parallel.
    pub restarts: usize,
    /// Cooperative cancellation handle.
    pub cancel: Option<CancelToken>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            home_platform: None,
            round_trip: true,
            time_budget: None,
            max_passes: None,
            seed: 0,
            exact_threshold: 15,
            restarts: 4,
            cancel: None,
        }
    }
}

/// Budget state shared by the restarts of one solve.
struct SearchLimits {
    deadline: Option<Instant>,
    max_passes: Option<u64>,
    cancel: Option<CancelToken>,
}

impl SearchLimits {
    fn exceeded(&self, passes: u64) -> bool {
        if let Some(max) = self.max_passes {
            if passes >= max {
                return true;
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return true;
            }
        }
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

/// Computes a minimum-cost tour visiting every station once.
///
/// The full pipeline of the crate: partition validation, all-pairs
/// shortest paths, Noon–Bean reduction, exact or metaheuristic search,
/// translation back to platforms, and independent cost verification.
///
/// # Examples
///
/// ```
/// use transit_tour::models::{EdgeKind, TransitGraph};
/// use transit_tour::solver::{solve, SolveOptions};
///
/// let mut g = TransitGraph::new();
/// for (platform, station) in [(1, 10), (2, 20), (3, 30)] {
///     g.add_platform(platform, station, None).unwrap();
/// }
/// for (a, b, w) in [(1, 2, 5.0), (2, 3, 6.0), (3, 1, 7.0)] {
///     g.add_edge(a, b, w, EdgeKind::Ride).unwrap();
///     g.add_edge(b, a, w, EdgeKind::Ride).unwrap();
/// }
///
/// let tour = solve(&g, &SolveOptions::default()).unwrap();
/// assert_eq!(tour.visits().len(), 3);
/// assert_eq!(tour.total_cost(), 18.0);
/// ```
pub fn solve(graph: &TransitGraph, options: &SolveOptions) -> Result<Tour, SolveError> {
    if graph.is_empty() {
        return Err(SolveError::EmptyGraph);
    }
    graph.validate_partition()?;

    let home_idx = match options.home_platform {
        Some(id) => Some(graph.require(id)?),
        None => None,
    };

    let costs = all_pairs(graph)?;

    if graph.num_stations() == 1 {
        // Nothing to order: any single platform visits the only station.
        let platform = home_idx.unwrap_or(0);
        let id = graph.platform_at(platform).id();
        return validate_tour(graph, &costs, &[id], 0.0, options, false);
    }

    let reduced = reduce(graph, &costs, home_idx)?;

    let (reduced_tour, reduced_cost, exhausted) = if reduced.len() <= options.exact_threshold {
        info!(nodes = reduced.len(), "running exact Held-Karp search");
        let (tour, cost) = held_karp(reduced.costs());
        (tour, cost, false)
    } else {
        info!(
            nodes = reduced.len(),
            restarts = options.restarts,
            "running metaheuristic search"
        );
        metaheuristic(reduced.costs(), options)
    };

    if exhausted {
        warn!("search budget exhausted; returning best tour found so far");
    }

    let mut platforms = reduced.decode(&reduced_tour);
    let anchor = home_idx.unwrap_or_else(|| platforms.iter().copied().min().unwrap_or(0));
    if let Some(pos) = platforms.iter().position(|&p| p == anchor) {
        platforms.rotate_left(pos);
    }

    let reported = reduced_cost - reduced.offset();
    debug!(reported, stations = platforms.len(), "tour decoded");

    let ids: Vec<u64> = platforms
        .iter()
        .map(|&idx| graph.platform_at(idx).id())
        .collect();
    validate_tour(graph, &costs, &ids, reported, options, exhausted)
}

/// Multi-restart nearest-neighbor + local search over the reduced ATSP.
///
/// Restarts are independent (each owns its tour and derived seed) and run
/// on parallel workers; the best result wins, ties broken by restart index
/// so a fixed seed gives a stable answer regardless of scheduling.
fn metaheuristic(costs: &CostMatrix, options: &SolveOptions) -> (Vec<usize>, f64, bool) {
    let limits = SearchLimits {
        deadline: options.time_budget.map(|budget| Instant::now() + budget),
        max_passes: options.max_passes,
        cancel: options.cancel.clone(),
    };

    let restarts = options.restarts.max(1);
    let results: Vec<(Vec<usize>, f64, bool)> = (0..restarts)
        .into_par_iter()
        .map(|restart| {
            let seed = options.seed.wrapping_add(restart as u64);
            run_restart(costs, seed, &limits)
        })
        .collect();

    results
        .into_iter()
        .enumerate()
        .min_by(|(i, a), (j, b)| a.1.total_cmp(&b.1).then(i.cmp(j)))
        .map(|(_, best)| best)
        .expect("at least one restart ran")
}

/// One restart: seeded construction, then improvement passes until no
/// improving move remains or the budget cuts in.
fn run_restart(costs: &CostMatrix, seed: u64, limits: &SearchLimits) -> (Vec<usize>, f64, bool) {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = rng.random_range(0..costs.size());
    let mut tour = nearest_neighbor_tour(costs, start);

    let mut passes = 0u64;
    let mut exhausted = false;
    loop {
        if limits.exceeded(passes) {
            exhausted = true;
            break;
        }
        let improved = two_opt_pass(&mut tour, costs) || or_opt_pass(&mut tour, costs);
        passes += 1;
        if !improved {
            break;
        }
    }

    let cost = tour_cost(&tour, costs);
    (tour, cost, exhausted)
}

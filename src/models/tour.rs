//! Tour output types.

use serde::Serialize;

/// One step of a tour: a platform reached at a cumulative cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TourStep {
    /// Platform id visited at this step.
    pub platform: u64,
    /// Station the platform belongs to.
    pub station: u64,
    /// Total travel time from the start of the tour to this platform.
    pub cumulative_cost: f64,
}

/// The platform through which a station was visited.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationVisit {
    /// Station id.
    pub station: u64,
    /// The platform that satisfied the visit.
    pub platform: u64,
}

/// A solved itinerary: an ordered platform sequence with exactly one
/// platform per station.
///
/// For a round trip the final step returns to the starting platform; the
/// closing leg's cost is included in the total. Otherwise the tour ends at
/// the last distinct station and the closing leg is omitted.
///
/// `budget_exhausted` reports graceful degradation: the metaheuristic ran
/// out of time or passes and returned the best tour found so far. It is
/// never an error.
#[derive(Debug, Clone, Serialize)]
pub struct Tour {
    steps: Vec<TourStep>,
    total_cost: f64,
    visits: Vec<StationVisit>,
    round_trip: bool,
    budget_exhausted: bool,
}

impl Tour {
    pub(crate) fn new(
        steps: Vec<TourStep>,
        total_cost: f64,
        visits: Vec<StationVisit>,
        round_trip: bool,
        budget_exhausted: bool,
    ) -> Self {
        Self {
            steps,
            total_cost,
            visits,
            round_trip,
            budget_exhausted,
        }
    }

    /// The ordered steps, each with its cumulative cost.
    pub fn steps(&self) -> &[TourStep] {
        &self.steps
    }

    /// Total travel time of the tour in seconds.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Which platform satisfied each station's visit, sorted by station id.
    pub fn visits(&self) -> &[StationVisit] {
        &self.visits
    }

    /// Returns `true` if the tour closes back at its starting platform.
    pub fn is_round_trip(&self) -> bool {
        self.round_trip
    }

    /// Returns `true` if a time or pass budget cut the search short.
    pub fn budget_exhausted(&self) -> bool {
        self.budget_exhausted
    }

    /// The visited platform ids in order.
    pub fn platform_ids(&self) -> Vec<u64> {
        self.steps.iter().map(|s| s.platform).collect()
    }

    /// Number of steps, including the closing step of a round trip.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if the tour has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

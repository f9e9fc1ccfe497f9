//! Clustered transit graph.
//!
//! Platforms are nodes, stations are disjoint clusters of platforms, and
//! directed weighted edges carry travel or transfer time. The partition
//! (station id -> platforms) is an explicit structure, validated before any
//! solve rather than grouped ad hoc at solve time.

use std::collections::HashMap;
use std::collections::BTreeMap;

use crate::error::SolveError;

use super::{EdgeKind, EdgeRecord, GeoPoint, Platform, PlatformRecord};

/// A single outgoing edge as seen through [`TransitGraph::neighbors`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Destination platform id.
    pub platform: u64,
    /// Edge weight in seconds.
    pub weight: f64,
    /// Ride or transfer.
    pub kind: EdgeKind,
}

/// Internal adjacency entry, indexed by dense platform index.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OutEdge {
    pub(crate) to: usize,
    pub(crate) weight: f64,
    pub(crate) kind: EdgeKind,
}

/// A weighted directed multigraph of platforms with a station partition.
///
/// Construction is fail-fast: duplicate platform ids, unknown edge
/// endpoints, and negative or non-finite weights are rejected immediately,
/// so no partially-built graph ever reaches a solver.
///
/// # Examples
///
/// ```
/// use transit_tour::models::{EdgeKind, TransitGraph};
///
/// let mut graph = TransitGraph::new();
/// graph.add_platform(1, 100, None).unwrap();
/// graph.add_platform(2, 100, None).unwrap();
/// graph.add_platform(3, 200, None).unwrap();
/// graph.add_edge(1, 2, 90.0, EdgeKind::Transfer).unwrap();
/// graph.add_edge(2, 3, 300.0, EdgeKind::Ride).unwrap();
///
/// assert_eq!(graph.num_platforms(), 3);
/// assert_eq!(graph.num_stations(), 2);
/// assert_eq!(graph.station_of(2).unwrap(), 100);
/// assert_eq!(graph.platforms_of(100).unwrap(), vec![1, 2]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransitGraph {
    platforms: Vec<Platform>,
    index: HashMap<u64, usize>,
    adjacency: Vec<Vec<OutEdge>>,
    // BTreeMap keeps station iteration order deterministic across runs.
    stations: BTreeMap<u64, Vec<usize>>,
}

impl TransitGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from the ingestion boundary's record lists.
    ///
    /// This is the sole input contract of the core: the data-acquisition
    /// collaborator hands over platform and edge records, nothing else.
    pub fn from_records(
        platforms: &[PlatformRecord],
        edges: &[EdgeRecord],
    ) -> Result<Self, SolveError> {
        let mut graph = Self::new();
        for p in platforms {
            graph.add_platform(p.id, p.station, p.position)?;
        }
        for e in edges {
            graph.add_edge(e.from, e.to, e.weight, e.kind)?;
        }
        Ok(graph)
    }

    /// Declares a station ahead of its platforms.
    ///
    /// Stations are normally declared implicitly by the first platform that
    /// references them; explicit declaration lets an ingestion layer
    /// register its station list up front. A station still empty when a
    /// solve begins fails partition validation.
    pub fn add_station(&mut self, station: u64) {
        self.stations.entry(station).or_default();
    }

    /// Adds a platform belonging to `station`, with an optional position.
    ///
    /// Fails with [`SolveError::DuplicateId`] if the platform id exists.
    pub fn add_platform(
        &mut self,
        id: u64,
        station: u64,
        position: Option<GeoPoint>,
    ) -> Result<(), SolveError> {
        if self.index.contains_key(&id) {
            return Err(SolveError::DuplicateId { platform: id });
        }
        let idx = self.platforms.len();
        let mut platform = Platform::new(id, station);
        if let Some(pos) = position {
            platform = platform.with_position(pos);
        }
        self.platforms.push(platform);
        self.index.insert(id, idx);
        self.adjacency.push(Vec::new());
        self.stations.entry(station).or_default().push(idx);
        Ok(())
    }

    /// Adds a directed edge between two existing platforms.
    ///
    /// Fails with [`SolveError::UnknownPlatform`] if either endpoint is
    /// absent and [`SolveError::InvalidWeight`] if the weight is negative or
    /// non-finite. Parallel edges between the same pair are allowed
    /// (different lines); the shortest-path oracle keeps the cheapest.
    pub fn add_edge(
        &mut self,
        from: u64,
        to: u64,
        weight: f64,
        kind: EdgeKind,
    ) -> Result<(), SolveError> {
        let from_idx = self.require(from)?;
        let to_idx = self.require(to)?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(SolveError::InvalidWeight { from, to, weight });
        }
        self.adjacency[from_idx].push(OutEdge {
            to: to_idx,
            weight,
            kind,
        });
        Ok(())
    }

    /// Outgoing edges of a platform, one entry per edge.
    pub fn neighbors(&self, platform: u64) -> Result<Vec<Neighbor>, SolveError> {
        let idx = self.require(platform)?;
        Ok(self.adjacency[idx]
            .iter()
            .map(|arc| Neighbor {
                platform: self.platforms[arc.to].id(),
                weight: arc.weight,
                kind: arc.kind,
            })
            .collect())
    }

    /// The station a platform belongs to.
    pub fn station_of(&self, platform: u64) -> Result<u64, SolveError> {
        let idx = self.require(platform)?;
        Ok(self.platforms[idx].station())
    }

    /// The platforms of a station, in insertion order.
    ///
    /// Fails with [`SolveError::InvalidPartition`] if the station was never
    /// declared.
    pub fn platforms_of(&self, station: u64) -> Result<Vec<u64>, SolveError> {
        let members = self
            .stations
            .get(&station)
            .ok_or(SolveError::InvalidPartition { station })?;
        Ok(members.iter().map(|&i| self.platforms[i].id()).collect())
    }

    /// All platforms, in insertion order.
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Number of platforms.
    pub fn num_platforms(&self) -> usize {
        self.platforms.len()
    }

    /// Number of stations (declared or implied).
    pub fn num_stations(&self) -> usize {
        self.stations.len()
    }

    /// Returns `true` if the graph has no platforms.
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Validates the station partition.
    ///
    /// Every platform maps to exactly one station by construction; what can
    /// still go wrong is a station declared via [`add_station`] that never
    /// received a platform. Called lazily before any solve.
    ///
    /// [`add_station`]: TransitGraph::add_station
    pub fn validate_partition(&self) -> Result<(), SolveError> {
        for (&station, members) in &self.stations {
            if members.is_empty() {
                return Err(SolveError::InvalidPartition { station });
            }
        }
        debug_assert_eq!(
            self.stations.values().map(Vec::len).sum::<usize>(),
            self.platforms.len()
        );
        Ok(())
    }

    pub(crate) fn platform_index(&self, id: u64) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub(crate) fn require(&self, id: u64) -> Result<usize, SolveError> {
        self.platform_index(id)
            .ok_or(SolveError::UnknownPlatform { platform: id })
    }

    pub(crate) fn platform_at(&self, idx: usize) -> &Platform {
        &self.platforms[idx]
    }

    pub(crate) fn arcs(&self, idx: usize) -> &[OutEdge] {
        &self.adjacency[idx]
    }

    /// Station iteration in deterministic (ascending id) order, with member
    /// platform indices.
    pub(crate) fn station_members(&self) -> impl Iterator<Item = (u64, &[usize])> {
        self.stations.iter().map(|(&id, v)| (id, v.as_slice()))
    }
}

//! Reduced ATSP instance with its mapping back to platforms.

use crate::distance::CostMatrix;

/// An ordinary ATSP instance derived from the clustered problem, plus the
/// bookkeeping needed to translate tours back to platforms.
///
/// Nodes are platforms (one reduced node per surviving platform); each
/// station's nodes form a zero-cost internal cycle, and every inter-station
/// arc carries a penalty term. `offset()` is the constant to subtract from
/// a reduced tour length to recover the true travel time.
#[derive(Debug, Clone)]
pub struct ReducedInstance {
    costs: CostMatrix,
    offset: f64,
    /// Reduced node -> platform index in the source graph.
    node_platform: Vec<usize>,
    /// Reduced node -> dense cluster index.
    node_cluster: Vec<usize>,
    /// Reduced node -> successor in its cluster's internal cycle.
    cycle_next: Vec<usize>,
    /// Dense cluster index -> station id (for error reporting).
    cluster_station: Vec<u64>,
    /// Platform index in the source graph -> reduced node, if present.
    platform_node: Vec<Option<usize>>,
}

impl ReducedInstance {
    pub(crate) fn new(
        costs: CostMatrix,
        offset: f64,
        node_platform: Vec<usize>,
        node_cluster: Vec<usize>,
        cycle_next: Vec<usize>,
        cluster_station: Vec<u64>,
        num_graph_platforms: usize,
    ) -> Self {
        let mut platform_node = vec![None; num_graph_platforms];
        for (node, &platform) in node_platform.iter().enumerate() {
            platform_node[platform] = Some(node);
        }
        Self {
            costs,
            offset,
            node_platform,
            node_cluster,
            cycle_next,
            cluster_station,
            platform_node,
        }
    }

    /// The derived ATSP cost matrix.
    pub fn costs(&self) -> &CostMatrix {
        &self.costs
    }

    /// Number of reduced nodes.
    pub fn len(&self) -> usize {
        self.node_platform.len()
    }

    /// Returns `true` if the instance has no nodes.
    pub fn is_empty(&self) -> bool {
        self.node_platform.is_empty()
    }

    /// Number of clusters (stations) in the instance.
    pub fn num_clusters(&self) -> usize {
        self.cluster_station.len()
    }

    /// The constant to subtract from a reduced tour length.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The source-graph platform index behind a reduced node.
    pub fn platform_of(&self, node: usize) -> usize {
        self.node_platform[node]
    }

    /// The dense cluster index of a reduced node.
    pub fn cluster_of(&self, node: usize) -> usize {
        self.node_cluster[node]
    }

    /// The station id behind a dense cluster index.
    pub fn station_of_cluster(&self, cluster: usize) -> u64 {
        self.cluster_station[cluster]
    }

    /// Translates a reduced tour into one platform per cluster.
    ///
    /// A well-formed reduced tour traverses each cluster's internal cycle
    /// contiguously; the platform that satisfies the cluster's visit is the
    /// entry node of its block. The walk starts at a block boundary so the
    /// wrap-around block is attributed to its true entry.
    pub fn decode(&self, tour: &[usize]) -> Vec<usize> {
        let n = tour.len();
        if n == 0 {
            return Vec::new();
        }
        let start = (0..n)
            .find(|&i| self.node_cluster[tour[(i + n - 1) % n]] != self.node_cluster[tour[i]])
            .unwrap_or(0);

        let mut seen = vec![false; self.num_clusters()];
        let mut platforms = Vec::with_capacity(self.num_clusters());
        for k in 0..n {
            let node = tour[(start + k) % n];
            let cluster = self.node_cluster[node];
            if !seen[cluster] {
                seen[cluster] = true;
                platforms.push(self.node_platform[node]);
            }
        }
        platforms
    }

    /// The forward mapping: expands a platform-per-cluster sequence into
    /// the reduced tour that visits each cluster's cycle from that entry.
    ///
    /// Returns `None` if a platform is not part of this instance. Inverse
    /// of [`decode`](ReducedInstance::decode) up to rotation.
    pub fn encode(&self, platforms: &[usize]) -> Option<Vec<usize>> {
        let mut tour = Vec::with_capacity(self.len());
        for &platform in platforms {
            let entry = self.platform_node.get(platform).copied().flatten()?;
            let mut node = entry;
            loop {
                tour.push(node);
                node = self.cycle_next[node];
                if node == entry {
                    break;
                }
            }
        }
        Some(tour)
    }

    /// Whether each cluster's nodes appear as one contiguous cyclic block.
    ///
    /// Penalty accounting guarantees this for any tour the search accepts;
    /// the check is a diagnostic for candidate tours from elsewhere.
    pub fn is_cluster_contiguous(&self, tour: &[usize]) -> bool {
        let n = tour.len();
        let boundaries = (0..n)
            .filter(|&i| self.node_cluster[tour[(i + n - 1) % n]] != self.node_cluster[tour[i]])
            .count();
        boundaries == self.num_clusters() || self.num_clusters() == 1
    }
}

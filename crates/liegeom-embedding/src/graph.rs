//! Symmetric k-nearest-neighbor graphs and graph geodesic distances.
//!
//! Each point is joined to its `n_neighbors` closest points (ties broken by
//! index, the point itself excluded) and every edge is then made undirected.
//! Graph geodesics are shortest-path lengths along these edges, computed by
//! Dijkstra's algorithm from every node.

use liegeom_core::{
    distance::DistanceMatrix,
    error::{LieError, Result},
    types::DMatrix,
};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Undirected weighted neighbor graph over the rows of a distance matrix.
#[derive(Debug, Clone)]
pub struct NeighborGraph {
    adjacency: Vec<Vec<(usize, f64)>>,
    n_neighbors: usize,
}

impl NeighborGraph {
    /// Builds the symmetric k-nearest-neighbor graph.
    ///
    /// `n_neighbors` larger than `len - 1` connects every pair.
    ///
    /// # Errors
    ///
    /// - `InvalidDimension`: if `n_neighbors == 0`
    pub fn from_distances(distances: &DistanceMatrix, n_neighbors: usize) -> Result<Self> {
        if n_neighbors == 0 {
            return Err(LieError::invalid_dimension(
                "neighbor graph requires n_neighbors >= 1",
            ));
        }
        let n = distances.len();
        let k = n_neighbors.min(n.saturating_sub(1));

        let mut linked = vec![false; n * n];
        let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::with_capacity(k); n];

        for i in 0..n {
            let mut candidates: Vec<usize> = (0..n).filter(|&j| j != i).collect();
            candidates.sort_by(|&a, &b| {
                distances
                    .get(i, a)
                    .total_cmp(&distances.get(i, b))
                    .then(a.cmp(&b))
            });
            for &j in candidates.iter().take(k) {
                if !linked[i * n + j] {
                    let w = distances.get(i, j);
                    linked[i * n + j] = true;
                    linked[j * n + i] = true;
                    adjacency[i].push((j, w));
                    adjacency[j].push((i, w));
                }
            }
        }

        Ok(Self {
            adjacency,
            n_neighbors,
        })
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Requested neighbor count.
    pub fn n_neighbors(&self) -> usize {
        self.n_neighbors
    }

    /// Neighbors of `node` with edge weights.
    pub fn neighbors(&self, node: usize) -> &[(usize, f64)] {
        &self.adjacency[node]
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Number of connected components, counted with union-find.
    pub fn connected_components(&self) -> usize {
        let mut sets = DisjointSets::new(self.len());
        for (i, edges) in self.adjacency.iter().enumerate() {
            for &(j, _) in edges {
                sets.union(i, j);
            }
        }
        sets.count()
    }

    /// Shortest-path distances from `source` to every node.
    ///
    /// Unreachable nodes are at infinite distance.
    pub fn shortest_paths_from(&self, source: usize) -> Vec<f64> {
        let mut dist = vec![f64::INFINITY; self.len()];
        let mut heap = BinaryHeap::new();
        dist[source] = 0.0;
        heap.push(Frontier {
            cost: 0.0,
            node: source,
        });

        while let Some(Frontier { cost, node }) = heap.pop() {
            if cost > dist[node] {
                continue;
            }
            for &(next, weight) in &self.adjacency[node] {
                let candidate = cost + weight;
                if candidate < dist[next] {
                    dist[next] = candidate;
                    heap.push(Frontier {
                        cost: candidate,
                        node: next,
                    });
                }
            }
        }
        dist
    }

    /// All-pairs graph geodesic distances.
    ///
    /// # Errors
    ///
    /// - `DisconnectedNeighborGraph`: if the graph has more than one component
    pub fn geodesic_distances(&self) -> Result<DistanceMatrix> {
        let components = self.connected_components();
        if components > 1 {
            return Err(LieError::disconnected_graph(components, self.n_neighbors));
        }

        let n = self.len();
        let mut rows = DMatrix::<f64>::zeros(n, n);
        for i in 0..n {
            for (j, d) in self.shortest_paths_from(i).into_iter().enumerate() {
                rows[(i, j)] = d;
            }
        }

        // Path sums accumulate in opposite orders from the two endpoints.
        let symmetric = DMatrix::from_fn(n, n, |i, j| {
            if i == j {
                0.0
            } else {
                0.5 * (rows[(i, j)] + rows[(j, i)])
            }
        });
        DistanceMatrix::from_matrix(symmetric)
    }
}

/// Graph geodesic distances on the symmetric k-nearest-neighbor graph.
pub fn graph_geodesic_distances(
    distances: &DistanceMatrix,
    n_neighbors: usize,
) -> Result<DistanceMatrix> {
    let graph = NeighborGraph::from_distances(distances, n_neighbors)?;
    tracing::debug!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        n_neighbors,
        "computing graph geodesics"
    );
    graph.geodesic_distances()
}

#[derive(Debug, Clone, Copy)]
struct Frontier {
    cost: f64,
    node: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    // Reversed so the max-heap pops the cheapest node first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

struct DisjointSets {
    parent: Vec<usize>,
    rank: Vec<u8>,
    count: usize,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            count: n,
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            Ordering::Less => self.parent[ra] = rb,
            Ordering::Greater => self.parent[rb] = ra,
            Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        self.count -= 1;
    }

    fn count(&self) -> usize {
        self.count
    }
}

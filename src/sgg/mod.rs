mod builder;
pub use builder::{build_sgg, compress_subgraph};

use crate::types::NODE_ABSENT;
use crate::Graph;

/**
A path-compressed single genome graph (SGG).

An SGG is built from an edge-induced subgraph of a two-sided cdBG in which
maximal chains of degree-2 ports have been contracted into single weighted
macro-edges. Each contracted chain is kept as a [CompressedPath] with a
prefix-sum array, so distances between an interior port and the chain's
endpoints (or between two interiors of the same chain) are O(1) lookups.

`node_map` translates *original* port ids into the compressed id space:
a port is either absent from this genome, an interior of exactly one path,
or a non-path node of the compressed graph.
*/
#[derive(Clone, Debug, Default)]
pub struct SingleGenomeGraph {
    graph: Graph,
    paths: Vec<CompressedPath>,
    // Original port id -> (path_idx, mapped_idx); NODE_ABSENT marks absence.
    node_map: Vec<(usize, usize)>,
}

/// A contracted degree-2 chain. `prefix_sums[i]` is the distance from the
/// path's start node to its i-th interior port; the last entry is the total
/// path length to the end node.
#[derive(Clone, Debug)]
pub struct CompressedPath {
    pub start_node: usize,
    pub end_node: usize,
    prefix_sums: Vec<f64>,
}

impl CompressedPath {
    fn distance_to_start(&self, idx: usize) -> f64 {
        self.prefix_sums[idx]
    }

    fn distance_to_end(&self, idx: usize) -> f64 {
        self.prefix_sums[self.prefix_sums.len() - 1] - self.prefix_sums[idx]
    }

    fn distance_in_path(&self, idx_1: usize, idx_2: usize) -> f64 {
        (self.prefix_sums[idx_1] - self.prefix_sums[idx_2]).abs()
    }
}

impl SingleGenomeGraph {
    /// The compressed graph itself; node ids here are compressed ids.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The number of compressed nodes.
    pub fn size(&self) -> usize {
        self.graph.size()
    }

    pub fn n_paths(&self) -> usize {
        self.paths.len()
    }

    /// The left port of logical vertex `v` in the original id space.
    pub fn left_port(&self, v: usize) -> usize {
        v * 2
    }

    /// The right port of logical vertex `v` in the original id space.
    pub fn right_port(&self, v: usize) -> usize {
        v * 2 + 1
    }

    /// Whether the original port belongs to this genome's subgraph.
    pub fn contains_port(&self, original_idx: usize) -> bool {
        original_idx < self.node_map.len() && self.is_mapped(original_idx)
    }

    /// Whether logical vertex `v` belongs to this genome's subgraph.
    pub fn contains_vertex(&self, v: usize) -> bool {
        self.contains_port(self.left_port(v))
    }

    pub fn is_on_path(&self, original_idx: usize) -> bool {
        self.path_idx(original_idx) != NODE_ABSENT
    }

    pub fn is_mapped(&self, original_idx: usize) -> bool {
        self.mapped_idx(original_idx) != NODE_ABSENT
    }

    /// The path owning this original port, or `NODE_ABSENT`.
    pub fn path_idx(&self, original_idx: usize) -> usize {
        self.node_map[original_idx].0
    }

    /// The compressed id of a non-path port, or the interior index of a
    /// path port.
    pub fn mapped_idx(&self, original_idx: usize) -> usize {
        self.node_map[original_idx].1
    }

    pub fn path_start(&self, path_idx: usize) -> usize {
        self.paths[path_idx].start_node
    }

    pub fn path_end(&self, path_idx: usize) -> usize {
        self.paths[path_idx].end_node
    }

    /// The path's start node and the distance from interior `idx` to it.
    pub fn distance_to_start(&self, path_idx: usize, idx: usize) -> (usize, f64) {
        let path = &self.paths[path_idx];
        (path.start_node, path.distance_to_start(idx))
    }

    /// The path's end node and the distance from interior `idx` to it.
    pub fn distance_to_end(&self, path_idx: usize, idx: usize) -> (usize, f64) {
        let path = &self.paths[path_idx];
        (path.end_node, path.distance_to_end(idx))
    }

    /// The intra-path distance between two interiors of the same path.
    pub fn distance_in_path(&self, path_idx: usize, idx_1: usize, idx_2: usize) -> f64 {
        self.paths[path_idx].distance_in_path(idx_1, idx_2)
    }

    /// Shortest distances in the compressed graph; see
    /// [Graph::distance](../struct.Graph.html#method.distance).
    pub fn distance(
        &self,
        sources: &[(usize, f64)],
        targets: &[usize],
        max_distance: f64,
    ) -> Vec<f64> {
        self.graph.distance(sources, targets, max_distance)
    }

    // Construction helpers, used only by the builder.

    pub(crate) fn resize_node_map(&mut self, size: usize) {
        self.node_map.resize(size, (NODE_ABSENT, NODE_ABSENT));
    }

    pub(crate) fn node_map_len(&self) -> usize {
        self.node_map.len()
    }

    pub(crate) fn set_node_map(&mut self, original_idx: usize, path_idx: usize, mapped_idx: usize) {
        self.node_map[original_idx] = (path_idx, mapped_idx);
    }

    pub(crate) fn add_node(&mut self) {
        self.graph.add_node();
    }

    pub(crate) fn add_edge(&mut self, v: usize, w: usize, weight: f64) {
        self.graph.add_edge(v, w, weight);
    }

    pub(crate) fn add_new_path(
        &mut self,
        start_node: usize,
        end_node: usize,
        prefix_sums: Vec<f64>,
    ) {
        self.paths.push(CompressedPath {
            start_node,
            end_node,
            prefix_sums,
        });
    }
}

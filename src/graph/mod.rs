pub mod builder;
mod dijkstra;

/**
An undirected weighted graph over a dense range of node ids, stored as a
port-indexed adjacency list.

Every edge is stored on both endpoints; `add_edge` keeps that symmetric
invariant, rejects self-loops, and treats a repeated edge as a relaxation
to the minimum weight. There are no multi-edges.

A graph can be *two-sided*: each logical vertex `u` then owns two ports,
`2u` (left, canonical orientation) and `2u + 1` (right, reverse
orientation), connected by a self-edge whose weight is the vertex's
intrinsic length. This keeps per-vertex lengths inside the ordinary edge
relaxation of a shortest-path search instead of needing a separate vertex
weight table.

# Examples

```
use dbgdist::Graph;

let mut graph = Graph::new(false, false);
graph.resize(3);
graph.add_edge(0, 1, 2.0);
graph.add_edge(1, 2, 3.0);
graph.add_edge(1, 2, 5.0); // keeps the shorter weight
assert_eq!(graph.degree(1), 2);
assert!(graph.has_edge(2, 1));
```
*/
#[derive(Clone, Debug, Default)]
pub struct Graph {
    adj: Vec<Vec<(usize, f64)>>,
    // Filled only when the graph is two-sided; indexed by logical vertex.
    self_edge_weights: Vec<f64>,
    one_based: bool,
    two_sided: bool,
}

impl Graph {
    pub fn new(one_based: bool, two_sided: bool) -> Graph {
        Graph {
            adj: vec![],
            self_edge_weights: vec![],
            one_based,
            two_sided,
        }
    }

    /// The number of node slots; in a two-sided graph this counts ports.
    pub fn size(&self) -> usize {
        self.adj.len()
    }

    /// The number of logical vertices of a two-sided graph.
    pub fn true_size(&self) -> usize {
        self.size() / 2
    }

    pub fn contains(&self, v: usize) -> bool {
        v < self.adj.len()
    }

    pub fn one_based(&self) -> bool {
        self.one_based
    }

    pub fn two_sided(&self) -> bool {
        self.two_sided
    }

    pub fn resize(&mut self, size: usize) {
        self.adj.resize(size, vec![]);
    }

    pub fn add_node(&mut self) {
        self.adj.push(vec![]);
    }

    /**
    Adds the undirected edge `(v, w)`, storing it on both endpoints.

    A self-loop is silently ignored. If the edge already exists the stored
    weight becomes the minimum of the old and new weights; a repeated edge
    is a relaxation, not a duplication.
    */
    pub fn add_edge(&mut self, v: usize, w: usize, weight: f64) {
        if v == w {
            return;
        }
        match self.find_edge(v, w) {
            None => {
                self.adj[v].push((w, weight));
                self.adj[w].push((v, weight));
            }
            Some(i) => {
                // Edge exists, update to the shorter weight on both sides.
                if self.adj[v][i].1 <= weight {
                    return;
                }
                self.adj[v][i].1 = weight;
                let j = self.find_edge(w, v).unwrap();
                self.adj[w][j].1 = weight;
            }
        }
    }

    /// Appends a two-sided vertex: two ports linked by a self-edge of
    /// weight `self_edge_weight`.
    pub fn add_two_sided_node(&mut self, self_edge_weight: f64) {
        self.add_node();
        self.add_node();
        self.add_edge(self.size() - 2, self.size() - 1, self_edge_weight);
        self.self_edge_weights.push(self_edge_weight);
    }

    pub fn has_edge(&self, v: usize, w: usize) -> bool {
        self.find_edge(v, w).is_some()
    }

    pub fn remove_edge(&mut self, v: usize, w: usize) {
        if let Some(i) = self.find_edge(v, w) {
            self.adj[v].remove(i);
            let j = self.find_edge(w, v).unwrap();
            self.adj[w].remove(j);
        }
    }

    pub fn disconnect_node(&mut self, v: usize) {
        let neighbors: Vec<usize> = self.adj[v].iter().map(|&(w, _)| w).collect();
        for w in neighbors {
            self.remove_edge(v, w);
        }
    }

    pub fn degree(&self, v: usize) -> usize {
        self.adj[v].len()
    }

    pub fn neighbors(&self, v: usize) -> &[(usize, f64)] {
        &self.adj[v]
    }

    /// The left (canonical) port of logical vertex `v`.
    pub fn left_node(&self, v: usize) -> usize {
        v * 2
    }

    /// The right (reverse) port of logical vertex `v`.
    pub fn right_node(&self, v: usize) -> usize {
        v * 2 + 1
    }

    /// The partner port of port `v`.
    pub fn other_side(&self, v: usize) -> usize {
        v ^ 1
    }

    /// The intrinsic self-edge weight of the vertex owning port `v`.
    pub fn self_edge_weight(&self, v: usize) -> f64 {
        if self.two_sided {
            self.self_edge_weights[v / 2]
        } else {
            0.0
        }
    }

    fn find_edge(&self, v: usize, w: usize) -> Option<usize> {
        self.adj[v].iter().position(|&(u, _)| u == w)
    }
}

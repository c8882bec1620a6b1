use super::Graph;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/**
An entry of the search fringe: a port together with its tentative
distance. Ordered so that a `BinaryHeap` pops the smallest distance first,
with ties broken by the smaller port id.
*/
struct FringeNode {
    distance: f64,
    port: usize,
}

impl Ord for FringeNode {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.distance < other.distance {
            Ordering::Greater
        } else if self.distance > other.distance {
            Ordering::Less
        } else {
            other.port.cmp(&self.port)
        }
    }
}

impl PartialOrd for FringeNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FringeNode {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance && self.port == other.port
    }
}

impl Eq for FringeNode {}

impl Graph {
    /**
    Computes the shortest distance from any of `sources` to each of
    `targets`, capped at `max_distance`.

    Multi-source, multi-target Dijkstra with a binary heap and lazy discard
    of stale entries. `sources` pairs each starting port with an initial
    distance; duplicate source ports keep the minimum. The result is
    aligned with `targets`; an entry equal to `max_distance` means the
    target is unreachable within the cap. Relaxations that would not
    improve on the cap are never enqueued, so the cap also prunes the
    search.

    In a two-sided graph a vertex counts as reached as soon as *either* of
    its ports is settled; the search ends early once every target vertex
    has been reached. Ports outside the graph are ignored (such targets
    report `max_distance`).

    # Arguments

    * `sources`: `(port, initial_distance)` pairs.
    * `targets`: ports whose distances are wanted.
    * `max_distance`: hard cap on returned distances.

    # Examples

    ```
    use dbgdist::types::DIST_MAX;
    use dbgdist::Graph;

    let mut graph = Graph::new(false, false);
    graph.resize(3);
    graph.add_edge(0, 1, 2.0);
    graph.add_edge(1, 2, 3.0);

    let dist = graph.distance(&[(0, 0.0)], &[2, 0], DIST_MAX);
    assert_eq!(dist, vec![5.0, 0.0]);
    ```
    */
    pub fn distance(
        &self,
        sources: &[(usize, f64)],
        targets: &[usize],
        max_distance: f64,
    ) -> Vec<f64> {
        let mut dist = vec![max_distance; self.size()];

        let mut is_target = vec![false; self.size()];
        let mut targets_left: i64 = 0;
        for &w in targets {
            if w < self.size() {
                is_target[w] = true;
                targets_left += 1;
            }
        }

        let mut fringe = BinaryHeap::new();
        for &(v, initial_distance) in sources {
            if v < self.size() && initial_distance < dist[v] {
                dist[v] = initial_distance;
            }
        }
        for &(v, _) in sources {
            if v < self.size() {
                fringe.push(FringeNode {
                    distance: dist[v],
                    port: v,
                });
            }
        }

        while let Some(FringeNode { distance: d, port: v }) = fringe.pop() {
            if d > dist[v] {
                continue; // Stale entry.
            }
            if is_target[v] {
                is_target[v] = false;
                targets_left -= 1;
                if self.two_sided() {
                    // The vertex is reached; its other port no longer counts.
                    is_target[self.other_side(v)] = false;
                    targets_left -= 1;
                }
                if targets_left <= 0 {
                    break;
                }
            }
            for &(w, weight) in self.neighbors(v) {
                let vw_dist = dist[v] + weight;
                if vw_dist < dist[w] {
                    dist[w] = vw_dist;
                    fringe.push(FringeNode {
                        distance: vw_dist,
                        port: w,
                    });
                }
            }
        }

        targets
            .iter()
            .map(|&w| if w < self.size() { dist[w] } else { max_distance })
            .collect()
    }

    /// Shortest distance between a single pair of ports.
    pub fn distance_between(&self, source: usize, target: usize, max_distance: f64) -> f64 {
        self.distance(&[(source, 0.0)], &[target], max_distance)[0]
    }
}

#[cfg(test)]
mod tests {

    use dbgdist::types::DIST_MAX;
    use dbgdist::Graph;
    use rand::Rng;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn random_graph(rng: &mut ChaCha8Rng, n: usize, n_edges: usize) -> Graph {
        let mut graph = Graph::new(false, false);
        graph.resize(n);
        for _ in 0..n_edges {
            let v = rng.gen_range(0..n);
            let w = rng.gen_range(0..n);
            let weight = rng.gen_range(0.0..10.0);
            graph.add_edge(v, w, weight);
        }
        graph
    }

    #[test]
    fn test_edge_symmetry() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            let graph = random_graph(&mut rng, 12, 30);
            for v in 0..graph.size() {
                for &(w, weight) in graph.neighbors(v) {
                    let mirrored = graph
                        .neighbors(w)
                        .iter()
                        .find(|&&(u, _)| u == v)
                        .map(|&(_, x)| x);
                    assert_eq!(mirrored, Some(weight));
                }
            }
        }
    }

    #[test]
    fn test_no_multi_edges_and_no_self_loops() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for _ in 0..20 {
            let graph = random_graph(&mut rng, 8, 60);
            for v in 0..graph.size() {
                let mut neighbor_ids: Vec<usize> =
                    graph.neighbors(v).iter().map(|&(w, _)| w).collect();
                assert!(!neighbor_ids.contains(&v));
                neighbor_ids.sort_unstable();
                neighbor_ids.dedup();
                assert_eq!(neighbor_ids.len(), graph.degree(v));
            }
        }
    }

    #[test]
    fn test_min_edge_idempotence() {
        let mut graph = Graph::new(false, false);
        graph.resize(2);
        graph.add_edge(0, 1, 4.0);
        graph.add_edge(0, 1, 7.0);
        assert_eq!(graph.neighbors(0), &[(1, 4.0)]);
        graph.add_edge(0, 1, 2.0);
        assert_eq!(graph.neighbors(0), &[(1, 2.0)]);
        assert_eq!(graph.neighbors(1), &[(0, 2.0)]);

        graph.add_edge(1, 1, 1.0);
        assert_eq!(graph.degree(1), 1);
    }

    #[test]
    fn test_two_sided_self_edge_preservation() {
        let mut graph = Graph::new(false, true);
        graph.add_two_sided_node(7.0);
        graph.add_two_sided_node(3.0);
        graph.add_two_sided_node(0.0);
        // Connect the first two vertices right-to-left.
        graph.add_edge(graph.right_node(0), graph.left_node(1), 1.0);

        for u in 0..graph.true_size() {
            let across =
                graph.distance_between(graph.left_node(u), graph.right_node(u), DIST_MAX);
            assert!(across <= graph.self_edge_weight(graph.left_node(u)));
        }
        // An isolated vertex has no shortcut around its self-edge.
        assert_eq!(
            graph.distance_between(graph.left_node(2), graph.right_node(2), DIST_MAX),
            0.0
        );
        let mut isolated = Graph::new(false, true);
        isolated.add_two_sided_node(7.0);
        assert_eq!(isolated.distance_between(0, 1, DIST_MAX), 7.0);
    }
}

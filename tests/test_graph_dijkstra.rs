#[cfg(test)]
mod tests {

    use assert_approx_eq::assert_approx_eq;
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
            let weight = rng.gen_range(0.0..5.0);
            graph.add_edge(v, w, weight);
        }
        graph
    }

    /// Brute-force reference: relax every edge n times.
    fn bellman_ford(graph: &Graph, source: usize) -> Vec<f64> {
        let mut dist = vec![DIST_MAX; graph.size()];
        dist[source] = 0.0;
        for _ in 0..graph.size() {
            for v in 0..graph.size() {
                if dist[v] == DIST_MAX {
                    continue;
                }
                for &(w, weight) in graph.neighbors(v) {
                    if dist[v] + weight < dist[w] {
                        dist[w] = dist[v] + weight;
                    }
                }
            }
        }
        dist
    }

    #[test]
    fn test_path_of_three() {
        let mut graph = Graph::new(false, false);
        graph.resize(3);
        graph.add_edge(0, 1, 2.0);
        graph.add_edge(1, 2, 3.0);
        assert_eq!(graph.distance_between(0, 2, DIST_MAX), 5.0);
        assert_eq!(graph.distance_between(0, 0, DIST_MAX), 0.0);
        assert_eq!(graph.distance_between(2, 1, DIST_MAX), 3.0);
    }

    #[test]
    fn test_matches_bellman_ford() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for round in 0..50 {
            let n = 2 + (round % 15);
            let graph = random_graph(&mut rng, n, 2 * n);
            for source in 0..n {
                let expected = bellman_ford(&graph, source);
                let targets: Vec<usize> = (0..n).collect();
                let actual = graph.distance(&[(source, 0.0)], &targets, DIST_MAX);
                for (a, e) in actual.iter().zip(expected.iter()) {
                    if *e == DIST_MAX {
                        assert_eq!(*a, DIST_MAX);
                    } else {
                        assert_approx_eq!(*a, *e);
                    }
                }
            }
        }
    }

    #[test]
    fn test_distance_symmetry() {
        let mut rng = ChaCha8Rng::seed_from_u64(43);
        let graph = random_graph(&mut rng, 10, 25);
        for v in 0..graph.size() {
            for w in 0..graph.size() {
                let vw = graph.distance_between(v, w, DIST_MAX);
                let wv = graph.distance_between(w, v, DIST_MAX);
                assert_approx_eq!(vw, wv);
            }
        }
    }

    #[test]
    fn test_cap_reports_no_reachable_path() {
        // Every distance reported at the cap must really be out of reach.
        let mut rng = ChaCha8Rng::seed_from_u64(44);
        for _ in 0..20 {
            let graph = random_graph(&mut rng, 10, 12);
            let max_distance = 6.0;
            for v in 0..graph.size() {
                let exact = bellman_ford(&graph, v);
                let targets: Vec<usize> = (0..graph.size()).collect();
                let capped = graph.distance(&[(v, 0.0)], &targets, max_distance);
                for w in 0..graph.size() {
                    if capped[w] >= max_distance {
                        assert!(exact[w] >= max_distance);
                    } else {
                        assert_approx_eq!(capped[w], exact[w]);
                    }
                }
            }
        }
    }

    #[test]
    fn test_multi_source_takes_best_source() {
        let mut graph = Graph::new(false, false);
        graph.resize(5);
        for v in 0..4 {
            graph.add_edge(v, v + 1, 1.0);
        }
        let dist = graph.distance(&[(0, 0.0), (4, 0.0)], &[2, 3], DIST_MAX);
        assert_eq!(dist, vec![2.0, 1.0]);
        // Initial distances shift the balance.
        let dist = graph.distance(&[(0, 0.0), (4, 3.5)], &[3], DIST_MAX);
        assert_eq!(dist, vec![3.0]);
    }

    #[test]
    fn test_two_sided_unitig_ports() {
        // One unitig of sequence length 10 with k = 3: the two ports sit
        // seven apart, the vertex is at distance zero from itself.
        let mut graph = Graph::new(false, true);
        graph.add_two_sided_node(10.0 - 3.0);
        assert_eq!(graph.distance_between(graph.left_node(0), graph.right_node(0), DIST_MAX), 7.0);
        let dist = graph.distance(&[(0, 0.0), (1, 0.0)], &[0, 1], DIST_MAX);
        assert_eq!(dist[0].min(dist[1]), 0.0);
    }
}

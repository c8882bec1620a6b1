#[cfg(test)]
mod tests {

    use assert_approx_eq::assert_approx_eq;
    use dbgdist::graph::builder;
    use dbgdist::types::DIST_MAX;
    use dbgdist::{
        calculate_sgg_distances, Config, Graph, GraphDistances, Queries, SearchJobs,
    };
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, contents: &str) -> String {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path.to_str().unwrap().to_string()
    }

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn queries_of(pairs: &[(usize, usize)]) -> Queries {
        let mut queries = Queries::default();
        for &(v, w) in pairs {
            queries.add_vertices(v, w);
        }
        queries
    }

    #[test]
    fn test_path_of_three_distances() {
        let mut graph = Graph::new(false, false);
        graph.resize(3);
        graph.add_edge(0, 1, 2.0);
        graph.add_edge(1, 2, 3.0);

        let queries = queries_of(&[(0, 2), (0, 0), (2, 1)]);
        let jobs = SearchJobs::new(&queries);
        let config = Config::default();
        let res = GraphDistances::new(&graph, &config).solve(&jobs).unwrap();
        assert_eq!(res.means(), vec![5.0, 0.0, 3.0]);
    }

    #[test]
    fn test_absent_source_is_unreachable() {
        let mut graph = Graph::new(false, false);
        graph.resize(2);
        graph.add_edge(0, 1, 1.0);

        let queries = queries_of(&[(5, 6)]);
        let jobs = SearchJobs::new(&queries);
        let config = Config::default();
        let res = GraphDistances::new(&graph, &config).solve(&jobs).unwrap();
        assert_eq!(res[0].mean(), DIST_MAX);
    }

    #[test]
    fn test_max_distance_caps_results() {
        let mut graph = Graph::new(false, false);
        graph.resize(3);
        graph.add_edge(0, 1, 2.0);
        graph.add_edge(1, 2, 3.0);

        let queries = queries_of(&[(0, 2), (0, 1)]);
        let jobs = SearchJobs::new(&queries);
        let config = Config {
            max_distance: 4.0,
            ..Config::default()
        };
        let res = GraphDistances::new(&graph, &config).solve(&jobs).unwrap();
        assert_eq!(res[0].mean(), 4.0);
        assert_eq!(res[1].mean(), 2.0);
    }

    /// A cdBG whose unitigs all have self-weight zero, with three genomes
    /// walking from vertex 0 to vertex 1 over chains of 3, 5 and 7 links.
    fn three_genome_fixture(dir: &Path) -> (Graph, String) {
        let mut unitigs = String::new();
        for v in 0..14 {
            unitigs.push_str(&format!("{} ACG\n", v));
        }
        let g1 = "0 2 FR 0\n2 3 FR 0\n3 1 FR 0\n";
        let g2 = "0 4 FR 0\n4 5 FR 0\n5 6 FR 0\n6 7 FR 0\n7 1 FR 0\n";
        let g3 = "0 8 FR 0\n8 9 FR 0\n9 10 FR 0\n10 11 FR 0\n11 12 FR 0\n12 13 FR 0\n13 1 FR 0\n";
        let unitigs = write_file(dir, "all.unitigs", &unitigs);
        let edges = write_file(dir, "all.edges", &format!("{}{}{}", g1, g2, g3));
        let g1 = write_file(dir, "g1.edges", g1);
        let g2 = write_file(dir, "g2.edges", g2);
        let g3 = write_file(dir, "g3.edges", g3);
        let sggs = write_file(dir, "sggs.txt", &format!("{}\n{}\n{}\n", g1, g2, g3));
        let cdbg = builder::cdbg_from_files(&unitigs, &edges, 3, false).unwrap();
        (cdbg, sggs)
    }

    #[test]
    fn test_sgg_distances_aggregate_per_query() {
        init_logging();
        let dir = tempdir().unwrap();
        let (cdbg, sggs) = three_genome_fixture(dir.path());

        let queries = queries_of(&[(0, 1), (0, 20)]);
        let jobs = SearchJobs::new(&queries);
        let config = Config::default();

        let res = calculate_sgg_distances(&cdbg, &jobs, &sggs, &config).unwrap();
        assert!(res.storing_mean_distances());

        // Genomes see distances 3, 5 and 7, folded in file order.
        assert_approx_eq!(res[0].mean(), 5.0);
        assert_eq!(res[0].count(), 3);
        assert_eq!(res[0].min(), 3.0);
        assert_eq!(res[0].max(), 7.0);
        assert_approx_eq!(res[0].m2(), 8.0);

        // Vertex 20 exists in no genome.
        assert_eq!(res[1].count(), 0);
        assert_eq!(res[1].mean(), DIST_MAX);
        assert_eq!(res[1].m2(), -1.0);

        // The base graph agrees with the shortest genome.
        let base = GraphDistances::new(&cdbg, &config).solve(&jobs).unwrap();
        assert_eq!(base[0].mean(), 3.0);
    }

    #[test]
    fn test_sgg_distances_respect_the_cap() {
        let dir = tempdir().unwrap();
        let (cdbg, sggs) = three_genome_fixture(dir.path());

        let queries = queries_of(&[(0, 1)]);
        let jobs = SearchJobs::new(&queries);
        let config = Config {
            max_distance: 6.0,
            ..Config::default()
        };

        // The 7-link genome is cut off and contributes no sample.
        let res = calculate_sgg_distances(&cdbg, &jobs, &sggs, &config).unwrap();
        assert_eq!(res[0].count(), 2);
        assert_approx_eq!(res[0].mean(), 4.0);
        assert_eq!(res[0].min(), 3.0);
        assert_eq!(res[0].max(), 5.0);
    }

    #[test]
    fn test_results_do_not_depend_on_thread_count() {
        let dir = tempdir().unwrap();
        let (cdbg, sggs) = three_genome_fixture(dir.path());

        let queries = queries_of(&[(0, 1), (1, 0), (0, 0), (2, 9)]);
        let jobs = SearchJobs::new(&queries);

        let solo = Config {
            n_threads: 1,
            ..Config::default()
        };
        let pooled = Config {
            n_threads: 4,
            ..Config::default()
        };

        let res_1 = calculate_sgg_distances(&cdbg, &jobs, &sggs, &solo).unwrap();
        let res_4 = calculate_sgg_distances(&cdbg, &jobs, &sggs, &pooled).unwrap();
        for i in 0..res_1.len() {
            assert_eq!(res_1[i].mean(), res_4[i].mean());
            assert_eq!(res_1[i].count(), res_4[i].count());
            assert_eq!(res_1[i].m2(), res_4[i].m2());
            assert_eq!(res_1[i].min(), res_4[i].min());
            assert_eq!(res_1[i].max(), res_4[i].max());
        }

        let base_1 = GraphDistances::new(&cdbg, &solo).solve(&jobs).unwrap();
        let base_4 = GraphDistances::new(&cdbg, &pooled).solve(&jobs).unwrap();
        for i in 0..base_1.len() {
            assert_eq!(base_1[i].mean(), base_4[i].mean());
        }
    }

    #[test]
    fn test_two_sided_query_on_same_vertex() {
        // A single unitig of length 10 with k = 3: the vertex is at
        // distance zero from itself even though its ports sit 7 apart.
        let dir = tempdir().unwrap();
        let unitigs = write_file(dir.path(), "one.unitigs", "0 ACGTACGTAC\n1 ACG\n");
        let edges = write_file(dir.path(), "one.edges", "0 1 FR 0\n");
        let cdbg = builder::cdbg_from_files(&unitigs, &edges, 3, false).unwrap();

        let queries = queries_of(&[(0, 0)]);
        let jobs = SearchJobs::new(&queries);
        let config = Config::default();
        let res = GraphDistances::new(&cdbg, &config).solve(&jobs).unwrap();
        assert_eq!(res[0].mean(), 0.0);
        assert_eq!(
            cdbg.distance_between(cdbg.left_node(0), cdbg.right_node(0), DIST_MAX),
            7.0
        );
    }
}

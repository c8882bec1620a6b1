use crate::search_jobs::{SearchJob, SearchJobs};
use crate::types::DIST_MAX;
use crate::{Config, Distance, DistanceVector, Error, ErrorKind, Graph};
use log::info;
use rayon::prelude::*;

/// Jobs per synchronization block; block boundaries only pace the progress
/// reporting and never change results.
const BLOCK_SIZE: usize = 10_000;

/**
The parallel distance engine for ordinary graphs and compacted de Bruijn
graphs.

Jobs are solved on a worker pool of the configured size in blocks of
10 000; each job runs one multi-target Dijkstra from its source vertex
and writes the answers back at the queries' original indices. In a
two-sided graph both ports of the source start at distance zero, both
ports of each target are searched for, and a query's distance is the
minimum over the target's two ports.

# Examples

```
use dbgdist::{Config, Graph, GraphDistances, Queries, SearchJobs};

let mut graph = Graph::new(false, false);
graph.resize(3);
graph.add_edge(0, 1, 2.0);
graph.add_edge(1, 2, 3.0);

let mut queries = Queries::default();
queries.add_vertices(0, 2);

let config = Config::default();
let jobs = SearchJobs::new(&queries);
let distances = GraphDistances::new(&graph, &config).solve(&jobs).unwrap();
assert_eq!(distances[0].mean(), 5.0);
```
*/
pub struct GraphDistances<'a> {
    graph: &'a Graph,
    config: &'a Config,
}

impl<'a> GraphDistances<'a> {
    pub fn new(graph: &'a Graph, config: &'a Config) -> GraphDistances<'a> {
        GraphDistances { graph, config }
    }

    /**
    Solves every job and returns per-query distances, `DIST_MAX` for
    queries whose source is absent or whose target is out of reach within
    `max_distance`.
    */
    pub fn solve(&self, search_jobs: &SearchJobs) -> Result<DistanceVector, Error> {
        let mut res = DistanceVector::new(search_jobs.n_queries(), DIST_MAX);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.n_threads)
            .build()
            .map_err(|e| {
                Error::new(ErrorKind::ConstructionFailure, format!("worker pool: {}", e))
            })?;

        let mut block_start = 0;
        while block_start < search_jobs.len() {
            let block_end = (block_start + BLOCK_SIZE).min(search_jobs.len());
            let block_results: Vec<(usize, f64)> = pool.install(|| {
                (block_start..block_end)
                    .into_par_iter()
                    .flat_map_iter(|i| self.solve_job(&search_jobs[i]))
                    .collect()
            });
            for (original_idx, distance) in block_results {
                res[original_idx] = Distance::new(distance);
            }
            info!(
                "calculated distances for jobs {}-{}/{}",
                block_start + 1,
                block_end,
                search_jobs.len()
            );
            block_start = block_end;
        }

        Ok(res)
    }

    fn solve_job(&self, job: &SearchJob) -> Vec<(usize, f64)> {
        let v = job.v();
        let in_graph = if self.graph.two_sided() {
            self.graph.contains(self.graph.left_node(v)) && self.graph.contains(v)
        } else {
            self.graph.contains(v)
        };
        if !in_graph {
            return vec![];
        }

        let sources = self.sources(v);
        let targets = self.targets(job.ws());
        let target_dist = self
            .graph
            .distance(&sources, &targets, self.config.max_distance);

        (0..job.len())
            .map(|w_idx| {
                let distance = if self.graph.two_sided() {
                    // The targets list holds both of w's ports per pair.
                    target_dist[w_idx * 2].min(target_dist[w_idx * 2 + 1])
                } else {
                    target_dist[w_idx]
                };
                (job.original_index(w_idx), distance)
            })
            .collect()
    }

    fn sources(&self, v: usize) -> Vec<(usize, f64)> {
        if self.graph.two_sided() {
            vec![
                (self.graph.left_node(v), 0.0),
                (self.graph.right_node(v), 0.0),
            ]
        } else {
            vec![(v, 0.0)]
        }
    }

    fn targets(&self, ws: &[usize]) -> Vec<usize> {
        let mut targets = vec![];
        for &w in ws {
            if self.graph.two_sided() {
                targets.push(self.graph.left_node(w));
                targets.push(self.graph.right_node(w));
            } else {
                targets.push(w);
            }
        }
        targets
    }
}

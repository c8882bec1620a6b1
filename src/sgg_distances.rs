use crate::graph::builder::{read_line, read_lines};
use crate::search_jobs::{SearchJob, SearchJobs};
use crate::sgg::{build_sgg, SingleGenomeGraph};
use crate::types::{DIST_MAX, NODE_ABSENT};
use crate::{Config, Distance, DistanceVector, Error, ErrorKind, Graph};
use itertools::Itertools;
use log::info;
use nohash::IntMap;
use rayon::prelude::*;

/**
Folds per-genome distances for every query into a single
[Distance](struct.Distance.html) distribution.

Single genome graphs are built from the edge files listed (one per line)
in `sggs_file`, in batches of `n_threads`: each batch is constructed in
parallel, solved one graph at a time with all workers, folded into the
shared aggregate in file order, and released before the next batch starts
so that only one batch of graphs is ever resident. The fixed fold order
keeps the order-dependent `M2` of the aggregates reproducible.

Queries that no genome reached within `max_distance` end up as
`Distance::unreachable()` so they are distinguishable from measured
zeroes.
*/
pub fn calculate_sgg_distances(
    graph: &Graph,
    search_jobs: &SearchJobs,
    sggs_file: &str,
    config: &Config,
) -> Result<DistanceVector, Error> {
    let mut res = DistanceVector::aggregates(search_jobs.n_queries());

    let mut path_edge_files = vec![];
    for line in read_lines(sggs_file)? {
        path_edge_files.push(read_line(line, sggs_file)?);
    }
    if path_edge_files.is_empty() {
        return Err(Error::new(
            ErrorKind::MissingReference,
            format!("{}: no single genome graph edge files listed", sggs_file),
        ));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.n_threads)
        .build()
        .map_err(|e| Error::new(ErrorKind::ConstructionFailure, format!("worker pool: {}", e)))?;

    let n_sggs = path_edge_files.len();
    let batch_size = config.n_threads.max(1);
    for (batch_idx, batch_files) in path_edge_files.chunks(batch_size).enumerate() {
        let sg_graphs: Vec<SingleGenomeGraph> = pool
            .install(|| {
                batch_files
                    .par_iter()
                    .map(|path_edges| build_sgg(graph, path_edges))
                    .collect::<Result<Vec<_>, Error>>()
            })?;

        for sg_graph in &sg_graphs {
            let solver = SingleGenomeGraphDistances::new(sg_graph, config.max_distance);
            let sgg_batch_distances = solver.solve(search_jobs, &pool);
            // Fold the per-worker maps; query indices are disjoint within
            // one graph, so only the graph order matters for M2.
            for distances in sgg_batch_distances {
                for (original_idx, distance) in distances {
                    res[original_idx] += distance;
                }
            }
        }

        info!(
            "calculated single genome graph distances {}-{}/{}",
            batch_idx * batch_size + 1,
            batch_idx * batch_size + sg_graphs.len(),
            n_sggs
        );
        // The batch is dropped here, bounding resident graphs to one batch.
    }

    // Distinguish unreached queries from measured zeroes.
    for distance in res.iter_mut() {
        if distance.count() == 0 {
            *distance = Distance::unreachable();
        }
    }

    Ok(res)
}

/**
The distance engine for a single compressed genome graph.

Sources and targets live in the *original* port id space and are projected
through the graph's node map: a port interior to a compressed path is
represented by the path's two endpoints, offset by its prefix-sum
distances. After the Dijkstra pass on the compressed graph, per-query
distances are reconstructed from the endpoint distances, including the
shortcut where both ports sit on the same path.
*/
pub struct SingleGenomeGraphDistances<'a> {
    graph: &'a SingleGenomeGraph,
    max_distance: f64,
}

impl<'a> SingleGenomeGraphDistances<'a> {
    pub fn new(graph: &'a SingleGenomeGraph, max_distance: f64) -> SingleGenomeGraphDistances<'a> {
        SingleGenomeGraphDistances {
            graph,
            max_distance,
        }
    }

    /**
    Solves every job whose source vertex is present in this genome.
    Returns per-worker maps from original query index to the single-sample
    distance found in this graph; queries at or beyond the cap are absent.
    */
    pub fn solve(
        &self,
        search_jobs: &SearchJobs,
        pool: &rayon::ThreadPool,
    ) -> Vec<IntMap<usize, Distance>> {
        pool.install(|| {
            (0..search_jobs.len())
                .into_par_iter()
                .fold(IntMap::default, |mut acc: IntMap<usize, Distance>, i| {
                    self.solve_job(&search_jobs[i], &mut acc);
                    acc
                })
                .collect()
        })
    }

    fn solve_job(&self, job: &SearchJob, sgg_distances: &mut IntMap<usize, Distance>) {
        let v = job.v();
        if !self.graph.contains_vertex(v) {
            return;
        }

        // Distances between compressed path endpoint nodes first.
        let sources = self.sources(v);
        let targets = self.targets(job.ws());
        let target_dist = self.graph.distance(&sources, &targets, self.max_distance);

        let dist: IntMap<usize, f64> = targets.into_iter().zip(target_dist).collect();

        // Then reconstruct distances for ports that sat inside paths.
        let mut job_dist = vec![self.max_distance; job.len()];
        self.reconcile(&mut job_dist, self.graph.left_port(v), job.ws(), &dist);
        self.reconcile(&mut job_dist, self.graph.right_port(v), job.ws(), &dist);

        for (w_idx, &distance) in job_dist.iter().enumerate() {
            if distance >= self.max_distance {
                continue; // Not a sample: cut off or unreached.
            }
            sgg_distances.insert(job.original_index(w_idx), Distance::new(distance));
        }
    }

    /// Both ports of `v` as compressed-graph sources; interior ports
    /// contribute both path endpoints at their prefix-sum offsets.
    /// Duplicate endpoints keep the minimum offset.
    fn sources(&self, v: usize) -> Vec<(usize, f64)> {
        let mut sources: Vec<(usize, f64)> = vec![];
        for port in self.graph.left_port(v)..=self.graph.right_port(v) {
            if !self.graph.contains_port(port) {
                continue;
            }
            if self.graph.is_on_path(port) {
                let path_idx = self.graph.path_idx(port);
                let mapped_idx = self.graph.mapped_idx(port);
                let (start, to_start) = self.graph.distance_to_start(path_idx, mapped_idx);
                add_source(&mut sources, start, to_start);
                let (end, to_end) = self.graph.distance_to_end(path_idx, mapped_idx);
                add_source(&mut sources, end, to_end);
            } else {
                add_source(&mut sources, self.graph.mapped_idx(port), 0.0);
            }
        }
        sources
    }

    /// The de-duplicated compressed-graph targets covering both ports of
    /// every target vertex.
    fn targets(&self, ws: &[usize]) -> Vec<usize> {
        ws.iter()
            .filter(|&&w| self.graph.contains_vertex(w))
            .flat_map(|&w| {
                (self.graph.left_port(w)..=self.graph.right_port(w)).flat_map(move |port| {
                    if self.graph.is_on_path(port) {
                        let path_idx = self.graph.path_idx(port);
                        vec![
                            self.graph.path_start(path_idx),
                            self.graph.path_end(path_idx),
                        ]
                    } else {
                        vec![self.graph.mapped_idx(port)]
                    }
                })
            })
            .sorted()
            .dedup()
            .collect()
    }

    /// Folds the distances seen from one of `v`'s ports into `job_dist`.
    fn reconcile(
        &self,
        job_dist: &mut [f64],
        v_port: usize,
        ws: &[usize],
        dist: &IntMap<usize, f64>,
    ) {
        let v_path_idx = self.graph.path_idx(v_port);
        let v_mapped_idx = self.graph.mapped_idx(v_port);
        for (w_idx, &w) in ws.iter().enumerate() {
            if !self.graph.contains_vertex(w) {
                continue;
            }
            let left = self.port_distance(v_path_idx, v_mapped_idx, self.graph.left_port(w), dist);
            let right =
                self.port_distance(v_path_idx, v_mapped_idx, self.graph.right_port(w), dist);
            job_dist[w_idx] = job_dist[w_idx].min(left).min(right);
        }
    }

    /// The distance from `v`'s port to one port of `w`, correcting for
    /// ports that sit inside compressed paths.
    fn port_distance(
        &self,
        v_path_idx: usize,
        v_mapped_idx: usize,
        w_port: usize,
        dist: &IntMap<usize, f64>,
    ) -> f64 {
        let w_path_idx = self.graph.path_idx(w_port);
        let w_mapped_idx = self.graph.mapped_idx(w_port);
        if w_path_idx == NODE_ABSENT {
            // Not on a path: the search already answered exactly.
            return self.endpoint_distance(w_mapped_idx, dist);
        }
        // Both on the same path: the intra-path distance can be shorter
        // than anything through the endpoints.
        let mut distance = if v_path_idx == w_path_idx {
            self.graph
                .distance_in_path(w_path_idx, v_mapped_idx, w_mapped_idx)
        } else {
            DIST_MAX
        };
        let (start, to_start) = self.graph.distance_to_start(w_path_idx, w_mapped_idx);
        distance = distance.min(self.endpoint_distance(start, dist) + to_start);
        let (end, to_end) = self.graph.distance_to_end(w_path_idx, w_mapped_idx);
        distance = distance.min(self.endpoint_distance(end, dist) + to_end);
        distance
    }

    fn endpoint_distance(&self, mapped_idx: usize, dist: &IntMap<usize, f64>) -> f64 {
        dist.get(&mapped_idx).copied().unwrap_or(self.max_distance)
    }
}

/// Updates the distance of an already-listed source, or appends a new one.
fn add_source(sources: &mut Vec<(usize, f64)>, mapped_idx: usize, distance: f64) {
    match sources.iter_mut().find(|(idx, _)| *idx == mapped_idx) {
        Some(source) => source.1 = source.1.min(distance),
        None => sources.push((mapped_idx, distance)),
    }
}

use crate::Queries;
use std::collections::BTreeSet;

/// The distance queries assigned to a single source vertex: one Dijkstra
/// run from `v` answers every `(v, ws[i])` pair, and `original_indices[i]`
/// locates the pair in the original query list.
#[derive(Clone, Debug)]
pub struct SearchJob {
    v: usize,
    ws: Vec<usize>,
    original_indices: Vec<usize>,
}

impl SearchJob {
    fn new(v: usize) -> SearchJob {
        SearchJob {
            v,
            ws: vec![],
            original_indices: vec![],
        }
    }

    fn add(&mut self, w: usize, original_index: usize) {
        self.ws.push(w);
        self.original_indices.push(original_index);
    }

    pub fn v(&self) -> usize {
        self.v
    }

    pub fn ws(&self) -> &[usize] {
        &self.ws
    }

    pub fn original_index(&self, idx: usize) -> usize {
        self.original_indices[idx]
    }

    pub fn len(&self) -> usize {
        self.ws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ws.is_empty()
    }
}

/**
A schedule of [SearchJob](struct.SearchJob.html)s covering every query
exactly once.

One Dijkstra run from a source with many targets is much cheaper than one
run per pair, so the scheduler greedily peels the vertex with the most
unresolved queries: that vertex becomes a job source, all of its remaining
pairs become the job's targets, and the residual counts of those targets
drop by one. Ties go to the larger vertex id. Self-queries `(v, v)` stay
in the job of their own vertex.

# Examples

```
use dbgdist::{Queries, SearchJobs};

let mut queries = Queries::default();
queries.add_vertices(0, 2);
queries.add_vertices(1, 2);
queries.add_vertices(3, 2);

// Vertex 2 appears in all three queries, so one job answers everything.
let jobs = SearchJobs::new(&queries);
assert_eq!(jobs.len(), 1);
assert_eq!(jobs[0].v(), 2);
assert_eq!(jobs[0].ws(), &[0, 1, 3]);
```
*/
#[derive(Debug)]
pub struct SearchJobs {
    search_jobs: Vec<SearchJob>,
    n_queries: usize,
}

impl SearchJobs {
    pub fn new(queries: &Queries) -> SearchJobs {
        let sz = queries.largest_v() + 1;

        // Queries by vertex, stored symmetrically, with original indices.
        let mut queries_map: Vec<Vec<(usize, usize)>> = vec![vec![]; sz];
        for idx in 0..queries.len() {
            let (v, w) = (queries.v(idx), queries.w(idx));
            queries_map[v].push((w, idx));
            if v != w {
                queries_map[w].push((v, idx));
            }
        }

        // Residual query counts, and an ordered set for max extraction.
        let mut n_queries: Vec<usize> = vec![0; sz];
        let mut n_queries_set: BTreeSet<(usize, usize)> = BTreeSet::new();
        for (v, pairs) in queries_map.iter().enumerate() {
            if !pairs.is_empty() {
                n_queries[v] = pairs.len();
                n_queries_set.insert((pairs.len(), v));
            }
        }

        let mut search_jobs = vec![];
        let mut processed = vec![false; sz];
        while let Some(&(count, v)) = n_queries_set.iter().next_back() {
            if count == 0 {
                break;
            }
            n_queries_set.remove(&(count, v));
            n_queries[v] = 0;
            processed[v] = true;
            let mut job = SearchJob::new(v);
            for &(w, idx) in queries_map[v].iter() {
                if w == v {
                    job.add(w, idx);
                    continue;
                }
                if processed[w] {
                    continue;
                }
                job.add(w, idx);
                n_queries_set.remove(&(n_queries[w], w));
                n_queries[w] -= 1;
                n_queries_set.insert((n_queries[w], w));
            }
            search_jobs.push(job);
        }

        SearchJobs {
            search_jobs,
            n_queries: queries.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.search_jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.search_jobs.is_empty()
    }

    /// The number of queries the schedule was built from.
    pub fn n_queries(&self) -> usize {
        self.n_queries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchJob> {
        self.search_jobs.iter()
    }
}

impl std::ops::Index<usize> for SearchJobs {
    type Output = SearchJob;

    fn index(&self, idx: usize) -> &SearchJob {
        &self.search_jobs[idx]
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn queries_of(pairs: &[(usize, usize)]) -> Queries {
        let mut queries = Queries::default();
        for &(v, w) in pairs {
            queries.add_vertices(v, w);
        }
        queries
    }

    #[test]
    fn test_every_query_is_covered_exactly_once() {
        let queries = queries_of(&[(0, 1), (1, 2), (2, 3), (1, 3), (0, 0)]);
        let jobs = SearchJobs::new(&queries);
        let mut seen = vec![0usize; queries.len()];
        for job in jobs.iter() {
            for i in 0..job.len() {
                let idx = job.original_index(i);
                let (v, w) = (queries.v(idx), queries.w(idx));
                // The job source is one side, the stored target the other.
                assert!(
                    (job.v() == v && job.ws()[i] == w) || (job.v() == w && job.ws()[i] == v)
                );
                seen[idx] += 1;
            }
        }
        assert_eq!(seen, vec![1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_max_residual_degree_goes_first() {
        let queries = queries_of(&[(5, 0), (5, 1), (5, 2), (0, 1)]);
        let jobs = SearchJobs::new(&queries);
        assert_eq!(jobs[0].v(), 5);
        assert_eq!(jobs[0].len(), 3);
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[1].len(), 1);
    }

    #[test]
    fn test_self_query_stays_with_its_vertex() {
        let queries = queries_of(&[(2, 2)]);
        let jobs = SearchJobs::new(&queries);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].v(), 2);
        assert_eq!(jobs[0].ws(), &[2]);
    }

    #[test]
    fn test_no_queries_no_jobs() {
        let jobs = SearchJobs::new(&Queries::default());
        assert!(jobs.is_empty());
        assert_eq!(jobs.n_queries(), 0);
    }
}

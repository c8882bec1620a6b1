use crate::types::fixed_distance;
use crate::{Config, DistanceVector, Queries};
use log::{info, warn};
use std::collections::HashSet;

/// The final cutoffs of an outlier run, written alongside the outlier rows.
#[derive(Clone, Copy, Debug)]
pub struct OutlierStats {
    pub ld_distance: i64,
    pub outlier_threshold: f64,
    pub extreme_outlier_threshold: f64,
    pub count_threshold: usize,
}

/// The outcome of an outlier run: indices into the query list plus the
/// thresholds that selected them.
#[derive(Clone, Debug)]
pub struct OutlierResults {
    pub indices: Vec<usize>,
    pub stats: OutlierStats,
}

// The evolving threshold state during an outlier run.
struct Parameters {
    ld_distance: f64,
    outlier_threshold: f64,
    extreme_outlier_threshold: f64,
    v_coverage: usize,
    count_threshold: usize,
    max_score: f64,
}

/**
Tukey-style outlier selection over the per-vertex score distribution of a
query list.

A query *qualifies* when its aggregate has at least `count_threshold`
samples and its mean distance survives the linkage disequilibrium cutoff.
Each vertex keeps the maximum score over its qualifying queries; the
distribution of those maxima yields `Q1`/`Q3` quartiles and the
`Q3 + 1.5 (Q3 - Q1)` and `Q3 + 3 (Q3 - Q1)` thresholds. A negative
configured `ld_distance` is selected automatically: the cutoff is bisected
until the nth largest qualifying score falls just below a required
fraction of the overall largest score.

# Examples

```
use dbgdist::{Config, DistanceVector, OutlierTools, Queries};

let mut queries = Queries::default();
for (v, w, score) in [(0, 1, 1.0), (2, 3, 1.0), (4, 4, 10.0)] {
    queries.add_vertices(v, w);
    queries.add_score(score);
}
let distances = DistanceVector::new(3, 100.0);

let config = Config { ld_distance: 0, ..Config::default() };
let ot = OutlierTools::new(&queries, &config);
let results = ot.determine_outliers(&distances).unwrap();
// Q1 == Q3 == 1, so everything at score >= 1 qualifies.
assert_eq!(results.indices, vec![0, 1, 2]);
assert_eq!(results.stats.outlier_threshold, 1.0);
```
*/
pub struct OutlierTools<'a> {
    queries: &'a Queries,
    config: &'a Config,
    largest_score: f64,
    n_vs: usize,
}

impl<'a> OutlierTools<'a> {
    pub fn new(queries: &'a Queries, config: &'a Config) -> OutlierTools<'a> {
        let (largest_score, n_vs) = if queries.extended_format() {
            let mut vs = HashSet::new();
            let mut largest_score: f64 = 0.0;
            for i in 0..queries.len() {
                vs.insert(queries.v(i));
                vs.insert(queries.w(i));
                largest_score = largest_score.max(queries.score(i));
            }
            (largest_score, vs.len())
        } else {
            (0.0, 0)
        };
        OutlierTools {
            queries,
            config,
            largest_score,
            n_vs,
        }
    }

    /// The largest score seen across all queries.
    pub fn largest_score(&self) -> f64 {
        self.largest_score
    }

    /**
    Determines thresholds over `distances` and collects the outliers.
    Returns `None` when the queries carry no scores, since there is
    nothing to rank.
    */
    pub fn determine_outliers(&self, distances: &DistanceVector) -> Option<OutlierResults> {
        if !self.queries.extended_format() {
            warn!("no scores available for the queries; cannot determine outliers");
            return None;
        }

        let count_threshold = if distances.storing_mean_distances() {
            self.config.sgg_count_threshold
        } else {
            0
        };
        let mut params = Parameters {
            ld_distance: self.config.ld_distance as f64,
            outlier_threshold: self.config.outlier_threshold,
            extreme_outlier_threshold: self.config.outlier_threshold,
            v_coverage: 0,
            count_threshold,
            max_score: 0.0,
        };

        if self.config.ld_distance < 0 {
            let largest_distance = self.largest_distance(distances, &params);
            let mut min_distance = self.config.ld_distance_min;
            if largest_distance < min_distance as f64 {
                info!(
                    "query distances stay below the minimum ld distance ({} < {}); ignoring it",
                    largest_distance as i64, min_distance
                );
                min_distance = 0;
            }
            let required_score = self.config.ld_distance_score * self.largest_score;
            self.determine_ld_automatically(
                distances,
                min_distance,
                largest_distance as i64,
                required_score,
                &mut params,
            );
        } else if self.config.outlier_threshold < 0.0 {
            self.calculate_parameters(distances, &mut params);
        }

        let indices = self.collect_outliers(distances, &params);
        Some(OutlierResults {
            indices,
            stats: OutlierStats {
                ld_distance: params.ld_distance as i64,
                outlier_threshold: params.outlier_threshold,
                extreme_outlier_threshold: params.extreme_outlier_threshold,
                count_threshold: params.count_threshold,
            },
        })
    }

    fn largest_distance(&self, distances: &DistanceVector, params: &Parameters) -> f64 {
        let mut largest: f64 = 0.0;
        for d in distances.iter() {
            if d.count() < params.count_threshold {
                continue;
            }
            largest = largest.max(fixed_distance(d.mean(), self.config.max_distance));
        }
        largest
    }

    /// Bisects the ld distance until the nth largest qualifying score
    /// drops below `required_score`.
    fn determine_ld_automatically(
        &self,
        distances: &DistanceVector,
        mut a: i64,
        mut b: i64,
        required_score: f64,
        params: &mut Parameters,
    ) {
        let mut iter = 0;
        while b - a > 1 {
            params.ld_distance = ((a + b) / 2) as f64;
            self.calculate_parameters(distances, params);
            if params.max_score < required_score {
                b = params.ld_distance as i64;
            } else {
                a = params.ld_distance as i64;
            }
            iter += 1;
            info!(
                "ld iteration {}: outlier threshold={}, extreme outlier threshold={}, ld distance={}, coverage={}/{}",
                iter,
                params.outlier_threshold,
                params.extreme_outlier_threshold,
                params.ld_distance as i64,
                params.v_coverage,
                self.n_vs
            );
        }
    }

    fn calculate_parameters(&self, distances: &DistanceVector, params: &mut Parameters) {
        let mut distribution = self.score_distribution(distances, params);
        if distribution.is_empty() {
            params.max_score = 0.0;
            return;
        }

        let distribution_len = distribution.len();
        let q1 = nth_from_start(&mut distribution, distribution_len / 4);
        let q3 = nth_from_start(&mut distribution, 3 * distribution_len / 4);

        params.outlier_threshold = q3 + 1.5 * (q3 - q1);
        params.extreme_outlier_threshold = q3 + 3.0 * (q3 - q1);
        params.v_coverage = distribution.len();
        params.max_score = nth_from_end(&mut distribution, self.config.ld_distance_nth_score);
    }

    /// Maximum scores per vertex over the qualifying queries; vertices
    /// with no qualifying query are left out.
    fn score_distribution(&self, distances: &DistanceVector, params: &Parameters) -> Vec<f64> {
        let mut v_scores = vec![0.0f64; self.queries.largest_v() + 1];
        for i in 0..self.queries.len() {
            if !self.qualifies(distances, i, params) {
                continue;
            }
            let score = self.queries.score(i);
            let (v, w) = (self.queries.v(i), self.queries.w(i));
            v_scores[v] = v_scores[v].max(score);
            v_scores[w] = v_scores[w].max(score);
        }
        v_scores.into_iter().filter(|&score| score > 0.0).collect()
    }

    fn qualifies(&self, distances: &DistanceVector, idx: usize, params: &Parameters) -> bool {
        distances[idx].count() >= params.count_threshold
            && fixed_distance(distances[idx].mean(), self.config.max_distance) >= params.ld_distance
    }

    fn collect_outliers(&self, distances: &DistanceVector, params: &Parameters) -> Vec<usize> {
        (0..self.queries.len())
            .filter(|&i| {
                self.qualifies(distances, i, params)
                    && self.queries.score(i) >= params.outlier_threshold
            })
            .collect()
    }
}

/// Quickselect for the nth smallest element, index clamped into range.
fn nth_from_start(values: &mut [f64], idx: usize) -> f64 {
    let idx = idx.min(values.len() - 1);
    let (_, nth, _) = values.select_nth_unstable_by(idx, f64::total_cmp);
    *nth
}

/// Quickselect for the nth largest element, index clamped into range.
fn nth_from_end(values: &mut [f64], idx: usize) -> f64 {
    let idx = idx.min(values.len() - 1);
    let (_, nth, _) = values.select_nth_unstable_by(idx, |a, b| f64::total_cmp(b, a));
    *nth
}

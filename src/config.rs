use crate::types::DIST_MAX;

/**
Run-wide settings, threaded explicitly through the builders and engines.

Every engine is constructed with a reference to a `Config`; there is no
process-wide state. The defaults match a conservative single-threaded run
with no distance cap.

# Examples

```
use dbgdist::Config;

let config = Config {
    n_threads: 8,
    max_distance: 100_000.0,
    ..Config::default()
};
assert_eq!(config.sgg_count_threshold, 10);
```
*/
#[derive(Clone, Debug)]
pub struct Config {
    /// Worker thread count for the distance engines; also the single genome
    /// graph batch size.
    pub n_threads: usize,
    /// Hard cap on search distances. Distances at or beyond the cap are
    /// reported as unreachable.
    pub max_distance: f64,
    /// Cap on the number of queries read from a queries file.
    pub n_queries: Option<usize>,
    /// Force a queries file format instead of auto-detecting it.
    pub queries_format: Option<crate::QueriesFormat>,
    /// Standalone outlier run: queries carry precomputed distances, and a
    /// 5-column queries file resolves to the `v w distance score count`
    /// format.
    pub outlier_tools_mode: bool,
    /// Ignore aggregated distances backed by fewer single genome graph
    /// samples than this when determining outliers.
    pub sgg_count_threshold: usize,
    /// Linkage disequilibrium distance; negative selects it automatically
    /// by bisection.
    pub ld_distance: i64,
    /// Lower bisection bound for the automatic ld distance.
    pub ld_distance_min: i64,
    /// Fraction of the largest score that the nth largest qualifying score
    /// must stay above during the bisection.
    pub ld_distance_score: f64,
    /// Which nth largest score the bisection tracks.
    pub ld_distance_nth_score: usize,
    /// Fixed outlier threshold; negative derives the thresholds from the
    /// score distribution.
    pub outlier_threshold: f64,
    /// Queries files use one-based ids.
    pub queries_one_based: bool,
    /// Graph input files use one-based ids.
    pub graphs_one_based: bool,
    /// Output rows use one-based ids.
    pub output_one_based: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            n_threads: 1,
            max_distance: DIST_MAX,
            n_queries: None,
            queries_format: None,
            outlier_tools_mode: false,
            sgg_count_threshold: 10,
            ld_distance: -1,
            ld_distance_min: 1000,
            ld_distance_score: 0.8,
            ld_distance_nth_score: 10,
            outlier_threshold: -1.0,
            queries_one_based: false,
            graphs_one_based: false,
            output_one_based: false,
        }
    }
}

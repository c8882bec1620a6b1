use crate::outliers::OutlierStats;
use crate::types::fixed_distance;
use crate::{Config, DistanceVector, Queries};
use std::fs::File;
use std::io::{BufWriter, Write};

/**
Writes one result row per query: `v w d [flag] [score] [count] m2 min max`.

`d` is the mean distance folded through
[fixed_distance](types/fn.fixed_distance.html) and truncated to an
integer, so capped distances show as `-1`. Flag and score columns are
echoed from the input when its format carried them; the count column is
written only for vectors of per-genome aggregates. With
`config.output_one_based` the vertex ids are shifted up by one.
*/
pub fn write_results(
    out_file: &str,
    queries: &Queries,
    distances: &DistanceVector,
    config: &Config,
) -> Result<(), std::io::Error> {
    let indices: Vec<usize> = (0..queries.len()).collect();
    write_results_for_indices(out_file, queries, distances, &indices, config)
}

/// Like [write_results](fn.write_results.html), but only for the selected
/// query indices (used for outlier rows).
pub fn write_results_for_indices(
    out_file: &str,
    queries: &Queries,
    distances: &DistanceVector,
    indices: &[usize],
    config: &Config,
) -> Result<(), std::io::Error> {
    let mut writer = BufWriter::new(File::create(out_file)?);

    let write_flag = queries.format().map_or(false, |f| f.has_flag());
    let write_score = queries.format().map_or(false, |f| f.has_score());
    let write_counts = distances.storing_mean_distances();
    let shift = config.output_one_based as usize;

    for &idx in indices {
        let d = &distances[idx];
        write!(
            writer,
            "{} {} {}",
            queries.v(idx) + shift,
            queries.w(idx) + shift,
            fixed_distance(d.mean(), config.max_distance) as i64
        )?;
        if write_flag {
            write!(writer, " {}", queries.flag(idx) as i64)?;
        }
        if write_score {
            write!(writer, " {}", queries.score(idx))?;
        }
        if write_counts {
            write!(writer, " {}", d.count())?;
        }
        writeln!(writer, " {} {} {}", d.m2(), d.min(), d.max())?;
    }
    writer.flush()
}

/// Writes the single-line outlier statistics file:
/// `ld_distance outlier_threshold extreme_outlier_threshold count_threshold`.
pub fn write_outlier_stats(out_file: &str, stats: &OutlierStats) -> Result<(), std::io::Error> {
    let mut writer = BufWriter::new(File::create(out_file)?);
    writeln!(
        writer,
        "{} {} {} {}",
        stats.ld_distance,
        stats.outlier_threshold,
        stats.extreme_outlier_threshold,
        stats.count_threshold
    )?;
    writer.flush()
}

use crate::DistanceVector;

/**
The recognized queries file layouts, in increasing field count.

A queries row always starts with the vertex pair `v w`; the tail can carry
a precomputed distance, a flag, a score, and a per-graph sample count.
Five-column files are ambiguous: they resolve to
`PairsDistanceScoreCount` in standalone outlier-tools mode and to
`PairsDistanceFlagScore` otherwise.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueriesFormat {
    /// `v w`
    Pairs,
    /// `v w score`
    PairsScore,
    /// `v w distance score`
    PairsDistanceScore,
    /// `v w distance flag score`
    PairsDistanceFlagScore,
    /// `v w distance score count`
    PairsDistanceScoreCount,
    /// `v w distance flag score count`
    PairsDistanceFlagScoreCount,
}

impl QueriesFormat {
    /// Resolves a field count to a format, or `None` if no format matches.
    pub fn deduce(n_fields: usize, outlier_tools_mode: bool) -> Option<QueriesFormat> {
        match n_fields {
            2 => Some(QueriesFormat::Pairs),
            3 => Some(QueriesFormat::PairsScore),
            4 => Some(QueriesFormat::PairsDistanceScore),
            5 if outlier_tools_mode => Some(QueriesFormat::PairsDistanceScoreCount),
            5 => Some(QueriesFormat::PairsDistanceFlagScore),
            6 => Some(QueriesFormat::PairsDistanceFlagScoreCount),
            _ => None,
        }
    }

    pub fn n_fields(&self) -> usize {
        match self {
            QueriesFormat::Pairs => 2,
            QueriesFormat::PairsScore => 3,
            QueriesFormat::PairsDistanceScore => 4,
            QueriesFormat::PairsDistanceFlagScore => 5,
            QueriesFormat::PairsDistanceScoreCount => 5,
            QueriesFormat::PairsDistanceFlagScoreCount => 6,
        }
    }

    pub fn has_flag(&self) -> bool {
        matches!(
            self,
            QueriesFormat::PairsDistanceFlagScore | QueriesFormat::PairsDistanceFlagScoreCount
        )
    }

    pub fn has_score(&self) -> bool {
        !matches!(self, QueriesFormat::Pairs)
    }

    pub fn has_count(&self) -> bool {
        matches!(
            self,
            QueriesFormat::PairsDistanceScoreCount | QueriesFormat::PairsDistanceFlagScoreCount
        )
    }

    /// The column holding the flag, when the format has one.
    pub(crate) fn flag_field(&self) -> Option<usize> {
        if self.has_flag() {
            Some(3)
        } else {
            None
        }
    }

    /// The column holding the score, when the format has one.
    pub(crate) fn score_field(&self) -> Option<usize> {
        match self {
            QueriesFormat::Pairs => None,
            QueriesFormat::PairsScore => Some(2),
            QueriesFormat::PairsDistanceScore => Some(3),
            QueriesFormat::PairsDistanceFlagScore => Some(4),
            QueriesFormat::PairsDistanceScoreCount => Some(3),
            QueriesFormat::PairsDistanceFlagScoreCount => Some(4),
        }
    }

    /// The column holding the sample count, when the format has one.
    pub(crate) fn count_field(&self) -> Option<usize> {
        match self {
            QueriesFormat::PairsDistanceScoreCount => Some(4),
            QueriesFormat::PairsDistanceFlagScoreCount => Some(5),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            QueriesFormat::Pairs => "v w",
            QueriesFormat::PairsScore => "v w score",
            QueriesFormat::PairsDistanceScore => "v w distance score",
            QueriesFormat::PairsDistanceFlagScore => "v w distance flag score",
            QueriesFormat::PairsDistanceScoreCount => "v w distance score count",
            QueriesFormat::PairsDistanceFlagScoreCount => "v w distance flag score count",
        }
    }
}

/**
A list of distance queries, read from input or built programmatically.

Not every field is available for every format: flags and scores exist only
when the input carried them, and the embedded
[DistanceVector](struct.DistanceVector.html) is populated only for
standalone outlier runs where the distances were computed earlier.
*/
#[derive(Debug, Default)]
pub struct Queries {
    pairs: Vec<(usize, usize)>,
    flags: Vec<bool>,
    scores: Vec<f64>,
    distances: DistanceVector,
    largest_v: usize,
    format: Option<QueriesFormat>,
}

impl Queries {
    pub fn new(format: QueriesFormat) -> Queries {
        Queries {
            format: Some(format),
            ..Queries::default()
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The largest vertex id across all pairs.
    pub fn largest_v(&self) -> usize {
        self.largest_v
    }

    pub fn format(&self) -> Option<QueriesFormat> {
        self.format
    }

    pub fn v(&self, idx: usize) -> usize {
        self.pairs[idx].0
    }

    pub fn w(&self, idx: usize) -> usize {
        self.pairs[idx].1
    }

    pub fn flag(&self, idx: usize) -> bool {
        self.flags[idx]
    }

    pub fn score(&self, idx: usize) -> f64 {
        self.scores[idx]
    }

    /// Whether scores were available in the input.
    pub fn extended_format(&self) -> bool {
        !self.scores.is_empty()
    }

    /// Distances carried by the queries file itself (standalone outlier
    /// runs only).
    pub fn distances(&self) -> &DistanceVector {
        &self.distances
    }

    pub fn distances_mut(&mut self) -> &mut DistanceVector {
        &mut self.distances
    }

    pub fn add_vertices(&mut self, v: usize, w: usize) {
        self.pairs.push((v, w));
        self.largest_v = self.largest_v.max(v).max(w);
    }

    pub fn add_flag(&mut self, flag: bool) {
        self.flags.push(flag);
    }

    pub fn add_score(&mut self, score: f64) {
        self.scores.push(score);
    }

    pub fn add_distance(&mut self, distance: f64, count: usize) {
        self.distances.push(crate::Distance::with_count(distance, count));
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_deduce_unambiguous_formats() {
        assert_eq!(QueriesFormat::deduce(2, false), Some(QueriesFormat::Pairs));
        assert_eq!(QueriesFormat::deduce(3, false), Some(QueriesFormat::PairsScore));
        assert_eq!(
            QueriesFormat::deduce(4, true),
            Some(QueriesFormat::PairsDistanceScore)
        );
        assert_eq!(
            QueriesFormat::deduce(6, false),
            Some(QueriesFormat::PairsDistanceFlagScoreCount)
        );
        assert_eq!(QueriesFormat::deduce(1, false), None);
        assert_eq!(QueriesFormat::deduce(7, true), None);
    }

    #[test]
    fn test_deduce_five_columns_depends_on_mode() {
        assert_eq!(
            QueriesFormat::deduce(5, true),
            Some(QueriesFormat::PairsDistanceScoreCount)
        );
        assert_eq!(
            QueriesFormat::deduce(5, false),
            Some(QueriesFormat::PairsDistanceFlagScore)
        );
    }

    #[test]
    fn test_largest_v_tracks_both_sides() {
        let mut queries = Queries::default();
        queries.add_vertices(3, 9);
        queries.add_vertices(12, 4);
        assert_eq!(queries.largest_v(), 12);
        assert_eq!(queries.len(), 2);
    }
}

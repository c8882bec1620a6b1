use crate::types::DIST_MAX;
use std::ops::{Add, AddAssign, Index, IndexMut};

/**
A running summary of a distance distribution: `(mean, count, M2, min, max)`.

A `Distance` is either a single sample (`count == 1`), an empty aggregate
(`count == 0`), or the fold of several per-graph results for one query.
Merging consumes the right-hand side as a *single sample* with value
`rhs.mean()` plus its carried summary; this matches how per-graph mean
distances are folded into the overall distribution for a query, and it is
why the Welford `M2` update is asymmetric. Fold order must therefore be
fixed for reproducible `M2` values.

# Examples

```
use assert_approx_eq::assert_approx_eq;
use dbgdist::Distance;

let mut d = Distance::default();
d += Distance::new(3.0);
d += Distance::new(5.0);
d += Distance::new(7.0);
assert_approx_eq!(d.mean(), 5.0);
assert_eq!(d.count(), 3);
assert_eq!(d.min(), 3.0);
assert_eq!(d.max(), 7.0);
```
*/
#[derive(Clone, Copy, Debug)]
pub struct Distance {
    mean: f64,
    count: usize,
    m2: f64,
    min: f64,
    max: f64,
}

impl Distance {
    /// A single sample. A sample of exactly `0.0` is excluded from `min`.
    pub fn new(distance: f64) -> Distance {
        Distance::with_count(distance, 1)
    }

    pub fn with_count(distance: f64, count: usize) -> Distance {
        Distance {
            mean: distance,
            count,
            m2: 0.0,
            min: if distance != 0.0 { distance } else { DIST_MAX },
            max: distance,
        }
    }

    /// The aggregate written for queries no single genome graph reached.
    pub fn unreachable() -> Distance {
        Distance::with_count(DIST_MAX, 0)
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn m2(&self) -> f64 {
        if self.count == 0 {
            -1.0
        } else {
            self.m2
        }
    }

    pub fn min(&self) -> f64 {
        if self.count == 0 {
            -1.0
        } else {
            self.min
        }
    }

    pub fn max(&self) -> f64 {
        if self.count == 0 {
            -1.0
        } else {
            self.max
        }
    }
}

impl Default for Distance {
    fn default() -> Distance {
        Distance::with_count(0.0, 0)
    }
}

impl Add for Distance {
    type Output = Distance;

    fn add(self, other: Distance) -> Distance {
        let new_count = self.count + other.count;
        let new_mean = (self.mean * self.count as f64 + other.mean * other.count as f64)
            / new_count as f64;
        Distance {
            mean: new_mean,
            count: new_count,
            m2: self.m2 + (other.mean - self.mean) * (other.mean - new_mean),
            min: self.min.min(other.mean).min(other.min),
            max: self.max.max(other.mean).max(other.max),
        }
    }
}

impl AddAssign for Distance {
    fn add_assign(&mut self, other: Distance) {
        *self = *self + other;
    }
}

/**
A vector of per-query [Distance](struct.Distance.html) aggregates, aligned
with the query list.

The `mean_distances` flag records whether entries are folds of per-graph
mean distances; it controls whether sample counts are written in output
rows and whether the single genome graph count threshold applies during
outlier selection.
*/
#[derive(Clone, Debug, Default)]
pub struct DistanceVector {
    distances: Vec<Distance>,
    mean_distances: bool,
}

impl DistanceVector {
    /// `n` single-sample entries, each of value `distance`.
    pub fn new(n: usize, distance: f64) -> DistanceVector {
        DistanceVector {
            distances: vec![Distance::new(distance); n],
            mean_distances: false,
        }
    }

    /// `n` empty aggregates, flagged as storing mean distances.
    pub fn aggregates(n: usize) -> DistanceVector {
        DistanceVector {
            distances: vec![Distance::default(); n],
            mean_distances: true,
        }
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn push(&mut self, distance: Distance) {
        self.distances.push(distance);
    }

    pub fn storing_mean_distances(&self) -> bool {
        self.mean_distances
    }

    pub fn set_mean_distances(&mut self, value: bool) {
        self.mean_distances = value;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Distance> {
        self.distances.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Distance> {
        self.distances.iter_mut()
    }

    /// The plain mean distance of every entry.
    pub fn means(&self) -> Vec<f64> {
        self.distances.iter().map(Distance::mean).collect()
    }

    /// The sample count of every entry.
    pub fn counts(&self) -> Vec<usize> {
        self.distances.iter().map(Distance::count).collect()
    }
}

impl Index<usize> for DistanceVector {
    type Output = Distance;

    fn index(&self, idx: usize) -> &Distance {
        &self.distances[idx]
    }
}

impl IndexMut<usize> for DistanceVector {
    fn index_mut(&mut self, idx: usize) -> &mut Distance {
        &mut self.distances[idx]
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_single_sample() {
        let d = Distance::new(4.5);
        assert_eq!(d.mean(), 4.5);
        assert_eq!(d.count(), 1);
        assert_eq!(d.m2(), 0.0);
        assert_eq!(d.min(), 4.5);
        assert_eq!(d.max(), 4.5);
    }

    #[test]
    fn test_zero_sample_does_not_set_min() {
        let mut d = Distance::new(0.0);
        assert_eq!(d.max(), 0.0);
        d += Distance::new(6.0);
        assert_eq!(d.min(), 6.0);
    }

    #[test]
    fn test_empty_aggregate_reports_sentinels() {
        let d = Distance::default();
        assert_eq!(d.count(), 0);
        assert_eq!(d.m2(), -1.0);
        assert_eq!(d.min(), -1.0);
        assert_eq!(d.max(), -1.0);
    }

    #[test]
    fn test_merge_into_empty_is_identity() {
        let d = Distance::default() + Distance::new(5.0);
        assert_eq!(d.mean(), 5.0);
        assert_eq!(d.count(), 1);
        assert_eq!(d.m2(), 0.0);
    }

    #[test]
    fn test_welford_m2() {
        let mut d = Distance::default();
        for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            d += Distance::new(x);
        }
        assert_approx_eq!(d.mean(), 5.0);
        // Sum of squared deviations from the mean.
        assert_approx_eq!(d.m2(), 32.0);
    }

    #[test]
    fn test_mean_and_count_are_order_independent() {
        let mut a = Distance::default();
        let mut b = Distance::default();
        let xs = [3.0, 1.0, 8.0, 2.0];
        for &x in xs.iter() {
            a += Distance::new(x);
        }
        for &x in xs.iter().rev() {
            b += Distance::new(x);
        }
        assert_approx_eq!(a.mean(), b.mean());
        assert_eq!(a.count(), b.count());
        assert_eq!(a.min(), b.min());
        assert_eq!(a.max(), b.max());
    }
}

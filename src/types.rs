/// Sentinel for "no node": node ids are dense indices, so `usize::MAX` is
/// never a valid id.
pub const NODE_ABSENT: usize = usize::MAX;

/// Sentinel for "unreachable" or "cut off" distances.
///
/// Deliberately `f64::MAX` rather than `f64::INFINITY` so the value
/// survives integer casts when results are formatted.
pub const DIST_MAX: f64 = f64::MAX;

/**
Maps distances at or beyond `max_distance` to `-1.0` and passes all other
distances through unchanged.

Output rows and outlier filtering both use this to fold "cut off" into a
single representable value.

# Examples

```
use dbgdist::types::{fixed_distance, DIST_MAX};
assert_eq!(fixed_distance(7.0, DIST_MAX), 7.0);
assert_eq!(fixed_distance(DIST_MAX, DIST_MAX), -1.0);
assert_eq!(fixed_distance(5000.0, 5000.0), -1.0);
```
*/
pub fn fixed_distance(distance: f64, max_distance: f64) -> f64 {
    if distance >= max_distance {
        -1.0
    } else {
        distance
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_fixed_distance_passes_small_values() {
        assert_eq!(fixed_distance(0.0, DIST_MAX), 0.0);
        assert_eq!(fixed_distance(123.5, DIST_MAX), 123.5);
    }

    #[test]
    fn test_fixed_distance_caps() {
        assert_eq!(fixed_distance(5000.0, 5000.0), -1.0);
        assert_eq!(fixed_distance(5001.0, 5000.0), -1.0);
        assert_eq!(fixed_distance(4999.9, 5000.0), 4999.9);
    }
}

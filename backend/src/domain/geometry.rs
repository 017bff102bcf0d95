//! Route geometry helpers: Douglas–Peucker simplification and segmentation.

use geo::{LineString, SimplifyIdx};

use super::Coordinate;

/// Reduce `path` with Douglas–Peucker at `tolerance` degrees.
///
/// The result is a subsequence of `path` that keeps the first and last points.
/// Paths of two points or fewer, and non-positive or non-finite tolerances,
/// return the input unchanged.
///
/// # Examples
/// ```
/// use fuelroute::domain::{Coordinate, simplify_path};
///
/// let path: Vec<Coordinate> = (0..5)
///     .map(|i| Coordinate::new(f64::from(i), f64::from(i)))
///     .collect::<Result<_, _>>()?;
/// let simplified = simplify_path(&path, 0.001);
/// assert_eq!(simplified, vec![path[0], path[4]]);
/// # Ok::<(), fuelroute::domain::CoordinateError>(())
/// ```
pub fn simplify_path(path: &[Coordinate], tolerance: f64) -> Vec<Coordinate> {
    if path.len() <= 2 || !tolerance.is_finite() || tolerance <= 0.0 {
        return path.to_vec();
    }

    let line: LineString<f64> = path.iter().map(|point| point.to_geo()).collect();
    let kept: Vec<Coordinate> = line
        .simplify_idx(tolerance)
        .into_iter()
        .filter_map(|idx| path.get(idx).copied())
        .collect();

    // Douglas–Peucker keeps both ends; fall back rather than return a
    // degenerate path if the index list is ever short.
    if kept.len() < 2 {
        return path.to_vec();
    }
    kept
}

/// Split `path` into consecutive chunks of at most `points_per_segment` points.
///
/// Consecutive chunks share their boundary point. Values below two are
/// treated as two. A single point yields one single-point segment and an
/// empty path yields no segments.
///
/// # Examples
/// ```
/// use fuelroute::domain::{Coordinate, segment_path};
///
/// let path: Vec<Coordinate> = (0..5)
///     .map(|i| Coordinate::new(f64::from(i), 0.0))
///     .collect::<Result<_, _>>()?;
/// let segments = segment_path(&path, 3);
/// assert_eq!(segments, vec![path[0..3].to_vec(), path[2..5].to_vec()]);
/// # Ok::<(), fuelroute::domain::CoordinateError>(())
/// ```
pub fn segment_path(path: &[Coordinate], points_per_segment: usize) -> Vec<Vec<Coordinate>> {
    let size = points_per_segment.max(2);
    match path.len() {
        0 => Vec::new(),
        1 => vec![path.to_vec()],
        len => {
            let mut segments = Vec::with_capacity(len.div_ceil(size - 1));
            let mut start = 0;
            while start < len - 1 {
                let end = (start + size).min(len);
                segments.push(path[start..end].to_vec());
                start = end - 1;
            }
            segments
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn points(pairs: &[(f64, f64)]) -> Vec<Coordinate> {
        pairs
            .iter()
            .map(|&(lat, lon)| Coordinate::new(lat, lon).expect("valid coordinate"))
            .collect()
    }

    fn line(len: usize) -> Vec<Coordinate> {
        (0..len)
            .map(|i| Coordinate::new(0.0, i as f64 * 0.01).expect("valid coordinate"))
            .collect()
    }

    #[test]
    fn collinear_points_collapse_to_endpoints() {
        let path = points(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (4.0, 4.0)]);
        let simplified = simplify_path(&path, 0.001);
        assert_eq!(simplified, vec![path[0], path[4]]);
    }

    #[rstest]
    #[case(0.001)]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(f64::NAN)]
    fn two_point_paths_are_unchanged(#[case] tolerance: f64) {
        let path = points(&[(40.0, -74.0), (40.1, -74.1)]);
        assert_eq!(simplify_path(&path, tolerance), path);
    }

    #[test]
    fn invalid_tolerance_returns_input() {
        let path = points(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        assert_eq!(simplify_path(&path, f64::INFINITY), path);
    }

    #[test]
    fn keeps_significant_corners() {
        let path = points(&[(0.0, 0.0), (0.0, 1.0), (0.0, 2.0), (1.0, 2.0), (2.0, 2.0)]);
        let simplified = simplify_path(&path, 0.001);
        assert_eq!(simplified, vec![path[0], path[2], path[4]]);
    }

    #[test]
    fn simplified_path_is_a_subsequence() {
        let path = points(&[(0.0, 0.0), (0.3, 0.5), (0.1, 1.0), (0.9, 1.4), (1.0, 2.0)]);
        let simplified = simplify_path(&path, 0.2);
        let mut remaining = path.iter();
        for kept in &simplified {
            assert!(remaining.any(|p| p == kept), "{kept} out of order");
        }
    }

    #[rstest]
    #[case(0, 10, 0)]
    #[case(1, 10, 1)]
    #[case(2, 10, 1)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(19, 10, 2)]
    #[case(20, 10, 3)]
    #[case(5, 2, 4)]
    fn segment_counts(#[case] len: usize, #[case] size: usize, #[case] expected: usize) {
        assert_eq!(segment_path(&line(len), size).len(), expected);
    }

    #[test]
    fn segments_share_boundary_points() {
        let path = line(12);
        let segments = segment_path(&path, 5);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].last(), pair[1].first());
        }
        assert_eq!(segments.first().and_then(|s| s.first()), path.first());
        assert_eq!(segments.last().and_then(|s| s.last()), path.last());
        assert!(segments.iter().all(|s| s.len() <= 5));
    }

    #[test]
    fn tiny_segment_sizes_are_clamped() {
        let path = line(3);
        assert_eq!(segment_path(&path, 0), segment_path(&path, 2));
    }
}

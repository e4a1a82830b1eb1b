//! Planar geometry helpers for loop polygons.
//!
//! All polygons are ordered boundaries treated as closed: the last point
//! connects back to the first.

use nalgebra::Point2;
use rand::Rng;
use tracing::warn;

/// A normalized 2-D position, `[0, 1] x [0, 1]` relative to the frame.
pub type Point = Point2<f32>;

/// Rejection sampling gives up after this many draws and returns the centroid.
pub const MAX_SAMPLE_ATTEMPTS: usize = 1000;

/// Euclidean distance between two points.
#[inline]
pub fn distance(p1: &Point, p2: &Point) -> f32 {
    nalgebra::distance(p1, p2)
}

/// Absolute shoelace area of a closed polygon. Zero for fewer than 3 points.
pub fn polygon_area(points: &[Point]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice_area: f32 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(p, next)| p.x * next.y - p.y * next.x)
        .sum();
    (twice_area / 2.0).abs()
}

/// Arithmetic mean of the polygon's vertices.
///
/// Returns `None` for an empty slice.
pub fn polygon_center(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f32;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

/// Ray-casting containment test: counts crossings of a horizontal ray
/// running from `point` towards +x.
pub fn point_in_polygon(point: &Point, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (&polygon[i], &polygon[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Axis-aligned bounding box as `(min, max)` corners.
pub fn bounding_box(points: &[Point]) -> Option<(Point, Point)> {
    let first = points.first()?;
    let init = (*first, *first);
    Some(points.iter().fold(init, |(lo, hi), p| {
        (
            Point::new(lo.x.min(p.x), lo.y.min(p.y)),
            Point::new(hi.x.max(p.x), hi.y.max(p.y)),
        )
    }))
}

/// Uniform random point inside `polygon`, by rejection sampling within its
/// bounding box.
///
/// Degenerate polygons that never accept a sample fall back to the centroid
/// after [`MAX_SAMPLE_ATTEMPTS`] draws. Returns `None` for an empty polygon.
pub fn random_point_in_polygon<R: Rng>(polygon: &[Point], rng: &mut R) -> Option<Point> {
    let (lo, hi) = bounding_box(polygon)?;
    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let sample = Point::new(rng.gen_range(lo.x..=hi.x), rng.gen_range(lo.y..=hi.y));
        if point_in_polygon(&sample, polygon) {
            return Some(sample);
        }
    }
    warn!(
        vertices = polygon.len(),
        area = polygon_area(polygon),
        "rejection sampling exhausted, using polygon centroid"
    );
    polygon_center(polygon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn unit_square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((distance(&a, &b) - 5.0).abs() < 1e-6);
        assert_eq!(distance(&a, &a), 0.0);
    }

    #[test]
    fn test_polygon_area() {
        assert!((polygon_area(&unit_square()) - 1.0).abs() < 1e-6);

        // Orientation does not matter.
        let mut reversed = unit_square();
        reversed.reverse();
        assert!((polygon_area(&reversed) - 1.0).abs() < 1e-6);

        let triangle = [
            Point::new(0.0, 0.0),
            Point::new(0.2, 0.0),
            Point::new(0.0, 0.1),
        ];
        assert!((polygon_area(&triangle) - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_polygon_area_degenerate() {
        assert_eq!(polygon_area(&[]), 0.0);
        assert_eq!(
            polygon_area(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]),
            0.0
        );
        let collinear = [
            Point::new(0.0, 0.0),
            Point::new(0.5, 0.5),
            Point::new(1.0, 1.0),
        ];
        assert!(polygon_area(&collinear).abs() < 1e-6);
    }

    #[test]
    fn test_polygon_center() {
        let center = polygon_center(&unit_square()).unwrap();
        assert!((center.x - 0.5).abs() < 1e-6);
        assert!((center.y - 0.5).abs() < 1e-6);
        assert!(polygon_center(&[]).is_none());
    }

    #[test]
    fn test_point_in_polygon() {
        let square = unit_square();
        assert!(point_in_polygon(&Point::new(0.5, 0.5), &square));
        assert!(point_in_polygon(&Point::new(0.01, 0.99), &square));
        assert!(!point_in_polygon(&Point::new(1.5, 0.5), &square));
        assert!(!point_in_polygon(&Point::new(-0.1, 0.5), &square));
        assert!(!point_in_polygon(&Point::new(0.5, 2.0), &square));
    }

    #[test]
    fn test_point_in_concave_polygon() {
        // U shape opening upwards.
        let u = [
            Point::new(0.0, 0.0),
            Point::new(0.3, 0.0),
            Point::new(0.3, 0.7),
            Point::new(0.7, 0.7),
            Point::new(0.7, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        assert!(point_in_polygon(&Point::new(0.1, 0.5), &u));
        assert!(point_in_polygon(&Point::new(0.5, 0.9), &u));
        assert!(!point_in_polygon(&Point::new(0.5, 0.3), &u));
    }

    #[test]
    fn test_bounding_box() {
        let tri = [
            Point::new(0.2, 0.4),
            Point::new(0.6, 0.1),
            Point::new(0.3, 0.9),
        ];
        let (lo, hi) = bounding_box(&tri).unwrap();
        assert_eq!((lo.x, lo.y), (0.2, 0.1));
        assert_eq!((hi.x, hi.y), (0.6, 0.9));
        assert!(bounding_box(&[]).is_none());
    }

    #[test]
    fn test_random_point_in_convex_polygon() {
        let mut rng = StdRng::seed_from_u64(7);
        let hexagon: Vec<Point> = (0..6)
            .map(|i| {
                let a = i as f32 * std::f32::consts::PI / 3.0;
                Point::new(0.5 + 0.2 * a.cos(), 0.5 + 0.2 * a.sin())
            })
            .collect();
        for _ in 0..200 {
            let p = random_point_in_polygon(&hexagon, &mut rng).unwrap();
            assert!(point_in_polygon(&p, &hexagon));
        }
    }

    #[test]
    fn test_random_point_degenerate_falls_back_to_center() {
        let mut rng = StdRng::seed_from_u64(1);
        let line = [
            Point::new(0.1, 0.3),
            Point::new(0.5, 0.3),
            Point::new(0.3, 0.3),
        ];
        let p = random_point_in_polygon(&line, &mut rng).unwrap();
        assert!((p.x - 0.3).abs() < 1e-6);
        assert!((p.y - 0.3).abs() < 1e-6);

        assert!(random_point_in_polygon(&[], &mut rng).is_none());
    }
}

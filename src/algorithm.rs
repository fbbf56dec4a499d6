//! Shortest distances between points and lines.
//!
//! All functions in here are pure functions over slices of points. They
//! measure with the [`Ruler`] given to them and therefore return their
//! results in the ruler’s unit.
//!
//! The functions that look at more than one candidate stop as soon as they
//! find a distance of exactly zero since nothing can be closer.

use kurbo::Vec2;
use crate::ruler::Ruler;
use crate::world::Point;


//------------ Segment Intersection ------------------------------------------

/// Returns whether the segments _a–b_ and _c–d_ properly cross each other.
///
/// Parallel segments never intersect, even if they are collinear and
/// overlap. Neither do segments that merely touch, i.e., share an end point
/// or have an end point on the other segment.
pub fn segments_intersect(a: Point, b: Point, c: Point, d: Point) -> bool {
    if vector(a, b).cross(vector(c, d)) == 0. {
        return false
    }
    two_sided(a, b, c, d) && two_sided(c, d, a, b)
}

/// Returns whether _p1_ and _p2_ lie strictly on different sides of _q1–q2_.
fn two_sided(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    let base = vector(q1, q2);
    let ret1 = vector(q1, p1).cross(base);
    let ret2 = vector(q1, p2).cross(base);
    (ret1 > 0. && ret2 < 0.) || (ret1 < 0. && ret2 > 0.)
}

fn vector(from: Point, to: Point) -> Vec2 {
    kurbo::Point::from(to) - kurbo::Point::from(from)
}


//------------ Points and Lines ----------------------------------------------

/// Returns the shortest distance between a point and a line.
///
/// An empty line is infinitely far away.
pub fn point_to_line(point: Point, line: &[Point], ruler: &Ruler) -> f64 {
    match ruler.point_on_line(line, point) {
        Some(nearest) => ruler.distance(point, nearest.point),
        None => f64::INFINITY,
    }
}

/// Returns the shortest distance between a point and a set of lines.
pub fn point_to_lines(
    point: Point, lines: &[Vec<Point>], ruler: &Ruler
) -> f64 {
    shortest(lines.iter().map(|line| point_to_line(point, line, ruler)))
}

/// Returns the shortest distance between a point and a set of points.
pub fn point_to_points(
    point: Point, points: &[Point], ruler: &Ruler
) -> f64 {
    shortest(points.iter().map(|other| ruler.distance(point, *other)))
}

/// Returns the shortest distance between two lines.
///
/// If any segment of `left` crosses any segment of `right`, the distance
/// is zero. Otherwise, for each pair of segments _p1–p2_ of `left` and
/// _q1–q2_ of `right`, the distances of _p1_ and _p2_ to _q1–q2_ and of
/// _q1_ to _p1–p2_ are considered. The distance of _q2_ to _p1–p2_ is not,
/// so a pair whose closest approach is at _q2_ can be overestimated.
///
/// Lines with less than two points have no segments and the distance is
/// infinite.
pub fn line_to_line(left: &[Point], right: &[Point], ruler: &Ruler) -> f64 {
    let mut res = f64::INFINITY;
    for p in left.windows(2) {
        for q in right.windows(2) {
            if segments_intersect(p[0], p[1], q[0], q[1]) {
                return 0.
            }
            res = res
                .min(point_to_line(p[0], q, ruler))
                .min(point_to_line(p[1], q, ruler))
                .min(point_to_line(q[0], p, ruler));
        }
    }
    res
}

/// Returns the minimum of the distances, stopping at the first zero.
///
/// Returns infinity if there are no distances at all.
pub(crate) fn shortest(distances: impl IntoIterator<Item = f64>) -> f64 {
    let mut res = f64::INFINITY;
    for dist in distances {
        if dist == 0. {
            return 0.
        }
        res = res.min(dist);
    }
    res
}


//============ Testing =======================================================

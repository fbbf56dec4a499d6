//! Distances between feature geometries and reference geometries.

use crate::algorithm::{
    line_to_line, point_to_line, point_to_lines, point_to_points, shortest
};
use crate::geometry::{Geometry, ReferenceGeometry};
use crate::ruler::{Ruler, Unit};
use crate::world::Point;

/// The distance returned for feature geometries that aren’t supported.
pub const UNSUPPORTED_GEOMETRY: f64 = -1.0;

/// Returns the shortest distance between a geometry and a reference.
///
/// The distance is measured in `unit` with a [`Ruler`] created at the
/// latitude of the point or of the first point of the line. Each point of
/// a multi-point and each line of a multi-line string gets its own ruler.
///
/// Only points, lines, and their multi variants are supported. For all
/// other geometries, [`UNSUPPORTED_GEOMETRY`] is returned. Empty multi
/// geometries and lines are infinitely far away.
pub fn distance_to_geometry(
    geometry: &Geometry, reference: &ReferenceGeometry, unit: Unit
) -> f64 {
    match *geometry {
        Geometry::Point(point) => point_distance(point, reference, unit),
        Geometry::MultiPoint(ref points) => {
            shortest(points.iter().map(|point| {
                point_distance(*point, reference, unit)
            }))
        }
        Geometry::LineString(ref line) => {
            line_distance(line, reference, unit)
        }
        Geometry::MultiLineString(ref lines) => {
            shortest(lines.iter().map(|line| {
                line_distance(line, reference, unit)
            }))
        }
        Geometry::Polygon(_)
        | Geometry::MultiPolygon(_)
        | Geometry::GeometryCollection(_) => UNSUPPORTED_GEOMETRY,
    }
}

fn point_distance(
    point: Point, reference: &ReferenceGeometry, unit: Unit
) -> f64 {
    let ruler = Ruler::new(point.lat, unit);
    match *reference {
        ReferenceGeometry::Point(other) => ruler.distance(point, other),
        ReferenceGeometry::MultiPoint(ref points) => {
            point_to_points(point, points, &ruler)
        }
        ReferenceGeometry::LineString(ref line) => {
            point_to_line(point, line, &ruler)
        }
        ReferenceGeometry::MultiLineString(ref lines) => {
            point_to_lines(point, lines, &ruler)
        }
    }
}

fn line_distance(
    line: &[Point], reference: &ReferenceGeometry, unit: Unit
) -> f64 {
    let first = match line.first() {
        Some(first) => first,
        None => return f64::INFINITY,
    };
    let ruler = Ruler::new(first.lat, unit);
    match *reference {
        ReferenceGeometry::Point(point) => {
            point_to_line(point, line, &ruler)
        }
        ReferenceGeometry::MultiPoint(ref points) => {
            shortest(points.iter().map(|point| {
                point_to_line(*point, line, &ruler)
            }))
        }
        ReferenceGeometry::LineString(ref other) => {
            line_to_line(line, other, &ruler)
        }
        ReferenceGeometry::MultiLineString(ref others) => {
            shortest(others.iter().map(|other| {
                line_to_line(line, other, &ruler)
            }))
        }
    }
}


//============ Testing =======================================================

//! Geometries.
//!
//! There are two geometry types. [`Geometry`] can hold any of the kinds of
//! geometry a GeoJSON document or a decoded tile feature can describe. It
//! is used for the geometry of features. [`ReferenceGeometry`] is
//! restricted to the kinds distances can be measured against and is used
//! for the geometry embedded in an expression.

use std::fmt;
use crate::world::Point;


//------------ Geometry ------------------------------------------------------

/// A geometry of any kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Point),
    MultiPoint(Vec<Point>),
    LineString(Vec<Point>),
    MultiLineString(Vec<Vec<Point>>),

    /// A polygon given by its rings, the first being the outer ring.
    Polygon(Vec<Vec<Point>>),
    MultiPolygon(Vec<Vec<Vec<Point>>>),
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match *self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Geometry::GeometryCollection(_) => {
                GeometryKind::GeometryCollection
            }
        }
    }
}


//------------ GeometryKind --------------------------------------------------

/// The kind of a geometry.
///
/// The `Display` impl and [`from_name`][Self::from_name] use the type
/// names of GeoJSON.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Point" => Some(GeometryKind::Point),
            "MultiPoint" => Some(GeometryKind::MultiPoint),
            "LineString" => Some(GeometryKind::LineString),
            "MultiLineString" => Some(GeometryKind::MultiLineString),
            "Polygon" => Some(GeometryKind::Polygon),
            "MultiPolygon" => Some(GeometryKind::MultiPolygon),
            "GeometryCollection" => Some(GeometryKind::GeometryCollection),
            _ => None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::LineString => "LineString",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::GeometryCollection => "GeometryCollection",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


//------------ ReferenceGeometry ---------------------------------------------

/// A geometry distances can be measured against.
///
/// Values can only be created from a [`Geometry`] via `TryFrom`, which
/// refuses polygons, collections, and empty geometries. A line string
/// needs at least one point, a multi-line string at least one line with
/// a point.
#[derive(Clone, Debug, PartialEq)]
pub enum ReferenceGeometry {
    Point(Point),
    MultiPoint(Vec<Point>),
    LineString(Vec<Point>),
    MultiLineString(Vec<Vec<Point>>),
}

impl ReferenceGeometry {
    pub fn kind(&self) -> GeometryKind {
        match *self {
            ReferenceGeometry::Point(_) => GeometryKind::Point,
            ReferenceGeometry::MultiPoint(_) => GeometryKind::MultiPoint,
            ReferenceGeometry::LineString(_) => GeometryKind::LineString,
            ReferenceGeometry::MultiLineString(_) => {
                GeometryKind::MultiLineString
            }
        }
    }
}

impl TryFrom<Geometry> for ReferenceGeometry {
    type Error = Geometry;

    fn try_from(src: Geometry) -> Result<Self, Self::Error> {
        match src {
            Geometry::Point(point) => Ok(ReferenceGeometry::Point(point)),
            Geometry::MultiPoint(points) if !points.is_empty() => {
                Ok(ReferenceGeometry::MultiPoint(points))
            }
            Geometry::LineString(line) if !line.is_empty() => {
                Ok(ReferenceGeometry::LineString(line))
            }
            Geometry::MultiLineString(lines)
                if lines.iter().any(|line| !line.is_empty())
            => {
                Ok(ReferenceGeometry::MultiLineString(lines))
            }
            other => Err(other)
        }
    }
}

impl From<ReferenceGeometry> for Geometry {
    fn from(src: ReferenceGeometry) -> Self {
        match src {
            ReferenceGeometry::Point(point) => Geometry::Point(point),
            ReferenceGeometry::MultiPoint(points) => {
                Geometry::MultiPoint(points)
            }
            ReferenceGeometry::LineString(line) => Geometry::LineString(line),
            ReferenceGeometry::MultiLineString(lines) => {
                Geometry::MultiLineString(lines)
            }
        }
    }
}


//============ Testing =======================================================

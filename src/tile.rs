//! Features decoded from vector tiles.
//!
//! A decoded tile feature keeps its geometry in tile-local integer
//! co-ordinates and only knows its rough kind – point, line, or polygon –
//! via a [`FeatureType`]. Whether it is a single or multi geometry only
//! becomes apparent when the geometry is converted into world co-ordinates
//! via [`convert_geometry`].
//!
//! An application can either use the [`TileFeature`] type or implement the
//! [`GeometryTileFeature`] trait for its own feature type.

use crate::geometry::Geometry;
use crate::world::{Point, TileId};


//------------ FeatureType ---------------------------------------------------

/// The type tag of a tile feature.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeatureType {
    #[default]
    Unknown,
    Point,
    LineString,
    Polygon,
}


//------------ TilePoint -----------------------------------------------------

/// A point in tile-local co-ordinates.
///
/// The tile covers the range from 0 to [`EXTENT`][crate::world::EXTENT]
/// in both directions with the y axis pointing south. Values outside that
/// range are used for features reaching into the tile’s buffer.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TilePoint {
    pub x: i16,
    pub y: i16,
}

impl TilePoint {
    pub fn new(x: i16, y: i16) -> Self {
        TilePoint { x, y }
    }
}


//------------ GeometryTileFeature -------------------------------------------

/// A feature decoded from a tile.
pub trait GeometryTileFeature {
    /// Returns the type tag of the feature.
    fn feature_type(&self) -> FeatureType;

    /// Returns the geometry of the feature.
    ///
    /// The geometry is a sequence of rings. For point features, all points
    /// of all rings are the points of the feature. For line features, each
    /// ring is a line. For polygon features, the rings are the outer and
    /// inner rings of the polygons, distinguished by their winding order.
    fn geometries(&self) -> &[Vec<TilePoint>];
}


//------------ TileFeature ---------------------------------------------------

/// A simple decoded tile feature.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TileFeature {
    feature_type: FeatureType,
    geometries: Vec<Vec<TilePoint>>,
}

impl TileFeature {
    pub fn new(
        feature_type: FeatureType, geometries: Vec<Vec<TilePoint>>
    ) -> Self {
        TileFeature { feature_type, geometries }
    }

    /// Creates a point feature with one point per given co-ordinate pair.
    pub fn points(points: impl IntoIterator<Item = (i16, i16)>) -> Self {
        Self::new(
            FeatureType::Point,
            vec![points.into_iter().map(|(x, y)| TilePoint::new(x, y)).collect()]
        )
    }

    /// Creates a line feature with a single line.
    pub fn line(points: impl IntoIterator<Item = (i16, i16)>) -> Self {
        Self::new(
            FeatureType::LineString,
            vec![points.into_iter().map(|(x, y)| TilePoint::new(x, y)).collect()]
        )
    }
}

impl GeometryTileFeature for TileFeature {
    fn feature_type(&self) -> FeatureType {
        self.feature_type
    }

    fn geometries(&self) -> &[Vec<TilePoint>] {
        &self.geometries
    }
}


//------------ convert_geometry ----------------------------------------------

/// Converts the geometry of a tile feature into world co-ordinates.
///
/// A point feature becomes a point if it has exactly one point and a
/// multi-point otherwise. A line feature becomes a line string if it has
/// exactly one line and a multi-line string otherwise. The rings of a
/// polygon feature are grouped into polygons by their winding order
/// resulting in a polygon or a multi-polygon.
///
/// Returns `None` for features of unknown type.
pub fn convert_geometry(
    feature: &(impl GeometryTileFeature + ?Sized), tile: TileId
) -> Option<Geometry> {
    let project_ring = |ring: &[TilePoint]| -> Vec<Point> {
        ring.iter().map(|point| tile.project(*point)).collect()
    };
    let rings = feature.geometries();

    match feature.feature_type() {
        FeatureType::Unknown => None,
        FeatureType::Point => {
            let mut points: Vec<_> = rings.iter().flat_map(|ring| {
                ring.iter().map(|point| tile.project(*point))
            }).collect();
            if points.len() == 1 {
                points.pop().map(Geometry::Point)
            }
            else {
                Some(Geometry::MultiPoint(points))
            }
        }
        FeatureType::LineString => {
            let mut lines: Vec<_> = rings.iter().map(|ring| {
                project_ring(ring.as_slice())
            }).collect();
            if lines.len() == 1 {
                lines.pop().map(Geometry::LineString)
            }
            else {
                Some(Geometry::MultiLineString(lines))
            }
        }
        FeatureType::Polygon => {
            let mut polygons: Vec<Vec<_>> = classify_rings(rings)
                .into_iter()
                .map(|polygon| {
                    polygon.into_iter().map(|ring| project_ring(ring)).collect()
                }).collect();
            if polygons.len() == 1 {
                polygons.pop().map(Geometry::Polygon)
            }
            else {
                Some(Geometry::MultiPolygon(polygons))
            }
        }
    }
}

/// Groups the rings of a polygon feature into polygons.
///
/// The winding order of the first ring with a non-zero area determines
/// which order marks outer rings. Each outer ring starts a new polygon and
/// all following inner rings are added to it. Degenerate rings without
/// area are dropped.
fn classify_rings(rings: &[Vec<TilePoint>]) -> Vec<Vec<&[TilePoint]>> {
    let mut polygons = Vec::new();
    let mut polygon: Vec<&[TilePoint]> = Vec::new();
    let mut ccw = None;

    for ring in rings {
        let area = signed_area(ring);
        if area == 0 {
            continue
        }
        let is_ccw = area < 0;
        let outer = *ccw.get_or_insert(is_ccw);
        if outer == is_ccw && !polygon.is_empty() {
            polygons.push(std::mem::take(&mut polygon));
        }
        polygon.push(ring.as_slice());
    }
    if !polygon.is_empty() {
        polygons.push(polygon);
    }
    polygons
}

/// Returns twice the signed area of a ring.
fn signed_area(ring: &[TilePoint]) -> i64 {
    let len = ring.len();
    if len < 3 {
        return 0
    }
    (0..len).map(|i| {
        let p1 = ring[i];
        let p2 = ring[(i + len - 1) % len];
        (i64::from(p2.x) - i64::from(p1.x))
            * (i64::from(p1.y) + i64::from(p2.y))
    }).sum()
}


//============ Testing =======================================================

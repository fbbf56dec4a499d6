//! GeoJSON documents.
//!
//! This module converts between the generic value tree of
//! [`serde_json::Value`] and geographic documents. Only the parts of
//! GeoJSON that carry meaning for features are kept: geometries, feature
//! properties, and feature identifiers. Foreign members and bounding boxes
//! are dropped and altitudes are ignored.

use std::{error, fmt};
use std::str::FromStr;
use serde_json::{json, Map, Number, Value};
use crate::geometry::{Geometry, GeometryKind};
use crate::world::Point;


//------------ GeoJson -------------------------------------------------------

/// A GeoJSON document.
#[derive(Clone, Debug, PartialEq)]
pub enum GeoJson {
    Geometry(Geometry),
    Feature(Feature),
    FeatureCollection(Vec<Feature>),
}

impl GeoJson {
    /// Converts a value tree into a GeoJSON document.
    pub fn from_value(value: &Value) -> Result<Self, ConversionError> {
        let object = as_object(value, "GeoJSON")?;
        match type_member(object)? {
            "Feature" => Feature::from_object(object).map(GeoJson::Feature),
            "FeatureCollection" => {
                let features = object.get("features").ok_or_else(|| {
                    ConversionError::new(
                        "FeatureCollection must have a features member"
                    )
                })?;
                sequence(features, Feature::from_value)
                    .map(GeoJson::FeatureCollection)
            }
            kind => {
                geometry_from_object(kind, object).map(GeoJson::Geometry)
            }
        }
    }

    /// Converts the document into a value tree.
    pub fn to_value(&self) -> Value {
        match *self {
            GeoJson::Geometry(ref geometry) => geometry_to_value(geometry),
            GeoJson::Feature(ref feature) => feature.to_value(),
            GeoJson::FeatureCollection(ref features) => {
                json!({
                    "type": "FeatureCollection",
                    "features": features.iter().map(Feature::to_value)
                        .collect::<Vec<_>>(),
                })
            }
        }
    }
}

impl FromStr for GeoJson {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s).map_err(|err| {
            ConversionError::new(format!("invalid JSON: {}", err))
        })?;
        Self::from_value(&value)
    }
}


//------------ Feature -------------------------------------------------------

/// A GeoJSON feature.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Feature {
    /// The geometry of the feature.
    ///
    /// This is `None` if the feature’s geometry member was null.
    pub geometry: Option<Geometry>,

    /// The properties of the feature.
    pub properties: Map<String, Value>,

    /// The optional identifier of the feature.
    pub id: Option<FeatureId>,
}

impl Feature {
    /// Creates a new feature with only a geometry.
    pub fn new(geometry: Geometry) -> Self {
        Feature {
            geometry: Some(geometry),
            .. Default::default()
        }
    }

    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        let object = as_object(value, "feature")?;
        match type_member(object)? {
            "Feature" => Self::from_object(object),
            kind => {
                Err(ConversionError::new(format!(
                    "expected Feature, found {}", kind
                )))
            }
        }
    }

    fn from_object(object: &Map<String, Value>) -> Result<Self, ConversionError> {
        let geometry = match object.get("geometry") {
            Some(Value::Null) => None,
            Some(value) => Some(geometry_from_value(value)?),
            None => {
                return Err(ConversionError::new(
                    "Feature must have a geometry member"
                ))
            }
        };
        let properties = match object.get("properties") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(properties)) => properties.clone(),
            Some(_) => {
                return Err(ConversionError::new(
                    "Feature properties must be an object"
                ))
            }
        };
        let id = match object.get("id") {
            None | Some(Value::Null) => None,
            Some(Value::String(id)) => Some(FeatureId::String(id.clone())),
            Some(Value::Number(id)) => Some(FeatureId::Number(id.clone())),
            Some(_) => {
                return Err(ConversionError::new(
                    "Feature id must be a string or a number"
                ))
            }
        };
        Ok(Feature { geometry, properties, id })
    }

    fn to_value(&self) -> Value {
        let mut res = Map::new();
        res.insert("type".into(), "Feature".into());
        res.insert(
            "geometry".into(),
            self.geometry.as_ref().map(geometry_to_value)
                .unwrap_or(Value::Null)
        );
        res.insert(
            "properties".into(), Value::Object(self.properties.clone())
        );
        match self.id {
            Some(FeatureId::String(ref id)) => {
                res.insert("id".into(), id.clone().into());
            }
            Some(FeatureId::Number(ref id)) => {
                res.insert("id".into(), Value::Number(id.clone()));
            }
            None => { }
        }
        Value::Object(res)
    }
}


//------------ FeatureId -----------------------------------------------------

/// The identifier of a feature.
#[derive(Clone, Debug, PartialEq)]
pub enum FeatureId {
    String(String),
    Number(Number),
}


//------------ Geometries ----------------------------------------------------

fn geometry_from_value(value: &Value) -> Result<Geometry, ConversionError> {
    let object = as_object(value, "geometry")?;
    geometry_from_object(type_member(object)?, object)
}

fn geometry_from_object(
    kind: &str, object: &Map<String, Value>
) -> Result<Geometry, ConversionError> {
    let kind = GeometryKind::from_name(kind).ok_or_else(|| {
        ConversionError::new(format!("unknown GeoJSON type '{}'", kind))
    })?;
    if kind == GeometryKind::GeometryCollection {
        let geometries = object.get("geometries").ok_or_else(|| {
            ConversionError::new(
                "GeometryCollection must have a geometries member"
            )
        })?;
        return sequence(geometries, geometry_from_value)
            .map(Geometry::GeometryCollection)
    }

    let coords = object.get("coordinates").ok_or_else(|| {
        ConversionError::new(format!(
            "{} geometry must have a coordinates member", kind
        ))
    })?;
    match kind {
        GeometryKind::Point => position(coords).map(Geometry::Point),
        GeometryKind::MultiPoint => {
            sequence(coords, position).map(Geometry::MultiPoint)
        }
        GeometryKind::LineString => {
            sequence(coords, position).map(Geometry::LineString)
        }
        GeometryKind::MultiLineString => {
            sequence(coords, |line| sequence(line, position))
                .map(Geometry::MultiLineString)
        }
        GeometryKind::Polygon => {
            sequence(coords, |ring| sequence(ring, position))
                .map(Geometry::Polygon)
        }
        GeometryKind::MultiPolygon => {
            sequence(coords, |polygon| {
                sequence(polygon, |ring| sequence(ring, position))
            }).map(Geometry::MultiPolygon)
        }
        GeometryKind::GeometryCollection => unreachable!(),
    }
}

fn geometry_to_value(geometry: &Geometry) -> Value {
    let coordinates = match *geometry {
        Geometry::Point(point) => position_value(point),
        Geometry::MultiPoint(ref points) => line_value(points),
        Geometry::LineString(ref line) => line_value(line),
        Geometry::MultiLineString(ref lines) => lines_value(lines),
        Geometry::Polygon(ref rings) => lines_value(rings),
        Geometry::MultiPolygon(ref polygons) => {
            Value::Array(
                polygons.iter().map(|rings| lines_value(rings)).collect()
            )
        }
        Geometry::GeometryCollection(ref geometries) => {
            return json!({
                "type": "GeometryCollection",
                "geometries": geometries.iter().map(geometry_to_value)
                    .collect::<Vec<_>>(),
            })
        }
    };
    json!({
        "type": geometry.kind().as_str(),
        "coordinates": coordinates,
    })
}

fn position(value: &Value) -> Result<Point, ConversionError> {
    let coords = value.as_array().ok_or_else(|| {
        ConversionError::new("coordinates must be an array")
    })?;
    if coords.len() < 2 {
        return Err(ConversionError::new(
            "coordinates array must have at least 2 numbers"
        ))
    }
    let number = |value: &Value| {
        value.as_f64().ok_or_else(|| {
            ConversionError::new("coordinates must be numbers")
        })
    };
    Ok(Point::new(number(&coords[0])?, number(&coords[1])?))
}

fn position_value(point: Point) -> Value {
    json!([point.lon, point.lat])
}

fn line_value(line: &[Point]) -> Value {
    Value::Array(line.iter().copied().map(position_value).collect())
}

fn lines_value(lines: &[Vec<Point>]) -> Value {
    Value::Array(lines.iter().map(|line| line_value(line)).collect())
}


//------------ Helpers -------------------------------------------------------

fn as_object<'a>(
    value: &'a Value, what: &str
) -> Result<&'a Map<String, Value>, ConversionError> {
    value.as_object().ok_or_else(|| {
        ConversionError::new(format!("{} must be an object", what))
    })
}

fn type_member(object: &Map<String, Value>) -> Result<&str, ConversionError> {
    match object.get("type") {
        Some(Value::String(kind)) => Ok(kind.as_str()),
        Some(_) => Err(ConversionError::new("GeoJSON type must be a string")),
        None => Err(ConversionError::new("GeoJSON must have a type member")),
    }
}

fn sequence<T>(
    value: &Value,
    item: impl Fn(&Value) -> Result<T, ConversionError>,
) -> Result<Vec<T>, ConversionError> {
    match value.as_array() {
        Some(items) => items.iter().map(item).collect(),
        None => Err(ConversionError::new("expected an array")),
    }
}


//------------ ConversionError -----------------------------------------------

/// A value could not be converted into a GeoJSON document.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConversionError {
    message: String,
}

impl ConversionError {
    fn new(message: impl Into<String>) -> Self {
        ConversionError { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl error::Error for ConversionError { }


//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    fn round_trip(value: Value) -> GeoJson {
        let parsed = GeoJson::from_value(&value).unwrap();
        assert_eq!(GeoJson::from_value(&parsed.to_value()), Ok(parsed.clone()));
        parsed
    }

    #[test]
    fn point() {
        assert_eq!(
            round_trip(json!({
                "type": "Point", "coordinates": [13.4, 52.5, 34.0]
            })),
            GeoJson::Geometry(Geometry::Point(Point::new(13.4, 52.5)))
        );
    }

    #[test]
    fn geometries() {
        let line = json!([[0, 0], [1, 1]]);
        assert!(matches!(
            round_trip(json!({"type": "MultiPoint", "coordinates": line})),
            GeoJson::Geometry(Geometry::MultiPoint(points))
                if points.len() == 2
        ));
        assert!(matches!(
            round_trip(json!({"type": "LineString", "coordinates": line})),
            GeoJson::Geometry(Geometry::LineString(_))
        ));
        assert!(matches!(
            round_trip(json!({
                "type": "MultiLineString", "coordinates": [line, line]
            })),
            GeoJson::Geometry(Geometry::MultiLineString(lines))
                if lines.len() == 2
        ));
        assert!(matches!(
            round_trip(json!({
                "type": "Polygon",
                "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]
            })),
            GeoJson::Geometry(Geometry::Polygon(_))
        ));
        assert!(matches!(
            round_trip(json!({
                "type": "MultiPolygon",
                "coordinates": [[[[0, 0], [1, 0], [1, 1], [0, 0]]]]
            })),
            GeoJson::Geometry(Geometry::MultiPolygon(_))
        ));
        assert!(matches!(
            round_trip(json!({
                "type": "GeometryCollection",
                "geometries": [
                    {"type": "Point", "coordinates": [0, 0]},
                    {"type": "LineString", "coordinates": line},
                ]
            })),
            GeoJson::Geometry(Geometry::GeometryCollection(geoms))
                if geoms.len() == 2
        ));
    }

    #[test]
    fn feature() {
        let parsed = round_trip(json!({
            "type": "Feature",
            "id": 12,
            "properties": { "name": "Spree", "lanes": [1, 2] },
            "geometry": {
                "type": "LineString", "coordinates": [[13.3, 52.5], [13.4, 52.6]]
            }
        }));
        let feature = match parsed {
            GeoJson::Feature(feature) => feature,
            _ => panic!("not a feature"),
        };
        assert_eq!(feature.id, Some(FeatureId::Number(12.into())));
        assert_eq!(feature.properties["name"], json!("Spree"));
        assert!(matches!(feature.geometry, Some(Geometry::LineString(_))));
    }

    #[test]
    fn feature_without_geometry() {
        assert_eq!(
            round_trip(json!({
                "type": "Feature", "id": "a", "geometry": null
            })),
            GeoJson::Feature(Feature {
                geometry: None,
                properties: Map::new(),
                id: Some(FeatureId::String("a".into())),
            })
        );
        assert!(GeoJson::from_value(&json!({"type": "Feature"})).is_err());
    }

    #[test]
    fn feature_collection() {
        let parsed = round_trip(json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature", "properties": {},
                    "geometry": {"type": "Point", "coordinates": [1, 2]}
                },
                {
                    "type": "Feature", "properties": null,
                    "geometry": {"type": "Point", "coordinates": [3, 4]}
                }
            ]
        }));
        assert!(matches!(
            parsed, GeoJson::FeatureCollection(features)
                if features.len() == 2
        ));
    }

    #[test]
    fn from_str() {
        assert_eq!(
            GeoJson::from_str(r#"{"type": "Point", "coordinates": [1, 2]}"#),
            Ok(GeoJson::Geometry(Geometry::Point(Point::new(1., 2.))))
        );
        assert!(GeoJson::from_str("{").is_err());
    }

    #[test]
    fn errors() {
        fn message(value: Value) -> String {
            GeoJson::from_value(&value).unwrap_err().to_string()
        }

        assert_eq!(message(json!([1, 2])), "GeoJSON must be an object");
        assert_eq!(message(json!({})), "GeoJSON must have a type member");
        assert_eq!(
            message(json!({"type": "Circle"})), "unknown GeoJSON type 'Circle'"
        );
        assert_eq!(
            message(json!({"type": "Point"})),
            "Point geometry must have a coordinates member"
        );
        assert_eq!(
            message(json!({"type": "Point", "coordinates": [1]})),
            "coordinates array must have at least 2 numbers"
        );
        assert_eq!(
            message(json!({"type": "Point", "coordinates": ["a", 1]})),
            "coordinates must be numbers"
        );
        assert_eq!(
            message(json!({
                "type": "FeatureCollection",
                "features": [{"type": "Point", "coordinates": [0, 0]}]
            })),
            "expected Feature, found Point"
        );
    }
}

//! The distance expression.

use log::{debug, error, trace};
use serde_json::{Map, Value};
use crate::distance::distance_to_geometry;
use crate::geojson::GeoJson;
use crate::geometry::ReferenceGeometry;
use crate::ruler::Unit;
use crate::tile::{convert_geometry, FeatureType};
use super::eval::{EvalError, EvaluationContext, Expression};
use super::parse::{reference_geometry, Arguments, Failed, ParseErrors};


//------------ Distance ------------------------------------------------------

/// An expression measuring the distance of a feature to a fixed geometry.
///
/// The expression is written as `["distance", <geojson>]` or
/// `["distance", <geojson>, <unit>]`. The geometry to measure against is
/// taken from the GeoJSON document when the expression is parsed. When
/// evaluated, the expression returns the shortest distance between the
/// feature’s geometry and that geometry in the given unit.
///
/// A value is never changed after parsing, so the same expression can be
/// evaluated from many threads at once.
#[derive(Clone, Debug, PartialEq)]
pub struct Distance {
    /// The GeoJSON document as given in the expression.
    source: GeoJson,

    /// The geometry taken from `source`.
    geometry: ReferenceGeometry,

    /// The unit of the result.
    unit: Unit,
}

impl Distance {
    pub const OPERATOR: &'static str = "distance";

    pub fn new(
        source: GeoJson, geometry: ReferenceGeometry, unit: Unit
    ) -> Self {
        Distance { source, geometry, unit }
    }

    /// Parses the expression from its value form.
    ///
    /// On failure, the reasons are added to `err`.
    pub fn parse(value: &Value, err: &mut ParseErrors) -> Result<Self, Failed> {
        let args = Arguments::parse(value, err).map_err(|failed| {
            debug!("failed to parse distance expression arguments");
            failed
        })?;
        let geometry = reference_geometry(&args.source, err)?;
        Ok(Self::new(args.source, geometry, args.unit))
    }

    /// Parses the expression from its value form, collecting all errors.
    pub fn from_value(value: &Value) -> Result<Self, ParseErrors> {
        let mut err = ParseErrors::default();
        Self::parse(value, &mut err).map_err(|_| err)
    }

    pub fn source(&self) -> &GeoJson {
        &self.source
    }

    pub fn geometry(&self) -> &ReferenceGeometry {
        &self.geometry
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Evaluates the expression.
    ///
    /// The context must provide both a feature and a tile. Only point and
    /// line features are supported. Since the feature type doesn’t
    /// distinguish single and multi geometries, the latter are covered,
    /// too.
    pub fn evaluate(
        &self, context: &EvaluationContext
    ) -> Result<f64, EvalError> {
        let (feature, canonical) = match (
            context.feature(), context.canonical()
        ) {
            (Some(feature), Some(canonical)) => (feature, canonical),
            _ => {
                return Err(EvalError::new(
                    "distance expression requires valid feature and \
                     canonical information."
                ))
            }
        };
        let geometry = match feature.feature_type() {
            FeatureType::Point | FeatureType::LineString => {
                convert_geometry(feature, canonical)
            }
            other => {
                trace!("distance expression for {:?} feature", other);
                None
            }
        };
        match geometry {
            Some(geometry) => {
                Ok(distance_to_geometry(&geometry, &self.geometry, self.unit))
            }
            None => {
                Err(EvalError::new(
                    "distance expression currently only supports features \
                     with Point or LineString geometry."
                ))
            }
        }
    }

    /// Converts the expression back into its value form.
    ///
    /// The unit is not included, so a parsed expression with a unit other
    /// than meters comes back in meters.
    pub fn serialize(&self) -> Value {
        let document = match self.source.to_value() {
            Value::Object(object) => Value::Object(object),
            _ => {
                error!(
                    "Failed to serialize 'distance' expression, converted \
                     GeoJSON is not an object"
                );
                Value::Object(Map::new())
            }
        };
        Value::Array(vec![Self::OPERATOR.into(), document])
    }

    pub fn possible_outputs(&self) -> Vec<Option<Value>> {
        vec![None]
    }
}

impl Expression for Distance {
    type Output = f64;

    fn operator(&self) -> &'static str {
        Self::OPERATOR
    }

    fn evaluate(
        &self, context: &EvaluationContext
    ) -> Result<Self::Output, EvalError> {
        Distance::evaluate(self, context)
    }

    fn serialize(&self) -> Value {
        Distance::serialize(self)
    }

    fn possible_outputs(&self) -> Vec<Option<Value>> {
        Distance::possible_outputs(self)
    }
}


//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;
    use crate::tile::{TileFeature, TilePoint};
    use crate::world::{Point, TileId, EXTENT};

    const HALF: i16 = (EXTENT / 2) as i16;

    fn line_expression(unit: &str) -> Value {
        json!([
            "distance",
            {
                "type": "Feature",
                "properties": { "name": "meridian" },
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[0, -10], [0, 10]]
                }
            },
            unit
        ])
    }

    fn world() -> TileId {
        TileId::new(0, 0, 0).unwrap()
    }

    #[test]
    fn parse_keeps_source_and_unit() {
        let expr = Distance::from_value(&line_expression("Miles")).unwrap();
        assert_eq!(expr.unit(), Unit::Miles);
        assert_eq!(
            expr.geometry(),
            &ReferenceGeometry::LineString(
                vec![Point::new(0., -10.), Point::new(0., 10.)]
            )
        );
        assert!(matches!(expr.source(), GeoJson::Feature(_)));
    }

    #[test]
    fn parse_failure_collects_errors() {
        let err = Distance::from_value(&json!(["distance"])).unwrap_err();
        assert!(!err.is_empty());
    }

    #[test]
    fn evaluate_point_on_line() {
        let expr = Distance::from_value(&line_expression("Meters")).unwrap();
        let feature = TileFeature::points([(HALF, HALF)]);
        let context = EvaluationContext::new()
            .with_feature(&feature)
            .with_canonical(world());
        let dist = expr.evaluate(&context).unwrap();
        assert!(dist.abs() < 1e-6, "{}", dist);
    }

    #[test]
    fn evaluate_multi_point_feature() {
        let expr = Distance::from_value(&line_expression("Meters")).unwrap();
        let single = TileFeature::points([(HALF + 100, HALF)]);
        let multi = TileFeature::points([(HALF + 800, HALF), (HALF + 100, HALF)]);
        let context = EvaluationContext::new().with_canonical(world());
        let single = expr.evaluate(&context.with_feature(&single)).unwrap();
        let multi = expr.evaluate(&context.with_feature(&multi)).unwrap();
        assert!(single > 0.);
        assert_eq!(single, multi);
    }

    #[test]
    fn evaluate_without_context() {
        let expr = Distance::from_value(&line_expression("Meters")).unwrap();
        let feature = TileFeature::points([(HALF, HALF)]);
        let message = "distance expression requires valid feature and \
                       canonical information.";

        let err = expr.evaluate(&EvaluationContext::new()).unwrap_err();
        assert_eq!(err.message(), message);
        let err = expr.evaluate(
            &EvaluationContext::new().with_feature(&feature)
        ).unwrap_err();
        assert_eq!(err.message(), message);
        let err = expr.evaluate(
            &EvaluationContext::new().with_canonical(world())
        ).unwrap_err();
        assert_eq!(err.message(), message);
    }

    #[test]
    fn evaluate_polygon_feature() {
        let expr = Distance::from_value(&line_expression("Meters")).unwrap();
        let feature = TileFeature::new(
            FeatureType::Polygon,
            vec![vec![
                TilePoint::new(0, 0), TilePoint::new(100, 0),
                TilePoint::new(100, 100), TilePoint::new(0, 0),
            ]]
        );
        let context = EvaluationContext::new()
            .with_feature(&feature)
            .with_canonical(world());
        assert!(expr.evaluate(&context).is_err());
    }

    #[test]
    fn serialize_drops_unit() {
        let expr = Distance::from_value(&line_expression("Inches")).unwrap();
        let value = expr.serialize();
        assert_eq!(
            value,
            json!([
                "distance",
                {
                    "type": "Feature",
                    "properties": { "name": "meridian" },
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[0.0, -10.0], [0.0, 10.0]]
                    }
                }
            ])
        );

        let back = Distance::from_value(&value).unwrap();
        assert_eq!(back.source(), expr.source());
        assert_eq!(back.geometry(), expr.geometry());
        assert_eq!(back.unit(), Unit::Meters);
        assert_ne!(back, expr);
    }

    #[test]
    fn expression_trait() {
        let expr = Distance::from_value(&line_expression("Meters")).unwrap();
        let dyn_expr: &dyn Expression<Output = f64> = &expr;
        assert_eq!(dyn_expr.operator(), "distance");
        assert_eq!(dyn_expr.possible_outputs(), vec![None]);
        assert_eq!(dyn_expr.serialize(), expr.serialize());
    }

    #[test]
    fn equality() {
        let meters = Distance::from_value(&line_expression("Meters")).unwrap();
        let metres = Distance::from_value(&line_expression("Metres")).unwrap();
        let miles = Distance::from_value(&line_expression("Miles")).unwrap();
        assert_eq!(meters, metres);
        assert_ne!(meters, miles);
    }
}

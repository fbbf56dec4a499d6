//! Parsing the arguments of the distance expression.
//!
//! The expression is given as an array of the operator, a GeoJSON object,
//! and, optionally, the name of the unit. Problems are reported by adding
//! a message to a [`ParseErrors`] collection and returning [`Failed`].

use std::{error, fmt};
use std::str::FromStr;
use serde_json::Value;
use crate::geojson::GeoJson;
use crate::geometry::{Geometry, ReferenceGeometry};
use crate::ruler::Unit;

const ARRAY_ERROR: &str =
    "'distance' expression needs to be an array with one/two arguments.";

const GEOMETRY_ERROR: &str =
    "'distance' expression requires valid geojson source that contains \
     Point/LineString geometry type.";


//------------ Arguments -----------------------------------------------------

/// The parsed arguments of a distance expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Arguments {
    /// The GeoJSON document given as the first argument.
    pub source: GeoJson,

    /// The unit given as the optional second argument.
    pub unit: Unit,
}

impl Arguments {
    /// Parses the arguments from the expression array.
    ///
    /// The array must have two or three elements. The first element is the
    /// operator and is not looked at. The second element must be an object
    /// that converts into a GeoJSON document. The third element, if
    /// present, names the unit. Anything that isn’t a known unit name
    /// leaves the unit at meters without complaint.
    pub fn parse(value: &Value, err: &mut ParseErrors) -> Result<Self, Failed> {
        let args = match value.as_array() {
            Some(args) => args,
            None => {
                err.add(ARRAY_ERROR);
                return Err(Failed)
            }
        };
        if args.len() != 2 && args.len() != 3 {
            err.add(format!(
                "'distance' expression requires exactly one argument, but \
                 found {} instead.",
                args.len().saturating_sub(1)
            ));
            return Err(Failed)
        }

        let unit = args.get(2)
            .and_then(Value::as_str)
            .and_then(|name| Unit::from_str(name).ok())
            .unwrap_or_default();

        if args[1].is_object() {
            match GeoJson::from_value(&args[1]) {
                Ok(source) => return Ok(Arguments { source, unit }),
                Err(conv) => err.add(conv.message()),
            }
        }
        err.add(ARRAY_ERROR);
        Err(Failed)
    }
}


//------------ reference_geometry --------------------------------------------

/// Extracts the reference geometry from a GeoJSON document.
///
/// A geometry is used if it is a point, line, or one of their multi
/// variants and isn’t empty. For a feature collection, the first feature
/// with such a geometry is used and all others are ignored.
pub fn reference_geometry(
    source: &GeoJson, err: &mut ParseErrors
) -> Result<ReferenceGeometry, Failed> {
    let found = match *source {
        GeoJson::Geometry(ref geometry) => qualify(geometry),
        GeoJson::Feature(ref feature) => {
            feature.geometry.as_ref().and_then(qualify)
        }
        GeoJson::FeatureCollection(ref features) => {
            features.iter().find_map(|feature| {
                feature.geometry.as_ref().and_then(qualify)
            })
        }
    };
    found.ok_or_else(|| {
        err.add(GEOMETRY_ERROR);
        Failed
    })
}

fn qualify(geometry: &Geometry) -> Option<ReferenceGeometry> {
    ReferenceGeometry::try_from(geometry.clone()).ok()
}


//============ Errors ========================================================

//------------ ParseErrors ---------------------------------------------------

/// The errors encountered while parsing an expression.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParseErrors {
    errors: Vec<String>,
}

impl ParseErrors {
    pub fn add(&mut self, error: impl Into<String>) {
        self.errors.push(error.into())
    }

    pub fn check(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        }
        else {
            Err(self)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.errors.iter().map(AsRef::as_ref)
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut errors = self.iter();
        if let Some(first) = errors.next() {
            f.write_str(first)?;
            for error in errors {
                write!(f, "\n{}", error)?;
            }
        }
        Ok(())
    }
}

impl error::Error for ParseErrors { }


//------------ Failed --------------------------------------------------------

/// A marker type indicating that an operation has failed.
///
/// This type is used as the error type of a result in cases where the actual
/// error has been added to an error collection.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Failed;


//============ Testing =======================================================

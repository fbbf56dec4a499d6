//! Evaluation of expressions.

use std::{error, fmt};
use serde_json::Value;
use crate::tile::GeometryTileFeature;
use crate::world::TileId;


//------------ Expression ----------------------------------------------------

/// A parsed expression.
///
/// This is the interface through which an expression framework drives an
/// expression once it has been parsed.
pub trait Expression {
    /// The type of the result of evaluating the expression.
    type Output;

    /// Returns the name of the operator of the expression.
    fn operator(&self) -> &'static str;

    /// Evaluates the expression for the given context.
    fn evaluate(
        &self, context: &EvaluationContext
    ) -> Result<Self::Output, EvalError>;

    /// Converts the expression back into its value form.
    fn serialize(&self) -> Value;

    /// Returns the possible results of the expression.
    ///
    /// A `None` item means that the result can’t be known before
    /// evaluation.
    fn possible_outputs(&self) -> Vec<Option<Value>>;
}


//------------ EvaluationContext ---------------------------------------------

/// The context an expression is evaluated in.
///
/// The context provides access to the feature the expression is evaluated
/// for and the tile the feature was decoded from. Either may be missing.
#[derive(Clone, Copy, Default)]
pub struct EvaluationContext<'a> {
    feature: Option<&'a dyn GeometryTileFeature>,
    canonical: Option<TileId>,
}

impl<'a> EvaluationContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feature(
        mut self, feature: &'a dyn GeometryTileFeature
    ) -> Self {
        self.feature = Some(feature);
        self
    }

    pub fn with_canonical(mut self, canonical: TileId) -> Self {
        self.canonical = Some(canonical);
        self
    }

    pub fn feature(&self) -> Option<&'a dyn GeometryTileFeature> {
        self.feature
    }

    pub fn canonical(&self) -> Option<TileId> {
        self.canonical
    }
}


//------------ EvalError -----------------------------------------------------

/// Evaluating an expression has failed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EvalError {
    message: String,
}

impl EvalError {
    pub fn new(message: impl Into<String>) -> Self {
        EvalError { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl error::Error for EvalError { }

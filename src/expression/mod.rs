//! The distance expression of the style language.
//!
//! Style rules are written as expressions in a JSON-based language where
//! each expression is an array starting with the name of its operator.
//! This module provides the `distance` operator, which measures how far
//! a feature is from a fixed geometry given as a GeoJSON document.
//!
//! An expression is created from its value form via [`Distance::parse`],
//! evaluated for a feature of a tile through an [`EvaluationContext`], and
//! can be turned back into its value form via [`Distance::serialize`].

pub use self::distance::Distance;
pub use self::eval::{EvalError, EvaluationContext, Expression};
pub use self::parse::{Arguments, Failed, ParseErrors};

pub mod distance;
pub mod eval;
pub mod parse;

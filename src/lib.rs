//! Proximity rules for map styles.
//!
//! This crate provides the `distance` expression of a map-styling
//! expression language. The expression embeds a GeoJSON document and, for
//! each feature of a vector tile it is evaluated for, returns the shortest
//! distance between the feature’s geometry and the geometry from the
//! document. Style rules can use the result to treat features differently
//! depending on how close they are to a fixed place.
//!
//! The expression itself lives in [`expression`]. The pieces it is built
//! from are available separately:
//!
//! * [`world`] has the geographic point and the tile identifier that
//!   places decoded tile features into the world,
//! * [`tile`] describes decoded tile features and converts their geometry,
//! * [`geojson`] converts between value trees and GeoJSON documents,
//! * [`geometry`] has the geometry types,
//! * [`ruler`] measures distances on a locally flat earth,
//! * [`algorithm`] has the distance functions for points and lines, and
//! * [`distance`] applies them to whole geometries.

pub use self::expression::Distance;

pub mod algorithm;
pub mod distance;
pub mod expression;
pub mod geojson;
pub mod geometry;
pub mod ruler;
pub mod tile;
pub mod world;

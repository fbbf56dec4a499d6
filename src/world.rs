//! Types for referencing the real world.
//!
//! This module contains the geographic point used by all geometries and the
//! canonical tile identifier that places tile-local co-ordinates into the
//! world.

use std::{fmt, error};
use std::f64::consts::PI;
use std::str::FromStr;
use nom::IResult;
use nom::character::complete::{char, u32 as dec_u32, u8 as dec_u8};
use nom::combinator::all_consuming;
use nom::sequence::{preceded, tuple};
use nom::Finish;
use crate::tile::TilePoint;


//------------ Point ---------------------------------------------------------

/// A point on the surface of the earth.
///
/// The point is expressed by its longitude and latitude in degrees. All
/// geometries handled by this crate, including the reference geometries
/// of expressions, use this type.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// The longitude of the point.
    ///
    /// This is the west-east position of the point or its ‘x value.’
    pub lon: f64,

    /// The latitude of the point.
    ///
    /// This is the south-north position of the point or its ‘y value.’
    pub lat: f64,
}

impl Point {
    pub fn new(lon: f64, lat: f64) -> Self {
        Point { lon, lat }
    }
}

impl From<(f64, f64)> for Point {
    fn from((lon, lat): (f64, f64)) -> Self {
        Point { lon, lat }
    }
}

impl From<Point> for kurbo::Point {
    fn from(src: Point) -> kurbo::Point {
        kurbo::Point::new(src.lon, src.lat)
    }
}


//------------ TileId --------------------------------------------------------

/// The number of tile-local units along each side of a tile.
pub const EXTENT: u32 = 8192;

/// The canonical identifier of a tile.
///
/// A tile is identified by its zoom level `z` and its column `x` and row
/// `y` within the `2^z` by `2^z` grid of that zoom level. Rows are counted
/// from the north.
///
/// The identifier is used to reproject the tile-local co-ordinates of a
/// decoded feature into longitude and latitude via
/// [`project`][Self::project]. Its textual form is `z/x/y`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileId {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl TileId {
    /// The maximum zoom level.
    pub const MAX_ZOOM: u8 = 32;

    /// Creates a new tile identifier.
    ///
    /// Returns an error if the zoom level exceeds [`Self::MAX_ZOOM`] or if
    /// `x` or `y` are outside the grid of the zoom level.
    pub fn new(z: u8, x: u32, y: u32) -> Result<Self, InvalidTileId> {
        if z > Self::MAX_ZOOM {
            return Err(InvalidTileId::Zoom(z))
        }
        let dim = 1u64 << z;
        if u64::from(x) >= dim || u64::from(y) >= dim {
            return Err(InvalidTileId::Position { z, x, y })
        }
        Ok(TileId { z, x, y })
    }

    /// Returns the number of tile-local units along the side of the world.
    fn world_size(self) -> f64 {
        f64::from(EXTENT) * 2f64.powi(i32::from(self.z))
    }

    /// Converts a tile-local point into longitude and latitude.
    ///
    /// This is the inverse of the spherical Mercator projection. Points
    /// outside the tile extent, as found in tile buffers, project to
    /// positions outside the tile.
    pub fn project(self, point: TilePoint) -> Point {
        let size = self.world_size();
        let x0 = f64::from(EXTENT) * f64::from(self.x);
        let y0 = f64::from(EXTENT) * f64::from(self.y);
        let y2 = 180. - (f64::from(point.y) + y0) * 360. / size;
        Point::new(
            (f64::from(point.x) + x0) * 360. / size - 180.,
            (y2 * PI / 180.).exp().atan() * 360. / PI - 90.,
        )
    }

    fn parse(input: &str) -> IResult<&str, (u8, u32, u32)> {
        all_consuming(tuple((
            dec_u8,
            preceded(char('/'), dec_u32),
            preceded(char('/'), dec_u32),
        )))(input)
    }
}

impl FromStr for TileId {
    type Err = InvalidTileId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::parse(s).finish() {
            Ok((_, (z, x, y))) => Self::new(z, x, y),
            Err(_) => Err(InvalidTileId::Syntax(s.into())),
        }
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}


//------------ InvalidTileId -------------------------------------------------

/// A tile identifier was out of range or malformed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InvalidTileId {
    Zoom(u8),
    Position { z: u8, x: u32, y: u32 },
    Syntax(String),
}

impl fmt::Display for InvalidTileId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            InvalidTileId::Zoom(z) => {
                write!(f,
                    "zoom level {} exceeds maximum of {}",
                    z, TileId::MAX_ZOOM
                )
            }
            InvalidTileId::Position { z, x, y } => {
                write!(f, "tile {}/{} outside of zoom level {}", x, y, z)
            }
            InvalidTileId::Syntax(ref s) => {
                write!(f, "invalid tile identifier '{}'", s)
            }
        }
    }
}

impl error::Error for InvalidTileId { }


//============ Testing =======================================================

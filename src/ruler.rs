//! Fast approximate distances near a given latitude.
//!
//! The [`Ruler`] treats the earth as flat in the vicinity of the latitude it
//! was created for. Within a few hundred kilometers of that latitude the
//! error stays well below one percent while the cost of a distance is that
//! of a square root. Rulers are cheap to create and are meant to be created
//! for each calculation anew at the latitude of the geometry in question.

use std::{error, fmt};
use std::str::FromStr;
use crate::world::Point;


//------------ Unit ----------------------------------------------------------

/// The unit distances are expressed in.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    #[default]
    Meters,
    Kilometers,
    Miles,
    Inches,
}

impl Unit {
    /// Returns the number of units in a kilometer.
    pub fn per_kilometer(self) -> f64 {
        match self {
            Unit::Meters => 1000.,
            Unit::Kilometers => 1.,
            Unit::Miles => 1000. / 1609.344,
            Unit::Inches => 1000. / 0.0254,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Meters => "Meters",
            Unit::Kilometers => "Kilometers",
            Unit::Miles => "Miles",
            Unit::Inches => "Inches",
        }
    }
}

impl FromStr for Unit {
    type Err = UnknownUnit;

    /// Converts a unit name into a unit.
    ///
    /// Names are case sensitive. Both the American and the British
    /// spelling are accepted for meters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Meters" | "Metres" => Ok(Unit::Meters),
            "Kilometers" => Ok(Unit::Kilometers),
            "Miles" => Ok(Unit::Miles),
            "Inches" => Ok(Unit::Inches),
            _ => Err(UnknownUnit(s.into())),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


//------------ UnknownUnit ---------------------------------------------------

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownUnit(String);

impl fmt::Display for UnknownUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown unit '{}'", self.0)
    }
}

impl error::Error for UnknownUnit { }


//------------ Ruler ---------------------------------------------------------

/// Equatorial radius of the WGS84 ellipsoid in kilometers.
const RE: f64 = 6378.137;

/// Flattening of the WGS84 ellipsoid.
const FE: f64 = 1.0 / 298.257223563;

/// Square of the eccentricity.
const E2: f64 = FE * (2. - FE);

/// A flat-earth approximation anchored at a latitude.
///
/// The ruler converts differences in longitude and latitude into distances
/// via two multipliers derived from the curvature of the WGS84 ellipsoid at
/// its latitude.
#[derive(Clone, Copy, Debug)]
pub struct Ruler {
    /// Units per degree of longitude.
    kx: f64,

    /// Units per degree of latitude.
    ky: f64,
}

impl Ruler {
    /// Creates a ruler for the given latitude and unit.
    pub fn new(latitude: f64, unit: Unit) -> Self {
        let mul = RE.to_radians() * unit.per_kilometer();
        let coslat = latitude.to_radians().cos();
        let w2 = 1. / (1. - E2 * (1. - coslat * coslat));
        let w = w2.sqrt();
        Ruler {
            kx: mul * w * coslat,
            ky: mul * w * w2 * (1. - E2),
        }
    }

    /// Returns the distance between two points.
    pub fn distance(&self, a: Point, b: Point) -> f64 {
        let dx = long_diff(a.lon, b.lon) * self.kx;
        let dy = (a.lat - b.lat) * self.ky;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns the point on a line closest to the given point.
    ///
    /// Returns `None` if the line is empty. For a line of a single point,
    /// that point is returned.
    pub fn point_on_line(
        &self, line: &[Point], p: Point
    ) -> Option<PointOnLine> {
        let first = line.first()?;
        let mut res = PointOnLine { point: *first, index: 0, t: 0. };
        let mut min_dist = f64::INFINITY;

        for (index, seg) in line.windows(2).enumerate() {
            let mut t = 0.;
            let mut x = seg[0].lon;
            let mut y = seg[0].lat;
            let dx = long_diff(seg[1].lon, x) * self.kx;
            let dy = (seg[1].lat - y) * self.ky;

            if dx != 0. || dy != 0. {
                t = (
                    long_diff(p.lon, x) * self.kx * dx
                    + (p.lat - y) * self.ky * dy
                ) / (dx * dx + dy * dy);
                if t > 1. {
                    x = seg[1].lon;
                    y = seg[1].lat;
                }
                else if t > 0. {
                    x += (dx / self.kx) * t;
                    y += (dy / self.ky) * t;
                }
            }

            let dx = long_diff(p.lon, x) * self.kx;
            let dy = (p.lat - y) * self.ky;
            let sq_dist = dx * dx + dy * dy;
            if sq_dist < min_dist {
                min_dist = sq_dist;
                res = PointOnLine {
                    point: Point::new(x, y),
                    index,
                    t: t.clamp(0., 1.),
                };
            }
        }
        Some(res)
    }
}

/// Returns the difference between two longitudes wrapped into ±180°.
fn long_diff(a: f64, b: f64) -> f64 {
    let diff = a - b;
    diff - 360. * (diff / 360.).round()
}


//------------ PointOnLine ---------------------------------------------------

/// The result of [`Ruler::point_on_line`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointOnLine {
    /// The closest point on the line.
    pub point: Point,

    /// The index of the segment the point is on.
    pub index: usize,

    /// The position of the point along that segment between 0 and 1.
    pub t: f64,
}


//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unit_names() {
        assert_eq!(Unit::from_str("Meters"), Ok(Unit::Meters));
        assert_eq!(Unit::from_str("Metres"), Ok(Unit::Meters));
        assert_eq!(Unit::from_str("Kilometers"), Ok(Unit::Kilometers));
        assert_eq!(Unit::from_str("Miles"), Ok(Unit::Miles));
        assert_eq!(Unit::from_str("Inches"), Ok(Unit::Inches));
        assert!(Unit::from_str("meters").is_err());
        assert!(Unit::from_str("Feet").is_err());
        assert_eq!(Unit::default(), Unit::Meters);
    }

    #[test]
    fn degree_at_equator() {
        let ruler = Ruler::new(0., Unit::Kilometers);
        let dist = ruler.distance(Point::new(0., 0.), Point::new(1., 0.));
        // One degree of longitude at the equator is about 111.32 km.
        assert!((dist - 111.319).abs() < 0.01, "{}", dist);
    }

    #[test]
    fn antimeridian() {
        let ruler = Ruler::new(0., Unit::Kilometers);
        let across = ruler.distance(
            Point::new(179.5, 0.), Point::new(-179.5, 0.)
        );
        let plain = ruler.distance(Point::new(0., 0.), Point::new(1., 0.));
        assert!((across - plain).abs() < 1e-9);
    }

    #[test]
    fn point_on_line() {
        let ruler = Ruler::new(0., Unit::Meters);
        let line = [Point::new(0., 0.), Point::new(2., 0.)];

        let res = ruler.point_on_line(&line, Point::new(1., 1.)).unwrap();
        assert_eq!(res.point, Point::new(1., 0.));
        assert_eq!(res.index, 0);
        assert_eq!(res.t, 0.5);

        let res = ruler.point_on_line(&line, Point::new(5., 1.)).unwrap();
        assert_eq!(res.point, Point::new(2., 0.));
        assert_eq!(res.t, 1.);

        let res = ruler.point_on_line(&line, Point::new(-5., 1.)).unwrap();
        assert_eq!(res.point, Point::new(0., 0.));
        assert_eq!(res.t, 0.);
    }

    #[test]
    fn point_on_short_lines() {
        let ruler = Ruler::new(0., Unit::Meters);
        assert_eq!(ruler.point_on_line(&[], Point::new(1., 1.)), None);
        assert_eq!(
            ruler.point_on_line(&[Point::new(3., 4.)], Point::new(1., 1.))
                .map(|res| res.point),
            Some(Point::new(3., 4.))
        );
    }
}

//! `{ "type": ..., "coordinates": ... }` representation shared by all shapes.
//!
//! Example output:
//! ```json
//! { "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] }
//! ```
//!
//! Circles carry their radius next to the center coordinates:
//! ```json
//! { "type": "Circle", "coordinates": [1.0, 2.0], "radius": 3.0 }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::{Circle, Geometry, LineString, Point, Polygon};
use crate::error::GeoError;

/// Serde form of a geometry.
///
/// Converting back into a shape runs the validating constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Point { coordinates: [f64; 2] },
    LineString { coordinates: Vec<[f64; 2]> },
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
    Circle { coordinates: [f64; 2], radius: f64 },
}

impl GeoJson {
    pub fn to_value(&self) -> JsonValue {
        // only finite numbers and string keys, so this cannot fail
        serde_json::to_value(self).unwrap_or_default()
    }

    fn type_name(&self) -> &'static str {
        match self {
            GeoJson::Point { .. } => "Point",
            GeoJson::LineString { .. } => "LineString",
            GeoJson::Polygon { .. } => "Polygon",
            GeoJson::Circle { .. } => "Circle",
        }
    }

    fn mismatch(self, expected: &'static str) -> GeoError {
        GeoError::KindMismatch { expected, found: self.type_name() }
    }
}

fn pair(p: &Point) -> [f64; 2] {
    [p.x(), p.y()]
}

fn points(coords: Vec<[f64; 2]>) -> Result<Vec<Point>, GeoError> {
    coords.into_iter().map(|[x, y]| Point::new(x, y)).collect()
}

impl From<Point> for GeoJson {
    fn from(p: Point) -> Self {
        GeoJson::Point { coordinates: pair(&p) }
    }
}

impl From<LineString> for GeoJson {
    fn from(line: LineString) -> Self {
        GeoJson::LineString {
            coordinates: line.points().iter().map(pair).collect(),
        }
    }
}

impl From<Polygon> for GeoJson {
    fn from(polygon: Polygon) -> Self {
        GeoJson::Polygon {
            coordinates: polygon
                .rings()
                .iter()
                .map(|ring| ring.iter().map(pair).collect())
                .collect(),
        }
    }
}

impl From<Circle> for GeoJson {
    fn from(circle: Circle) -> Self {
        GeoJson::Circle {
            coordinates: pair(&circle.center()),
            radius: circle.radius(),
        }
    }
}

impl From<Geometry> for GeoJson {
    fn from(geometry: Geometry) -> Self {
        match geometry {
            Geometry::Point(g) => g.into(),
            Geometry::LineString(g) => g.into(),
            Geometry::Polygon(g) => g.into(),
            Geometry::Circle(g) => g.into(),
        }
    }
}

impl TryFrom<GeoJson> for Point {
    type Error = GeoError;

    fn try_from(repr: GeoJson) -> Result<Self, Self::Error> {
        match repr {
            GeoJson::Point { coordinates: [x, y] } => Point::new(x, y),
            other => Err(other.mismatch("Point")),
        }
    }
}

impl TryFrom<GeoJson> for LineString {
    type Error = GeoError;

    fn try_from(repr: GeoJson) -> Result<Self, Self::Error> {
        match repr {
            GeoJson::LineString { coordinates } => LineString::new(points(coordinates)?),
            other => Err(other.mismatch("LineString")),
        }
    }
}

impl TryFrom<GeoJson> for Polygon {
    type Error = GeoError;

    fn try_from(repr: GeoJson) -> Result<Self, Self::Error> {
        match repr {
            GeoJson::Polygon { coordinates } => {
                let rings = coordinates
                    .into_iter()
                    .map(points)
                    .collect::<Result<Vec<_>, _>>()?;
                Polygon::new(rings)
            }
            other => Err(other.mismatch("Polygon")),
        }
    }
}

impl TryFrom<GeoJson> for Circle {
    type Error = GeoError;

    fn try_from(repr: GeoJson) -> Result<Self, Self::Error> {
        match repr {
            GeoJson::Circle { coordinates: [x, y], radius } => Circle::from_coords(x, y, radius),
            other => Err(other.mismatch("Circle")),
        }
    }
}

impl TryFrom<GeoJson> for Geometry {
    type Error = GeoError;

    fn try_from(repr: GeoJson) -> Result<Self, Self::Error> {
        Ok(match repr {
            repr @ GeoJson::Point { .. } => Point::try_from(repr)?.into(),
            repr @ GeoJson::LineString { .. } => LineString::try_from(repr)?.into(),
            repr @ GeoJson::Polygon { .. } => Polygon::try_from(repr)?.into(),
            repr @ GeoJson::Circle { .. } => Circle::try_from(repr)?.into(),
        })
    }
}

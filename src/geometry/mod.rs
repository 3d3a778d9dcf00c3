//! Geometry value objects and their WKB codecs.
//!
//! Every shape is an immutable value built through a validating constructor.
//! Decoding a buffer goes through the same constructor, so an in-memory value
//! and a decoded one always satisfy the same invariants.

mod circle;
mod json;
mod line_string;
mod point;
mod polygon;
mod wkt;

pub use circle::Circle;
pub use json::GeoJson;
pub use line_string::LineString;
pub use point::Point;
pub use polygon::Polygon;

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{GeoError, GeoResult};
use crate::wkb::{self, ByteOrder, GeometryKind};

/// Capabilities shared by every concrete shape.
///
/// Equality comes from `PartialEq`, WKT from `Display`/`FromStr` and JSON
/// from serde (see [`GeoJson`]).
pub trait Shape:
    Sized
    + Clone
    + PartialEq
    + fmt::Display
    + FromStr<Err = GeoError>
    + Into<Geometry>
    + Into<GeoJson>
    + TryFrom<Geometry, Error = GeoError>
{
    /// Shape discriminator, also fixes the WKB type tag.
    const KIND: GeometryKind;

    /// Decode a complete WKB payload of this shape.
    fn from_wkb(buf: &[u8]) -> GeoResult<Self>;

    /// Encode with an explicit byte order.
    fn to_wkb_with(&self, order: ByteOrder) -> Bytes;

    /// Encode in host byte order.
    fn to_wkb(&self) -> Bytes {
        self.to_wkb_with(ByteOrder::native())
    }

    /// `{ "type": ..., "coordinates": ... }` rendering.
    fn to_json(&self) -> serde_json::Value {
        let repr: GeoJson = self.clone().into();
        repr.to_value()
    }
}

/// Any supported geometry.
///
/// Dispatch over shapes is a plain `match` on this closed set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "GeoJson", try_from = "GeoJson")]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
    Circle(Circle),
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::Circle(_) => GeometryKind::Circle,
        }
    }

    /// Decode a payload of any supported shape, chosen by its type tag.
    pub fn from_wkb(buf: &[u8]) -> GeoResult<Self> {
        Self::from_wkb_as(buf, wkb::peek_kind(buf)?)
    }

    /// Decode a payload that must be of shape `kind`.
    pub fn from_wkb_as(buf: &[u8], kind: GeometryKind) -> GeoResult<Self> {
        Ok(match kind {
            GeometryKind::Point => Point::from_wkb(buf)?.into(),
            GeometryKind::LineString => LineString::from_wkb(buf)?.into(),
            GeometryKind::Polygon => Polygon::from_wkb(buf)?.into(),
            GeometryKind::Circle => Circle::from_wkb(buf)?.into(),
        })
    }

    pub fn to_wkb(&self) -> Bytes {
        self.to_wkb_with(ByteOrder::native())
    }

    pub fn to_wkb_with(&self, order: ByteOrder) -> Bytes {
        match self {
            Geometry::Point(g) => g.to_wkb_with(order),
            Geometry::LineString(g) => g.to_wkb_with(order),
            Geometry::Polygon(g) => g.to_wkb_with(order),
            Geometry::Circle(g) => g.to_wkb_with(order),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        GeoJson::from(self.clone()).to_value()
    }

    /// Parse the JSON form produced by [`Geometry::to_json`].
    pub fn from_json(value: &serde_json::Value) -> GeoResult<Self> {
        let repr: GeoJson = serde_json::from_value(value.clone())
            .map_err(|e| GeoError::Json(e.to_string()))?;
        repr.try_into()
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::Point(g) => g.fmt(f),
            Geometry::LineString(g) => g.fmt(f),
            Geometry::Polygon(g) => g.fmt(f),
            Geometry::Circle(g) => g.fmt(f),
        }
    }
}

impl FromStr for Geometry {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        wkt::parse(s)
    }
}

macro_rules! impl_geometry_variant {
    ($shape:ident) => {
        impl From<$shape> for Geometry {
            fn from(value: $shape) -> Self {
                Geometry::$shape(value)
            }
        }

        impl TryFrom<Geometry> for $shape {
            type Error = GeoError;

            fn try_from(value: Geometry) -> Result<Self, Self::Error> {
                match value {
                    Geometry::$shape(inner) => Ok(inner),
                    other => Err(GeoError::KindMismatch {
                        expected: GeometryKind::$shape.name(),
                        found: other.kind().name(),
                    }),
                }
            }
        }
    };
}

impl_geometry_variant!(Point);
impl_geometry_variant!(LineString);
impl_geometry_variant!(Polygon);
impl_geometry_variant!(Circle);

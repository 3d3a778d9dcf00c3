//! Point: the simplest shape, anchoring the binary format.
//!
//! Wire format (21 bytes):
//! - byte order (1 byte)
//! - type tag `POINT_2D` (4 bytes)
//! - x (8 bytes)
//! - y (8 bytes)

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::Shape;
use super::json::GeoJson;
use crate::error::{GeoError, GeoResult};
use crate::wkb::{self, ByteOrder, GeometryKind, WkbWriter};

/// A 2D point with finite double coordinates.
///
/// Equality is exact floating-point equality on both coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "GeoJson", try_from = "GeoJson")]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Exact size of an encoded point.
    pub const WKB_LEN: usize = wkb::HEADER_LEN + wkb::COORD_LEN;

    /// Create a point, rejecting NaN and infinite coordinates.
    ///
    /// # Example
    /// ```
    /// use dse_geometry::Point;
    /// let p = Point::new(1.5, -2.25).unwrap();
    /// assert_eq!(p.to_string(), "POINT (1.5 -2.25)");
    /// assert!(Point::new(f64::NAN, 0.0).is_err());
    /// ```
    pub fn new(x: f64, y: f64) -> GeoResult<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(GeoError::NonFiniteCoordinate { x, y });
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Write the coordinate pair only, no header.
    pub(crate) fn write_coords(&self, writer: &mut WkbWriter) {
        writer.write_coords(self.x, self.y);
    }

    /// Read a coordinate pair at `offset` and validate it.
    pub(crate) fn read_at(buf: &[u8], order: ByteOrder, offset: usize) -> GeoResult<Self> {
        let (x, y) = wkb::read_coords(buf, order, offset)?;
        Self::new(x, y)
    }
}

impl Shape for Point {
    const KIND: GeometryKind = GeometryKind::Point;

    fn from_wkb(buf: &[u8]) -> GeoResult<Self> {
        if buf.len() != Self::WKB_LEN {
            return Err(GeoError::BufferLength {
                shape: Self::KIND.name(),
                expected: Self::WKB_LEN,
                actual: buf.len(),
            });
        }
        let order = wkb::expect_header(buf, Self::KIND)?;
        Self::read_at(buf, order, wkb::HEADER_LEN)
    }

    fn to_wkb_with(&self, order: ByteOrder) -> Bytes {
        let mut writer = WkbWriter::with_order(order, Self::WKB_LEN);
        writer.write_header(Self::KIND);
        self.write_coords(&mut writer);
        writer.finish()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "POINT ({} {})", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::wkt::parse_shape(s)
    }
}

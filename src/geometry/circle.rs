//! Circle: center point plus radius, a DSE extension to WKB.
//!
//! Wire format (29 bytes):
//! - byte order (1 byte)
//! - type tag `CIRCLE` (4 bytes)
//! - center x, center y, radius (8 bytes each)

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::json::GeoJson;
use super::{Point, Shape};
use crate::error::{GeoError, GeoResult};
use crate::wkb::{self, ByteOrder, GeometryKind, WkbWriter};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "GeoJson", try_from = "GeoJson")]
pub struct Circle {
    center: Point,
    radius: f64,
}

impl Circle {
    pub const WKB_LEN: usize = wkb::HEADER_LEN + wkb::COORD_LEN + 8;

    /// Create a circle. The radius must be finite and not negative.
    pub fn new(center: Point, radius: f64) -> GeoResult<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(GeoError::InvalidRadius(radius));
        }
        Ok(Self { center, radius })
    }

    pub fn from_coords(x: f64, y: f64, radius: f64) -> GeoResult<Self> {
        Self::new(Point::new(x, y)?, radius)
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Shape for Circle {
    const KIND: GeometryKind = GeometryKind::Circle;

    fn from_wkb(buf: &[u8]) -> GeoResult<Self> {
        if buf.len() != Self::WKB_LEN {
            return Err(GeoError::BufferLength {
                shape: Self::KIND.name(),
                expected: Self::WKB_LEN,
                actual: buf.len(),
            });
        }
        let order = wkb::expect_header(buf, Self::KIND)?;
        let center = Point::read_at(buf, order, wkb::HEADER_LEN)?;
        let radius = wkb::read_f64(buf, order, wkb::HEADER_LEN + wkb::COORD_LEN)?;
        Self::new(center, radius)
    }

    fn to_wkb_with(&self, order: ByteOrder) -> Bytes {
        let mut writer = WkbWriter::with_order(order, Self::WKB_LEN);
        writer.write_header(Self::KIND);
        self.center.write_coords(&mut writer);
        writer.write_f64(self.radius);
        writer.finish()
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CIRCLE (({} {}) {})", self.center.x(), self.center.y(), self.radius)
    }
}

impl FromStr for Circle {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::wkt::parse_shape(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_validation() {
        assert_eq!(Circle::from_coords(0.0, 0.0, -1.0), Err(GeoError::InvalidRadius(-1.0)));
        assert!(Circle::from_coords(0.0, 0.0, f64::INFINITY).is_err());
        assert!(Circle::from_coords(0.0, 0.0, f64::NAN).is_err());
        assert!(Circle::from_coords(0.0, 0.0, 0.0).is_ok());
        assert!(matches!(
            Circle::from_coords(f64::NAN, 0.0, 1.0),
            Err(GeoError::NonFiniteCoordinate { .. })
        ));
    }

    #[test]
    fn test_wkb_layout() {
        let circle = Circle::from_coords(1.0, 2.0, 3.0).unwrap();
        let buf = circle.to_wkb_with(ByteOrder::BigEndian);
        assert_eq!(buf.len(), 29);
        assert_eq!(&buf[..5], &[0, 0, 0, 0, 101]);
        assert_eq!(&buf[21..], &3.0f64.to_be_bytes());
        assert_eq!(Circle::from_wkb(&buf).unwrap(), circle);
    }

    #[test]
    fn test_wrong_length_and_tag() {
        let buf = Circle::from_coords(1.0, 2.0, 3.0).unwrap().to_wkb().to_vec();
        assert!(matches!(
            Circle::from_wkb(&buf[..28]),
            Err(GeoError::BufferLength { expected: 29, actual: 28, .. })
        ));

        let mut retagged = buf.clone();
        retagged[1..5].copy_from_slice(&match ByteOrder::native() {
            ByteOrder::BigEndian => 1i32.to_be_bytes(),
            ByteOrder::LittleEndian => 1i32.to_le_bytes(),
        });
        assert!(matches!(
            Circle::from_wkb(&retagged),
            Err(GeoError::UnexpectedType { expected: "Circle", found: 1 })
        ));
    }

    #[test]
    fn test_negative_radius_in_buffer() {
        let mut w = WkbWriter::with_order(ByteOrder::LittleEndian, 29);
        w.write_header(GeometryKind::Circle);
        w.write_coords(0.0, 0.0);
        w.write_f64(-1.0);
        assert_eq!(Circle::from_wkb(&w.finish()), Err(GeoError::InvalidRadius(-1.0)));
    }

    #[test]
    fn test_display() {
        let circle = Circle::from_coords(1.5, -2.0, 10.0).unwrap();
        assert_eq!(circle.to_string(), "CIRCLE ((1.5 -2) 10)");
    }
}

//! LineString: an ordered run of points.
//!
//! Wire format (9 + 16n bytes):
//! - byte order (1 byte)
//! - type tag `LINE_STRING` (4 bytes)
//! - point count n (4 bytes)
//! - n × (x, y) doubles

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::json::GeoJson;
use super::{Point, Shape};
use crate::error::{GeoError, GeoResult};
use crate::wkb::{self, ByteOrder, GeometryKind, WkbWriter};

/// Byte order + type tag + point count.
pub(crate) const MIN_WKB_LEN: usize = wkb::HEADER_LEN + 4;

/// An ordered sequence of points, either empty or with at least two points.
///
/// The point sequence cannot be changed after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "GeoJson", try_from = "GeoJson")]
pub struct LineString {
    points: Vec<Point>,
}

impl LineString {
    /// Create a line string. Exactly one point is rejected.
    ///
    /// # Example
    /// ```
    /// use dse_geometry::{LineString, Point};
    /// let line = LineString::new(vec![
    ///     Point::new(0.0, 0.0).unwrap(),
    ///     Point::new(1.0, 1.0).unwrap(),
    /// ]).unwrap();
    /// assert_eq!(line.to_string(), "LINESTRING (0 0, 1 1)");
    /// assert!(LineString::new(vec![Point::new(0.0, 0.0).unwrap()]).is_err());
    /// ```
    pub fn new(points: Vec<Point>) -> GeoResult<Self> {
        if points.len() == 1 {
            return Err(GeoError::SinglePointLineString);
        }
        Ok(Self { points })
    }

    pub fn empty() -> Self {
        Self { points: Vec::new() }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Encoded size for `count` points.
    pub fn wkb_len(count: usize) -> usize {
        MIN_WKB_LEN + count * wkb::COORD_LEN
    }
}

impl Shape for LineString {
    const KIND: GeometryKind = GeometryKind::LineString;

    fn from_wkb(buf: &[u8]) -> GeoResult<Self> {
        if buf.len() < MIN_WKB_LEN {
            return Err(GeoError::BufferTooShort {
                shape: Self::KIND.name(),
                min: MIN_WKB_LEN,
                actual: buf.len(),
            });
        }
        let order = wkb::expect_header(buf, Self::KIND)?;
        let count = wkb::read_count(buf, order, wkb::HEADER_LEN, Self::KIND.name())?;

        let expected = count
            .checked_mul(wkb::COORD_LEN)
            .and_then(|n| n.checked_add(MIN_WKB_LEN));
        if expected != Some(buf.len()) {
            return Err(GeoError::LengthMismatch {
                shape: Self::KIND.name(),
                count,
                expected: expected.unwrap_or(usize::MAX),
                actual: buf.len(),
            });
        }

        let points = (0..count)
            .map(|i| Point::read_at(buf, order, MIN_WKB_LEN + i * wkb::COORD_LEN))
            .collect::<GeoResult<Vec<_>>>()?;
        Self::new(points)
    }

    fn to_wkb_with(&self, order: ByteOrder) -> Bytes {
        let mut writer = WkbWriter::with_order(order, Self::wkb_len(self.points.len()));
        writer.write_header(Self::KIND);
        writer.write_count(self.points.len());
        for point in &self.points {
            point.write_coords(&mut writer);
        }
        writer.finish()
    }
}

/// `x1 y1, x2 y2, ...`
pub(crate) fn fmt_coords(f: &mut fmt::Formatter<'_>, points: &[Point]) -> fmt::Result {
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{} {}", p.x(), p.y())?;
    }
    Ok(())
}

impl fmt::Display for LineString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.points.is_empty() {
            return f.write_str("LINESTRING EMPTY");
        }
        f.write_str("LINESTRING (")?;
        fmt_coords(f, &self.points)?;
        f.write_str(")")
    }
}

impl FromStr for LineString {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::wkt::parse_shape(s)
    }
}

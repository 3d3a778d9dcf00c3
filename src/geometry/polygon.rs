//! Polygon: an exterior ring followed by zero or more holes.
//!
//! Wire format:
//! - byte order (1 byte)
//! - type tag `POLYGON` (4 bytes)
//! - ring count (4 bytes)
//! - per ring: point count n (4 bytes), then n × (x, y) doubles

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::json::GeoJson;
use super::line_string::fmt_coords;
use super::{Point, Shape};
use crate::error::{GeoError, GeoResult};
use crate::wkb::{self, ByteOrder, GeometryKind, WkbWriter};

const MIN_WKB_LEN: usize = wkb::HEADER_LEN + 4;

/// A polygon made of rings. The first ring is the exterior boundary.
///
/// Each ring obeys the LineString rule (empty or at least two points).
/// Ring closure is not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "GeoJson", try_from = "GeoJson")]
pub struct Polygon {
    rings: Vec<Vec<Point>>,
}

impl Polygon {
    pub fn new(rings: Vec<Vec<Point>>) -> GeoResult<Self> {
        if let Some(ring) = rings.iter().position(|r| r.len() == 1) {
            return Err(GeoError::SinglePointRing { ring });
        }
        Ok(Self { rings })
    }

    pub fn empty() -> Self {
        Self { rings: Vec::new() }
    }

    pub fn rings(&self) -> &[Vec<Point>] {
        &self.rings
    }

    pub fn exterior(&self) -> Option<&[Point]> {
        self.rings.first().map(Vec::as_slice)
    }

    pub fn interiors(&self) -> &[Vec<Point>] {
        self.rings.get(1..).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    fn wkb_len(&self) -> usize {
        self.rings
            .iter()
            .map(|r| 4 + r.len() * wkb::COORD_LEN)
            .sum::<usize>()
            + MIN_WKB_LEN
    }
}

impl Shape for Polygon {
    const KIND: GeometryKind = GeometryKind::Polygon;

    fn from_wkb(buf: &[u8]) -> GeoResult<Self> {
        let shape = Self::KIND.name();
        if buf.len() < MIN_WKB_LEN {
            return Err(GeoError::BufferTooShort {
                shape,
                min: MIN_WKB_LEN,
                actual: buf.len(),
            });
        }
        let order = wkb::expect_header(buf, Self::KIND)?;
        let ring_count = wkb::read_count(buf, order, wkb::HEADER_LEN, shape)?;

        // every ring needs at least its 4-byte count
        let mut rings = Vec::with_capacity(ring_count.min((buf.len() - MIN_WKB_LEN) / 4));
        let mut offset = MIN_WKB_LEN;
        for _ in 0..ring_count {
            let count = wkb::read_count(buf, order, offset, shape)?;
            offset += 4;
            let end = count
                .checked_mul(wkb::COORD_LEN)
                .and_then(|n| n.checked_add(offset))
                .filter(|&end| end <= buf.len())
                .ok_or(GeoError::LengthMismatch {
                    shape,
                    count,
                    expected: offset.saturating_add(count.saturating_mul(wkb::COORD_LEN)),
                    actual: buf.len(),
                })?;
            let ring = (0..count)
                .map(|i| Point::read_at(buf, order, offset + i * wkb::COORD_LEN))
                .collect::<GeoResult<Vec<_>>>()?;
            rings.push(ring);
            offset = end;
        }

        if offset != buf.len() {
            return Err(GeoError::LengthMismatch {
                shape,
                count: ring_count,
                expected: offset,
                actual: buf.len(),
            });
        }
        Self::new(rings)
    }

    fn to_wkb_with(&self, order: ByteOrder) -> Bytes {
        let mut writer = WkbWriter::with_order(order, self.wkb_len());
        writer.write_header(Self::KIND);
        writer.write_count(self.rings.len());
        for ring in &self.rings {
            writer.write_count(ring.len());
            for point in ring {
                point.write_coords(&mut writer);
            }
        }
        writer.finish()
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rings.is_empty() {
            return f.write_str("POLYGON EMPTY");
        }
        f.write_str("POLYGON (")?;
        for (i, ring) in self.rings.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str("(")?;
            fmt_coords(f, ring)?;
            f.write_str(")")?;
        }
        f.write_str(")")
    }
}

impl FromStr for Polygon {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::wkt::parse_shape(s)
    }
}

//! WKB byte-level primitives shared by every shape.
//!
//! Layout of every DSE geometry payload:
//! - byte order flag (1 byte): 0 = big endian, 1 = little endian
//! - geometry type tag (4 bytes, signed, in the flagged order)
//! - shape body (counts as 4-byte signed ints, coordinates as IEEE-754 doubles)
//!
//! Writers always emit in host byte order and record it in the flag, so
//! readers must branch on the flag instead of assuming an order.

use bytes::{BufMut, Bytes, BytesMut};
use nom::number::Endianness;
use nom::number::complete as number;

use crate::error::{GeoError, GeoResult};

/// WKB geometry type tags.
pub mod wkb_type {
    pub const POINT_2D: i32 = 1;
    pub const LINE_STRING: i32 = 2;
    pub const POLYGON: i32 = 3;
    // DSE extension, not part of OGC WKB
    pub const CIRCLE: i32 = 101;
}

/// Size of the byte order flag plus the type tag.
pub const HEADER_LEN: usize = 5;
/// Size of one (x, y) coordinate pair.
pub const COORD_LEN: usize = 16;

/// Byte order of a WKB payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    BigEndian,
    LittleEndian,
}

impl ByteOrder {
    /// Map the leading WKB flag to a byte order.
    pub fn from_flag(flag: u8) -> GeoResult<Self> {
        match flag {
            0 => Ok(ByteOrder::BigEndian),
            1 => Ok(ByteOrder::LittleEndian),
            other => Err(GeoError::InvalidByteOrder(other)),
        }
    }

    /// The WKB flag byte for this order.
    pub fn flag(self) -> u8 {
        match self {
            ByteOrder::BigEndian => 0,
            ByteOrder::LittleEndian => 1,
        }
    }

    /// Byte order of the host we are running on.
    pub fn native() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::BigEndian
        } else {
            ByteOrder::LittleEndian
        }
    }

    /// The opposite order.
    pub fn swapped(self) -> Self {
        match self {
            ByteOrder::BigEndian => ByteOrder::LittleEndian,
            ByteOrder::LittleEndian => ByteOrder::BigEndian,
        }
    }
}

impl From<ByteOrder> for Endianness {
    fn from(order: ByteOrder) -> Self {
        match order {
            ByteOrder::BigEndian => Endianness::Big,
            ByteOrder::LittleEndian => Endianness::Little,
        }
    }
}

/// The closed set of shapes this crate encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    Circle,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 4] = [
        GeometryKind::Point,
        GeometryKind::LineString,
        GeometryKind::Polygon,
        GeometryKind::Circle,
    ];

    /// WKB type tag written after the byte order flag.
    pub fn tag(self) -> i32 {
        match self {
            GeometryKind::Point => wkb_type::POINT_2D,
            GeometryKind::LineString => wkb_type::LINE_STRING,
            GeometryKind::Polygon => wkb_type::POLYGON,
            GeometryKind::Circle => wkb_type::CIRCLE,
        }
    }

    pub fn from_tag(tag: i32) -> Option<Self> {
        match tag {
            wkb_type::POINT_2D => Some(GeometryKind::Point),
            wkb_type::LINE_STRING => Some(GeometryKind::LineString),
            wkb_type::POLYGON => Some(GeometryKind::Polygon),
            wkb_type::CIRCLE => Some(GeometryKind::Circle),
            _ => None,
        }
    }

    /// Shape name as used in JSON `type` and error messages.
    pub fn name(self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::Circle => "Circle",
        }
    }
}

impl std::fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Reading
// ============================================================================

/// Read a 4-byte signed integer at `offset`.
pub fn read_i32(buf: &[u8], order: ByteOrder, offset: usize) -> GeoResult<i32> {
    let input = buf.get(offset..).ok_or(GeoError::Truncated { offset, len: buf.len() })?;
    let (_, value) = number::i32::<_, nom::error::Error<&[u8]>>(order.into())(input)
        .map_err(|_| GeoError::Truncated { offset, len: buf.len() })?;
    Ok(value)
}

/// Read an 8-byte IEEE-754 double at `offset`.
pub fn read_f64(buf: &[u8], order: ByteOrder, offset: usize) -> GeoResult<f64> {
    let input = buf.get(offset..).ok_or(GeoError::Truncated { offset, len: buf.len() })?;
    let (_, value) = number::f64::<_, nom::error::Error<&[u8]>>(order.into())(input)
        .map_err(|_| GeoError::Truncated { offset, len: buf.len() })?;
    Ok(value)
}

/// Read an element count at `offset`, rejecting negative values.
pub fn read_count(buf: &[u8], order: ByteOrder, offset: usize, shape: &'static str) -> GeoResult<usize> {
    let raw = read_i32(buf, order, offset)?;
    usize::try_from(raw).map_err(|_| GeoError::NegativeCount(raw, shape))
}

/// Read the (x, y) pair starting at `offset`.
pub fn read_coords(buf: &[u8], order: ByteOrder, offset: usize) -> GeoResult<(f64, f64)> {
    Ok((read_f64(buf, order, offset)?, read_f64(buf, order, offset + 8)?))
}

/// Read the byte order flag and type tag.
pub fn read_header(buf: &[u8]) -> GeoResult<(ByteOrder, i32)> {
    let flag = *buf.first().ok_or(GeoError::Truncated { offset: 0, len: 0 })?;
    let order = ByteOrder::from_flag(flag)?;
    let tag = read_i32(buf, order, 1)?;
    Ok((order, tag))
}

/// Read the header and require the tag of `kind`.
pub fn expect_header(buf: &[u8], kind: GeometryKind) -> GeoResult<ByteOrder> {
    let (order, tag) = read_header(buf)?;
    if tag != kind.tag() {
        return Err(GeoError::UnexpectedType { expected: kind.name(), found: tag });
    }
    Ok(order)
}

/// Identify the shape of a payload from its type tag.
pub fn peek_kind(buf: &[u8]) -> GeoResult<GeometryKind> {
    let (_, tag) = read_header(buf)?;
    GeometryKind::from_tag(tag).ok_or(GeoError::UnknownType(tag))
}

// ============================================================================
// Writing
// ============================================================================

/// Append-only WKB writer bound to one byte order.
pub struct WkbWriter {
    buf: BytesMut,
    order: ByteOrder,
}

impl WkbWriter {
    pub fn with_order(order: ByteOrder, capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            order,
        }
    }

    /// Write the flag byte recording this writer's order.
    pub fn write_endianness(&mut self) {
        self.buf.put_u8(self.order.flag());
    }

    pub fn write_i32(&mut self, value: i32) {
        match self.order {
            ByteOrder::BigEndian => self.buf.put_i32(value),
            ByteOrder::LittleEndian => self.buf.put_i32_le(value),
        }
    }

    pub fn write_f64(&mut self, value: f64) {
        match self.order {
            ByteOrder::BigEndian => self.buf.put_f64(value),
            ByteOrder::LittleEndian => self.buf.put_f64_le(value),
        }
    }

    /// Flag byte followed by the type tag of `kind`.
    pub fn write_header(&mut self, kind: GeometryKind) {
        self.write_endianness();
        self.write_i32(kind.tag());
    }

    /// Element counts are small in practice; anything above i32::MAX is a caller bug.
    pub fn write_count(&mut self, count: usize) {
        debug_assert!(count <= i32::MAX as usize);
        self.write_i32(count as i32);
    }

    pub fn write_coords(&mut self, x: f64, y: f64) {
        self.write_f64(x);
        self.write_f64(y);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

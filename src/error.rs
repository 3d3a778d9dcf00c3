//! Error types for geometry construction, WKB decoding and WKT parsing.

use thiserror::Error;

/// Errors raised while building or decoding a geometry.
///
/// Decoded values go through the public constructors, so a malformed buffer
/// can also surface a construction variant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    // ---- construction ----
    /// A coordinate was NaN or infinite.
    #[error("Coordinates must be finite numbers, got ({x}, {y})")]
    NonFiniteCoordinate { x: f64, y: f64 },

    /// A LineString was given exactly one point.
    #[error("LineString can be either empty or contain 2 or more points")]
    SinglePointLineString,

    /// A Polygon ring was given exactly one point.
    #[error("Polygon ring {ring} can be either empty or contain 2 or more points")]
    SinglePointRing { ring: usize },

    /// A Circle radius was negative or not finite.
    #[error("Circle radius must be a non-negative finite number, got {0}")]
    InvalidRadius(f64),

    // ---- decode ----
    /// The leading byte-order flag was neither 0 nor 1.
    #[error("Invalid WKB byte order flag: {0}")]
    InvalidByteOrder(u8),

    /// Buffer is shorter than the minimal header of the shape.
    #[error("A {shape} buffer should contain at least {min} bytes, got {actual}")]
    BufferTooShort {
        shape: &'static str,
        min: usize,
        actual: usize,
    },

    /// A fixed-size shape received a buffer of the wrong size.
    #[error("A {shape} buffer should contain exactly {expected} bytes, got {actual}")]
    BufferLength {
        shape: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The element count declared in the buffer disagrees with its size.
    #[error("Length of the {shape} buffer does not match: {count} element(s) declared, expected {expected} bytes, got {actual}")]
    LengthMismatch {
        shape: &'static str,
        count: usize,
        expected: usize,
        actual: usize,
    },

    /// The 4-byte type tag is not the one this shape expects.
    #[error("Binary representation was not a {expected} (type tag {found})")]
    UnexpectedType { expected: &'static str, found: i32 },

    /// The type tag does not belong to any known shape.
    #[error("Unknown WKB geometry type tag {0}")]
    UnknownType(i32),

    /// A point or ring count was negative.
    #[error("Negative element count {0} in {1} buffer")]
    NegativeCount(i32, &'static str),

    /// A read ran past the end of the buffer.
    #[error("Unexpected end of buffer at offset {offset} (buffer is {len} bytes)")]
    Truncated { offset: usize, len: usize },

    /// A geometry of one shape was offered where another was required.
    #[error("Expected a {expected}, found a {found}")]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },

    // ---- text ----
    /// Text could not be parsed as WKT.
    #[error("Invalid WKT: {0}")]
    Wkt(String),

    /// JSON did not describe a geometry.
    #[error("Invalid geometry JSON: {0}")]
    Json(String),
}

/// Result alias for geometry operations.
pub type GeoResult<T> = Result<T, GeoError>;

impl GeoError {
    /// True for the errors raised while validating values in memory.
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            GeoError::NonFiniteCoordinate { .. }
                | GeoError::SinglePointLineString
                | GeoError::SinglePointRing { .. }
                | GeoError::InvalidRadius(_)
        )
    }

    /// True for errors describing a malformed wire buffer.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            GeoError::InvalidByteOrder(_)
                | GeoError::BufferTooShort { .. }
                | GeoError::BufferLength { .. }
                | GeoError::LengthMismatch { .. }
                | GeoError::UnexpectedType { .. }
                | GeoError::UnknownType(_)
                | GeoError::NegativeCount(..)
                | GeoError::Truncated { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeoError::SinglePointLineString;
        assert!(err.to_string().contains("2 or more points"));

        let err = GeoError::BufferLength { shape: "Point", expected: 21, actual: 20 };
        assert_eq!(err.to_string(), "A Point buffer should contain exactly 21 bytes, got 20");
    }

    #[test]
    fn test_error_classes() {
        assert!(GeoError::InvalidRadius(-1.0).is_construction());
        assert!(!GeoError::InvalidRadius(-1.0).is_decode());
        assert!(GeoError::InvalidByteOrder(7).is_decode());
        assert!(!GeoError::Wkt("x".into()).is_decode());
    }
}

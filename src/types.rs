//! Native protocol column type codes and DSE geospatial custom type names.
//!
//! Reference: CQL native protocol v4, section 6 ("option" type codes).

use crate::wkb::GeometryKind;

/// Column type codes.
#[allow(dead_code)]
pub mod type_code {
    /// Custom type: the option carries a fully-qualified class name.
    pub const CUSTOM: u16 = 0x0000;

    pub const ASCII: u16 = 0x0001;
    pub const BIGINT: u16 = 0x0002;
    pub const BLOB: u16 = 0x0003;
    pub const BOOLEAN: u16 = 0x0004;
    pub const COUNTER: u16 = 0x0005;
    pub const DECIMAL: u16 = 0x0006;
    pub const DOUBLE: u16 = 0x0007;
    pub const FLOAT: u16 = 0x0008;
    pub const INT: u16 = 0x0009;
    pub const TIMESTAMP: u16 = 0x000B;
    pub const UUID: u16 = 0x000C;
    pub const VARCHAR: u16 = 0x000D;
    pub const VARINT: u16 = 0x000E;
    pub const TIMEUUID: u16 = 0x000F;
    pub const INET: u16 = 0x0010;
    pub const DATE: u16 = 0x0011;
    pub const TIME: u16 = 0x0012;
    pub const SMALLINT: u16 = 0x0013;
    pub const TINYINT: u16 = 0x0014;

    pub const LIST: u16 = 0x0020;
    pub const MAP: u16 = 0x0021;
    pub const SET: u16 = 0x0022;
    pub const UDT: u16 = 0x0030;
    pub const TUPLE: u16 = 0x0031;
}

/// Fully-qualified names of the geospatial custom types.
pub mod type_name {
    pub const POINT: &str = "org.apache.cassandra.db.marshal.PointType";
    pub const LINE_STRING: &str = "org.apache.cassandra.db.marshal.LineStringType";
    pub const POLYGON: &str = "org.apache.cassandra.db.marshal.PolygonType";
    pub const CIRCLE: &str = "org.apache.cassandra.db.marshal.CircleType";
}

/// A column type as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnType {
    pub code: u16,
    /// Class name, only set for custom types.
    pub custom_name: Option<String>,
}

impl ColumnType {
    pub fn new(code: u16) -> Self {
        Self { code, custom_name: None }
    }

    pub fn custom(name: impl Into<String>) -> Self {
        Self {
            code: type_code::CUSTOM,
            custom_name: Some(name.into()),
        }
    }

    /// Custom type of the given shape.
    pub fn geometry(kind: GeometryKind) -> Self {
        Self::custom(kind_to_type_name(kind))
    }

    pub fn is_custom(&self) -> bool {
        self.code == type_code::CUSTOM
    }

    /// The class name, if this is a custom type.
    pub fn custom_type_name(&self) -> Option<&str> {
        if self.is_custom() { self.custom_name.as_deref() } else { None }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.custom_type_name() {
            Some(name) => write!(f, "custom({})", name),
            None => f.write_str(code_to_name(self.code)),
        }
    }
}

/// Custom type name for a shape.
pub fn kind_to_type_name(kind: GeometryKind) -> &'static str {
    match kind {
        GeometryKind::Point => type_name::POINT,
        GeometryKind::LineString => type_name::LINE_STRING,
        GeometryKind::Polygon => type_name::POLYGON,
        GeometryKind::Circle => type_name::CIRCLE,
    }
}

/// Map a type code to a human-readable name.
pub fn code_to_name(code: u16) -> &'static str {
    match code {
        type_code::CUSTOM => "custom",
        type_code::ASCII => "ascii",
        type_code::BIGINT => "bigint",
        type_code::BLOB => "blob",
        type_code::BOOLEAN => "boolean",
        type_code::COUNTER => "counter",
        type_code::DECIMAL => "decimal",
        type_code::DOUBLE => "double",
        type_code::FLOAT => "float",
        type_code::INT => "int",
        type_code::TIMESTAMP => "timestamp",
        type_code::UUID => "uuid",
        type_code::VARCHAR => "varchar",
        type_code::VARINT => "varint",
        type_code::TIMEUUID => "timeuuid",
        type_code::INET => "inet",
        type_code::DATE => "date",
        type_code::TIME => "time",
        type_code::SMALLINT => "smallint",
        type_code::TINYINT => "tinyint",
        type_code::LIST => "list",
        type_code::MAP => "map",
        type_code::SET => "set",
        type_code::UDT => "udt",
        type_code::TUPLE => "tuple",
        _ => "unknown",
    }
}

//! WKB codec for the DSE geospatial custom types.
//!
//! Point, LineString, Polygon and Circle values travel on the wire as custom
//! column types whose payload is (extended) Well-Known Binary. This crate
//! provides the validated value types, their WKB/WKT/JSON forms, and a
//! [`GeoCodec`] that plugs them into a host driver's codec by type name.
//!
//! # Example
//! ```
//! use dse_geometry::prelude::*;
//!
//! let line = LineString::new(vec![Point::new(0.0, 0.0)?, Point::new(1.0, 1.0)?])?;
//! let bytes = line.to_wkb();
//! assert_eq!(bytes.len(), 9 + 2 * 16);
//!
//! let decoded = Geometry::from_wkb(&bytes)?;
//! assert_eq!(decoded.to_string(), "LINESTRING (0 0, 1 1)");
//! # Ok::<(), dse_geometry::GeoError>(())
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod geometry;
pub mod types;
pub mod wkb;

pub use codec::{CodecRegistry, GeoCodec, GeometryValue, WireCodec};
pub use error::{GeoError, GeoResult};
pub use geometry::{Circle, GeoJson, Geometry, LineString, Point, Polygon, Shape};
pub use types::ColumnType;
pub use wkb::{ByteOrder, GeometryKind};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::codec::{CodecRegistry, GeoCodec, GeometryValue, WireCodec};
    pub use crate::error::{GeoError, GeoResult};
    pub use crate::geometry::{Circle, Geometry, LineString, Point, Polygon, Shape};
    pub use crate::types::{ColumnType, type_name};
    pub use crate::wkb::{ByteOrder, GeometryKind};
}

//! Custom type dispatch between a host wire codec and the geometry codecs.
//!
//! The host driver owns a generic [`WireCodec`]. [`GeoCodec`] wraps it:
//! - decode: a custom column whose class name is in the [`CodecRegistry`] is
//!   decoded as a geometry, anything else goes to the wrapped codec
//! - encode: a value holding a [`Geometry`] is written as WKB, anything else
//!   goes to the wrapped codec
//!
//! The registry is built once and shared read-only, so no locking is needed
//! on the hot path.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::error::{GeoError, GeoResult};
use crate::geometry::{Circle, Geometry, LineString, Point, Polygon, Shape};
use crate::types::{ColumnType, type_name};
use crate::wkb::GeometryKind;

/// Generic encoder/decoder pair provided by the host driver.
pub trait WireCodec {
    /// Host value type.
    type Value;
    /// Host error type. Geometry failures must convert into it.
    type Error: From<GeoError>;

    /// Decode a column value. `None` is a NULL cell.
    fn decode(&self, bytes: Option<&[u8]>, column: &ColumnType) -> Result<Self::Value, Self::Error>;

    /// Encode a value, optionally guided by the target column type.
    /// `Ok(None)` encodes NULL.
    fn encode(&self, value: &Self::Value, column: Option<&ColumnType>) -> Result<Option<Bytes>, Self::Error>;
}

/// Host values that can carry a geometry.
pub trait GeometryValue {
    fn as_geometry(&self) -> Option<&Geometry>;
    fn from_geometry(geometry: Geometry) -> Self;
}

type DecodeFn = fn(&[u8]) -> GeoResult<Geometry>;

fn decode_shape<T: Shape>(buf: &[u8]) -> GeoResult<Geometry> {
    T::from_wkb(buf).map(Into::into)
}

#[derive(Debug, Clone, Copy)]
struct Registration {
    kind: GeometryKind,
    decode: DecodeFn,
}

/// Custom type name → geometry codec.
#[derive(Debug, Clone, Default)]
pub struct CodecRegistry {
    codecs: HashMap<String, Registration>,
}

impl CodecRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with Point, LineString, Polygon and Circle installed.
    pub fn with_geometry_types() -> Self {
        let mut registry = Self::new();
        registry.install_geometry_types();
        registry
    }

    /// Register shape `T` under a custom type name.
    ///
    /// Returns `false` when the name was already registered; the existing
    /// registration is kept.
    pub fn register<T: Shape>(&mut self, type_name: impl Into<String>) -> bool {
        let type_name = type_name.into();
        if self.codecs.contains_key(&type_name) {
            trace!(%type_name, "custom type already registered");
            return false;
        }
        debug!(%type_name, kind = %T::KIND, "registering geometry codec");
        self.codecs.insert(
            type_name,
            Registration {
                kind: T::KIND,
                decode: decode_shape::<T>,
            },
        );
        true
    }

    /// Install the DSE geospatial types. Calling this again is a no-op.
    ///
    /// Returns whether anything was newly installed.
    pub fn install_geometry_types(&mut self) -> bool {
        let mut installed = false;
        installed |= self.register::<Point>(type_name::POINT);
        installed |= self.register::<LineString>(type_name::LINE_STRING);
        installed |= self.register::<Polygon>(type_name::POLYGON);
        installed |= self.register::<Circle>(type_name::CIRCLE);
        installed
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.codecs.contains_key(type_name)
    }

    /// Shape registered under `type_name`.
    pub fn kind_of(&self, type_name: &str) -> Option<GeometryKind> {
        self.codecs.get(type_name).map(|r| r.kind)
    }

    /// Registered names, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.codecs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    /// Decode `buf` as the custom type `type_name`.
    ///
    /// `None` means the name is not registered.
    pub fn decode(&self, type_name: &str, buf: &[u8]) -> Option<GeoResult<Geometry>> {
        self.codecs.get(type_name).map(|r| (r.decode)(buf))
    }

    /// Encode `geometry` for the custom type `type_name`.
    ///
    /// `None` means the name is not registered. A registered name whose shape
    /// differs from the geometry's fails with [`GeoError::KindMismatch`].
    pub fn encode(&self, type_name: &str, geometry: &Geometry) -> Option<GeoResult<Bytes>> {
        self.codecs.get(type_name).map(|r| {
            if r.kind != geometry.kind() {
                return Err(GeoError::KindMismatch {
                    expected: r.kind.name(),
                    found: geometry.kind().name(),
                });
            }
            Ok(geometry.to_wkb())
        })
    }
}

/// Wraps a host [`WireCodec`] with geometry support.
pub struct GeoCodec<B> {
    base: B,
    registry: Arc<CodecRegistry>,
}

impl<B> GeoCodec<B>
where
    B: WireCodec,
    B::Value: GeometryValue,
{
    /// Wrap `base` with the default geospatial registry.
    pub fn new(base: B) -> Self {
        Self::with_registry(base, Arc::new(CodecRegistry::with_geometry_types()))
    }

    /// Wrap `base` with a shared, pre-built registry.
    pub fn with_registry(base: B, registry: Arc<CodecRegistry>) -> Self {
        Self { base, registry }
    }

    pub fn base(&self) -> &B {
        &self.base
    }

    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    pub fn into_inner(self) -> B {
        self.base
    }
}

impl<B> WireCodec for GeoCodec<B>
where
    B: WireCodec,
    B::Value: GeometryValue,
{
    type Value = B::Value;
    type Error = B::Error;

    fn decode(&self, bytes: Option<&[u8]>, column: &ColumnType) -> Result<Self::Value, Self::Error> {
        if let (Some(buf), Some(name)) = (bytes, column.custom_type_name()) {
            if let Some(result) = self.registry.decode(name, buf) {
                trace!(type_name = name, len = buf.len(), "decoding geometry column");
                return Ok(B::Value::from_geometry(result?));
            }
        }
        trace!(column = %column, "delegating decode to base codec");
        self.base.decode(bytes, column)
    }

    fn encode(&self, value: &Self::Value, column: Option<&ColumnType>) -> Result<Option<Bytes>, Self::Error> {
        let Some(geometry) = value.as_geometry() else {
            return self.base.encode(value, column);
        };
        let by_name = column
            .and_then(ColumnType::custom_type_name)
            .and_then(|name| self.registry.encode(name, geometry));
        match by_name {
            Some(result) => Ok(Some(result?)),
            None => Ok(Some(geometry.to_wkb())),
        }
    }
}

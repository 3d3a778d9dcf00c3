//! End-to-end tests for the geometry codecs and the custom type dispatcher.

use bytes::Bytes;
use pretty_assertions::assert_eq;
use serde_json::json;

use dse_geometry::prelude::*;
use dse_geometry::types::type_code;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y).unwrap()
}

fn shapes() -> Vec<Geometry> {
    vec![
        pt(1.5, -2.25).into(),
        LineString::empty().into(),
        LineString::new(vec![pt(0.0, 0.0), pt(1.0, 1.0), pt(2.0, 2.0)]).unwrap().into(),
        Polygon::empty().into(),
        Polygon::new(vec![
            vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0), pt(0.0, 10.0), pt(0.0, 0.0)],
            vec![pt(2.0, 2.0), pt(3.0, 2.0), pt(3.0, 3.0), pt(2.0, 2.0)],
        ])
        .unwrap()
        .into(),
        Circle::new(pt(-73.98, 40.75), 0.5).unwrap().into(),
    ]
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_point_scenario() {
    let buf = Point::new(1.5, -2.25).unwrap().to_wkb();
    let p = Point::from_wkb(&buf).unwrap();
    assert_eq!(p.x(), 1.5);
    assert_eq!(p.y(), -2.25);
}

#[test]
fn test_line_string_scenario() {
    let line = LineString::new(vec![pt(0.0, 0.0), pt(1.0, 1.0), pt(2.0, 2.0)]).unwrap();
    let decoded = LineString::from_wkb(&line.to_wkb()).unwrap();
    assert_eq!(decoded, line);
    assert_eq!(decoded.to_string(), "LINESTRING (0 0, 1 1, 2 2)");
    assert_eq!(LineString::new(vec![]).unwrap().to_string(), "LINESTRING EMPTY");
}

#[test]
fn test_encoded_lengths() {
    assert_eq!(pt(3.0, 4.0).to_wkb().len(), 21);
    for n in [0usize, 2, 3, 17] {
        let points = (0..n).map(|i| pt(i as f64, -(i as f64))).collect();
        assert_eq!(LineString::new(points).unwrap().to_wkb().len(), 9 + 16 * n);
    }
    assert_eq!(Circle::from_coords(0.0, 0.0, 1.0).unwrap().to_wkb().len(), 29);
}

#[test]
fn test_rejections() {
    let point_buf = pt(1.0, 2.0).to_wkb();
    assert!(Point::from_wkb(&point_buf[..20]).unwrap_err().is_decode());

    let line = LineString::new(vec![pt(0.0, 0.0), pt(1.0, 1.0)]).unwrap();
    let mut buf = line.to_wkb().to_vec();
    buf.extend_from_slice(&[0u8; 16]);
    assert!(matches!(
        LineString::from_wkb(&buf),
        Err(GeoError::LengthMismatch { count: 2, .. })
    ));

    assert_eq!(
        LineString::new(vec![pt(1.0, 1.0)]),
        Err(GeoError::SinglePointLineString)
    );
    assert_eq!(
        Circle::new(pt(0.0, 0.0), -1.0),
        Err(GeoError::InvalidRadius(-1.0))
    );
}

#[test]
fn test_invalid_byte_order_flag() {
    let mut buf = pt(1.0, 2.0).to_wkb().to_vec();
    buf[0] = 2;
    assert_eq!(Point::from_wkb(&buf), Err(GeoError::InvalidByteOrder(2)));
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_round_trip_both_orders() {
    for shape in shapes() {
        let big = shape.to_wkb_with(ByteOrder::BigEndian);
        let little = shape.to_wkb_with(ByteOrder::LittleEndian);
        assert_eq!(big[0], 0);
        assert_eq!(little[0], 1);
        assert_eq!(big.len(), little.len());
        assert_eq!(Geometry::from_wkb(&big).unwrap(), shape);
        assert_eq!(Geometry::from_wkb(&little).unwrap(), shape);
        assert_eq!(Geometry::from_wkb(&shape.to_wkb()).unwrap(), shape);
    }
}

#[test]
fn test_big_endian_golden_bytes() {
    let buf = pt(1.0, 2.0).to_wkb_with(ByteOrder::BigEndian);
    let mut expected = vec![0u8, 0, 0, 0, 1];
    expected.extend_from_slice(&1.0f64.to_be_bytes());
    expected.extend_from_slice(&2.0f64.to_be_bytes());
    assert_eq!(buf.to_vec(), expected);
}

#[test]
fn test_wkt_round_trip() {
    for shape in shapes() {
        let text = shape.to_string();
        assert_eq!(text.parse::<Geometry>().unwrap(), shape, "{}", text);
    }
}

#[test]
fn test_json_round_trip() {
    for shape in shapes() {
        let value = serde_json::to_value(&shape).unwrap();
        assert_eq!(value, shape.to_json());
        let back: Geometry = serde_json::from_value(value).unwrap();
        assert_eq!(back, shape);

        let text = serde_json::to_string(&shape).unwrap();
        let parsed: Geometry = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, shape, "{}", text);
    }
}

#[test]
fn test_json_text_keeps_every_bit() {
    let coords = [1.0715660391465826e-75, 0.1 + 0.2, -123.456789012345678, 5e-324, 1.7976931348623157e308];
    for &x in &coords {
        let p = pt(x, -x);
        let text = serde_json::to_string(&p).unwrap();
        let back: Point = serde_json::from_str(&text).unwrap();
        assert_eq!(back.x().to_bits(), x.to_bits(), "{}", text);
        assert_eq!(back.y().to_bits(), (-x).to_bits(), "{}", text);
    }
}

#[test]
fn test_polygon_json_form() {
    let polygon = Polygon::new(vec![vec![pt(0.0, 0.0), pt(1.0, 0.0), pt(0.0, 0.0)]]).unwrap();
    assert_eq!(
        polygon.to_json(),
        json!({ "type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]] })
    );
    assert_eq!(polygon.to_string(), "POLYGON ((0 0, 1 0, 0 0))");
}

// ============================================================================
// Dispatcher
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Value {
    Null,
    Int(i32),
    Raw(Vec<u8>),
    Geo(Geometry),
}

impl GeometryValue for Value {
    fn as_geometry(&self) -> Option<&Geometry> {
        match self {
            Value::Geo(g) => Some(g),
            _ => None,
        }
    }

    fn from_geometry(geometry: Geometry) -> Self {
        Value::Geo(geometry)
    }
}

#[derive(Debug)]
enum DriverError {
    Geo(GeoError),
    Unsupported,
}

impl From<GeoError> for DriverError {
    fn from(e: GeoError) -> Self {
        DriverError::Geo(e)
    }
}

/// Minimal host codec: ints are 4-byte big endian, everything else raw.
struct HostCodec;

impl WireCodec for HostCodec {
    type Value = Value;
    type Error = DriverError;

    fn decode(&self, bytes: Option<&[u8]>, column: &ColumnType) -> Result<Value, DriverError> {
        let Some(bytes) = bytes else {
            return Ok(Value::Null);
        };
        if column.code == type_code::INT {
            let raw: [u8; 4] = bytes.try_into().map_err(|_| DriverError::Unsupported)?;
            return Ok(Value::Int(i32::from_be_bytes(raw)));
        }
        Ok(Value::Raw(bytes.to_vec()))
    }

    fn encode(&self, value: &Value, _column: Option<&ColumnType>) -> Result<Option<Bytes>, DriverError> {
        match value {
            Value::Null => Ok(None),
            Value::Int(i) => Ok(Some(Bytes::copy_from_slice(&i.to_be_bytes()))),
            Value::Raw(b) => Ok(Some(Bytes::copy_from_slice(b))),
            Value::Geo(_) => Err(DriverError::Unsupported),
        }
    }
}

#[test]
fn test_dispatch_decodes_every_shape() {
    let codec = GeoCodec::new(HostCodec);
    for shape in shapes() {
        let column = ColumnType::geometry(shape.kind());
        let decoded = codec.decode(Some(&shape.to_wkb()[..]), &column).unwrap();
        assert_eq!(decoded, Value::Geo(shape));
    }
}

#[test]
fn test_dispatch_encodes_every_shape() {
    let codec = GeoCodec::new(HostCodec);
    for shape in shapes() {
        let column = ColumnType::geometry(shape.kind());
        let with_hint = codec.encode(&Value::Geo(shape.clone()), Some(&column)).unwrap();
        let without = codec.encode(&Value::Geo(shape.clone()), None).unwrap();
        assert_eq!(with_hint, Some(shape.to_wkb()));
        assert_eq!(without, with_hint);
    }
}

#[test]
fn test_dispatch_transparency() {
    let codec = GeoCodec::new(HostCodec);
    let columns = [
        ColumnType::new(type_code::INT),
        ColumnType::new(type_code::BLOB),
        ColumnType::custom("org.apache.cassandra.db.marshal.DateRangeType"),
    ];
    let payload = 42i32.to_be_bytes();
    for column in &columns {
        assert_eq!(
            codec.decode(Some(&payload[..]), column).unwrap(),
            HostCodec.decode(Some(&payload[..]), column).unwrap()
        );
        assert_eq!(
            codec.decode(None, column).unwrap(),
            HostCodec.decode(None, column).unwrap()
        );
    }

    for value in [Value::Null, Value::Int(7), Value::Raw(vec![1, 2, 3])] {
        assert_eq!(
            codec.encode(&value, Some(&columns[0])).unwrap(),
            HostCodec.encode(&value, Some(&columns[0])).unwrap()
        );
    }
}

#[test]
fn test_dispatch_decode_error_surfaces() {
    let codec = GeoCodec::new(HostCodec);
    let column = ColumnType::custom(type_name::LINE_STRING);
    let mut buf = LineString::new(vec![pt(0.0, 0.0), pt(1.0, 1.0)]).unwrap().to_wkb().to_vec();
    buf.truncate(buf.len() - 1);
    match codec.decode(Some(&buf[..]), &column) {
        Err(DriverError::Geo(e)) => assert!(e.is_decode()),
        other => panic!("expected a decode error, got {:?}", other),
    }
}

#[test]
fn test_registry_install_once() {
    let mut registry = CodecRegistry::new();
    assert!(registry.install_geometry_types());
    assert!(!registry.install_geometry_types());
    assert_eq!(
        registry.type_names(),
        vec![
            "org.apache.cassandra.db.marshal.CircleType",
            "org.apache.cassandra.db.marshal.LineStringType",
            "org.apache.cassandra.db.marshal.PointType",
            "org.apache.cassandra.db.marshal.PolygonType",
        ]
    );
    assert!(registry.contains(type_name::CIRCLE));
    assert!(!registry.contains("org.apache.cassandra.db.marshal.UTF8Type"));
}

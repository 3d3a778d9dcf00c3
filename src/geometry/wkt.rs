//! WKT parsing for the text forms the shapes render.
//!
//! Accepted grammar (keywords case-insensitive, whitespace flexible):
//! ```text
//! POINT (x y)
//! LINESTRING EMPTY | LINESTRING (x y, x y, ...)
//! POLYGON EMPTY    | POLYGON ((x y, ...), (x y, ...))
//! CIRCLE ((x y) r)
//! ```
//! No Z/M ordinates, no multi-geometries, no SRID prefix.

use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{char, multispace0, multispace1};
use nom::combinator::{all_consuming, map, value};
use nom::multi::{separated_list0, separated_list1};
use nom::number::complete::double;
use nom::sequence::{delimited, pair, preceded, separated_pair};

use super::{Circle, Geometry, LineString, Point, Polygon, Shape};
use crate::error::{GeoError, GeoResult};

type Coord = (f64, f64);

/// Parsed but not yet validated geometry.
#[derive(Debug, Clone, PartialEq)]
enum RawWkt {
    Point(Coord),
    LineString(Vec<Coord>),
    Polygon(Vec<Vec<Coord>>),
    Circle(Coord, f64),
}

/// Parse any supported shape.
pub(crate) fn parse(input: &str) -> GeoResult<Geometry> {
    let (_, raw) = all_consuming(delimited(multispace0, geometry, multispace0))(input)
        .map_err(|e| match e {
            nom::Err::Error(e) | nom::Err::Failure(e) => {
                GeoError::Wkt(format!("unexpected input at {:?}", truncate(e.input)))
            }
            nom::Err::Incomplete(_) => GeoError::Wkt("incomplete input".to_string()),
        })?;
    build(raw)
}

/// Parse one specific shape.
pub(crate) fn parse_shape<T: Shape>(input: &str) -> GeoResult<T> {
    T::try_from(parse(input)?)
}

fn build(raw: RawWkt) -> GeoResult<Geometry> {
    let points = |coords: Vec<Coord>| -> GeoResult<Vec<Point>> {
        coords.into_iter().map(|(x, y)| Point::new(x, y)).collect()
    };
    Ok(match raw {
        RawWkt::Point((x, y)) => Point::new(x, y)?.into(),
        RawWkt::LineString(coords) => LineString::new(points(coords)?)?.into(),
        RawWkt::Polygon(rings) => {
            let rings = rings.into_iter().map(points).collect::<GeoResult<Vec<_>>>()?;
            Polygon::new(rings)?.into()
        }
        RawWkt::Circle((x, y), r) => Circle::from_coords(x, y, r)?.into(),
    })
}

fn truncate(s: &str) -> &str {
    match s.char_indices().nth(24) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// ============================================================================
// Grammar
// ============================================================================

fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn parens<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(ws(char('(')), inner, ws(char(')')))
}

fn coord(input: &str) -> IResult<&str, Coord> {
    separated_pair(double, multispace1, double)(input)
}

fn coord_list(input: &str) -> IResult<&str, Vec<Coord>> {
    separated_list1(ws(char(',')), ws(coord))(input)
}

fn empty<T: Clone + Default>(input: &str) -> IResult<&str, T> {
    value(T::default(), ws(tag_no_case("EMPTY")))(input)
}

fn point(input: &str) -> IResult<&str, RawWkt> {
    map(preceded(tag_no_case("POINT"), parens(ws(coord))), RawWkt::Point)(input)
}

fn line_string(input: &str) -> IResult<&str, RawWkt> {
    map(
        preceded(tag_no_case("LINESTRING"), alt((empty::<Vec<Coord>>, parens(coord_list)))),
        RawWkt::LineString,
    )(input)
}

fn ring(input: &str) -> IResult<&str, Vec<Coord>> {
    parens(separated_list0(ws(char(',')), ws(coord)))(input)
}

fn polygon(input: &str) -> IResult<&str, RawWkt> {
    map(
        preceded(
            tag_no_case("POLYGON"),
            alt((empty::<Vec<Vec<Coord>>>, parens(separated_list1(ws(char(',')), ring)))),
        ),
        RawWkt::Polygon,
    )(input)
}

fn circle(input: &str) -> IResult<&str, RawWkt> {
    map(
        preceded(tag_no_case("CIRCLE"), parens(pair(parens(ws(coord)), ws(double)))),
        |(center, radius)| RawWkt::Circle(center, radius),
    )(input)
}

fn geometry(input: &str) -> IResult<&str, RawWkt> {
    alt((point, line_string, polygon, circle))(input)
}

//! Parse pest pairs into geometry values.

use miette::NamedSource;
use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::Pair;

use crate::dispatch::Geometry;
use crate::errors::WktError;
use crate::geom::{MultiPoint, MultiPolyline, Point, Poly};
use crate::log::debug;

use super::{Rule, WktParser};

/// Parses one WKT geometry from `source`.
pub fn parse(source: &str) -> Result<Geometry, WktError> {
    let mut pairs =
        WktParser::parse(Rule::wkt, source).map_err(|e| syntax_error(source, &e))?;

    // Grammar shape: wkt > geometry > concrete kind.
    let geometry = pairs
        .next()
        .and_then(|wkt| wkt.into_inner().next())
        .and_then(|g| g.into_inner().next());

    let Some(inner) = geometry else {
        return Err(WktError::Syntax {
            src: NamedSource::new("wkt", source.to_string()),
            span: (0, source.len()).into(),
            message: "empty input".into(),
        });
    };

    debug!("parsed wkt kind: {:?}", inner.as_rule());

    Ok(match inner.as_rule() {
        Rule::point => parse_point(inner).into(),
        Rule::linestring => parse_linestring(inner).into(),
        Rule::multipoint => parse_multipoint(inner).into(),
        Rule::multilinestring => parse_multilinestring(inner).into(),
        _ => unreachable!("geometry rule covers all kinds"),
    })
}

fn parse_point(pair: Pair<Rule>) -> Point {
    parse_coord(pair.into_inner().next().expect("point holds one coord"))
}

fn parse_linestring(pair: Pair<Rule>) -> Poly {
    let coords = pair.into_inner().next().expect("linestring holds a coord list");
    Poly::polyline(parse_coord_list(coords))
}

fn parse_multipoint(pair: Pair<Rule>) -> MultiPoint {
    let style = pair.into_inner().next().expect("multipoint holds a list");

    let points = match style.as_rule() {
        Rule::coord_list => parse_coord_list(style),
        Rule::paren_coord_list => style
            .into_inner()
            .map(|paren| {
                parse_coord(paren.into_inner().next().expect("paren holds one coord"))
            })
            .collect(),
        _ => unreachable!("multipoint styles are exhaustive"),
    };

    MultiPoint::new(points)
}

fn parse_multilinestring(pair: Pair<Rule>) -> MultiPolyline {
    MultiPolyline::new(
        pair.into_inner()
            .map(|group| {
                let coords = group.into_inner().next().expect("group holds a coord list");
                Poly::polyline(parse_coord_list(coords))
            })
            .collect(),
    )
}

fn parse_coord_list(pair: Pair<Rule>) -> Vec<Point> {
    pair.into_inner().map(parse_coord).collect()
}

fn parse_coord(pair: Pair<Rule>) -> Point {
    let mut numbers = pair.into_inner();
    let x = parse_number(numbers.next().expect("coord holds two numbers"));
    let y = parse_number(numbers.next().expect("coord holds two numbers"));

    Point::new(x, y)
}

fn parse_number(pair: Pair<Rule>) -> f64 {
    // The grammar only admits well-formed decimal literals.
    pair.as_str().parse().expect("grammar-validated number")
}

fn syntax_error(source: &str, e: &pest::error::Error<Rule>) -> WktError {
    let span = match e.location {
        InputLocation::Pos(pos) => {
            let pos = pos.min(source.len());
            (pos, (source.len() - pos).min(1)).into()
        }
        InputLocation::Span((start, end)) => (start, end - start).into(),
    };

    WktError::Syntax {
        src: NamedSource::new("wkt", source.to_string()),
        span,
        message: e.variant.message().into_owned(),
    }
}

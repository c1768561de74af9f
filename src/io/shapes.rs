// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shape file parsing and serialization.
//!
//! One polygon per non-empty line, `x1,y1;x2,y2;x3,y3`, coordinates as
//! floats or integers. The grammar is strict on purpose: shape files come
//! from the user and must never be evaluated as anything but numbers.

use crate::models::shape::{Point, Polygon};
use std::path::Path;
use thiserror::Error;

/// Shape file load/parse failure. Carries the 1-based line number so the
/// error dialog can point at the offending line.
#[derive(Debug, Error)]
pub enum ShapeParseError {
    #[error("could not read shape file: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: malformed coordinate pair '{pair}'")]
    MalformedPair { line: usize, pair: String },

    #[error("line {line}: invalid number '{value}'")]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: polygon has {count} points, need at least 3")]
    TooFewPoints { line: usize, count: usize },
}

/// Load and parse a shape file. The returned list replaces the caller's
/// collection only on success; any error leaves the prior collection to
/// the caller, untouched.
pub fn load(path: &Path) -> Result<Vec<Polygon>, ShapeParseError> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

/// Parse shape-file text. Empty and whitespace-only lines are skipped;
/// every other line must match the grammar exactly.
pub fn parse(text: &str) -> Result<Vec<Polygon>, ShapeParseError> {
    let mut polygons = Vec::new();

    for (line_idx, line) in text.lines().enumerate() {
        let line_no = line_idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut points = Vec::new();
        for pair in trimmed.split(';') {
            let pair = pair.trim();
            let Some((x_str, y_str)) = pair.split_once(',') else {
                return Err(ShapeParseError::MalformedPair {
                    line: line_no,
                    pair: pair.to_string(),
                });
            };
            // A second comma means the pair is not a pair.
            if y_str.contains(',') {
                return Err(ShapeParseError::MalformedPair {
                    line: line_no,
                    pair: pair.to_string(),
                });
            }
            let x = parse_number(x_str, line_no)?;
            let y = parse_number(y_str, line_no)?;
            points.push(Point::new(x, y));
        }

        let count = points.len();
        match Polygon::new(points) {
            Some(polygon) => polygons.push(polygon),
            None => {
                return Err(ShapeParseError::TooFewPoints {
                    line: line_no,
                    count,
                })
            }
        }
    }

    Ok(polygons)
}

/// Serialize polygons back to the shape-file grammar, one per line.
pub fn serialize(polygons: &[Polygon]) -> String {
    polygons
        .iter()
        .map(|polygon| {
            polygon
                .points()
                .iter()
                .map(|p| format!("{},{}", p.x, p.y))
                .collect::<Vec<_>>()
                .join(";")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_number(s: &str, line: usize) -> Result<f64, ShapeParseError> {
    let s = s.trim();
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ShapeParseError::InvalidNumber {
            line,
            value: s.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_square() {
        let polygons = parse("10,10;90,10;90,90;10,90").unwrap();
        assert_eq!(polygons.len(), 1);
        let points = polygons[0].points();
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], Point::new(10.0, 10.0));
        assert_eq!(points[2], Point::new(90.0, 90.0));
    }

    #[test]
    fn test_parse_floats_and_blank_lines() {
        let text = "1.5,2.25;3,4;5.0,6\n\n  \n7,8;9,10;11,12\n";
        let polygons = parse(text).unwrap();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0].points()[0], Point::new(1.5, 2.25));
    }

    #[test]
    fn test_roundtrip_preserves_point_order() {
        let text = "10,10;90,10;90,90;10,90\n0.5,1.5;2,3;4,5";
        let polygons = parse(text).unwrap();
        let reparsed = parse(&serialize(&polygons)).unwrap();
        assert_eq!(polygons, reparsed);
    }

    #[test]
    fn test_malformed_line_is_an_error() {
        let err = parse("not,a,shape").unwrap_err();
        assert!(matches!(err, ShapeParseError::MalformedPair { line: 1, .. }));
    }

    #[test]
    fn test_invalid_number_reports_line() {
        let err = parse("1,2;3,4;5,6\n1,x;3,4;5,6").unwrap_err();
        match err {
            ShapeParseError::InvalidNumber { line, value } => {
                assert_eq!(line, 2);
                assert_eq!(value, "x");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_too_few_points() {
        let err = parse("1,2;3,4").unwrap_err();
        assert!(matches!(
            err,
            ShapeParseError::TooFewPoints { line: 1, count: 2 }
        ));
    }

    #[test]
    fn test_nan_and_infinity_rejected() {
        assert!(parse("NaN,1;2,3;4,5").is_err());
        assert!(parse("inf,1;2,3;4,5").is_err());
    }

    #[test]
    fn test_error_leaves_callers_collection_alone() {
        use crate::models::shape::ShapeSet;

        let mut set = ShapeSet::new();
        set.replace(parse("10,10;90,10;90,90;10,90").unwrap());
        assert_eq!(set.len(), 1);

        // Load-on-success discipline: a parse error never reaches replace().
        if let Ok(polygons) = parse("not,a,shape") {
            set.replace(polygons);
        }
        assert_eq!(set.len(), 1);
    }
}

use std::num::ParseFloatError;

use geo::Point;
use thiserror::Error;

/// Errors that can occur while decoding coordinate text
#[derive(Error, Debug, PartialEq)]
pub enum ParseCoordinatesError {
    /// The value does not contain both a latitude and a longitude token
    #[error("coordinate value `{0}' does not contain a latitude/longitude pair")]
    MissingOrdinate(String),

    /// A latitude or longitude token is not a valid floating point number
    #[error("invalid floating point number in coordinate value")]
    InvalidNumber(#[from] ParseFloatError),
}

/// Decodes a stored point value into a position. The value consists of
/// whitespace-separated floating point tokens, latitude first, then
/// longitude. Surplus tokens (altitude and accuracy, present in real survey
/// data) are ignored.
pub fn parse_point(value: &str) -> Result<Point<f64>, ParseCoordinatesError> {
    let mut tokens = value.split_whitespace();
    let (Some(lat), Some(lng)) = (tokens.next(), tokens.next()) else {
        return Err(ParseCoordinatesError::MissingOrdinate(value.to_string()));
    };
    let lat = lat.parse::<f64>()?;
    let lng = lng.parse::<f64>()?;
    Ok(Point::new(lng, lat))
}

/// Decodes a stored trace or shape value into its ordered vertex positions.
/// Vertices are separated by `;'; whitespace around a vertex and empty
/// trailing segments are discarded, so `"1.0 2.0; "' decodes like
/// `"1.0 2.0;"'.
pub fn parse_vertices(value: &str) -> Result<Vec<Point<f64>>, ParseCoordinatesError> {
    value
        .split(';')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(parse_point)
        .collect()
}

#[cfg(test)]
mod tests {
    use assertor::{assert_that, EqualityAssertion, VecAssertion};
    use geo::Point;

    use super::{parse_point, parse_vertices, ParseCoordinatesError};

    /// Decode a plain latitude/longitude pair
    #[test]
    fn point() {
        let p = parse_point("9.05 7.32").unwrap();
        assert_that!(p).is_equal_to(Point::new(7.32, 9.05));
    }

    /// Altitude and accuracy tokens are ignored
    #[test]
    fn point_with_altitude_and_accuracy() {
        let p = parse_point("9.05 7.32 12.0 4.5").unwrap();
        assert_that!(p).is_equal_to(Point::new(7.32, 9.05));
    }

    #[test]
    fn point_missing_ordinate() {
        let err = parse_point("9.05").unwrap_err();
        assert!(matches!(err, ParseCoordinatesError::MissingOrdinate(_)));

        let err = parse_point("").unwrap_err();
        assert!(matches!(err, ParseCoordinatesError::MissingOrdinate(_)));
    }

    #[test]
    fn point_not_a_number() {
        let err = parse_point("nine seven").unwrap_err();
        assert!(matches!(err, ParseCoordinatesError::InvalidNumber(_)));
    }

    /// Decode an ordered vertex list
    #[test]
    fn vertices() {
        let v = parse_vertices("1.0 2.0;3.0 4.0").unwrap();
        assert_that!(v).is_equal_to(vec![Point::new(2.0, 1.0), Point::new(4.0, 3.0)]);
    }

    /// A trailing `"; "' separator decodes to the same sequence as `";"'
    #[test]
    fn vertices_trailing_separator() {
        let plain = parse_vertices("1.0 2.0;3.0 4.0").unwrap();
        let trailing = parse_vertices("1.0 2.0; 3.0 4.0; ").unwrap();
        assert_that!(trailing).is_equal_to(plain);
    }

    #[test]
    fn vertices_malformed_vertex() {
        assert!(parse_vertices("1.0 2.0;oops").is_err());
    }

    #[test]
    fn vertices_empty() {
        assert_that!(parse_vertices("").unwrap()).has_length(0);
    }
}

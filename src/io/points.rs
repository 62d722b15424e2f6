//! Categorical point-file parsing: `spec.md` §6.
//!
//! Grounded line-for-line on `parse_input.cpp`'s `parseCatPoints`: one point
//! per line, three whitespace-separated tokens (`category x y`), y negated
//! on load to match the screen-coordinate convention the rest of the crate
//! assumes. A blank or otherwise empty line ends parsing (the original's
//! `parts.size() <= 1` check, there to tolerate a trailing newline); any
//! other line that doesn't split into exactly three tokens is an error.

use crate::error::{InputError, Result};
use crate::pattern::CatPoint;

/// Parses `text` into categorical points, one per line.
///
/// # Errors
///
/// Returns [`InputError::MalformedPointLine`] if a non-trailing line does
/// not split into exactly three tokens, or [`InputError::CategoryParse`]/
/// [`InputError::NumberParse`] if a token fails to parse.
pub fn parse_categorical_points(text: &str) -> Result<Vec<CatPoint>> {
    let mut points = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() <= 1 {
            break;
        }
        if tokens.len() != 3 {
            return Err(InputError::MalformedPointLine {
                line: i + 1,
                found: tokens.len(),
            }
            .into());
        }
        let category = tokens[0]
            .parse::<u32>()
            .map_err(|source| InputError::CategoryParse { line: i + 1, source })?;
        let x = tokens[1]
            .parse::<f64>()
            .map_err(|source| InputError::NumberParse { line: i + 1, source })?;
        let y = tokens[2]
            .parse::<f64>()
            .map_err(|source| InputError::NumberParse { line: i + 1, source })?;
        points.push(CatPoint::from_f64(category, x, -y));
    }
    Ok(points)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_points_and_negates_y() {
        let text = "0 1.5 2.0\n1 -3.0 4.5\n";
        let points = parse_categorical_points(text).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].category, 0);
        assert!((points[0].approx().x - 1.5).abs() < 1e-9);
        assert!((points[0].approx().y + 2.0).abs() < 1e-9);
        assert_eq!(points[1].category, 1);
    }

    #[test]
    fn stops_at_blank_line() {
        let text = "0 1.0 1.0\n\n1 2.0 2.0\n";
        let points = parse_categorical_points(text).unwrap();
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn rejects_wrong_token_count() {
        let text = "0 1.0 1.0 extra\n";
        assert!(parse_categorical_points(text).is_err());
    }

    #[test]
    fn rejects_unparseable_category() {
        let text = "notanumber 1.0 1.0\n";
        assert!(parse_categorical_points(text).is_err());
    }

    #[test]
    fn empty_input_yields_no_points() {
        assert!(parse_categorical_points("").unwrap().is_empty());
    }
}

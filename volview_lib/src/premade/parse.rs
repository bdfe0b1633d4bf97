//! Text format of color maps
//!
//! ```text
//! # comment
//! name: sunset
//! 0.0 0.0 0.2
//! 0.9 0.4 0.1 1.0
//! ```
//!
//! One `r g b [a]` row per sample, channels in <0;1>, alpha defaults to 1.
//! Rows are spread evenly over the sample range.

use std::path::Path;

use nom::{
    bytes::complete::tag,
    character::complete::{char, not_line_ending, space0, space1},
    combinator::{eof, opt},
    number::complete::float,
    sequence::{preceded, terminated, tuple},
    IResult,
};

use crate::{
    color::{self, RGBA},
    error::ColorMapError,
    transfer::ColorMap,
};

/// Read color map from file
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ColorMap, ColorMapError> {
    let text = std::fs::read_to_string(path)?;
    parse_color_map(&text)
}

/// Parse color map text
///
/// Errors carry the 1-based line number.
pub fn parse_color_map(text: &str) -> Result<ColorMap, ColorMapError> {
    let mut name = None;
    let mut samples = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match name {
            None => {
                let (_, parsed) =
                    name_line(line).map_err(|_| ColorMapError::Parse { line: line_number })?;
                if parsed.is_empty() {
                    return Err(ColorMapError::Parse { line: line_number });
                }
                name = Some(parsed.to_string());
            }
            Some(_) => {
                let (_, sample) =
                    color_row(line).map_err(|_| ColorMapError::Parse { line: line_number })?;
                samples.push(sample);
            }
        }
    }

    match name {
        Some(name) => ColorMap::new(name, &samples),
        None => Err(ColorMapError::Parse {
            line: text.lines().count().max(1),
        }),
    }
}

fn name_line(s: &str) -> IResult<&str, &str> {
    let (s, name) = preceded(
        tuple((tag("name"), space0, char(':'), space0)),
        not_line_ending,
    )(s)?;
    Ok((s, name.trim()))
}

fn color_row(s: &str) -> IResult<&str, RGBA> {
    let (s, (r, _, g, _, b, a)) = terminated(
        tuple((
            float,
            space1,
            float,
            space1,
            float,
            opt(preceded(space1, float)),
        )),
        tuple((space0, eof)),
    )(s)?;
    Ok((s, color::new(r, g, b, a.unwrap_or(1.0))))
}

#[cfg(test)]
mod test {

    use crate::error::ColorMapError;

    use super::*;

    const SUNSET: &str = "# warm colors
name: sunset

0.0 0.0 0.2
0.9 0.4 0.1 0.5
";

    #[test]
    fn parse_rows() {
        let map = parse_color_map(SUNSET).unwrap();

        assert_eq!(map.name(), "sunset");
        assert_eq!(map.samples().len(), 4096);
        assert_eq!(map.samples()[0], color::new(0.0, 0.0, 0.2, 1.0));
        assert_eq!(map.samples()[4095], color::new(0.9, 0.4, 0.1, 0.5));
    }

    #[test]
    fn reports_bad_line() {
        let text = "name: broken\n0.1 0.2 0.3\n0.1 zero 0.3\n";

        match parse_color_map(text) {
            Err(ColorMapError::Parse { line }) => assert_eq!(line, 3),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn missing_name() {
        assert!(matches!(
            parse_color_map("0.1 0.2 0.3\n"),
            Err(ColorMapError::Parse { line: 1 })
        ));
        assert!(matches!(
            parse_color_map("name: empty\n"),
            Err(ColorMapError::Empty(_))
        ));
    }

    #[test]
    fn out_of_range_channel() {
        assert!(matches!(
            parse_color_map("name: loud\n0.1 2.0 0.3\n"),
            Err(ColorMapError::OutOfRange { index: 0, .. })
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            from_file("/nonexistent/color.map"),
            Err(ColorMapError::Io(_))
        ));
    }
}

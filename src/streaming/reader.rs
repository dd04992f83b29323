//! Observation reader
//!
//! One observation per line: `0`/`1` or `false`/`true`. Blank lines and
//! lines starting with `#` are ignored.

use crate::error::{DriftError, Result};
use std::io::{BufRead, ErrorKind, Lines};

/// Lazily parsed observations from a line-oriented source
///
/// Reads one line per observation, so arbitrarily long inputs are replayed
/// in constant memory. Iteration stops being meaningful after the first
/// error.
#[derive(Debug)]
pub struct Observations<R> {
    lines: Lines<R>,
    line: usize,
}

impl<R: BufRead> Observations<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }

    /// 1-based number of the last line read
    pub fn line(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for Observations<R> {
    type Item = Result<f64>;

    fn next(&mut self) -> Option<Result<f64>> {
        loop {
            let line = self.lines.next()?;
            self.line += 1;

            let line = match line {
                Ok(line) => line,
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    return Some(Err(DriftError::Parse {
                        line: self.line,
                        value: "<invalid UTF-8>".to_string(),
                    }))
                }
                Err(e) => return Some(Err(e.into())),
            };

            let value = line.trim();
            if value.is_empty() || value.starts_with('#') {
                continue;
            }

            return Some(match value {
                "0" | "false" => Ok(0.0),
                "1" | "true" => Ok(1.0),
                _ => Err(DriftError::Parse {
                    line: self.line,
                    value: value.to_string(),
                }),
            });
        }
    }
}

/// Read all observations from a line-oriented source
pub fn read_observations<R: BufRead>(reader: R) -> Result<Vec<f64>> {
    Observations::new(reader).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_observations() {
        let input = "# outcomes\n0\n1\n\n  true \nfalse\n";
        let observations = read_observations(Cursor::new(input)).unwrap();
        assert_eq!(observations, vec![0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_read_reports_line_number() {
        let input = "0\n1\n# comment\n0.5\n";
        let err = read_observations(Cursor::new(input)).unwrap_err();

        match err {
            DriftError::Parse { line, value } => {
                assert_eq!(line, 4);
                assert_eq!(value, "0.5");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_utf8_reports_line_number() {
        let input: &[u8] = b"0\n1\n\xff\xfe\n0\n";
        let err = read_observations(input).unwrap_err();

        match err {
            DriftError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_observations_are_lazy() {
        let mut observations = Observations::new(Cursor::new("1\n# skip\n\n0\nbad\n"));

        assert_eq!(observations.next().unwrap().unwrap(), 1.0);
        assert_eq!(observations.line(), 1);

        // Comment and blank lines are consumed on the way to the next value
        assert_eq!(observations.next().unwrap().unwrap(), 0.0);
        assert_eq!(observations.line(), 4);

        assert!(matches!(
            observations.next(),
            Some(Err(DriftError::Parse { line: 5, .. }))
        ));
        assert!(observations.next().is_none());
    }

    #[test]
    fn test_read_empty_input() {
        let observations = read_observations(Cursor::new("")).unwrap();
        assert!(observations.is_empty());
    }
}

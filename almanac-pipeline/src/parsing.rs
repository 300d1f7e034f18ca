//! Utility functions and errors for parsing almanac text.

use std::iter::{Enumerate, Peekable};
use std::str::{FromStr, Lines};

use thiserror::Error;

use crate::DynamicError;

/// A string parsing error with context of the string that was being parsed.
#[derive(Error, Debug)]
#[error("failed to parse string: {string:?}")]
pub struct ParseContextError<E>
where
    E: std::error::Error,
{
    /// The string that was being parsed.
    string: String,
    source: E,
}

/// Parse a string slice into another type.
///
/// This wraps [`str::parse`] and maps errors to [`ParseContextError`].
///
/// # Errors
///
/// Will return a [`ParseContextError`] with the given string as context and
/// [`F::Err`][FromStr::Err] as the source if it's not possible to parse the string into the desired
/// type.
pub fn parse_with_context<F>(string: &str) -> Result<F, ParseContextError<F::Err>>
where
    F: FromStr,
    F::Err: std::error::Error,
{
    string.parse::<F>().map_err(|source| ParseContextError {
        string: string.to_string(),
        source,
    })
}

/// A line in an input string caused a parsing error.
#[derive(Error, Debug)]
#[error("failure parsing line {}", .line_index.saturating_add(1))]
pub struct InvalidLine {
    /// The line index, zero based.
    /// This will be formatted to a one-based number for display.
    line_index: usize,
    source: DynamicError,
}

impl InvalidLine {
    /// The zero based index of the line that failed to parse.
    #[must_use]
    pub fn line_index(&self) -> usize {
        self.line_index
    }
}

/// A scanner over the lines of an input string, for input made of blocks separated by blank lines.
///
/// Parser closures are given the zero based line index and the line. Any error they return is
/// wrapped in an [`InvalidLine`] carrying that index.
pub struct InputScanner<'a> {
    lines: Peekable<Enumerate<Lines<'a>>>,
}

impl<'a> InputScanner<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines().enumerate().peekable(),
        }
    }

    /// Advance past blank lines.
    ///
    /// # Returns
    ///
    /// The index of the next non-blank line, or `None` if the input is exhausted.
    pub fn skip_empty(&mut self) -> Option<usize> {
        while let Some((_, line)) = self.lines.peek() {
            if !line.trim().is_empty() {
                break;
            }
            self.lines.next();
        }
        self.lines.peek().map(|(index, _)| *index)
    }

    /// Parse the next non-blank line, skipping any blank lines before it.
    ///
    /// # Errors
    ///
    /// If the parser fails, an [`InvalidLine`] error is returned, sourcing the parser's error.
    ///
    /// # Returns
    ///
    /// The parsed item, or `None` if no lines remain.
    pub fn next_item<T, E, F>(&mut self, parser: F) -> Result<Option<T>, InvalidLine>
    where
        F: FnOnce(usize, &str) -> Result<T, E>,
        E: Into<DynamicError>,
    {
        self.skip_empty();
        self.lines
            .next()
            .map(|(index, line)| Self::parse_line(index, line, parser))
            .transpose()
    }

    /// Parse consecutive non-blank lines, stopping at the next blank line or the end of input.
    ///
    /// The blank line ending the sequence is left for the next call.
    ///
    /// # Errors
    ///
    /// The first line the parser fails on is returned as an [`InvalidLine`] error.
    pub fn collect_sequence<T, E, F>(&mut self, mut parser: F) -> Result<Vec<T>, InvalidLine>
    where
        F: FnMut(usize, &str) -> Result<T, E>,
        E: Into<DynamicError>,
    {
        let mut items = Vec::new();
        while let Some((index, line)) = self.lines.next_if(|(_, line)| !line.trim().is_empty()) {
            items.push(Self::parse_line(index, line, &mut parser)?);
        }
        Ok(items)
    }

    fn parse_line<T, E, F>(index: usize, line: &str, parser: F) -> Result<T, InvalidLine>
    where
        F: FnOnce(usize, &str) -> Result<T, E>,
        E: Into<DynamicError>,
    {
        parser(index, line).map_err(|error| InvalidLine {
            line_index: index,
            source: error.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::num::ParseIntError;

    use super::*;
    use crate::DynamicResult;

    #[test]
    fn parse_with_context_keeps_string() {
        let error = parse_with_context::<u64>("12x").expect_err("should not parse");
        assert_eq!(error.to_string(), "failed to parse string: \"12x\"");
    }

    #[test]
    fn scanner_walks_blocks() -> DynamicResult<()> {
        let mut scanner = InputScanner::new("a\n\n\nb\nc\n\nd\n");

        let first = scanner.next_item(|_, line| Ok::<_, DynamicError>(line.to_owned()))?;
        assert_eq!(first.as_deref(), Some("a"));

        assert_eq!(scanner.skip_empty(), Some(3));
        let block = scanner
            .collect_sequence(|index, line| Ok::<_, DynamicError>((index, line.to_owned())))?;
        assert_eq!(block, vec![(3, "b".to_owned()), (4, "c".to_owned())]);

        let last = scanner.next_item(|_, line| Ok::<_, DynamicError>(line.to_owned()))?;
        assert_eq!(last.as_deref(), Some("d"));
        assert_eq!(scanner.skip_empty(), None);
        assert!(scanner.next_item(|_, _| Ok::<_, DynamicError>(()))?.is_none());
        Ok(())
    }

    #[test]
    fn scanner_reports_one_based_line() {
        let mut scanner = InputScanner::new("1\n2\nthree\n4");
        let error = scanner
            .collect_sequence(|_, line| line.parse::<u8>())
            .expect_err("third line should fail");

        assert_eq!(error.line_index(), 2);
        assert_eq!(error.to_string(), "failure parsing line 3");
        assert!(
            std::error::Error::source(&error)
                .is_some_and(|source| source.downcast_ref::<ParseIntError>().is_some())
        );
    }
}

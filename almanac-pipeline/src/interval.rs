//! A single remapping rule of a stage.

use std::cmp::Ordering;
use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

use crate::AlmanacNumber;
use crate::parsing::{ParseContextError, parse_with_context};

/// A contiguous range of source numbers mapped onto a range of destination numbers, slope 1.
///
/// Both ranges are half-open and are guaranteed to fit within [`AlmanacNumber`], so mapping a
/// covered number can never overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    /// The start of the source range, inclusive.
    source_start: AlmanacNumber,

    /// The start of the destination range, inclusive.
    destination_start: AlmanacNumber,

    /// The length of both ranges.
    length: AlmanacNumber,
}

/// An error related to constructing an [`Interval`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntervalError {
    /// An interval has a length of 0. Displays the associated destination & source starts to locate
    /// in input.
    #[error(
        "interval length must be > 0 (destination_start = {destination_start}, source_start = {source_start})"
    )]
    EmptyLength {
        destination_start: AlmanacNumber,
        source_start: AlmanacNumber,
    },

    /// Integer overflow occurred when calculating the end of the source range.
    #[error("source end overflow when calculating start + length (start = {start}, length = {length})")]
    SourceEndOverflow {
        start: AlmanacNumber,
        length: AlmanacNumber,
    },

    /// Integer overflow occurred when calculating the end of the destination range.
    #[error(
        "destination end overflow when calculating start + length (start = {start}, length = {length})"
    )]
    DestinationEndOverflow {
        start: AlmanacNumber,
        length: AlmanacNumber,
    },
}

/// An error parsing an [`Interval`] from a `destination source length` line.
#[derive(Error, Debug)]
pub enum IntervalParseError {
    /// The line is not made of exactly three whitespace separated tokens, with the found line.
    #[error("expected three space-separated numbers as an interval, found: {0:?}")]
    MalformedInterval(String),

    #[error(transparent)]
    InvalidNumber(#[from] ParseContextError<ParseIntError>),

    #[error(transparent)]
    Invalid(#[from] IntervalError),
}

impl Interval {
    /// Create an interval with the given destination start, source start, and length.
    ///
    /// # Errors
    ///
    /// Fails if the length is 0, or if the exclusive end (`start + length`) of either range does
    /// not fit in [`AlmanacNumber`]. So a range can never include [`AlmanacNumber::MAX`] itself.
    pub fn new(
        destination_start: AlmanacNumber,
        source_start: AlmanacNumber,
        length: AlmanacNumber,
    ) -> Result<Self, IntervalError> {
        if length == 0 {
            return Err(IntervalError::EmptyLength {
                destination_start,
                source_start,
            });
        }
        if source_start.checked_add(length).is_none() {
            return Err(IntervalError::SourceEndOverflow {
                start: source_start,
                length,
            });
        }
        if destination_start.checked_add(length).is_none() {
            return Err(IntervalError::DestinationEndOverflow {
                start: destination_start,
                length,
            });
        }

        Ok(Self {
            source_start,
            destination_start,
            length,
        })
    }

    /// The start of the source range, inclusive.
    #[must_use]
    pub fn source_start(&self) -> AlmanacNumber {
        self.source_start
    }

    /// The end of the source range, exclusive.
    #[must_use]
    pub fn source_end(&self) -> AlmanacNumber {
        // checked on construction
        self.source_start + self.length
    }

    /// The start of the destination range, inclusive.
    #[must_use]
    pub fn destination_start(&self) -> AlmanacNumber {
        self.destination_start
    }

    /// Whether a number falls within the source range.
    #[must_use]
    pub fn covers(&self, number: AlmanacNumber) -> bool {
        self.source_start <= number && number < self.source_end()
    }

    /// Try to map a number with this interval.
    /// If the number is out of the source range, returns `None`.
    #[must_use]
    pub fn map(&self, number: AlmanacNumber) -> Option<AlmanacNumber> {
        self.covers(number).then(|| self.shift(number))
    }

    /// Offset a number from the source range onto the destination range.
    ///
    /// Valid for numbers from the source start up to and including the source end, so the
    /// exclusive end of a sub-range can be shifted too.
    pub(crate) fn shift(&self, number: AlmanacNumber) -> AlmanacNumber {
        debug_assert!(self.source_start <= number && number <= self.source_end());
        self.destination_start + (number - self.source_start)
    }

    /// Order this interval against a number being searched for.
    ///
    /// A covered number is [`Ordering::Equal`]; an interval starting after the number is
    /// [`Ordering::Greater`]; otherwise the interval lies before the number.
    pub(crate) fn locate(&self, number: AlmanacNumber) -> Ordering {
        if self.covers(number) {
            Ordering::Equal
        } else if self.source_start > number {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    }
}

impl FromStr for Interval {
    type Err = IntervalParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let values: Vec<_> = line.split_whitespace().collect();
        let [destination, source, length] = values[..] else {
            return Err(IntervalParseError::MalformedInterval(line.to_owned()));
        };

        Ok(Self::new(
            parse_with_context(destination)?,
            parse_with_context(source)?,
            parse_with_context(length)?,
        )?)
    }
}

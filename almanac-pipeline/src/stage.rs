//! A remapping layer of the almanac, such as `seed-to-soil`.

use thiserror::Error;

use crate::AlmanacNumber;
use crate::interval::Interval;
use crate::range::ValueRange;

/// A mapping of source numbers to destination numbers.
///
/// Contains a sorted collection of disjoint intervals. Numbers outside every interval map
/// one-to-one as the destination number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    /// The name from the block header, such as `seed-to-soil`.
    name: String,
    /// Intervals sorted by source start, none sharing a source number.
    intervals: Vec<Interval>,
}

/// An error related to constructing a [`Stage`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StageError {
    /// Two intervals claim the same source numbers. The intervals are ordered by source start.
    #[error(
        "overlapping intervals in {stage:?}: source {} to {} overlaps source {} to {}",
        .first.source_start(),
        .first.source_end(),
        .second.source_start(),
        .second.source_end()
    )]
    OverlappingInterval {
        stage: String,
        first: Interval,
        second: Interval,
    },
}

impl Stage {
    /// Create a stage from its name and intervals, in any order.
    ///
    /// # Errors
    ///
    /// Fails with [`StageError::OverlappingInterval`] if any two intervals share a source number.
    pub fn new<I>(name: impl Into<String>, intervals: I) -> Result<Self, StageError>
    where
        I: IntoIterator<Item = Interval>,
    {
        let name = name.into();
        let mut intervals: Vec<_> = intervals.into_iter().collect();
        intervals.sort_unstable_by_key(Interval::source_start);

        if let Some(pair) = intervals
            .windows(2)
            .find(|pair| pair[0].source_end() > pair[1].source_start())
        {
            return Err(StageError::OverlappingInterval {
                stage: name,
                first: pair[0],
                second: pair[1],
            });
        }

        Ok(Self { name, intervals })
    }

    /// The name from the block header, such as `seed-to-soil`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The intervals, sorted by source start.
    #[must_use]
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Map a source number to a destination number.
    ///
    /// Binary searches for the interval covering the number; uncovered numbers map to themselves.
    #[must_use]
    pub fn resolve(&self, number: AlmanacNumber) -> AlmanacNumber {
        match self
            .intervals
            .binary_search_by(|interval| interval.locate(number))
        {
            Ok(index) => self.intervals[index].shift(number),
            Err(_) => number,
        }
    }

    /// Map a source range into destination range(s), appending them to `output`.
    ///
    /// Depending on how the source range overlaps with intervals, many destination ranges can be
    /// generated: one per interval touched plus one per gap between them. Together they hold as
    /// many numbers as the source range.
    pub fn resolve_range(&self, source: ValueRange, output: &mut Vec<ValueRange>) {
        if source.is_empty() {
            return;
        }
        let end = source.end();

        // track where the unmapped remainder starts
        let mut cursor = source.start();
        // skip intervals ending at or before the range
        let first = self
            .intervals
            .partition_point(|interval| interval.source_end() <= cursor);

        for interval in &self.intervals[first..] {
            if interval.source_start() >= end {
                // remaining intervals are past the range
                break;
            }

            if cursor < interval.source_start() {
                // 1:1 gap before the interval
                output.push(ValueRange::from_bounds(cursor, interval.source_start()));
                cursor = interval.source_start();
            }

            let overlap_end = end.min(interval.source_end());
            output.push(ValueRange::from_bounds(
                interval.shift(cursor),
                interval.shift(overlap_end),
            ));
            cursor = overlap_end;
        }

        if cursor < end {
            output.push(ValueRange::from_bounds(cursor, end));
        }
    }
}

//! Half-open ranges of almanac numbers, carried through stages by range propagation.

use std::ops::Range;

use thiserror::Error;

use crate::AlmanacNumber;

/// A definition of a number range.
///
/// The end of the range, `start + length`, always fits within [`AlmanacNumber`]. A range with a
/// length of 0 holds no numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueRange {
    // order of props relevant when deriving Ord
    /// The start of the range, inclusive.
    start: AlmanacNumber,
    /// The length of the range.
    length: AlmanacNumber,
}

/// An error related to constructing a [`ValueRange`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// Integer overflow occurred when calculating a range's end with the given start & length.
    #[error("range end overflow when calculating start + length (start = {start}, length = {length})")]
    RangeOverflow {
        start: AlmanacNumber,
        length: AlmanacNumber,
    },

    /// Ranges are read from pairs of numbers, but an odd count of numbers was given.
    #[error("expected an even count of numbers to pair as ranges, found {count}")]
    UnpairedSeedRange { count: usize },
}

impl ValueRange {
    /// Create a range from a start & length.
    ///
    /// # Errors
    ///
    /// Fails with [`RangeError::RangeOverflow`] if the range would end past
    /// [`AlmanacNumber::MAX`].
    pub fn new(start: AlmanacNumber, length: AlmanacNumber) -> Result<Self, RangeError> {
        if start.checked_add(length).is_none() {
            return Err(RangeError::RangeOverflow { start, length });
        }
        Ok(Self { start, length })
    }

    /// Create a range from its inclusive start and exclusive end; requires `start <= end`.
    pub(crate) fn from_bounds(start: AlmanacNumber, end: AlmanacNumber) -> Self {
        debug_assert!(start <= end);
        Self {
            start,
            length: end - start,
        }
    }

    /// Pair up a flat list of numbers as `start length` ranges.
    ///
    /// # Errors
    ///
    /// Fails if the count of numbers is odd, or if any pair overflows as a range.
    pub fn pairs(numbers: &[AlmanacNumber]) -> Result<Vec<Self>, RangeError> {
        if numbers.len() % 2 != 0 {
            return Err(RangeError::UnpairedSeedRange {
                count: numbers.len(),
            });
        }
        numbers
            .chunks_exact(2)
            .map(|pair| Self::new(pair[0], pair[1]))
            .collect()
    }

    /// The start of the range, inclusive.
    #[must_use]
    pub fn start(&self) -> AlmanacNumber {
        self.start
    }

    /// The end of the range, exclusive.
    #[must_use]
    pub fn end(&self) -> AlmanacNumber {
        // checked on construction
        self.start + self.length
    }

    #[must_use]
    pub fn len(&self) -> AlmanacNumber {
        self.length
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Iterate every number of the range.
    #[must_use]
    pub fn values(&self) -> Range<AlmanacNumber> {
        self.start..self.end()
    }

    /// The count of consecutive pieces of at most `chunk_len` numbers the range splits into.
    ///
    /// `chunk_len` must be > 0.
    pub(crate) fn chunk_count(&self, chunk_len: AlmanacNumber) -> AlmanacNumber {
        debug_assert!(chunk_len > 0);
        self.length.div_ceil(chunk_len)
    }

    /// The piece at `index` when splitting the range into consecutive pieces of at most
    /// `chunk_len` numbers; requires `index < self.chunk_count(chunk_len)`.
    pub(crate) fn chunk(&self, index: AlmanacNumber, chunk_len: AlmanacNumber) -> Self {
        debug_assert!(index < self.chunk_count(chunk_len));
        // the piece starts inside the range, so this cannot overflow
        let start = self.start + index * chunk_len;
        Self::from_bounds(start, self.end().min(start.saturating_add(chunk_len)))
    }
}

/// Sort ranges and merge any that overlap or touch, dropping empty ranges.
///
/// The merged ranges hold exactly the same set of numbers as before.
pub fn coalesce(ranges: &mut Vec<ValueRange>) {
    ranges.retain(|range| !range.is_empty());
    ranges.sort_unstable();

    let mut merged: Vec<ValueRange> = Vec::with_capacity(ranges.len());
    for range in ranges.drain(..) {
        match merged.last_mut() {
            Some(last) if range.start <= last.end() => {
                let end = last.end().max(range.end());
                *last = ValueRange::from_bounds(last.start, end);
            }
            _ => merged.push(range),
        }
    }
    *ranges = merged;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: AlmanacNumber, length: AlmanacNumber) -> ValueRange {
        ValueRange::new(start, length).expect("test range should be valid")
    }

    #[test]
    fn pairs_numbers() {
        assert_eq!(
            ValueRange::pairs(&[79, 14, 55, 13]),
            Ok(vec![range(79, 14), range(55, 13)])
        );
        assert_eq!(ValueRange::pairs(&[]), Ok(vec![]));
        assert_eq!(
            ValueRange::pairs(&[79, 14, 55]),
            Err(RangeError::UnpairedSeedRange { count: 3 })
        );
        assert_eq!(
            ValueRange::pairs(&[AlmanacNumber::MAX, 1]),
            Err(RangeError::RangeOverflow {
                start: AlmanacNumber::MAX,
                length: 1
            })
        );
    }

    #[test]
    fn values_are_half_open() {
        assert_eq!(range(5, 3).values().collect::<Vec<_>>(), vec![5, 6, 7]);
        assert!(range(5, 0).is_empty());
        assert_eq!(range(5, 0).values().count(), 0);
    }

    #[test]
    fn chunks_cover_range() {
        let whole = range(10, 7);
        assert_eq!(whole.chunk_count(3), 3);
        let chunks: Vec<_> = (0..3).map(|index| whole.chunk(index, 3)).collect();
        assert_eq!(chunks, vec![range(10, 3), range(13, 3), range(16, 1)]);

        let at_max = range(AlmanacNumber::MAX - 4, 4);
        assert_eq!(at_max.chunk_count(3), 2);
        assert_eq!(at_max.chunk(1, 3), range(AlmanacNumber::MAX - 1, 1));
        assert_eq!(range(10, 0).chunk_count(3), 0);
    }

    #[test]
    fn chunks_huge_range_without_walking_it() {
        let huge = range(0, 1 << 50);
        assert_eq!(huge.chunk_count(1 << 16), 1 << 34);
        assert_eq!(
            huge.chunk((1 << 34) - 1, 1 << 16),
            range((1 << 50) - (1 << 16), 1 << 16)
        );
    }

    #[test]
    fn coalesce_merges_overlapping_and_adjacent() {
        let mut ranges = vec![
            range(20, 5),
            range(0, 3),
            range(3, 2),
            range(22, 10),
            range(40, 0),
            range(50, 1),
        ];
        coalesce(&mut ranges);
        assert_eq!(ranges, vec![range(0, 5), range(20, 12), range(50, 1)]);
    }

    #[test]
    fn coalesce_keeps_contained_ranges_whole() {
        let mut ranges = vec![range(0, 100), range(10, 5), range(99, 2)];
        coalesce(&mut ranges);
        assert_eq!(ranges, vec![range(0, 101)]);
    }
}

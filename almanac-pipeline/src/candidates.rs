//! Starting numbers to push through a pipeline.

use std::fmt::Display;

use crate::AlmanacNumber;
use crate::range::ValueRange;

/// An enum to identify how seed numbers are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedKind {
    /// Every seed number is a starting number.
    Points,
    /// Seed numbers pair up as the start & length of a range of starting numbers.
    Ranges,
}

impl Display for SeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Points => write!(f, "Seed points"),
            Self::Ranges => write!(f, "Seed ranges"),
        }
    }
}

/// The starting numbers for a search, kept in their compact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSet {
    Points(Vec<AlmanacNumber>),
    Ranges(Vec<ValueRange>),
}

impl CandidateSet {
    /// How the seed numbers were read.
    #[must_use]
    pub fn kind(&self) -> SeedKind {
        match self {
            Self::Points(_) => SeedKind::Points,
            Self::Ranges(_) => SeedKind::Ranges,
        }
    }

    /// Whether there are no starting numbers at all; empty ranges hold no numbers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Points(points) => points.is_empty(),
            Self::Ranges(ranges) => ranges.iter().all(ValueRange::is_empty),
        }
    }

    /// The count of starting numbers, as wide as needed for the sum of range lengths.
    #[must_use]
    pub fn count(&self) -> u128 {
        match self {
            Self::Points(points) => points.len() as u128,
            Self::Ranges(ranges) => ranges.iter().map(|range| u128::from(range.len())).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_numbers() -> Result<(), crate::range::RangeError> {
        let points = CandidateSet::Points(vec![79, 14, 55, 13]);
        assert_eq!(points.kind(), SeedKind::Points);
        assert_eq!(points.count(), 4);

        let ranges = CandidateSet::Ranges(ValueRange::pairs(&[79, 14, 55, 13])?);
        assert_eq!(ranges.kind(), SeedKind::Ranges);
        assert_eq!(ranges.count(), 27);
        Ok(())
    }

    #[test]
    fn empty_ranges_hold_nothing() -> Result<(), crate::range::RangeError> {
        assert!(CandidateSet::Points(vec![]).is_empty());
        assert!(CandidateSet::Ranges(vec![]).is_empty());
        assert!(CandidateSet::Ranges(ValueRange::pairs(&[5, 0, 9, 0])?).is_empty());
        assert!(!CandidateSet::Ranges(ValueRange::pairs(&[5, 0, 9, 1])?).is_empty());
        Ok(())
    }
}

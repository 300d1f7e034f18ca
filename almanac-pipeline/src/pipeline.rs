//! The ordered chain of stages that converts a seed number to a location number.

use crate::AlmanacNumber;
use crate::range::{ValueRange, coalesce};
use crate::stage::Stage;

/// A sequence of stages, where each stage's destination feeds the next stage's source.
///
/// The order is the order the stages are declared in, for example:
///
/// 1. seed to soil
/// 2. soil to fertilizer
/// 3. fertilizer to water
/// 4. water to light
/// 5. light to temperature
/// 6. temperature to humidity
/// 7. humidity to location
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Create a pipeline running the stages in the given order.
    #[must_use]
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    /// The stages, in running order.
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// The count of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Process the full sequence of stages to find the final number of a starting number.
    #[must_use]
    pub fn resolve(&self, number: AlmanacNumber) -> AlmanacNumber {
        self.stages
            .iter()
            .fold(number, |acc, stage| stage.resolve(acc))
    }

    /// Process the full sequence of stages to convert starting ranges to final ranges.
    ///
    /// After each stage the ranges are coalesced, so the count of ranges stays bounded by the
    /// interval boundaries instead of compounding through the stages.
    #[must_use]
    pub fn resolve_ranges<I>(&self, ranges: I) -> Vec<ValueRange>
    where
        I: IntoIterator<Item = ValueRange>,
    {
        let mut current: Vec<_> = ranges.into_iter().collect();
        coalesce(&mut current);

        let mut next = Vec::with_capacity(current.len());
        for stage in &self.stages {
            for &range in &current {
                stage.resolve_range(range, &mut next);
            }
            coalesce(&mut next);
            std::mem::swap(&mut current, &mut next);
            next.clear();
        }
        current
    }
}

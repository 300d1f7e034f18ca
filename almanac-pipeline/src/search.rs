//! Searches for the lowest number a pipeline produces from a set of starting numbers.
//!
//! Starting points are resolved one by one. Starting ranges are resolved with a [`Strategy`]:
//!
//! - [`Strategy::Propagate`] carries whole ranges through each stage, splitting them at interval
//!   boundaries. Its cost depends on the count of intervals, not the count of numbers.
//! - [`Strategy::Exhaustive`] resolves every number of every range, in parallel. Ranges from real
//!   almanacs hold billions of numbers, so this is meant as a reference for small inputs; it checks
//!   an [`Interrupt`] to allow giving up.

use rayon::prelude::*;
use thiserror::Error;

use crate::AlmanacNumber;
use crate::candidates::CandidateSet;
use crate::interrupt::Interrupt;
use crate::pipeline::Pipeline;
use crate::range::ValueRange;

/// The count of numbers an exhaustive search resolves between checks of its interrupt.
const EXHAUSTIVE_CHUNK_LEN: AlmanacNumber = 1 << 16;

/// How to search starting ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Split & carry ranges through the stages.
    #[default]
    Propagate,
    /// Resolve every number of every range.
    Exhaustive,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("no starting numbers to search")]
    EmptyCandidateSet,

    #[error("pipeline has no stages to resolve numbers through")]
    EmptyPipeline,

    #[error("search interrupted before resolving every starting number")]
    Interrupted,
}

/// Check the degenerate inputs that have no meaningful lowest number.
fn ensure_searchable(pipeline: &Pipeline, candidates_empty: bool) -> Result<(), SearchError> {
    if pipeline.is_empty() {
        return Err(SearchError::EmptyPipeline);
    }
    if candidates_empty {
        return Err(SearchError::EmptyCandidateSet);
    }
    Ok(())
}

/// Find the lowest number resolved from any of the starting points.
///
/// # Errors
///
/// Fails if the pipeline has no stages or there are no points.
pub fn lowest_point(
    pipeline: &Pipeline,
    points: &[AlmanacNumber],
) -> Result<AlmanacNumber, SearchError> {
    ensure_searchable(pipeline, points.is_empty())?;
    points
        .iter()
        .map(|&number| pipeline.resolve(number))
        .min()
        .ok_or(SearchError::EmptyCandidateSet)
}

/// Find the lowest number resolved from any number in the starting ranges, by propagating the
/// ranges through the stages.
///
/// # Errors
///
/// Fails if the pipeline has no stages or the ranges hold no numbers.
pub fn lowest_in_ranges(
    pipeline: &Pipeline,
    ranges: &[ValueRange],
) -> Result<AlmanacNumber, SearchError> {
    ensure_searchable(pipeline, ranges.iter().all(ValueRange::is_empty))?;
    // resolved ranges come back sorted
    pipeline
        .resolve_ranges(ranges.iter().copied())
        .first()
        .map(ValueRange::start)
        .ok_or(SearchError::EmptyCandidateSet)
}

/// Find the lowest number resolved from any number in the starting ranges, by resolving every
/// number.
///
/// The ranges are cut into chunks resolved in parallel; the interrupt is checked before starting
/// and before each chunk.
///
/// # Errors
///
/// Fails if the pipeline has no stages, the ranges hold no numbers, or the interrupt is raised
/// before every chunk is resolved.
pub fn lowest_in_ranges_exhaustive(
    pipeline: &Pipeline,
    ranges: &[ValueRange],
    interrupt: &Interrupt,
) -> Result<AlmanacNumber, SearchError> {
    ensure_searchable(pipeline, ranges.iter().all(ValueRange::is_empty))?;
    if interrupt.is_raised() {
        return Err(SearchError::Interrupted);
    }

    // chunks are produced by index as workers split the work, never collected up front
    ranges
        .par_iter()
        .flat_map(|&range| {
            (0..range.chunk_count(EXHAUSTIVE_CHUNK_LEN))
                .into_par_iter()
                .map(move |index| range.chunk(index, EXHAUSTIVE_CHUNK_LEN))
        })
        .map(|chunk| {
            if interrupt.is_raised() {
                return Err(SearchError::Interrupted);
            }
            Ok(chunk
                .values()
                .map(|number| pipeline.resolve(number))
                .fold(AlmanacNumber::MAX, AlmanacNumber::min))
        })
        .try_reduce(|| AlmanacNumber::MAX, |a, b| Ok(a.min(b)))
}

/// Find the lowest number resolved from a set of starting numbers.
///
/// The strategy only applies to ranges; the interrupt only applies to exhaustive searches.
///
/// # Errors
///
/// Fails if the pipeline has no stages, there are no starting numbers, or an exhaustive search is
/// interrupted.
pub fn lowest(
    pipeline: &Pipeline,
    candidates: &CandidateSet,
    strategy: Strategy,
    interrupt: &Interrupt,
) -> Result<AlmanacNumber, SearchError> {
    match (candidates, strategy) {
        (CandidateSet::Points(points), _) => lowest_point(pipeline, points),
        (CandidateSet::Ranges(ranges), Strategy::Propagate) => lowest_in_ranges(pipeline, ranges),
        (CandidateSet::Ranges(ranges), Strategy::Exhaustive) => {
            lowest_in_ranges_exhaustive(pipeline, ranges, interrupt)
        }
    }
}

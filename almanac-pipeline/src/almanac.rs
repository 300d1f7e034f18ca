//! Parsing the almanac document.

/*
Input is an almanac. It is formatted as multiple blocks separated by empty lines.

The first block is a `<label>: ` line with a space-separated list of numbers, such as `seeds: 79 14`.

Following are blocks of stages converting numbers from a source category to a destination category,
e.g. `seed-to-soil map:`. The order stages are declared in has one's destination feed to the next's
source.

A stage block lists intervals below its header. Lines contain three numbers: the destination range
start, the source range start, and the range length.
*/

use std::str::FromStr;

use thiserror::Error;

use crate::{AlmanacNumber, DynamicResult};
use crate::candidates::{CandidateSet, SeedKind};
use crate::interval::Interval;
use crate::parsing::{InputScanner, InvalidLine, parse_with_context};
use crate::pipeline::Pipeline;
use crate::range::{RangeError, ValueRange};
use crate::stage::{Stage, StageError};

/// A parsed almanac: the starting seed numbers and the pipeline to convert them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Almanac {
    /// The label of the seeds line, usually `seeds`.
    label: String,
    /// Seed numbers parsed from input, in their raw form.
    seed_numbers: Vec<AlmanacNumber>,
    pipeline: Pipeline,
}

#[derive(Error, Debug)]
pub enum AlmanacParseError {
    #[error("expected block for seeds")]
    MissingSeedsBlock,

    #[error("expected seeds line formatted as \"<label>: <numbers>\"")]
    MissingSeedsLabel,

    /// Expected a header line ending in `:` for a stage block, with the found line.
    #[error("expected header line for stage block: {0:?}")]
    ExpectedStageHeader(String),

    /// A stage block has a header but no intervals, with the stage name.
    #[error("expected intervals below header of {stage:?}")]
    MissingIntervals { stage: String },

    #[error(transparent)]
    Line(#[from] InvalidLine),

    #[error(transparent)]
    Stage(#[from] StageError),
}

/// Read a stage name from its header line, e.g. `seed-to-soil` from `seed-to-soil map:`.
fn parse_stage_header(line: &str) -> Result<String, AlmanacParseError> {
    let header = line
        .trim()
        .strip_suffix(':')
        .ok_or_else(|| AlmanacParseError::ExpectedStageHeader(line.to_owned()))?;
    let name = header.strip_suffix(" map").unwrap_or(header).trim_end();
    Ok(name.to_owned())
}

impl FromStr for Almanac {
    type Err = AlmanacParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut scanner = InputScanner::new(input);

        let (label, seed_numbers) = scanner
            .next_item(|_, line| -> DynamicResult<_> {
                let (label, seeds_list) = line
                    .split_once(':')
                    .ok_or(AlmanacParseError::MissingSeedsLabel)?;
                let seed_numbers = seeds_list
                    .split_whitespace()
                    .map(parse_with_context)
                    .collect::<Result<Vec<AlmanacNumber>, _>>()?;
                Ok((label.trim().to_owned(), seed_numbers))
            })?
            .ok_or(AlmanacParseError::MissingSeedsBlock)?;

        let mut stages = Vec::new();
        while let Some(name) = scanner.next_item(|_, line| parse_stage_header(line))? {
            let intervals = scanner.collect_sequence(|_, line| line.parse::<Interval>())?;
            if intervals.is_empty() {
                return Err(AlmanacParseError::MissingIntervals { stage: name });
            }
            stages.push(Stage::new(name, intervals)?);
        }

        Ok(Self {
            label,
            seed_numbers,
            pipeline: Pipeline::new(stages),
        })
    }
}

impl Almanac {
    /// The label of the seeds line.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The seed numbers as listed, before choosing a [`SeedKind`].
    #[must_use]
    pub fn seed_numbers(&self) -> &[AlmanacNumber] {
        &self.seed_numbers
    }

    #[must_use]
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Interpret the seed numbers as starting numbers of the given kind.
    ///
    /// # Errors
    ///
    /// Reading seeds as ranges fails if the seed numbers can't be paired as `start length` ranges.
    pub fn candidates(&self, kind: SeedKind) -> Result<CandidateSet, RangeError> {
        match kind {
            SeedKind::Points => Ok(CandidateSet::Points(self.seed_numbers.clone())),
            SeedKind::Ranges => ValueRange::pairs(&self.seed_numbers).map(CandidateSet::Ranges),
        }
    }
}

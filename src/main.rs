#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::collection_is_never_read,
    clippy::equatable_if_let,
    clippy::needless_collect,
    clippy::needless_pass_by_ref_mut,
    clippy::option_if_let_else,
    clippy::set_contains_or_insert,
    clippy::suboptimal_flops,
    clippy::suspicious_operation_groupings,
    clippy::trait_duplication_in_bounds,
    clippy::type_repetition_in_bounds,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(clippy::unwrap_used)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use almanac_pipeline::search::Strategy;
use almanac_pipeline::{Almanac, AlmanacNumber, CandidateSet, SeedKind};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};

use crate::runner::{OutputHandler, RunOptions};

mod runner;

/// The almanac read when no input file is given.
const DEFAULT_INPUT: &str = "inputs/almanac.txt";

/// Which readings of the seed numbers to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Every seed number is a starting number.
    Points,
    /// Seed numbers pair up as range start & length.
    Ranges,
    /// Search points, then ranges.
    Both,
}

impl Mode {
    fn kinds(self) -> Vec<SeedKind> {
        match self {
            Self::Points => vec![SeedKind::Points],
            Self::Ranges => vec![SeedKind::Ranges],
            Self::Both => vec![SeedKind::Points, SeedKind::Ranges],
        }
    }
}

/// How seed ranges are searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Carry whole ranges through each stage.
    Propagate,
    /// Resolve every seed of every range, in parallel. Slow for real inputs.
    Exhaustive,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Propagate => Self::Propagate,
            StrategyArg::Exhaustive => Self::Exhaustive,
        }
    }
}

/// Seed almanac solver: finds the lowest location number for the almanac's seeds.
#[derive(Parser, Debug)]
struct Cli {
    /// Sets an alternative almanac file to use over the default input.
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// The readings of the seed numbers to search.
    #[arg(short, long, value_enum, default_value_t = Mode::Both)]
    mode: Mode,

    /// The strategy for searching seed ranges.
    #[arg(short, long, value_enum, default_value_t = StrategyArg::Propagate)]
    strategy: StrategyArg,

    /// Measure and print the durations of parsing and searching.
    #[arg(short, long, action = ArgAction::SetTrue)]
    timed: bool,

    /// Minimum duration (in milliseconds) required to print timing.
    /// 0 = always print.
    #[arg(long, value_name = "NUMBER", default_value_t)]
    min_timing_ms: u64,

    /// Give up an exhaustive search after this many milliseconds.
    #[arg(long, value_name = "NUMBER")]
    time_limit_ms: Option<u64>,
}

/// Read an almanac file to a string, with a hint when the default file is missing.
fn get_input(input_file: Option<&Path>) -> Result<String> {
    match input_file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("could not read input file at: {}", path.display())),
        None => fs::read_to_string(DEFAULT_INPUT).with_context(|| {
            format!(
                "default input file missing: {DEFAULT_INPUT}\n\n\
                please create the file or provide the input file argument"
            )
        }),
    }
}

struct CliOutputHandler {
    /// A minimum duration to filter any outputs of duration by.
    min_duration: Duration,
}

impl CliOutputHandler {
    fn new(min_duration: Duration) -> Self {
        Self { min_duration }
    }

    fn format_duration(duration: Duration) -> String {
        const ONE_SECOND: Duration = Duration::from_secs(1);
        const ONE_MILLISECOND: Duration = Duration::from_millis(1);
        const ONE_MICROSECOND: Duration = Duration::from_micros(1);
        const DECIMAL_PLACES: usize = 3;

        if duration >= ONE_SECOND {
            format!("{:.*} seconds", DECIMAL_PLACES, duration.as_secs_f32())
        } else {
            let nanos = duration.subsec_nanos();
            if duration >= ONE_MILLISECOND {
                format!("{:.*} milliseconds", DECIMAL_PLACES, f64::from(nanos) / 1e6)
            } else if duration >= ONE_MICROSECOND {
                format!("{:.*} microseconds", DECIMAL_PLACES, f64::from(nanos) / 1e3)
            } else {
                format!("{nanos} nanoseconds")
            }
        }
    }

    /// Convert an optional duration into a formatted duration, filtering out if the duration is
    /// shorter than the minimum duration.
    fn format_optional_duration_above_min(&self, duration: Option<Duration>) -> Option<String> {
        duration
            .filter(|d| *d >= self.min_duration)
            .map(Self::format_duration)
    }
}

impl OutputHandler for CliOutputHandler {
    fn almanac_name(&mut self, name: &str) {
        println!("= {name} =");
    }

    fn parse_start(&mut self) {
        // do nothing
    }

    fn parse_end(&mut self, almanac: &Almanac, duration_opt: Option<Duration>) {
        let summary = format!(
            "{} {} numbers, {} stages",
            almanac.seed_numbers().len(),
            almanac.label(),
            almanac.pipeline().len()
        );
        if let Some(formatted_duration) = self.format_optional_duration_above_min(duration_opt) {
            println!("Almanac parsed: {summary} ({formatted_duration})");
        } else {
            println!("Almanac parsed: {summary}");
        }
    }

    fn search_start(&mut self, candidates: &CandidateSet, strategy: Strategy) {
        let kind = candidates.kind();
        let count = candidates.count();
        match kind {
            SeedKind::Points => println!("-- {kind}: {count} seeds --"),
            SeedKind::Ranges => println!("-- {kind}: {count} seeds ({strategy:?}) --"),
        }
    }

    fn search_output(
        &mut self,
        _kind: SeedKind,
        lowest: AlmanacNumber,
        duration_opt: Option<Duration>,
    ) {
        if let Some(formatted_duration) = self.format_optional_duration_above_min(duration_opt) {
            println!("{lowest} ({formatted_duration})");
        } else {
            println!("{lowest}");
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let input_str = get_input(args.input.as_deref())?;
    let name = args
        .input
        .as_deref()
        .unwrap_or_else(|| Path::new(DEFAULT_INPUT))
        .display()
        .to_string();

    let options = RunOptions {
        kinds: args.mode.kinds(),
        strategy: args.strategy.into(),
        timed: args.timed,
        time_limit: args.time_limit_ms.map(Duration::from_millis),
    };
    let mut handler = CliOutputHandler::new(Duration::from_millis(args.min_timing_ms));
    runner::run(&name, &input_str, &mut handler, &options).context("failed to run almanac")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_durations() {
        assert_eq!(
            CliOutputHandler::format_duration(Duration::from_millis(1500)),
            "1.500 seconds"
        );
        assert_eq!(
            CliOutputHandler::format_duration(Duration::from_micros(2500)),
            "2.500 milliseconds"
        );
        assert_eq!(
            CliOutputHandler::format_duration(Duration::from_nanos(2500)),
            "2.500 microseconds"
        );
        assert_eq!(
            CliOutputHandler::format_duration(Duration::from_nanos(42)),
            "42 nanoseconds"
        );
    }

    #[test]
    fn filters_short_durations() {
        let handler = CliOutputHandler::new(Duration::from_millis(10));
        assert_eq!(
            handler.format_optional_duration_above_min(Some(Duration::from_millis(5))),
            None
        );
        assert_eq!(handler.format_optional_duration_above_min(None), None);
        assert!(
            handler
                .format_optional_duration_above_min(Some(Duration::from_millis(10)))
                .is_some()
        );
    }

    #[test]
    fn parses_arguments() {
        let args = Cli::parse_from([
            "seed-almanac",
            "-i",
            "x.txt",
            "-m",
            "ranges",
            "-s",
            "exhaustive",
        ]);
        assert_eq!(args.input.as_deref(), Some(Path::new("x.txt")));
        assert_eq!(args.mode.kinds(), vec![SeedKind::Ranges]);
        assert_eq!(Strategy::from(args.strategy), Strategy::Exhaustive);
        assert_eq!(args.time_limit_ms, None);

        let args = Cli::parse_from(["seed-almanac"]);
        assert_eq!(args.mode, Mode::Both);
        assert_eq!(args.strategy, StrategyArg::Propagate);
        assert!(!args.timed);
    }
}

//! Functions and traits for running almanac searches.
//!
//! Running an almanac parses it once, then searches for the lowest location of each requested
//! [`SeedKind`], reporting every step to an [`OutputHandler`].

use std::time::Duration;

use almanac_pipeline::search::{self, Strategy};
use almanac_pipeline::{Almanac, AlmanacNumber, CandidateSet, Interrupt, SeedKind};
use anyhow::{Context, Result};

/// A trait for an output events handler.
///
/// When an almanac runs, the steps of running it lead to events to output through a handler as
/// feedback and logging.
pub trait OutputHandler {
    /// Called to output the name of the almanac, at the start of running.
    fn almanac_name(&mut self, name: &str);

    /// Called when the almanac starts parsing.
    fn parse_start(&mut self);

    /// Called when parsing is finished, with the parsed almanac to summarise.
    ///
    /// The duration taken to parse is optionally passed.
    fn parse_end(&mut self, almanac: &Almanac, duration_opt: Option<Duration>);

    /// Called when a search starts, with the starting numbers & range strategy used.
    fn search_start(&mut self, candidates: &CandidateSet, strategy: Strategy);

    /// Called when a search finishes to output the lowest location.
    ///
    /// The duration taken to search is optionally passed.
    fn search_output(
        &mut self,
        kind: SeedKind,
        lowest: AlmanacNumber,
        duration_opt: Option<Duration>,
    );
}

/// Settings for a run, as chosen on the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// The seed kinds to search, in order.
    pub kinds: Vec<SeedKind>,
    /// The strategy for searching seed ranges.
    pub strategy: Strategy,
    /// A flag to measure the time of parsing & searching then output the elapsed times.
    pub timed: bool,
    /// A time limit for each search, after which an exhaustive search gives up.
    pub time_limit: Option<Duration>,
}

/// Measure the duration of an expression.
///
/// The macro evaluates the given expression once and returns a tuple of the expression's result and
/// the elapsed [`Duration`][std::time::Duration].
macro_rules! measure_duration {
    ($expr:expr) => {{
        let start = ::std::time::Instant::now();
        let result = $expr;
        let elapsed = start.elapsed();
        (result, elapsed)
    }};
}

/// A macro to optionally measure the duration of an expression.
///
/// Returns a tuple of the expression's result and, if `$timed` is `true`, its duration.
macro_rules! measure_with_optional_duration {
    ($expr:expr, $timed:expr) => {{
        if $timed {
            let (result, duration) = measure_duration!($expr);
            (result, Some(duration))
        } else {
            ($expr, None)
        }
    }};
}

/// Parse the almanac, outputting events through the handler.
fn run_parse(input: &str, handler: &mut dyn OutputHandler, timed: bool) -> Result<Almanac> {
    handler.parse_start();
    let (result, duration_opt) = measure_with_optional_duration!(input.parse::<Almanac>(), timed);
    let almanac = result.context("failed to parse almanac")?;
    handler.parse_end(&almanac, duration_opt);
    Ok(almanac)
}

/// Search the almanac for the lowest location of a seed kind, outputting events through the
/// handler.
fn run_search(
    almanac: &Almanac,
    kind: SeedKind,
    options: &RunOptions,
    handler: &mut dyn OutputHandler,
) -> Result<()> {
    let candidates = almanac
        .candidates(kind)
        .with_context(|| format!("failed to read seeds for {kind}"))?;
    handler.search_start(&candidates, options.strategy);

    let interrupt = options
        .time_limit
        .map_or_else(Interrupt::new, Interrupt::with_time_limit);

    let (result, duration_opt) = measure_with_optional_duration!(
        search::lowest(almanac.pipeline(), &candidates, options.strategy, &interrupt),
        options.timed
    );
    let lowest = result.with_context(|| format!("failed to search {kind}"))?;
    handler.search_output(kind, lowest, duration_opt);
    Ok(())
}

/// Run an almanac: parse it, then search each requested seed kind.
///
/// # Arguments
///
/// - `name` - The almanac's name to output.
/// - `input` - The almanac text.
/// - `handler` - The output handler to output events to.
/// - `options` - The seed kinds, strategy, and timing to run with.
///
/// # Errors
///
/// Any error from parsing or searching is propagated with context.
pub fn run(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    options: &RunOptions,
) -> Result<()> {
    handler.almanac_name(name);
    let almanac = run_parse(input, handler, options.timed)?;
    for &kind in &options.kinds {
        run_search(&almanac, kind, options, handler)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = include_str!("../inputs/example.txt");

    /// Records events as lines of text.
    #[derive(Default)]
    struct RecordingHandler(Vec<String>);

    impl OutputHandler for RecordingHandler {
        fn almanac_name(&mut self, name: &str) {
            self.0.push(format!("name {name}"));
        }

        fn parse_start(&mut self) {
            self.0.push("parse start".to_owned());
        }

        fn parse_end(&mut self, almanac: &Almanac, duration_opt: Option<Duration>) {
            self.0.push(format!(
                "parse end {} {}",
                almanac.pipeline().len(),
                duration_opt.is_some()
            ));
        }

        fn search_start(&mut self, candidates: &CandidateSet, strategy: Strategy) {
            self.0.push(format!(
                "start {} {} {strategy:?}",
                candidates.kind(),
                candidates.count()
            ));
        }

        fn search_output(
            &mut self,
            kind: SeedKind,
            lowest: AlmanacNumber,
            duration_opt: Option<Duration>,
        ) {
            self.0
                .push(format!("output {kind} {lowest} {}", duration_opt.is_some()));
        }
    }

    fn options(kinds: Vec<SeedKind>, strategy: Strategy, timed: bool) -> RunOptions {
        RunOptions {
            kinds,
            strategy,
            timed,
            time_limit: None,
        }
    }

    #[test]
    fn runs_both_kinds() -> Result<()> {
        let mut handler = RecordingHandler::default();
        let options = options(
            vec![SeedKind::Points, SeedKind::Ranges],
            Strategy::Propagate,
            false,
        );

        run("example", EXAMPLE_INPUT, &mut handler, &options)?;

        assert_eq!(
            handler.0,
            vec![
                "name example",
                "parse start",
                "parse end 7 false",
                "start Seed points 4 Propagate",
                "output Seed points 35 false",
                "start Seed ranges 27 Propagate",
                "output Seed ranges 46 false",
            ]
        );
        Ok(())
    }

    #[test]
    fn times_steps_when_asked() -> Result<()> {
        let mut handler = RecordingHandler::default();
        let options = options(vec![SeedKind::Ranges], Strategy::Exhaustive, true);

        run("example", EXAMPLE_INPUT, &mut handler, &options)?;

        assert_eq!(handler.0[2], "parse end 7 true");
        assert_eq!(handler.0[4], "output Seed ranges 46 true");
        Ok(())
    }

    #[test]
    fn stops_on_parse_error() {
        let mut handler = RecordingHandler::default();
        let options = options(vec![SeedKind::Points], Strategy::Propagate, false);

        let result = run("broken", "seeds: 1\n\nno header\n", &mut handler, &options);

        assert!(result.is_err());
        assert_eq!(handler.0, vec!["name broken", "parse start"]);
    }

    #[test]
    fn reports_unpaired_seed_ranges() {
        let mut handler = RecordingHandler::default();
        let options = options(vec![SeedKind::Ranges], Strategy::Propagate, false);

        let input = "seeds: 1 2 3\n\na-to-b map:\n0 1 1\n";

        let result = run("odd", input, &mut handler, &options);

        let error = result.expect_err("odd seed count should fail as ranges");
        assert_eq!(error.to_string(), "failed to read seeds for Seed ranges");
        // no search starts without seeds to search
        assert_eq!(handler.0.last().map(String::as_str), Some("parse end 1 false"));
    }

    #[test]
    fn exhaustive_search_respects_time_limit() {
        let mut handler = RecordingHandler::default();
        let options = RunOptions {
            time_limit: Some(Duration::ZERO),
            ..options(vec![SeedKind::Ranges], Strategy::Exhaustive, false)
        };

        let result = run("example", EXAMPLE_INPUT, &mut handler, &options);

        let error = result.expect_err("search should be interrupted");
        assert!(
            error
                .chain()
                .any(|cause| cause.to_string().contains("interrupted"))
        );
    }
}

//! Range-mapping pipeline for seed almanacs.
//!
//! An almanac lists seed numbers followed by blocks of remapping rules. Each block is a [`Stage`]
//! of disjoint [`Interval`]s; the blocks in file order form a [`Pipeline`] that converts a seed
//! number into a location number.
//!
//! # Quick Start
//!
//! ```
//! use almanac_pipeline::search::{self, Strategy};
//! use almanac_pipeline::{Almanac, Interrupt, SeedKind};
//!
//! let almanac: Almanac = "seeds: 79 14 55 13
//!
//! seed-to-soil map:
//! 50 98 2
//! 52 50 48
//! "
//! .parse()?;
//!
//! let candidates = almanac.candidates(SeedKind::Points)?;
//! let lowest = search::lowest(
//!     almanac.pipeline(),
//!     &candidates,
//!     Strategy::Propagate,
//!     &Interrupt::new(),
//! )?;
//! assert_eq!(lowest, 13);
//! # Ok::<(), almanac_pipeline::DynamicError>(())
//! ```
//!
//! # Seed interpretations
//!
//! The seed numbers are read either as individual points ([`SeedKind::Points`]) or as pairs of
//! range start & length ([`SeedKind::Ranges`]). Ranges can hold billions of values, so they are
//! carried through the pipeline as whole [`ValueRange`]s by default; see [`search`] for the
//! exhaustive alternative.

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
#![deny(
    clippy::expect_used,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::unwrap_used
)]

use std::error::Error;

pub mod almanac;
pub mod candidates;
pub mod interrupt;
pub mod interval;
pub mod parsing;
pub mod pipeline;
pub mod range;
pub mod search;
pub mod stage;

pub use almanac::Almanac;
pub use candidates::{CandidateSet, SeedKind};
pub use interrupt::Interrupt;
pub use interval::Interval;
pub use pipeline::Pipeline;
pub use range::ValueRange;
pub use stage::Stage;

/// The integer type for numbers in the almanac.
///
/// Observed 10 digit numbers in input, so this is wider than 32 bits.
pub type AlmanacNumber = u64;

/// A dynamically dispatched error, wrapped in a [`Box`].
pub type DynamicError = Box<dyn Error + Send + Sync + 'static>;
/// A result that can return a [`DynamicError`] as an error.
pub type DynamicResult<T> = Result<T, DynamicError>;

#[cfg(test)]
pub(crate) mod test_support {
    /// The almanac from the puzzle description: points give 35, ranges give 46.
    pub const EXAMPLE_INPUT: &str = r"seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48

soil-to-fertilizer map:
0 15 37
37 52 2
39 0 15

fertilizer-to-water map:
49 53 8
0 11 42
42 0 7
57 7 4

water-to-light map:
88 18 7
18 25 70

light-to-temperature map:
45 77 23
81 45 19
68 64 13

temperature-to-humidity map:
0 69 1
1 0 69

humidity-to-location map:
60 56 37
56 93 4
";
}

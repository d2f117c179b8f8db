//! Command-line configuration of a render run.
//!
//! Arguments go through three stages: [`args`] splits them into flags and
//! model paths, [`validate`] turns the raw values into a [`CliOptions`]
//! record, and [`report`] renders that record back for diagnostics.

pub mod args;
pub mod errors;
pub mod options;
pub mod report;
pub mod validate;

pub use errors::{CliError, ErrorClass};
pub use options::{CliOptions, DEFAULT_HEIGHT, DEFAULT_WIDTH, ParseOutcome, RunMode};

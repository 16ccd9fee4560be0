//! Rendering of run results and `--list` output
//!
//! `--json` and `--diff` pick the formatter; `-q`/`--verbose` control how
//! much of the skip detail the text and JSON formatters show.

mod diff;
mod json;
mod text;

pub use diff::{changed_lines, ChangedLine, DiffFormatter};
pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::cli::CliArgs;
use crate::orchestrator::{ManifestListing, OrchestratorResult};
use std::io::Write;

/// How much detail to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Summary line only
    Quiet,
    /// Updates and conflicts
    Normal,
    /// Also every skipped dependency and resolver
    Verbose,
}

impl Verbosity {
    pub fn from_args(args: &CliArgs) -> Self {
        match (args.quiet, args.verbose) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        }
    }
}

pub trait OutputFormatter {
    /// Write the outcome of a patch run
    fn format(&self, result: &OrchestratorResult, writer: &mut dyn Write) -> std::io::Result<()>;

    /// Write the dependencies extracted by `--list`
    fn format_listing(
        &self,
        listings: &[ManifestListing],
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;
}

/// Pick the formatter requested on the command line
pub fn create_formatter(args: &CliArgs) -> Box<dyn OutputFormatter> {
    let verbosity = Verbosity::from_args(args);
    if args.json {
        Box::new(JsonFormatter::new(verbosity))
    } else if args.diff {
        Box::new(DiffFormatter::new(args.dry_run))
    } else {
        Box::new(TextFormatter::new(verbosity, args.dry_run))
    }
}

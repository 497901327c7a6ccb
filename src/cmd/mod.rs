//! Command handlers for the cookie-size CLI
//!
//! Each submodule handles one CLI command.

pub mod completions;
pub mod report;
pub mod run;
pub mod targets;

pub use completions::cmd_completions;
pub use report::{cmd_report, ReportOptions};
pub use run::{cmd_run, RunOptions};
pub use targets::cmd_targets;

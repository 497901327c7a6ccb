//! CI integration
//!
//! Provides:
//! - Size budget enforcement with configurable thresholds
//! - JSON output for CI tool integration

pub mod budget;
pub mod output;

pub use budget::BudgetChecker;
pub use output::JsonOutput;

//! Run command implementation
//!
//! Handles `cookie-size run`, which expands the size test over the selected
//! targets and runs one instance per target.

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::cicd::output::JsonOutput;
use crate::cicd::BudgetChecker;
use crate::config::{ConfigLoader, CONFIG_FILE_NAME};
use crate::dut::BinaryPathResolver;
use crate::fmt::{icon, CHART, CHECKMARK, CROSSMARK, ROCKET};
use crate::harness::{parametrize, Outcome, RunSummary, Runner, TEST_NAME};
use crate::target::TargetSelector;

/// Options for `cookie-size run`
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Application directory holding the build directories
    pub app_path: PathBuf,
    /// Target selector; falls back to the config file, then all supported targets
    pub targets: Option<String>,
    /// Build configuration suffix for directory resolution
    pub build_config: Option<String>,
    /// Print JSON instead of human-readable output
    pub json: bool,
    /// Fail instances whose size exceeds the configured max
    pub check: bool,
    /// Number of instances to run at once
    pub jobs: Option<usize>,
}

/// Run the size test for every selected target
///
/// Fails when any instance fails, after all instances have run and the
/// results have been printed.
pub fn cmd_run(opts: &RunOptions) -> Result<()> {
    if ConfigLoader::exists(&opts.app_path) {
        log::debug!("loading {}", opts.app_path.join(CONFIG_FILE_NAME).display());
    }
    let config = ConfigLoader::load(&opts.app_path)?;

    let selector = match &opts.targets {
        Some(s) => s.parse::<TargetSelector>()?,
        None => config.target_selector()?,
    };
    let cases = parametrize(&selector);
    if cases.is_empty() {
        anyhow::bail!("No targets selected");
    }

    if opts.check && config.size_budget.is_none() {
        log::warn!(
            "--check has no effect: no [size-budget] in {}",
            CONFIG_FILE_NAME
        );
    }

    let resolver = BinaryPathResolver::new(&opts.app_path)
        .with_build_config(opts.build_config.clone().or(config.build_config));
    let summary = Runner::new(resolver)
        .with_budget(config.size_budget.map(BudgetChecker::new), opts.check)
        .with_jobs(opts.jobs)
        .run(&cases)?;

    if opts.json {
        JsonOutput::from_summary(&summary).print();
    } else {
        present_summary(&summary);
    }

    if !summary.all_passed() {
        anyhow::bail!(
            "{} of {} {} instances failed",
            summary.failed(),
            summary.reports.len(),
            TEST_NAME
        );
    }
    Ok(())
}

fn present_summary(summary: &RunSummary) {
    println!("{} {} {}", icon(ROCKET), style("cookie-size").bold(), TEST_NAME);
    println!();

    for report in &summary.reports {
        match &report.outcome {
            Outcome::Passed { size, budget } => {
                println!(
                    "   {} {:<24} {} KB",
                    icon(CHECKMARK),
                    report.case.id,
                    style(size.kilobytes()).green()
                );
                if let Some(budget) = budget {
                    budget.print();
                }
            }
            Outcome::Failed(e) => {
                println!(
                    "   {} {:<24} {}",
                    icon(CROSSMARK),
                    report.case.id,
                    style(e).red()
                );
            }
        }
    }

    println!();
    println!(
        "{} {} passed, {} failed",
        icon(CHART),
        summary.passed(),
        summary.failed()
    );
}

//! Report command implementation
//!
//! Handles `cookie-size report`, which runs the size test once against a
//! single build directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;

use crate::cicd::budget::BudgetResult;
use crate::cicd::output::{JsonOutput, TestResultInfo};
use crate::cicd::BudgetChecker;
use crate::config::{ConfigFile, ConfigLoader, CONFIG_FILE_NAME};
use crate::dut::{BinaryPathResolver, Dut};
use crate::error::CookieSizeError;
use crate::fmt::{format_bytes, icon, CHECKMARK};
use crate::harness::{TestCase, TEST_NAME};
use crate::infra::RealFileSystem;
use crate::reporter::{self, ArtifactSize};
use crate::target::Target;

/// Options for `cookie-size report`
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Build directory holding `cookie.bin`; resolved from the app directory when absent
    pub binary_path: Option<PathBuf>,
    /// Application directory; the current directory unless `binary_path` is set
    pub app_path: Option<PathBuf>,
    /// Target the build was made for
    pub target: Option<Target>,
    /// Build configuration suffix for directory resolution
    pub build_config: Option<String>,
    /// Print JSON instead of human-readable output
    pub json: bool,
    /// Fail when the size exceeds the configured max
    pub check: bool,
}

impl ReportOptions {
    fn app_dir(&self) -> &Path {
        self.app_path.as_deref().unwrap_or(Path::new("."))
    }
}

/// Load `.cookie-size.toml`, unless only an explicit build directory was given
fn load_config(opts: &ReportOptions) -> Result<ConfigFile> {
    if opts.app_path.is_none() && opts.binary_path.is_some() {
        log::debug!("--binary-path without --app-path, not loading {}", CONFIG_FILE_NAME);
        return Ok(ConfigFile::default());
    }
    ConfigLoader::load(opts.app_dir())
}

/// Resolve the device under test for the given options
fn resolve_dut(opts: &ReportOptions, build_config: Option<String>) -> Result<Dut, CookieSizeError> {
    if let Some(binary_path) = &opts.binary_path {
        return Ok(Dut::with_binary_path(binary_path.clone(), opts.target));
    }

    match opts.target {
        Some(target) => BinaryPathResolver::new(opts.app_dir())
            .with_build_config(build_config)
            .resolve(target),
        None => Ok(Dut::with_binary_path(
            opts.app_dir().join(crate::dut::DEFAULT_BUILD_DIR),
            None,
        )),
    }
}

fn measure_and_check(
    dut: &Dut,
    budget: Option<&BudgetChecker>,
    enforce: bool,
) -> Result<(ArtifactSize, Option<BudgetResult>), CookieSizeError> {
    let size = reporter::report_size_with_fs(dut, &RealFileSystem)?;
    let budget_result = match budget {
        Some(checker) if enforce => Some(checker.enforce(size.bytes)?),
        Some(checker) => Some(checker.check(size.bytes)),
        None => None,
    };
    Ok((size, budget_result))
}

/// Measure and log the firmware image size for one build
///
/// With `json` set, a failed report still prints a result entry before the
/// error is returned.
///
/// # Examples
///
/// ```no_run
/// use cookie_size::cmd::{cmd_report, ReportOptions};
///
/// cmd_report(&ReportOptions {
///     binary_path: Some("/tmp/build".into()),
///     ..Default::default()
/// })?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_report(opts: &ReportOptions) -> Result<()> {
    let config = load_config(opts)?;
    let build_config = opts.build_config.clone().or(config.build_config);
    let id = opts
        .target
        .map(|t| TestCase::new(t).id)
        .unwrap_or_else(|| TEST_NAME.to_string());

    let budget = config.size_budget.map(BudgetChecker::new);
    if opts.check && budget.is_none() {
        log::warn!(
            "--check has no effect: no [size-budget] in {}",
            CONFIG_FILE_NAME
        );
    }

    let measured = resolve_dut(opts, build_config)
        .and_then(|dut| measure_and_check(&dut, budget.as_ref(), opts.check));

    match measured {
        Ok((size, budget_result)) => {
            if opts.json {
                JsonOutput::new(vec![TestResultInfo::passed(
                    &id,
                    opts.target,
                    &size,
                    budget_result.as_ref(),
                )])
                .print();
            } else {
                present_size(&id, &size, budget_result.as_ref());
            }
            Ok(())
        }
        Err(e) => {
            if opts.json {
                JsonOutput::new(vec![TestResultInfo::failed(&id, opts.target, &e)]).print();
            }
            Err(e).with_context(|| id)
        }
    }
}

fn present_size(id: &str, size: &ArtifactSize, budget: Option<&BudgetResult>) {
    println!(
        "{} {} {} KB ({})",
        icon(CHECKMARK),
        style(id).bold(),
        style(size.kilobytes()).green().bold(),
        format_bytes(size.bytes)
    );
    println!("   {}", style(size.path.display()).dim());
    if let Some(budget) = budget {
        budget.print();
    }
}

//! Per-target test generation and execution
//!
//! [`parametrize`] expands the `test_build` test into one instance per
//! selected target. [`Runner`] resolves a [`Dut`] for each instance, runs the
//! size report on it, and collects pass/fail outcomes in target order.
//! Instances share no state and may run in parallel.

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::cicd::budget::{BudgetChecker, BudgetResult};
use crate::dut::{BinaryPathResolver, Dut};
use crate::error::CookieSizeError;
use crate::infra::{FileSystem, RealFileSystem};
use crate::reporter::{self, ArtifactSize};
use crate::target::{Target, TargetSelector};

/// Name of the size test
pub const TEST_NAME: &str = "test_build";

/// Log the size of the image built for `dut`; fails if the image is missing.
pub fn test_build(dut: &Dut) -> Result<(), CookieSizeError> {
    reporter::report_size(dut)
}

/// One parametrized instance of the size test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Test id, e.g. `test_build[esp32]`
    pub id: String,
    /// Target this instance runs for
    pub target: Target,
}

impl TestCase {
    /// Instance of `test_build` for `target`
    pub fn new(target: Target) -> Self {
        Self {
            id: format!("{}[{}]", TEST_NAME, target),
            target,
        }
    }
}

/// Expand `test_build` into one instance per selected target
pub fn parametrize(selector: &TargetSelector) -> Vec<TestCase> {
    selector.targets().into_iter().map(TestCase::new).collect()
}

/// Outcome of a single test instance
#[derive(Debug)]
pub enum Outcome {
    /// The artifact was measured and reported
    Passed {
        /// Measured artifact
        size: ArtifactSize,
        /// Budget check, when a budget is configured
        budget: Option<BudgetResult>,
    },
    /// The instance failed
    Failed(CookieSizeError),
}

/// Result of running one test instance
#[derive(Debug)]
pub struct TestReport {
    /// The instance that ran
    pub case: TestCase,
    /// What happened
    pub outcome: Outcome,
}

impl TestReport {
    /// Whether the instance passed
    pub fn passed(&self) -> bool {
        matches!(self.outcome, Outcome::Passed { .. })
    }
}

/// Reports of a whole run, in the order the cases were given
#[derive(Debug, Default)]
pub struct RunSummary {
    /// One report per test instance
    pub reports: Vec<TestReport>,
}

impl RunSummary {
    /// Number of passed instances
    pub fn passed(&self) -> usize {
        self.reports.iter().filter(|r| r.passed()).count()
    }

    /// Number of failed instances
    pub fn failed(&self) -> usize {
        self.reports.len() - self.passed()
    }

    /// True when every instance passed
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// 0 when every instance passed, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }
}

/// Runs parametrized size tests against resolved build directories
pub struct Runner<FS: FileSystem + Sync = RealFileSystem> {
    resolver: BinaryPathResolver,
    budget: Option<BudgetChecker>,
    enforce_budget: bool,
    jobs: Option<usize>,
    fs: FS,
}

impl Runner<RealFileSystem> {
    /// Create a runner using the real filesystem
    pub fn new(resolver: BinaryPathResolver) -> Self {
        Self::with_fs(resolver, RealFileSystem)
    }
}

impl<FS: FileSystem + Sync> Runner<FS> {
    /// Create a runner with a custom filesystem implementation
    pub fn with_fs(resolver: BinaryPathResolver, fs: FS) -> Self {
        Self {
            resolver,
            budget: None,
            enforce_budget: false,
            jobs: None,
            fs,
        }
    }

    /// Check every measured size against `budget`; over-max fails the
    /// instance only when `enforce` is set
    pub fn with_budget(mut self, budget: Option<BudgetChecker>, enforce: bool) -> Self {
        self.budget = budget;
        self.enforce_budget = enforce;
        self
    }

    /// Limit the number of instances running at once
    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs.filter(|&n| n > 0);
        self
    }

    /// Run every case and collect the reports
    pub fn run(&self, cases: &[TestCase]) -> Result<RunSummary> {
        let run_all = || -> Vec<TestReport> {
            cases
                .par_iter()
                .map(|case| TestReport {
                    case: case.clone(),
                    outcome: self.run_case(case),
                })
                .collect()
        };

        let reports = match self.jobs {
            Some(n) => rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .context("Failed to start test worker pool")?
                .install(run_all),
            None => run_all(),
        };

        Ok(RunSummary { reports })
    }

    fn run_case(&self, case: &TestCase) -> Outcome {
        log::debug!("running {}", case.id);
        match self.measure_case(case) {
            Ok((size, budget)) => Outcome::Passed { size, budget },
            Err(e) => {
                log::debug!("{} failed: {}", case.id, e);
                Outcome::Failed(e)
            }
        }
    }

    fn measure_case(
        &self,
        case: &TestCase,
    ) -> Result<(ArtifactSize, Option<BudgetResult>), CookieSizeError> {
        let dut = self.resolver.resolve_with_fs(case.target, &self.fs)?;
        let size = reporter::report_size_with_fs(&dut, &self.fs)?;

        let budget = match &self.budget {
            Some(checker) if self.enforce_budget => Some(checker.enforce(size.bytes)?),
            Some(checker) => Some(checker.check(size.bytes)),
            None => None,
        };

        Ok((size, budget))
    }
}

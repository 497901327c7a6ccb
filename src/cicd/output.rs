//! JSON output formatting for CI integration

use crate::cicd::budget::BudgetResult;
use crate::error::CookieSizeError;
use crate::fmt::{format_bytes, kilobytes};
use crate::harness::{Outcome, RunSummary, TestReport, TEST_NAME};
use crate::reporter::ArtifactSize;
use crate::target::Target;
use serde::{Deserialize, Serialize};

/// JSON output structure for CI tools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// True when every test instance passed
    pub success: bool,
    /// Test name
    pub test: String,
    /// One entry per test instance
    pub results: Vec<TestResultInfo>,
}

/// Outcome of one test instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResultInfo {
    /// Test id, e.g. `test_build[esp32]`
    pub id: String,
    /// Target identifier, absent when the binary path was given directly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Whether the instance passed
    pub passed: bool,
    /// Measured size (passed instances only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeInfo>,
    /// Budget check result (if configured)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetInfo>,
    /// Error message (failed instances only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Size information in multiple units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeInfo {
    /// Artifact path
    pub path: String,
    /// Size in bytes
    pub bytes: u64,
    /// Whole kilobytes, rounded down
    pub kb: u64,
    /// Formatted string (e.g., "200.00 KB")
    pub formatted: String,
}

impl SizeInfo {
    /// Create size info from a measured artifact
    pub fn new(size: &ArtifactSize) -> Self {
        Self {
            path: size.path.display().to_string(),
            bytes: size.bytes,
            kb: kilobytes(size.bytes),
            formatted: format_bytes(size.bytes),
        }
    }
}

/// Budget check results for JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetInfo {
    /// "under_target", "above_target", "warning" or "over_budget"
    pub status: String,
    /// Whether budget check passed (true if not over_budget)
    pub passed: bool,
    /// Target size in KB (if set)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_kb: Option<u64>,
    /// Warning threshold in KB (if set)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warn_threshold_kb: Option<u64>,
    /// Max size in KB (if set)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size_kb: Option<u64>,
    /// Human-readable message
    pub message: String,
}

impl BudgetInfo {
    /// Convert from BudgetResult
    pub fn from_result(result: &BudgetResult) -> Self {
        Self {
            status: result.status.as_str().to_string(),
            passed: result.passed(),
            target_kb: result.budget.target_size_kb,
            warn_threshold_kb: result.budget.warn_threshold_kb,
            max_size_kb: result.budget.max_size_kb,
            message: result.message.clone(),
        }
    }
}

impl TestResultInfo {
    /// Entry for a passed instance
    pub fn passed(
        id: &str,
        target: Option<Target>,
        size: &ArtifactSize,
        budget: Option<&BudgetResult>,
    ) -> Self {
        Self {
            id: id.to_string(),
            target: target.map(|t| t.to_string()),
            passed: true,
            size: Some(SizeInfo::new(size)),
            budget: budget.map(BudgetInfo::from_result),
            error: None,
        }
    }

    /// Entry for a failed instance
    pub fn failed(id: &str, target: Option<Target>, error: &CookieSizeError) -> Self {
        Self {
            id: id.to_string(),
            target: target.map(|t| t.to_string()),
            passed: false,
            size: None,
            budget: None,
            error: Some(error.to_string()),
        }
    }

    /// Convert from a runner report
    pub fn from_report(report: &TestReport) -> Self {
        match &report.outcome {
            Outcome::Passed { size, budget } => Self::passed(
                &report.case.id,
                Some(report.case.target),
                size,
                budget.as_ref(),
            ),
            Outcome::Failed(e) => Self::failed(&report.case.id, Some(report.case.target), e),
        }
    }
}

impl JsonOutput {
    /// Output for a list of instance results
    pub fn new(results: Vec<TestResultInfo>) -> Self {
        Self {
            success: results.iter().all(|r| r.passed),
            test: TEST_NAME.to_string(),
            results,
        }
    }

    /// Output for a whole run
    pub fn from_summary(summary: &RunSummary) -> Self {
        Self::new(
            summary
                .reports
                .iter()
                .map(TestResultInfo::from_report)
                .collect(),
        )
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| anyhow::anyhow!("Failed to serialize JSON output: {}", e))
    }

    /// Print JSON to stdout
    pub fn print(&self) {
        match self.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error formatting JSON: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cicd::budget::BudgetChecker;
    use crate::config::SizeBudget;
    use crate::harness::TestCase;
    use std::path::PathBuf;

    fn artifact(bytes: u64) -> ArtifactSize {
        ArtifactSize {
            path: PathBuf::from("/tmp/build/cookie.bin"),
            bytes,
        }
    }

    #[test]
    fn test_size_info_uses_floor_kilobytes() {
        let info = SizeInfo::new(&artifact(204_800 + 1023));
        assert_eq!(info.kb, 200);
        assert_eq!(info.bytes, 205_823);
        assert_eq!(info.path, "/tmp/build/cookie.bin");
    }

    #[test]
    fn test_json_output_with_failure_is_not_success() {
        let ok = TestResultInfo::passed("test_build[esp32]", Some(Target::Esp32), &artifact(1024), None);
        let err = TestResultInfo::failed(
            "test_build[esp32s3]",
            Some(Target::Esp32s3),
            &CookieSizeError::ArtifactMissing {
                path: PathBuf::from("/tmp/build_esp32s3/cookie.bin"),
            },
        );

        let output = JsonOutput::new(vec![ok, err]);
        assert!(!output.success);
        assert_eq!(output.test, "test_build");
        assert!(output.results[1]
            .error
            .as_deref()
            .unwrap()
            .contains("Artifact not found"));
    }

    #[test]
    fn test_json_output_includes_budget() {
        let checker = BudgetChecker::new(SizeBudget {
            max_size_kb: Some(100),
            ..Default::default()
        });
        let budget = checker.check(200 * 1024);
        let info = TestResultInfo::passed("test_build", None, &artifact(200 * 1024), Some(&budget));

        let budget_info = info.budget.unwrap();
        assert_eq!(budget_info.status, "over_budget");
        assert!(!budget_info.passed);
        assert_eq!(budget_info.max_size_kb, Some(100));
    }

    #[test]
    fn test_from_report_carries_target() {
        let report = TestReport {
            case: TestCase::new(Target::Esp32c6),
            outcome: Outcome::Passed {
                size: artifact(2048),
                budget: None,
            },
        };
        let info = TestResultInfo::from_report(&report);
        assert_eq!(info.id, "test_build[esp32c6]");
        assert_eq!(info.target.as_deref(), Some("esp32c6"));
        assert_eq!(info.size.unwrap().kb, 2);
    }

    #[test]
    fn test_json_serialization_skips_empty_fields() {
        let output = JsonOutput::new(vec![TestResultInfo::passed(
            "test_build",
            None,
            &artifact(204_800),
            None,
        )]);
        let json = output.to_json().unwrap();
        assert!(json.contains("\"success\": true"));
        assert!(json.contains("\"kb\": 200"));
        assert!(!json.contains("\"error\""));
        assert!(!json.contains("\"target\""));

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["results"][0]["size"]["bytes"], 204_800);
    }
}

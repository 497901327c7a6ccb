//! Size budget enforcement for CI
//!
//! Three tiers, checked from the top:
//! - Max: hard limit, the run fails above it
//! - Warning: reported, the run still passes
//! - Target: the size the firmware should ideally stay under
//!
//! Thresholds are in KB and compared against the exact byte size, so an image
//! of `max * 1024` bytes is still within budget.

use console::style;

use crate::config::SizeBudget;
use crate::error::CookieSizeError;
use crate::fmt::{kilobytes, BYTES_PER_KB};

/// Status of size budget check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    /// At or under target
    UnderTarget,
    /// Above target, under warning threshold
    AboveTarget,
    /// Above warning threshold, under max
    Warning,
    /// Above max
    OverBudget,
}

impl BudgetStatus {
    /// Snake-case name used in JSON output
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnderTarget => "under_target",
            Self::AboveTarget => "above_target",
            Self::Warning => "warning",
            Self::OverBudget => "over_budget",
        }
    }
}

/// Result of a budget check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetResult {
    /// Budget status
    pub status: BudgetStatus,
    /// Measured size in bytes
    pub size_bytes: u64,
    /// Budget that was applied
    pub budget: SizeBudget,
    /// Human-readable message
    pub message: String,
}

impl BudgetResult {
    /// Whether the check passed (anything but over budget)
    pub fn passed(&self) -> bool {
        self.status != BudgetStatus::OverBudget
    }

    /// Print colored status lines
    pub fn print(&self) {
        let size = format!("{} KB", kilobytes(self.size_bytes));
        let (icon, size) = match self.status {
            BudgetStatus::UnderTarget | BudgetStatus::AboveTarget => {
                (style("✓").green(), style(size).green())
            }
            BudgetStatus::Warning => (style("!").yellow(), style(size).yellow()),
            BudgetStatus::OverBudget => (style("✗").red(), style(size).red()),
        };

        println!("   {} Size budget: {} ({})", icon, size, self.message);
        if let Some(max) = self.budget.max_size_kb {
            if self.status == BudgetStatus::OverBudget {
                println!("     {}", style(format!("Max: {} KB (EXCEEDED)", max)).red());
            } else {
                println!("     {}", style(format!("Max: {} KB", max)).dim());
            }
        }
    }
}

/// Size budget checker
pub struct BudgetChecker {
    budget: SizeBudget,
}

impl BudgetChecker {
    /// Create a new budget checker
    pub fn new(budget: SizeBudget) -> Self {
        Self { budget }
    }

    fn over(size_bytes: u64, limit_kb: Option<u64>) -> Option<u64> {
        let limit_kb = limit_kb?;
        let limit = limit_kb.saturating_mul(BYTES_PER_KB);
        (size_bytes > limit).then(|| size_bytes - limit)
    }

    fn determine_status(&self, size_bytes: u64) -> BudgetStatus {
        if Self::over(size_bytes, self.budget.max_size_kb).is_some() {
            return BudgetStatus::OverBudget;
        }
        if Self::over(size_bytes, self.budget.warn_threshold_kb).is_some() {
            return BudgetStatus::Warning;
        }
        match self.budget.target_size_kb {
            Some(_) if Self::over(size_bytes, self.budget.target_size_kb).is_some() => {
                BudgetStatus::AboveTarget
            }
            Some(_) => BudgetStatus::UnderTarget,
            None if self.budget.is_empty() => BudgetStatus::UnderTarget,
            None => BudgetStatus::AboveTarget,
        }
    }

    /// Check a size against the budget
    ///
    /// # Examples
    ///
    /// ```
    /// use cookie_size::cicd::{BudgetChecker, budget::BudgetStatus};
    /// use cookie_size::config::SizeBudget;
    ///
    /// let checker = BudgetChecker::new(SizeBudget {
    ///     target_size_kb: Some(150),
    ///     warn_threshold_kb: Some(200),
    ///     max_size_kb: Some(256),
    /// });
    /// let result = checker.check(180 * 1024);
    /// assert_eq!(result.status, BudgetStatus::AboveTarget);
    /// ```
    pub fn check(&self, size_bytes: u64) -> BudgetResult {
        let status = self.determine_status(size_bytes);

        let message = match status {
            BudgetStatus::UnderTarget => match self.budget.target_size_kb {
                Some(target) => format!(
                    "{} KB under target",
                    kilobytes(target.saturating_mul(BYTES_PER_KB) - size_bytes)
                ),
                None => "size OK".to_string(),
            },
            BudgetStatus::AboveTarget => match Self::over(size_bytes, self.budget.target_size_kb)
            {
                Some(excess) => format!("{} KB above target, within limits", kilobytes(excess)),
                None => "size OK".to_string(),
            },
            BudgetStatus::Warning => format!(
                "{} KB over warning threshold",
                kilobytes(Self::over(size_bytes, self.budget.warn_threshold_kb).unwrap_or_default())
            ),
            BudgetStatus::OverBudget => format!(
                "{} KB over max size",
                kilobytes(Self::over(size_bytes, self.budget.max_size_kb).unwrap_or_default())
            ),
        };

        BudgetResult {
            status,
            size_bytes,
            budget: self.budget.clone(),
            message,
        }
    }

    /// Check a size and fail with [`CookieSizeError::BudgetExceeded`] when over max
    pub fn enforce(&self, size_bytes: u64) -> Result<BudgetResult, CookieSizeError> {
        let result = self.check(size_bytes);
        match (result.status, self.budget.max_size_kb) {
            (BudgetStatus::OverBudget, Some(max_kb)) => {
                let max_allowed = max_kb.saturating_mul(BYTES_PER_KB);
                let percentage_over = if max_allowed == 0 {
                    100.0
                } else {
                    (size_bytes - max_allowed) as f64 / max_allowed as f64 * 100.0
                };
                Err(CookieSizeError::BudgetExceeded {
                    actual: size_bytes,
                    max_allowed,
                    percentage_over,
                })
            }
            _ => Ok(result),
        }
    }
}

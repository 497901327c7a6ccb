//! Error types with contextual suggestions
//!
//! Provides structured error types that include:
//! - Actionable error messages
//! - Suggested fixes
//! - Exit codes following sysexits.h conventions
//!
//! # Examples
//!
//! ```
//! use cookie_size::error::CookieSizeError;
//! use std::path::PathBuf;
//!
//! let err = CookieSizeError::ArtifactMissing {
//!     path: PathBuf::from("build/cookie.bin"),
//! };
//! assert_eq!(err.exit_code(), 66);
//! assert!(err.suggestion().unwrap().contains("idf.py build"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating and measuring a firmware artifact
#[derive(Error, Debug)]
pub enum CookieSizeError {
    /// The build produced no artifact at the expected path
    #[error("Artifact not found: {path}")]
    ArtifactMissing {
        /// Expected artifact path
        path: PathBuf,
    },

    /// The artifact exists but could not be stat'ed
    #[error("Cannot access artifact: {path}")]
    ArtifactAccess {
        /// Artifact path
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// The device under test carries no binary path
    #[error("Device under test has an empty binary path")]
    EmptyBinaryPath,

    /// No build directory could be resolved for a target
    #[error("No build directory for target '{target}' under {app_path}")]
    BinaryPathNotFound {
        /// Application directory that was searched
        app_path: PathBuf,
        /// Target being resolved
        target: String,
        /// Directories that were tried, in order
        candidates: Vec<PathBuf>,
    },

    /// Unrecognized target identifier
    #[error("Unknown target: '{name}'")]
    UnknownTarget {
        /// Name as given
        name: String,
        /// Known target identifiers
        available: Vec<String>,
    },

    /// Size budget exceeded
    #[error("Firmware size ({actual} bytes) exceeds maximum ({max_allowed} bytes)")]
    BudgetExceeded {
        /// Actual artifact size
        actual: u64,
        /// Maximum allowed size
        max_allowed: u64,
        /// Percentage over budget
        percentage_over: f64,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl CookieSizeError {
    /// Get actionable suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ArtifactMissing { path } => Some(format!(
                "Build the app first (idf.py build) so that {} is produced",
                path.display()
            )),
            Self::ArtifactAccess { path, .. } => Some(format!(
                "Check file permissions and that {} is readable",
                path.display()
            )),
            Self::EmptyBinaryPath => {
                Some("Pass --binary-path or run from an app directory with a build".to_string())
            }
            Self::BinaryPathNotFound { candidates, .. } => {
                let tried = candidates
                    .iter()
                    .map(|c| c.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                Some(format!("Looked in: {}", tried))
            }
            Self::UnknownTarget { available, .. } => {
                Some(format!("Known targets: {}", available.join(", ")))
            }
            Self::BudgetExceeded {
                percentage_over, ..
            } => Some(format!(
                "Image is {:.1}% over budget. Disable unused components in sdkconfig \
                 or raise max-size-kb in .cookie-size.toml",
                percentage_over
            )),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ArtifactMissing { .. } => 66,       // EX_NOINPUT
            Self::ArtifactAccess { .. } => 74,        // EX_IOERR
            Self::EmptyBinaryPath => 64,              // EX_USAGE
            Self::BinaryPathNotFound { .. } => 66,    // EX_NOINPUT
            Self::UnknownTarget { .. } => 64,         // EX_USAGE
            Self::BudgetExceeded { .. } => 1,         // CI should fail
            Self::Io { .. } => 74,                    // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and suggestion
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(cs_error) = Self::find(error) {
            if let Some(suggestion) = cs_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        Self::find(error).map_or(1, CookieSizeError::exit_code)
    }

    // Context layers wrap the typed error, so search the whole chain.
    fn find(error: &anyhow::Error) -> Option<&CookieSizeError> {
        error
            .chain()
            .find_map(|e| e.downcast_ref::<CookieSizeError>())
    }
}

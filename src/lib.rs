#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! cookie-size library
//!
//! Measures the firmware image (`cookie.bin`) an embedded build leaves in
//! its build directory and logs its size in kilobytes, once per hardware
//! target. It can be used programmatically in addition to the CLI.
//!
//! # Basic Example
//!
//! Reporting the image size for a device under test:
//!
//! ```
//! use cookie_size::dut::Dut;
//! use cookie_size::reporter::{measure, report_size};
//! use cookie_size::target::Target;
//! use tempfile::TempDir;
//!
//! let build = TempDir::new()?;
//! std::fs::write(build.path().join("cookie.bin"), vec![0u8; 204_800])?;
//!
//! let dut = Dut::with_binary_path(build.path(), Some(Target::Esp32));
//! report_size(&dut)?; // logs "blink_bin_size : 200KB"
//! assert_eq!(measure(&dut)?.kilobytes(), 200);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Running per target
//!
//! ```
//! use cookie_size::dut::BinaryPathResolver;
//! use cookie_size::harness::{parametrize, Runner};
//! use cookie_size::target::TargetSelector;
//! use tempfile::TempDir;
//!
//! let app = TempDir::new()?;
//! std::fs::create_dir(app.path().join("build_esp32"))?;
//! std::fs::write(app.path().join("build_esp32/cookie.bin"), vec![0u8; 4096])?;
//!
//! let cases = parametrize(&"esp32".parse::<TargetSelector>()?);
//! let summary = Runner::new(BinaryPathResolver::new(app.path())).run(&cases)?;
//! assert!(summary.all_passed());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// CI integration: size budgets and JSON output
pub mod cicd;
/// Command handlers for CLI operations
pub mod cmd;
/// Configuration file handling
pub mod config;
/// Device-under-test handle and build directory resolution
pub mod dut;
/// Error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Per-target test generation and execution
pub mod harness;
/// Infrastructure traits for filesystem access
pub mod infra;
/// Firmware artifact size reporting
pub mod reporter;
/// Hardware target identifiers
pub mod target;

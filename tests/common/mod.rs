//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - Fixture creation for app directories with build outputs
//! - Capture of log records emitted by the library

pub mod capture;
pub mod fixtures;

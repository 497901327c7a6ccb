//! Test fixture helpers for creating app directories
//!
//! Lays out an app the way an embedded build leaves it: one build directory
//! per target (`build_<target>`) or a shared `build/`, each holding a
//! `cookie.bin` image of a chosen size.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// File name of the firmware image
pub const ARTIFACT: &str = "cookie.bin";

/// An app directory kept alive for the duration of a test
pub struct AppFixture {
    dir: TempDir,
}

impl AppFixture {
    /// Empty app directory
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// Path of the app directory
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a `len`-byte image into `<app>/<build_dir>/cookie.bin`
    pub fn with_image(self, build_dir: &str, len: usize) -> anyhow::Result<Self> {
        let dir = self.path().join(build_dir);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(ARTIFACT), vec![0x5Au8; len])?;
        Ok(self)
    }

    /// Create `<app>/<build_dir>` without an image in it
    pub fn with_empty_build_dir(self, build_dir: &str) -> anyhow::Result<Self> {
        fs::create_dir_all(self.path().join(build_dir))?;
        Ok(self)
    }

    /// Write `.cookie-size.toml`
    pub fn with_config(self, contents: &str) -> anyhow::Result<Self> {
        fs::write(self.path().join(".cookie-size.toml"), contents)?;
        Ok(self)
    }

    /// Path of a build directory inside the app
    pub fn build_dir(&self, build_dir: &str) -> PathBuf {
        self.path().join(build_dir)
    }
}

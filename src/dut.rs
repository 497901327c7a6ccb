//! Device-under-test handle and build directory resolution
//!
//! A [`Dut`] is what the harness hands to a test: the target it was
//! parametrized with and an [`App`] descriptor whose `binary_path` points at
//! the build output directory. Tests only read from it.

use std::path::{Path, PathBuf};

use crate::error::CookieSizeError;
use crate::infra::{FileSystem, RealFileSystem};
use crate::target::Target;

/// Default build directory name
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Application descriptor exposed by a device under test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    /// Application source directory
    pub app_path: PathBuf,
    /// Directory holding the build outputs
    pub binary_path: PathBuf,
}

/// Device under test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dut {
    /// Target the test instance was parametrized with, if any
    pub target: Option<Target>,
    /// Application built for this device
    pub app: App,
}

impl Dut {
    /// DUT whose binary path is given directly
    pub fn with_binary_path(binary_path: impl Into<PathBuf>, target: Option<Target>) -> Self {
        let binary_path = binary_path.into();
        let app_path = binary_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            target,
            app: App {
                app_path,
                binary_path,
            },
        }
    }
}

/// Resolves the build directory of an app for a given target
///
/// Candidates are tried in order and the first existing directory wins:
/// `build_<target>_<config>` (when a build config is set), `build_<target>`,
/// then `build`.
#[derive(Debug, Clone)]
pub struct BinaryPathResolver {
    app_path: PathBuf,
    build_config: Option<String>,
}

impl BinaryPathResolver {
    /// Create a resolver rooted at `app_path`
    pub fn new(app_path: impl Into<PathBuf>) -> Self {
        Self {
            app_path: app_path.into(),
            build_config: None,
        }
    }

    /// Prefer `build_<target>_<config>` directories
    pub fn with_build_config(mut self, config: Option<String>) -> Self {
        self.build_config = config.filter(|c| !c.is_empty());
        self
    }

    /// Candidate directories for `target`, most specific first
    pub fn candidates(&self, target: Target) -> Vec<PathBuf> {
        let mut dirs = Vec::with_capacity(3);
        if let Some(config) = &self.build_config {
            dirs.push(
                self.app_path
                    .join(format!("{}_{}_{}", DEFAULT_BUILD_DIR, target, config)),
            );
        }
        dirs.push(self.app_path.join(format!("{}_{}", DEFAULT_BUILD_DIR, target)));
        dirs.push(self.app_path.join(DEFAULT_BUILD_DIR));
        dirs
    }

    /// Build a [`Dut`] for `target`
    pub fn resolve(&self, target: Target) -> Result<Dut, CookieSizeError> {
        self.resolve_with_fs(target, &RealFileSystem)
    }

    /// Build a [`Dut`] for `target` with a custom filesystem implementation
    pub fn resolve_with_fs<FS: FileSystem>(
        &self,
        target: Target,
        fs: &FS,
    ) -> Result<Dut, CookieSizeError> {
        let candidates = self.candidates(target);
        match candidates.iter().find(|dir| fs.is_dir(dir)) {
            Some(dir) => {
                log::debug!("{}: binary path {}", target, dir.display());
                Ok(Dut {
                    target: Some(target),
                    app: App {
                        app_path: self.app_path.clone(),
                        binary_path: dir.clone(),
                    },
                })
            }
            None => Err(CookieSizeError::BinaryPathNotFound {
                app_path: self.app_path.clone(),
                target: target.to_string(),
                candidates,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_with_binary_path_sets_app_path_to_parent() {
        let dut = Dut::with_binary_path("/tmp/app/build", Some(Target::Esp32));
        assert_eq!(dut.app.binary_path, PathBuf::from("/tmp/app/build"));
        assert_eq!(dut.app.app_path, PathBuf::from("/tmp/app"));
        assert_eq!(dut.target, Some(Target::Esp32));
    }

    #[test]
    fn test_candidates_order_with_config() {
        let resolver =
            BinaryPathResolver::new("app").with_build_config(Some("release".to_string()));
        assert_eq!(
            resolver.candidates(Target::Esp32s3),
            vec![
                PathBuf::from("app/build_esp32s3_release"),
                PathBuf::from("app/build_esp32s3"),
                PathBuf::from("app/build"),
            ]
        );
    }

    #[test]
    fn test_empty_build_config_is_ignored() {
        let resolver = BinaryPathResolver::new("app").with_build_config(Some(String::new()));
        assert_eq!(resolver.candidates(Target::Esp32).len(), 2);
    }

    #[test]
    fn test_resolve_prefers_target_specific_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("build")).unwrap();
        fs::create_dir(temp_dir.path().join("build_esp32c3")).unwrap();

        let resolver = BinaryPathResolver::new(temp_dir.path());
        let dut = resolver.resolve(Target::Esp32c3).unwrap();
        assert_eq!(dut.app.binary_path, temp_dir.path().join("build_esp32c3"));

        let dut = resolver.resolve(Target::Esp32).unwrap();
        assert_eq!(dut.app.binary_path, temp_dir.path().join("build"));
    }

    #[test]
    fn test_resolve_without_build_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        let err = BinaryPathResolver::new(temp_dir.path())
            .resolve(Target::Esp32)
            .unwrap_err();
        match err {
            CookieSizeError::BinaryPathNotFound {
                target, candidates, ..
            } => {
                assert_eq!(target, "esp32");
                assert_eq!(candidates.len(), 2);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_plain_file_named_build_is_not_a_candidate() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("build"), b"not a dir").unwrap();
        assert!(BinaryPathResolver::new(temp_dir.path())
            .resolve(Target::Esp32)
            .is_err());
    }
}

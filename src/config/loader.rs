//! Configuration file loading

use super::file::{ConfigFile, CONFIG_FILE_NAME};
use crate::error::CookieSizeError;
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use std::path::Path;

/// Handles loading configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from .cookie-size.toml in the given app directory
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cookie_size::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("Size budget: {:?}", config.size_budget);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(app_path: &Path) -> Result<ConfigFile> {
        Self::load_with_fs(app_path, &RealFileSystem)
    }

    /// Load config with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(app_path: &Path, fs: &FS) -> Result<ConfigFile> {
        let config_path = app_path.join(CONFIG_FILE_NAME);

        let contents = match fs.read_to_string(&config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no {} in {}, using defaults", CONFIG_FILE_NAME, app_path.display());
                return Ok(ConfigFile::default());
            }
            Err(source) => {
                return Err(CookieSizeError::Io {
                    context: format!("reading {}", config_path.display()),
                    source,
                }
                .into());
            }
        };

        let config: ConfigFile =
            toml_edit::de::from_str(&contents).context("Failed to parse .cookie-size.toml")?;

        if let Some(ref budget) = config.size_budget {
            budget
                .validate()
                .context("Invalid size budget configuration")?;
        }

        Ok(config)
    }

    /// Check if config file exists in the app directory
    pub fn exists(app_path: &Path) -> bool {
        app_path.join(CONFIG_FILE_NAME).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct MockFileSystem {
        file_content: Option<String>,
        should_fail_read: bool,
    }

    impl MockFileSystem {
        fn new() -> Self {
            Self {
                file_content: None,
                should_fail_read: false,
            }
        }

        fn with_content(content: &str) -> Self {
            Self {
                file_content: Some(content.to_string()),
                should_fail_read: false,
            }
        }

        fn with_read_error() -> Self {
            Self {
                file_content: None,
                should_fail_read: true,
            }
        }
    }

    impl FileSystem for MockFileSystem {
        fn read_to_string(&self, _path: &Path) -> io::Result<String> {
            if self.should_fail_read {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "permission denied",
                ));
            }
            self.file_content
                .clone()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "file not found"))
        }

        fn file_len(&self, _path: &Path) -> io::Result<u64> {
            unimplemented!()
        }

        fn is_dir(&self, _path: &Path) -> bool {
            unimplemented!()
        }

        fn write(&self, _path: &Path, _contents: impl AsRef<[u8]>) -> io::Result<()> {
            unimplemented!()
        }
    }

    #[test]
    fn test_loader_loads_from_valid_toml() {
        let temp = tempfile::tempdir().unwrap();
        let toml_content = r#"
targets = ["esp32", "esp32s3"]
build-config = "release"

[size-budget]
max-size-kb = 256
warn-threshold-kb = 200
"#;
        std::fs::write(temp.path().join(CONFIG_FILE_NAME), toml_content).unwrap();

        let config = ConfigLoader::load(temp.path()).unwrap();
        assert_eq!(config.build_config.as_deref(), Some("release"));
        let budget = config.size_budget.unwrap();
        assert_eq!(budget.max_size_kb, Some(256));
        assert_eq!(budget.warn_threshold_kb, Some(200));
        assert_eq!(budget.target_size_kb, None);
    }

    #[test]
    fn test_loader_with_missing_file_uses_defaults() {
        let fs = MockFileSystem::new();
        let config = ConfigLoader::load_with_fs(Path::new("/test"), &fs).unwrap();
        assert!(config.targets.is_none());
        assert!(config.size_budget.is_none());
    }

    #[test]
    fn test_loader_with_invalid_toml_returns_error() {
        let fs = MockFileSystem::with_content("invalid { toml syntax");
        let result = ConfigLoader::load_with_fs(Path::new("/test"), &fs);
        assert!(result.is_err(), "Expected error for invalid TOML");
    }

    #[test]
    fn test_loader_with_permission_error_returns_error() {
        let fs = MockFileSystem::with_read_error();
        let result = ConfigLoader::load_with_fs(Path::new("/test"), &fs);

        let err = result.unwrap_err();
        assert!(err.to_string().contains("reading /test/.cookie-size.toml"));
        assert_eq!(crate::error::ErrorFormatter::exit_code(&err), 74);
    }

    #[test]
    fn test_loader_rejects_misordered_budget() {
        let fs = MockFileSystem::with_content(
            r#"
[size-budget]
target-size-kb = 500
max-size-kb = 100
"#,
        );
        let err = ConfigLoader::load_with_fs(Path::new("/test"), &fs).unwrap_err();
        assert!(err.to_string().contains("Invalid size budget"));
    }

    #[test]
    fn test_loader_handles_empty_file() {
        let fs = MockFileSystem::with_content("");
        assert!(ConfigLoader::load_with_fs(Path::new("/test"), &fs).is_ok());
    }

    #[test]
    fn test_exists_tracks_file_presence() {
        let temp = tempfile::tempdir().unwrap();
        assert!(!ConfigLoader::exists(temp.path()));
        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "").unwrap();
        assert!(ConfigLoader::exists(temp.path()));
    }
}

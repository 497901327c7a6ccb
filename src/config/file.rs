//! Configuration file data structures

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::CookieSizeError;
use crate::target::TargetSelector;

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".cookie-size.toml";

/// cookie-size configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Targets to run the size test for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<TargetsSetting>,

    /// Build configuration suffix (`build_<target>_<config>`)
    #[serde(rename = "build-config", skip_serializing_if = "Option::is_none")]
    pub build_config: Option<String>,

    /// Size budget settings
    #[serde(rename = "size-budget", skip_serializing_if = "Option::is_none")]
    pub size_budget: Option<SizeBudget>,
}

impl ConfigFile {
    /// Target selector configured in the file, defaulting to all supported targets
    pub fn target_selector(&self) -> Result<TargetSelector, CookieSizeError> {
        match &self.targets {
            None => Ok(TargetSelector::default()),
            Some(TargetsSetting::Selector(s)) => s.parse(),
            Some(TargetsSetting::List(items)) => TargetSelector::from_items(items),
        }
    }
}

/// `targets` may be a selector string or a list of target names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetsSetting {
    /// `"supported_targets"`, `"preview_targets"` or `"esp32,esp32s3"`
    Selector(String),
    /// `["esp32", "esp32s3"]`
    List(Vec<String>),
}

/// Size budget configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeBudget {
    /// Maximum size in KB (hard limit, CI fails)
    #[serde(rename = "max-size-kb", skip_serializing_if = "Option::is_none")]
    pub max_size_kb: Option<u64>,

    /// Warning threshold in KB (CI passes with warning)
    #[serde(rename = "warn-threshold-kb", skip_serializing_if = "Option::is_none")]
    pub warn_threshold_kb: Option<u64>,

    /// Target size in KB (ideal target)
    #[serde(rename = "target-size-kb", skip_serializing_if = "Option::is_none")]
    pub target_size_kb: Option<u64>,
}

impl SizeBudget {
    /// Whether any threshold is set
    pub fn is_empty(&self) -> bool {
        self.max_size_kb.is_none()
            && self.warn_threshold_kb.is_none()
            && self.target_size_kb.is_none()
    }

    /// Validate that budget thresholds are properly ordered
    ///
    /// Ensures: target <= warn <= max
    pub fn validate(&self) -> Result<()> {
        if let (Some(target), Some(warn)) = (self.target_size_kb, self.warn_threshold_kb) {
            if target > warn {
                anyhow::bail!(
                    "Target size ({} KB) cannot exceed warning threshold ({} KB)",
                    target,
                    warn
                );
            }
        }

        if let (Some(warn), Some(max)) = (self.warn_threshold_kb, self.max_size_kb) {
            if warn > max {
                anyhow::bail!(
                    "Warning threshold ({} KB) cannot exceed max size ({} KB)",
                    warn,
                    max
                );
            }
        }

        if let (Some(target), Some(max)) = (self.target_size_kb, self.max_size_kb) {
            if target > max {
                anyhow::bail!(
                    "Target size ({} KB) cannot exceed max size ({} KB)",
                    target,
                    max
                );
            }
        }

        Ok(())
    }
}

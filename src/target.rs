//! Hardware target identifiers and target selection
//!
//! A selector is either one of the harness keywords (`supported_targets`,
//! `preview_targets`) or an explicit comma-separated list of chip names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CookieSizeError;

/// Keyword selecting every supported target
pub const SUPPORTED_TARGETS: &str = "supported_targets";

/// Keyword selecting every preview target
pub const PREVIEW_TARGETS: &str = "preview_targets";

/// A chip the firmware can be built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// ESP32
    Esp32,
    /// ESP32-S2
    Esp32s2,
    /// ESP32-S3
    Esp32s3,
    /// ESP32-C2
    Esp32c2,
    /// ESP32-C3
    Esp32c3,
    /// ESP32-C5
    Esp32c5,
    /// ESP32-C6
    Esp32c6,
    /// ESP32-H2
    Esp32h2,
    /// ESP32-P4
    Esp32p4,
    /// ESP32-C61 (preview)
    Esp32c61,
    /// ESP32-H21 (preview)
    Esp32h21,
    /// ESP32-H4 (preview)
    Esp32h4,
}

impl Target {
    /// Targets with full support
    pub const SUPPORTED: &'static [Target] = &[
        Target::Esp32,
        Target::Esp32s2,
        Target::Esp32s3,
        Target::Esp32c2,
        Target::Esp32c3,
        Target::Esp32c5,
        Target::Esp32c6,
        Target::Esp32h2,
        Target::Esp32p4,
    ];

    /// Targets still in preview
    pub const PREVIEW: &'static [Target] = &[Target::Esp32c61, Target::Esp32h21, Target::Esp32h4];

    /// Identifier as used in build directory names and test ids
    pub fn as_str(self) -> &'static str {
        match self {
            Target::Esp32 => "esp32",
            Target::Esp32s2 => "esp32s2",
            Target::Esp32s3 => "esp32s3",
            Target::Esp32c2 => "esp32c2",
            Target::Esp32c3 => "esp32c3",
            Target::Esp32c5 => "esp32c5",
            Target::Esp32c6 => "esp32c6",
            Target::Esp32h2 => "esp32h2",
            Target::Esp32p4 => "esp32p4",
            Target::Esp32c61 => "esp32c61",
            Target::Esp32h21 => "esp32h21",
            Target::Esp32h4 => "esp32h4",
        }
    }

    /// Whether the target is in preview
    pub fn is_preview(self) -> bool {
        Self::PREVIEW.contains(&self)
    }

    fn all() -> impl Iterator<Item = Target> {
        Self::SUPPORTED.iter().chain(Self::PREVIEW).copied()
    }

    fn known_names() -> Vec<String> {
        Self::all().map(|t| t.as_str().to_string()).collect()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = CookieSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| CookieSizeError::UnknownTarget {
                name: s.to_string(),
                available: Self::known_names(),
            })
    }
}

/// Which targets a test is parametrized over
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TargetSelector {
    /// All supported targets
    #[default]
    Supported,
    /// All preview targets
    Preview,
    /// An explicit list, in the order given
    Explicit(Vec<Target>),
}

impl TargetSelector {
    /// Expand the selector into target identifiers, without duplicates
    pub fn targets(&self) -> Vec<Target> {
        match self {
            Self::Supported => Target::SUPPORTED.to_vec(),
            Self::Preview => Target::PREVIEW.to_vec(),
            Self::Explicit(list) => {
                let mut out: Vec<Target> = Vec::with_capacity(list.len());
                for t in list {
                    if !out.contains(t) {
                        out.push(*t);
                    }
                }
                out
            }
        }
    }

    /// Parse a list of selector items, as found in config files
    pub fn from_items<S: AsRef<str>>(items: &[S]) -> Result<Self, CookieSizeError> {
        match items {
            [single] => single.as_ref().parse(),
            _ => items
                .iter()
                .map(|s| s.as_ref().parse::<Target>())
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Explicit),
        }
    }
}

impl FromStr for TargetSelector {
    type Err = CookieSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            SUPPORTED_TARGETS => Ok(Self::Supported),
            PREVIEW_TARGETS => Ok(Self::Preview),
            list => list
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .map(str::parse::<Target>)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Explicit),
        }
    }
}

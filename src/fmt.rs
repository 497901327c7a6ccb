//! Shared formatting utilities for size display and console output

use console::Emoji;

/// Rocket emoji for launch/start operations
pub const ROCKET: Emoji = Emoji("🚀", ">");

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Crossmark emoji for failure
pub const CROSSMARK: Emoji = Emoji("❌", "[FAIL]");

/// Chart emoji for metrics/statistics
pub const CHART: Emoji = Emoji("📊", "~");

/// Bytes per kilobyte used for every size the tool reports
pub const BYTES_PER_KB: u64 = 1024;

/// Whole kilobytes in `bytes`, rounded down.
///
/// # Examples
///
/// ```
/// use cookie_size::fmt::kilobytes;
///
/// assert_eq!(kilobytes(0), 0);
/// assert_eq!(kilobytes(1023), 0);
/// assert_eq!(kilobytes(1024), 1);
/// assert_eq!(kilobytes(204_800), 200);
/// ```
pub fn kilobytes(bytes: u64) -> u64 {
    bytes / BYTES_PER_KB
}

/// Format bytes as human-readable size string
///
/// # Examples
///
/// ```
/// use cookie_size::fmt::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1_048_576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = BYTES_PER_KB;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Pick the emoji or its plain fallback, honoring `NO_EMOJI`.
pub fn icon(emoji: Emoji<'static, 'static>) -> &'static str {
    if std::env::var_os("NO_EMOJI").is_some() {
        emoji.1
    } else {
        emoji.0
    }
}

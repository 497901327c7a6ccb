//! Firmware artifact size reporting
//!
//! Stats `<binary_path>/cookie.bin` on a device under test and logs its size
//! in whole kilobytes. Only the file length is inspected, never its contents.

use std::io;
use std::path::PathBuf;

use crate::dut::Dut;
use crate::error::CookieSizeError;
use crate::fmt::kilobytes;
use crate::infra::{FileSystem, RealFileSystem};

/// File name of the firmware image produced by the build
pub const ARTIFACT_NAME: &str = "cookie.bin";

/// Measured size of a firmware artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSize {
    /// Path that was measured
    pub path: PathBuf,
    /// Length in bytes
    pub bytes: u64,
}

impl ArtifactSize {
    /// Whole kilobytes, rounded down
    pub fn kilobytes(&self) -> u64 {
        kilobytes(self.bytes)
    }
}

/// The log line emitted for an artifact of `size_kb` kilobytes
pub fn size_line(size_kb: u64) -> String {
    format!("blink_bin_size : {}KB", size_kb)
}

/// Measure the artifact of `dut` without logging
pub fn measure(dut: &Dut) -> Result<ArtifactSize, CookieSizeError> {
    measure_with_fs(dut, &RealFileSystem)
}

/// Measure with a custom filesystem implementation
pub fn measure_with_fs<FS: FileSystem>(dut: &Dut, fs: &FS) -> Result<ArtifactSize, CookieSizeError> {
    let binary_path = &dut.app.binary_path;
    if binary_path.as_os_str().is_empty() {
        return Err(CookieSizeError::EmptyBinaryPath);
    }

    let path = binary_path.join(ARTIFACT_NAME);
    match fs.file_len(&path) {
        Ok(bytes) => Ok(ArtifactSize { path, bytes }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(CookieSizeError::ArtifactMissing { path })
        }
        Err(source) => Err(CookieSizeError::ArtifactAccess { path, source }),
    }
}

/// Log the size of the firmware image built for `dut`.
///
/// Emits one info record, `blink_bin_size : <kb>KB`. Nothing is logged when
/// the artifact is missing or cannot be stat'ed.
///
/// # Examples
///
/// ```
/// use cookie_size::dut::Dut;
/// use cookie_size::reporter::report_size;
/// use tempfile::TempDir;
///
/// let build = TempDir::new()?;
/// std::fs::write(build.path().join("cookie.bin"), vec![0u8; 204_800])?;
///
/// report_size(&Dut::with_binary_path(build.path(), None))?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn report_size(dut: &Dut) -> Result<(), CookieSizeError> {
    report_size_with_fs(dut, &RealFileSystem).map(|_| ())
}

/// Log the size with a custom filesystem implementation, returning what was measured
pub fn report_size_with_fs<FS: FileSystem>(
    dut: &Dut,
    fs: &FS,
) -> Result<ArtifactSize, CookieSizeError> {
    let size = measure_with_fs(dut, fs)?;
    log::debug!("{}: {} bytes", size.path.display(), size.bytes);
    log::info!("{}", size_line(size.kilobytes()));
    Ok(size)
}

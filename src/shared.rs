//! Keyed shared buffers in the system temp directory.
//!
//! A shared buffer is a mapped region whose backing file lives at
//! `$TMPDIR/<key>`, so any process that knows the key can map the same
//! bytes. Reopening an existing key preserves its content; if the existing
//! file's size differs from the requested one, the existing size wins and a
//! warning is logged.

use std::fs;
use std::path::PathBuf;

use log::warn;

use crate::errors::Result;
use crate::region::MappedRegion;

/// Buffer size used when a shared buffer is requested with size zero.
pub const DEFAULT_SHARED_SIZE: u64 = 10 * 1024 * 1024;

/// Path of the backing file for a shared-buffer key.
#[must_use]
pub fn shared_path(key: &str) -> PathBuf {
    std::env::temp_dir().join(key)
}

/// Map the shared buffer identified by `key`.
///
/// A missing (or empty) backing file is created and zero-filled; an existing
/// one is mapped as-is with its content preserved. `size == 0` selects
/// [`DEFAULT_SHARED_SIZE`]. When an existing file's size differs from the
/// request, the file's size is used instead and a warning is logged.
///
/// # Errors
///
/// Returns errors from `MappedRegion::map`.
///
/// # Examples
///
/// ```no_run
/// let mut buf = mmap_region::open_shared("my-app.cache", 4096)?;
/// buf.as_mut_slice()?[0] = 1;
/// # Ok::<(), mmap_region::RegionError>(())
/// ```
pub fn open_shared(key: &str, size: u64) -> Result<MappedRegion> {
    let path = shared_path(key);
    let requested = if size == 0 { DEFAULT_SHARED_SIZE } else { size };

    let existing = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
    if existing == 0 {
        return MappedRegion::map(&path, requested, false);
    }
    if existing != requested {
        warn!(
            "shared buffer {key:?} already exists with size {existing}, \
             using that instead of requested {requested}"
        );
    }
    MappedRegion::map(&path, existing, true)
}

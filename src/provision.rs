//! File provisioning: open or create the backing file and size it for mapping.
//!
//! This is the only module with disk side effects. The returned `File` is
//! owned by the caller, who must keep it open only long enough to create the
//! mapping.

use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::Path;

use log::debug;

use crate::errors::{RegionError, Result};

/// Chunk size for explicit zero-fill writes.
pub(crate) const FILL_CHUNK: usize = 64 * 1024;

/// Open or create the backing file at `path` and ensure it is sized for a
/// `length`-byte mapping.
///
/// With `preallocated == false` the file gets fresh-file semantics: it is
/// truncated on open and then extended to exactly `length` bytes by writing
/// zeros. The extension is an explicit write rather than a sparse
/// `set_len`, so the blocks are allocated on disk before mapping and later
/// page faults cannot fail on an out-of-space condition.
///
/// With `preallocated == true` the file's existing content and length are
/// preserved; the caller asserts the file is already at least `length` bytes
/// and this is verified before returning.
///
/// # Errors
///
/// Returns `RegionError::InvalidArguments` if `length` is zero or does not
/// fit the address space.
/// Returns `RegionError::OpenFailed` if the file cannot be opened or created.
/// Returns `RegionError::AllocationFailed` on a short write, an I/O error
/// while extending, or an undersized preallocated file.
pub fn provision(path: &Path, length: u64, preallocated: bool) -> Result<File> {
    check_length(length)?;

    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(!preallocated)
        .open(path)
        .map_err(|source| RegionError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;

    if preallocated {
        let on_disk = file
            .metadata()
            .map_err(|e| RegionError::AllocationFailed(e.to_string()))?
            .len();
        if on_disk < length {
            return Err(RegionError::AllocationFailed(format!(
                "preallocated file is {on_disk} bytes, mapping needs {length}"
            )));
        }
    } else {
        extend_with_zeros(&mut file, length)?;
        debug!("extended {} to {} bytes", path.display(), length);
    }

    Ok(file)
}

/// Validate a requested mapping length without touching the filesystem.
///
/// # Errors
///
/// Returns `RegionError::InvalidArguments` if `length` is zero or exceeds
/// the platform's addressable range.
pub(crate) fn check_length(length: u64) -> Result<()> {
    if length == 0 {
        return Err(RegionError::InvalidArguments("length must be non-zero"));
    }
    if usize::try_from(length).is_err() {
        return Err(RegionError::InvalidArguments(
            "length exceeds addressable space",
        ));
    }
    Ok(())
}

/// Append exactly `length` zero bytes, verifying every write's count.
/// A write returning zero bytes is a short write and fails the allocation.
fn extend_with_zeros(file: &mut File, length: u64) -> Result<()> {
    file.seek(SeekFrom::End(0))
        .map_err(|e| RegionError::AllocationFailed(e.to_string()))?;

    let chunk = [0u8; FILL_CHUNK];
    let mut remaining = length;
    while remaining > 0 {
        // Truncation is safe: the value is capped at FILL_CHUNK.
        #[allow(clippy::cast_possible_truncation)]
        let want = remaining.min(FILL_CHUNK as u64) as usize;
        match file.write(&chunk[..want]) {
            Ok(0) => {
                return Err(RegionError::AllocationFailed(format!(
                    "short write: {remaining} of {length} bytes unwritten"
                )));
            }
            Ok(n) => remaining -= n as u64,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(RegionError::AllocationFailed(e.to_string())),
        }
    }
    Ok(())
}

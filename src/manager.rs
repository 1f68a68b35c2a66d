//! High-level API for managing file-backed regions.
//!
//! Provides convenience functions that wrap the region lifecycle operations.

use std::fs;
use std::path::Path;

use crate::errors::{RegionError, Result};
use crate::region::{MappedRegion, MappingRequest};

/// Map `length` bytes of the file at `path` into memory.
///
/// With `preallocated == false` the file is created (or truncated) and
/// zero-filled to exactly `length` bytes first; with `true` the existing
/// file is preserved and must already be at least `length` bytes.
///
/// # Errors
///
/// Returns errors from `MappedRegion::map`.
pub fn map_region<P: AsRef<Path>>(path: P, length: u64, preallocated: bool) -> Result<MappedRegion> {
    MappedRegion::map(path, length, preallocated)
}

/// Map the region described by a [`MappingRequest`].
///
/// # Errors
///
/// Returns errors from `MappingRequest::map`.
pub fn map_request(request: &MappingRequest) -> Result<MappedRegion> {
    request.map()
}

/// Release a region's mapping, exactly once.
///
/// # Errors
///
/// Returns errors from `MappedRegion::release`, including
/// `RegionError::DoubleRelease` on a second call for the same region.
pub fn release_region(region: &mut MappedRegion) -> Result<()> {
    region.release()
}

/// Delete the file backing a mapping path. Release (or drop) regions over the
/// path before invoking this; on Unix, deleting an open file keeps the data
/// alive until the last mapping goes away.
///
/// # Errors
///
/// Returns `RegionError::OpenFailed` if the delete operation fails.
pub fn remove_region_file<P: AsRef<Path>>(path: P) -> Result<()> {
    fs::remove_file(path.as_ref()).map_err(|source| RegionError::OpenFailed {
        path: path.as_ref().to_path_buf(),
        source,
    })
}

#[cfg(feature = "async")]
pub mod r#async {
    //! Async helpers (Tokio) for provisioning backing files without blocking
    //! the current thread. The mapping call itself stays synchronous; it has
    //! no suspension point.

    use std::io;
    use std::path::Path;

    use tokio::fs as tfs;
    use tokio::io::{AsyncSeekExt, AsyncWriteExt};

    use crate::errors::{RegionError, Result};
    use crate::provision::FILL_CHUNK;
    use crate::region::MappedRegion;

    /// Provision the backing file via Tokio, then map it.
    ///
    /// Same semantics and error taxonomy as `MappedRegion::map`; only the
    /// file creation and zero-fill run on the async runtime.
    ///
    /// # Errors
    ///
    /// Returns the same errors as `MappedRegion::map`.
    pub async fn map_region_async<P: AsRef<Path>>(
        path: P,
        length: u64,
        preallocated: bool,
    ) -> Result<MappedRegion> {
        let path_ref = path.as_ref();
        crate::provision::check_length(length)?;

        let mut file = tfs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(!preallocated)
            .open(path_ref)
            .await
            .map_err(|source| RegionError::OpenFailed {
                path: path_ref.to_path_buf(),
                source,
            })?;

        if preallocated {
            let on_disk = file
                .metadata()
                .await
                .map_err(|e| RegionError::AllocationFailed(e.to_string()))?
                .len();
            if on_disk < length {
                return Err(RegionError::AllocationFailed(format!(
                    "preallocated file is {on_disk} bytes, mapping needs {length}"
                )));
            }
        } else {
            extend_with_zeros(&mut file, length).await?;
        }

        // Hand the provisioned file to the synchronous mapping path.
        drop(file);
        MappedRegion::map(path_ref, length, true)
    }

    /// Delete a backing file asynchronously.
    ///
    /// # Errors
    ///
    /// Returns `RegionError::OpenFailed` if the delete operation fails.
    pub async fn remove_region_file_async<P: AsRef<Path>>(path: P) -> Result<()> {
        tfs::remove_file(path.as_ref())
            .await
            .map_err(|source| RegionError::OpenFailed {
                path: path.as_ref().to_path_buf(),
                source,
            })
    }

    async fn extend_with_zeros(file: &mut tfs::File, length: u64) -> Result<()> {
        file.seek(io::SeekFrom::End(0))
            .await
            .map_err(|e| RegionError::AllocationFailed(e.to_string()))?;

        let chunk = [0u8; FILL_CHUNK];
        let mut remaining = length;
        while remaining > 0 {
            // Truncation is safe: the value is capped at FILL_CHUNK.
            #[allow(clippy::cast_possible_truncation)]
            let want = remaining.min(FILL_CHUNK as u64) as usize;
            match file.write(&chunk[..want]).await {
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
        file.flush()
            .await
            .map_err(|e| RegionError::AllocationFailed(e.to_string()))
    }
}

//! Crate-specific error types for mmap-region.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias for mmap-region operations.
pub type Result<T> = std::result::Result<T, RegionError>;

/// Error type covering provisioning, mapping, and lifecycle misuse.
///
/// Every variant is terminal for the operation that raised it; nothing is
/// retried internally. Partial progress is unwound by the component that made
/// it, so no variant ever accompanies a half-valid region.
#[derive(Debug, Error)]
pub enum RegionError {
    /// The backing file could not be opened or created.
    #[error("open failed for {}: {source}", path.display())]
    OpenFailed {
        /// Path of the backing file.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// The backing file could not be sized to the requested length
    /// (short write, disk full, I/O error, or an undersized preallocated file).
    #[error("allocation failed: {0}")]
    AllocationFailed(String),

    /// The OS declined to create the mapping.
    #[error("mapping failed: {0}")]
    MapFailed(#[source] io::Error),

    /// The OS reported an error while tearing the mapping down.
    /// The region is still marked released; the address must not be reused.
    #[error("unmap failed: {0}")]
    UnmapFailed(#[source] io::Error),

    /// A release (or access) was attempted on a region already released.
    /// Rejected before any OS call is made.
    #[error("region already released")]
    DoubleRelease,

    /// A request argument was rejected before touching the filesystem.
    #[error("invalid arguments: {0}")]
    InvalidArguments(&'static str),
}

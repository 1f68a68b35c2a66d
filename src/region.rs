//! The mapped-region entity: one live mapping, released exactly once.

use std::fmt;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;
use std::slice;

use log::debug;

use crate::errors::{RegionError, Result};
use crate::provision::{check_length, provision};
use crate::sys;

/// Lifecycle state of a [`MappedRegion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionState {
    /// The mapping is live and the address range is dereferenceable.
    Active,
    /// Terminal state: teardown has happened (or was attempted). The stored
    /// address must never be dereferenced again.
    Released,
}

/// Immutable description of a mapping to create.
///
/// `preallocated` selects the provisioning branch: `false` (the default)
/// truncates the file and zero-fills it to exactly `length` bytes; `true`
/// asserts the file already holds at least `length` bytes and preserves its
/// content.
///
/// # Examples
///
/// ```no_run
/// use mmap_region::MappingRequest;
///
/// let region = MappingRequest::new("data.bin", 4096).map()?;
/// assert_eq!(region.len(), 4096);
/// # Ok::<(), mmap_region::RegionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MappingRequest {
    path: PathBuf,
    length: u64,
    preallocated: bool,
}

impl MappingRequest {
    /// Describe a fresh-file mapping of `length` bytes at `path`.
    pub fn new<P: AsRef<Path>>(path: P, length: u64) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            length,
            preallocated: false,
        }
    }

    /// Set whether the file is asserted to be already sized.
    #[must_use]
    pub fn preallocated(mut self, preallocated: bool) -> Self {
        self.preallocated = preallocated;
        self
    }

    /// Target path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Requested mapping length in bytes.
    #[must_use]
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Whether the file is asserted to be already sized.
    #[must_use]
    pub fn is_preallocated(&self) -> bool {
        self.preallocated
    }

    /// Provision the backing file and map it.
    ///
    /// # Errors
    ///
    /// Returns errors from [`MappedRegion::map`].
    pub fn map(&self) -> Result<MappedRegion> {
        MappedRegion::map(&self.path, self.length, self.preallocated)
    }
}

/// A contiguous read-write region of address space backed by a file.
///
/// A region is created by a successful [`map`](MappedRegion::map) call and
/// owns the OS mapping until [`release`](MappedRegion::release) transitions
/// it to [`RegionState::Released`]; that transition happens exactly once.
/// No two live regions alias each other's address ranges, so concurrent use
/// of different regions needs no synchronization.
///
/// The raw address from [`as_ptr`](MappedRegion::as_ptr) is a borrowed view:
/// callers at a host-runtime boundary decide when to release, but must not
/// retain or use the address afterwards. Dropping a still-active region
/// unmaps it best-effort; only `release` reports teardown errors.
///
/// # Examples
///
/// ```no_run
/// use mmap_region::MappedRegion;
///
/// let mut region = MappedRegion::map("data.bin", 4096, false)?;
/// region.as_mut_slice()?[10] = 0xAB;
/// region.release()?;
/// # Ok::<(), mmap_region::RegionError>(())
/// ```
pub struct MappedRegion {
    addr: NonNull<u8>,
    len: usize,
    state: RegionState,
}

// SAFETY: the region is the sole owner of its mapping and the mapped pages
// are valid from any thread of the process. Mutation and teardown both
// require `&mut self`, so shared references only ever read.
unsafe impl Send for MappedRegion {}
// SAFETY: see above; `&MappedRegion` exposes read-only access.
unsafe impl Sync for MappedRegion {}

impl fmt::Debug for MappedRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappedRegion")
            .field("addr", &self.addr.as_ptr())
            .field("len", &self.len)
            .field("state", &self.state)
            .finish()
    }
}

impl MappedRegion {
    /// Provision the backing file at `path` and map `length` bytes of it
    /// read-write and shared, starting at file offset 0.
    ///
    /// The file handle is needed only to create the mapping and is closed
    /// before this function returns, on success and on failure alike.
    ///
    /// # Errors
    ///
    /// Returns `RegionError::InvalidArguments` for a zero or unaddressable
    /// `length`, `RegionError::OpenFailed` / `RegionError::AllocationFailed`
    /// from provisioning, and `RegionError::MapFailed` if the OS declines
    /// the mapping.
    pub fn map<P: AsRef<Path>>(path: P, length: u64, preallocated: bool) -> Result<Self> {
        check_length(length)?;
        // Validated above to fit usize.
        #[allow(clippy::cast_possible_truncation)]
        let len = length as usize;

        let file = provision(path.as_ref(), length, preallocated)?;
        let addr = sys::map_file(&file, len).map_err(RegionError::MapFailed)?;
        // The mapping keeps the file's data reachable without the handle.
        drop(file);

        debug!("mapped {} bytes of {}", len, path.as_ref().display());
        Ok(Self {
            addr,
            len,
            state: RegionState::Active,
        })
    }

    /// Tear the mapping down and transition to [`RegionState::Released`].
    ///
    /// The transition happens even when the OS reports a teardown error:
    /// partial unmap state is unrecoverable from user space, so the address
    /// is treated as invalid from here on regardless.
    ///
    /// # Errors
    ///
    /// Returns `RegionError::DoubleRelease` (before any OS call) if the
    /// region was already released, or `RegionError::UnmapFailed` if the OS
    /// call reports an error.
    pub fn release(&mut self) -> Result<()> {
        if self.state == RegionState::Released {
            return Err(RegionError::DoubleRelease);
        }
        self.state = RegionState::Released;
        // SAFETY: the region was Active, so `addr`/`len` describe a live
        // mapping owned by us, and `&mut self` excludes live borrows into it.
        let outcome = unsafe { sys::unmap_file(self.addr, self.len) };
        debug!("released {} bytes at {:p}", self.len, self.addr.as_ptr());
        outcome.map_err(RegionError::UnmapFailed)
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> RegionState {
        self.state
    }

    /// Whether the mapping is still live.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == RegionState::Active
    }

    /// Base address of the mapping.
    ///
    /// Valid only while the region is active; callers holding the raw
    /// pointer across [`release`](MappedRegion::release) are on their own.
    #[must_use]
    pub fn as_ptr(&self) -> *mut u8 {
        self.addr.as_ptr()
    }

    /// Length of the mapping in bytes. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the region is empty. Always false: zero-length mapping
    /// requests are rejected up front.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// View the region as a byte slice.
    ///
    /// # Errors
    ///
    /// Returns `RegionError::DoubleRelease` if the region was released.
    pub fn as_slice(&self) -> Result<&[u8]> {
        if !self.is_active() {
            return Err(RegionError::DoubleRelease);
        }
        // SAFETY: active region, so the range is mapped readable; the borrow
        // of `self` keeps `release` (which needs `&mut`) away meanwhile.
        Ok(unsafe { slice::from_raw_parts(self.addr.as_ptr(), self.len) })
    }

    /// View the region as a mutable byte slice.
    ///
    /// # Errors
    ///
    /// Returns `RegionError::DoubleRelease` if the region was released.
    pub fn as_mut_slice(&mut self) -> Result<&mut [u8]> {
        if !self.is_active() {
            return Err(RegionError::DoubleRelease);
        }
        // SAFETY: as for `as_slice`, plus `&mut self` makes the view unique.
        Ok(unsafe { slice::from_raw_parts_mut(self.addr.as_ptr(), self.len) })
    }
}

impl Drop for MappedRegion {
    fn drop(&mut self) {
        if self.state == RegionState::Active {
            self.state = RegionState::Released;
            // SAFETY: the region was Active and is dropping, so the mapping
            // is live and no borrow into it can outlive us.
            if let Err(e) = unsafe { sys::unmap_file(self.addr, self.len) } {
                debug!("unmap during drop failed: {e}");
            }
        }
    }
}

//! POSIX mapping calls (`mmap`/`munmap`).

use std::fs::File;
use std::io;
use std::os::unix::io::AsRawFd;
use std::ptr::{self, NonNull};

/// Map `len` bytes of `file` read-write and shared, starting at offset 0.
///
/// The returned address stays valid after `file` is closed; the mapping
/// keeps the file's data reachable independent of the descriptor.
pub(crate) fn map_file(file: &File, len: usize) -> io::Result<NonNull<u8>> {
    // SAFETY: the descriptor is open for the duration of the call and `len`
    // is non-zero (validated by the provisioner).
    let addr = unsafe {
        libc::mmap(
            ptr::null_mut(),
            len,
            libc::PROT_READ | libc::PROT_WRITE,
            libc::MAP_SHARED,
            file.as_raw_fd(),
            0,
        )
    };
    if addr == libc::MAP_FAILED {
        return Err(io::Error::last_os_error());
    }
    NonNull::new(addr.cast::<u8>()).ok_or_else(|| io::Error::other("mmap returned null"))
}

/// Unmap `[addr, addr + len)`.
///
/// # Safety
///
/// `addr` must be the base address of a live mapping of exactly `len` bytes
/// created by [`map_file`], and no live reference into the range may exist.
pub(crate) unsafe fn unmap_file(addr: NonNull<u8>, len: usize) -> io::Result<()> {
    if libc::munmap(addr.as_ptr().cast::<libc::c_void>(), len) != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

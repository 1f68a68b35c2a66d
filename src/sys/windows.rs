//! Win32 mapping calls (`CreateFileMappingW`/`MapViewOfFile`/`UnmapViewOfFile`).

use core::ffi::c_void;
use std::fs::File;
use std::io;
use std::os::windows::io::AsRawHandle;
use std::ptr::{self, NonNull};

const PAGE_READWRITE: u32 = 0x04;
const FILE_MAP_WRITE: u32 = 0x0002;
const FILE_MAP_READ: u32 = 0x0004;

#[allow(non_snake_case)]
extern "system" {
    fn CreateFileMappingW(
        hFile: *mut c_void,
        lpFileMappingAttributes: *mut c_void,
        flProtect: u32,
        dwMaximumSizeHigh: u32,
        dwMaximumSizeLow: u32,
        lpName: *const u16,
    ) -> *mut c_void;
    fn MapViewOfFile(
        hFileMappingObject: *mut c_void,
        dwDesiredAccess: u32,
        dwFileOffsetHigh: u32,
        dwFileOffsetLow: u32,
        dwNumberOfBytesToMap: usize,
    ) -> *mut c_void;
    fn UnmapViewOfFile(lpBaseAddress: *const c_void) -> i32;
    fn CloseHandle(hObject: *mut c_void) -> i32;
}

/// Map `len` bytes of `file` read-write and shared, starting at offset 0.
///
/// The file-mapping object handle is closed before returning on every path;
/// a successful view holds its own reference to the mapping object, so the
/// view (and the caller's file handle) are the only things left to manage.
pub(crate) fn map_file(file: &File, len: usize) -> io::Result<NonNull<u8>> {
    // SAFETY: the file handle is open for the duration of the call. Maximum
    // size 0/0 sizes the mapping object to the file, which provisioning
    // guarantees is at least `len` bytes.
    let mapping = unsafe {
        CreateFileMappingW(
            file.as_raw_handle(),
            ptr::null_mut(),
            PAGE_READWRITE,
            0,
            0,
            ptr::null(),
        )
    };
    if mapping.is_null() {
        return Err(io::Error::last_os_error());
    }

    // SAFETY: `mapping` is a valid non-null mapping-object handle.
    let view = unsafe { MapViewOfFile(mapping, FILE_MAP_READ | FILE_MAP_WRITE, 0, 0, len) };
    // Capture the view error before CloseHandle can clobber GetLastError.
    let view_err = io::Error::last_os_error();
    // SAFETY: `mapping` came from CreateFileMappingW and is closed exactly once.
    unsafe { CloseHandle(mapping) };

    match NonNull::new(view.cast::<u8>()) {
        Some(addr) => Ok(addr),
        None => Err(view_err),
    }
}

/// Unmap the view based at `addr`. The length is implicit in the view on
/// this platform; the parameter exists for signature parity with POSIX.
///
/// # Safety
///
/// `addr` must be the base address of a live view created by [`map_file`],
/// and no live reference into the range may exist.
pub(crate) unsafe fn unmap_file(addr: NonNull<u8>, _len: usize) -> io::Result<()> {
    if UnmapViewOfFile(addr.as_ptr().cast::<c_void>().cast_const()) == 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

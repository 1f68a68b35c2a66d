//! # mmap-region: file-backed memory regions with an explicit lifecycle
//!
//! This crate backs a region of process address space with a regular file:
//! it creates or opens the file, optionally pre-extends it to a target
//! length by writing zeros, maps the bytes as one contiguous read-write
//! region, and later tears the mapping down exactly once.
//!
//! ## Features
//!
//! - **Explicit lifecycle**: regions are `Active` until released; a second
//!   release is rejected instead of corrupting address space
//! - **Real pre-allocation**: fresh files are zero-filled with verified
//!   writes, so page faults on the mapped region cannot hit out-of-space
//! - **Cross-platform**: POSIX `mmap` and Win32 `MapViewOfFile` behind one
//!   interface
//! - **Shared by design**: writes through a region are visible to other
//!   mappings of the same file
//!
//! ## Quick Start
//!
//! ```no_run
//! use mmap_region::{map_region, release_region};
//!
//! // Create a 4KB zero-filled file and map it
//! let mut region = map_region("data.bin", 4096, false)?;
//!
//! // Write through the mapping
//! region.as_mut_slice()?[10] = 0xAB;
//!
//! // Tear the mapping down; the byte is in the file
//! release_region(&mut region)?;
//! # Ok::<(), mmap_region::RegionError>(())
//! ```
//!
//! ## Modules
//!
//! - [`errors`]: Error types for all region operations
//! - [`provision`]: Backing-file creation and zero-fill pre-allocation
//! - [`region`]: Core [`MappedRegion`] implementation
//! - [`manager`]: High-level convenience functions
//! - [`shared`]: Keyed shared buffers in the temp directory
//!
//! ## Feature Flags
//!
//! - `async`: Enables Tokio-based async provisioning helpers

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(missing_docs)]
#![doc(html_root_url = "https://docs.rs/mmap-region")]

pub mod errors;
pub mod manager;
pub mod provision;
pub mod region;
pub mod shared;
mod sys;

pub use errors::RegionError;
pub use manager::{map_region, map_request, release_region, remove_region_file};
pub use region::{MappedRegion, MappingRequest, RegionState};
pub use shared::{open_shared, DEFAULT_SHARED_SIZE};

//! Platform-specific mapping calls behind a single capability.
//!
//! Each platform module exports the same two functions, selected at compile
//! time: `map_file` creates a read-write shared mapping over an open file,
//! `unmap_file` tears one down. All platform divergence (handle types,
//! teardown sequences) stays inside this module.

cfg_if::cfg_if! {
    if #[cfg(windows)] {
        mod windows;
        pub(crate) use windows::{map_file, unmap_file};
    } else {
        mod unix;
        pub(crate) use unix::{map_file, unmap_file};
    }
}

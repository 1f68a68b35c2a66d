#![cfg(feature = "async")]
//! Async provisioning tests: mapping after Tokio-based file creation.

use mmap_region::manager::r#async::{map_region_async, remove_region_file_async};
use mmap_region::RegionError;
use std::fs;
use std::path::PathBuf;

fn tmp_path(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!(
        "mmap_region_async_test_{}_{}",
        name,
        std::process::id()
    ));
    p
}

#[tokio::test(flavor = "multi_thread")]
async fn async_map_creates_sized_zero_file() {
    let path = tmp_path("async_map_creates");
    let _ = fs::remove_file(&path);

    let mut region = map_region_async(&path, 4096, false)
        .await
        .expect("map_region_async");
    assert_eq!(region.len(), 4096);
    assert!(region.as_slice().expect("slice").iter().all(|&b| b == 0));

    region.as_mut_slice().expect("slice_mut")[10] = 0xAB;
    region.release().expect("release");

    let bytes = fs::read(&path).expect("read");
    assert_eq!(bytes.len(), 4096);
    assert_eq!(bytes[10], 0xAB);

    remove_region_file_async(&path)
        .await
        .expect("remove_region_file_async");
    assert!(!path.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn async_map_rejects_undersized_preallocated_file() {
    let path = tmp_path("async_undersized");
    let _ = fs::remove_file(&path);
    fs::write(&path, b"short").expect("seed file");

    let err = map_region_async(&path, 4096, true)
        .await
        .expect_err("undersized");
    assert!(matches!(err, RegionError::AllocationFailed(_)));

    let _ = fs::remove_file(&path);
}

#[tokio::test(flavor = "multi_thread")]
async fn async_map_rejects_zero_length() {
    let path = tmp_path("async_zero_length");
    let _ = fs::remove_file(&path);

    let err = map_region_async(&path, 0, false)
        .await
        .expect_err("zero length");
    assert!(matches!(err, RegionError::InvalidArguments(_)));
    assert!(!path.exists());
}

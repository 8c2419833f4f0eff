//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Version line printed by `pippin --version`.
pub fn version_line() -> String {
    format!(
        "pippin {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}

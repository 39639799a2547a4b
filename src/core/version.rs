//! Build metadata generated by the build script

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// On-disk layout version of the queue's key scheme
pub fn storage_format_version() -> u32 {
    STORAGE_FORMAT_VERSION.parse().unwrap_or(1)
}

/// Build time string from the build script (UTC)
pub fn build_time() -> &'static str {
    BUILD_TIME
}

/// Short git hash captured by the build script
pub fn git_hash() -> &'static str {
    GIT_HASH
}

/// Multi-line version text for `durq --version`
pub fn long_version() -> String {
    format!(
        "{}\nstorage format: v{}\nbuilt: {}\ncommit: {}",
        env!("CARGO_PKG_VERSION"),
        storage_format_version(),
        build_time(),
        git_hash()
    )
}

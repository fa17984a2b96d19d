//! Host operating system and processor detection.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::builder::platform::Platform;

/// Release file read on POSIX-like systems.
pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Facts about the host, collected once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlatformInfo {
    /// OS identification keys (`ID`, `VERSION_ID`, `PRETTY_NAME`, ...)
    pub os: BTreeMap<String, String>,

    /// Number of logical processors
    pub num_proc: usize,
}

impl PlatformInfo {
    /// Probe the host using the given platform's OS identity source.
    pub fn probe(platform: &dyn Platform) -> Self {
        let info = PlatformInfo {
            os: platform.os_identity(),
            num_proc: num_cpus::get(),
        };

        tracing::info!(
            "Host: {} ({} logical processors)",
            info.display_name(),
            info.num_proc
        );
        tracing::debug!("OS info: {:?}", info.os);

        info
    }

    /// Human-readable OS name, falling back to `ID`.
    pub fn display_name(&self) -> &str {
        self.os
            .get("PRETTY_NAME")
            .or_else(|| self.os.get("ID"))
            .map(String::as_str)
            .unwrap_or("unknown OS")
    }
}

/// Parse `key=value` lines of an os-release file.
///
/// Lines without `=` are skipped; double quotes are stripped from values.
pub fn parse_os_release(contents: &str) -> BTreeMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.to_string(), value.replace('"', "")))
        .collect()
}

/// Read and parse an os-release file. A missing file yields an empty map.
pub fn read_os_release(path: &Path) -> BTreeMap<String, String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_os_release(&contents),
        Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            BTreeMap::new()
        }
    }
}

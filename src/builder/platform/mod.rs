//! Platform strategies for the configure and build steps.
//!
//! Everything that differs between Windows and POSIX hosts lives behind the
//! [`Platform`] trait, so the command builders never branch on the OS.

use std::collections::BTreeMap;
use std::path::Path;

use crate::ops::rmake_build::BuildOptions;
use crate::util::errors::RmakeError;

mod posix;
mod windows;

pub use posix::PosixPlatform;
pub use windows::WindowsPlatform;

/// The family of a host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    /// Linux and other POSIX-like systems (Makefile generator)
    Posix,
    /// Windows (Ninja generator)
    Windows,
}

/// Trait for platform implementations.
pub trait Platform: Send + Sync {
    /// Get the platform family.
    fn kind(&self) -> PlatformKind;

    /// OS identification keys for this host.
    fn os_identity(&self) -> BTreeMap<String, String>;

    /// Render a path the way CMake expects it on this platform.
    ///
    /// Paths that are not valid UTF-8 are rejected rather than mangled.
    fn cmake_path(&self, path: &Path) -> Result<String, RmakeError>;

    /// Environment variable overriding the install root.
    fn install_root_var(&self) -> &'static str;

    /// Install root used when no override is set.
    fn default_install_root(&self) -> &'static str;

    /// CMake generator selection (`-G ...`), if any.
    fn generator_args(&self) -> Vec<String>;

    /// Toolchain file passed as `CMAKE_TOOLCHAIN_FILE`.
    ///
    /// `source` is the source path already rendered by [`Platform::cmake_path`].
    fn toolchain_file(&self, source: &str) -> String;

    /// Packaging and install-prefix defines.
    fn install_args(&self, install_root: &str) -> Vec<String>;

    /// The configuration tool.
    fn configure_program(&self) -> &'static str {
        "cmake"
    }

    /// The program driving the build step.
    fn build_program(&self) -> &'static str;

    /// Arguments for the build step.
    fn build_args(&self, opts: &BuildOptions, jobs: usize) -> Vec<String>;
}

/// Get the platform strategy for the host this binary was compiled for.
pub fn host_platform() -> Box<dyn Platform> {
    if cfg!(windows) {
        Box::new(WindowsPlatform)
    } else {
        Box::new(PosixPlatform)
    }
}

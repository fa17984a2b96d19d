//! Linux and other POSIX-like hosts: Makefile generator, `make` build tool.

use std::collections::BTreeMap;
use std::path::Path;

use super::{Platform, PlatformKind};
use crate::ops::rmake_build::BuildOptions;
use crate::util::errors::RmakeError;
use crate::util::fs::utf8_path;
use crate::util::os_info::{read_os_release, OS_RELEASE_PATH};

/// Install prefix, relative to the build directory.
const INSTALL_PREFIX: &str = "rocfft-install";

/// POSIX platform strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct PosixPlatform;

impl Platform for PosixPlatform {
    fn kind(&self) -> PlatformKind {
        PlatformKind::Posix
    }

    fn os_identity(&self) -> BTreeMap<String, String> {
        read_os_release(Path::new(OS_RELEASE_PATH))
    }

    fn cmake_path(&self, path: &Path) -> Result<String, RmakeError> {
        utf8_path(path).map(str::to_string)
    }

    fn install_root_var(&self) -> &'static str {
        "ROCM_PATH"
    }

    fn default_install_root(&self) -> &'static str {
        "/opt/rocm"
    }

    fn generator_args(&self) -> Vec<String> {
        Vec::new()
    }

    fn toolchain_file(&self, _source: &str) -> String {
        "toolchain-linux.cmake".to_string()
    }

    fn install_args(&self, install_root: &str) -> Vec<String> {
        vec![
            format!("-DROCM_DIR:PATH={}", install_root),
            format!("-DCPACK_PACKAGING_INSTALL_PREFIX={}", install_root),
            format!("-DCMAKE_INSTALL_PREFIX={}", INSTALL_PREFIX),
        ]
    }

    fn build_program(&self) -> &'static str {
        "make"
    }

    fn build_args(&self, opts: &BuildOptions, jobs: usize) -> Vec<String> {
        let mut args = vec![format!("-j{}", jobs)];
        if opts.verbose {
            args.push("VERBOSE=1".to_string());
        }
        if opts.install {
            args.push("install".to_string());
        }
        args
    }
}

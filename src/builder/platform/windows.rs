//! Windows hosts: Ninja generator, `cmake --build` build driver.

use std::collections::BTreeMap;
use std::path::Path;

use super::{Platform, PlatformKind};
use crate::ops::rmake_build::BuildOptions;
use crate::util::errors::RmakeError;
use crate::util::fs::utf8_path;

/// Windows platform strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsPlatform;

impl Platform for WindowsPlatform {
    fn kind(&self) -> PlatformKind {
        PlatformKind::Windows
    }

    fn os_identity(&self) -> BTreeMap<String, String> {
        BTreeMap::from([("ID".to_string(), "Windows".to_string())])
    }

    fn cmake_path(&self, path: &Path) -> Result<String, RmakeError> {
        Ok(utf8_path(path)?.replace('\\', "/"))
    }

    fn install_root_var(&self) -> &'static str {
        "ROCM_CMAKE_PATH"
    }

    // Not a real ROCm root; HIP_DIR from the toolchain file is what matters.
    fn default_install_root(&self) -> &'static str {
        "C:/github/rocm-cmake-master/share/rocm"
    }

    fn generator_args(&self) -> Vec<String> {
        vec!["-G".to_string(), "Ninja".to_string()]
    }

    fn toolchain_file(&self, source: &str) -> String {
        format!("{}/toolchain-windows.cmake", source.trim_end_matches('/'))
    }

    // CPACK_PACKAGING_INSTALL_PREFIX stays blank: it is appended to the
    // archive path.
    fn install_args(&self, _install_root: &str) -> Vec<String> {
        vec![
            "-DCPACK_PACKAGING_INSTALL_PREFIX=".to_string(),
            "-DCMAKE_INSTALL_PREFIX=C:/hipSDK".to_string(),
        ]
    }

    fn build_program(&self) -> &'static str {
        "cmake.exe"
    }

    fn build_args(&self, opts: &BuildOptions, _jobs: usize) -> Vec<String> {
        let mut args = vec!["--build".to_string(), ".".to_string()];
        if opts.verbose {
            args.push("--verbose".to_string());
        }
        args.extend(["--target".to_string(), "all".to_string()]);
        if opts.install {
            for target in ["package", "install"] {
                args.push("--target".to_string());
                args.push(target.to_string());
            }
        }
        args
    }
}

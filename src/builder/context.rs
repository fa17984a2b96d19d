//! Build context - host platform, environment, and working directory.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::builder::platform::{host_platform, Platform};
use crate::ops::rmake_build::BuildOptions;
use crate::util::env::Environment;
use crate::util::errors::RmakeError;
use crate::util::fs::absolutize;
use crate::util::os_info::PlatformInfo;

/// Environment variable forwarded as `CMAKE_CXX_COMPILER_LAUNCHER`.
pub const COMPILER_LAUNCHER_VAR: &str = "CMAKE_CXX_COMPILER_LAUNCHER";

/// Everything the command builders read besides the [`BuildOptions`].
#[derive(Clone)]
pub struct BuildContext {
    /// Platform strategy
    pub platform: Arc<dyn Platform>,

    /// Probed host information
    pub info: PlatformInfo,

    /// Environment snapshot
    pub env: Environment,

    /// Directory rmake was invoked from
    pub cwd: PathBuf,
}

impl fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildContext")
            .field("platform", &self.platform.kind())
            .field("info", &self.info)
            .field("env", &self.env)
            .field("cwd", &self.cwd)
            .finish()
    }
}

impl BuildContext {
    /// Create a build context from its parts.
    pub fn new(
        platform: Arc<dyn Platform>,
        info: PlatformInfo,
        env: Environment,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        BuildContext {
            platform,
            info,
            env,
            cwd: cwd.into(),
        }
    }

    /// Probe the host platform and capture the process environment.
    pub fn from_host() -> Result<Self, RmakeError> {
        let platform: Arc<dyn Platform> = Arc::from(host_platform());
        let info = PlatformInfo::probe(platform.as_ref());
        let cwd = std::env::current_dir().map_err(|e| RmakeError::filesystem(".", e))?;

        Ok(BuildContext::new(
            platform,
            info,
            Environment::from_process(),
            cwd,
        ))
    }

    /// The source tree to configure. Defaults to the working directory.
    pub fn source_dir(&self, opts: &BuildOptions) -> PathBuf {
        match &opts.source_dir {
            Some(dir) => absolutize(dir, &self.cwd),
            None => self.cwd.clone(),
        }
    }

    /// Install root: environment override, then config, then platform default.
    pub fn install_root(&self, opts: &BuildOptions) -> String {
        self.env
            .get(self.platform.install_root_var())
            .map(str::to_string)
            .or_else(|| opts.paths.rocm.clone())
            .unwrap_or_else(|| self.platform.default_install_root().to_string())
    }

    /// Compiler launcher: environment override, then config.
    pub fn compiler_launcher(&self, opts: &BuildOptions) -> Option<String> {
        self.env
            .get(COMPILER_LAUNCHER_VAR)
            .map(str::to_string)
            .or_else(|| opts.paths.compiler_launcher.clone())
    }

    /// Parallel jobs for the build tool.
    pub fn jobs(&self, opts: &BuildOptions) -> usize {
        opts.jobs.unwrap_or(self.info.num_proc).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::platform::{PosixPlatform, WindowsPlatform};

    fn posix_ctx(env: Environment) -> BuildContext {
        BuildContext::new(
            Arc::new(PosixPlatform),
            PlatformInfo {
                num_proc: 12,
                ..Default::default()
            },
            env,
            "/work/rocFFT",
        )
    }

    #[test]
    fn test_install_root_precedence() {
        let mut opts = BuildOptions::default();

        let ctx = posix_ctx(Environment::empty());
        assert_eq!(ctx.install_root(&opts), "/opt/rocm");

        opts.paths.rocm = Some("/opt/rocm-6.0".to_string());
        assert_eq!(ctx.install_root(&opts), "/opt/rocm-6.0");

        let ctx = posix_ctx(Environment::empty().with_var("ROCM_PATH", "/usr/local/rocm"));
        assert_eq!(ctx.install_root(&opts), "/usr/local/rocm");
    }

    #[test]
    fn test_windows_reads_its_own_variable() {
        let ctx = BuildContext::new(
            Arc::new(WindowsPlatform),
            PlatformInfo::default(),
            Environment::empty()
                .with_var("ROCM_PATH", "/opt/rocm")
                .with_var("ROCM_CMAKE_PATH", "D:/rocm-cmake/share/rocm"),
            r"C:\src\rocFFT",
        );
        assert_eq!(
            ctx.install_root(&BuildOptions::default()),
            "D:/rocm-cmake/share/rocm"
        );
    }

    #[test]
    fn test_compiler_launcher_precedence() {
        let mut opts = BuildOptions::default();
        assert_eq!(posix_ctx(Environment::empty()).compiler_launcher(&opts), None);

        opts.paths.compiler_launcher = Some("sccache".to_string());
        assert_eq!(
            posix_ctx(Environment::empty()).compiler_launcher(&opts).as_deref(),
            Some("sccache")
        );

        let ctx = posix_ctx(Environment::empty().with_var(COMPILER_LAUNCHER_VAR, "ccache"));
        assert_eq!(ctx.compiler_launcher(&opts).as_deref(), Some("ccache"));
    }

    #[test]
    fn test_jobs() {
        let ctx = posix_ctx(Environment::empty());
        let mut opts = BuildOptions::default();
        assert_eq!(ctx.jobs(&opts), 12);

        opts.jobs = Some(3);
        assert_eq!(ctx.jobs(&opts), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_source_dir() {
        let ctx = posix_ctx(Environment::empty());
        let mut opts = BuildOptions::default();
        assert_eq!(ctx.source_dir(&opts), PathBuf::from("/work/rocFFT"));

        opts.source_dir = Some(PathBuf::from("../rocFFT-dev"));
        assert_eq!(
            ctx.source_dir(&opts),
            PathBuf::from("/work/rocFFT/../rocFFT-dev")
        );
    }
}

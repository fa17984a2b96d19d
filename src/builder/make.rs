//! Build-step command construction.

use std::path::Path;

use crate::builder::context::BuildContext;
use crate::builder::CommandSpec;
use crate::ops::rmake_build::BuildOptions;

/// Assemble the build (and optional install) command.
///
/// The command runs inside the configured build tree at `build_path`.
pub fn build_command(opts: &BuildOptions, ctx: &BuildContext, build_path: &Path) -> CommandSpec {
    let platform = ctx.platform.as_ref();

    CommandSpec::new(platform.build_program())
        .args(platform.build_args(opts, ctx.jobs(opts)))
        .cwd(build_path)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use super::*;
    use crate::builder::platform::{PosixPlatform, WindowsPlatform};
    use crate::util::env::Environment;
    use crate::util::os_info::PlatformInfo;

    fn ctx(windows: bool) -> BuildContext {
        let info = PlatformInfo {
            num_proc: 8,
            ..Default::default()
        };
        if windows {
            BuildContext::new(Arc::new(WindowsPlatform), info, Environment::empty(), "C:/src")
        } else {
            BuildContext::new(Arc::new(PosixPlatform), info, Environment::empty(), "/src")
        }
    }

    #[test]
    fn test_posix_install_target() {
        let build_path = PathBuf::from("/src/build/release");
        let mut opts = BuildOptions::default();

        let cmd = build_command(&opts, &ctx(false), &build_path);
        assert_eq!(cmd.program, PathBuf::from("make"));
        assert_eq!(cmd.args, vec!["-j8"]);
        assert!(!cmd.has_arg("install"));
        assert_eq!(cmd.cwd.as_deref(), Some(build_path.as_path()));

        opts.install = true;
        let cmd = build_command(&opts, &ctx(false), &build_path);
        assert!(cmd.has_arg("install"));
    }

    #[test]
    fn test_posix_jobs_override() {
        let opts = BuildOptions {
            jobs: Some(2),
            verbose: true,
            ..Default::default()
        };
        let cmd = build_command(&opts, &ctx(false), Path::new("/src/build/debug"));
        assert_eq!(cmd.args, vec!["-j2", "VERBOSE=1"]);
    }

    #[test]
    fn test_windows_build_uses_cmake() {
        let opts = BuildOptions {
            install: true,
            ..Default::default()
        };
        let cmd = build_command(&opts, &ctx(true), Path::new("C:/src/build/release"));
        assert_eq!(cmd.program, PathBuf::from("cmake.exe"));
        assert_eq!(&cmd.args[..2], &["--build", "."]);
        assert!(cmd.has_arg("package"));
        assert!(cmd.has_arg("install"));
    }
}

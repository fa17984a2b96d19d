//! CMake command construction.
//!
//! The configure and build steps each produce a [`CommandSpec`]; the
//! platform-specific parts come from a [`Platform`] implementation.

pub mod configure;
pub mod context;
pub mod make;
pub mod platform;

use std::path::{Path, PathBuf};

use serde::Serialize;

pub use configure::{build_output_path, configure_command, ConfigurePlan};
pub use context::BuildContext;
pub use make::build_command;
pub use platform::{host_platform, Platform, PlatformKind, PosixPlatform, WindowsPlatform};

/// A command to execute, with program, arguments, and working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    /// The program to run (e.g., "cmake", "make")
    pub program: PathBuf,
    /// Command arguments
    pub args: Vec<String>,
    /// Directory the command runs in (None = inherit)
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Create a new command spec.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(|a| a.into()));
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Check whether any argument equals `arg`.
    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }

    /// Display the command line.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_spec_builder() {
        let cmd = CommandSpec::new("make")
            .args(["-j8", "VERBOSE=1", "install"])
            .cwd("/tmp/build");

        assert_eq!(cmd.args, vec!["-j8", "VERBOSE=1", "install"]);
        assert_eq!(cmd.cwd, Some(PathBuf::from("/tmp/build")));
        assert!(cmd.has_arg("install"));
        assert!(!cmd.has_arg("all"));
        assert_eq!(cmd.display_command(), "make -j8 VERBOSE=1 install");
    }
}

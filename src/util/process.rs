//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::builder::CommandSpec;
use crate::util::errors::RmakeError;

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Create a process builder from a command spec.
    pub fn from_spec(spec: &CommandSpec) -> Self {
        let builder = ProcessBuilder::new(&spec.program).args(&spec.args);
        match &spec.cwd {
            Some(cwd) => builder.cwd(cwd),
            None => builder,
        }
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Build the Command.
    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Run to completion with stderr merged into our stdout.
    ///
    /// Output streams straight to the terminal. A non-zero exit status is
    /// reported as [`RmakeError::BuildFailure`].
    pub fn exec_streaming(&self) -> Result<(), RmakeError> {
        tracing::info!("Running `{}`", self.display_command());
        if let Some(ref cwd) = self.cwd {
            tracing::debug!("in {}", cwd.display());
        }

        let mut cmd = self.build_command();
        cmd.stdin(Stdio::inherit());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::from(io::stdout()));

        let status = cmd.status().map_err(|source| RmakeError::Spawn {
            program: self.program.display().to_string(),
            source,
        })?;

        if !status.success() {
            return Err(RmakeError::BuildFailure {
                command: self.display_command(),
                code: status.code(),
            });
        }

        Ok(())
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Runs the commands produced by the builders.
pub trait Executor {
    /// Check that the command's program can be run, without running it.
    fn ensure_available(&self, cmd: &CommandSpec) -> Result<(), RmakeError>;

    /// Execute a command and wait for it to finish.
    fn run(&self, cmd: &CommandSpec) -> Result<(), RmakeError>;
}

/// Executor that spawns real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl SystemExecutor {
    fn resolve(&self, cmd: &CommandSpec) -> Result<PathBuf, RmakeError> {
        find_executable(&cmd.program).ok_or_else(|| RmakeError::ToolNotFound {
            program: cmd.program.display().to_string(),
        })
    }
}

impl Executor for SystemExecutor {
    fn ensure_available(&self, cmd: &CommandSpec) -> Result<(), RmakeError> {
        let resolved = self.resolve(cmd)?;
        tracing::debug!("found {}", resolved.display());
        Ok(())
    }

    fn run(&self, cmd: &CommandSpec) -> Result<(), RmakeError> {
        let mut builder = ProcessBuilder::from_spec(cmd);
        builder.program = self.resolve(cmd)?;
        builder.exec_streaming()
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: impl AsRef<OsStr>) -> Option<PathBuf> {
    which::which(name).ok()
}

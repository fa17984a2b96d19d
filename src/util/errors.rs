//! Error types shared by the build steps.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error raised while configuring or building.
#[derive(Debug, Error)]
pub enum RmakeError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("filesystem error at `{}`", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed with {}", describe_exit(.code))]
    BuildFailure { command: String, code: Option<i32> },

    #[error("`{program}` not found in PATH\n\nInstall it and make sure it is on your PATH.")]
    ToolNotFound { program: String },

    #[error("failed to execute `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl RmakeError {
    /// Wrap an I/O error that happened at `path`.
    pub fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        RmakeError::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Process exit code to report for this error.
    ///
    /// A failing external tool passes its own exit code through.
    pub fn exit_code(&self) -> i32 {
        match self {
            RmakeError::InvalidArguments(_) => 2,
            RmakeError::BuildFailure { code, .. } => code.unwrap_or(1),
            _ => 1,
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

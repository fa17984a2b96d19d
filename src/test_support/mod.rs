//! Test utilities and mocks for rmake unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use rmake::test_support::RecordingExecutor;
//!
//! let exec = RecordingExecutor::new().fail_at(0, 2).missing("make");
//! // pass `&exec` to `ops::build` and inspect `exec.calls()` afterwards
//! ```

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::builder::CommandSpec;
use crate::util::errors::RmakeError;
use crate::util::process::Executor;

/// Executor that records commands instead of spawning them.
///
/// Optionally fails the n-th call with a given exit code.
#[derive(Debug, Clone, Default)]
pub struct RecordingExecutor {
    calls: Arc<Mutex<Vec<CommandSpec>>>,
    failure: Option<(usize, i32)>,
    missing: Vec<PathBuf>,
}

impl RecordingExecutor {
    /// Create an executor where every command succeeds.
    pub fn new() -> Self {
        RecordingExecutor::default()
    }

    /// Make call number `index` (zero-based) exit with `code`.
    pub fn fail_at(mut self, index: usize, code: i32) -> Self {
        self.failure = Some((index, code));
        self
    }

    /// Report `program` as not installed.
    pub fn missing(mut self, program: impl Into<PathBuf>) -> Self {
        self.missing.push(program.into());
        self
    }

    /// Commands run so far, in order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Executor for RecordingExecutor {
    fn ensure_available(&self, cmd: &CommandSpec) -> Result<(), RmakeError> {
        if self.missing.contains(&cmd.program) {
            return Err(RmakeError::ToolNotFound {
                program: cmd.program.display().to_string(),
            });
        }
        Ok(())
    }

    fn run(&self, cmd: &CommandSpec) -> Result<(), RmakeError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(cmd.clone());
            calls.len() - 1
        };

        match self.failure {
            Some((fail_index, code)) if fail_index == index => Err(RmakeError::BuildFailure {
                command: cmd.display_command(),
                code: Some(code),
            }),
            _ => Ok(()),
        }
    }
}

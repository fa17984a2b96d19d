//! Implementation of the configure-then-build sequence.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::builder::{build_command, configure_command, BuildContext, CommandSpec};
use crate::util::config::PathsConfig;
use crate::util::errors::RmakeError;
use crate::util::fs::{create_dir, delete_dir};
use crate::util::process::Executor;

/// Options for a build, fixed once the command line has been parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Debug build instead of Release
    pub debug: bool,

    /// Base directory for the generated build tree
    pub build_dir: PathBuf,

    /// Source tree to configure (None = working directory)
    pub source_dir: Option<PathBuf>,

    /// Build a static library
    pub static_lib: bool,

    /// Build the client programs
    pub build_clients: bool,

    /// Run the install step after building
    pub install: bool,

    /// Extra CMake defines, without the `-D` prefix
    pub cmake_dargs: Vec<String>,

    /// Verbose build output
    pub verbose: bool,

    /// Parallel jobs (None = processor count)
    pub jobs: Option<usize>,

    /// Kernel size patterns to generate
    pub gen_pattern: Vec<String>,

    /// Precisions to generate
    pub gen_precision: Vec<String>,

    /// Number of small kernel groups
    pub gen_groups: Option<i64>,

    /// Manually selected small problem sizes
    pub manual_small: Option<Vec<String>>,

    /// Manually selected large problem sizes
    pub manual_large: Option<Vec<String>>,

    /// Install root and compiler launcher fallbacks from config files
    pub paths: PathsConfig,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            debug: false,
            build_dir: PathBuf::from("build"),
            source_dir: None,
            static_lib: false,
            build_clients: false,
            install: false,
            cmake_dargs: Vec::new(),
            verbose: false,
            jobs: None,
            gen_pattern: vec!["all".to_string()],
            gen_precision: vec!["all".to_string()],
            gen_groups: None,
            manual_small: None,
            manual_large: None,
            paths: PathsConfig::default(),
        }
    }
}

impl BuildOptions {
    /// CMake build type.
    pub fn build_type(&self) -> &'static str {
        if self.debug {
            "Debug"
        } else {
            "Release"
        }
    }

    /// Name of the per-build-type directory under `build_dir`.
    pub fn profile_dir(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "release"
        }
    }

    fn validate(&self) -> Result<(), RmakeError> {
        if self.jobs == Some(0) {
            return Err(RmakeError::InvalidArguments(
                "jobs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// The commands a build will run, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
    /// Generated build tree
    pub build_path: PathBuf,
    /// CMake configure invocation
    pub configure: CommandSpec,
    /// Build (and install) invocation
    pub build: CommandSpec,
}

/// Compute the configure and build commands without touching the filesystem.
pub fn plan(opts: &BuildOptions, ctx: &BuildContext) -> Result<BuildPlan, RmakeError> {
    opts.validate()?;

    let configure = configure_command(opts, ctx)?;
    let build = build_command(opts, ctx, &configure.build_path);

    Ok(BuildPlan {
        build_path: configure.build_path,
        configure: configure.command,
        build,
    })
}

/// Start from an empty build tree with a `clients` subdirectory.
pub fn prepare_build_tree(build_path: &Path) -> Result<(), RmakeError> {
    delete_dir(build_path)?;
    create_dir(&build_path.join("clients"))?;
    Ok(())
}

/// Configure and build.
///
/// Both tools must be available before the build tree is touched. Stops at
/// the first failing step; the build command never runs after a failed
/// configure.
pub fn build(
    opts: &BuildOptions,
    ctx: &BuildContext,
    executor: &dyn Executor,
) -> Result<BuildPlan, RmakeError> {
    let plan = plan(opts, ctx)?;

    executor.ensure_available(&plan.configure)?;
    executor.ensure_available(&plan.build)?;

    tracing::info!(
        "Configuring {} build in {}",
        opts.build_type(),
        plan.build_path.display()
    );
    prepare_build_tree(&plan.build_path)?;
    executor.run(&plan.configure)?;

    tracing::info!("Building");
    executor.run(&plan.build)?;

    tracing::info!("Finished {} build", opts.build_type());
    Ok(plan)
}

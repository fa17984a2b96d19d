//! Configure-step command construction.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::builder::context::{BuildContext, COMPILER_LAUNCHER_VAR};
use crate::builder::CommandSpec;
use crate::ops::rmake_build::BuildOptions;
use crate::util::errors::RmakeError;
use crate::util::fs::absolutize;

/// The configure command together with the build tree it generates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurePlan {
    /// CMake invocation, run from inside `build_path`
    pub command: CommandSpec,
    /// `<build_dir>/release` or `<build_dir>/debug`, absolute
    pub build_path: PathBuf,
}

/// Compute the absolute build output path for the selected build type.
pub fn build_output_path(opts: &BuildOptions, cwd: &Path) -> PathBuf {
    absolutize(&opts.build_dir, cwd).join(opts.profile_dir())
}

/// Assemble the CMake configure command.
///
/// This only builds the argument list; preparing the build tree is left to
/// [`crate::ops::prepare_build_tree`].
pub fn configure_command(
    opts: &BuildOptions,
    ctx: &BuildContext,
) -> Result<ConfigurePlan, RmakeError> {
    let platform = ctx.platform.as_ref();

    let src_path = platform.cmake_path(&ctx.source_dir(opts))?;
    let install_root = ctx.install_root(opts);
    tracing::info!("Build source path: {}", src_path);

    let mut args = platform.generator_args();
    args.push(format!(
        "-DCMAKE_TOOLCHAIN_FILE={}",
        platform.toolchain_file(&src_path)
    ));
    args.extend(platform.install_args(&install_root));
    args.push(format!("-DROCM_PATH={}", install_root));
    args.push(format!("-DCMAKE_PREFIX_PATH:PATH={}", install_root));

    // Packaging
    args.push("-DCPACK_SET_DESTDIR=OFF".to_string());

    if let Some(launcher) = ctx.compiler_launcher(opts) {
        args.push(format!("-D{}={}", COMPILER_LAUNCHER_VAR, launcher));
    }

    let build_path = build_output_path(opts, &ctx.cwd);
    args.push(format!("-DCMAKE_BUILD_TYPE={}", opts.build_type()));

    if opts.static_lib {
        args.push("-DBUILD_SHARED_LIBS=OFF".to_string());
    }
    if opts.build_clients {
        args.push("-DBUILD_CLIENTS=ON".to_string());
    }
    args.extend(opts.cmake_dargs.iter().map(|d| format!("-D{}", d)));
    args.extend(generator_defines(opts));

    args.push(src_path);

    tracing::debug!("CMake options: {:?}", args);

    Ok(ConfigurePlan {
        command: CommandSpec::new(platform.configure_program())
            .args(args)
            .cwd(&build_path),
        build_path,
    })
}

/// Kernel generator options, forwarded to CMake without validation.
fn generator_defines(opts: &BuildOptions) -> Vec<String> {
    let mut defines = vec![
        format!("-DGENERATOR_PATTERN={}", opts.gen_pattern.join(",")),
        format!("-DGENERATOR_PRECISION={}", opts.gen_precision.join(",")),
    ];

    if let Some(groups) = opts.gen_groups {
        defines.push(format!("-DGENERATOR_GROUP_NUM={}", groups));
    }

    let manual = [
        ("GENERATOR_MANUAL_SMALL_SIZE", &opts.manual_small),
        ("GENERATOR_MANUAL_LARGE_SIZE", &opts.manual_large),
    ];
    for (name, sizes) in manual {
        if let Some(sizes) = sizes.as_ref().filter(|s| !s.is_empty()) {
            defines.push(format!("-D{}={}", name, sizes.join(",")));
        }
    }

    defines
}

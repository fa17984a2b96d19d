//! rmake CLI - configure and build rocFFT with CMake

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;
use rmake::ops::rmake_build;
use rmake::util::config::{global_config_path, load_config, project_config_path};
use rmake::util::process::SystemExecutor;
use rmake::{BuildContext, RmakeError};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        let code = e
            .downcast_ref::<RmakeError>()
            .map(RmakeError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    // Parse CLI; usage errors exit with status 2 before anything else happens
    let cli = Cli::parse();

    // Set up logging
    let default_filter = if cli.verbose {
        "rmake=debug"
    } else {
        "rmake=info"
    };
    let filter =
        EnvFilter::try_from_env("RMAKE_LOG").unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let ctx = BuildContext::from_host()?;

    // Load configuration (global + project)
    let source_dir = cli
        .source_dir
        .as_ref()
        .map(|dir| rmake::util::fs::absolutize(dir, &ctx.cwd))
        .unwrap_or_else(|| ctx.cwd.clone());
    let config = load_config(
        global_config_path().as_deref(),
        &project_config_path(&source_dir),
    )
    .context("failed to load configuration")?;

    let opts = cli.to_options(&config);

    if cli.plan {
        let plan = rmake_build::plan(&opts, &ctx)?;
        let json = serde_json::to_string_pretty(&plan).context("failed to serialize build plan")?;
        println!("{}", json);
        return Ok(());
    }

    rmake_build::build(&opts, &ctx, &SystemExecutor)?;

    Ok(())
}

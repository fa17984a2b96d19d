//! CLI definitions using clap.

use std::path::PathBuf;

use clap::Parser;
use rmake::util::config::Config;
use rmake::BuildOptions;

/// Configure and build rocFFT with CMake
#[derive(Parser, Debug)]
#[command(name = "rmake")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Generate Debug build (default: Release)
    #[arg(short = 'g', long)]
    pub debug: bool,

    /// Build directory path (default: build)
    #[arg(long = "build_dir", value_name = "PATH", env = "RMAKE_BUILD_DIR")]
    pub build_dir: Option<PathBuf>,

    /// Source directory to configure (default: current directory)
    #[arg(long = "source_dir", value_name = "PATH")]
    pub source_dir: Option<PathBuf>,

    /// Generate static library build
    #[arg(long = "static")]
    pub static_lib: bool,

    /// Generate all client builds
    #[arg(short = 'c', long = "clients")]
    pub build_clients: bool,

    /// Install after build
    #[arg(short, long)]
    pub install: bool,

    /// Additional CMake defines, e.g. AMDGPU_TARGETS=gfx90a (repeatable)
    #[arg(long = "cmake_darg", value_name = "DEFINE", num_args = 1..)]
    pub cmake_dargs: Vec<String>,

    /// Verbose build
    #[arg(short, long)]
    pub verbose: bool,

    /// Number of parallel build jobs (default: logical processor count)
    #[arg(short, long, env = "RMAKE_JOBS", value_parser = clap::value_parser!(u32).range(1..))]
    pub jobs: Option<u32>,

    /// Size patterns to generate (none, pow2, pow3, pow5, pow7, 2D, large, small, all)
    #[arg(long = "gen_pattern", value_name = "PATTERN", num_args = 1.., default_value = "all")]
    pub gen_pattern: Vec<String>,

    /// Precision types to generate (single, double, all)
    #[arg(long = "gen_precision", value_name = "PRECISION", num_args = 1.., default_value = "all")]
    pub gen_precision: Vec<String>,

    /// Number of small kernel groups
    #[arg(long = "gen_groups", value_name = "N", allow_negative_numbers = true)]
    pub gen_groups: Option<i64>,

    /// Small problem sizes to generate
    #[arg(long = "manual_small", value_name = "SIZE", num_args = 1..)]
    pub manual_small: Option<Vec<String>>,

    /// Large problem sizes to generate
    #[arg(long = "manual_large", value_name = "SIZE", num_args = 1..)]
    pub manual_large: Option<Vec<String>>,

    /// Print the configure and build commands as JSON without running them
    #[arg(long)]
    pub plan: bool,
}

impl Cli {
    /// Merge the parsed flags with file configuration.
    ///
    /// Flags win over config values; config `cmake-args` come before
    /// `--cmake_darg` values so the command line can override them.
    pub fn to_options(&self, config: &Config) -> BuildOptions {
        let build_dir = self
            .build_dir
            .clone()
            .or_else(|| config.build.build_dir.clone())
            .unwrap_or_else(|| PathBuf::from("build"));

        let cmake_dargs = config
            .build
            .cmake_args
            .iter()
            .chain(&self.cmake_dargs)
            .cloned()
            .collect();

        BuildOptions {
            debug: self.debug,
            build_dir,
            source_dir: self.source_dir.clone(),
            static_lib: self.static_lib,
            build_clients: self.build_clients,
            install: self.install,
            cmake_dargs,
            verbose: self.verbose,
            jobs: self.jobs.map(|j| j as usize).or(config.build.jobs),
            gen_pattern: self.gen_pattern.clone(),
            gen_precision: self.gen_precision.clone(),
            gen_groups: self.gen_groups,
            manual_small: self.manual_small.clone(),
            manual_large: self.manual_large.clone(),
            paths: config.paths.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("rmake").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        let opts = cli.to_options(&Config::default());

        if std::env::var_os("RMAKE_BUILD_DIR").is_none() {
            assert_eq!(opts.build_dir, PathBuf::from("build"));
        }
        assert!(!opts.debug);
        assert!(!opts.static_lib);
        assert!(!opts.build_clients);
        assert!(!opts.install);
        assert!(!opts.verbose);
        assert!(opts.cmake_dargs.is_empty());
        assert_eq!(opts.gen_pattern, vec!["all"]);
        assert_eq!(opts.gen_precision, vec!["all"]);
        assert_eq!(opts.gen_groups, None);
        assert_eq!(opts.manual_small, None);
        assert_eq!(opts.manual_large, None);
        assert_eq!(opts.source_dir, None);
        assert!(!cli.plan);
    }

    #[test]
    fn test_toggles() {
        let opts = parse(&["-g", "--static", "-c", "-i", "-v"]).to_options(&Config::default());
        assert!(opts.debug);
        assert!(opts.static_lib);
        assert!(opts.build_clients);
        assert!(opts.install);
        assert!(opts.verbose);

        let opts = parse(&["--debug", "--clients", "--install", "--verbose"])
            .to_options(&Config::default());
        assert!(opts.debug && opts.build_clients && opts.install && opts.verbose);
        assert!(!opts.static_lib);
    }

    #[test]
    fn test_value_options() {
        let opts = parse(&[
            "--build_dir",
            "/tmp/rocfft-build",
            "--cmake_darg",
            "AMDGPU_TARGETS=gfx90a",
            "ROCFFT_MPI=ON",
            "--cmake_darg",
            "BUILD_FILE_REORG_BACKWARD_COMPATIBILITY=OFF",
            "--gen_pattern",
            "pow2",
            "pow3",
            "--gen_precision",
            "double",
            "--gen_groups",
            "8",
            "--manual_small",
            "4",
            "8",
            "--manual_large",
            "8192",
        ])
        .to_options(&Config::default());

        assert_eq!(opts.build_dir, PathBuf::from("/tmp/rocfft-build"));
        assert_eq!(
            opts.cmake_dargs,
            vec![
                "AMDGPU_TARGETS=gfx90a",
                "ROCFFT_MPI=ON",
                "BUILD_FILE_REORG_BACKWARD_COMPATIBILITY=OFF"
            ]
        );
        assert_eq!(opts.gen_pattern, vec!["pow2", "pow3"]);
        assert_eq!(opts.gen_precision, vec!["double"]);
        assert_eq!(opts.gen_groups, Some(8));
        assert_eq!(opts.manual_small, Some(vec!["4".to_string(), "8".to_string()]));
        assert_eq!(opts.manual_large, Some(vec!["8192".to_string()]));
    }

    #[test]
    fn test_invalid_arguments() {
        let parse_err = |args: &[&str]| {
            Cli::try_parse_from(std::iter::once("rmake").chain(args.iter().copied())).is_err()
        };

        assert!(parse_err(&["--gen_groups", "many"]));
        assert!(parse_err(&["--build_dir"]));
        assert!(parse_err(&["--cmake_darg"]));
        assert!(parse_err(&["--no-such-flag"]));
        assert!(parse_err(&["--jobs", "0"]));
    }

    #[test]
    fn test_config_fallbacks() {
        let mut config = Config::default();
        config.build.build_dir = Some(PathBuf::from("out"));
        config.build.jobs = Some(6);
        config.build.cmake_args = vec!["FROM_CONFIG=ON".to_string()];
        config.paths.rocm = Some("/opt/rocm-6.0".to_string());

        let opts = parse(&["--build_dir", "cli-build", "--cmake_darg", "FROM_CLI=ON", "-j", "2"])
            .to_options(&config);

        assert_eq!(opts.build_dir, PathBuf::from("cli-build"));
        assert_eq!(opts.jobs, Some(2));
        assert_eq!(opts.cmake_dargs, vec!["FROM_CONFIG=ON", "FROM_CLI=ON"]);
        assert_eq!(opts.paths.rocm.as_deref(), Some("/opt/rocm-6.0"));
    }
}

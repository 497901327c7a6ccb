use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::process;

use cookie_size::cmd::{self, ReportOptions, RunOptions};
use cookie_size::target::Target;

/// Firmware image size check for embedded builds
///
/// cookie-size measures the cookie.bin image left in a build directory and
/// logs its size in kilobytes, once per hardware target.
#[derive(Parser)]
#[command(name = "cookie-size", author, version, long_about = None)]
#[command(about = "Firmware image size check for embedded builds")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI or accessibility)
    #[arg(long, global = true)]
    no_emoji: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure the image in one build directory
    Report {
        /// Build directory containing cookie.bin
        #[arg(short, long, value_name = "DIR")]
        binary_path: Option<PathBuf>,

        /// Application directory (used to find the build and .cookie-size.toml)
        ///
        /// Defaults to the current directory unless --binary-path is given.
        #[arg(short, long, value_name = "DIR")]
        app_path: Option<PathBuf>,

        /// Target the build was made for
        #[arg(short, long)]
        target: Option<Target>,

        /// Build configuration suffix (build_<target>_<config>)
        #[arg(long, value_name = "NAME")]
        config: Option<String>,

        /// Output as JSON (for CI integration)
        #[arg(long)]
        json: bool,

        /// Fail if the image exceeds the configured max size
        #[arg(long)]
        check: bool,
    },

    /// Run the size test once per target
    Run {
        /// Application directory holding build_<target> directories
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        app_path: PathBuf,

        /// supported_targets, preview_targets, or a comma-separated list
        #[arg(short, long, value_name = "SELECTOR")]
        targets: Option<String>,

        /// Build configuration suffix (build_<target>_<config>)
        #[arg(long, value_name = "NAME")]
        config: Option<String>,

        /// Output as JSON (for CI integration)
        #[arg(long)]
        json: bool,

        /// Fail targets whose image exceeds the configured max size
        #[arg(long)]
        check: bool,

        /// Number of targets to measure at once
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// List known target identifiers
    Targets {
        /// Include preview targets
        #[arg(long)]
        preview: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // RUST_LOG overrides; info keeps the size line visible by default
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.no_emoji {
        std::env::set_var("NO_EMOJI", "1");
    }

    let result = match cli.command {
        Commands::Report {
            binary_path,
            app_path,
            target,
            config,
            json,
            check,
        } => cmd::cmd_report(&ReportOptions {
            binary_path,
            app_path,
            target,
            build_config: config,
            json,
            check,
        }),
        Commands::Run {
            app_path,
            targets,
            config,
            json,
            check,
            jobs,
        } => cmd::cmd_run(&RunOptions {
            app_path,
            targets,
            build_config: config,
            json,
            check,
            jobs,
        }),
        Commands::Targets { preview } => {
            cmd::cmd_targets(preview);
            Ok(())
        }
        Commands::Completions { shell } => {
            cmd::cmd_completions(shell, &mut Cli::command(), &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        use cookie_size::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        process::exit(ErrorFormatter::exit_code(&e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert()
    }

    #[test]
    fn test_target_arg_parses_identifier() {
        let cli = Cli::try_parse_from(["cookie-size", "report", "-t", "esp32s3"]).unwrap();
        match cli.command {
            Commands::Report { target, .. } => assert_eq!(target, Some(Target::Esp32s3)),
            _ => panic!("expected report"),
        }
    }

    #[test]
    fn test_about_is_the_short_description() {
        let about = Cli::command().get_about().map(|a| a.to_string());
        assert_eq!(
            about.as_deref(),
            Some("Firmware image size check for embedded builds")
        );
    }

    #[test]
    fn test_report_app_path_is_optional() {
        let cli = Cli::try_parse_from(["cookie-size", "report", "-b", "build"]).unwrap();
        match cli.command {
            Commands::Report {
                app_path,
                binary_path,
                ..
            } => {
                assert!(app_path.is_none());
                assert_eq!(binary_path, Some(PathBuf::from("build")));
            }
            _ => panic!("expected report"),
        }
    }

    #[test]
    fn test_unknown_target_arg_is_rejected() {
        assert!(Cli::try_parse_from(["cookie-size", "report", "-t", "esp8266"]).is_err());
    }
}

//! # platwiz
//!
//! Command-line host for the multi-platform solution wizard.  `platwiz new`
//! plays the part of an IDE: it lays out the destination, runs the wizard
//! against it and prints the parameter map a template engine would consume.
//!
//! Configuration is resolved before logging starts, since the log directory
//! is itself a setting.
//!
//! ## Exit codes
//!
//! | Code | Meaning                          |
//! |------|----------------------------------|
//! |  0   | Success                          |
//! |  1   | Internal error or failed run     |
//! |  2   | User / input error, cancellation |
//! |  3   | Resource not found               |
//! |  4   | Configuration error              |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod prompt;

const EXIT_CONFIG: u8 = 4;

fn main() -> ExitCode {
    // a missing .env is not an error
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version land here as well, on stdout with status 0
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(if e.use_stderr() { 2 } else { 0 });
        }
    };

    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(loaded) => loaded.with_overrides(&cli.global),
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    // flushes the log file on drop
    let _log_guard = match init_logging(&cli.global, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialise logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    debug!(
        verbose = cli.global.verbose,
        telemetry = config.telemetry.enabled,
        format = ?cli.global.output_format,
        "platwiz starting"
    );

    let verbose = cli.global.verbose > 0;
    let colour = !config.output.no_color && std::io::stderr().is_terminal();
    let output = OutputManager::new(&cli.global, &config);

    match dispatch(cli, config, output) {
        Ok(()) => {
            info!("platwiz finished");
            ExitCode::SUCCESS
        }
        Err(err) => report_failure(&err, verbose, colour),
    }
}

#[instrument(skip_all)]
fn dispatch(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let Cli { global, command } = cli;
    match command {
        Commands::New(args) => commands::new::execute(args, config, output),
        Commands::List(args) => commands::list::execute(args, output),
        Commands::Init(args) => commands::init::execute(args, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, global.config, config, output),
    }
}

/// Log `err`, print it with suggestions on stderr and pick the exit code.
fn report_failure(err: &CliError, verbose: bool, colour: bool) -> ExitCode {
    err.log();
    eprint!("{}", err.render(verbose, colour));
    ExitCode::from(err.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn version_comes_from_the_package() {
        assert_eq!(
            Cli::command().get_version(),
            Some(env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::parse_from([
            "platwiz",
            "list",
            "-vv",
            "--no-telemetry",
            "--log-dir",
            "logs",
        ]);
        assert_eq!(cli.global.verbose, 2);
        assert!(cli.global.no_telemetry);

        let config = AppConfig::default().with_overrides(&cli.global);
        assert!(!config.telemetry.enabled);
        assert!(config.logging.directory.is_some());
    }

    #[test]
    fn no_color_flag_needs_no_value() {
        let cli = Cli::try_parse_from(["platwiz", "--no-color", "list"]).unwrap();
        assert!(cli.global.no_color);
        assert!(AppConfig::default().with_overrides(&cli.global).output.no_color);
    }
}

//! Command-line interface for pneumodetect.
//!
//! This module provides the CLI structure and output rendering for the
//! `pneumo` binary.

mod commands;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, CoughCommand, LoginCommand, PageCommand, SignupCommand, VitalsCommand,
};

use crate::logging::Verbosity;

/// pneumo - Simulated respiratory screening
///
/// Drives the PneumoDetect view-models from the terminal: record and analyze
/// a simulated cough, stream simulated vitals, and browse the static pages.
/// No real audio or sensor data is involved.
#[derive(Debug, Parser)]
#[command(name = "pneumo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record and analyze a simulated cough
    Cough(CoughCommand),

    /// Stream simulated vitals
    Vitals(VitalsCommand),

    /// Show the static content of a page
    Page(PageCommand),

    /// List routes and the links between them
    Routes,

    /// Submit the login form
    Login(LoginCommand),

    /// Submit the signup form
    Signup(SignupCommand),

    /// Click the forgot-password link
    ForgotPassword,

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Route;
    use clap::CommandFactory;

    fn cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Routes,
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "pneumo");
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cough() {
        let cli = Cli::try_parse_from(["pneumo", "cough", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::Cough(CoughCommand { json: true })));
    }

    #[test]
    fn test_parse_vitals_samples() {
        let cli = Cli::try_parse_from(["pneumo", "vitals", "-n", "5"]).unwrap();
        match cli.command {
            Command::Vitals(cmd) => {
                assert_eq!(cmd.samples, 5);
                assert!(!cmd.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_vitals_default_samples() {
        let cli = Cli::try_parse_from(["pneumo", "vitals"]).unwrap();
        assert!(matches!(cli.command, Command::Vitals(VitalsCommand { samples: 3, .. })));
    }

    #[test]
    fn test_parse_page_by_path() {
        let cli = Cli::try_parse_from(["pneumo", "page", "/reports"]).unwrap();
        match cli.command {
            Command::Page(cmd) => assert_eq!(cmd.route, Route::Reports),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_unknown_page_fails() {
        assert!(Cli::try_parse_from(["pneumo", "page", "settings"]).is_err());
    }

    #[test]
    fn test_parse_login() {
        let cli = Cli::try_parse_from([
            "pneumo",
            "login",
            "--email",
            "doctor@example.com",
            "--password",
            "secret",
        ])
        .unwrap();
        match cli.command {
            Command::Login(cmd) => {
                assert_eq!(cmd.email, "doctor@example.com");
                assert_eq!(cmd.password, "secret");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_forgot_password() {
        let cli = Cli::try_parse_from(["pneumo", "forgot-password"]).unwrap();
        assert!(matches!(cli.command, Command::ForgotPassword));
    }

    #[test]
    fn test_parse_with_config() {
        let args = ["pneumo", "-c", "/custom/config.toml", "routes"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose_and_quiet() {
        let cli = Cli::try_parse_from(["pneumo", "-v", "routes"]).unwrap();
        assert_eq!(cli.verbose, 1);
        let cli = Cli::try_parse_from(["pneumo", "-q", "routes"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_parse_config_validate() {
        let cli = Cli::try_parse_from(["pneumo", "config", "validate", "-f", "x.toml"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }
}

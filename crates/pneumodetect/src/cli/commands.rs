//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::auth::{LoginForm, SignupForm};
use crate::route::Route;

/// Cough command arguments.
#[derive(Debug, Args)]
pub struct CoughCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Vitals command arguments.
#[derive(Debug, Args)]
pub struct VitalsCommand {
    /// Number of samples to stream before disconnecting
    #[arg(short = 'n', long, default_value = "3")]
    pub samples: u64,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Page command arguments.
#[derive(Debug, Args)]
pub struct PageCommand {
    /// Route name or path (e.g. `dashboard` or `/reports`)
    #[arg(value_parser = parse_route)]
    pub route: Route,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

fn parse_route(s: &str) -> Result<Route, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}

/// Login command arguments.
#[derive(Debug, Args)]
pub struct LoginCommand {
    /// Email address
    #[arg(short, long, default_value = "")]
    pub email: String,

    /// Password
    #[arg(short, long, default_value = "")]
    pub password: String,
}

impl From<LoginCommand> for LoginForm {
    fn from(cmd: LoginCommand) -> Self {
        Self {
            email: cmd.email,
            password: cmd.password,
        }
    }
}

/// Signup command arguments.
#[derive(Debug, Args)]
pub struct SignupCommand {
    /// Full name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Email address
    #[arg(short, long, default_value = "")]
    pub email: String,

    /// Password
    #[arg(short, long, default_value = "")]
    pub password: String,

    /// Password confirmation
    #[arg(long, default_value = "")]
    pub confirm_password: String,
}

impl From<SignupCommand> for SignupForm {
    fn from(cmd: SignupCommand) -> Self {
        Self {
            name: cmd.name,
            email: cmd.email,
            password: cmd.password,
            confirm_password: cmd.confirm_password,
        }
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

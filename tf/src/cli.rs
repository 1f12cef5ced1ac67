//! Command-line interface definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// tf - inspect and drive travel-planning sessions
#[derive(Debug, Parser)]
#[command(name = "tf", version, about = "Trip-plan session inspector")]
pub struct Cli {
    /// Path to a config file (default: ~/.config/tripflow/config.yml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show a session's workflow state and trip plan
    Show {
        /// Session ID
        session: String,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Request a workflow step for a session
    Step {
        /// Session ID
        session: String,

        /// Requested step (planning, searching, selecting, summary, booking, done)
        step: String,
    },

    /// Apply a controller action to a session's workflow
    Action {
        /// Session ID
        session: String,

        /// Action type (UPDATE_REQ, CALL_SEARCH, SELECT_OPTION, ...)
        action: String,
    },

    /// Reset a session: clear its workflow state and trip plan
    Reset {
        /// Session ID
        session: String,
    },

    /// List sessions with workflow state
    Sessions,

    /// Write the active configuration to a config file
    Init {
        /// Destination path (default: ~/.config/tripflow/config.yml)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

/// Output format for show commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

//! CLI module for docket
//!
//! Provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Docket - track legal cases through their lifecycle with a full audit trail
#[derive(Parser, Debug)]
#[command(name = "docket")]
#[command(version)]
#[command(about = "Track legal cases through their lifecycle with a full audit trail")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress info-level output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Actor performing the operation
    #[arg(long, global = true, env = "DOCKET_ACTOR")]
    pub actor: Option<String>,

    /// Override the working directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a .docket directory in the current directory
    Init {
        /// Overwrite an existing config.json
        #[arg(long)]
        force: bool,
    },

    /// Open a new case
    Open {
        /// Case ID (letters, digits, '.', '_' or '-')
        id: String,

        /// Case caption
        title: String,

        /// Practice area, e.g. litigation or foil
        #[arg(long)]
        matter_type: Option<String>,

        /// Actor allowed to change this case (repeatable)
        #[arg(long = "assign")]
        assign: Vec<String>,
    },

    /// List cases with optional filtering
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Filter by status (open, in_progress, on_hold, closed, dismissed)
        #[arg(long)]
        status: Option<String>,
    },

    /// Show details of a specific case
    Show {
        /// Case ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the statuses a case may move to next
    Next {
        /// Case ID
        id: String,
    },

    /// Change the status of a case
    Transition {
        /// Case ID
        id: String,

        /// Target status (open, in_progress, on_hold, closed, dismissed)
        status: String,

        /// Case version you last saw (see `docket show`)
        #[arg(long)]
        expected_version: u64,

        /// Outcome code; required when closing or dismissing
        #[arg(long)]
        outcome: Option<String>,

        /// Rationale recorded in the audit trail
        #[arg(long)]
        note: Option<String>,

        /// Output the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the audit trail of a case
    History {
        /// Case ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

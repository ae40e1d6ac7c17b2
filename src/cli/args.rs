// src/cli/args.rs
use crate::application::FailurePolicy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to the TOML config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// GraphQL endpoint, overrides the config file
    #[arg(long, value_name = "URL", global = true)]
    pub endpoint: Option<String>,

    /// Keep notes and images in local files below DIR
    #[arg(long, value_name = "DIR", global = true, conflicts_with = "endpoint")]
    pub store: Option<PathBuf>,

    /// How failures are surfaced: propagate, notify or silent
    #[arg(long, value_name = "POLICY", global = true)]
    pub on_failure: Option<FailurePolicy>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute (list, create, delete or view)
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List notes with their resolved image URLs
    List {
        /// Output notes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a note, optionally with an image
    Create {
        /// Note name, also the storage key of its image
        #[arg(value_name = "NAME")]
        name: String,

        /// Note description
        #[arg(value_name = "DESCRIPTION")]
        description: String,

        /// Image file to attach
        #[arg(short, long, value_name = "FILE")]
        image: Option<PathBuf>,
    },

    /// Delete a note and its image
    Delete {
        /// Note ID to delete
        #[arg(value_name = "NOTE_ID")]
        note_id: String,
    },

    /// Open the note list in the browser
    View,
}

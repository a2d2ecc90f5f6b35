use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CLI arguments parser using `clap`
#[derive(Parser, Debug)]
#[command(version, about = "Per-folder Git user profiles")]
pub struct Cli {
    /// Global Git config to register profiles in (defaults to ~/.gitconfig)
    #[arg(long, global = true, value_name = "FILE")]
    pub global_config: Option<PathBuf>,
    /// Subcommand chosen to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// Subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Sets up a Git profile for the current folder
    Init,
    /// Lists all folder-specific Git profiles
    List {
        /// Prints the profiles as JSON
        #[arg(long)]
        json: bool,
    },
    /// Removes the Git profile of a folder
    Remove {
        /// Folder whose profile to remove
        dir: PathBuf,
    },
}

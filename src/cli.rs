use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scenename")]
#[command(author, version, about = "Parse and build scene release names")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a release name and display the entity
    Parse {
        /// Name to parse
        #[arg(required = true)]
        text: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the canonical form of each name
    Rename {
        /// Names to rename
        #[arg(required = true)]
        texts: Vec<String>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

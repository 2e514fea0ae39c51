use clap::{Parser, Subcommand};
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

#[derive(Parser, Debug)]
#[command(name = "pagepad")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "A tiny paged scratch pad with search", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true, env = "PAGEPAD_DIR")]
    pub dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all pages
    #[command(alias = "ls")]
    List,

    /// Print the body of a page
    #[command(alias = "v")]
    Show {
        /// Page id (e.g. page-2)
        id: String,
    },

    /// Add a new page (body from arguments or piped stdin)
    #[command(alias = "n")]
    Add {
        /// Initial body text
        #[arg(num_args = 0..)]
        text: Vec<String>,
    },

    /// Replace the body of a page (from arguments or piped stdin)
    #[command(alias = "w")]
    Write {
        /// Page id (e.g. page-2)
        id: String,

        /// New body text
        #[arg(num_args = 0..)]
        text: Vec<String>,
    },

    /// Delete a page
    #[command(alias = "rm")]
    Delete {
        /// Page id (e.g. page-2)
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Search page titles and bodies
    #[command(alias = "s")]
    Search {
        /// Keyword (case-insensitive substring)
        #[arg(required = true, num_args = 1..)]
        keyword: Vec<String>,
    },

    /// Interactive session
    Shell,
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Job application tracking API
#[derive(Parser, Debug)]
#[command(name = "job-tracker", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run migrations and serve the HTTP API (default)
    Serve,

    /// Insert jobs from a JSON array file for one owner
    Populate {
        /// Path to the seed file
        #[arg(long)]
        file: PathBuf,

        /// User id the jobs will belong to
        #[arg(long)]
        owner: i32,
    },

    /// Insert randomly generated jobs spread over the last year
    Demo {
        /// User id the jobs will belong to
        #[arg(long)]
        owner: i32,

        #[arg(long, default_value_t = 50)]
        count: usize,
    },
}

//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Product bundles as composable trees: nest products in boxes, price any node recursively
#[derive(Parser, Debug)]
#[command(name = "parcel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Settings file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Total price of an item, or of every top-level item
    Price {
        /// Manifest file (default: `manifest` from settings)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        manifest: Option<PathBuf>,
        /// Product or bundle name
        #[arg(short, long)]
        bundle: Option<String>,
    },

    /// Show top-level items as trees with prices
    Tree {
        /// Manifest file (default: `manifest` from settings)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        manifest: Option<PathBuf>,
    },

    /// List the products inside an item
    Leaves {
        /// Manifest file (default: `manifest` from settings)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        manifest: Option<PathBuf>,
        /// Product or bundle name (default: every top-level item)
        #[arg(short, long)]
        bundle: Option<String>,
        /// Print the box path to each product
        #[arg(long)]
        paths: bool,
    },

    /// One-line summary of a product or bundle
    Describe {
        /// Product or bundle name
        name: String,
        /// Manifest file (default: `manifest` from settings)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        manifest: Option<PathBuf>,
    },

    /// Run the built-in gamer bundle example
    Demo,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective settings as TOML
    Show,
    /// Print the global config file location
    Path,
}

//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CONFIG_FILE;

/// Write asset bundles and resources into an output directory
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Print debug messages
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (searched upward from the current directory)
    #[arg(short = 'C', long, default_value = CONFIG_FILE, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Output directory (overrides `output_dir`)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Url prefix (overrides `url_prefix`)
    #[arg(long, global = true)]
    pub url_prefix: Option<String>,

    /// Embed content checksums in file names (overrides `checksums_enabled`)
    #[arg(long, global = true, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub checksums: Option<bool>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a bundle, reusing fresh output
    #[command(visible_alias = "b")]
    Bundle {
        /// Logical bundle name
        #[arg(short, long)]
        name: String,

        /// MIME type of the bundle (guessed from INPUT or the name if omitted)
        #[arg(short = 't', long)]
        content_type: Option<String>,

        /// Slot the bundle belongs to
        #[arg(short, long)]
        slot: Option<String>,

        /// Source files aggregated into the bundle (for freshness checks)
        #[arg(long = "source", value_name = "FILE")]
        sources: Vec<PathBuf>,

        /// Per-bundle checksum policy
        #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        checksum: Option<bool>,

        /// Input file, `-` or nothing for stdin
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: Option<PathBuf>,
    },

    /// Copy a static resource into the output directory
    #[command(visible_alias = "r")]
    Resource {
        /// Resource source file
        #[arg(value_hint = clap::ValueHint::FilePath)]
        path: PathBuf,

        /// Output path of the stylesheet referencing this resource
        /// (relative to the output directory); makes the url relative to it
        #[arg(long)]
        stylesheet: Option<PathBuf>,
    },

    /// Print the url of a file inside the output directory
    #[command(visible_alias = "u")]
    Url {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print the output path for a name without writing anything
    Resolve {
        /// Logical name
        name: String,

        /// Content checksum to embed
        #[arg(long)]
        checksum: Option<String>,

        /// Target extension
        #[arg(long)]
        ext: Option<String>,

        /// Slot name
        #[arg(long)]
        slot: Option<String>,
    },
}

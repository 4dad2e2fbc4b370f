//! asset-writer - write asset bundles and resources into an output directory.

use anyhow::Result;
use asset_writer::cli::{self, Cli};
use asset_writer::logger;
use clap::{ColorChoice, Parser};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    if let Err(err) = cli::run(&cli).await {
        asset_writer::log!("error"; "{:#}", err);
        std::process::exit(1);
    }
    Ok(())
}

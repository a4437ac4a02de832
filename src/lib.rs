pub mod cli;
pub mod columns;
pub mod data;
pub mod derive;
pub mod error;
pub mod filter;
pub mod io_utils;
pub mod process;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use crate::cli::Cli;

pub use crate::error::DataAccessError;
pub use crate::process::{CleanSummary, clean, clean_as_of};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("listing_cleaner", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let summary = clean(&cli.input, &cli.output)
        .with_context(|| format!("Cleaning listings from {:?}", cli.input))?;
    println!(
        "✅ Saved cleaned data to {} (rows: {})",
        cli.output.display(),
        summary.rows_written
    );
    Ok(())
}

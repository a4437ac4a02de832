use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_INPUT: &str = "data/raw/listings.csv";
pub const DEFAULT_OUTPUT: &str = "data/processed/listings_clean.csv";

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Clean raw property listings data and generate a processed CSV",
    long_about = None
)]
pub struct Cli {
    /// Path to the raw listings CSV
    #[arg(short = 'i', long = "input", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,
    /// Path to save the cleaned CSV (parent directories are created)
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::store::DEFAULT_DATABASE;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Load bookstore CSV exports into SQLite and report author revenue",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Ingest members, authors, books, orders and order_details CSV files
    Ingest(IngestArgs),
    /// Print the author revenue report once
    Report(DatabaseArgs),
    /// Interactive menu for running the author revenue report
    Menu(DatabaseArgs),
}

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Directory containing the source CSV files
    #[arg(short = 'd', long = "data-dir", default_value = ".")]
    pub data_dir: PathBuf,
    #[command(flatten)]
    pub database: DatabaseArgs,
    /// Character encoding of the input files (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct DatabaseArgs {
    /// SQLite database file
    #[arg(long = "database", default_value = DEFAULT_DATABASE)]
    pub path: PathBuf,
}

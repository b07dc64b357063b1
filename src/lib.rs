pub mod batch;
pub mod cli;
pub mod data;
pub mod error;
pub mod infer;
pub mod ingest;
pub mod io_utils;
pub mod menu;
pub mod normalize;
pub mod report;
pub mod schema;
pub mod source;
pub mod store;
pub mod table;

use std::{
    env,
    io::{self, Write},
    sync::OnceLock,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::{
    cli::{Cli, Commands, DatabaseArgs, IngestArgs},
    store::Store,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("bookstore_data", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Ingest(args) => handle_ingest(&args),
        Commands::Report(args) => handle_report(&args),
        Commands::Menu(args) => handle_menu(&args),
    }
}

fn open_store(args: &DatabaseArgs) -> Result<Store> {
    Store::open(&args.path).with_context(|| format!("Opening database {:?}", args.path))
}

fn handle_ingest(args: &IngestArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let store = open_store(&args.database)?;
    let sources = source::default_sources(&args.data_dir);
    info!(
        "Ingesting {} source file(s) from {:?} into {:?}",
        sources.len(),
        args.data_dir,
        args.database.path
    );
    let mut stdout = io::stdout().lock();
    batch::run_ingestion(store, &sources, encoding, &mut stdout);
    Ok(())
}

fn handle_report(args: &DatabaseArgs) -> Result<()> {
    let store = open_store(args)?;
    let rows = report::author_revenue(&store)
        .with_context(|| format!("Running author revenue report on {:?}", args.path))?;
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", report::render_report(&rows))?;
    store.close()?;
    Ok(())
}

fn handle_menu(args: &DatabaseArgs) -> Result<()> {
    let store = open_store(args)?;
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    menu::run_menu(&store, stdin, &mut stdout).context("Running query menu")?;
    store.close()?;
    Ok(())
}

use std::io::Write;

use encoding_rs::Encoding;
use log::{error, info};

use crate::{
    ingest::{IngestionResult, ingest_file},
    source::SourceFile,
    store::Store,
};

#[derive(Debug, Default)]
pub struct RunSummary {
    pub results: Vec<IngestionResult>,
}

impl RunSummary {
    pub fn total_rows(&self) -> usize {
        self.results.iter().map(IngestionResult::rows_inserted).sum()
    }

    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }

    pub fn get(&self, table: &str) -> Option<&IngestionResult> {
        self.results.iter().find(|r| r.source.table == table)
    }
}

/// Ingests `sources` in order, writing one status line per file to `out`.
///
/// The store is closed once every source has been attempted, whatever the
/// individual outcomes.
pub fn run_ingestion<W: Write>(
    mut store: Store,
    sources: &[SourceFile],
    encoding: &'static Encoding,
    out: &mut W,
) -> RunSummary {
    let mut summary = RunSummary::default();
    for source in sources {
        let result = ingest_file(&mut store, source, encoding);
        let _ = writeln!(out, "{result}");
        summary.results.push(result);
    }

    if let Err(err) = store.close() {
        error!("Closing database failed: {err}");
        let _ = writeln!(out, "Error closing database: {err}");
    }

    info!(
        "Ingested {} row(s) from {} source(s); {} failed",
        summary.total_rows(),
        sources.len(),
        summary.failures()
    );
    let _ = writeln!(out, "\nData ingestion completed!");
    summary
}

//! Per-file ingestion: header → table → rows → commit.
//!
//! Every error is contained at file granularity and reported as an
//! [`IngestionResult`]. All inserts of a file run inside one transaction, so a
//! failing row leaves nothing from that file behind. The table itself is
//! created before the transaction begins and survives a rollback.

use std::fmt;

use encoding_rs::Encoding;
use log::{debug, error, info, warn};

use crate::{
    data::parse_cell,
    error::{IngestError, Result},
    io_utils,
    normalize::normalize_row,
    schema::build_schema,
    source::SourceFile,
    store::Store,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    NotStarted,
    HeaderRead,
    SchemaReady,
    Inserting,
    Committed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotFound,
    Empty,
}

#[derive(Debug)]
pub enum Outcome {
    Skipped(SkipReason),
    Ingested { rows: usize },
    Failed(IngestError),
}

#[derive(Debug)]
pub struct IngestionResult {
    pub source: SourceFile,
    pub outcome: Outcome,
}

impl IngestionResult {
    pub fn rows_inserted(&self) -> usize {
        match self.outcome {
            Outcome::Ingested { rows } => rows,
            _ => 0,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }
}

impl fmt::Display for IngestionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self.source.file_name();
        match &self.outcome {
            Outcome::Skipped(SkipReason::NotFound) => {
                write!(f, "Warning: {file} not found. Skipping...")
            }
            Outcome::Skipped(SkipReason::Empty) => {
                write!(f, "Warning: {file} is empty. Skipping...")
            }
            Outcome::Ingested { rows } => {
                write!(f, "Successfully ingested {file} ({rows} rows inserted)")
            }
            Outcome::Failed(err) => write!(f, "Error processing {file}: {err}"),
        }
    }
}

pub fn ingest_file(
    store: &mut Store,
    source: &SourceFile,
    encoding: &'static Encoding,
) -> IngestionResult {
    let mut state = FileState::NotStarted;
    let outcome = match load_file(store, source, encoding, &mut state) {
        Ok(rows) => Outcome::Ingested { rows },
        Err(IngestError::MissingSource { path }) => {
            warn!("{path:?} not found; skipping");
            Outcome::Skipped(SkipReason::NotFound)
        }
        Err(IngestError::EmptyFile { path }) => {
            warn!("{path:?} has no header record; skipping");
            Outcome::Skipped(SkipReason::Empty)
        }
        Err(err) => {
            error!("Ingesting {:?} failed in state {state:?}: {err}", source.path);
            advance(source, &mut state, FileState::Failed);
            Outcome::Failed(err)
        }
    };
    IngestionResult {
        source: source.clone(),
        outcome,
    }
}

fn load_file(
    store: &mut Store,
    source: &SourceFile,
    encoding: &'static Encoding,
    state: &mut FileState,
) -> Result<usize> {
    let path = &source.path;
    let table = source.table.as_str();
    if !path.exists() {
        return Err(IngestError::MissingSource { path: path.clone() });
    }

    let mut input =
        io_utils::open_buffered_input(path).map_err(|err| IngestError::read(path, err))?;
    // A blank first line leaves the file without a header.
    if io_utils::first_line_is_blank(&mut input).map_err(|err| IngestError::read(path, err))? {
        return Err(IngestError::EmptyFile { path: path.clone() });
    }
    let mut reader = io_utils::open_csv_reader(input);
    let mut record = csv::ByteRecord::new();
    let has_header = reader
        .read_byte_record(&mut record)
        .map_err(|err| IngestError::read(path, format!("row 1: {err}")))?;
    if !has_header {
        return Err(IngestError::EmptyFile { path: path.clone() });
    }
    let headers = io_utils::decode_record(&record, encoding)
        .map_err(|err| IngestError::read(path, format!("row 1: {err}")))?
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect::<Vec<_>>();
    advance(source, state, FileState::HeaderRead);

    let schema = build_schema(store, table, &headers)?;
    let types = schema.column_types();
    advance(source, state, FileState::SchemaReady);

    let tx = store
        .connection_mut()
        .transaction()
        .map_err(|err| IngestError::transaction(table, err))?;
    advance(source, state, FileState::Inserting);

    let mut inserted = 0usize;
    {
        let mut stmt = tx
            .prepare(&schema.insert_sql())
            .map_err(|err| IngestError::schema(table, err.to_string()))?;
        let mut row_number = 1usize;
        while reader
            .read_byte_record(&mut record)
            .map_err(|err| IngestError::read(path, format!("row {}: {err}", row_number + 1)))?
        {
            row_number += 1;
            let raw = io_utils::decode_record(&record, encoding)
                .map_err(|err| IngestError::read(path, format!("row {row_number}: {err}")))?;
            let Some(row) = normalize_row(headers.len(), &raw) else {
                debug!("Dropping empty row {row_number} in {path:?}");
                continue;
            };
            if raw.len() > headers.len() {
                debug!(
                    "Row {row_number} in {path:?} has {} cells; keeping the first {}",
                    raw.len(),
                    headers.len()
                );
            }
            let values = row
                .iter()
                .zip(&types)
                .map(|(cell, ty)| parse_cell(cell, *ty))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|reason| IngestError::insert(table, row_number, reason))?;
            stmt.execute(rusqlite::params_from_iter(values.iter()))
                .map_err(|err| IngestError::insert(table, row_number, err.to_string()))?;
            inserted += 1;
        }
    }

    tx.commit()
        .map_err(|err| IngestError::transaction(table, err))?;
    advance(source, state, FileState::Committed);
    info!("Committed {inserted} row(s) into '{table}' from {path:?}");
    Ok(inserted)
}

fn advance(source: &SourceFile, state: &mut FileState, next: FileState) {
    debug!("{}: {state:?} -> {next:?}", source.file_name());
    *state = next;
}

mod common;

use bookstore_data::{
    batch::run_ingestion,
    error::IngestError,
    ingest::{Outcome, SkipReason, ingest_file},
    source::{SourceFile, default_sources},
    store::Store,
};
use common::TestWorkspace;
use encoding_rs::{UTF_8, WINDOWS_1252};
use rusqlite::types::Value;

fn ingest_all(workspace: &TestWorkspace) -> (bookstore_data::batch::RunSummary, String) {
    let store = workspace.open_store();
    let mut out = Vec::new();
    let summary = run_ingestion(
        store,
        &default_sources(workspace.path()),
        UTF_8,
        &mut out,
    );
    (summary, String::from_utf8(out).expect("utf-8 output"))
}

fn select_all(store: &Store, sql: &str) -> Vec<Vec<Value>> {
    let mut stmt = store.connection().prepare(sql).expect("prepare");
    let column_count = stmt.column_count();
    stmt.query_map([], |row| {
        (0..column_count)
            .map(|idx| row.get::<_, Value>(idx))
            .collect::<rusqlite::Result<Vec<_>>>()
    })
    .expect("query")
    .collect::<rusqlite::Result<Vec<_>>>()
    .expect("rows")
}

#[test]
fn books_file_is_typed_padded_and_filtered() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("books.csv", "book_id,title,price\n1,Dune,12.50\n,,\n2,Foo\n");
    let mut store = workspace.open_store();

    let result = ingest_file(&mut store, &SourceFile::new(&path), UTF_8);

    assert!(matches!(result.outcome, Outcome::Ingested { rows: 2 }));
    assert_eq!(
        store.table_columns("books").unwrap(),
        vec![
            ("book_id".to_string(), "INTEGER".to_string()),
            ("title".to_string(), "TEXT".to_string()),
            ("price".to_string(), "REAL".to_string()),
        ]
    );
    assert_eq!(
        select_all(&store, "SELECT book_id, title, price FROM books ORDER BY rowid"),
        vec![
            vec![
                Value::Integer(1),
                Value::Text("Dune".to_string()),
                Value::Real(12.5),
            ],
            vec![
                Value::Integer(2),
                Value::Text("Foo".to_string()),
                Value::Text(String::new()),
            ],
        ]
    );
}

#[test]
fn long_rows_are_truncated_and_cells_trimmed() {
    let workspace = TestWorkspace::new();
    let path = workspace.write(
        "members.csv",
        "member_id , name\n 7 ,  Ada Lovelace , extra, more\n",
    );
    let mut store = workspace.open_store();

    let result = ingest_file(&mut store, &SourceFile::new(&path), UTF_8);

    assert_eq!(result.rows_inserted(), 1);
    assert_eq!(
        select_all(&store, "SELECT member_id, name FROM members"),
        vec![vec![
            Value::Integer(7),
            Value::Text("Ada Lovelace".to_string()),
        ]]
    );
}

#[test]
fn quoted_fields_follow_csv_rules() {
    let workspace = TestWorkspace::new();
    let path = workspace.write(
        "authors.csv",
        "author_id,author_name\n1,\"Herbert, Frank\"\n2,\"Le Guin, \"\"Ursula\"\"\"\n",
    );
    let mut store = workspace.open_store();

    ingest_file(&mut store, &SourceFile::new(&path), UTF_8);

    assert_eq!(
        select_all(&store, "SELECT author_name FROM authors ORDER BY author_id"),
        vec![
            vec![Value::Text("Herbert, Frank".to_string())],
            vec![Value::Text("Le Guin, \"Ursula\"".to_string())],
        ]
    );
}

#[test]
fn full_run_reports_every_file_in_declared_order() {
    let workspace = TestWorkspace::new();
    workspace.write_bookstore();

    let (summary, output) = ingest_all(&workspace);

    let lines = output.lines().collect::<Vec<_>>();
    assert_eq!(
        lines,
        vec![
            "Successfully ingested members.csv (2 rows inserted)",
            "Successfully ingested authors.csv (2 rows inserted)",
            "Successfully ingested books.csv (3 rows inserted)",
            "Successfully ingested orders.csv (3 rows inserted)",
            "Successfully ingested order_details.csv (5 rows inserted)",
            "",
            "Data ingestion completed!",
        ]
    );
    assert_eq!(summary.total_rows(), 15);
    assert_eq!(summary.failures(), 0);

    let store = workspace.open_store();
    assert_eq!(store.row_count("order_details").unwrap(), 5);
}

#[test]
fn missing_source_is_skipped_and_the_rest_are_ingested() {
    let workspace = TestWorkspace::new();
    workspace.write_bookstore();
    std::fs::remove_file(workspace.path().join("members.csv")).unwrap();

    let (summary, output) = ingest_all(&workspace);

    assert!(output.starts_with("Warning: members.csv not found. Skipping...\n"));
    let members = summary.get("members").expect("members result");
    assert!(matches!(
        members.outcome,
        Outcome::Skipped(SkipReason::NotFound)
    ));
    assert_eq!(members.rows_inserted(), 0);
    assert_eq!(summary.results.len(), 5);
    assert_eq!(summary.failures(), 0);
    assert_eq!(summary.get("order_details").unwrap().rows_inserted(), 5);

    let store = workspace.open_store();
    assert!(!store.table_exists("members").unwrap());
}

#[test]
fn schema_failure_does_not_stop_later_files() {
    let workspace = TestWorkspace::new();
    workspace.write_bookstore();
    workspace.write("books.csv", "book_id,select,price\n10,Dune,12.50\n");

    let (summary, output) = ingest_all(&workspace);

    let books = summary.get("books").unwrap();
    assert!(matches!(
        books.outcome,
        Outcome::Failed(IngestError::Schema { .. })
    ));
    assert!(output.contains("Error processing books.csv: invalid schema for table 'books'"));
    assert_eq!(summary.get("orders").unwrap().rows_inserted(), 3);
    assert_eq!(summary.get("order_details").unwrap().rows_inserted(), 5);

    let store = workspace.open_store();
    assert!(!store.table_exists("books").unwrap());
    assert_eq!(store.row_count("orders").unwrap(), 3);
    assert_eq!(store.row_count("authors").unwrap(), 2);
}

#[test]
fn insert_failure_rolls_back_only_that_file() {
    let workspace = TestWorkspace::new();
    workspace.write_bookstore();
    workspace.write(
        "authors.csv",
        "author_id,author_name\n1,Frank Herbert\ntwo,Ursula K. Le Guin\n",
    );

    let (summary, output) = ingest_all(&workspace);

    assert!(output.contains(
        "Error processing authors.csv: failed to insert row 3 into 'authors': expected integer, found 'two'"
    ));
    assert_eq!(summary.failures(), 1);
    assert_eq!(summary.get("members").unwrap().rows_inserted(), 2);
    assert_eq!(summary.get("books").unwrap().rows_inserted(), 3);

    let store = workspace.open_store();
    assert_eq!(store.row_count("authors").unwrap(), 0);
    assert_eq!(store.row_count("members").unwrap(), 2);
    assert_eq!(store.row_count("books").unwrap(), 3);
}

#[test]
fn rerunning_keeps_table_definitions() {
    let workspace = TestWorkspace::new();
    workspace.write_bookstore();
    ingest_all(&workspace);
    let before = workspace.open_store().table_columns("books").unwrap();

    let (summary, _) = ingest_all(&workspace);

    assert_eq!(summary.failures(), 0);
    let store = workspace.open_store();
    assert_eq!(store.table_columns("books").unwrap(), before);
    // Tables are created if absent; rows are appended again.
    assert_eq!(store.row_count("books").unwrap(), 6);
}

#[test]
fn input_encoding_is_applied_to_every_record() {
    let workspace = TestWorkspace::new();
    let path = workspace.path().join("members.csv");
    let (encoded, _, _) = WINDOWS_1252.encode("member_id,name\n1,Ren\u{e9}e\n");
    std::fs::write(&path, &encoded).unwrap();
    let mut store = workspace.open_store();

    let result = ingest_file(&mut store, &SourceFile::new(&path), WINDOWS_1252);

    assert_eq!(result.rows_inserted(), 1);
    assert_eq!(
        select_all(&store, "SELECT name FROM members"),
        vec![vec![Value::Text("Ren\u{e9}e".to_string())]]
    );
}

#[test]
fn nan_price_fails_the_file_instead_of_storing_null() {
    let workspace = TestWorkspace::new();
    let path = workspace.write("books.csv", "book_id,title,price\n1,Dune,12.50\n2,Foo,NaN\n");
    let mut store = workspace.open_store();

    let result = ingest_file(&mut store, &SourceFile::new(&path), UTF_8);

    match &result.outcome {
        Outcome::Failed(IngestError::Insert { table, row, reason }) => {
            assert_eq!(table, "books");
            assert_eq!(*row, 3);
            assert_eq!(reason, "expected real number, found 'NaN'");
        }
        other => panic!("expected insert failure, got {other:?}"),
    }
    assert_eq!(store.row_count("books").unwrap(), 0);
}

#[test]
fn existing_table_without_a_header_column_fails_at_prepare() {
    let workspace = TestWorkspace::new();
    let mut store = workspace.open_store();
    store
        .connection()
        .execute_batch("CREATE TABLE books (book_id INTEGER, title TEXT)")
        .unwrap();
    let path = workspace.write("books.csv", "book_id,title,price\n1,Dune,12.50\n");

    let result = ingest_file(&mut store, &SourceFile::new(&path), UTF_8);

    match &result.outcome {
        Outcome::Failed(IngestError::Schema { table, reason }) => {
            assert_eq!(table, "books");
            assert!(reason.contains("price"), "unexpected reason: {reason}");
        }
        other => panic!("expected schema failure, got {other:?}"),
    }
    assert_eq!(store.table_columns("books").unwrap().len(), 2);
    assert_eq!(store.row_count("books").unwrap(), 0);
}

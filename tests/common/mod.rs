#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use bookstore_data::store::Store;
use tempfile::{TempDir, tempdir};

pub const AUTHORS_CSV: &str = "author_id,author_name\n1,Frank Herbert\n2,Ursula K. Le Guin\n";
pub const BOOKS_CSV: &str =
    "book_id,title,author_id,price\n10,Dune,1,12.50\n11,The Dispossessed,2,9.99\n12,Children of Dune,1,8.00\n";
pub const ORDERS_CSV: &str =
    "order_id,member_id,order_date,status\n100,1,2024-01-05,Shipped\n101,2,2024-01-06,Cancelled\n102,1,2024-02-01,Delivered\n";
pub const ORDER_DETAILS_CSV: &str = "order_detail_id,order_id,book_id,quantity\n1,100,10,2\n2,101,10,5\n3,101,11,1\n4,102,11,3\n5,102,10,1\n";
pub const MEMBERS_CSV: &str = "member_id,name,join_date\n1,Ada,2023-12-01\n2,Grace,2023-12-15\n";

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    /// Writes all five bookstore sources.
    pub fn write_bookstore(&self) {
        self.write("members.csv", MEMBERS_CSV);
        self.write("authors.csv", AUTHORS_CSV);
        self.write("books.csv", BOOKS_CSV);
        self.write("orders.csv", ORDERS_CSV);
        self.write("order_details.csv", ORDER_DETAILS_CSV);
    }

    pub fn database(&self) -> PathBuf {
        self.temp_dir.path().join("bookstore.db")
    }

    pub fn open_store(&self) -> Store {
        Store::open(self.database()).expect("open store")
    }
}

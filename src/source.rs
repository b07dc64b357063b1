use std::path::{Path, PathBuf};

/// Source files in the order they are ingested.
pub const DEFAULT_SOURCES: &[&str] = &[
    "members.csv",
    "authors.csv",
    "books.csv",
    "orders.csv",
    "order_details.csv",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub table: String,
}

impl SourceFile {
    /// The table name is the file name without its extension.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let table = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, table }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// The fixed source list resolved against `data_dir`.
pub fn default_sources(data_dir: &Path) -> Vec<SourceFile> {
    DEFAULT_SOURCES
        .iter()
        .map(|name| SourceFile::new(data_dir.join(name)))
        .collect()
}

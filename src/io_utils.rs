//! CSV reader construction and input decoding.
//!
//! Source files are read as raw byte records and decoded with the requested
//! `encoding_rs` encoding (UTF-8 unless overridden). Readers are flexible:
//! record lengths may differ from the header, and the row normalizer decides
//! what to do with them.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Read},
    path::Path,
};

use anyhow::{Result, anyhow};
use encoding_rs::{Encoding, UTF_8};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

/// Headers are not consumed by the reader; the first record is read like any
/// other so an empty file can be told apart from a header-only one.
pub fn open_csv_reader<R>(reader: R) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .delimiter(DEFAULT_CSV_DELIMITER)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

pub fn open_buffered_input(path: &Path) -> io::Result<BufReader<File>> {
    Ok(BufReader::new(File::open(path)?))
}

/// Peeks without consuming. The CSV reader silently skips blank lines, so a
/// blank first line has to be detected before it takes over.
pub fn first_line_is_blank<R: BufRead>(input: &mut R) -> io::Result<bool> {
    let buffered = input.fill_buf()?;
    Ok(matches!(buffered.first(), Some(b'\n' | b'\r')))
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn decode_record(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| decode_bytes(field, encoding))
        .collect()
}

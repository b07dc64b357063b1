//! Row shaping: force every data row to the header's arity.

/// Returns `None` when the row carries no data at all (no cells, or only
/// blank cells). Otherwise the row is padded with empty strings or truncated
/// to `header_len`, and every cell is trimmed.
pub fn normalize_row<S: AsRef<str>>(header_len: usize, raw: &[S]) -> Option<Vec<String>> {
    if is_empty_row(raw) {
        return None;
    }
    let mut row = raw
        .iter()
        .take(header_len)
        .map(|cell| cell.as_ref().trim().to_string())
        .collect::<Vec<_>>();
    row.resize(header_len, String::new());
    Some(row)
}

pub fn is_empty_row<S: AsRef<str>>(raw: &[S]) -> bool {
    raw.iter().all(|cell| cell.as_ref().trim().is_empty())
}

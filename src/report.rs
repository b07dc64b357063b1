//! Author revenue report over the ingested tables.

use log::debug;

use crate::{
    error::{IngestError, Result},
    store::Store,
    table::{self, Column},
};

/// Revenue per (author, title), excluding cancelled orders, highest first.
pub const AUTHOR_REVENUE_QUERY: &str = "
SELECT
    a.author_name,
    b.title,
    ROUND(SUM(b.price * od.quantity), 2) AS total_sales
FROM authors a
INNER JOIN books b ON a.author_id = b.author_id
INNER JOIN order_details od ON b.book_id = od.book_id
INNER JOIN orders o ON od.order_id = o.order_id
WHERE o.status != 'Cancelled'
GROUP BY a.author_name, b.title
ORDER BY total_sales DESC
";

pub const REPORT_TITLE: &str = "AUTHOR REVENUE REPORT";

#[derive(Debug, Clone, PartialEq)]
pub struct AuthorRevenue {
    pub author: String,
    pub title: String,
    pub total: f64,
}

pub fn author_revenue(store: &Store) -> Result<Vec<AuthorRevenue>> {
    let mut stmt = store
        .connection()
        .prepare(AUTHOR_REVENUE_QUERY)
        .map_err(IngestError::Query)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(AuthorRevenue {
                author: row.get(0)?,
                title: row.get(1)?,
                total: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
            })
        })
        .map_err(IngestError::Query)?;
    let rows = rows
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(IngestError::Query)?;
    debug!("Author revenue query returned {} row(s)", rows.len());
    Ok(rows)
}

pub fn format_amount(amount: f64) -> String {
    format!("${amount:.2}")
}

pub fn render_report(rows: &[AuthorRevenue]) -> String {
    if rows.is_empty() {
        return "No results found.\n".to_string();
    }
    let columns = [
        Column::left("Author Name", 15),
        Column::left("Book Title", 20),
        Column::right("Total Sales Amount", 18),
    ];
    let cells = rows
        .iter()
        .map(|r| vec![r.author.clone(), r.title.clone(), format_amount(r.total)])
        .collect::<Vec<_>>();
    table::render_boxed_table(
        REPORT_TITLE,
        &columns,
        &cells,
        &format!("Total records: {}", rows.len()),
    )
}

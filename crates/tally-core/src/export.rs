//! CSV export of transaction history

use std::io::Write;

use crate::error::Result;
use crate::models::Transaction;

const CSV_HEADER: [&str; 5] = ["Date", "Title", "Amount", "Type", "Category"];

/// Write transactions as CSV, oldest first
///
/// Titles are replaced with "N/A" when absent so every row has five
/// populated columns.
pub fn write_transactions_csv<W: Write>(writer: W, transactions: &[Transaction]) -> Result<()> {
    let mut rows: Vec<&Transaction> = transactions.iter().collect();
    rows.sort_by_key(|t| (t.date, t.id));

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for tx in rows {
        csv_writer.write_record([
            tx.date.format("%Y-%m-%d").to_string(),
            tx.title.clone().unwrap_or_else(|| "N/A".to_string()),
            tx.amount.to_string(),
            tx.kind.to_string(),
            tx.category.clone(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

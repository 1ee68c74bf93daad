//! Bill listing and creation

use rusqlite::{params, Row};

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{Bill, NewBill};

impl Database {
    /// Insert a bill for a user, returning its id
    pub fn insert_bill(&self, user_id: i64, bill: &NewBill) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO bills (user_id, title, amount, due_date) VALUES (?, ?, ?, ?)",
            params![user_id, bill.title, bill.amount, bill.due_date.to_string()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// List bills for a user ordered by due date
    pub fn list_bills(&self, user_id: i64) -> Result<Vec<Bill>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, title, amount, due_date, created_at
            FROM bills
            WHERE user_id = ?
            ORDER BY due_date, id
            "#,
        )?;
        let bills = stmt
            .query_map(params![user_id], Self::row_to_bill)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(bills)
    }

    fn row_to_bill(row: &Row<'_>) -> rusqlite::Result<Bill> {
        let due_date: String = row.get(4)?;
        let created_at: String = row.get(5)?;
        Ok(Bill {
            id: row.get(0)?,
            user_id: row.get(1)?,
            title: row.get(2)?,
            amount: row.get(3)?,
            due_date: due_date.parse().map_err(|_| {
                rusqlite::Error::FromSqlConversionFailure(
                    4,
                    rusqlite::types::Type::Text,
                    format!("invalid date: {}", due_date).into(),
                )
            })?,
            created_at: parse_datetime(&created_at),
        })
    }
}

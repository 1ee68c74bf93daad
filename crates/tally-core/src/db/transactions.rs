//! Transaction operations

use rusqlite::{params, OptionalExtension, Row};

use super::transaction_filter::TransactionFilter;
use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction};

impl Database {
    /// Insert a transaction for a user, returning its id
    pub fn insert_transaction(&self, user_id: i64, tx: &NewTransaction) -> Result<i64> {
        if tx.amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "Transaction amount must be non-negative, got {}",
                tx.amount
            )));
        }

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO transactions (user_id, title, amount, kind, category, date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                tx.title,
                tx.amount,
                tx.kind.as_str(),
                tx.category,
                tx.date.to_string(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Get a single transaction, scoped to its owner
    pub fn get_transaction(&self, user_id: i64, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let tx = conn
            .query_row(
                r#"
                SELECT t.id, t.user_id, t.title, t.amount, t.kind, t.category, t.date, t.created_at
                FROM transactions t
                WHERE t.id = ? AND t.user_id = ?
                "#,
                params![id, user_id],
                Self::row_to_transaction,
            )
            .optional()?;
        Ok(tx)
    }

    /// Replace the mutable fields of a transaction, scoped to its owner
    ///
    /// Returns false if no transaction matched.
    pub fn update_transaction(&self, user_id: i64, id: i64, tx: &NewTransaction) -> Result<bool> {
        if tx.amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "Transaction amount must be non-negative, got {}",
                tx.amount
            )));
        }

        let conn = self.conn()?;
        let changed = conn.execute(
            r#"
            UPDATE transactions
            SET title = ?, amount = ?, kind = ?, category = ?, date = ?
            WHERE id = ? AND user_id = ?
            "#,
            params![
                tx.title,
                tx.amount,
                tx.kind.as_str(),
                tx.category,
                tx.date.to_string(),
                id,
                user_id,
            ],
        )?;
        Ok(changed > 0)
    }

    /// Delete a transaction, scoped to its owner
    pub fn delete_transaction(&self, user_id: i64, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "DELETE FROM transactions WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        Ok(changed > 0)
    }

    /// List transactions matching a filter, with pagination
    pub fn list_transactions(
        &self,
        filter: TransactionFilter<'_>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let built = filter.build();

        let sql = format!(
            r#"
            SELECT t.id, t.user_id, t.title, t.amount, t.kind, t.category, t.date, t.created_at
            FROM transactions t
            {}
            {}
            LIMIT ? OFFSET ?
            "#,
            built.where_clause, built.order_clause
        );

        let mut params = built.params;
        params.push(Box::new(limit));
        params.push(Box::new(offset));
        let params_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = conn.prepare(&sql)?;
        let transactions = stmt
            .query_map(params_refs.as_slice(), Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Count transactions matching a filter
    pub fn count_transactions(&self, filter: TransactionFilter<'_>) -> Result<i64> {
        let conn = self.conn()?;
        let built = filter.build();
        let count: i64 = conn.query_row(
            &built.build_count_query(),
            built.params_refs().as_slice(),
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Fetch the full transaction snapshot for a user, oldest first
    ///
    /// Analytics computations read this snapshot once and derive everything
    /// in memory; ascending (date, id) order keeps derived output stable.
    pub fn transaction_snapshot(&self, user_id: i64) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT t.id, t.user_id, t.title, t.amount, t.kind, t.category, t.date, t.created_at
            FROM transactions t
            WHERE t.user_id = ?
            ORDER BY t.date ASC, t.id ASC
            "#,
        )?;

        let transactions = stmt
            .query_map(params![user_id], Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
        let kind_str: String = row.get(4)?;
        let date_str: String = row.get(6)?;
        let created_at: String = row.get(7)?;

        Ok(Transaction {
            id: row.get(0)?,
            user_id: row.get(1)?,
            title: row.get(2)?,
            amount: row.get(3)?,
            kind: kind_str.parse().map_err(|e: String| {
                rusqlite::Error::FromSqlConversionFailure(
                    4,
                    rusqlite::types::Type::Text,
                    e.into(),
                )
            })?,
            category: row.get(5)?,
            date: date_str.parse().map_err(|_| {
                rusqlite::Error::FromSqlConversionFailure(
                    6,
                    rusqlite::types::Type::Text,
                    format!("invalid date: {}", date_str).into(),
                )
            })?,
            created_at: parse_datetime(&created_at),
        })
    }
}

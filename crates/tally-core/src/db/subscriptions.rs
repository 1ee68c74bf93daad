//! Subscription listing and creation

use rusqlite::{params, Row};

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{NewSubscription, Subscription};

impl Database {
    /// Insert a subscription for a user, returning its id
    pub fn insert_subscription(&self, user_id: i64, sub: &NewSubscription) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO subscriptions (user_id, title, amount, category, due_date)
            VALUES (?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                sub.title,
                sub.amount,
                sub.category,
                sub.due_date.to_string(),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// List subscriptions for a user ordered by due date
    pub fn list_subscriptions(&self, user_id: i64) -> Result<Vec<Subscription>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, title, amount, category, due_date, created_at
            FROM subscriptions
            WHERE user_id = ?
            ORDER BY due_date, id
            "#,
        )?;
        let subscriptions = stmt
            .query_map(params![user_id], Self::row_to_subscription)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(subscriptions)
    }

    fn row_to_subscription(row: &Row<'_>) -> rusqlite::Result<Subscription> {
        let due_date: String = row.get(5)?;
        let created_at: String = row.get(6)?;
        Ok(Subscription {
            id: row.get(0)?,
            user_id: row.get(1)?,
            title: row.get(2)?,
            amount: row.get(3)?,
            category: row.get(4)?,
            due_date: due_date.parse().map_err(|_| {
                rusqlite::Error::FromSqlConversionFailure(
                    5,
                    rusqlite::types::Type::Text,
                    format!("invalid date: {}", due_date).into(),
                )
            })?,
            created_at: parse_datetime(&created_at),
        })
    }
}

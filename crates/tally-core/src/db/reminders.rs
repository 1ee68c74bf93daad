//! Personal reminder operations

use rusqlite::{params, OptionalExtension, Row};

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{NewReminder, Reminder, ReminderUpdate};

impl Database {
    /// Insert a reminder for a user, returning its id
    pub fn insert_reminder(&self, user_id: i64, reminder: &NewReminder) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO reminders (user_id, title, description, due_date)
            VALUES (?, ?, ?, ?)
            "#,
            params![
                user_id,
                reminder.title,
                reminder.description,
                reminder.due_date.to_string(),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Get a single reminder, scoped to its owner
    pub fn get_reminder(&self, user_id: i64, id: i64) -> Result<Option<Reminder>> {
        let conn = self.conn()?;
        let reminder = conn
            .query_row(
                r#"
                SELECT id, user_id, title, description, due_date, is_completed, created_at
                FROM reminders
                WHERE id = ? AND user_id = ?
                "#,
                params![id, user_id],
                Self::row_to_reminder,
            )
            .optional()?;
        Ok(reminder)
    }

    /// List reminders for a user ordered by due date
    ///
    /// When `include_completed` is false only open reminders are returned,
    /// which is what the reminder list view shows.
    pub fn list_reminders(&self, user_id: i64, include_completed: bool) -> Result<Vec<Reminder>> {
        let conn = self.conn()?;
        let sql = if include_completed {
            r#"
            SELECT id, user_id, title, description, due_date, is_completed, created_at
            FROM reminders
            WHERE user_id = ?
            ORDER BY due_date, id
            "#
        } else {
            r#"
            SELECT id, user_id, title, description, due_date, is_completed, created_at
            FROM reminders
            WHERE user_id = ? AND is_completed = 0
            ORDER BY due_date, id
            "#
        };
        let mut stmt = conn.prepare(sql)?;
        let reminders = stmt
            .query_map(params![user_id], Self::row_to_reminder)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(reminders)
    }

    /// Apply a partial update to a reminder, scoped to its owner
    ///
    /// Returns the updated reminder, or None if it does not exist.
    pub fn update_reminder(
        &self,
        user_id: i64,
        id: i64,
        update: &ReminderUpdate,
    ) -> Result<Option<Reminder>> {
        let existing = match self.get_reminder(user_id, id)? {
            Some(r) => r,
            None => return Ok(None),
        };

        let title = update.title.as_deref().unwrap_or(&existing.title);
        let description = update
            .description
            .clone()
            .or_else(|| existing.description.clone());
        let due_date = update.due_date.unwrap_or(existing.due_date);
        let is_completed = update.is_completed.unwrap_or(existing.is_completed);

        let conn = self.conn()?;
        conn.execute(
            r#"
            UPDATE reminders
            SET title = ?, description = ?, due_date = ?, is_completed = ?
            WHERE id = ? AND user_id = ?
            "#,
            params![
                title,
                description,
                due_date.to_string(),
                is_completed,
                id,
                user_id,
            ],
        )?;

        self.get_reminder(user_id, id)
    }

    /// Delete a reminder, scoped to its owner
    pub fn delete_reminder(&self, user_id: i64, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "DELETE FROM reminders WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        Ok(changed > 0)
    }

    fn row_to_reminder(row: &Row<'_>) -> rusqlite::Result<Reminder> {
        let due_date: String = row.get(4)?;
        let created_at: String = row.get(6)?;
        Ok(Reminder {
            id: row.get(0)?,
            user_id: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            due_date: due_date.parse().map_err(|_| {
                rusqlite::Error::FromSqlConversionFailure(
                    4,
                    rusqlite::types::Type::Text,
                    format!("invalid date: {}", due_date).into(),
                )
            })?,
            is_completed: row.get(5)?,
            created_at: parse_datetime(&created_at),
        })
    }
}

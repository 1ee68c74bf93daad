//! Savings goal operations

use rusqlite::{params, OptionalExtension, Row};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Goal, NewGoal};

impl Database {
    /// Insert a goal for a user, returning its id
    pub fn insert_goal(&self, user_id: i64, goal: &NewGoal) -> Result<i64> {
        if goal.target_amount <= 0.0 {
            return Err(Error::InvalidData(format!(
                "Goal target amount must be positive, got {}",
                goal.target_amount
            )));
        }

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO goals (user_id, name, target_amount, saved_amount, end_date)
            VALUES (?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                goal.name,
                goal.target_amount,
                goal.saved_amount,
                goal.end_date.map(|d| d.to_string()),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Get a single goal, scoped to its owner
    pub fn get_goal(&self, user_id: i64, id: i64) -> Result<Option<Goal>> {
        let conn = self.conn()?;
        let goal = conn
            .query_row(
                r#"
                SELECT id, user_id, name, target_amount, saved_amount, end_date, created_at
                FROM goals
                WHERE id = ? AND user_id = ?
                "#,
                params![id, user_id],
                Self::row_to_goal,
            )
            .optional()?;
        Ok(goal)
    }

    /// List all goals for a user, oldest first
    pub fn list_goals(&self, user_id: i64) -> Result<Vec<Goal>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, name, target_amount, saved_amount, end_date, created_at
            FROM goals
            WHERE user_id = ?
            ORDER BY id
            "#,
        )?;
        let goals = stmt
            .query_map(params![user_id], Self::row_to_goal)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(goals)
    }

    /// Update the saved amount on a goal as the user puts money aside
    ///
    /// Returns false if no goal matched.
    pub fn update_goal_saved_amount(
        &self,
        user_id: i64,
        id: i64,
        saved_amount: f64,
    ) -> Result<bool> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE goals SET saved_amount = ? WHERE id = ? AND user_id = ?",
            params![saved_amount, id, user_id],
        )?;
        Ok(changed > 0)
    }

    /// Delete a goal, scoped to its owner
    pub fn delete_goal(&self, user_id: i64, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "DELETE FROM goals WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        Ok(changed > 0)
    }

    fn row_to_goal(row: &Row<'_>) -> rusqlite::Result<Goal> {
        let end_date: Option<String> = row.get(5)?;
        let created_at: String = row.get(6)?;
        Ok(Goal {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            target_amount: row.get(3)?,
            saved_amount: row.get(4)?,
            end_date: end_date.and_then(|d| d.parse().ok()),
            created_at: parse_datetime(&created_at),
        })
    }
}

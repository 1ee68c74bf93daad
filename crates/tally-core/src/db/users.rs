//! User accounts and API tokens

use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::User;

/// Username used when the server runs with authentication disabled
const LOCAL_USERNAME: &str = "local";

impl Database {
    /// Create a user with a freshly generated API token
    pub fn create_user(&self, username: &str) -> Result<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(Error::InvalidData("Username must not be empty".to_string()));
        }

        let token = Uuid::new_v4().to_string();
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (username, token) VALUES (?, ?)",
            params![username, token],
        )?;
        let id = conn.last_insert_rowid();

        self.get_user(id)?
            .ok_or_else(|| Error::NotFound(format!("User {} after insert", id)))
    }

    /// Get a user by id
    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT id, username, token, created_at FROM users WHERE id = ?",
                params![id],
                Self::row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    /// Get a user by username
    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT id, username, token, created_at FROM users WHERE username = ?",
                params![username],
                Self::row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    /// List all users
    pub fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT id, username, token, created_at FROM users ORDER BY id")?;
        let users = stmt
            .query_map([], Self::row_to_user)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Get the user that owns a token, if any
    ///
    /// Token comparison happens in the server middleware with a
    /// constant-time check against this lookup's result.
    pub fn get_user_by_token(&self, token: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT id, username, token, created_at FROM users WHERE token = ?",
                params![token],
                Self::row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    /// Get or create the default user for no-auth local development
    pub fn get_or_create_local_user(&self) -> Result<User> {
        if let Some(user) = self.get_user_by_username(LOCAL_USERNAME)? {
            return Ok(user);
        }
        self.create_user(LOCAL_USERNAME)
    }

    fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
        let created_at: String = row.get(3)?;
        Ok(User {
            id: row.get(0)?,
            username: row.get(1)?,
            token: row.get(2)?,
            created_at: parse_datetime(&created_at),
        })
    }
}

use chrono::Utc;
use rusqlite::{params, Row};

use taskdeck_core::user::{CreateUser, User};

use crate::{Db, DbError};

fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

impl Db {
    pub fn create_user(&self, input: &CreateUser) -> Result<User, DbError> {
        self.with_conn(|conn| {
            let now = Utc::now();
            conn.execute(
                "INSERT INTO users (name, email, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![input.name, input.email, now, now],
            )?;
            let id = conn.last_insert_rowid();
            let user = conn.query_row(
                "SELECT * FROM users WHERE id = ?1",
                params![id],
                row_to_user,
            )?;
            Ok(user)
        })
    }

    pub fn get_user(&self, id: i64) -> Result<User, DbError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM users WHERE id = ?1",
                params![id],
                row_to_user,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(format!("user {id}")),
                other => DbError::Sqlite(other),
            })
        })
    }

    pub fn list_users(&self) -> Result<Vec<User>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM users ORDER BY id")?;
            let users = stmt
                .query_map([], row_to_user)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(users)
        })
    }
}

use chrono::Utc;
use rusqlite::{params, Row};

use taskdeck_core::file::{CreateFile, File};

use crate::{Db, DbError};

fn row_to_file(row: &Row) -> rusqlite::Result<File> {
    Ok(File {
        id: row.get("id")?,
        filename: row.get("filename")?,
        path: row.get("path")?,
        created_at: row.get("created_at")?,
    })
}

impl Db {
    pub fn create_file(&self, input: &CreateFile) -> Result<File, DbError> {
        self.with_conn(|conn| {
            let now = Utc::now();
            conn.execute(
                "INSERT INTO files (filename, path, created_at) VALUES (?1, ?2, ?3)",
                params![input.filename, input.path, now],
            )?;
            let id = conn.last_insert_rowid();
            let file = conn.query_row(
                "SELECT * FROM files WHERE id = ?1",
                params![id],
                row_to_file,
            )?;
            Ok(file)
        })
    }

    pub fn get_file(&self, id: i64) -> Result<File, DbError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM files WHERE id = ?1",
                params![id],
                row_to_file,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(format!("file {id}")),
                other => DbError::Sqlite(other),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use taskdeck_core::file::CreateFile;

    use crate::Db;

    #[test]
    fn test_file_create_and_get() {
        let db = Db::open_in_memory().unwrap();

        let file = db
            .create_file(&CreateFile {
                filename: "mockup.png".into(),
                path: "uploads/mockup.png".into(),
            })
            .unwrap();

        let fetched = db.get_file(file.id).unwrap();
        assert_eq!(fetched.filename, "mockup.png");

        assert!(matches!(db.get_file(99), Err(crate::DbError::NotFound(_))));
    }
}

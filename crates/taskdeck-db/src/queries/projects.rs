use chrono::Utc;
use rusqlite::{params, Row};

use taskdeck_core::project::{CreateProject, Project, UpdateProject};

use crate::{Db, DbError};

fn row_to_project(row: &Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

impl Db {
    pub fn create_project(&self, input: &CreateProject) -> Result<Project, DbError> {
        self.with_conn(|conn| {
            let now = Utc::now();
            conn.execute(
                "INSERT INTO projects (title, description, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![input.title, input.description, now, now],
            )?;
            let id = conn.last_insert_rowid();
            let project = conn.query_row(
                "SELECT * FROM projects WHERE id = ?1",
                params![id],
                row_to_project,
            )?;
            Ok(project)
        })
    }

    pub fn get_project(&self, id: i64) -> Result<Project, DbError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM projects WHERE id = ?1",
                params![id],
                row_to_project,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    DbError::NotFound(format!("project {id}"))
                }
                other => DbError::Sqlite(other),
            })
        })
    }

    pub fn list_projects(&self) -> Result<Vec<Project>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM projects ORDER BY id")?;
            let projects = stmt
                .query_map([], row_to_project)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(projects)
        })
    }

    pub fn update_project(&self, id: i64, update: &UpdateProject) -> Result<Project, DbError> {
        self.with_conn(|conn| {
            let now = Utc::now();
            let mut sets = vec!["updated_at = ?1".to_string()];
            let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = vec![Box::new(now)];

            if let Some(ref title) = update.title {
                param_values.push(Box::new(title.clone()));
                sets.push(format!("title = ?{}", param_values.len()));
            }
            if let Some(ref description) = update.description {
                param_values.push(Box::new(description.clone()));
                sets.push(format!("description = ?{}", param_values.len()));
            }

            param_values.push(Box::new(id));
            let sql = format!(
                "UPDATE projects SET {} WHERE id = ?{}",
                sets.join(", "),
                param_values.len()
            );

            let params_ref: Vec<&dyn rusqlite::types::ToSql> =
                param_values.iter().map(|p| p.as_ref()).collect();

            let changed = conn.execute(&sql, params_ref.as_slice())?;
            if changed == 0 {
                return Err(DbError::NotFound(format!("project {id}")));
            }

            let project = conn.query_row(
                "SELECT * FROM projects WHERE id = ?1",
                params![id],
                row_to_project,
            )?;
            Ok(project)
        })
    }

    pub fn delete_project(&self, id: i64) -> Result<(), DbError> {
        self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM projects WHERE id = ?1", params![id])?;
            if changed == 0 {
                return Err(DbError::NotFound(format!("project {id}")));
            }
            Ok(())
        })
    }
}

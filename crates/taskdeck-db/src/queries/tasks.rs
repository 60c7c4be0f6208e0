use chrono::Utc;
use rusqlite::{params, Row};

use taskdeck_core::task::{CreateTask, Task, TaskWithUser, UpdateTask};
use taskdeck_core::user::User;

use crate::{Db, DbError};

fn row_to_task(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        user_id: row.get("user_id")?,
        file_id: row.get("file_id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        due_date: row.get("due_date")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn row_to_task_with_user(row: &Row) -> rusqlite::Result<TaskWithUser> {
    let task = row_to_task(row)?;
    let user = match row.get::<_, Option<i64>>("u_id")? {
        Some(id) => Some(User {
            id,
            name: row.get("u_name")?,
            email: row.get("u_email")?,
            created_at: row.get("u_created_at")?,
            updated_at: row.get("u_updated_at")?,
        }),
        None => None,
    };
    Ok(TaskWithUser { task, user })
}

impl Db {
    pub fn create_task(&self, input: &CreateTask) -> Result<Task, DbError> {
        self.with_conn(|conn| {
            let now = Utc::now();
            conn.execute(
                "INSERT INTO tasks (project_id, user_id, file_id, title, description,
                                    due_date, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    input.project_id,
                    input.user_id,
                    input.file_id,
                    input.title,
                    input.description,
                    input.due_date,
                    now,
                    now,
                ],
            )?;
            let id = conn.last_insert_rowid();
            let task = conn.query_row(
                "SELECT * FROM tasks WHERE id = ?1",
                params![id],
                row_to_task,
            )?;
            Ok(task)
        })
    }

    pub fn get_task(&self, id: i64) -> Result<Task, DbError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM tasks WHERE id = ?1",
                params![id],
                row_to_task,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(format!("task {id}")),
                other => DbError::Sqlite(other),
            })
        })
    }

    /// All tasks of a project, each with its assigned user joined in.
    pub fn list_project_tasks(&self, project_id: i64) -> Result<Vec<TaskWithUser>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT t.*,
                        u.id         AS u_id,
                        u.name       AS u_name,
                        u.email      AS u_email,
                        u.created_at AS u_created_at,
                        u.updated_at AS u_updated_at
                 FROM tasks t
                 LEFT JOIN users u ON u.id = t.user_id
                 WHERE t.project_id = ?1
                 ORDER BY t.id",
            )?;
            let tasks = stmt
                .query_map(params![project_id], row_to_task_with_user)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(tasks)
        })
    }

    pub fn update_task(&self, id: i64, update: &UpdateTask) -> Result<Task, DbError> {
        self.with_conn(|conn| {
            let now = Utc::now();
            let mut sets = vec!["updated_at = ?1".to_string()];
            let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = vec![Box::new(now)];

            // The nullable references arrive as Option<Option<_>>: the outer
            // level is presence in the body, the inner level is the new value.
            if let Some(user_id) = update.user_id {
                param_values.push(Box::new(user_id));
                sets.push(format!("user_id = ?{}", param_values.len()));
            }
            if let Some(ref title) = update.title {
                param_values.push(Box::new(title.clone()));
                sets.push(format!("title = ?{}", param_values.len()));
            }
            if let Some(ref description) = update.description {
                param_values.push(Box::new(description.clone()));
                sets.push(format!("description = ?{}", param_values.len()));
            }
            if let Some(due_date) = update.due_date {
                param_values.push(Box::new(due_date));
                sets.push(format!("due_date = ?{}", param_values.len()));
            }
            if let Some(file_id) = update.file_id {
                param_values.push(Box::new(file_id));
                sets.push(format!("file_id = ?{}", param_values.len()));
            }

            param_values.push(Box::new(id));
            let sql = format!(
                "UPDATE tasks SET {} WHERE id = ?{}",
                sets.join(", "),
                param_values.len()
            );

            let params_ref: Vec<&dyn rusqlite::types::ToSql> =
                param_values.iter().map(|p| p.as_ref()).collect();

            let changed = conn.execute(&sql, params_ref.as_slice())?;
            if changed == 0 {
                return Err(DbError::NotFound(format!("task {id}")));
            }

            let task = conn.query_row(
                "SELECT * FROM tasks WHERE id = ?1",
                params![id],
                row_to_task,
            )?;
            Ok(task)
        })
    }

    pub fn delete_task(&self, id: i64) -> Result<(), DbError> {
        self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
            if changed == 0 {
                return Err(DbError::NotFound(format!("task {id}")));
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use taskdeck_core::project::CreateProject;
    use taskdeck_core::task::{CreateTask, UpdateTask};
    use taskdeck_core::user::CreateUser;

    use crate::{Db, DbError};

    fn setup() -> (Db, i64) {
        let db = Db::open_in_memory().unwrap();
        let project = db
            .create_project(&CreateProject {
                title: "Test".into(),
                description: String::new(),
            })
            .unwrap();
        (db, project.id)
    }

    fn new_task(project_id: i64, title: &str) -> CreateTask {
        CreateTask {
            project_id,
            user_id: None,
            title: title.into(),
            description: String::new(),
            due_date: None,
            file_id: None,
        }
    }

    #[test]
    fn test_task_crud() {
        let (db, project_id) = setup();

        let task = db.create_task(&new_task(project_id, "First task")).unwrap();
        assert_eq!(task.title, "First task");
        assert_eq!(task.project_id, project_id);

        let fetched = db.get_task(task.id).unwrap();
        assert_eq!(fetched.id, task.id);

        let updated = db
            .update_task(
                task.id,
                &UpdateTask {
                    title: Some("Renamed".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.title, "Renamed");

        db.delete_task(task.id).unwrap();
        assert!(matches!(db.get_task(task.id), Err(DbError::NotFound(_))));
    }

    #[test]
    fn test_partial_update_leaves_other_fields() {
        let (db, project_id) = setup();

        let task = db
            .create_task(&CreateTask {
                description: "Keep me".into(),
                ..new_task(project_id, "Task")
            })
            .unwrap();

        let updated = db
            .update_task(
                task.id,
                &UpdateTask {
                    title: Some("New title".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.title, "New title");
        assert_eq!(updated.description, "Keep me");
        assert_eq!(updated.created_at, task.created_at);
    }

    #[test]
    fn test_update_clears_nullable_fields_set_to_none() {
        let (db, project_id) = setup();
        let user = db
            .create_user(&CreateUser {
                name: "Ana".into(),
                email: "ana@example.com".into(),
            })
            .unwrap();

        let task = db
            .create_task(&CreateTask {
                user_id: Some(user.id),
                due_date: Some(chrono::Utc::now()),
                ..new_task(project_id, "Assigned")
            })
            .unwrap();
        assert_eq!(task.user_id, Some(user.id));

        let updated = db
            .update_task(
                task.id,
                &UpdateTask {
                    user_id: Some(None),
                    due_date: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(updated.user_id.is_none());
        assert!(updated.due_date.is_none());

        // An absent field still leaves the stored value alone
        let task = db
            .update_task(
                task.id,
                &UpdateTask {
                    user_id: Some(Some(user.id)),
                    ..Default::default()
                },
            )
            .unwrap();
        let untouched = db
            .update_task(
                task.id,
                &UpdateTask {
                    title: Some("Renamed".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(untouched.user_id, task.user_id);
    }

    #[test]
    fn test_list_joins_assigned_user() {
        let (db, project_id) = setup();
        let user = db
            .create_user(&CreateUser {
                name: "Ana".into(),
                email: "ana@example.com".into(),
            })
            .unwrap();

        db.create_task(&CreateTask {
            user_id: Some(user.id),
            ..new_task(project_id, "Assigned")
        })
        .unwrap();
        db.create_task(&new_task(project_id, "Unassigned")).unwrap();

        let tasks = db.list_project_tasks(project_id).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].user.as_ref().unwrap().name, "Ana");
        assert!(tasks[1].user.is_none());
    }

    #[test]
    fn test_list_scoped_to_project() {
        let (db, project_id) = setup();
        let other = db
            .create_project(&CreateProject {
                title: "Other".into(),
                description: String::new(),
            })
            .unwrap();

        db.create_task(&new_task(project_id, "Mine")).unwrap();
        db.create_task(&new_task(other.id, "Theirs")).unwrap();

        let tasks = db.list_project_tasks(project_id).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].task.title, "Mine");
    }

    #[test]
    fn test_update_missing_task_is_not_found() {
        let (db, _) = setup();
        let result = db.update_task(
            42,
            &UpdateTask {
                title: Some("Nope".into()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(DbError::NotFound(_))));
    }

    #[test]
    fn test_deleting_project_cascades_tasks() {
        let (db, project_id) = setup();
        let task = db.create_task(&new_task(project_id, "Doomed")).unwrap();

        db.delete_project(project_id).unwrap();
        assert!(matches!(db.get_task(task.id), Err(DbError::NotFound(_))));
    }
}

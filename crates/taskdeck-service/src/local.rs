use async_trait::async_trait;
use taskdeck_core::file::{CreateFile, File};
use taskdeck_core::project::{CreateProject, Project, UpdateProject};
use taskdeck_core::task::{CreateTask, Task, TaskWithUser, UpdateTask};
use taskdeck_core::user::{CreateUser, User};
use taskdeck_db::Db;

use crate::{ServiceError, TaskService};

/// Local implementation backed by direct SQLite access.
pub struct LocalService {
    db: Db,
}

impl LocalService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

impl From<taskdeck_db::DbError> for ServiceError {
    fn from(e: taskdeck_db::DbError) -> Self {
        match e {
            taskdeck_db::DbError::NotFound(msg) => ServiceError::NotFound(msg),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

#[async_trait]
impl TaskService for LocalService {
    async fn list_projects(&self) -> Result<Vec<Project>, ServiceError> {
        Ok(self.db.list_projects()?)
    }

    async fn get_project(&self, id: i64) -> Result<Project, ServiceError> {
        Ok(self.db.get_project(id)?)
    }

    async fn create_project(&self, input: &CreateProject) -> Result<Project, ServiceError> {
        if input.title.trim().is_empty() {
            return Err(ServiceError::InvalidInput("title is required".into()));
        }
        Ok(self.db.create_project(input)?)
    }

    async fn update_project(
        &self,
        id: i64,
        update: &UpdateProject,
    ) -> Result<Project, ServiceError> {
        Ok(self.db.update_project(id, update)?)
    }

    async fn delete_project(&self, id: i64) -> Result<(), ServiceError> {
        Ok(self.db.delete_project(id)?)
    }

    async fn list_users(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.db.list_users()?)
    }

    async fn get_user(&self, id: i64) -> Result<User, ServiceError> {
        Ok(self.db.get_user(id)?)
    }

    async fn create_user(&self, input: &CreateUser) -> Result<User, ServiceError> {
        if input.email.trim().is_empty() {
            return Err(ServiceError::InvalidInput("email is required".into()));
        }
        Ok(self.db.create_user(input)?)
    }

    async fn get_file(&self, id: i64) -> Result<File, ServiceError> {
        Ok(self.db.get_file(id)?)
    }

    async fn create_file(&self, input: &CreateFile) -> Result<File, ServiceError> {
        Ok(self.db.create_file(input)?)
    }

    async fn list_project_tasks(
        &self,
        project_id: i64,
    ) -> Result<Vec<TaskWithUser>, ServiceError> {
        Ok(self.db.list_project_tasks(project_id)?)
    }

    async fn get_task(&self, id: i64) -> Result<Task, ServiceError> {
        Ok(self.db.get_task(id)?)
    }

    async fn create_task(&self, input: &CreateTask) -> Result<Task, ServiceError> {
        Ok(self.db.create_task(input)?)
    }

    async fn update_task(&self, id: i64, update: &UpdateTask) -> Result<Task, ServiceError> {
        Ok(self.db.update_task(id, update)?)
    }

    async fn delete_task(&self, id: i64) -> Result<(), ServiceError> {
        Ok(self.db.delete_task(id)?)
    }
}

#[cfg(test)]
mod tests {
    use taskdeck_core::project::CreateProject;

    use super::*;

    #[tokio::test]
    async fn create_project_requires_title() {
        let service = LocalService::new(Db::open_in_memory().unwrap());
        let result = service
            .create_project(&CreateProject {
                title: "  ".into(),
                description: String::new(),
            })
            .await;
        assert!(matches!(result, Err(ServiceError::InvalidInput(_))));
    }
}

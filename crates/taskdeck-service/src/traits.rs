use async_trait::async_trait;
use taskdeck_core::file::{CreateFile, File};
use taskdeck_core::project::{CreateProject, Project, UpdateProject};
use taskdeck_core::task::{CreateTask, Task, TaskWithUser, UpdateTask};
use taskdeck_core::user::{CreateUser, User};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Abstraction over the persistence operations the HTTP layer needs.
///
/// `LocalService` wraps a direct SQLite connection; the routes program
/// against this trait.
#[async_trait]
pub trait TaskService: Send + Sync {
    // -- Projects --
    async fn list_projects(&self) -> Result<Vec<Project>, ServiceError>;
    async fn get_project(&self, id: i64) -> Result<Project, ServiceError>;
    async fn create_project(&self, input: &CreateProject) -> Result<Project, ServiceError>;
    async fn update_project(
        &self,
        id: i64,
        update: &UpdateProject,
    ) -> Result<Project, ServiceError>;
    async fn delete_project(&self, id: i64) -> Result<(), ServiceError>;

    // -- Users --
    async fn list_users(&self) -> Result<Vec<User>, ServiceError>;
    async fn get_user(&self, id: i64) -> Result<User, ServiceError>;
    async fn create_user(&self, input: &CreateUser) -> Result<User, ServiceError>;

    // -- Files --
    async fn get_file(&self, id: i64) -> Result<File, ServiceError>;
    async fn create_file(&self, input: &CreateFile) -> Result<File, ServiceError>;

    // -- Tasks --
    async fn list_project_tasks(&self, project_id: i64)
        -> Result<Vec<TaskWithUser>, ServiceError>;
    async fn get_task(&self, id: i64) -> Result<Task, ServiceError>;
    async fn create_task(&self, input: &CreateTask) -> Result<Task, ServiceError>;
    async fn update_task(&self, id: i64, update: &UpdateTask) -> Result<Task, ServiceError>;
    async fn delete_task(&self, id: i64) -> Result<(), ServiceError>;
}

pub mod file;
pub mod project;
pub mod task;
pub mod user;

pub use file::File;
pub use project::Project;
pub use task::{Task, TaskWithUser};
pub use user::User;

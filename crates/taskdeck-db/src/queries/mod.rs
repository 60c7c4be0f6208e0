mod files;
mod projects;
mod tasks;
mod users;

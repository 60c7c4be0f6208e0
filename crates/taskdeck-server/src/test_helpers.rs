use axum::Router;
use taskdeck_db::Db;
use taskdeck_service::LocalService;

/// Build a router backed by a fresh in-memory SQLite database.
pub fn test_router() -> Router {
    let db = Db::open_in_memory().expect("in-memory db");
    crate::routes::build_router(LocalService::new(db))
}

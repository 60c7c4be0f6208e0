mod routes;
pub mod test_helpers;

use anyhow::Result;
use taskdeck_db::Db;
use taskdeck_service::LocalService;
use tokio::net::TcpListener;

pub async fn serve(listener: TcpListener, db: Db) -> Result<()> {
    let service = LocalService::new(db);
    let app = routes::build_router(service);
    axum::serve(listener, app).await?;
    Ok(())
}

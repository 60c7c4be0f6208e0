use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "taskdeck-server")]
struct Cli {
    /// Address to bind
    #[arg(long, env = "TASKDECK_BIND", default_value = "0.0.0.0")]
    bind: String,

    /// Port to listen on
    #[arg(long, env = "TASKDECK_PORT", default_value_t = 3333)]
    port: u16,

    /// SQLite database path (defaults to the per-user data dir)
    #[arg(long, env = "TASKDECK_DB")]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let db_path = cli.db.clone().unwrap_or_else(default_db_path);
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db = taskdeck_db::Db::open(&db_path)?;

    let addr = SocketAddr::new(cli.bind.parse()?, cli.port);
    let listener = TcpListener::bind(addr).await?;
    info!("taskdeck-server listening on http://{addr}");

    taskdeck_server::serve(listener, db).await?;
    Ok(())
}

/// `$XDG_DATA_HOME/taskdeck/taskdeck.db`, falling back to `~/.local/share`.
fn default_db_path() -> PathBuf {
    let base = if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg)
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local/share")
    } else {
        PathBuf::from(".")
    };
    base.join("taskdeck").join("taskdeck.db")
}

use std::{env, net::SocketAddr};

use axum::Router;
use common::utils::logging::{init_logging, Format};
use dotenvy::dotenv;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

/// Initialize logging via shared common utils, honouring `[logging]`
pub fn init_logging_from(cfg: Option<&configs::AppConfig>) {
    let (format, filter) = match cfg {
        Some(c) => (
            match c.logging.format {
                configs::LogFormat::Compact => Format::Compact,
                configs::LogFormat::Json => Format::Json,
            },
            c.logging.filter.as_deref(),
        ),
        None => (Format::Compact, None),
    };
    init_logging(format, filter);
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr(cfg: Option<&configs::AppConfig>) -> anyhow::Result<SocketAddr> {
    let (host, port) = match cfg {
        Some(c) => (c.server.host.clone(), c.server.port),
        None => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8081);
            (host, port)
        }
    };
    let addr = format!("{}:{}", host, port)
        .parse::<SocketAddr>()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {host}:{port}: {e}")))?;
    Ok(addr)
}

/// Public entry: connect, migrate, build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            // 此时日志尚未初始化
            eprintln!("config.toml not usable ({e}); falling back to environment");
            None
        }
    };
    init_logging_from(cfg.as_ref());

    let db_cfg = cfg
        .as_ref()
        .map(|c| DatabaseConfig::from(&c.database))
        .unwrap_or_else(DatabaseConfig::from_env);
    let db = connect_with_config(&db_cfg)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    // 启动前确保表结构为最新
    if let Err(e) = migration::Migrator::up(&db, None).await {
        warn!(error = %e, "migrations failed");
        return Err(StartupError::Database(e.to_string()).into());
    }
    info!("schema up to date");

    let app: Router = routes::build_router(ServerState::new(db), build_cors());

    let addr = load_bind_addr(cfg.as_ref())?;
    info!(%addr, "starting catalog server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

//! Film inventory API server binary.
//!
//! Loads configuration from the environment (and `.env`), connects to
//! PostgreSQL or uses in-memory stores, and serves the REST API until
//! Ctrl-C.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use film_api::AppState;
use film_api::config::ApiConfig;
use film_core::auth::SessionService;
use film_core::stores::Stores;
use sqlx::postgres::PgPoolOptions;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "film_api_server", about = "Film inventory API server")]
struct Args {
    /// Port to listen on; overrides the port of `BIND_ADDR` (0 = ephemeral).
    #[arg(long)]
    port: Option<u16>,

    /// PostgreSQL connection URL; overrides `DATABASE_URL`.
    #[arg(long)]
    database_url: Option<String>,

    /// Maximum number of database connections in the pool.
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    max_connections: u32,

    /// Keep everything in process memory instead of PostgreSQL.
    #[arg(long, default_value_t = false)]
    in_memory: bool,

    /// Seconds between expired refresh-token sweeps (0 disables).
    #[arg(long, default_value_t = 3600)]
    sweep_interval_secs: u64,
}

/// Periodically delete expired refresh tokens until cancelled.
async fn sweep_loop(sessions: Arc<SessionService>, every: Duration, ct: CancellationToken) {
    let mut ticker = tokio::time::interval(every);
    loop {
        tokio::select! {
            _ = ct.cancelled() => break,
            _ = ticker.tick() => {
                match sessions.sweep_expired(chrono::Utc::now()).await {
                    Ok(0) => {}
                    Ok(removed) => info!(removed, "swept expired refresh tokens"),
                    Err(e) => error!(error = %e, "refresh token sweep failed"),
                }
            }
        }
    }
}

async fn shutdown_signal(ct: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        return;
    }
    info!("shutdown requested");
    ct.cancel();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,film_api=debug,film_core=debug")),
        )
        .init();

    let args = Args::parse();
    let mut config = ApiConfig::from_env()?;
    if let Some(url) = args.database_url {
        config.database_url = url;
    }

    let mut bind_addr: SocketAddr = config.bind_addr.parse()?;
    if let Some(port) = args.port {
        bind_addr.set_port(port);
    }

    info!(environment = ?config.environment, addr = %bind_addr, "starting film_api_server");

    let stores = if args.in_memory {
        warn!("using in-memory stores; data is lost on exit");
        Stores::in_memory()
    } else {
        info!(max_connections = args.max_connections, "configuring connection pool");
        let pool = PgPoolOptions::new()
            .max_connections(args.max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&config.database_url)
            .await?;

        info!("running database migrations");
        film_api::migrate(&pool).await?;
        Stores::postgres(pool)
    };

    let state = AppState::new(config, stores);
    let ct = CancellationToken::new();

    let sweeper = (args.sweep_interval_secs > 0).then(|| {
        tokio::spawn(sweep_loop(
            state.sessions.clone(),
            Duration::from_secs(args.sweep_interval_secs),
            ct.clone(),
        ))
    });

    let app = film_api::router(state);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    let serve_result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(ct.clone()))
        .await;

    ct.cancel();
    if let Some(handle) = sweeper {
        let _ = handle.await;
    }

    serve_result?;
    info!("server stopped");
    Ok(())
}

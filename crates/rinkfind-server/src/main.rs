mod api;
mod middleware;

use std::sync::Arc;

use rinkfind_core::{Geocoder, RinkStore};
use rinkfind_search::{CoordinateResolver, RinkSearch};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = rinkfind_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(config.env.uses_ansi_logs())
        .init();
    tracing::info!(config = ?config, "starting rinkfind-server");

    let pool_config = rinkfind_db::PoolConfig::from_app_config(&config);
    let pool = rinkfind_db::connect_pool(&config.database_url, pool_config).await?;
    rinkfind_db::run_migrations(&pool).await?;

    let store: Arc<dyn RinkStore> = Arc::new(rinkfind_db::PgRinkStore::new(pool));
    let geocoder: Arc<dyn Geocoder> =
        Arc::new(rinkfind_geocode::NominatimClient::from_app_config(&config)?);
    let resolver = CoordinateResolver::new(Arc::clone(&store), geocoder)
        .with_write_back(config.geocode_write_back);
    let search = Arc::new(RinkSearch::new(resolver, Arc::clone(&store)));

    let app = build_app(AppState { store, search }, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}

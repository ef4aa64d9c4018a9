//! Serviço HTTP das fichas de estratificação de risco gestacional

use anyhow::{Context, Result};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod middleware;
mod routes;
mod state;

use config::ApiConfig;
use state::AppState;

pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("falha ao aguardar sinal de encerramento: {e}");
    }
    tracing::info!("encerrando o serviço");
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = ApiConfig::from_env()?;
    init_tracing(config.log_json);

    tracing::info!(
        versao = built_info::PKG_VERSION,
        bind = %config.bind_addr,
        "iniciando fichas-api"
    );

    let pool = fichas_db::init_db_pool(&config.db).await?;
    let state = AppState::new(pool, &config.jwt_secret);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router(state)
        .layer(ConcurrencyLimitLayer::new(config.max_concurrency))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    axum::Server::bind(&config.bind_addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Falha no servidor HTTP")?;

    Ok(())
}

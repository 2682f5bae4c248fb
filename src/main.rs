use anyhow::Result;

use loteria_web::store::{self, KeyValueStore};
use loteria_web::{config, server, state};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::Config::from_env()?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.log_level.parse().unwrap_or_default());
    if config.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }

    let host = config.http_host.clone();
    let port = config.http_port;

    tracing::info!(
        api_url = %config.api_url,
        token_file = %config.token_file,
        %host,
        port,
        "loteria-web starting"
    );

    let app_state = state::AppState::new(config);

    if app_state.tokens.get(store::TOKEN_KEY).is_none() {
        tracing::warn!("no session token stored; billing and generation calls will be unauthenticated");
    }

    let router = server::build_router(app_state);

    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
    tracing::info!("HTTP server listening on {host}:{port}");
    tracing::info!("open http://localhost:{port} in your browser");

    axum::serve(listener, router).await?;

    Ok(())
}

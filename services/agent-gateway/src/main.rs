use agent_gateway::{
    app, GatewayState, BIND_ADDR_ENV, CORS_ORIGIN_ENV, DEFAULT_BIND_ADDR, DEFAULT_CORS_ORIGIN,
};
use anyhow::Context;
use axum::http::HeaderValue;
use directory_core::BUILD_INFO;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Agent Gateway {}", BUILD_INFO);

    let bind_addr =
        std::env::var(BIND_ADDR_ENV).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let cors_origin =
        std::env::var(CORS_ORIGIN_ENV).unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string());
    let cors_origin = HeaderValue::from_str(&cors_origin)
        .with_context(|| format!("{CORS_ORIGIN_ENV} is not a valid origin: {cors_origin}"))?;

    let state = GatewayState::seeded();
    info!("Seeded {} agents", state.agent_count());

    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Agent Gateway listening on {}", listener.local_addr()?);

    axum::serve(listener, app(state, cors_origin)).await?;

    Ok(())
}

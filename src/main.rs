use quiz_assistant::{
    config::{get_config, init_config},
    router, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    init_config()?;
    let config = get_config();
    info!(
        provider = ?config.chat_provider,
        model = %config.chat_model,
        base_url = %config.chat_base_url,
        "chat backend configured"
    );

    let app_state = AppState::new(config)?;

    app_state.stats_service.load().await;
    let _stats_listener = app_state
        .stats_service
        .spawn_listener(&app_state.events);

    let app = router(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use std::net::SocketAddr;

use axum::routing::get;
use sp_api::{config::ApiConfig, middleware, state::ApiState};
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    sp_api::tracing::init_tracing(config.env);

    // Connect and migrate
    let pool = sp_db::create_pool(&config.database_url, 10).await?;
    sp_db::ensure_db_and_migrate(&config.database_url, &pool).await?;

    // Prometheus recorder; exposed on /metrics
    let metrics_handle = sp_api::metrics::init_metrics()?;

    let state = ApiState::new(&config, pool);

    let app = sp_api::router::router().route(
        "/metrics",
        get(move || {
            let handle = metrics_handle.clone();
            async move { handle.render() }
        }),
    );
    let app = middleware::security_headers::apply_security_headers(app, config.env);
    let app = app
        .with_state(state)
        .layer(axum::middleware::from_fn(sp_api::metrics::track_metrics))
        .layer(axum::middleware::from_fn(
            middleware::request_id::request_id_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors::create_cors_layer(
            config.allowed_origins.clone(),
        ));

    // Start the server; ConnectInfo feeds the per-IP rate limiter
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server running on http://{}", config.bind_addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

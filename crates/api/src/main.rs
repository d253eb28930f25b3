use assetdesk_api::config::AppConfig;

#[tokio::main]
async fn main() {
    assetdesk_observability::init();

    let config = AppConfig::from_env();
    let addr = format!("0.0.0.0:{}", config.port);

    let app = assetdesk_api::app::build_app(config);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("Asset Manager is running on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}

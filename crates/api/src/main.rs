#[tokio::main]
async fn main() {
    playforge_observability::init();

    let services = playforge_api::app::services::build_services_from_env()
        .expect("failed to build application services");
    let app = playforge_api::app::build_app(services);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .unwrap_or_else(|e| panic!("failed to bind 0.0.0.0:{port}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}

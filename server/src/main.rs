use flatrate::ApplicationRuntime;
use flatrate_server::routes;
use flatrate_server::state::AppState;
use log::info;
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let runtime = ApplicationRuntime::new()?;
    let addr = runtime.config().listen_addr;
    if !runtime.config().has_api_key() {
        info!("No API key configured, access control is disabled (local dev only)");
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router(AppState::from_runtime(&runtime)).layer(cors);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
